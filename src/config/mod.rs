//! Configuration: fee schedule overrides, pricing policy, insight client and logging

pub mod loader;
pub mod types;

pub use loader::{load_config, load_from_str};
pub use types::{AppConfig, AppSettings, InsightConfig, PricingSettings};
