//! Configuration types

use serde::{Deserialize, Serialize};

use crate::common::types::ProfitTargetBasis;
use crate::pricing::FeeTable;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Marketplace fee schedules (built-in table unless overridden)
    #[serde(default)]
    pub fees: FeeTable,
    /// Pricing policy
    #[serde(default)]
    pub pricing: PricingSettings,
    /// Narrative insight service
    #[serde(default)]
    pub insight: InsightConfig,
    /// General application settings
    #[serde(default)]
    pub settings: AppSettings,
}

/// Pricing policy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PricingSettings {
    /// What the target margin is a percentage of
    #[serde(default)]
    pub basis: ProfitTargetBasis,
}

/// Insight (Gemini) service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightConfig {
    /// API key; falls back to `GEMINI_API_KEY` / `API_KEY` from the environment
    #[serde(default)]
    pub api_key: Option<String>,
    /// Base URL for the generative language API
    #[serde(default = "default_insight_base_url")]
    pub base_url: String,
    /// Model identifier
    #[serde(default = "default_insight_model")]
    pub model: String,
    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_insight_base_url(),
            model: default_insight_model(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

fn default_insight_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_insight_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Log output format ("pretty" or "json")
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}
