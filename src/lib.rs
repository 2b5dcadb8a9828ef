//! MarketplacePricing Library
//!
//! Computes the selling price (or the resulting profit) of a product on
//! Shopee, TikTok Shop, Mercado Livre and Amazon, accounting for each
//! marketplace's commissions, transaction fees, fixed fees and thresholds.

pub mod common;
pub mod config;
pub mod insight;
pub mod pricing;

// Re-export commonly used types
pub use common::coercion::{to_decimal, NumericInput};
pub use common::errors::{PricingError, Result};
pub use common::format::{format_currency, format_percent, parse_currency_input};
pub use common::types::{
    CalculationMode, CalculationSet, CostInput, FeesBreakdown, ListingSelection, ListingTier,
    Marketplace, MercadoLivreListing, PlatformResult, ProfitTargetBasis, RawCostInput,
    ShopeeListing,
};
pub use crate::config::types::AppConfig;

// Engine types
pub use pricing::{
    calculate_all, FeeResolver, FeeSchedule, FeeTable, FixedFeeRule, ListingRate, PricePoint,
    PricingEngine,
};

// Insight types
pub use insight::{generate_insight, GeminiClient, InsightGenerator, InsightReport, InsightSnapshot};
