//! Marketplace pricing engine
//!
//! Computes, for one cost input, the selling price and profit on each
//! marketplace. All marketplaces share one resolution algorithm
//! ([`FeeResolver`]) parameterized by a [`FeeSchedule`] record.
//!
//! # Architecture
//!
//! ```text
//! RawCostInput ──coercion──▶ CostInput
//!                               │
//!                               ▼
//!                  PricingEngine::calculate_all(input, mode)
//!            ┌──────────┬───────┴───────┬──────────────┐
//!            ▼          ▼               ▼              ▼
//!         Shopee     TikTok      Mercado Livre      Amazon      (FeeResolver
//!            │          │               │              │         per schedule)
//!            └──────────┴───────┬───────┴──────────────┘
//!                               ▼
//!                        CalculationSet
//! ```
//!
//! # Modes
//!
//! - [`CalculationMode::MarginTarget`]: solve for the price that yields the
//!   target margin. Threshold fees (charged only below a price) are resolved
//!   by evaluating the fee-charged and fee-waived candidates and keeping the
//!   one consistent with its own assumption.
//! - [`CalculationMode::ProfitEvaluation`]: take the test price as-is.
//!
//! Nothing here returns an error. Degenerate inputs (zero costs, fee rates
//! adding up to 100% or more) resolve to a zero selling price.
//!
//! # Example
//!
//! ```
//! use marketplace_pricing::{calculate_all, CalculationMode, CostInput};
//! use rust_decimal_macros::dec;
//!
//! let input = CostInput {
//!     product_cost: dec!(30),
//!     operational_cost: dec!(2),
//!     target_margin_percent: dec!(30),
//!     ..Default::default()
//! };
//! let results = calculate_all(&input, CalculationMode::MarginTarget);
//! assert!(results.amazon.selling_price > dec!(48));
//! ```
//!
//! [`CalculationMode::MarginTarget`]: crate::common::types::CalculationMode::MarginTarget
//! [`CalculationMode::ProfitEvaluation`]: crate::common::types::CalculationMode::ProfitEvaluation

mod engine;
mod resolver;
mod schedule;

pub use engine::{calculate_all, PricingEngine};
pub use resolver::{FeeResolver, PricePoint};
pub use schedule::{FeeSchedule, FeeTable, FixedFeeRule, ListingRate};
