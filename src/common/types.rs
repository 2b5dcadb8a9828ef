//! Unified types shared by the engine, the CLI and the insight generator

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::coercion::NumericInput;

/// Marketplace identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Marketplace {
    Shopee,
    #[serde(rename = "tiktok")]
    TikTokShop,
    MercadoLivre,
    Amazon,
}

impl Marketplace {
    /// All marketplaces in display order
    pub const ALL: [Marketplace; 4] = [
        Marketplace::Shopee,
        Marketplace::TikTokShop,
        Marketplace::MercadoLivre,
        Marketplace::Amazon,
    ];
}

impl std::fmt::Display for Marketplace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Marketplace::Shopee => write!(f, "shopee"),
            Marketplace::TikTokShop => write!(f, "tiktok"),
            Marketplace::MercadoLivre => write!(f, "mercado_livre"),
            Marketplace::Amazon => write!(f, "amazon"),
        }
    }
}

/// How the selling price is obtained for one computation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationMode {
    /// Solve for the selling price that yields the desired margin
    #[default]
    MarginTarget,
    /// Use the test price as-is and report the resulting profit
    ProfitEvaluation,
}

impl std::fmt::Display for CalculationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CalculationMode::MarginTarget => write!(f, "margin target"),
            CalculationMode::ProfitEvaluation => write!(f, "profit evaluation"),
        }
    }
}

/// What the target margin percentage is a fraction of
///
/// The same base is used when reporting `net_profit_margin_percent`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfitTargetBasis {
    /// Desired profit = product cost x margin
    #[default]
    ProductCost,
    /// Desired profit = selling price x margin
    SellingPrice,
}

/// Commission tier selected for a listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingTier {
    #[default]
    Standard,
    Upgraded,
}

/// Shopee listing mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShopeeListing {
    /// Outside the free shipping program
    #[default]
    Standard,
    /// Enrolled in the free shipping program (higher commission)
    FreeShipping,
}

impl From<ShopeeListing> for ListingTier {
    fn from(listing: ShopeeListing) -> Self {
        match listing {
            ShopeeListing::Standard => ListingTier::Standard,
            ShopeeListing::FreeShipping => ListingTier::Upgraded,
        }
    }
}

/// Mercado Livre listing type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MercadoLivreListing {
    #[default]
    Classic,
    Premium,
}

impl From<MercadoLivreListing> for ListingTier {
    fn from(listing: MercadoLivreListing) -> Self {
        match listing {
            MercadoLivreListing::Classic => ListingTier::Standard,
            MercadoLivreListing::Premium => ListingTier::Upgraded,
        }
    }
}

/// Caller-selected listing variants
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListingSelection {
    #[serde(default)]
    pub shopee: ShopeeListing,
    #[serde(default)]
    pub mercado_livre: MercadoLivreListing,
}

impl ListingSelection {
    /// Tier selected for a marketplace (always standard where no choice exists)
    pub fn tier_for(&self, marketplace: Marketplace) -> ListingTier {
        match marketplace {
            Marketplace::Shopee => self.shopee.into(),
            Marketplace::MercadoLivre => self.mercado_livre.into(),
            Marketplace::TikTokShop | Marketplace::Amazon => ListingTier::Standard,
        }
    }
}

/// Normalized seller inputs for one computation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostInput {
    /// Unit acquisition cost
    pub product_cost: Decimal,
    /// Per-unit packing/shipping/overhead cost
    pub operational_cost: Decimal,
    /// Desired profit percentage (margin target mode only)
    pub target_margin_percent: Decimal,
    /// Selling price to evaluate (profit evaluation mode only)
    pub test_price: Decimal,
    /// Whether the simplified tax rate applies
    pub is_taxable: bool,
    /// Tax rate percentage, only used when `is_taxable`
    pub tax_rate_percent: Decimal,
    #[serde(default)]
    pub listings: ListingSelection,
}

impl CostInput {
    /// Product plus operational cost, saturating at `Decimal::MAX`
    pub fn base_cost(&self) -> Decimal {
        self.product_cost.saturating_add(self.operational_cost)
    }

    /// Target margin as a fraction
    pub fn margin_fraction(&self) -> Decimal {
        self.target_margin_percent / Decimal::ONE_HUNDRED
    }

    /// Tax rate as a fraction, zero when not taxable
    pub fn tax_fraction(&self) -> Decimal {
        if self.is_taxable {
            self.tax_rate_percent / Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        }
    }
}

/// Seller inputs as entered, before coercion
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCostInput {
    #[serde(default)]
    pub product_cost: NumericInput,
    #[serde(default)]
    pub operational_cost: NumericInput,
    #[serde(default)]
    pub target_margin_percent: NumericInput,
    #[serde(default)]
    pub test_price: NumericInput,
    #[serde(default)]
    pub is_taxable: bool,
    #[serde(default)]
    pub tax_rate_percent: NumericInput,
    #[serde(default)]
    pub listings: ListingSelection,
}

impl From<&RawCostInput> for CostInput {
    fn from(raw: &RawCostInput) -> Self {
        Self {
            product_cost: raw.product_cost.value(),
            operational_cost: raw.operational_cost.value(),
            target_margin_percent: raw.target_margin_percent.value(),
            test_price: raw.test_price.value(),
            is_taxable: raw.is_taxable,
            tax_rate_percent: raw.tax_rate_percent.value(),
            listings: raw.listings,
        }
    }
}

impl From<RawCostInput> for CostInput {
    fn from(raw: RawCostInput) -> Self {
        CostInput::from(&raw)
    }
}

/// Per-fee amounts retained by the marketplace
///
/// Components that do not apply are reported as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeesBreakdown {
    pub commission: Decimal,
    pub transaction_fee: Decimal,
    pub fixed_fee: Decimal,
    pub tax: Decimal,
    pub affiliate: Decimal,
}

impl FeesBreakdown {
    /// Sum of every retained amount, tax included
    pub fn total(&self) -> Decimal {
        [self.transaction_fee, self.fixed_fee, self.tax, self.affiliate]
            .into_iter()
            .fold(self.commission, Decimal::saturating_add)
    }
}

/// Outcome of resolving one marketplace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformResult {
    pub marketplace: Marketplace,
    /// Display name, reflecting the selected listing variant
    pub platform_name: String,
    pub selling_price: Decimal,
    pub net_profit: Decimal,
    pub net_profit_margin_percent: Decimal,
    /// Product + operational cost + applied fixed fee
    pub total_fixed_costs: Decimal,
    /// Rate-based fees, tax excluded
    pub total_variable_costs: Decimal,
    pub fees: FeesBreakdown,
}

impl PlatformResult {
    /// Amount the seller receives before subtracting their own costs
    pub fn payout(&self) -> Decimal {
        self.selling_price.saturating_sub(self.fees.total())
    }
}

/// Results for every marketplace from one computation pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationSet {
    pub shopee: PlatformResult,
    pub tiktok: PlatformResult,
    pub mercado_livre: PlatformResult,
    pub amazon: PlatformResult,
}

impl CalculationSet {
    /// Get the result for a marketplace
    pub fn get(&self, marketplace: Marketplace) -> &PlatformResult {
        match marketplace {
            Marketplace::Shopee => &self.shopee,
            Marketplace::TikTokShop => &self.tiktok,
            Marketplace::MercadoLivre => &self.mercado_livre,
            Marketplace::Amazon => &self.amazon,
        }
    }

    /// Iterate results in display order
    pub fn iter(&self) -> impl Iterator<Item = &PlatformResult> {
        Marketplace::ALL.into_iter().map(move |m| self.get(m))
    }

    /// Result with the highest net profit (first in display order on ties)
    pub fn best(&self) -> &PlatformResult {
        self.iter()
            .fold(&self.shopee, |best, r| if r.net_profit > best.net_profit { r } else { best })
    }
}
