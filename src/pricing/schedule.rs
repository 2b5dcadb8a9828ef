use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::common::errors::{PricingError, Result};
use crate::common::types::{ListingTier, Marketplace};

/// Commission charged for one listing variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingRate {
    /// Display name shown for results under this variant
    pub platform_name: String,
    /// Commission as a fraction of the selling price
    pub commission_rate: Decimal,
}

impl ListingRate {
    pub fn new(platform_name: impl Into<String>, commission_rate: Decimal) -> Self {
        Self {
            platform_name: platform_name.into(),
            commission_rate,
        }
    }
}

/// Flat per-item fee rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FixedFeeRule {
    /// No per-item fee
    None,
    /// Charged on every sale
    Flat { amount: Decimal },
    /// Charged only when the selling price is below `threshold`
    BelowThreshold { fee: Decimal, threshold: Decimal },
}

impl FixedFeeRule {
    /// Fee owed at a known selling price
    pub fn fee_at(&self, price: Decimal) -> Decimal {
        match self {
            FixedFeeRule::None => Decimal::ZERO,
            FixedFeeRule::Flat { amount } => *amount,
            FixedFeeRule::BelowThreshold { fee, threshold } => {
                if price < *threshold {
                    *fee
                } else {
                    Decimal::ZERO
                }
            }
        }
    }
}

/// Fee configuration for a marketplace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeSchedule {
    pub marketplace: Marketplace,
    /// Default listing variant
    pub standard: ListingRate,
    /// Higher-commission variant, for marketplaces that offer one
    #[serde(default)]
    pub upgraded: Option<ListingRate>,
    /// Payment/transaction surcharge as a fraction of the selling price
    #[serde(default)]
    pub transaction_rate: Decimal,
    pub fixed_fee: FixedFeeRule,
    /// Affiliate commission as a fraction of the selling price
    #[serde(default)]
    pub affiliate_rate: Decimal,
    /// Whether the seller's simplified tax is charged on this marketplace
    #[serde(default = "default_applies_tax")]
    pub applies_tax: bool,
}

fn default_applies_tax() -> bool {
    true
}

impl FeeSchedule {
    /// Shopee fee structure
    /// - 12% commission, 18% inside the free shipping program
    /// - 2% transaction fee
    /// - R$ 4,00 per item
    pub fn shopee() -> Self {
        Self {
            marketplace: Marketplace::Shopee,
            standard: ListingRate::new("Shopee (Sem Frete Grátis)", dec!(0.12)),
            upgraded: Some(ListingRate::new("Shopee (Com Frete Grátis)", dec!(0.18))),
            transaction_rate: dec!(0.02),
            fixed_fee: FixedFeeRule::Flat { amount: dec!(4.00) },
            affiliate_rate: Decimal::ZERO,
            applies_tax: true,
        }
    }

    /// TikTok Shop fee structure
    /// - 12% commission
    /// - R$ 2,00 per item below R$ 79,00
    pub fn tiktok_shop() -> Self {
        Self {
            marketplace: Marketplace::TikTokShop,
            standard: ListingRate::new("TikTok Shop", dec!(0.12)),
            upgraded: None,
            transaction_rate: Decimal::ZERO,
            fixed_fee: FixedFeeRule::BelowThreshold {
                fee: dec!(2.00),
                threshold: dec!(79.00),
            },
            affiliate_rate: Decimal::ZERO,
            applies_tax: true,
        }
    }

    /// Mercado Livre fee structure
    /// - 14% classic listing, 19% premium listing
    /// - R$ 6,00 per item below R$ 79,00
    pub fn mercado_livre() -> Self {
        Self {
            marketplace: Marketplace::MercadoLivre,
            standard: ListingRate::new("Mercado Livre (Clássico)", dec!(0.14)),
            upgraded: Some(ListingRate::new("Mercado Livre (Premium)", dec!(0.19))),
            transaction_rate: Decimal::ZERO,
            fixed_fee: FixedFeeRule::BelowThreshold {
                fee: dec!(6.00),
                threshold: dec!(79.00),
            },
            affiliate_rate: Decimal::ZERO,
            applies_tax: true,
        }
    }

    /// Amazon fee structure
    /// - 15% commission, no per-item fee
    pub fn amazon() -> Self {
        Self {
            marketplace: Marketplace::Amazon,
            standard: ListingRate::new("Amazon", dec!(0.15)),
            upgraded: None,
            transaction_rate: Decimal::ZERO,
            fixed_fee: FixedFeeRule::None,
            affiliate_rate: Decimal::ZERO,
            applies_tax: true,
        }
    }

    /// Built-in schedule for a marketplace
    pub fn for_marketplace(marketplace: Marketplace) -> Self {
        match marketplace {
            Marketplace::Shopee => Self::shopee(),
            Marketplace::TikTokShop => Self::tiktok_shop(),
            Marketplace::MercadoLivre => Self::mercado_livre(),
            Marketplace::Amazon => Self::amazon(),
        }
    }

    /// Listing rate for a tier; falls back to standard when the
    /// marketplace has no upgraded variant
    pub fn listing(&self, tier: ListingTier) -> &ListingRate {
        match tier {
            ListingTier::Upgraded => self.upgraded.as_ref().unwrap_or(&self.standard),
            ListingTier::Standard => &self.standard,
        }
    }

    /// Check rates and fee amounts are usable
    pub fn validate(&self) -> Result<()> {
        let rates = std::iter::once(("standard commission_rate", self.standard.commission_rate))
            .chain(
                self.upgraded
                    .as_ref()
                    .map(|u| ("upgraded commission_rate", u.commission_rate)),
            )
            .chain([
                ("transaction_rate", self.transaction_rate),
                ("affiliate_rate", self.affiliate_rate),
            ]);

        for (name, rate) in rates {
            if rate < Decimal::ZERO || rate >= Decimal::ONE {
                return Err(self.invalid(format!("{} must be in [0, 1), got {}", name, rate)));
            }
        }

        match &self.fixed_fee {
            FixedFeeRule::None => {}
            FixedFeeRule::Flat { amount } if *amount < Decimal::ZERO => {
                return Err(self.invalid(format!("fixed fee must not be negative, got {}", amount)));
            }
            FixedFeeRule::Flat { .. } => {}
            FixedFeeRule::BelowThreshold { fee, threshold } => {
                if *fee < Decimal::ZERO {
                    return Err(self.invalid(format!("fixed fee must not be negative, got {}", fee)));
                }
                if *threshold <= Decimal::ZERO {
                    return Err(self.invalid(format!("threshold must be positive, got {}", threshold)));
                }
            }
        }

        Ok(())
    }

    fn invalid(&self, reason: String) -> PricingError {
        PricingError::InvalidSchedule {
            marketplace: self.marketplace.to_string(),
            reason,
        }
    }
}

/// One schedule per marketplace, fixed once loaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeTable {
    #[serde(default = "FeeSchedule::shopee")]
    pub shopee: FeeSchedule,
    #[serde(default = "FeeSchedule::tiktok_shop")]
    pub tiktok: FeeSchedule,
    #[serde(default = "FeeSchedule::mercado_livre")]
    pub mercado_livre: FeeSchedule,
    #[serde(default = "FeeSchedule::amazon")]
    pub amazon: FeeSchedule,
}

impl Default for FeeTable {
    fn default() -> Self {
        Self {
            shopee: FeeSchedule::shopee(),
            tiktok: FeeSchedule::tiktok_shop(),
            mercado_livre: FeeSchedule::mercado_livre(),
            amazon: FeeSchedule::amazon(),
        }
    }
}

impl FeeTable {
    /// Schedule for a marketplace
    pub fn get(&self, marketplace: Marketplace) -> &FeeSchedule {
        match marketplace {
            Marketplace::Shopee => &self.shopee,
            Marketplace::TikTokShop => &self.tiktok,
            Marketplace::MercadoLivre => &self.mercado_livre,
            Marketplace::Amazon => &self.amazon,
        }
    }

    /// Validate every schedule, and that each sits under its own key
    pub fn validate(&self) -> Result<()> {
        for marketplace in Marketplace::ALL {
            let schedule = self.get(marketplace);
            if schedule.marketplace != marketplace {
                return Err(PricingError::InvalidSchedule {
                    marketplace: marketplace.to_string(),
                    reason: format!("schedule is declared for {}", schedule.marketplace),
                });
            }
            schedule.validate()?;
        }
        Ok(())
    }
}
