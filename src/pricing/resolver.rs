use rust_decimal::Decimal;
use tracing::debug;

use crate::common::types::{
    CalculationMode, CostInput, FeesBreakdown, ListingTier, PlatformResult, ProfitTargetBasis,
};
use crate::pricing::schedule::{FeeSchedule, FixedFeeRule};

/// Where a resolution landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricePoint {
    /// A listing at `price`, owing `fixed_fee` per item
    Sale { price: Decimal, fixed_fee: Decimal },
    /// No positive price satisfies the target; reported as a zero price
    /// with no per-item fee
    NoSale,
}

impl PricePoint {
    fn sale(price: Option<Decimal>, fixed_fee: Decimal) -> Self {
        match price {
            Some(price) => PricePoint::Sale { price, fixed_fee },
            None => PricePoint::NoSale,
        }
    }

    pub fn price(&self) -> Decimal {
        match self {
            PricePoint::Sale { price, .. } => *price,
            PricePoint::NoSale => Decimal::ZERO,
        }
    }

    pub fn fixed_fee(&self) -> Decimal {
        match self {
            PricePoint::Sale { fixed_fee, .. } => *fixed_fee,
            PricePoint::NoSale => Decimal::ZERO,
        }
    }
}

/// Proportional charges in effect for one listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Rates {
    commission: Decimal,
    transaction: Decimal,
    affiliate: Decimal,
    tax: Decimal,
}

impl Rates {
    fn variable(&self) -> Option<Decimal> {
        self.commission
            .checked_add(self.transaction)?
            .checked_add(self.affiliate)?
            .checked_add(self.tax)
    }
}

/// Resolves one marketplace schedule against a cost input
///
/// Every marketplace goes through the same algorithm; the schedule record
/// carries all marketplace-specific parameters.
#[derive(Debug, Clone, Copy)]
pub struct FeeResolver<'a> {
    schedule: &'a FeeSchedule,
    basis: ProfitTargetBasis,
}

impl<'a> FeeResolver<'a> {
    pub fn new(schedule: &'a FeeSchedule, basis: ProfitTargetBasis) -> Self {
        Self { schedule, basis }
    }

    /// Resolve a selling price (or take the test price) and assemble the result
    pub fn resolve(&self, input: &CostInput, mode: CalculationMode) -> PlatformResult {
        let tier = input.listings.tier_for(self.schedule.marketplace);
        let listing = self.schedule.listing(tier);
        let rates = self.rates(input, tier);

        let point = match mode {
            CalculationMode::MarginTarget => self.solve_for_margin(input, &rates),
            CalculationMode::ProfitEvaluation => PricePoint::Sale {
                price: input.test_price,
                fixed_fee: self.schedule.fixed_fee.fee_at(input.test_price),
            },
        };

        let selling_price = point.price();
        let fixed_fee = point.fixed_fee();

        // Amounts saturate at the Decimal bounds instead of overflowing
        let fees = FeesBreakdown {
            commission: selling_price.saturating_mul(rates.commission),
            transaction_fee: selling_price.saturating_mul(rates.transaction),
            fixed_fee,
            tax: selling_price.saturating_mul(rates.tax),
            affiliate: selling_price.saturating_mul(rates.affiliate),
        };

        let total_fixed_costs = input.base_cost().saturating_add(fixed_fee);
        let total_variable_costs = fees
            .commission
            .saturating_add(fees.transaction_fee)
            .saturating_add(fees.affiliate);
        let net_profit = selling_price
            .saturating_sub(total_fixed_costs)
            .saturating_sub(total_variable_costs)
            .saturating_sub(fees.tax);

        let reference = match self.basis {
            ProfitTargetBasis::ProductCost => input.product_cost,
            ProfitTargetBasis::SellingPrice => selling_price,
        };
        let net_profit_margin_percent = if reference > Decimal::ZERO {
            net_profit
                .checked_div(reference)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                .unwrap_or(Decimal::ZERO)
        } else {
            Decimal::ZERO
        };

        PlatformResult {
            marketplace: self.schedule.marketplace,
            platform_name: listing.platform_name.clone(),
            selling_price,
            net_profit,
            net_profit_margin_percent,
            total_fixed_costs,
            total_variable_costs,
            fees,
        }
    }

    fn rates(&self, input: &CostInput, tier: ListingTier) -> Rates {
        Rates {
            commission: self.schedule.listing(tier).commission_rate,
            transaction: self.schedule.transaction_rate,
            affiliate: self.schedule.affiliate_rate,
            tax: if self.schedule.applies_tax {
                input.tax_fraction()
            } else {
                Decimal::ZERO
            },
        }
    }

    /// Invert "price - proportional fees - fixed amount = desired profit"
    ///
    /// Product cost basis: price = (costs + cost x margin + fee) / (1 - rate)
    /// Selling price basis: price = (costs + fee) / (1 - rate - margin)
    fn solve_for_margin(&self, input: &CostInput, rates: &Rates) -> PricePoint {
        let terms = match self.basis {
            ProfitTargetBasis::ProductCost => input
                .product_cost
                .checked_mul(input.margin_fraction())
                .and_then(|profit| input.base_cost().checked_add(profit))
                .zip(rates.variable().and_then(|rate| Decimal::ONE.checked_sub(rate))),
            ProfitTargetBasis::SellingPrice => rates
                .variable()
                .and_then(|rate| Decimal::ONE.checked_sub(rate))
                .and_then(|rest| rest.checked_sub(input.margin_fraction()))
                .map(|denominator| (input.base_cost(), denominator)),
        };

        let Some((required, denominator)) = terms else {
            debug!(
                marketplace = %self.schedule.marketplace,
                "Price terms overflow the decimal range"
            );
            return PricePoint::NoSale;
        };

        if denominator <= Decimal::ZERO || required <= Decimal::ZERO {
            debug!(
                marketplace = %self.schedule.marketplace,
                %required,
                %denominator,
                "No positive price reaches the target"
            );
            return PricePoint::NoSale;
        }

        let invert = |fee: Decimal| {
            required
                .checked_add(fee)
                .and_then(|amount| amount.checked_div(denominator))
        };

        match &self.schedule.fixed_fee {
            FixedFeeRule::None => PricePoint::sale(invert(Decimal::ZERO), Decimal::ZERO),
            FixedFeeRule::Flat { amount } => PricePoint::sale(invert(*amount), *amount),
            FixedFeeRule::BelowThreshold { fee, threshold } => {
                let point = select_threshold_candidate(invert(*fee), invert(Decimal::ZERO), *fee, *threshold);
                debug!(
                    marketplace = %self.schedule.marketplace,
                    price = %point.price(),
                    fixed_fee = %point.fixed_fee(),
                    %threshold,
                    "Resolved threshold fee"
                );
                point
            }
        }
    }
}

/// Pick between the fee-charged and fee-waived candidate prices
///
/// The charged candidate is accepted when it lands below the threshold, the
/// waived one when it lands at or above it. When neither is consistent with
/// its own assumption the charged candidate wins.
fn select_threshold_candidate(
    charged: Option<Decimal>,
    waived: Option<Decimal>,
    fee: Decimal,
    threshold: Decimal,
) -> PricePoint {
    match (charged, waived) {
        (Some(price), _) if price < threshold => PricePoint::Sale { price, fixed_fee: fee },
        (_, Some(price)) if price >= threshold => PricePoint::Sale {
            price,
            fixed_fee: Decimal::ZERO,
        },
        (Some(price), _) => PricePoint::Sale { price, fixed_fee: fee },
        (None, _) => PricePoint::NoSale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::types::{ListingSelection, MercadoLivreListing, ShopeeListing};
    use rust_decimal_macros::dec;

    fn input(product: Decimal, operational: Decimal, margin: Decimal) -> CostInput {
        CostInput {
            product_cost: product,
            operational_cost: operational,
            target_margin_percent: margin,
            ..Default::default()
        }
    }

    #[test]
    fn test_flat_fee_margin_target() {
        // (30 + 2 + 30 x 0.30 + 4) / (1 - 0.18 - 0.02) = 45 / 0.8
        let schedule = FeeSchedule::shopee();
        let mut input = input(dec!(30), dec!(2), dec!(30));
        input.listings.shopee = ShopeeListing::FreeShipping;

        let result = FeeResolver::new(&schedule, ProfitTargetBasis::ProductCost)
            .resolve(&input, CalculationMode::MarginTarget);

        assert_eq!(result.selling_price, dec!(56.25));
        assert_eq!(result.fees.commission, dec!(10.125));
        assert_eq!(result.fees.transaction_fee, dec!(1.125));
        assert_eq!(result.fees.fixed_fee, dec!(4));
        assert_eq!(result.total_fixed_costs, dec!(36));
        assert_eq!(result.total_variable_costs, dec!(11.25));
        assert_eq!(result.net_profit, dec!(9));
        assert_eq!(result.net_profit_margin_percent, dec!(30));
        assert_eq!(result.platform_name, "Shopee (Com Frete Grátis)");
    }

    #[test]
    fn test_threshold_fee_waived_above_threshold() {
        // Waived candidate 88 / 0.88 = 100 sits above 79
        let schedule = FeeSchedule::tiktok_shop();
        let result = FeeResolver::new(&schedule, ProfitTargetBasis::ProductCost)
            .resolve(&input(dec!(88), dec!(0), dec!(0)), CalculationMode::MarginTarget);

        assert_eq!(result.selling_price, dec!(100));
        assert_eq!(result.fees.fixed_fee, Decimal::ZERO);
        assert_eq!(result.net_profit, Decimal::ZERO);
    }

    #[test]
    fn test_threshold_fee_charged_below_threshold() {
        // Charged candidate (41 + 2) / 0.88 lands well under 79
        let schedule = FeeSchedule::tiktok_shop();
        let result = FeeResolver::new(&schedule, ProfitTargetBasis::ProductCost)
            .resolve(&input(dec!(30), dec!(2), dec!(30)), CalculationMode::MarginTarget);

        assert!(result.selling_price < dec!(79));
        assert_eq!(result.fees.fixed_fee, dec!(2));
        assert_eq!(result.net_profit.round_dp(10), dec!(9));
    }

    #[test]
    fn test_threshold_gap_prefers_charged_candidate() {
        // Charged 70 / 0.88 = 79.54 (not below 79), waived 68 / 0.88 = 77.27 (not at/above 79)
        let schedule = FeeSchedule::tiktok_shop();
        let result = FeeResolver::new(&schedule, ProfitTargetBasis::ProductCost)
            .resolve(&input(dec!(68), dec!(0), dec!(0)), CalculationMode::MarginTarget);

        assert_eq!(result.selling_price.round_dp(20), (dec!(70) / dec!(0.88)).round_dp(20));
        assert_eq!(result.fees.fixed_fee, dec!(2));
    }

    #[test]
    fn test_select_candidates() {
        let fee = dec!(6);
        let threshold = dec!(79);
        assert_eq!(
            select_threshold_candidate(Some(dec!(50)), Some(dec!(45)), fee, threshold),
            PricePoint::Sale { price: dec!(50), fixed_fee: fee }
        );
        assert_eq!(
            select_threshold_candidate(Some(dec!(90)), Some(dec!(85)), fee, threshold),
            PricePoint::Sale { price: dec!(85), fixed_fee: Decimal::ZERO }
        );
        assert_eq!(
            select_threshold_candidate(Some(dec!(80)), Some(dec!(78)), fee, threshold),
            PricePoint::Sale { price: dec!(80), fixed_fee: fee }
        );
        assert_eq!(select_threshold_candidate(None, None, fee, threshold), PricePoint::NoSale);
    }

    #[test]
    fn test_variable_rate_of_one_is_no_sale() {
        let schedule = FeeSchedule::amazon();
        let mut input = input(dec!(30), dec!(2), dec!(30));
        input.is_taxable = true;
        input.tax_rate_percent = dec!(85);

        let result = FeeResolver::new(&schedule, ProfitTargetBasis::ProductCost)
            .resolve(&input, CalculationMode::MarginTarget);

        assert_eq!(result.selling_price, Decimal::ZERO);
        assert_eq!(result.fees.fixed_fee, Decimal::ZERO);
        assert_eq!(result.net_profit, dec!(-32));
    }

    #[test]
    fn test_selling_price_basis() {
        // 36 / (1 - 0.20 - 0.30) = 72, profit 21.60 = 30% of 72
        let schedule = FeeSchedule::shopee();
        let mut input = input(dec!(30), dec!(2), dec!(30));
        input.listings = ListingSelection {
            shopee: ShopeeListing::FreeShipping,
            mercado_livre: MercadoLivreListing::Classic,
        };

        let result = FeeResolver::new(&schedule, ProfitTargetBasis::SellingPrice)
            .resolve(&input, CalculationMode::MarginTarget);

        assert_eq!(result.selling_price, dec!(72));
        assert_eq!(result.net_profit, dec!(21.6));
        assert_eq!(result.net_profit_margin_percent, dec!(30));
    }

    #[test]
    fn test_selling_price_basis_margin_consumes_price() {
        // 80% fees + 20% margin leaves nothing to cover costs
        let schedule = FeeSchedule::shopee();
        let mut input = input(dec!(30), dec!(2), dec!(80));
        input.listings.shopee = ShopeeListing::FreeShipping;

        let result = FeeResolver::new(&schedule, ProfitTargetBasis::SellingPrice)
            .resolve(&input, CalculationMode::MarginTarget);

        assert_eq!(result.selling_price, Decimal::ZERO);
    }

    #[test]
    fn test_profit_evaluation_applies_threshold_on_test_price() {
        let schedule = FeeSchedule::mercado_livre();
        let mut input = input(dec!(30), dec!(2), dec!(0));

        input.test_price = dec!(50);
        let below = FeeResolver::new(&schedule, ProfitTargetBasis::ProductCost)
            .resolve(&input, CalculationMode::ProfitEvaluation);
        assert_eq!(below.selling_price, dec!(50));
        assert_eq!(below.fees.fixed_fee, dec!(6));
        assert_eq!(below.net_profit, dec!(50) - dec!(38) - dec!(7));

        input.test_price = dec!(79);
        let at = FeeResolver::new(&schedule, ProfitTargetBasis::ProductCost)
            .resolve(&input, CalculationMode::ProfitEvaluation);
        assert_eq!(at.fees.fixed_fee, Decimal::ZERO);
    }

    #[test]
    fn test_zero_product_cost_reports_zero_margin() {
        let schedule = FeeSchedule::amazon();
        let mut input = input(dec!(0), dec!(10), dec!(0));
        input.test_price = dec!(20);

        let result = FeeResolver::new(&schedule, ProfitTargetBasis::ProductCost)
            .resolve(&input, CalculationMode::ProfitEvaluation);

        assert_eq!(result.net_profit, dec!(7));
        assert_eq!(result.net_profit_margin_percent, Decimal::ZERO);
    }

    #[test]
    fn test_schedule_without_tax() {
        let mut schedule = FeeSchedule::amazon();
        schedule.applies_tax = false;
        let mut input = input(dec!(30), dec!(2), dec!(0));
        input.is_taxable = true;
        input.tax_rate_percent = dec!(10);
        input.test_price = dec!(100);

        let result = FeeResolver::new(&schedule, ProfitTargetBasis::ProductCost)
            .resolve(&input, CalculationMode::ProfitEvaluation);

        assert_eq!(result.fees.tax, Decimal::ZERO);
        assert_eq!(result.net_profit, dec!(53));
    }

    #[test]
    fn test_overflowing_target_is_no_sale() {
        let schedule = FeeSchedule::shopee();
        let input = input(Decimal::MAX, dec!(0), dec!(200));
        let resolver = FeeResolver::new(&schedule, ProfitTargetBasis::ProductCost);

        let rates = resolver.rates(&input, ListingTier::Standard);
        assert_eq!(resolver.solve_for_margin(&input, &rates), PricePoint::NoSale);

        let result = resolver.resolve(&input, CalculationMode::MarginTarget);
        assert_eq!(result.selling_price, Decimal::ZERO);
        assert_eq!(result.fees.fixed_fee, Decimal::ZERO);
    }
}
