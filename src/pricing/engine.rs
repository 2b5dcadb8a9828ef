use tracing::instrument;

use crate::common::types::{
    CalculationMode, CalculationSet, CostInput, Marketplace, PlatformResult, ProfitTargetBasis,
};
use crate::pricing::resolver::FeeResolver;
use crate::pricing::schedule::FeeTable;

/// Resolves every marketplace for a cost input
///
/// Holds the fee table loaded at startup. Calculations are pure: the same
/// input and mode always give the same [`CalculationSet`], so it is safe to
/// call on every input change.
#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    table: FeeTable,
    basis: ProfitTargetBasis,
}

impl PricingEngine {
    pub fn new(table: FeeTable, basis: ProfitTargetBasis) -> Self {
        Self { table, basis }
    }

    pub fn table(&self) -> &FeeTable {
        &self.table
    }

    pub fn basis(&self) -> ProfitTargetBasis {
        self.basis
    }

    /// Resolve a single marketplace
    pub fn calculate(
        &self,
        marketplace: Marketplace,
        input: &CostInput,
        mode: CalculationMode,
    ) -> PlatformResult {
        FeeResolver::new(self.table.get(marketplace), self.basis).resolve(input, mode)
    }

    /// Resolve all four marketplaces independently
    #[instrument(level = "debug", skip(self, input))]
    pub fn calculate_all(&self, input: &CostInput, mode: CalculationMode) -> CalculationSet {
        CalculationSet {
            shopee: self.calculate(Marketplace::Shopee, input, mode),
            tiktok: self.calculate(Marketplace::TikTokShop, input, mode),
            mercado_livre: self.calculate(Marketplace::MercadoLivre, input, mode),
            amazon: self.calculate(Marketplace::Amazon, input, mode),
        }
    }
}

/// Resolve all marketplaces with the built-in fee table and product cost basis
pub fn calculate_all(input: &CostInput, mode: CalculationMode) -> CalculationSet {
    PricingEngine::default().calculate_all(input, mode)
}
