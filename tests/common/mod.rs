//! Common test utilities and fixtures

#![allow(dead_code)]

use marketplace_pricing::{CostInput, ListingSelection, PricingEngine};
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Engine with the built-in fee table and product cost basis
pub static ENGINE: Lazy<PricingEngine> = Lazy::new(PricingEngine::default);

/// The usual scenario: R$ 30 product, R$ 2 operations, 30% target margin
pub fn sample_input() -> CostInput {
    CostInput {
        product_cost: dec!(30.00),
        operational_cost: dec!(2.00),
        target_margin_percent: dec!(30),
        test_price: dec!(79.90),
        is_taxable: false,
        tax_rate_percent: Decimal::ZERO,
        listings: ListingSelection::default(),
    }
}

/// Input with every cost and margin set to zero
pub fn zero_input() -> CostInput {
    CostInput::default()
}

/// Assert two decimals agree to `places` decimal places
pub fn assert_close(actual: Decimal, expected: Decimal, places: u32) {
    assert_eq!(
        actual.round_dp(places),
        expected.round_dp(places),
        "expected {} ~ {} ({} places)",
        actual,
        expected,
        places
    );
}

/// Sample Gemini API responses for testing
pub mod api_responses {
    /// Successful generation split across two parts
    pub const GENERATED: &str = r####"{
        "candidates": [
            {
                "content": {
                    "role": "model",
                    "parts": [
                        {"text": "### Verdict\n"},
                        {"text": "Amazon leaves the **highest profit**."}
                    ]
                },
                "finishReason": "STOP"
            }
        ]
    }"####;

    /// Response with no candidates (e.g. blocked prompt)
    pub const NO_CANDIDATES: &str = r#"{"promptFeedback": {"blockReason": "OTHER"}}"#;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_input() {
        let input = sample_input();
        assert_eq!(input.base_cost(), dec!(32));
        assert_eq!(input.margin_fraction(), dec!(0.3));
    }
}
