//! Narrative insight over a computed result set
//!
//! The pricing core hands a read-only [`InsightSnapshot`] to an
//! [`InsightGenerator`] (a language model behind an HTTP API) and gets text
//! back. Generation failures become a user-facing message; they never affect
//! the already computed results.

pub mod gemini;
pub mod prompt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::common::errors::Result;

pub use gemini::GeminiClient;
pub use prompt::{build_prompt, InsightSnapshot};

/// Shown when the generator answers with no text
pub const EMPTY_RESPONSE_MESSAGE: &str = "Unable to generate the analysis right now.";

/// Shown when the generator could not be reached or failed
pub const GENERATOR_ERROR_MESSAGE: &str =
    "Could not reach the insight service. Check that the API key is configured.";

/// Text generator for pricing commentary
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InsightGenerator: Send + Sync {
    /// Provider name for logging
    fn name(&self) -> &'static str;

    /// Generate text for a prompt
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Outcome of an insight request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightReport {
    /// Generated analysis, or a substitute message on failure
    pub text: String,
    /// Whether `text` came from the generator
    pub generated: bool,
    pub created_at: DateTime<Utc>,
}

/// Ask the generator for an analysis of the snapshot
///
/// Never fails: errors and empty answers are replaced with a message.
pub async fn generate_insight(
    generator: &dyn InsightGenerator,
    snapshot: &InsightSnapshot,
) -> InsightReport {
    let prompt = build_prompt(snapshot);

    let (text, generated) = match generator.generate(&prompt).await {
        Ok(text) if !text.trim().is_empty() => {
            info!(provider = generator.name(), "Insight generated");
            (text, true)
        }
        Ok(_) => {
            warn!(provider = generator.name(), "Insight generator returned no text");
            (EMPTY_RESPONSE_MESSAGE.to_string(), false)
        }
        Err(e) => {
            warn!(provider = generator.name(), error = %e, "Insight generation failed");
            (GENERATOR_ERROR_MESSAGE.to_string(), false)
        }
    };

    InsightReport {
        text,
        generated,
        created_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::errors::PricingError;
    use crate::common::types::{CalculationMode, CostInput};
    use crate::pricing::calculate_all;
    use rust_decimal_macros::dec;

    fn snapshot() -> InsightSnapshot {
        let input = CostInput {
            product_cost: dec!(30),
            operational_cost: dec!(2),
            target_margin_percent: dec!(30),
            ..Default::default()
        };
        let results = calculate_all(&input, CalculationMode::MarginTarget);
        InsightSnapshot::new(input, CalculationMode::MarginTarget, results)
    }

    fn generator(response: fn() -> Result<String>) -> MockInsightGenerator {
        let mut mock = MockInsightGenerator::new();
        mock.expect_name().return_const("mock");
        mock.expect_generate()
            .withf(|prompt| prompt.contains("Target margin: 30,00%"))
            .times(1)
            .returning(move |_| response());
        mock
    }

    #[tokio::test]
    async fn test_generated_text_is_returned() {
        let mock = generator(|| Ok("### Verdict\nShopee wins".to_string()));
        let report = generate_insight(&mock, &snapshot()).await;
        assert!(report.generated);
        assert_eq!(report.text, "### Verdict\nShopee wins");
    }

    #[tokio::test]
    async fn test_empty_text_becomes_message() {
        let mock = generator(|| Ok("  \n".to_string()));
        let report = generate_insight(&mock, &snapshot()).await;
        assert!(!report.generated);
        assert_eq!(report.text, EMPTY_RESPONSE_MESSAGE);
    }

    #[tokio::test]
    async fn test_error_becomes_message() {
        let mock = generator(|| Err(PricingError::MissingApiKey("GEMINI_API_KEY".to_string())));
        let report = generate_insight(&mock, &snapshot()).await;
        assert!(!report.generated);
        assert_eq!(report.text, GENERATOR_ERROR_MESSAGE);
    }
}
