//! Snapshot handed to the insight generator and the prompt built from it

use serde::{Deserialize, Serialize};

use crate::common::format::{format_currency, format_percent};
use crate::common::types::{CalculationMode, CalculationSet, CostInput};

/// Read-only view of one computation pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightSnapshot {
    pub input: CostInput,
    pub mode: CalculationMode,
    pub results: CalculationSet,
}

impl InsightSnapshot {
    pub fn new(input: CostInput, mode: CalculationMode, results: CalculationSet) -> Self {
        Self {
            input,
            mode,
            results,
        }
    }
}

/// Build the analysis prompt for a snapshot
pub fn build_prompt(snapshot: &InsightSnapshot) -> String {
    let input = &snapshot.input;

    let scenario = match snapshot.mode {
        CalculationMode::MarginTarget => "Price from target margin",
        CalculationMode::ProfitEvaluation => "Real profit at a test price",
    };
    let target_line = match snapshot.mode {
        CalculationMode::MarginTarget => {
            format!("- Target margin: {}", format_percent(input.target_margin_percent))
        }
        CalculationMode::ProfitEvaluation => {
            format!("- Test price: {}", format_currency(input.test_price))
        }
    };

    let mut results = String::new();
    for (i, result) in snapshot.results.iter().enumerate() {
        results.push_str(&format!(
            "{}. **{}:** sells at {} | profit {} ({})\n",
            i + 1,
            result.platform_name,
            format_currency(result.selling_price),
            format_currency(result.net_profit),
            format_percent(result.net_profit_margin_percent),
        ));
    }

    let mut comparison = String::new();
    for result in snapshot.results.iter() {
        comparison.push_str(&format!("*   **{}:** [short summary]\n", result.platform_name));
    }

    format!(
        "Act as a senior e-commerce financial strategist.\n\
         Analyze the data below and answer with generous spacing and readability.\n\
         \n\
         **Scenario ({scenario}):**\n\
         - Product + operational cost: {cost}\n\
         {target_line}\n\
         \n\
         **Results:**\n\
         {results}\
         \n\
         **Response format:**\n\
         \n\
         ### Verdict\n\
         [Name the winning marketplace in one direct sentence and put its profit in bold]\n\
         \n\
         ### Side-by-side\n\
         {comparison}\
         \n\
         ### Action plan\n\
         [One concrete tactic to raise the margin or cut costs.]\n\
         \n\
         **Style rules:**\n\
         - Use Markdown.\n\
         - Leave a blank line between every list item and paragraph.\n\
         - Be concise and direct.\n",
        scenario = scenario,
        cost = format_currency(input.base_cost()),
        target_line = target_line,
        results = results,
        comparison = comparison,
    )
}
