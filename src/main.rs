//! MarketplacePricing - Main Entry Point
//!
//! Prints a side-by-side comparison of selling price and profit on every
//! marketplace for the given costs.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use marketplace_pricing::config::load_config;
use marketplace_pricing::{
    format_currency, format_percent, generate_insight, insight::GENERATOR_ERROR_MESSAGE,
    CalculationMode, CalculationSet, CostInput, GeminiClient, InsightSnapshot, ListingSelection,
    MercadoLivreListing, NumericInput, PricingEngine, ProfitTargetBasis, RawCostInput,
    ShopeeListing,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    MarginTarget,
    ProfitEvaluation,
}

impl From<ModeArg> for CalculationMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::MarginTarget => CalculationMode::MarginTarget,
            ModeArg::ProfitEvaluation => CalculationMode::ProfitEvaluation,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BasisArg {
    ProductCost,
    SellingPrice,
}

impl From<BasisArg> for ProfitTargetBasis {
    fn from(basis: BasisArg) -> Self {
        match basis {
            BasisArg::ProductCost => ProfitTargetBasis::ProductCost,
            BasisArg::SellingPrice => ProfitTargetBasis::SellingPrice,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ShopeeArg {
    Standard,
    FreeShipping,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MercadoLivreArg {
    Classic,
    Premium,
}

/// CLI arguments for the application
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, env = "PRICING_CONFIG", default_value = "pricing.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long, env = "PRICING_LOG_LEVEL")]
    log_level: Option<String>,

    /// Calculation mode
    #[arg(long, value_enum, default_value_t = ModeArg::MarginTarget)]
    mode: ModeArg,

    /// What the target margin is a percentage of; overrides the config file
    #[arg(long, value_enum)]
    basis: Option<BasisArg>,

    /// Unit product cost (accepts "30,00")
    #[arg(long, default_value = "")]
    product_cost: String,

    /// Per-unit operational cost
    #[arg(long, default_value = "")]
    operational_cost: String,

    /// Target margin percentage
    #[arg(long, default_value = "")]
    target_margin: String,

    /// Selling price to evaluate
    #[arg(long, default_value = "")]
    test_price: String,

    /// Apply the simplified tax rate
    #[arg(long)]
    taxable: bool,

    /// Tax rate percentage
    #[arg(long, default_value = "")]
    tax_rate: String,

    /// Shopee listing mode
    #[arg(long, value_enum, default_value_t = ShopeeArg::Standard)]
    shopee_listing: ShopeeArg,

    /// Mercado Livre listing type
    #[arg(long, value_enum, default_value_t = MercadoLivreArg::Classic)]
    ml_listing: MercadoLivreArg,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Ask the insight service for a written analysis
    #[arg(long)]
    insight: bool,
}

impl Args {
    fn raw_input(&self) -> RawCostInput {
        RawCostInput {
            product_cost: NumericInput::from(self.product_cost.as_str()),
            operational_cost: NumericInput::from(self.operational_cost.as_str()),
            target_margin_percent: NumericInput::from(self.target_margin.as_str()),
            test_price: NumericInput::from(self.test_price.as_str()),
            is_taxable: self.taxable,
            tax_rate_percent: NumericInput::from(self.tax_rate.as_str()),
            listings: ListingSelection {
                shopee: match self.shopee_listing {
                    ShopeeArg::Standard => ShopeeListing::Standard,
                    ShopeeArg::FreeShipping => ShopeeListing::FreeShipping,
                },
                mercado_livre: match self.ml_listing {
                    MercadoLivreArg::Classic => MercadoLivreListing::Classic,
                    MercadoLivreArg::Premium => MercadoLivreListing::Premium,
                },
            },
        }
    }
}

fn init_logging(level: &str, format: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    match format {
        "json" => builder.json().try_init(),
        _ => builder.try_init(),
    }
    .map_err(|e| anyhow::anyhow!(e))
}

fn print_table(results: &CalculationSet) {
    println!(
        "{:<28} {:>14} {:>14} {:>10} {:>12} {:>12} {:>12} {:>12}",
        "Platform", "Price", "Net profit", "Margin", "Commission", "Transaction", "Fixed fee", "Tax"
    );
    for r in results.iter() {
        println!(
            "{:<28} {:>14} {:>14} {:>10} {:>12} {:>12} {:>12} {:>12}",
            r.platform_name,
            format_currency(r.selling_price),
            format_currency(r.net_profit),
            format_percent(r.net_profit_margin_percent),
            format_currency(r.fees.commission),
            format_currency(r.fees.transaction_fee),
            format_currency(r.fees.fixed_fee),
            format_currency(r.fees.tax),
        );
    }
    let best = results.best();
    println!();
    println!("Best: {} ({})", best.platform_name, format_currency(best.net_profit));
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Load environment variables from .env file if present
    dotenvy::dotenv().ok();

    let config = load_config(Some(&args.config))?;

    let level = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.settings.log_level.clone());
    init_logging(&level, &config.settings.log_format)?;

    info!("Configuration file: {}", args.config);

    let basis = args.basis.map(Into::into).unwrap_or(config.pricing.basis);
    let engine = PricingEngine::new(config.fees.clone(), basis);

    let mode = CalculationMode::from(args.mode);
    let input = CostInput::from(args.raw_input());
    let results = engine.calculate_all(&input, mode);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print_table(&results);
    }

    if args.insight {
        let snapshot = InsightSnapshot::new(input, mode, results);
        match GeminiClient::from_config(&config.insight) {
            Ok(client) => {
                let report = generate_insight(&client, &snapshot).await;
                println!();
                println!("{}", report.text);
            }
            Err(e) => {
                warn!("Insight unavailable: {}", e);
                println!();
                println!("{}", GENERATOR_ERROR_MESSAGE);
            }
        }
    }

    Ok(())
}
