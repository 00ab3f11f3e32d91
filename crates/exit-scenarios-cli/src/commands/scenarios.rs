use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use exit_scenarios_core::analysis::{self, ExitAnalysisInput};
use exit_scenarios_core::config::EngineConfig;
use exit_scenarios_core::scenarios::{self, CompanyValuationInput, ScenarioCatalogProvider};
use exit_scenarios_core::tax::TaxProfile;

use crate::input;

/// Arguments for the full exit analysis
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Path to JSON input file (company, tax_profile, optional scenarios)
    #[arg(long)]
    pub input: Option<String>,

    /// Valuation for the custom scenario (overrides the input file)
    #[arg(long)]
    pub custom_valuation: Option<Decimal>,

    /// Cash to raise, for the stake estimate (overrides the input file)
    #[arg(long)]
    pub target_amount: Option<Decimal>,
}

/// Arguments for printing the scenario catalog
#[derive(Args)]
pub struct CatalogArgs {
    /// Only show the scenario with this id
    #[arg(long)]
    pub id: Option<String>,
}

/// Arguments for the sale percentage estimate
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct SalePercentageArgs {
    /// Reference company valuation
    #[arg(long)]
    pub base_valuation: Option<Decimal>,

    /// Cash the shareholder wants to raise
    #[arg(long)]
    pub target_amount: Option<Decimal>,

    /// Path to JSON input file (company, tax_profile, target_amount)
    #[arg(long)]
    pub input: Option<String>,
}

#[derive(Deserialize)]
struct SalePercentageInput {
    company: CompanyValuationInput,
    #[serde(default)]
    tax_profile: Option<TaxProfile>,
    target_amount: Decimal,
}

pub fn run_analyze(
    args: AnalyzeArgs,
    config: &EngineConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let mut exit_input: ExitAnalysisInput =
        input::stdin::read_input(args.input.as_deref(), "exit analysis")?;
    if args.custom_valuation.is_some() {
        exit_input.custom_valuation = args.custom_valuation;
    }
    if args.target_amount.is_some() {
        exit_input.target_amount = args.target_amount;
    }
    if exit_input.scenarios.is_none() {
        exit_input.scenarios = Some(config.catalog()?.scenarios());
    }

    let calculator = config.tax_calculator()?;
    let result = analysis::analyze_exit(&exit_input, &calculator, &config.number_format)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_catalog(
    args: CatalogArgs,
    config: &EngineConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let mut catalog = config.catalog()?.scenarios();
    if let Some(ref id) = args.id {
        catalog.retain(|s| &s.id == id);
        if catalog.is_empty() {
            return Err(format!("Unknown scenario '{}'", id).into());
        }
    }
    Ok(serde_json::to_value(catalog)?)
}

pub fn run_sale_percentage(
    args: SalePercentageArgs,
) -> Result<Value, Box<dyn std::error::Error>> {
    let sp_input = if let Some(ref path) = args.input {
        input::file::read_json::<SalePercentageInput>(path)?
    } else {
        let base_valuation = args
            .base_valuation
            .ok_or("--base-valuation required (or provide --input)")?;
        let target_amount = args
            .target_amount
            .ok_or("--target-amount required (or provide --input)")?;
        SalePercentageInput {
            company: CompanyValuationInput { base_valuation },
            tax_profile: None,
            target_amount,
        }
    };

    // The estimate never reads the tax profile; an empty one stands in.
    let tax_profile = sp_input.tax_profile.unwrap_or(TaxProfile {
        acquisition_value: Decimal::ZERO,
        acquisition_date: NaiveDate::default(),
        reinvestment_plan: false,
        reinvestment_amount: Decimal::ZERO,
        vitalicia_plan: false,
        vitalicia_amount: Decimal::ZERO,
    });

    let pct = scenarios::calculate_optimal_sale_percentage(
        &sp_input.company,
        &tax_profile,
        sp_input.target_amount,
    );
    Ok(serde_json::json!({
        "base_valuation": sp_input.company.base_valuation.to_string(),
        "target_amount": sp_input.target_amount.to_string(),
        "sale_percentage": pct,
    }))
}
