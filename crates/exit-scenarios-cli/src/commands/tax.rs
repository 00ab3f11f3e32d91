use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use exit_scenarios_core::config::EngineConfig;
use exit_scenarios_core::tax::{TaxCalculationRequest, TaxImpactCalculator, TaxProfile};

use crate::input;

/// Arguments for a single tax impact calculation
#[derive(Args)]
pub struct TaxImpactArgs {
    /// Gross sale valuation
    #[arg(long)]
    pub gross_valuation: Option<Decimal>,

    /// Original cost basis of the holding
    #[arg(long)]
    pub acquisition_value: Option<Decimal>,

    /// Acquisition date (YYYY-MM-DD)
    #[arg(long)]
    pub acquisition_date: Option<NaiveDate>,

    /// Amount committed to a qualifying reinvestment
    #[arg(long)]
    pub reinvestment_amount: Option<Decimal>,

    /// Amount committed to a life annuity plan
    #[arg(long)]
    pub vitalicia_amount: Option<Decimal>,

    /// Path to JSON input file with tax_profile and gross_valuation
    /// (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

#[derive(Deserialize)]
struct TaxImpactInput {
    tax_profile: TaxProfile,
    gross_valuation: Decimal,
}

pub fn run_tax_impact(
    args: TaxImpactArgs,
    config: &EngineConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let tax_input: TaxImpactInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(gross_valuation) = args.gross_valuation {
        let reinvestment_amount = args.reinvestment_amount.unwrap_or(Decimal::ZERO);
        let vitalicia_amount = args.vitalicia_amount.unwrap_or(Decimal::ZERO);
        TaxImpactInput {
            tax_profile: TaxProfile {
                acquisition_value: args
                    .acquisition_value
                    .ok_or("--acquisition-value required")?,
                acquisition_date: args
                    .acquisition_date
                    .ok_or("--acquisition-date required")?,
                reinvestment_plan: reinvestment_amount > Decimal::ZERO,
                reinvestment_amount,
                vitalicia_plan: vitalicia_amount > Decimal::ZERO,
                vitalicia_amount,
            },
            gross_valuation,
        }
    } else if let Some(data) = input::stdin::read_stdin()? {
        data
    } else {
        return Err("--input <file.json>, --gross-valuation or stdin required".into());
    };

    let calculator = config.tax_calculator()?;
    let request = TaxCalculationRequest::from_profile(&tax_input.tax_profile);
    let outcome = calculator.calculate_tax_impact(&request, tax_input.gross_valuation)?;
    Ok(serde_json::to_value(outcome)?)
}
