use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Deserialize;

use exit_scenarios_core::analysis::{self, ExitAnalysisInput};
use exit_scenarios_core::config::{ConfigFormat, EngineConfig};
use exit_scenarios_core::format::NumberFormat;
use exit_scenarios_core::scenarios::{
    self, CompanyValuationInput, ScenarioCatalogProvider, ScenarioDefinition, ScenarioResult,
};
use exit_scenarios_core::tax::{TaxCalculationRequest, TaxImpactCalculator, TaxProfile};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Engine configuration from an optional JSON document.
fn engine_config(config_json: Option<String>) -> NapiResult<EngineConfig> {
    match config_json {
        Some(json) => EngineConfig::parse(&json, ConfigFormat::Json).map_err(to_napi_error),
        None => Ok(EngineConfig::default()),
    }
}

// ---------------------------------------------------------------------------
// Full pipeline
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_exit(input_json: String, config_json: Option<String>) -> NapiResult<String> {
    let config = engine_config(config_json)?;
    let mut input: ExitAnalysisInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    if input.scenarios.is_none() {
        input.scenarios = Some(config.catalog().map_err(to_napi_error)?.scenarios());
    }
    let calculator = config.tax_calculator().map_err(to_napi_error)?;
    let output = analysis::analyze_exit(&input, &calculator, &config.number_format)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct ScenarioRequest {
    company: CompanyValuationInput,
    scenarios: Vec<ScenarioDefinition>,
    tax_profile: TaxProfile,
    #[serde(default)]
    custom_valuation: Option<Decimal>,
}

#[napi]
pub fn default_scenarios(config_json: Option<String>) -> NapiResult<String> {
    let config = engine_config(config_json)?;
    let catalog = config.catalog().map_err(to_napi_error)?.scenarios();
    serde_json::to_string(&catalog).map_err(to_napi_error)
}

#[napi]
pub fn calculate_scenarios(
    input_json: String,
    config_json: Option<String>,
) -> NapiResult<String> {
    let config = engine_config(config_json)?;
    let req: ScenarioRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let calculator = config.tax_calculator().map_err(to_napi_error)?;
    let results = scenarios::calculate_scenario_results(
        &req.company,
        &req.scenarios,
        &req.tax_profile,
        &calculator,
        req.custom_valuation,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&results).map_err(to_napi_error)
}

#[napi]
pub fn generate_recommendations(
    results_json: String,
    number_format_json: Option<String>,
) -> NapiResult<String> {
    let results: Vec<ScenarioResult> =
        serde_json::from_str(&results_json).map_err(to_napi_error)?;
    let format: NumberFormat = match number_format_json {
        Some(json) => serde_json::from_str(&json).map_err(to_napi_error)?,
        None => NumberFormat::default(),
    };
    format.validate().map_err(to_napi_error)?;
    let recs = scenarios::generate_recommendations_with(&results, &format);
    serde_json::to_string(&recs).map_err(to_napi_error)
}

#[derive(Deserialize)]
struct SalePercentageRequest {
    company: CompanyValuationInput,
    tax_profile: TaxProfile,
    target_amount: Decimal,
}

#[napi]
pub fn optimal_sale_percentage(input_json: String) -> NapiResult<u32> {
    let req: SalePercentageRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    Ok(scenarios::calculate_optimal_sale_percentage(
        &req.company,
        &req.tax_profile,
        req.target_amount,
    ))
}

// ---------------------------------------------------------------------------
// Tax
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct TaxImpactRequest {
    tax_profile: TaxProfile,
    gross_valuation: Decimal,
}

#[napi]
pub fn tax_impact(input_json: String, config_json: Option<String>) -> NapiResult<String> {
    let config = engine_config(config_json)?;
    let req: TaxImpactRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let calculator = config.tax_calculator().map_err(to_napi_error)?;
    let outcome = calculator
        .calculate_tax_impact(
            &TaxCalculationRequest::from_profile(&req.tax_profile),
            req.gross_valuation,
        )
        .map_err(to_napi_error)?;
    serde_json::to_string(&outcome).map_err(to_napi_error)
}
