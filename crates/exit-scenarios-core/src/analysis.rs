use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::info;

use crate::format::NumberFormat;
use crate::scenarios::recommendations::{best_net_return, mean_effective_tax_rate};
use crate::scenarios::{
    calculate_optimal_sale_percentage, calculate_scenario_results, default_scenarios,
    generate_recommendations_with, validate_catalog, CompanyValuationInput, ScenarioDefinition,
    ScenarioResult,
};
use crate::tax::{TaxImpactCalculator, TaxProfile};
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::ExitScenariosResult;

// ---------------------------------------------------------------------------
// Input / output types
// ---------------------------------------------------------------------------

/// Everything needed to model a shareholder exit in one call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExitAnalysisInput {
    pub company: CompanyValuationInput,
    pub tax_profile: TaxProfile,
    /// Scenario catalog; the default catalog when absent
    #[serde(default)]
    pub scenarios: Option<Vec<ScenarioDefinition>>,
    /// Valuation used by the custom scenario
    #[serde(default)]
    pub custom_valuation: Option<Money>,
    /// Cash the shareholder wants to raise, for the stake estimate
    #[serde(default)]
    pub target_amount: Option<Money>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExitSummary {
    pub best_scenario_id: String,
    pub worst_scenario_id: String,
    /// Best minus worst net return
    pub net_return_spread: Money,
    pub mean_effective_tax_rate: Rate,
    pub total_reinvestment_benefit: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExitAnalysisOutput {
    pub results: Vec<ScenarioResult>,
    pub recommendations: Vec<String>,
    pub summary: Option<ExitSummary>,
    pub suggested_sale_percentage: Option<u32>,
}

// ---------------------------------------------------------------------------
// Calculation
// ---------------------------------------------------------------------------

/// Run the full exit pipeline: scenario valuation, tax impact, ROI,
/// recommendations and, when a target amount is given, the stake to sell.
pub fn analyze_exit<C>(
    input: &ExitAnalysisInput,
    calculator: &C,
    format: &NumberFormat,
) -> ExitScenariosResult<ComputationOutput<ExitAnalysisOutput>>
where
    C: TaxImpactCalculator + ?Sized,
{
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();
    format.validate()?;

    let scenarios = match &input.scenarios {
        Some(list) => {
            validate_catalog(list)?;
            list.clone()
        }
        None => default_scenarios(),
    };

    if input.company.base_valuation <= Decimal::ZERO {
        warnings.push(format!(
            "Base valuation is {}; scenario valuations will not be meaningful",
            input.company.base_valuation
        ));
    }
    if input.tax_profile.acquisition_value <= Decimal::ZERO {
        warnings.push(
            "Acquisition value is not positive; ROI is measured against a basis of 1".into(),
        );
    }
    warnings.push("Holding period is passed to the tax calculator as 0 years".into());

    let results = calculate_scenario_results(
        &input.company,
        &scenarios,
        &input.tax_profile,
        calculator,
        input.custom_valuation,
    )?;
    let recommendations = generate_recommendations_with(&results, format);
    let summary = summarize(&results);

    let suggested_sale_percentage = input.target_amount.map(|target| {
        calculate_optimal_sale_percentage(&input.company, &input.tax_profile, target)
    });

    info!(
        scenarios = results.len(),
        recommendations = recommendations.len(),
        "exit analysis complete"
    );

    let output = ExitAnalysisOutput {
        results,
        recommendations,
        summary,
        suggested_sale_percentage,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Multi-Scenario Exit Valuation with Tax Impact",
        &serde_json::json!({
            "base_valuation": input.company.base_valuation.to_string(),
            "acquisition_value": input.tax_profile.acquisition_value.to_string(),
            "reinvestment_plan": input.tax_profile.reinvestment_plan,
            "num_scenarios": scenarios.len(),
            "custom_valuation": input.custom_valuation.map(|v| v.to_string()),
            "years_held": 0,
        }),
        warnings,
        elapsed,
        output,
    ))
}

fn summarize(results: &[ScenarioResult]) -> Option<ExitSummary> {
    let best = best_net_return(results)?;
    let mut worst = &results[0];
    for r in results {
        if r.net_return < worst.net_return {
            worst = r;
        }
    }
    Some(ExitSummary {
        best_scenario_id: best.scenario.id.clone(),
        worst_scenario_id: worst.scenario.id.clone(),
        net_return_spread: best.net_return - worst.net_return,
        mean_effective_tax_rate: mean_effective_tax_rate(results).unwrap_or_default(),
        total_reinvestment_benefit: results
            .iter()
            .map(|r| r.tax_outcome.reinvestment_benefit)
            .sum(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
