use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::catalog::{ScenarioDefinition, ScenarioKind};
use crate::error::ExitScenariosError;
use crate::tax::{TaxCalculationRequest, TaxImpactCalculator, TaxOutcome, TaxProfile};
use crate::types::{round_half_up, round_half_up_dp, Money, Percentage};
use crate::ExitScenariosResult;

/// Company being assessed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyValuationInput {
    /// Reference (pre-scenario) valuation
    pub base_valuation: Money,
}

/// Outcome of one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario: ScenarioDefinition,
    /// Gross sale valuation for this scenario
    pub valuation: Money,
    pub tax_outcome: TaxOutcome,
    /// Return on the acquisition basis, in percent (2 dp)
    pub roi: Percentage,
    /// Net-after-tax proceeds, used to compare scenarios
    pub net_return: Money,
}

/// Gross valuation for a scenario. A non-zero override replaces the
/// multiplier for the custom scenario only.
pub fn scenario_valuation(
    company: &CompanyValuationInput,
    scenario: &ScenarioDefinition,
    custom_override: Option<Money>,
) -> ExitScenariosResult<Money> {
    match custom_override {
        Some(value) if scenario.kind == ScenarioKind::Custom && !value.is_zero() => Ok(value),
        _ => company
            .base_valuation
            .checked_mul(scenario.multiplier)
            .map(round_half_up)
            .ok_or_else(|| overflow(&format!("scenario:{} valuation", scenario.id))),
    }
}

/// Basis used for ROI; non-positive acquisition values floor to 1.
pub fn acquisition_basis(tax_profile: &TaxProfile) -> Money {
    if tax_profile.acquisition_value > Decimal::ZERO {
        tax_profile.acquisition_value
    } else {
        Decimal::ONE
    }
}

/// ROI in percent of `net_after_tax` over `basis`, rounded to 2 dp.
pub fn return_on_investment(net_after_tax: Money, basis: Money) -> ExitScenariosResult<Percentage> {
    net_after_tax
        .checked_sub(basis)
        .and_then(|gain| gain.checked_div(basis))
        .and_then(|ratio| ratio.checked_mul(dec!(100)))
        .map(|pct| round_half_up_dp(pct, 2))
        .ok_or_else(|| overflow("roi"))
}

fn overflow(field: &str) -> ExitScenariosError {
    ExitScenariosError::InvalidInput {
        field: field.into(),
        reason: "Value is outside the representable decimal range".into(),
    }
}

/// Value every scenario and compute its tax outcome and ROI.
///
/// Output order mirrors `scenarios`. The calculator receives a request with
/// `reinvestment_qualifies` taken from the profile's reinvestment plan and a
/// holding period of zero. The first calculator error aborts the whole batch.
pub fn calculate_scenario_results<C>(
    company: &CompanyValuationInput,
    scenarios: &[ScenarioDefinition],
    tax_profile: &TaxProfile,
    calculator: &C,
    custom_override: Option<Money>,
) -> ExitScenariosResult<Vec<ScenarioResult>>
where
    C: TaxImpactCalculator + ?Sized,
{
    let request = TaxCalculationRequest::from_profile(tax_profile);
    let basis = acquisition_basis(tax_profile);
    if tax_profile.acquisition_value <= Decimal::ZERO {
        warn!(
            acquisition_value = %tax_profile.acquisition_value,
            "non-positive acquisition value; ROI uses a basis of 1"
        );
    }

    let mut results = Vec::with_capacity(scenarios.len());
    for scenario in scenarios {
        let valuation = scenario_valuation(company, scenario, custom_override)?;
        let tax_outcome = calculator.calculate_tax_impact(&request, valuation)?;
        let net_return = tax_outcome.net_after_tax;
        let roi = return_on_investment(net_return, basis)?;

        debug!(
            scenario = %scenario.id,
            valuation = %valuation,
            net = %net_return,
            roi = %roi,
            "scenario valued"
        );

        results.push(ScenarioResult {
            scenario: scenario.clone(),
            valuation,
            tax_outcome,
            roi,
            net_return,
        });
    }

    Ok(results)
}
