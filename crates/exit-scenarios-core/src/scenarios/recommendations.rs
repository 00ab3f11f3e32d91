use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::engine::ScenarioResult;
use crate::format::NumberFormat;
use crate::types::Rate;

/// Mean effective tax rate above which a warning is issued (strict).
pub const TAX_RATE_WARNING_THRESHOLD: Rate = dec!(0.25);

/// First result, in input order, achieving the highest net return.
pub fn best_net_return(results: &[ScenarioResult]) -> Option<&ScenarioResult> {
    let mut best: Option<&ScenarioResult> = None;
    for r in results {
        match best {
            Some(b) if r.net_return <= b.net_return => {}
            _ => best = Some(r),
        }
    }
    best
}

/// Arithmetic mean of the results' effective tax rates.
pub fn mean_effective_tax_rate(results: &[ScenarioResult]) -> Option<Rate> {
    if results.is_empty() {
        return None;
    }
    let total: Rate = results.iter().map(|r| r.tax_outcome.effective_tax_rate).sum();
    Some(total / Decimal::from(results.len()))
}

/// Guidance for the result set using the default number format.
pub fn generate_recommendations(results: &[ScenarioResult]) -> Vec<String> {
    generate_recommendations_with(results, &NumberFormat::default())
}

/// Guidance for the result set, in fixed order:
///
/// 1. the scenario with the best net return (whenever there are results),
/// 2. a warning when the mean effective tax rate exceeds 25%,
/// 3. a note when any scenario earns a reinvestment benefit.
pub fn generate_recommendations_with(
    results: &[ScenarioResult],
    format: &NumberFormat,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if let Some(best) = best_net_return(results) {
        recommendations.push(format!(
            "The {} scenario offers the best net return: {}",
            best.scenario.name,
            format.format_amount(best.net_return)
        ));
    }

    if let Some(mean_rate) = mean_effective_tax_rate(results) {
        if mean_rate > TAX_RATE_WARNING_THRESHOLD {
            recommendations.push(
                "The average effective tax rate exceeds 25%. Consider tax optimisation \
                 strategies such as a qualifying reinvestment or a life annuity plan."
                    .to_string(),
            );
        }
    }

    if results
        .iter()
        .any(|r| r.tax_outcome.reinvestment_benefit > Decimal::ZERO)
    {
        recommendations.push(
            "Your reinvestment plan reduces the tax burden. Make sure the reinvestment \
             meets the qualifying requirements and deadlines."
                .to_string(),
        );
    }

    recommendations
}
