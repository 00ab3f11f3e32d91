use chrono::NaiveDate;
use exit_scenarios_core::scenarios::{
    calculate_optimal_sale_percentage, calculate_scenario_results, default_scenarios,
    generate_recommendations, CompanyValuationInput, ScenarioDefinition, ScenarioKind,
};
use exit_scenarios_core::tax::{TaxCalculationRequest, TaxOutcome, TaxProfile};
use exit_scenarios_core::{ExitScenariosResult, Money};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Fixtures
// ===========================================================================

/// 20% flat tax on the gain; a reinvestment plan shelters 10% of the gain.
fn stub_calculator(
    req: &TaxCalculationRequest,
    gross: Money,
) -> ExitScenariosResult<TaxOutcome> {
    let gain = (gross - req.acquisition_value).max(Decimal::ZERO);
    let full_tax = gain * dec!(0.20);
    let benefit = if req.reinvestment_qualifies {
        full_tax * dec!(0.10)
    } else {
        Decimal::ZERO
    };
    let tax = full_tax - benefit;
    let rate = if gain.is_zero() { Decimal::ZERO } else { tax / gain };
    Ok(TaxOutcome::new(gross - tax, rate, benefit))
}

fn tax_profile(acquisition_value: Money, reinvestment_plan: bool) -> TaxProfile {
    TaxProfile {
        acquisition_value,
        acquisition_date: NaiveDate::from_ymd_opt(2009, 11, 20).unwrap(),
        reinvestment_plan,
        reinvestment_amount: dec!(300_000),
        vitalicia_plan: false,
        vitalicia_amount: Decimal::ZERO,
    }
}

fn company(base_valuation: Money) -> CompanyValuationInput {
    CompanyValuationInput { base_valuation }
}

// ===========================================================================
// Scenario engine
// ===========================================================================

#[test]
fn test_end_to_end_default_catalog() {
    let results = calculate_scenario_results(
        &company(dec!(2_000_000)),
        &default_scenarios(),
        &tax_profile(dec!(400_000), true),
        &stub_calculator,
        None,
    )
    .unwrap();

    assert_eq!(results.len(), 4);
    let valuations: Vec<Money> = results.iter().map(|r| r.valuation).collect();
    assert_eq!(
        valuations,
        vec![
            dec!(1_700_000),
            dec!(2_000_000),
            dec!(2_300_000),
            dec!(2_000_000)
        ]
    );

    // base: gain 1.6M, tax 320k less 32k benefit => 1,712,000 net
    assert_eq!(results[1].net_return, dec!(1_712_000));
    // (1,712,000 - 400,000) / 400,000 * 100
    assert_eq!(results[1].roi, dec!(328));

    let recs = generate_recommendations(&results);
    let best_sentences = recs.iter().filter(|r| r.contains("best net return")).count();
    assert_eq!(best_sentences, 1);
    assert!(recs[0].contains("Optimistic"));
    // mean rate is 18%, so no warning; the stub always grants a benefit
    assert_eq!(recs.len(), 2);
    assert!(recs[1].contains("reinvestment"));
}

#[test]
fn test_output_order_follows_input_order() {
    let mut scenarios = default_scenarios();
    scenarios.reverse();
    let results = calculate_scenario_results(
        &company(dec!(1_000_000)),
        &scenarios,
        &tax_profile(dec!(100_000), false),
        &stub_calculator,
        None,
    )
    .unwrap();

    let ids: Vec<&str> = results.iter().map(|r| r.scenario.id.as_str()).collect();
    assert_eq!(ids, vec!["custom", "optimistic", "base", "conservative"]);
}

#[test]
fn test_custom_override_exact() {
    let custom = ScenarioDefinition {
        id: "board-offer".into(),
        name: "Board offer".into(),
        kind: ScenarioKind::Custom,
        multiplier: dec!(3.7),
        description: String::new(),
        color_token: String::new(),
    };
    let results = calculate_scenario_results(
        &company(dec!(2_000_000)),
        &[custom],
        &tax_profile(dec!(400_000), false),
        &stub_calculator,
        Some(dec!(5_000_000)),
    )
    .unwrap();
    assert_eq!(results[0].valuation, dec!(5_000_000));
}

#[test]
fn test_zero_acquisition_value_does_not_divide_by_zero() {
    let results = calculate_scenario_results(
        &company(dec!(1_000)),
        &default_scenarios(),
        &tax_profile(Decimal::ZERO, false),
        &stub_calculator,
        None,
    )
    .unwrap();
    // base: gain 1000, tax 200, net 800 => (800 - 1) / 1 * 100
    assert_eq!(results[1].roi, dec!(79_900));
}

#[test]
fn test_idempotent_for_identical_inputs() {
    let run = || {
        calculate_scenario_results(
            &company(dec!(3_333_333)),
            &default_scenarios(),
            &tax_profile(dec!(1_000_000), true),
            &stub_calculator,
            Some(dec!(4_000_000)),
        )
        .unwrap()
    };
    assert_eq!(run(), run());
}

// ===========================================================================
// Sale percentage
// ===========================================================================

#[test]
fn test_sale_percentage_reference_values() {
    let tax = tax_profile(dec!(400_000), false);
    let c = company(dec!(1_000_000));
    assert_eq!(calculate_optimal_sale_percentage(&c, &tax, dec!(500_000)), 50);
    assert_eq!(calculate_optimal_sale_percentage(&c, &tax, dec!(1_500_000)), 100);
    assert_eq!(calculate_optimal_sale_percentage(&c, &tax, dec!(-1)), 1);
    assert_eq!(calculate_optimal_sale_percentage(&c, &tax, dec!(4_000)), 1);
}
