use chrono::NaiveDate;
use exit_scenarios_core::analysis::{analyze_exit, ExitAnalysisInput};
use exit_scenarios_core::config::{ConfigFormat, EngineConfig};
use exit_scenarios_core::scenarios::{
    calculate_scenario_results, CompanyValuationInput, ScenarioCatalogProvider,
};
use exit_scenarios_core::tax::{SavingsTaxCalculator, TaxProfile};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn profile() -> TaxProfile {
    TaxProfile {
        acquisition_value: dec!(400_000),
        acquisition_date: NaiveDate::from_ymd_opt(2008, 4, 1).unwrap(),
        reinvestment_plan: true,
        reinvestment_amount: dec!(250_000),
        vitalicia_plan: false,
        vitalicia_amount: Decimal::ZERO,
    }
}

#[test]
fn test_savings_calculator_drives_engine() {
    let calc = SavingsTaxCalculator::default();
    let results = calculate_scenario_results(
        &CompanyValuationInput {
            base_valuation: dec!(2_000_000),
        },
        &exit_scenarios_core::scenarios::default_scenarios(),
        &profile(),
        &calc,
        None,
    )
    .unwrap();

    let base = &results[1];
    assert_eq!(base.tax_outcome.tax_due, dec!(401_880));
    assert_eq!(base.net_return, dec!(1_598_120));
    assert_eq!(base.tax_outcome.reinvestment_benefit, dec!(60_000));
    // (1,598,120 - 400,000) / 400,000 * 100 = 299.53
    assert_eq!(base.roi, dec!(299.53));
}

#[test]
fn test_reinvestment_off_means_no_benefit() {
    let calc = SavingsTaxCalculator::default();
    let mut tax = profile();
    tax.reinvestment_plan = false;
    let results = calculate_scenario_results(
        &CompanyValuationInput {
            base_valuation: dec!(2_000_000),
        },
        &exit_scenarios_core::scenarios::default_scenarios(),
        &tax,
        &calc,
        None,
    )
    .unwrap();
    assert!(results
        .iter()
        .all(|r| r.tax_outcome.reinvestment_benefit.is_zero()));
}

#[test]
fn test_configured_engine_from_yaml() {
    let yaml = r#"
multipliers:
  conservative: "0.5"
  optimistic: "2.0"
tax:
  brackets:
    - up_to: null
      rate: "0.10"
"#;
    let config = EngineConfig::parse(yaml, ConfigFormat::Yaml).unwrap();
    let calc = config.tax_calculator().unwrap();
    let input = ExitAnalysisInput {
        company: CompanyValuationInput {
            base_valuation: dec!(1_000_000),
        },
        tax_profile: TaxProfile {
            reinvestment_plan: false,
            ..profile()
        },
        scenarios: Some(config.catalog().unwrap().scenarios()),
        custom_valuation: Some(dec!(750_000)),
        target_amount: None,
    };
    let out = analyze_exit(&input, &calc, &config.number_format).unwrap();
    let valuations: Vec<_> = out.result.results.iter().map(|r| r.valuation).collect();
    assert_eq!(
        valuations,
        vec![dec!(500_000), dec!(1_000_000), dec!(2_000_000), dec!(750_000)]
    );
    // optimistic: gain 1.6M taxed at 10% => 1,840,000 net
    assert_eq!(out.result.results[2].net_return, dec!(1_840_000));
    assert_eq!(
        out.result.recommendations[0],
        "The Optimistic scenario offers the best net return: 1,840,000"
    );
}
