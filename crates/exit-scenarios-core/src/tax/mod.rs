pub mod savings;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Rate};
use crate::ExitScenariosResult;

pub use savings::{SavingsTaxCalculator, SavingsTaxConfig, TaxBracket};

/// Shareholder fiscal position ahead of a sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxProfile {
    /// Original cost basis of the holding (may be zero)
    pub acquisition_value: Money,
    pub acquisition_date: NaiveDate,
    /// Whether proceeds will be reinvested in a qualifying plan
    pub reinvestment_plan: bool,
    #[serde(default)]
    pub reinvestment_amount: Money,
    /// Whether proceeds fund a life annuity (renta vitalicia)
    #[serde(default)]
    pub vitalicia_plan: bool,
    #[serde(default)]
    pub vitalicia_amount: Money,
}

/// The request handed to a [`TaxImpactCalculator`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxCalculationRequest {
    pub acquisition_value: Money,
    pub acquisition_date: NaiveDate,
    pub reinvestment_qualifies: bool,
    #[serde(default)]
    pub reinvestment_amount: Money,
    #[serde(default)]
    pub vitalicia_plan: bool,
    #[serde(default)]
    pub vitalicia_amount: Money,
    #[serde(default)]
    pub years_held: u32,
}

impl TaxCalculationRequest {
    /// Build a request from a profile. The holding period is always zero.
    pub fn from_profile(profile: &TaxProfile) -> Self {
        TaxCalculationRequest {
            acquisition_value: profile.acquisition_value,
            acquisition_date: profile.acquisition_date,
            reinvestment_qualifies: profile.reinvestment_plan,
            reinvestment_amount: profile.reinvestment_amount,
            vitalicia_plan: profile.vitalicia_plan,
            vitalicia_amount: profile.vitalicia_amount,
            years_held: 0,
        }
    }
}

/// Tax consequences of selling at a given gross valuation.
///
/// The scenario engine only reads `net_after_tax`, `effective_tax_rate` and
/// `reinvestment_benefit`; the remaining fields are informational.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaxOutcome {
    pub gross_valuation: Money,
    pub capital_gain: Money,
    pub exempt_gain: Money,
    pub taxable_gain: Money,
    pub tax_due: Money,
    pub net_after_tax: Money,
    /// Fraction in [0, 1]
    pub effective_tax_rate: Rate,
    pub reinvestment_benefit: Money,
    pub vitalicia_benefit: Money,
}

impl TaxOutcome {
    /// Outcome carrying only the fields the scenario engine consumes.
    pub fn new(
        net_after_tax: Money,
        effective_tax_rate: Rate,
        reinvestment_benefit: Money,
    ) -> Self {
        TaxOutcome {
            net_after_tax,
            effective_tax_rate,
            reinvestment_benefit,
            ..Default::default()
        }
    }
}

/// Computes the tax impact of a sale at `gross_valuation`.
pub trait TaxImpactCalculator {
    fn calculate_tax_impact(
        &self,
        request: &TaxCalculationRequest,
        gross_valuation: Money,
    ) -> ExitScenariosResult<TaxOutcome>;
}

impl<F> TaxImpactCalculator for F
where
    F: Fn(&TaxCalculationRequest, Money) -> ExitScenariosResult<TaxOutcome>,
{
    fn calculate_tax_impact(
        &self,
        request: &TaxCalculationRequest,
        gross_valuation: Money,
    ) -> ExitScenariosResult<TaxOutcome> {
        self(request, gross_valuation)
    }
}

/// Clamp negative amounts to zero.
pub(crate) fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn profile() -> TaxProfile {
        TaxProfile {
            acquisition_value: dec!(400_000),
            acquisition_date: NaiveDate::from_ymd_opt(2012, 3, 1).unwrap(),
            reinvestment_plan: true,
            reinvestment_amount: dec!(250_000),
            vitalicia_plan: false,
            vitalicia_amount: Decimal::ZERO,
        }
    }

    #[test]
    fn test_request_maps_reinvestment_plan_and_zeroes_years_held() {
        let req = TaxCalculationRequest::from_profile(&profile());
        assert!(req.reinvestment_qualifies);
        assert_eq!(req.years_held, 0);
        assert_eq!(req.acquisition_value, dec!(400_000));
        assert_eq!(req.reinvestment_amount, dec!(250_000));
    }

    #[test]
    fn test_closure_implements_calculator() {
        let flat = |_: &TaxCalculationRequest, gross: Money| -> ExitScenariosResult<TaxOutcome> {
            Ok(TaxOutcome::new(gross * dec!(0.8), dec!(0.2), Decimal::ZERO))
        };
        let req = TaxCalculationRequest::from_profile(&profile());
        let out = flat.calculate_tax_impact(&req, dec!(1_000)).unwrap();
        assert_eq!(out.net_after_tax, dec!(800));
        assert_eq!(out.effective_tax_rate, dec!(0.2));
    }

    #[test]
    fn test_profile_defaults_optional_amounts() {
        let json = r#"{
            "acquisition_value": "100000",
            "acquisition_date": "2015-06-30",
            "reinvestment_plan": false
        }"#;
        let p: TaxProfile = serde_json::from_str(json).unwrap();
        assert_eq!(p.reinvestment_amount, Decimal::ZERO);
        assert!(!p.vitalicia_plan);
    }
}
