use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{non_negative, TaxCalculationRequest, TaxImpactCalculator, TaxOutcome};
use crate::error::ExitScenariosError;
use crate::types::{round_half_up_dp, Money, Rate};
use crate::ExitScenariosResult;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// One band of a progressive schedule. `up_to: None` marks the open top band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub up_to: Option<Money>,
    pub rate: Rate,
}

/// Savings-income schedule applied to capital gains on a share sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SavingsTaxConfig {
    /// Ordered bands, lowest first
    pub brackets: Vec<TaxBracket>,
    /// Maximum proceeds that can shelter gain through a life annuity
    pub vitalicia_exemption_cap: Money,
}

impl Default for SavingsTaxConfig {
    fn default() -> Self {
        SavingsTaxConfig {
            brackets: vec![
                TaxBracket {
                    up_to: Some(dec!(6_000)),
                    rate: dec!(0.19),
                },
                TaxBracket {
                    up_to: Some(dec!(50_000)),
                    rate: dec!(0.21),
                },
                TaxBracket {
                    up_to: Some(dec!(200_000)),
                    rate: dec!(0.23),
                },
                TaxBracket {
                    up_to: Some(dec!(300_000)),
                    rate: dec!(0.27),
                },
                TaxBracket {
                    up_to: None,
                    rate: dec!(0.30),
                },
            ],
            vitalicia_exemption_cap: dec!(240_000),
        }
    }
}

impl SavingsTaxConfig {
    pub fn validate(&self) -> ExitScenariosResult<()> {
        if self.brackets.is_empty() {
            return Err(ExitScenariosError::InvalidInput {
                field: "brackets".into(),
                reason: "At least one tax bracket is required".into(),
            });
        }
        let mut previous = Decimal::ZERO;
        for (i, bracket) in self.brackets.iter().enumerate() {
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(ExitScenariosError::InvalidInput {
                    field: format!("brackets[{i}].rate"),
                    reason: "Bracket rate must be between 0 and 1".into(),
                });
            }
            let is_last = i == self.brackets.len() - 1;
            match bracket.up_to {
                Some(upper) if upper <= previous => {
                    return Err(ExitScenariosError::InvalidInput {
                        field: format!("brackets[{i}].up_to"),
                        reason: "Bracket thresholds must be strictly increasing".into(),
                    });
                }
                Some(upper) => previous = upper,
                None if !is_last => {
                    return Err(ExitScenariosError::InvalidInput {
                        field: format!("brackets[{i}].up_to"),
                        reason: "Only the last bracket may be open-ended".into(),
                    });
                }
                None => {}
            }
        }
        if self.brackets.last().and_then(|b| b.up_to).is_some() {
            return Err(ExitScenariosError::InvalidInput {
                field: "brackets".into(),
                reason: "The last bracket must be open-ended".into(),
            });
        }
        if self.vitalicia_exemption_cap < Decimal::ZERO {
            return Err(ExitScenariosError::InvalidInput {
                field: "vitalicia_exemption_cap".into(),
                reason: "Life annuity exemption cap cannot be negative".into(),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Calculator
// ---------------------------------------------------------------------------

/// Progressive capital-gains calculator with reinvestment and life-annuity
/// exemptions.
///
/// Exempt gain is proportional to the share of gross proceeds committed to
/// each plan. The holding period on the request does not affect the result.
#[derive(Debug, Clone, Default)]
pub struct SavingsTaxCalculator {
    config: SavingsTaxConfig,
}

impl SavingsTaxCalculator {
    pub fn new(config: SavingsTaxConfig) -> ExitScenariosResult<Self> {
        config.validate()?;
        Ok(SavingsTaxCalculator { config })
    }

    /// Tax owed on `gain` under the progressive schedule.
    pub fn bracket_tax(&self, gain: Money) -> Money {
        let mut tax = Decimal::ZERO;
        let mut lower = Decimal::ZERO;
        for bracket in &self.config.brackets {
            if gain <= lower {
                break;
            }
            let slice = match bracket.up_to {
                Some(upper) => gain.min(upper) - lower,
                None => gain - lower,
            };
            tax += slice * bracket.rate;
            match bracket.up_to {
                Some(upper) => lower = upper,
                None => break,
            }
        }
        tax
    }
}

impl TaxImpactCalculator for SavingsTaxCalculator {
    fn calculate_tax_impact(
        &self,
        request: &TaxCalculationRequest,
        gross_valuation: Money,
    ) -> ExitScenariosResult<TaxOutcome> {
        validate_request(request, gross_valuation)?;

        let capital_gain = non_negative(gross_valuation - request.acquisition_value);

        let share_of_gross = |amount: Money| -> Decimal {
            if gross_valuation.is_zero() {
                Decimal::ZERO
            } else {
                amount.min(gross_valuation) / gross_valuation
            }
        };

        let reinvest_exempt = if request.reinvestment_qualifies {
            capital_gain * share_of_gross(request.reinvestment_amount)
        } else {
            Decimal::ZERO
        };
        let vitalicia_exempt = if request.vitalicia_plan {
            let sheltered = request.vitalicia_amount.min(self.config.vitalicia_exemption_cap);
            capital_gain * share_of_gross(sheltered)
        } else {
            Decimal::ZERO
        };

        let reinvest_exempt = reinvest_exempt.min(capital_gain);
        let exempt_gain = (reinvest_exempt + vitalicia_exempt).min(capital_gain);
        let taxable_gain = capital_gain - exempt_gain;

        let tax_without_relief = self.bracket_tax(capital_gain);
        let tax_after_reinvestment = self.bracket_tax(capital_gain - reinvest_exempt);
        let tax_due = round_half_up_dp(self.bracket_tax(taxable_gain), 2);

        let reinvestment_benefit =
            round_half_up_dp(tax_without_relief - tax_after_reinvestment, 2);
        let vitalicia_benefit = round_half_up_dp(tax_after_reinvestment, 2) - tax_due;

        let effective_tax_rate = if capital_gain.is_zero() {
            Decimal::ZERO
        } else {
            tax_due / capital_gain
        };

        debug!(
            gross = %gross_valuation,
            gain = %capital_gain,
            exempt = %exempt_gain,
            tax = %tax_due,
            years_held = request.years_held,
            "savings tax computed"
        );

        Ok(TaxOutcome {
            gross_valuation,
            capital_gain,
            exempt_gain,
            taxable_gain,
            tax_due,
            net_after_tax: gross_valuation - tax_due,
            effective_tax_rate,
            reinvestment_benefit,
            vitalicia_benefit,
        })
    }
}

fn validate_request(
    request: &TaxCalculationRequest,
    gross_valuation: Money,
) -> ExitScenariosResult<()> {
    if gross_valuation < Decimal::ZERO {
        return Err(ExitScenariosError::InvalidInput {
            field: "gross_valuation".into(),
            reason: "Gross valuation cannot be negative".into(),
        });
    }
    if request.acquisition_value < Decimal::ZERO {
        return Err(ExitScenariosError::InvalidInput {
            field: "acquisition_value".into(),
            reason: "Acquisition value cannot be negative".into(),
        });
    }
    if request.reinvestment_amount < Decimal::ZERO {
        return Err(ExitScenariosError::InvalidInput {
            field: "reinvestment_amount".into(),
            reason: "Reinvestment amount cannot be negative".into(),
        });
    }
    if request.vitalicia_amount < Decimal::ZERO {
        return Err(ExitScenariosError::InvalidInput {
            field: "vitalicia_amount".into(),
            reason: "Life annuity amount cannot be negative".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
