use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::engine::CompanyValuationInput;
use crate::tax::TaxProfile;
use crate::types::{round_half_up, Money};

const MIN_SALE_PCT: u32 = 1;
const MAX_SALE_PCT: u32 = 100;

/// Whole-percent stake to sell so that gross proceeds reach `target_amount`.
///
/// Purely a valuation ratio: `tax_profile` is accepted for interface
/// stability but the estimate ignores tax. The result is always in
/// `[1, 100]`; with a zero base valuation any positive target needs the whole
/// company and anything else floors at 1.
pub fn calculate_optimal_sale_percentage(
    company: &CompanyValuationInput,
    _tax_profile: &TaxProfile,
    target_amount: Money,
) -> u32 {
    let base = company.base_valuation;
    if base.is_zero() {
        return if target_amount > Decimal::ZERO {
            MAX_SALE_PCT
        } else {
            MIN_SALE_PCT
        };
    }

    let rough_pct = target_amount
        .checked_div(base)
        .and_then(|ratio| ratio.checked_mul(dec!(100)));
    let Some(rough_pct) = rough_pct else {
        // Overflow only happens for extreme ratios; saturate by sign.
        return if target_amount.is_sign_positive() == base.is_sign_positive() {
            MAX_SALE_PCT
        } else {
            MIN_SALE_PCT
        };
    };
    let rounded = round_half_up(rough_pct);
    if rounded >= Decimal::from(MAX_SALE_PCT) {
        MAX_SALE_PCT
    } else if rounded <= Decimal::from(MIN_SALE_PCT) {
        MIN_SALE_PCT
    } else {
        rounded.to_u32().unwrap_or(MIN_SALE_PCT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn tax() -> TaxProfile {
        TaxProfile {
            acquisition_value: dec!(200_000),
            acquisition_date: NaiveDate::from_ymd_opt(2016, 5, 10).unwrap(),
            reinvestment_plan: true,
            reinvestment_amount: dec!(100_000),
            vitalicia_plan: false,
            vitalicia_amount: Decimal::ZERO,
        }
    }

    fn company(base: Money) -> CompanyValuationInput {
        CompanyValuationInput {
            base_valuation: base,
        }
    }

    #[test]
    fn test_half_of_company() {
        let pct = calculate_optimal_sale_percentage(
            &company(dec!(1_000_000)),
            &tax(),
            dec!(500_000),
        );
        assert_eq!(pct, 50);
    }

    #[test]
    fn test_rounds_half_up() {
        // 12.5% -> 13
        let pct =
            calculate_optimal_sale_percentage(&company(dec!(1_000_000)), &tax(), dec!(125_000));
        assert_eq!(pct, 13);
    }

    #[test]
    fn test_target_above_valuation_clamps_to_100() {
        let pct = calculate_optimal_sale_percentage(
            &company(dec!(1_000_000)),
            &tax(),
            dec!(3_000_000),
        );
        assert_eq!(pct, 100);
    }

    #[test]
    fn test_non_positive_target_clamps_to_1() {
        let c = company(dec!(1_000_000));
        assert_eq!(calculate_optimal_sale_percentage(&c, &tax(), Decimal::ZERO), 1);
        assert_eq!(calculate_optimal_sale_percentage(&c, &tax(), dec!(-50_000)), 1);
    }

    #[test]
    fn test_zero_base_valuation_is_bounded() {
        let c = company(Decimal::ZERO);
        assert_eq!(calculate_optimal_sale_percentage(&c, &tax(), dec!(10)), 100);
        assert_eq!(calculate_optimal_sale_percentage(&c, &tax(), Decimal::ZERO), 1);
        assert_eq!(calculate_optimal_sale_percentage(&c, &tax(), dec!(-10)), 1);
    }

    #[test]
    fn test_tax_profile_does_not_affect_estimate() {
        let c = company(dec!(4_000_000));
        let mut other = tax();
        other.acquisition_value = dec!(3_900_000);
        other.reinvestment_plan = false;
        assert_eq!(
            calculate_optimal_sale_percentage(&c, &tax(), dec!(1_000_000)),
            calculate_optimal_sale_percentage(&c, &other, dec!(1_000_000))
        );
    }
}
