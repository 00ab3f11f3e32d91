use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ExitScenariosError;
use crate::types::round_half_away_dp;
use crate::ExitScenariosResult;

/// Most fractional digits a display format may request.
pub const MAX_FRACTION_DIGITS: u32 = 10;

/// Locale policy for amounts quoted in recommendation text.
///
/// Behaves like a browser's `toLocaleString`: the value is rounded to at most
/// `max_fraction_digits`, trailing fractional zeros are dropped and the
/// integer part is grouped in thousands. Halves round away from zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberFormat {
    pub thousands_separator: char,
    pub decimal_separator: char,
    pub max_fraction_digits: u32,
}

impl Default for NumberFormat {
    fn default() -> Self {
        NumberFormat::en_us()
    }
}

impl NumberFormat {
    /// `1,234,567.89`
    pub fn en_us() -> Self {
        NumberFormat {
            thousands_separator: ',',
            decimal_separator: '.',
            max_fraction_digits: 2,
        }
    }

    /// `1.234.567,89`
    pub fn es_es() -> Self {
        NumberFormat {
            thousands_separator: '.',
            decimal_separator: ',',
            max_fraction_digits: 2,
        }
    }

    pub fn validate(&self) -> ExitScenariosResult<()> {
        if self.max_fraction_digits > MAX_FRACTION_DIGITS {
            return Err(ExitScenariosError::InvalidInput {
                field: "number_format.max_fraction_digits".into(),
                reason: format!("At most {MAX_FRACTION_DIGITS} fraction digits are supported"),
            });
        }
        if self.thousands_separator == self.decimal_separator {
            return Err(ExitScenariosError::InvalidInput {
                field: "number_format.decimal_separator".into(),
                reason: "Decimal and thousands separators must differ".into(),
            });
        }
        Ok(())
    }

    pub fn format_amount(&self, value: Decimal) -> String {
        let rounded = round_half_away_dp(value, self.max_fraction_digits).normalize();
        let text = rounded.abs().to_string();
        let (int_part, frac_part) = match text.split_once('.') {
            Some((i, f)) => (i, f),
            None => (text.as_str(), ""),
        };

        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push(self.thousands_separator);
            }
            grouped.push(ch);
        }

        let mut out = String::new();
        if rounded.is_sign_negative() && !rounded.is_zero() {
            out.push('-');
        }
        out.push_str(&grouped);
        if !frac_part.is_empty() {
            out.push(self.decimal_separator);
            out.push_str(frac_part);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_en_us_grouping() {
        let f = NumberFormat::en_us();
        assert_eq!(f.format_amount(dec!(1_538_120)), "1,538,120");
        assert_eq!(f.format_amount(dec!(999)), "999");
        assert_eq!(f.format_amount(dec!(1000)), "1,000");
    }

    #[test]
    fn test_es_es_separators() {
        let f = NumberFormat::es_es();
        assert_eq!(f.format_amount(dec!(1_234_567.891)), "1.234.567,89");
    }

    #[test]
    fn test_trailing_zeros_dropped() {
        let f = NumberFormat::en_us();
        assert_eq!(f.format_amount(dec!(2_500.50)), "2,500.5");
        assert_eq!(f.format_amount(dec!(2_500.00)), "2,500");
    }

    #[test]
    fn test_negative_amount() {
        let f = NumberFormat::en_us();
        assert_eq!(f.format_amount(dec!(-12_345.6)), "-12,345.6");
    }

    #[test]
    fn test_zero_decimals() {
        let f = NumberFormat {
            max_fraction_digits: 0,
            ..NumberFormat::en_us()
        };
        assert_eq!(f.format_amount(dec!(1_999.5)), "2,000");
    }

    #[test]
    fn test_negative_midpoint_rounds_away_from_zero() {
        let f = NumberFormat {
            max_fraction_digits: 0,
            ..NumberFormat::en_us()
        };
        assert_eq!(f.format_amount(dec!(-2.5)), "-3");
        assert_eq!(NumberFormat::en_us().format_amount(dec!(-0.125)), "-0.13");
    }

    #[test]
    fn test_many_fraction_digits_do_not_panic() {
        let f = NumberFormat {
            max_fraction_digits: 20,
            ..NumberFormat::en_us()
        };
        assert_eq!(f.format_amount(dec!(1_538_120)), "1,538,120");
        assert!(f.validate().is_err());
    }

    #[test]
    fn test_validate_limits() {
        let mut f = NumberFormat::en_us();
        f.max_fraction_digits = MAX_FRACTION_DIGITS;
        assert!(f.validate().is_ok());
        f.max_fraction_digits = MAX_FRACTION_DIGITS + 1;
        assert!(f.validate().is_err());
        assert!(NumberFormat {
            decimal_separator: ',',
            ..NumberFormat::en_us()
        }
        .validate()
        .is_err());
    }
}
