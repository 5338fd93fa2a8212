//! Display formatting for doses and amounts

use super::amount::round_to;
use crate::models::Language;

/// Shown in place of a missing or non-finite amount
pub const PLACEHOLDER: &str = "-";
/// Joins the two ends of a range
pub const RANGE_JOINER: &str = "-";
/// Decimal places for scaled amounts
pub const AMOUNT_DECIMALS: usize = 2;

/// Volume suffix for the display language
pub fn unit_suffix(language: Language) -> &'static str {
    if language.is_russian() {
        "мл"
    } else {
        "ml"
    }
}

/// Fixed-point text; NaN and infinities become the placeholder
pub fn format_fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }
    let rounded = round_to(value, decimals);
    if !rounded.is_finite() {
        return PLACEHOLDER.to_string();
    }
    // Avoid "-0.00"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{:.*}", decimals, rounded)
}

/// Scaled amount with two decimals
pub fn format_amount(value: f64) -> String {
    format_fixed(value, AMOUNT_DECIMALS)
}

/// "min-max" with each bound formatted as an amount
pub fn format_amount_range(min: f64, max: f64) -> String {
    format!("{}{}{}", format_amount(min), RANGE_JOINER, format_amount(max))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(20.0), "20.00");
        assert_eq!(format_amount(1.005 * 1000.0), "1005.00");
        assert_eq!(format_amount(0.125), "0.13");
        assert_eq!(format_amount(0.0), "0.00");
    }

    #[test]
    fn test_non_finite_formats_as_placeholder() {
        assert_eq!(format_amount(f64::NAN), "-");
        assert_eq!(format_amount(f64::INFINITY), "-");
        assert_eq!(format_fixed(f64::NEG_INFINITY, 1), "-");
    }

    #[test]
    fn test_overflow_while_rounding_formats_as_placeholder() {
        assert_eq!(format_amount(f64::MAX), "-");
        assert_eq!(format_fixed(f64::MIN, 2), "-");
        assert_eq!(format_amount_range(1.0, f64::MAX), "1.00--");
    }

    #[test]
    fn test_negative_zero_has_no_sign() {
        assert_eq!(format_amount(-0.0), "0.00");
        assert_eq!(format_amount(-0.001), "0.00");
    }

    #[test]
    fn test_format_amount_range() {
        assert_eq!(format_amount_range(10.0, 30.0), "10.00-30.00");
    }

    #[test]
    fn test_unit_suffix_follows_language() {
        assert_eq!(unit_suffix(Language::Ru), "мл");
        assert_eq!(unit_suffix(Language::En), "ml");
        assert_eq!(unit_suffix(Language::Fr), "ml");
    }
}
