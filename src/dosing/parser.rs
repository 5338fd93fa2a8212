//! Dose string parsing
//!
//! Dataset doses are strings such as "2.0ml", "0.5-2.0ml" or "0". All
//! pattern matching on dose strings lives here.

use super::amount::average_of;

/// Numeric bounds of a dose; `min == max` for single values
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DoseRange {
    pub min: f64,
    pub max: f64,
}

impl DoseRange {
    pub fn single(value: f64) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    pub fn parse(dose: &str) -> Self {
        parse_dose(dose).range()
    }

    pub fn average(&self) -> f64 {
        average_of(self.min, self.max)
    }

    /// Inclusive on both bounds
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn is_zero(&self) -> bool {
        self.min == 0.0 && self.max == 0.0
    }
}

/// A dose string split into its parts
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDose {
    pub min: f64,
    pub max: f64,
    /// Written as "a-b"
    pub is_range: bool,
    /// Numeric text without the unit, e.g. "0.5-2.0"
    pub body: String,
    /// Unit suffix if present, e.g. "ml" or "мл/л"
    pub unit: Option<String>,
    /// Some numeric part could not be read and was taken as zero
    pub malformed: bool,
}

impl ParsedDose {
    pub fn range(&self) -> DoseRange {
        DoseRange {
            min: self.min,
            max: self.max,
        }
    }

    pub fn average(&self) -> f64 {
        average_of(self.min, self.max)
    }

    pub fn is_zero(&self) -> bool {
        self.range().is_zero()
    }
}

fn is_numeric_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.' || c == ',' || c == '-' || c.is_whitespace()
}

/// Split "0.5-2.0ml" into ("0.5-2.0", "ml")
fn split_unit(dose: &str) -> (&str, Option<&str>) {
    let trimmed = dose.trim();
    let split_at = trimmed
        .char_indices()
        .find(|(_, c)| !is_numeric_char(*c))
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len());

    let body = trimmed[..split_at].trim();
    let unit = trimmed[split_at..].trim();
    (body, if unit.is_empty() { None } else { Some(unit) })
}

/// Split a numeric body on its range hyphen, ignoring a leading sign
fn split_range(body: &str) -> Option<(&str, &str)> {
    let hyphen = body.char_indices().skip(1).find(|(_, c)| *c == '-')?.0;
    Some((&body[..hyphen], &body[hyphen + 1..]))
}

fn parse_number(part: &str) -> Option<f64> {
    let normalized = part.trim().replace(',', ".");
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a dose string into numeric bounds
///
/// Examples:
/// - "2.0" -> 2.0..2.0
/// - "2.0ml" -> 2.0..2.0, unit "ml"
/// - "0.5-2.0мл" -> 0.5..2.0, unit "мл"
///
/// Unreadable numbers become 0.0 and set `malformed`; empty input is a
/// plain zero.
pub fn parse_dose(dose: &str) -> ParsedDose {
    let (body, unit) = split_unit(dose);
    let unit = unit.map(str::to_string);

    if body.is_empty() {
        return ParsedDose {
            min: 0.0,
            max: 0.0,
            is_range: false,
            body: String::new(),
            malformed: !dose.trim().is_empty(),
            unit,
        };
    }

    match split_range(body) {
        Some((low, high)) => {
            let min = parse_number(low);
            let max = parse_number(high);
            ParsedDose {
                min: min.unwrap_or(0.0),
                max: max.unwrap_or(0.0),
                is_range: true,
                body: body.to_string(),
                unit,
                malformed: min.is_none() || max.is_none(),
            }
        }
        None => {
            let value = parse_number(body);
            ParsedDose {
                min: value.unwrap_or(0.0),
                max: value.unwrap_or(0.0),
                is_range: false,
                body: body.to_string(),
                unit,
                malformed: value.is_none(),
            }
        }
    }
}

/// "0", "0.", "0.00" (a comma also works as the decimal mark)
fn is_zero_literal(text: &str) -> bool {
    let text = text.trim();
    let Some(rest) = text.strip_prefix('0') else {
        return false;
    };
    match rest.strip_prefix('.').or_else(|| rest.strip_prefix(',')) {
        Some(tail) => tail.chars().all(|c| c == '0'),
        None => rest.is_empty(),
    }
}

fn is_unit_text(unit: &str) -> bool {
    unit.chars().all(|c| c.is_alphabetic() || c == '/')
}

/// Whether a dose means "not applied"
///
/// True for empty input and for a zero with an optional zero decimal tail
/// and optional unit: "0", "0.0", "0ml", "0.00мл". A range counts as zero
/// only when both ends are zero literals.
pub fn is_zero_dose(dose: &str) -> bool {
    let trimmed = dose.trim();
    if trimmed.is_empty() {
        return true;
    }

    let (body, unit) = split_unit(trimmed);
    if !unit.map_or(true, is_unit_text) {
        return false;
    }

    match split_range(body) {
        Some((low, high)) => is_zero_literal(low) && is_zero_literal(high),
        None => is_zero_literal(body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_number() {
        let dose = parse_dose("2.0");
        assert_eq!(dose.min, 2.0);
        assert_eq!(dose.max, 2.0);
        assert!(!dose.is_range);
        assert_eq!(dose.unit, None);
        assert!(!dose.malformed);
    }

    #[test]
    fn test_parse_number_with_unit() {
        let dose = parse_dose("2.0ml");
        assert_eq!(dose.range(), DoseRange::single(2.0));
        assert_eq!(dose.body, "2.0");
        assert_eq!(dose.unit.as_deref(), Some("ml"));

        let dose = parse_dose("1.5мл");
        assert_eq!(dose.min, 1.5);
        assert_eq!(dose.unit.as_deref(), Some("мл"));
    }

    #[test]
    fn test_parse_range() {
        let dose = parse_dose("0.5-2.0ml");
        assert!(dose.is_range);
        assert_eq!(dose.min, 0.5);
        assert_eq!(dose.max, 2.0);
        assert_eq!(dose.body, "0.5-2.0");
        assert!((dose.average() - 1.25).abs() < 1e-9);

        let dose = parse_dose(" 1 - 3 мл/л ");
        assert!(dose.is_range);
        assert_eq!((dose.min, dose.max), (1.0, 3.0));
        assert_eq!(dose.unit.as_deref(), Some("мл/л"));
    }

    #[test]
    fn test_parse_comma_decimal() {
        let dose = parse_dose("1,5ml");
        assert_eq!(dose.min, 1.5);
        assert!(!dose.malformed);
    }

    #[test]
    fn test_malformed_parts_become_zero() {
        let dose = parse_dose("1.2.3ml");
        assert_eq!(dose.range(), DoseRange::single(0.0));
        assert!(dose.malformed);

        let dose = parse_dose("-");
        assert_eq!(dose.range(), DoseRange::single(0.0));
        assert!(dose.malformed);

        let dose = parse_dose("2-");
        assert!(dose.is_range);
        assert_eq!((dose.min, dose.max), (2.0, 0.0));
        assert!(dose.malformed);

        let dose = parse_dose("as needed");
        assert_eq!(dose.range(), DoseRange::single(0.0));
        assert!(dose.malformed);
    }

    #[test]
    fn test_empty_dose_is_plain_zero() {
        let dose = parse_dose("   ");
        assert!(dose.is_zero());
        assert!(!dose.malformed);
    }

    #[test]
    fn test_zero_doses() {
        for dose in ["", "  ", "0", "0.0", "0.", "0ml", "0.00мл", " 0ML ", "0 ml", "0-0", "0.0-0ml"] {
            assert!(is_zero_dose(dose), "{:?} should be zero", dose);
        }
    }

    #[test]
    fn test_non_zero_doses() {
        for dose in ["1", "0.5", "0.05ml", "0-1ml", "00", "10ml", "0.5-2.0", "0+"] {
            assert!(!is_zero_dose(dose), "{:?} should not be zero", dose);
        }
    }

    #[test]
    fn test_dose_range_contains() {
        let range = DoseRange::parse("5.8-6.2");
        assert!(range.contains(6.0));
        assert!(range.contains(5.8));
        assert!(!range.contains(6.3));
        assert!(DoseRange::parse("6.0").contains(6.0));
    }
}
