//! Dose unit vocabulary
//!
//! Dataset dose strings carry free-form unit suffixes in two languages.
//! This maps them onto a small set of categories.

use serde::{Deserialize, Serialize};

/// Category of a dose unit suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoseUnit {
    /// Milliliters (optionally "per liter")
    Ml,
    /// Grams (powders)
    Gram,
    Drop,
    Spray,
    /// Anything else, kept verbatim for display
    Other,
}

impl DoseUnit {
    /// Units that the locale suffix can stand in for
    pub fn is_localizable(&self) -> bool {
        matches!(self, DoseUnit::Ml)
    }
}

/// Strip a trailing "per liter" marker ("/l", "/л", "/L")
pub fn strip_per_liter(unit: &str) -> &str {
    let trimmed = unit.trim();
    for suffix in ["/l", "/L", "/л", "/Л"] {
        if let Some(rest) = trimmed.strip_suffix(suffix) {
            return rest.trim_end();
        }
    }
    trimmed
}

/// Determine the category of a unit suffix
pub fn categorize_unit(unit: &str) -> DoseUnit {
    let lower = strip_per_liter(unit).to_lowercase();

    match lower.as_str() {
        "ml" | "мл" | "milliliter" | "milliliters" | "millilitre" | "millilitres" => DoseUnit::Ml,
        "g" | "г" | "gram" | "grams" | "гр" => DoseUnit::Gram,
        "drop" | "drops" | "капля" | "капли" | "капель" => DoseUnit::Drop,
        "spray" | "sprays" | "пшик" | "пшика" | "пшиков" => DoseUnit::Spray,
        _ => DoseUnit::Other,
    }
}
