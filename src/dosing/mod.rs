//! Dose calculation module
//!
//! Parses dataset dose strings, scales them to a water volume and formats
//! the results for display.

pub mod amount;
pub mod format;
pub mod parser;
pub mod units;

pub use amount::{
    average_of, round_to, sanitize_volume, scale, DisplayPolicy, ScaledAmount,
    ADDITIVE_AVERAGE_DECIMALS, NUTRIENT_AVERAGE_DECIMALS, TARGET_AVERAGE_DECIMALS,
};
pub use format::{
    format_amount, format_amount_range, format_fixed, unit_suffix, AMOUNT_DECIMALS, PLACEHOLDER,
    RANGE_JOINER,
};
pub use parser::{is_zero_dose, parse_dose, DoseRange, ParsedDose};
pub use units::{categorize_unit, strip_per_liter, DoseUnit};
