//! Scaling per-liter doses to a water volume

use super::parser::DoseRange;

/// Decimal places for an averaged additive per-liter dose
pub const ADDITIVE_AVERAGE_DECIMALS: usize = 2;
/// Decimal places for an averaged base-nutrient per-liter dose
pub const NUTRIENT_AVERAGE_DECIMALS: usize = 1;
/// Decimal places for an averaged EC/pH target
pub const TARGET_AVERAGE_DECIMALS: usize = 1;

/// Whether ranges are shown whole or collapsed to their midpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayPolicy {
    Average,
    Range,
}

impl DisplayPolicy {
    pub fn from_show_average(show_average_values: bool) -> Self {
        if show_average_values {
            DisplayPolicy::Average
        } else {
            DisplayPolicy::Range
        }
    }
}

/// A dose multiplied out to the whole water volume
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScaledAmount {
    pub amount_min: f64,
    pub amount_max: f64,
}

impl ScaledAmount {
    pub fn average(&self) -> f64 {
        average_of(self.amount_min, self.amount_max)
    }
}

/// Liters usable for scaling: negative, NaN and infinite volumes count as 0
pub fn sanitize_volume(water_volume: f64) -> f64 {
    if water_volume.is_finite() && water_volume > 0.0 {
        water_volume
    } else {
        0.0
    }
}

/// Multiply both bounds by the water volume
pub fn scale(dose: DoseRange, water_volume: f64) -> ScaledAmount {
    let liters = sanitize_volume(water_volume);
    ScaledAmount {
        amount_min: dose.min * liters,
        amount_max: dose.max * liters,
    }
}

pub fn average_of(min: f64, max: f64) -> f64 {
    (min + max) / 2.0
}

/// Round half away from zero to a number of decimal places
pub fn round_to(value: f64, places: usize) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}
