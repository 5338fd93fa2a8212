//! Calculated recipe
//!
//! Purely derived from a `CalculationInput`; recomputed, never mutated.

use serde::{Deserialize, Serialize};

use super::brand::Application;
use crate::dosing::DoseRange;

/// A base nutrient scaled to the water volume
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientLine {
    pub brand: String,
    pub name: String,
    pub line: String,
    pub per_liter: String,
    pub amount: String,
    pub is_zero: bool,
}

/// A selected additive resolved for the current stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdditiveLine {
    pub id: String,
    pub brand: String,
    pub name: String,
    pub application: Application,
    /// Stage dose as written in the dataset
    pub stage_dose: String,
    pub per_liter: String,
    /// Point amount for the whole volume (range average)
    pub amount: String,
    /// Scaled range, or the point amount for single values
    pub amount_range: String,
    /// Total to display, with unit, honoring the average/range switch
    pub total: String,
    pub foliar_dose: Option<String>,
    pub is_zero: bool,
}

/// EC/pH targets for display, plus the raw dataset strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub ec: String,
    pub ph: String,
    pub ec_raw: String,
    pub ph_raw: String,
}

impl Recommendation {
    /// Whether a measured EC falls inside the recommended range
    pub fn ec_within(&self, value: f64) -> bool {
        DoseRange::parse(&self.ec_raw).contains(value)
    }

    pub fn ph_within(&self, value: f64) -> bool {
        DoseRange::parse(&self.ph_raw).contains(value)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CalculationResult {
    pub nutrients: Vec<NutrientLine>,
    pub additives: Vec<AdditiveLine>,
    pub recommendations: Option<Recommendation>,
}

impl CalculationResult {
    pub fn root_additives(&self) -> impl Iterator<Item = &AdditiveLine> {
        self.additives
            .iter()
            .filter(|a| a.application == Application::Root)
    }

    pub fn foliar_additives(&self) -> impl Iterator<Item = &AdditiveLine> {
        self.additives
            .iter()
            .filter(|a| a.application == Application::Foliar)
    }

    /// Additives that actually go into the recipe at this stage
    pub fn counted_additives(&self) -> usize {
        self.additives.iter().filter(|a| !a.is_zero).count()
    }

    pub fn is_empty(&self) -> bool {
        self.nutrients.is_empty() && self.additives.is_empty()
    }
}
