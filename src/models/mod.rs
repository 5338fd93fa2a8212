//! Data models
//!
//! Dataset records, the settings snapshot and calculated results.

mod brand;
mod growth;
mod result;
mod settings;

pub use brand::{Additive, Application, Brand, EcPh, Nutrient};
pub use growth::{GrowMethod, GrowthStage};
pub use result::{AdditiveLine, CalculationResult, NutrientLine, Recommendation};
pub use settings::{AdditiveSelection, CalculationInput, Language};
