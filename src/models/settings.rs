//! Settings snapshot consumed by the recipe calculation
//!
//! The settings store owns persistence. The calculator only ever sees an
//! immutable `CalculationInput` passed in by the caller.

use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};

use super::growth::{GrowMethod, GrowthStage};
use crate::dosing::sanitize_volume;

/// Display language flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ru,
    En,
    Fr,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Ru => "ru",
            Language::En => "en",
            Language::Fr => "fr",
        }
    }

    pub fn is_russian(&self) -> bool {
        matches!(self, Language::Ru)
    }
}

/// One selected additive. Additive ids are only unique within a brand.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AdditiveSelection {
    pub id: String,
    pub brand: String,
}

impl AdditiveSelection {
    pub fn new(id: impl Into<String>, brand: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            brand: brand.into(),
        }
    }
}

/// Everything the recipe depends on
///
/// Field names follow the settings store's JSON (camelCase). Missing fields
/// take the store's defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalculationInput {
    /// `None` until the grower picks a method ("" in the store)
    #[serde(deserialize_with = "deserialize_grow_method")]
    pub grow_method: Option<GrowMethod>,
    /// Unknown keys fall back to the default stage
    #[serde(deserialize_with = "deserialize_growth_stage")]
    pub growth_stage: GrowthStage,
    /// Single brand used outside pro mode
    pub nutrient_brand: String,
    /// Brands used in pro mode, in selection order
    pub selected_nutrient_brands: Vec<String>,
    /// Liters
    pub water_volume: f64,
    pub selected_additives: Vec<AdditiveSelection>,
    #[serde(rename = "isProMode")]
    pub pro_mode: bool,
    pub language: Language,
    pub show_average_values: bool,
    /// Drop not-recommended entries even in pro mode
    #[serde(rename = "onlyRecommended")]
    pub hide_zero_at_stage: bool,
}

impl Default for CalculationInput {
    fn default() -> Self {
        Self {
            grow_method: None,
            growth_stage: GrowthStage::FlowerDev,
            nutrient_brand: String::new(),
            selected_nutrient_brands: Vec::new(),
            water_volume: 10.0,
            selected_additives: Vec::new(),
            pro_mode: false,
            language: Language::Ru,
            show_average_values: true,
            hide_zero_at_stage: false,
        }
    }
}

fn deserialize_grow_method<'de, D>(deserializer: D) -> Result<Option<GrowMethod>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(GrowMethod::from_str))
}

fn deserialize_growth_stage<'de, D>(deserializer: D) -> Result<GrowthStage, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let stage = raw.as_deref().and_then(GrowthStage::from_str);
    if stage.is_none() {
        tracing::warn!(
            "Unknown growth stage {:?}; using {}",
            raw,
            GrowthStage::default().as_str()
        );
    }
    Ok(stage.unwrap_or_default())
}

impl CalculationInput {
    /// Nutrient brands in processing order
    ///
    /// Pro mode uses the multi-brand selection; otherwise the single brand,
    /// if one is chosen.
    pub fn brands_to_process(&self) -> Vec<&str> {
        if self.pro_mode {
            self.selected_nutrient_brands
                .iter()
                .map(String::as_str)
                .filter(|code| !code.is_empty())
                .collect()
        } else if self.nutrient_brand.is_empty() {
            Vec::new()
        } else {
            vec![self.nutrient_brand.as_str()]
        }
    }

    /// Water volume with negative, NaN and infinite values floored to zero
    pub fn effective_water_volume(&self) -> f64 {
        sanitize_volume(self.water_volume)
    }

    pub fn is_additive_selected(&self, id: &str, brand: &str) -> bool {
        self.selected_additives
            .iter()
            .any(|a| a.id == id && a.brand == brand)
    }

    /// Select the additive, or deselect it if already selected
    pub fn toggle_additive(&mut self, id: &str, brand: &str) {
        if self.is_additive_selected(id, brand) {
            self.selected_additives
                .retain(|a| !(a.id == id && a.brand == brand));
        } else {
            self.selected_additives.push(AdditiveSelection::new(id, brand));
        }
    }

    pub fn toggle_nutrient_brand(&mut self, code: &str) {
        if self.selected_nutrient_brands.iter().any(|c| c == code) {
            self.selected_nutrient_brands.retain(|c| c != code);
        } else {
            self.selected_nutrient_brands.push(code.to_string());
        }
    }

    /// Drop selections that point at brands no longer enabled
    ///
    /// Returns true if anything was removed.
    pub fn retain_enabled_brands(&mut self, enabled: &HashSet<String>) -> bool {
        let before = (
            self.selected_nutrient_brands.len(),
            self.selected_additives.len(),
            self.nutrient_brand.clone(),
        );

        self.selected_nutrient_brands
            .retain(|code| enabled.contains(code));
        self.selected_additives
            .retain(|a| enabled.contains(&a.brand));
        if !self.nutrient_brand.is_empty() && !enabled.contains(&self.nutrient_brand) {
            self.nutrient_brand.clear();
        }

        before
            != (
                self.selected_nutrient_brands.len(),
                self.selected_additives.len(),
                self.nutrient_brand.clone(),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_settings_store() {
        let input = CalculationInput::default();
        assert_eq!(input.grow_method, None);
        assert_eq!(input.growth_stage, GrowthStage::FlowerDev);
        assert_eq!(input.water_volume, 10.0);
        assert_eq!(input.language, Language::Ru);
        assert!(input.show_average_values);
        assert!(!input.pro_mode);
    }

    #[test]
    fn test_deserialize_store_snapshot() {
        let json = r#"{
            "growMethod": "coco",
            "growthStage": "ripening",
            "nutrientBrand": "simplex",
            "waterVolume": 25,
            "selectedAdditives": [{"id": "boost", "brand": "simplex"}],
            "isProMode": true,
            "language": "en",
            "showAverageValues": false,
            "onlyRecommended": true,
            "hideDescriptions": true
        }"#;
        let input: CalculationInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.grow_method, Some(GrowMethod::Coco));
        assert_eq!(input.growth_stage, GrowthStage::Ripening);
        assert_eq!(input.water_volume, 25.0);
        assert_eq!(input.selected_additives, vec![AdditiveSelection::new("boost", "simplex")]);
        assert!(input.pro_mode);
        assert!(input.hide_zero_at_stage);
        assert!(input.selected_nutrient_brands.is_empty());
    }

    #[test]
    fn test_empty_grow_method_means_unset() {
        let input: CalculationInput = serde_json::from_str(r#"{"growMethod": ""}"#).unwrap();
        assert_eq!(input.grow_method, None);
        let input: CalculationInput = serde_json::from_str(r#"{"growMethod": null}"#).unwrap();
        assert_eq!(input.grow_method, None);
    }

    #[test]
    fn test_unknown_growth_stage_falls_back() {
        let input: CalculationInput =
            serde_json::from_str(r#"{"growthStage": "harvest"}"#).unwrap();
        assert_eq!(input.growth_stage, GrowthStage::FlowerDev);

        let input: CalculationInput =
            serde_json::from_str(r#"{"growthStage": "ripening"}"#).unwrap();
        assert_eq!(input.growth_stage, GrowthStage::Ripening);
    }

    #[test]
    fn test_language_codes() {
        for language in [Language::Ru, Language::En, Language::Fr] {
            let json = serde_json::to_string(&language).unwrap();
            assert_eq!(json, format!("\"{}\"", language.as_str()));
        }
    }

    #[test]
    fn test_toggle_nutrient_brand_keeps_selection_order() {
        let mut input = CalculationInput::default();
        input.toggle_nutrient_brand("alpha");
        input.toggle_nutrient_brand("beta");
        input.toggle_nutrient_brand("gamma");
        assert_eq!(input.selected_nutrient_brands, vec!["alpha", "beta", "gamma"]);

        input.toggle_nutrient_brand("beta");
        assert_eq!(input.selected_nutrient_brands, vec!["alpha", "gamma"]);

        input.toggle_nutrient_brand("beta");
        assert_eq!(input.selected_nutrient_brands, vec!["alpha", "gamma", "beta"]);
    }

    #[test]
    fn test_brands_to_process() {
        let mut input = CalculationInput {
            nutrient_brand: "simplex".to_string(),
            selected_nutrient_brands: vec!["b2".to_string(), "simplex".to_string()],
            ..Default::default()
        };
        assert_eq!(input.brands_to_process(), vec!["simplex"]);

        input.pro_mode = true;
        assert_eq!(input.brands_to_process(), vec!["b2", "simplex"]);

        input.pro_mode = false;
        input.nutrient_brand.clear();
        assert!(input.brands_to_process().is_empty());
    }

    #[test]
    fn test_effective_water_volume_floors_bad_values() {
        let mut input = CalculationInput::default();
        input.water_volume = -5.0;
        assert_eq!(input.effective_water_volume(), 0.0);
        input.water_volume = f64::NAN;
        assert_eq!(input.effective_water_volume(), 0.0);
        input.water_volume = f64::INFINITY;
        assert_eq!(input.effective_water_volume(), 0.0);
        input.water_volume = 12.5;
        assert_eq!(input.effective_water_volume(), 12.5);
    }

    #[test]
    fn test_toggle_additive_uses_id_and_brand() {
        let mut input = CalculationInput::default();
        input.toggle_additive("boost", "b1");
        input.toggle_additive("boost", "b2");
        assert_eq!(input.selected_additives.len(), 2);

        input.toggle_additive("boost", "b1");
        assert!(!input.is_additive_selected("boost", "b1"));
        assert!(input.is_additive_selected("boost", "b2"));
    }

    #[test]
    fn test_retain_enabled_brands() {
        let mut input = CalculationInput {
            nutrient_brand: "hidden".to_string(),
            selected_nutrient_brands: vec!["simplex".to_string(), "hidden".to_string()],
            selected_additives: vec![
                AdditiveSelection::new("boost", "simplex"),
                AdditiveSelection::new("root", "hidden"),
            ],
            ..Default::default()
        };
        let enabled: HashSet<String> = ["simplex".to_string()].into_iter().collect();

        assert!(input.retain_enabled_brands(&enabled));
        assert_eq!(input.nutrient_brand, "");
        assert_eq!(input.selected_nutrient_brands, vec!["simplex".to_string()]);
        assert_eq!(input.selected_additives, vec![AdditiveSelection::new("boost", "simplex")]);

        assert!(!input.retain_enabled_brands(&enabled));
    }
}
