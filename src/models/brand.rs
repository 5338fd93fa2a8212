//! Brand dataset records
//!
//! These structs mirror the brand JSON files field for field. Absent fields
//! stay absent when a record is written back out.
//!
//! Stage and method tables are read leniently: keys outside the canonical
//! sets are skipped with a warning and a `null` dose reads as empty.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use super::growth::{GrowMethod, GrowthStage};
use super::settings::Language;
use crate::dosing::is_zero_dose;

/// How an additive is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Application {
    /// Diluted into the feed water, dosed per liter
    Root,
    /// Sprayed on leaves, dosed in drops/sprays
    Foliar,
}

impl Application {
    pub fn as_str(&self) -> &'static str {
        match self {
            Application::Root => "root",
            Application::Foliar => "foliar",
        }
    }

    /// Anything other than "foliar" is watered in at the root
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "foliar" => Application::Foliar,
            _ => Application::Root,
        }
    }
}

/// A base nutrient product at one (method, stage)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nutrient {
    pub name: String,
    /// Per-liter dose, e.g. "2.0ml" or "0.5-2.0ml"
    #[serde(rename = "perLiter")]
    pub per_liter: String,
    /// Product line key for multi-part lines (A/B/C components)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<String>,
}

impl Nutrient {
    /// Line this nutrient belongs to
    ///
    /// Falls back to the name with a trailing part letter removed, so
    /// "Grow A" and "Grow B" cluster under "Grow".
    pub fn line_key(&self) -> String {
        if let Some(line) = self.line.as_deref().map(str::trim).filter(|l| !l.is_empty()) {
            return line.to_string();
        }
        strip_part_suffix(&self.name).to_string()
    }
}

fn strip_part_suffix(name: &str) -> &str {
    let trimmed = name.trim_end();
    let mut chars = trimmed.chars().rev();
    match (chars.next(), chars.next()) {
        (Some('A' | 'B' | 'C' | 'D'), Some(sep)) if sep.is_whitespace() => {
            trimmed[..trimmed.len() - 1].trim_end()
        }
        _ => trimmed,
    }
}

/// EC and pH targets, each a single value or a range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcPh {
    pub ec: String,
    pub ph: String,
}

/// A supplement with a per-stage dose table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Additive {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_ru: Option<String>,
    /// "root" or "foliar"; kept as written in the data file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application: Option<String>,
    #[serde(rename = "defaultDose", default, skip_serializing_if = "String::is_empty")]
    pub default_dose: String,
    /// Drops/sprays text for foliar use
    #[serde(rename = "foliarDose", default, skip_serializing_if = "Option::is_none")]
    pub foliar_dose: Option<String>,
    #[serde(
        default,
        deserialize_with = "stage_doses",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub stages: BTreeMap<GrowthStage, String>,
}

impl Additive {
    pub fn application(&self) -> Application {
        self.application
            .as_deref()
            .map(Application::from_str)
            .unwrap_or(Application::Root)
    }

    /// Dose at a stage; a missing entry reads as empty (not recommended)
    pub fn stage_dose(&self, stage: GrowthStage) -> &str {
        self.stages.get(&stage).map(String::as_str).unwrap_or("")
    }

    pub fn is_recommended_at(&self, stage: GrowthStage) -> bool {
        !is_zero_dose(self.stage_dose(stage))
    }

    pub fn description_for(&self, language: Language) -> &str {
        localized(&self.description, self.description_ru.as_deref(), language)
    }
}

/// A supplier with its nutrient, EC/pH and additive tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_ru: Option<String>,
    #[serde(
        default,
        deserialize_with = "method_stage_table",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub nutrients: BTreeMap<GrowMethod, BTreeMap<GrowthStage, Vec<Nutrient>>>,
    #[serde(
        rename = "ecPh",
        default,
        deserialize_with = "method_stage_table",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub ec_ph: BTreeMap<GrowMethod, BTreeMap<GrowthStage, EcPh>>,
    #[serde(default)]
    pub additives: Vec<Additive>,
}

impl Brand {
    pub fn nutrients_for(&self, stage: GrowthStage, method: GrowMethod) -> &[Nutrient] {
        self.nutrients
            .get(&method)
            .and_then(|stages| stages.get(&stage))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn ec_ph_for(&self, stage: GrowthStage, method: GrowMethod) -> Option<&EcPh> {
        self.ec_ph.get(&method).and_then(|stages| stages.get(&stage))
    }

    pub fn additive(&self, id: &str) -> Option<&Additive> {
        self.additives.iter().find(|a| a.id == id)
    }

    pub fn description_for(&self, language: Language) -> &str {
        localized(
            self.description.as_deref().unwrap_or(""),
            self.description_ru.as_deref(),
            language,
        )
    }
}

fn localized<'a>(english: &'a str, russian: Option<&'a str>, language: Language) -> &'a str {
    match russian {
        Some(ru) if language.is_russian() && !ru.is_empty() => ru,
        _ => english,
    }
}

/// Keep entries whose key parses; warn about the rest
fn known_keys<K: Ord, V>(
    raw: BTreeMap<String, V>,
    parse: fn(&str) -> Option<K>,
    kind: &str,
) -> BTreeMap<K, V> {
    raw.into_iter()
        .filter_map(|(key, value)| match parse(&key) {
            Some(parsed) => Some((parsed, value)),
            None => {
                warn!("Skipping unknown {} '{}' in brand data", kind, key);
                None
            }
        })
        .collect()
}

fn stage_doses<'de, D>(deserializer: D) -> Result<BTreeMap<GrowthStage, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, Option<String>>> = Option::deserialize(deserializer)?;
    let doses = raw
        .unwrap_or_default()
        .into_iter()
        .map(|(stage, dose)| (stage, dose.unwrap_or_default()))
        .collect();
    Ok(known_keys(doses, GrowthStage::from_str, "growth stage"))
}

fn method_stage_table<'de, D, V>(
    deserializer: D,
) -> Result<BTreeMap<GrowMethod, BTreeMap<GrowthStage, V>>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    let raw: Option<BTreeMap<String, Option<BTreeMap<String, V>>>> =
        Option::deserialize(deserializer)?;
    let methods = known_keys(raw.unwrap_or_default(), GrowMethod::from_str, "grow method");
    Ok(methods
        .into_iter()
        .map(|(method, stages)| {
            let stages = known_keys(
                stages.unwrap_or_default(),
                GrowthStage::from_str,
                "growth stage",
            );
            (method, stages)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_additive() -> Additive {
        serde_json::from_str(
            r#"{
                "id": "boost",
                "name": "Boost",
                "description": "Bloom booster",
                "description_ru": "Стимулятор цветения",
                "application": "root",
                "defaultDose": "1ml",
                "stages": {
                    "germination": "0",
                    "vegetative": "0.5ml",
                    "flower-dev": "1-2ml"
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_missing_stage_entry_reads_as_empty() {
        let additive = sample_additive();
        assert_eq!(additive.stage_dose(GrowthStage::Vegetative), "0.5ml");
        assert_eq!(additive.stage_dose(GrowthStage::Ripening), "");
        assert!(!additive.is_recommended_at(GrowthStage::Ripening));
        assert!(!additive.is_recommended_at(GrowthStage::Germination));
        assert!(additive.is_recommended_at(GrowthStage::FlowerDev));
    }

    #[test]
    fn test_application_parsing() {
        assert_eq!(Application::from_str("foliar"), Application::Foliar);
        assert_eq!(Application::from_str("Root"), Application::Root);
        assert_eq!(Application::from_str("drench"), Application::Root);
        assert_eq!(Application::from_str(Application::Foliar.as_str()), Application::Foliar);

        let mut additive = sample_additive();
        additive.application = None;
        assert_eq!(additive.application(), Application::Root);
    }

    #[test]
    fn test_localized_description_falls_back_to_english() {
        let mut additive = sample_additive();
        assert_eq!(additive.description_for(Language::Ru), "Стимулятор цветения");
        assert_eq!(additive.description_for(Language::En), "Bloom booster");
        additive.description_ru = None;
        assert_eq!(additive.description_for(Language::Ru), "Bloom booster");
    }

    #[test]
    fn test_line_key() {
        let part = |name: &str, line: Option<&str>| Nutrient {
            name: name.to_string(),
            per_liter: "1ml".to_string(),
            line: line.map(str::to_string),
        };
        assert_eq!(part("Grow A", None).line_key(), "Grow");
        assert_eq!(part("Grow  B ", None).line_key(), "Grow");
        assert_eq!(part("Bloom", None).line_key(), "Bloom");
        assert_eq!(part("Vitamin E", None).line_key(), "Vitamin E");
        assert_eq!(part("Grow A", Some("Simplex Grow")).line_key(), "Simplex Grow");
    }

    #[test]
    fn test_brand_json_keeps_field_names() {
        let json = r#"{
            "code": "simplex",
            "name": "Simplex",
            "nutrients": {"coco": {"flower-dev": [{"name": "GrowA", "perLiter": "2.0ml"}]}},
            "ecPh": {"coco": {"flower-dev": {"ec": "1.2-1.8", "ph": "5.8-6.2"}}},
            "additives": []
        }"#;
        let brand: Brand = serde_json::from_str(json).unwrap();
        assert_eq!(
            brand.nutrients_for(GrowthStage::FlowerDev, GrowMethod::Coco)[0].per_liter,
            "2.0ml"
        );
        assert!(brand.nutrients_for(GrowthStage::Germination, GrowMethod::Coco).is_empty());
        assert!(brand.ec_ph_for(GrowthStage::FlowerDev, GrowMethod::Soil).is_none());

        let value = serde_json::to_value(&brand).unwrap();
        assert!(value.get("ecPh").is_some());
        assert_eq!(
            value["nutrients"]["coco"]["flower-dev"][0]["perLiter"],
            serde_json::json!("2.0ml")
        );
    }

    #[test]
    fn test_unknown_table_keys_are_skipped() {
        let json = r#"{
            "code": "odd",
            "name": "Odd",
            "nutrients": {
                "coco": {
                    "flower-dev": [{"name": "Base", "perLiter": "2ml"}],
                    "harvest": [{"name": "Late", "perLiter": "1ml"}]
                },
                "aero": {"flower-dev": [{"name": "Mist", "perLiter": "1ml"}]}
            },
            "ecPh": {"aero": {"flower-dev": {"ec": "1.0", "ph": "6.0"}}},
            "additives": [{
                "id": "calmag",
                "name": "CalMag",
                "stages": {"flower-dev": "1ml", "harvest": "0", "ripening": null}
            }]
        }"#;
        let brand: Brand = serde_json::from_str(json).unwrap();

        assert_eq!(
            brand.nutrients_for(GrowthStage::FlowerDev, GrowMethod::Coco)[0].name,
            "Base"
        );
        assert_eq!(brand.nutrients.len(), 1);
        assert_eq!(brand.nutrients[&GrowMethod::Coco].len(), 1);
        assert!(brand.ec_ph.is_empty());

        let additive = brand.additive("calmag").unwrap();
        assert_eq!(additive.stage_dose(GrowthStage::FlowerDev), "1ml");
        assert_eq!(additive.stage_dose(GrowthStage::Ripening), "");
        assert_eq!(additive.stages.len(), 2);
    }

    #[test]
    fn test_absent_fields_stay_absent_on_write() {
        let json = r#"{
            "code": "w",
            "name": "W",
            "additives": [{"id": "a", "name": "A"}]
        }"#;
        let brand: Brand = serde_json::from_str(json).unwrap();
        let value = serde_json::to_value(&brand).unwrap();

        assert!(value.get("nutrients").is_none());
        assert!(value.get("ecPh").is_none());
        let additive = &value["additives"][0];
        assert!(additive.get("description").is_none());
        assert!(additive.get("defaultDose").is_none());
        assert!(additive.get("stages").is_none());

        let reread: Brand = serde_json::from_value(value).unwrap();
        assert_eq!(reread, brand);
    }
}
