//! Canonical grow methods and growth stages
//!
//! Both sets are fixed. Growth stages are ordered from germination to flushing.

use serde::{Deserialize, Serialize};

use super::settings::Language;

/// Cultivation medium
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrowMethod {
    Soil,
    Hydroponic,
    Coco,
}

impl GrowMethod {
    pub const ALL: [GrowMethod; 3] = [GrowMethod::Soil, GrowMethod::Hydroponic, GrowMethod::Coco];

    pub fn as_str(&self) -> &'static str {
        match self {
            GrowMethod::Soil => "soil",
            GrowMethod::Hydroponic => "hydroponic",
            GrowMethod::Coco => "coco",
        }
    }

    /// Parse a dataset/settings key; unknown or empty keys yield `None`
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "soil" => Some(GrowMethod::Soil),
            "hydroponic" => Some(GrowMethod::Hydroponic),
            "coco" => Some(GrowMethod::Coco),
            _ => None,
        }
    }

    pub fn label(&self, language: Language) -> &'static str {
        match (self, language.is_russian()) {
            (GrowMethod::Soil, false) => "Soil",
            (GrowMethod::Hydroponic, false) => "Hydroponic",
            (GrowMethod::Coco, false) => "Coco",
            (GrowMethod::Soil, true) => "Почва",
            (GrowMethod::Hydroponic, true) => "Гидропоника",
            (GrowMethod::Coco, true) => "Кокос",
        }
    }

    pub fn description(&self, language: Language) -> &'static str {
        match (self, language.is_russian()) {
            (GrowMethod::Soil, false) => "Traditional soil-based growing method",
            (GrowMethod::Hydroponic, false) => "Water-based growing method without soil",
            (GrowMethod::Coco, false) => "Coconut coir-based growing method",
            (GrowMethod::Soil, true) => "Традиционный метод выращивания в почве",
            (GrowMethod::Hydroponic, true) => "Метод выращивания на водной основе без почвы",
            (GrowMethod::Coco, true) => "Метод выращивания на основе кокосового субстрата",
        }
    }
}

/// Plant lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GrowthStage {
    Germination,
    Vegetative,
    PreFlowering,
    FloweringStart,
    FlowerDev,
    Ripening,
    Flushing,
}

impl Default for GrowthStage {
    fn default() -> Self {
        GrowthStage::FlowerDev
    }
}

impl GrowthStage {
    /// All stages in lifecycle order
    pub const ALL: [GrowthStage; 7] = [
        GrowthStage::Germination,
        GrowthStage::Vegetative,
        GrowthStage::PreFlowering,
        GrowthStage::FloweringStart,
        GrowthStage::FlowerDev,
        GrowthStage::Ripening,
        GrowthStage::Flushing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GrowthStage::Germination => "germination",
            GrowthStage::Vegetative => "vegetative",
            GrowthStage::PreFlowering => "pre-flowering",
            GrowthStage::FloweringStart => "flowering-start",
            GrowthStage::FlowerDev => "flower-dev",
            GrowthStage::Ripening => "ripening",
            GrowthStage::Flushing => "flushing",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        let key = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|stage| stage.as_str() == key)
    }

    pub fn label(&self, language: Language) -> &'static str {
        if language.is_russian() {
            match self {
                GrowthStage::Germination => "Прорастание и укоренение",
                GrowthStage::Vegetative => "Вегетативный рост",
                GrowthStage::PreFlowering => "Предцветение",
                GrowthStage::FloweringStart => "Начало цветения",
                GrowthStage::FlowerDev => "Развитие цветка",
                GrowthStage::Ripening => "Созревание",
                GrowthStage::Flushing => "Промывка",
            }
        } else {
            match self {
                GrowthStage::Germination => "Germination & Rooting",
                GrowthStage::Vegetative => "Vegetative Growth",
                GrowthStage::PreFlowering => "Pre-Flowering",
                GrowthStage::FloweringStart => "Flowering Start",
                GrowthStage::FlowerDev => "Flower Development",
                GrowthStage::Ripening => "Ripening",
                GrowthStage::Flushing => "Flushing",
            }
        }
    }

    pub fn description(&self, language: Language) -> &'static str {
        if language.is_russian() {
            match self {
                GrowthStage::Germination => "Появление первой пары листьев",
                GrowthStage::Vegetative => "Набор зеленой массы растения",
                GrowthStage::PreFlowering => "Набор зеленой массы, начало формирования соцветий",
                GrowthStage::FloweringStart => "Замедление роста, развитие соцветий",
                GrowthStage::FlowerDev => "Уплотнение соцветий, прекращение вертикального роста",
                GrowthStage::Ripening => "Прекращение роста соцветий",
                GrowthStage::Flushing => "Подготовка к сбору урожая",
            }
        } else {
            match self {
                GrowthStage::Germination => "First pair of leaves appearing",
                GrowthStage::Vegetative => "Building plant green mass",
                GrowthStage::PreFlowering => {
                    "Building plant green mass, beginning of inflorescence formation"
                }
                GrowthStage::FloweringStart => "Plant growth slowing, inflorescence development",
                GrowthStage::FlowerDev => {
                    "Inflorescence densification, stopping vertical plant growth"
                }
                GrowthStage::Ripening => "Stopping inflorescence growth",
                GrowthStage::Flushing => "Preparing for harvest",
            }
        }
    }
}
