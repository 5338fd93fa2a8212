//! Recipe aggregation
//!
//! Maps a settings snapshot onto the brand catalog and produces the scaled
//! recipe. Pure: the same catalog and input always give the same result.

use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::dosing::{
    categorize_unit, format_amount, format_amount_range, format_fixed, is_zero_dose, parse_dose,
    scale, strip_per_liter, unit_suffix, DisplayPolicy, ParsedDose, ADDITIVE_AVERAGE_DECIMALS,
    NUTRIENT_AVERAGE_DECIMALS, PLACEHOLDER, TARGET_AVERAGE_DECIMALS,
};
use crate::models::{
    Additive, AdditiveLine, AdditiveSelection, Application, CalculationInput, CalculationResult,
    EcPh, GrowMethod, Language, Nutrient, NutrientLine, Recommendation,
};

/// Per-call values shared by every line item
struct Context<'a> {
    input: &'a CalculationInput,
    liters: f64,
    policy: DisplayPolicy,
}

impl Context<'_> {
    /// Zero entries are listed (struck through) only in pro mode
    fn keeps_zero_entries(&self) -> bool {
        self.input.pro_mode && !self.input.hide_zero_at_stage
    }

    fn language(&self) -> Language {
        self.input.language
    }
}

/// Compute the recipe for a settings snapshot
///
/// Missing brands, stages and additives shrink the result instead of
/// failing it.
pub fn calculate(catalog: &Catalog, input: &CalculationInput) -> CalculationResult {
    let liters = input.effective_water_volume();
    if liters != input.water_volume {
        warn!(
            "Water volume {} is not a usable amount of liters; using 0",
            input.water_volume
        );
    }

    let ctx = Context {
        input,
        liters,
        policy: DisplayPolicy::from_show_average(input.show_average_values),
    };

    let brands = input.brands_to_process();
    let mut result = CalculationResult::default();

    if let Some(method) = input.grow_method {
        result.nutrients = brands
            .iter()
            .flat_map(|code| nutrient_lines(catalog, code, method, &ctx))
            .collect();

        // Targets come from the first brand only; there is no blending
        result.recommendations = brands
            .first()
            .and_then(|code| catalog.get_ec_ph(code, input.growth_stage, method))
            .map(|ec_ph| recommendation(ec_ph, ctx.policy));
    }

    result.additives = input
        .selected_additives
        .iter()
        .filter_map(|selection| additive_line(catalog, selection, &ctx))
        .collect();

    debug!(
        "Recipe for {} at {:.2}L ({}): {} nutrient(s), {} additive(s), targets: {}",
        input.growth_stage.as_str(),
        liters,
        input.language.as_str(),
        result.nutrients.len(),
        result.additives.len(),
        result.recommendations.is_some()
    );

    result
}

fn nutrient_lines(
    catalog: &Catalog,
    code: &str,
    method: GrowMethod,
    ctx: &Context<'_>,
) -> Vec<NutrientLine> {
    if catalog.get_brand(code).is_none() {
        warn!("Nutrient brand '{}' is not in the catalog", code);
        return Vec::new();
    }

    catalog
        .get_nutrients(code, ctx.input.growth_stage, method)
        .iter()
        .filter_map(|nutrient| nutrient_line(code, nutrient, ctx))
        .collect()
}

fn nutrient_line(brand: &str, nutrient: &Nutrient, ctx: &Context<'_>) -> Option<NutrientLine> {
    let dose = parse_dose(&nutrient.per_liter);
    if dose.malformed {
        warn!(
            "Nutrient '{}' ({}) has unreadable dose '{}'; treating as zero",
            nutrient.name, brand, nutrient.per_liter
        );
    }

    let line = nutrient.line_key();

    if dose.is_zero() {
        if !ctx.keeps_zero_entries() {
            return None;
        }
        return Some(NutrientLine {
            brand: brand.to_string(),
            name: nutrient.name.clone(),
            line,
            per_liter: PLACEHOLDER.to_string(),
            amount: PLACEHOLDER.to_string(),
            is_zero: true,
        });
    }

    let scaled = scale(dose.range(), ctx.liters);
    let (per_liter, amount) = match (dose.is_range, ctx.policy) {
        (true, DisplayPolicy::Average) => (
            format!(
                "{}{}",
                format_fixed(dose.average(), NUTRIENT_AVERAGE_DECIMALS),
                dose.unit.as_deref().unwrap_or("")
            ),
            format_amount(scaled.average()),
        ),
        (true, DisplayPolicy::Range) => (
            nutrient.per_liter.clone(),
            format_amount_range(scaled.amount_min, scaled.amount_max),
        ),
        (false, _) => (nutrient.per_liter.clone(), format_amount(scaled.amount_min)),
    };

    Some(NutrientLine {
        brand: brand.to_string(),
        name: nutrient.name.clone(),
        line,
        per_liter,
        amount,
        is_zero: false,
    })
}

fn additive_line(
    catalog: &Catalog,
    selection: &AdditiveSelection,
    ctx: &Context<'_>,
) -> Option<AdditiveLine> {
    let Some(additive) = catalog.find_additive(selection) else {
        warn!(
            "Selected additive '{}' not found in brand '{}'; skipping",
            selection.id, selection.brand
        );
        return None;
    };

    let stage_dose = additive.stage_dose(ctx.input.growth_stage);
    if is_zero_dose(stage_dose) {
        if !ctx.keeps_zero_entries() {
            return None;
        }
        return Some(zero_additive_line(selection, additive));
    }

    let dose = parse_dose(stage_dose);
    if dose.malformed {
        warn!(
            "{} additive '{}' ({}) has unreadable dose '{}' at {}; treating as zero",
            additive.application().as_str(),
            additive.id,
            selection.brand,
            stage_dose,
            ctx.input.growth_stage.as_str()
        );
    }

    let scaled = scale(dose.range(), ctx.liters);
    let unit = unit_suffix(ctx.language());
    let amount = format_amount(scaled.average());
    let amount_range = if dose.is_range {
        format_amount_range(scaled.amount_min, scaled.amount_max)
    } else {
        amount.clone()
    };
    let total = match (dose.is_range, ctx.policy) {
        (true, DisplayPolicy::Range) => format!("{}{}", amount_range, unit),
        _ => format!("{}{}", amount, unit),
    };

    let application = additive.application();
    let per_liter = match application {
        Application::Root => per_liter_display(&dose, ctx),
        Application::Foliar if additive.default_dose.trim().is_empty() => PLACEHOLDER.to_string(),
        Application::Foliar => per_liter_display(&parse_dose(&additive.default_dose), ctx),
    };

    Some(AdditiveLine {
        id: additive.id.clone(),
        brand: selection.brand.clone(),
        name: additive.name.clone(),
        application,
        stage_dose: stage_dose.to_string(),
        per_liter,
        amount,
        amount_range,
        total,
        foliar_dose: additive.foliar_dose.clone(),
        is_zero: false,
    })
}

fn zero_additive_line(selection: &AdditiveSelection, additive: &Additive) -> AdditiveLine {
    AdditiveLine {
        id: additive.id.clone(),
        brand: selection.brand.clone(),
        name: additive.name.clone(),
        application: additive.application(),
        stage_dose: PLACEHOLDER.to_string(),
        per_liter: PLACEHOLDER.to_string(),
        amount: PLACEHOLDER.to_string(),
        amount_range: PLACEHOLDER.to_string(),
        total: PLACEHOLDER.to_string(),
        foliar_dose: additive.foliar_dose.clone(),
        is_zero: true,
    }
}

/// Per-liter text for an additive dose
///
/// Milliliter doses (or bare numbers) get the locale's suffix; other units
/// such as grams are kept as written.
fn per_liter_display(dose: &ParsedDose, ctx: &Context<'_>) -> String {
    let unit = match dose.unit.as_deref() {
        Some(raw) if !categorize_unit(raw).is_localizable() => strip_per_liter(raw),
        _ => unit_suffix(ctx.language()),
    };

    if dose.is_range && ctx.policy == DisplayPolicy::Average {
        format!(
            "{}{}",
            format_fixed(dose.average(), ADDITIVE_AVERAGE_DECIMALS),
            unit
        )
    } else {
        format!("{}{}", dose.body, unit)
    }
}

fn recommendation(ec_ph: &EcPh, policy: DisplayPolicy) -> Recommendation {
    Recommendation {
        ec: target_display(&ec_ph.ec, policy),
        ph: target_display(&ec_ph.ph, policy),
        ec_raw: ec_ph.ec.clone(),
        ph_raw: ec_ph.ph.clone(),
    }
}

/// A target range collapses to its midpoint when averaging
fn target_display(raw: &str, policy: DisplayPolicy) -> String {
    if policy == DisplayPolicy::Range {
        return raw.to_string();
    }
    let dose = parse_dose(raw);
    if dose.is_range && !dose.malformed {
        format_fixed(dose.average(), TARGET_AVERAGE_DECIMALS)
    } else {
        raw.to_string()
    }
}
