//! NutriCalc
//!
//! Prints the nutrient recipe for a settings snapshot as JSON.

use std::io::Read;
use std::path::PathBuf;

use nutricalc::build_info::{self, DatasetSource, StartupInfo};
use nutricalc::catalog::Catalog;
use nutricalc::models::CalculationInput;
use nutricalc::recipe;
use tracing_subscriber::EnvFilter;

/// Brand files from the environment, if any were given
fn get_brand_files() -> Option<Vec<PathBuf>> {
    let raw = std::env::var_os("NUTRICALC_BRAND_FILES")?;
    let files: Vec<PathBuf> = std::env::split_paths(&raw)
        .filter(|p| !p.as_os_str().is_empty())
        .collect();
    if files.is_empty() {
        None
    } else {
        Some(files)
    }
}

fn load_catalog() -> Result<(Catalog, DatasetSource), Box<dyn std::error::Error>> {
    match get_brand_files() {
        Some(files) => {
            let catalog = Catalog::from_files(&files[..])?;
            Ok((catalog, DatasetSource::Files(files.len())))
        }
        None => Ok((Catalog::builtin()?, DatasetSource::Builtin)),
    }
}

/// Settings snapshot from NUTRICALC_SETTINGS, or stdin when unset
fn load_settings() -> Result<CalculationInput, Box<dyn std::error::Error>> {
    let json = match std::env::var_os("NUTRICALC_SETTINGS") {
        Some(path) => {
            eprintln!("Settings: {}", PathBuf::from(&path).display());
            std::fs::read_to_string(path)?
        }
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    if json.trim().is_empty() {
        return Ok(CalculationInput::default());
    }
    Ok(serde_json::from_str(&json)?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logging goes to stderr; stdout carries the recipe
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("nutricalc=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let (catalog, dataset) = load_catalog()?;
    build_info::print_startup_banner(&StartupInfo::new(&catalog, dataset));

    let settings = load_settings()?;

    let result = recipe::calculate(&catalog, &settings);
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
