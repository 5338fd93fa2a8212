//! Build and dataset metadata shown at startup
//!
//! `build.rs` stamps the build counter, timestamp and profile into the
//! binary; the dataset half comes from the catalog actually loaded.

use serde::Serialize;

use crate::catalog::Catalog;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build timestamp in ISO 8601 format
pub const BUILD_TIMESTAMP: &str = match option_env!("NUTRICALC_BUILD_TIMESTAMP") {
    Some(s) => s,
    None => "unknown",
};

/// Cargo profile the binary was built with
pub const BUILD_PROFILE: &str = match option_env!("NUTRICALC_BUILD_PROFILE") {
    Some(s) => s,
    None => "unknown",
};

/// Build counter, incremented on each recompilation
pub fn build_number() -> Option<u64> {
    option_env!("NUTRICALC_BUILD_NUMBER")?.trim().parse().ok()
}

/// Where the brand records came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetSource {
    /// Records compiled into the binary
    Builtin,
    /// Brand JSON files listed in `NUTRICALC_BRAND_FILES`
    Files(usize),
}

impl DatasetSource {
    pub fn describe(&self) -> String {
        match self {
            DatasetSource::Builtin => "built-in".to_string(),
            DatasetSource::Files(1) => "1 file".to_string(),
            DatasetSource::Files(n) => format!("{} files", n),
        }
    }
}

/// What the binary reports about itself before computing
#[derive(Debug, Clone, Serialize)]
pub struct StartupInfo {
    pub version: &'static str,
    pub build_number: Option<u64>,
    pub build_timestamp: &'static str,
    pub build_profile: &'static str,
    pub dataset: DatasetSource,
    /// Brand codes in registration order
    pub brands: Vec<String>,
}

impl StartupInfo {
    pub fn new(catalog: &Catalog, dataset: DatasetSource) -> Self {
        Self {
            version: VERSION,
            build_number: build_number(),
            build_timestamp: BUILD_TIMESTAMP,
            build_profile: BUILD_PROFILE,
            dataset,
            brands: catalog.brands().iter().map(|b| b.code.clone()).collect(),
        }
    }

    pub fn banner_lines(&self) -> Vec<String> {
        let build = self
            .build_number
            .map_or_else(|| "dev".to_string(), |n| format!("#{}", n));
        let brands = if self.brands.is_empty() {
            "none".to_string()
        } else {
            self.brands.join(", ")
        };

        vec![
            format!("NutriCalc {} ({} build {})", self.version, self.build_profile, build),
            format!("Compiled: {}", self.build_timestamp),
            format!(
                "Dataset: {}, {} brand(s): {}",
                self.dataset.describe(),
                self.brands.len(),
                brands
            ),
        ]
    }
}

/// Print the startup banner to stderr
pub fn print_startup_banner(info: &StartupInfo) {
    let lines = info.banner_lines();
    let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) + 4;
    eprintln!("{}", "=".repeat(width));
    for line in &lines {
        eprintln!("  {}", line);
    }
    eprintln!("{}", "=".repeat(width));
}
