//! Brand registry
//!
//! Built once at startup from an explicit list of JSON sources and read-only
//! afterwards. Lookups never fail: unknown brands, methods and stages read as
//! empty.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::lines::{group_by_line, ProductLine};
use crate::models::{Additive, AdditiveSelection, Brand, EcPh, GrowMethod, GrowthStage, Nutrient};

/// Dataset bundled with the crate
const BUILTIN_SOURCES: &[(&str, &str)] = &[(
    "simplex.json",
    include_str!("../../data/brands/simplex.json"),
)];

/// Catalog error types
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read brand file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid brand data in {source_name}: {source}")]
    Parse {
        source_name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Brand code '{0}' is registered twice")]
    DuplicateBrand(String),
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Read-only lookup over brand records
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    brands: Vec<Brand>,
    index: HashMap<String, usize>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog of the brands shipped with the crate
    pub fn builtin() -> CatalogResult<Self> {
        Self::from_sources(BUILTIN_SOURCES.iter().copied())
    }

    /// Build from (source name, JSON text) pairs, in order
    pub fn from_sources<'a, I>(sources: I) -> CatalogResult<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut catalog = Self::new();
        for (name, json) in sources {
            let brand: Brand =
                serde_json::from_str(json).map_err(|source| CatalogError::Parse {
                    source_name: name.to_string(),
                    source,
                })?;
            catalog.register(brand)?;
        }
        tracing::info!("Loaded {} brand(s) into catalog", catalog.brands.len());
        Ok(catalog)
    }

    /// Build from brand JSON files, in the order given
    pub fn from_files<P: AsRef<Path>>(paths: &[P]) -> CatalogResult<Self> {
        let mut contents = Vec::with_capacity(paths.len());
        for path in paths {
            let path = path.as_ref();
            let json = fs::read_to_string(path).map_err(|source| CatalogError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            contents.push((path.display().to_string(), json));
        }
        Self::from_sources(
            contents
                .iter()
                .map(|(name, json)| (name.as_str(), json.as_str())),
        )
    }

    /// Add a brand; codes must be unique
    pub fn register(&mut self, brand: Brand) -> CatalogResult<()> {
        if self.index.contains_key(&brand.code) {
            return Err(CatalogError::DuplicateBrand(brand.code));
        }
        tracing::debug!(
            "Registered brand '{}' with {} additive(s)",
            brand.code,
            brand.additives.len()
        );
        self.index.insert(brand.code.clone(), self.brands.len());
        self.brands.push(brand);
        Ok(())
    }

    /// All brands in registration order
    pub fn brands(&self) -> &[Brand] {
        &self.brands
    }

    /// Brands whose code is in the enabled set, in registration order
    pub fn visible_brands(&self, enabled: &HashSet<String>) -> Vec<&Brand> {
        self.brands
            .iter()
            .filter(|b| enabled.contains(&b.code))
            .collect()
    }

    pub fn get_brand(&self, code: &str) -> Option<&Brand> {
        self.index.get(code).map(|&i| &self.brands[i])
    }

    pub fn get_nutrients(&self, code: &str, stage: GrowthStage, method: GrowMethod) -> &[Nutrient] {
        self.get_brand(code)
            .map(|b| b.nutrients_for(stage, method))
            .unwrap_or(&[])
    }

    pub fn get_ec_ph(&self, code: &str, stage: GrowthStage, method: GrowMethod) -> Option<&EcPh> {
        self.get_brand(code)?.ec_ph_for(stage, method)
    }

    pub fn get_additives(&self, code: &str) -> &[Additive] {
        self.get_brand(code)
            .map(|b| b.additives.as_slice())
            .unwrap_or(&[])
    }

    /// Resolve a selection against its own brand's additive list only
    pub fn find_additive(&self, selection: &AdditiveSelection) -> Option<&Additive> {
        self.get_brand(&selection.brand)?.additive(&selection.id)
    }

    /// Nutrients at (method, stage) clustered into product lines
    pub fn nutrient_lines(
        &self,
        code: &str,
        stage: GrowthStage,
        method: GrowMethod,
    ) -> Vec<ProductLine<'_>> {
        group_by_line(self.get_nutrients(code, stage, method))
    }
}
