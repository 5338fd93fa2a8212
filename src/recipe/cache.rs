//! Memoized recipe calculation
//!
//! Screens re-render far more often than settings change; the last
//! result is reused until the input differs.

use super::aggregator::calculate;
use crate::catalog::Catalog;
use crate::models::{CalculationInput, CalculationResult};

/// Caches the result of the most recent input
#[derive(Debug)]
pub struct MemoizedCalculator<'a> {
    catalog: &'a Catalog,
    last: Option<(CalculationInput, CalculationResult)>,
    computations: usize,
}

impl<'a> MemoizedCalculator<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            last: None,
            computations: 0,
        }
    }

    /// Result for `input`, recomputed only when it differs from the last one
    pub fn calculate(&mut self, input: &CalculationInput) -> &CalculationResult {
        let fresh = matches!(&self.last, Some((seen, _)) if seen == input);
        if !fresh {
            self.last = None;
        }

        let catalog = self.catalog;
        let computations = &mut self.computations;
        let (_, result) = self.last.get_or_insert_with(|| {
            *computations += 1;
            (input.clone(), calculate(catalog, input))
        });
        result
    }

    /// Number of times the recipe was actually computed
    pub fn computations(&self) -> usize {
        self.computations
    }

    pub fn clear(&mut self) {
        self.last = None;
    }
}
