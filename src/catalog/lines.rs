//! Product line grouping
//!
//! Multi-part products (Grow A / Grow B) are selected together as one line.

use crate::models::Nutrient;

/// Nutrients sharing a line key, in dataset order
#[derive(Debug, Clone, PartialEq)]
pub struct ProductLine<'a> {
    pub key: String,
    pub nutrients: Vec<&'a Nutrient>,
}

/// Cluster nutrients into lines, ordered by first appearance
pub fn group_by_line(nutrients: &[Nutrient]) -> Vec<ProductLine<'_>> {
    let mut lines: Vec<ProductLine<'_>> = Vec::new();
    for nutrient in nutrients {
        let key = nutrient.line_key();
        match lines.iter_mut().find(|l| l.key == key) {
            Some(line) => line.nutrients.push(nutrient),
            None => lines.push(ProductLine {
                key,
                nutrients: vec![nutrient],
            }),
        }
    }
    lines
}
