//! Brand catalog module
//!
//! Read-only access to the static brand dataset.

pub mod lines;
pub mod registry;

pub use lines::{group_by_line, ProductLine};
pub use registry::{Catalog, CatalogError, CatalogResult};
