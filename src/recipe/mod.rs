//! Recipe calculation
//!
//! Turns a settings snapshot into the scaled nutrient and additive amounts
//! plus the EC/pH targets.

mod aggregator;
mod cache;

pub use aggregator::calculate;
pub use cache::MemoizedCalculator;
