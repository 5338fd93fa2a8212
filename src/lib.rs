//! NutriCalc Library
//!
//! Nutrient dosing recipes: brand catalog, dose parsing and scaling, and
//! the recipe calculation itself.

pub mod build_info;
pub mod catalog;
pub mod dosing;
pub mod models;
pub mod recipe;
