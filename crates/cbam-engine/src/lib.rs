//! Emissions calculation for CBAM reporting.
//!
//! The engine turns a [`DataSnapshot`](cbam_core::model::DataSnapshot) into a
//! [`ResultsSnapshot`](cbam_core::model::ResultsSnapshot). Every function here
//! is pure and total: incomplete data degrades to zero contributions, never
//! to an error. Validation is a separate, optional pass.

pub mod aggregators;
pub mod composer;
pub mod shares;
pub mod validation;

pub use composer::{calculate_cbam_emissions, Calculator};
pub use validation::{
    validate_calculation_results, validate_calculation_results_with, validate_cbam_data,
    validate_cbam_data_with, Severity, ValidationIssue, ValidationReport,
};
