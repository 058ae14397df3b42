//! CBAM emissions calculation engine.
//!
//! Pass the complete form state in, get a results snapshot out:
//!
//! ```
//! use cbam::{calculate_cbam_emissions, validate_calculation_results, DataSnapshot};
//!
//! let data = DataSnapshot::from_json(
//!     r#"{"energyFuelData": [{"fuelType": "Natural gas", "consumption": 100, "unit": "GJ"}]}"#,
//! )
//! .unwrap();
//! let results = calculate_cbam_emissions(&data);
//!
//! assert!((results.total_direct_co2_emissions - 5610.0).abs() < 1e-9);
//! assert!(validate_calculation_results(&results).is_valid);
//! ```
//!
//! The data model, factor tables and parameters live in `cbam-core`; the
//! aggregators, composer and validation in `cbam-engine`.

pub use cbam_core::errors::{CbamError, CbamResult};
pub use cbam_core::factors::{
    default_embedded_emission_factor, default_fuel_emission_factor,
    default_process_emission_factor, EmissionFactorOverride,
};
pub use cbam_core::model::{DataSnapshot, ResultsSnapshot};
pub use cbam_core::parameters::EngineParameters;
pub use cbam_engine::{
    calculate_cbam_emissions, validate_calculation_results, validate_cbam_data, Calculator,
    Severity, ValidationIssue, ValidationReport,
};
