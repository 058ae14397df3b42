use crate::coerce::{lenient_number, lenient_text};
use serde::{Deserialize, Serialize};

/// An installation-level emission source (boiler, kiln, flare, ...).
///
/// Emissions are either stored directly, derived from an emission factor, or
/// derived from a mass balance of the fuel's calorific value and carbon content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InstallationEmissionSource {
    #[serde(deserialize_with = "lenient_text")]
    pub source_id: String,
    #[serde(deserialize_with = "lenient_text")]
    pub source_type: String,
    #[serde(deserialize_with = "lenient_text")]
    pub fuel_type: String,
    #[serde(deserialize_with = "lenient_number")]
    pub activity_level: Option<f64>,
    #[serde(deserialize_with = "lenient_text")]
    pub unit: String,
    #[serde(deserialize_with = "lenient_number")]
    pub emission_factor: Option<f64>,
    /// CO2 already calculated for this source.
    #[serde(rename = "co2Emissions", deserialize_with = "lenient_number")]
    pub co2_emissions: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub calorific_value: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub carbon_content: Option<f64>,
    /// Fraction (0-1); defaults to 1 when missing.
    #[serde(deserialize_with = "lenient_number")]
    pub oxidation_factor: Option<f64>,
    /// Carbon to CO2 mass ratio; defaults to 44/12 when missing.
    #[serde(deserialize_with = "lenient_number")]
    pub conversion_factor: Option<f64>,
    /// Percentage (0-100) of the carbon that is biogenic.
    #[serde(deserialize_with = "lenient_number")]
    pub biomass_fraction: Option<f64>,
    /// Tonnes of CH4 emitted.
    #[serde(rename = "ch4Emissions", deserialize_with = "lenient_number")]
    pub ch4_emissions: Option<f64>,
    /// Tonnes of N2O emitted.
    #[serde(rename = "n2oEmissions", deserialize_with = "lenient_number")]
    pub n2o_emissions: Option<f64>,
}
