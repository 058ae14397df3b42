use crate::coerce::{lenient_flag, lenient_number, lenient_text, same_label};
use crate::gas::GasType;
use serde::{Deserialize, Serialize};

/// One fuel or energy carrier consumed at the installation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EnergyFuelRecord {
    #[serde(deserialize_with = "lenient_text")]
    pub fuel_type: String,
    #[serde(deserialize_with = "lenient_text")]
    pub source: String,
    /// Use-category tag, e.g. "combustion" or "electricity".
    #[serde(deserialize_with = "lenient_text")]
    pub use_category: String,
    #[serde(deserialize_with = "lenient_number")]
    pub consumption: Option<f64>,
    #[serde(deserialize_with = "lenient_text")]
    pub unit: String,
    #[serde(deserialize_with = "lenient_number")]
    pub co2_emission_factor: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub ch4_emission_factor: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub n2o_emission_factor: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub other_gwp_emission_factor: Option<f64>,
    /// Percentage (0-100) of the fuel that is biomass.
    #[serde(deserialize_with = "lenient_number")]
    pub biomass_share: Option<f64>,
    /// Percentage (0-100) of the energy from renewable sources.
    #[serde(deserialize_with = "lenient_number")]
    pub renewable_share: Option<f64>,
    #[serde(deserialize_with = "lenient_flag")]
    pub is_biogenic: bool,
}

impl EnergyFuelRecord {
    /// The record's own factor for `gas`, if one was entered.
    pub fn factor_for(&self, gas: GasType) -> Option<f64> {
        match gas {
            GasType::Co2 => self.co2_emission_factor,
            GasType::Ch4 => self.ch4_emission_factor,
            GasType::N2o => self.n2o_emission_factor,
            GasType::OtherGwp => self.other_gwp_emission_factor,
        }
    }

    /// Biomass records are flagged biogenic or carry the "Biomass" fuel type.
    pub fn is_biomass(&self) -> bool {
        self.is_biogenic || same_label(&self.fuel_type, "Biomass")
    }

    /// Electricity records are tagged by use category or fuel type.
    pub fn is_electricity(&self) -> bool {
        same_label(&self.use_category, "electricity") || same_label(&self.fuel_type, "Electricity")
    }
}
