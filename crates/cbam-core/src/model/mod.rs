//! Input records and the results snapshot.
//!
//! Every record deserializes from the camelCase JSON produced by the form
//! collaborator. Numeric fields are `Option<f64>` and are read through
//! [`crate::coerce`], so a snapshot taken in the middle of data entry always
//! decodes.

mod energy;
mod installation;
mod precursor;
mod process;
mod results;

pub use energy::EnergyFuelRecord;
pub use installation::InstallationEmissionSource;
pub use precursor::PurchasedPrecursor;
pub use process::{ApplicableElements, ElectricityFlow, ProcessInput, ProcessOutput, ProcessRecord};
pub use results::{ImportShare, ResultsSnapshot};

use crate::coerce::{lenient_list, lenient_number, lenient_record, lenient_text};
use crate::errors::CbamResult;
use crate::factors::EmissionFactorOverride;
use serde::{Deserialize, Serialize};

/// Bucket key used when a record has no usable label.
pub const UNKNOWN_KEY: &str = "Unknown";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyInfo {
    #[serde(deserialize_with = "lenient_text")]
    pub company_name: String,
    /// Economic Operators Registration and Identification number.
    #[serde(deserialize_with = "lenient_text")]
    pub eori_number: String,
    #[serde(deserialize_with = "lenient_text")]
    pub country: String,
    #[serde(deserialize_with = "lenient_text")]
    pub contact_email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InstallationInfo {
    #[serde(deserialize_with = "lenient_text")]
    pub installation_id: String,
    #[serde(deserialize_with = "lenient_text")]
    pub installation_name: String,
    #[serde(deserialize_with = "lenient_text")]
    pub country: String,
    /// ISO-8601 date (`YYYY-MM-DD`).
    #[serde(deserialize_with = "lenient_text")]
    pub reporting_period_start: String,
    /// ISO-8601 date (`YYYY-MM-DD`).
    #[serde(deserialize_with = "lenient_text")]
    pub reporting_period_end: String,
}

/// The complete form state handed to the engine.
///
/// The caller owns this snapshot and replaces whole collections on edit; the
/// engine only ever reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataSnapshot {
    #[serde(deserialize_with = "lenient_record")]
    pub company_info: CompanyInfo,
    #[serde(deserialize_with = "lenient_record")]
    pub installation_info: InstallationInfo,
    #[serde(deserialize_with = "lenient_list")]
    pub energy_fuel_data: Vec<EnergyFuelRecord>,
    #[serde(deserialize_with = "lenient_list")]
    pub processes: Vec<ProcessRecord>,
    #[serde(deserialize_with = "lenient_list")]
    pub installation_emission_sources: Vec<InstallationEmissionSource>,
    #[serde(deserialize_with = "lenient_list")]
    pub purchased_precursors: Vec<PurchasedPrecursor>,
    /// User-supplied override table consulted before the built-in defaults.
    #[serde(deserialize_with = "lenient_list")]
    pub emission_factors: Vec<EmissionFactorOverride>,
    /// Manually entered indirect CO2, added to the total as-is.
    #[serde(rename = "installationIndirectCO2", deserialize_with = "lenient_number")]
    pub installation_indirect_co2: Option<f64>,
}

impl DataSnapshot {
    /// Decodes a snapshot from the form's JSON representation.
    ///
    /// Only syntactically invalid JSON fails; shape and value problems are
    /// absorbed by the lenient field readers.
    pub fn from_json(json: &str) -> CbamResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
