use crate::coerce::{lenient_number, lenient_text};
use serde::{Deserialize, Serialize};

/// A precursor good bought in rather than produced on site.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PurchasedPrecursor {
    #[serde(deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(deserialize_with = "lenient_number")]
    pub total_amount_consumed: Option<f64>,
    #[serde(deserialize_with = "lenient_text")]
    pub unit: String,
    /// Direct embedded emissions per unit of precursor.
    #[serde(deserialize_with = "lenient_number")]
    pub specific_direct_embedded_emissions: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub electricity_consumption: Option<f64>,
    #[serde(deserialize_with = "lenient_text")]
    pub electricity_unit: String,
    #[serde(deserialize_with = "lenient_number")]
    pub electricity_emission_factor: Option<f64>,
    #[serde(deserialize_with = "lenient_text")]
    pub electricity_emission_factor_unit: String,
    #[serde(deserialize_with = "lenient_text")]
    pub country_of_origin: String,
}
