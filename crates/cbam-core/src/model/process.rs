use crate::coerce::{
    is_blank, lenient_flag, lenient_list, lenient_number, lenient_record, lenient_text, number,
};
use crate::gas::GasType;
use serde::{Deserialize, Serialize};

/// Which optional emission elements apply to a production process.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicableElements {
    #[serde(deserialize_with = "lenient_flag")]
    pub measurable_heat: bool,
    #[serde(deserialize_with = "lenient_flag")]
    pub waste_gases: bool,
    #[serde(deserialize_with = "lenient_flag")]
    pub indirect_emissions: bool,
}

/// Electricity consumed or exported by a process, with its emission factor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElectricityFlow {
    #[serde(deserialize_with = "lenient_number")]
    pub amount: Option<f64>,
    #[serde(deserialize_with = "lenient_text")]
    pub unit: String,
    #[serde(deserialize_with = "lenient_number")]
    pub emission_factor: Option<f64>,
    #[serde(deserialize_with = "lenient_text")]
    pub emission_factor_unit: String,
}

/// A material consumed by a production process.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProcessInput {
    #[serde(deserialize_with = "lenient_text")]
    pub material_name: String,
    #[serde(deserialize_with = "lenient_number")]
    pub quantity: Option<f64>,
    #[serde(deserialize_with = "lenient_text")]
    pub unit: String,
    #[serde(deserialize_with = "lenient_text")]
    pub origin: String,
    #[serde(deserialize_with = "lenient_text")]
    pub origin_country: String,
    #[serde(deserialize_with = "lenient_text")]
    pub country_of_origin: String,
    #[serde(deserialize_with = "lenient_flag")]
    pub is_imported: bool,
    /// Total embedded emissions of this input (not a per-unit factor).
    #[serde(deserialize_with = "lenient_number")]
    pub embedded_emissions: Option<f64>,
    /// Transport distance in km.
    #[serde(deserialize_with = "lenient_number")]
    pub transport_distance: Option<f64>,
    #[serde(deserialize_with = "lenient_text")]
    pub transport_mode: String,
    #[serde(deserialize_with = "lenient_number")]
    pub transport_emissions: Option<f64>,
}

impl ProcessInput {
    /// Import classification used by every share calculation.
    ///
    /// An input counts as imported when it is flagged, OR it has an origin
    /// country, OR it has a country of origin. Country data alone is
    /// sufficient even when the flag is false.
    pub fn is_imported_material(&self) -> bool {
        self.is_imported || !is_blank(&self.origin_country) || !is_blank(&self.country_of_origin)
    }

    /// Bucket key for by-country shares.
    pub fn country_key(&self) -> &str {
        [&self.country_of_origin, &self.origin_country, &self.origin]
            .into_iter()
            .map(|c| c.trim())
            .find(|c| !c.is_empty())
            .unwrap_or(super::UNKNOWN_KEY)
    }

    /// Bucket key for by-material shares.
    pub fn material_key(&self) -> &str {
        match self.material_name.trim() {
            "" => super::UNKNOWN_KEY,
            name => name,
        }
    }
}

/// A product leaving a production process.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProcessOutput {
    #[serde(deserialize_with = "lenient_text")]
    pub product_name: String,
    #[serde(deserialize_with = "lenient_number")]
    pub quantity: Option<f64>,
    #[serde(deserialize_with = "lenient_text")]
    pub unit: String,
    /// Combined Nomenclature classification code.
    #[serde(deserialize_with = "lenient_text")]
    pub cn_code: String,
    #[serde(deserialize_with = "lenient_text")]
    pub destination: String,
}

/// A production process and the materials flowing through it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProcessRecord {
    #[serde(deserialize_with = "lenient_text")]
    pub process_type: String,
    #[serde(deserialize_with = "lenient_text")]
    pub process_name: String,
    #[serde(deserialize_with = "lenient_number")]
    pub production_amount: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub production_quantity: Option<f64>,
    #[serde(deserialize_with = "lenient_text")]
    pub unit: String,
    /// CO2 emitted per unit of production.
    #[serde(deserialize_with = "lenient_number")]
    pub process_emission_factor: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub ch4_emission_factor: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub n2o_emission_factor: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub other_gwp_emission_factor: Option<f64>,
    #[serde(deserialize_with = "lenient_list")]
    pub inputs: Vec<ProcessInput>,
    #[serde(deserialize_with = "lenient_list")]
    pub outputs: Vec<ProcessOutput>,
    #[serde(deserialize_with = "lenient_record")]
    pub applicable_elements: ApplicableElements,
    #[serde(deserialize_with = "lenient_record")]
    pub electricity_consumption: ElectricityFlow,
    #[serde(deserialize_with = "lenient_record")]
    pub electricity_export: ElectricityFlow,
}

impl ProcessRecord {
    /// Production, taken from `production_amount`, then `production_quantity`, then 0.
    pub fn production(&self) -> f64 {
        number(self.production_amount.or(self.production_quantity))
    }

    /// Key used for factor lookups: the process type, or the name when no type is set.
    pub fn factor_key(&self) -> &str {
        if is_blank(&self.process_type) {
            self.process_name.trim()
        } else {
            self.process_type.trim()
        }
    }

    /// Label used in validation messages.
    pub fn label(&self) -> &str {
        if is_blank(&self.process_name) {
            self.factor_key()
        } else {
            self.process_name.trim()
        }
    }

    pub fn factor_for(&self, gas: GasType) -> Option<f64> {
        match gas {
            GasType::Co2 => self.process_emission_factor,
            GasType::Ch4 => self.ch4_emission_factor,
            GasType::N2o => self.n2o_emission_factor,
            GasType::OtherGwp => self.other_gwp_emission_factor,
        }
    }
}
