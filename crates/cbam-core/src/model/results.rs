use crate::gas::GasBreakdown;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Total and imported quantity for one bucket of process inputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportShare {
    pub total_quantity: f64,
    pub imported_quantity: f64,
    /// `imported_quantity / total_quantity`, or 0 for an empty bucket.
    pub share: f64,
}

/// Every aggregate the engine produces for one data snapshot.
///
/// Emissions are in tonnes CO2 (or CO2e where GWP multipliers apply),
/// energy in TJ, shares as fractions in [0, 1]. Exporters display these
/// values as-is and never re-derive them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsSnapshot {
    // Fuel combustion
    #[serde(rename = "totalDirectCO2Emissions")]
    pub total_direct_co2_emissions: f64,
    pub direct_emissions_breakdown: GasBreakdown,
    #[serde(rename = "biogenicCO2Emissions")]
    pub biogenic_co2_emissions: f64,

    // Production processes
    pub process_direct_emissions: f64,
    pub process_indirect_emissions: f64,
    pub total_process_emissions: f64,
    pub process_emissions_breakdown: GasBreakdown,

    // Installation sources
    pub installation_source_emissions: f64,
    pub installation_source_breakdown: BTreeMap<String, f64>,
    #[serde(rename = "installationIndirectCO2")]
    pub installation_indirect_co2: f64,
    pub indirect_emissions: f64,

    // Embedded and transport
    pub embedded_emissions_from_inputs: f64,
    pub embedded_emissions_from_precursors: f64,
    pub total_embedded_emissions: f64,
    pub embedded_emissions_breakdown: GasBreakdown,
    pub transport_emissions: f64,

    // Totals
    pub total_emissions: f64,
    pub cumulative_emissions: f64,
    pub total_production: f64,
    pub specific_emissions: f64,
    pub specific_cumulative_emissions: f64,

    // Energy and shares
    pub total_energy: f64,
    pub renewable_energy: f64,
    pub renewable_share: f64,
    pub imported_material_share: f64,
    pub import_share_by_country: BTreeMap<String, ImportShare>,
    pub import_share_by_material: BTreeMap<String, ImportShare>,
}

impl ResultsSnapshot {
    /// Named scalar aggregates, for checks that treat them uniformly.
    pub fn aggregates(&self) -> [(&'static str, f64); 21] {
        [
            ("totalDirectCO2Emissions", self.total_direct_co2_emissions),
            ("biogenicCO2Emissions", self.biogenic_co2_emissions),
            ("processDirectEmissions", self.process_direct_emissions),
            ("processIndirectEmissions", self.process_indirect_emissions),
            ("totalProcessEmissions", self.total_process_emissions),
            ("installationSourceEmissions", self.installation_source_emissions),
            ("installationIndirectCO2", self.installation_indirect_co2),
            ("indirectEmissions", self.indirect_emissions),
            ("embeddedEmissionsFromInputs", self.embedded_emissions_from_inputs),
            ("embeddedEmissionsFromPrecursors", self.embedded_emissions_from_precursors),
            ("totalEmbeddedEmissions", self.total_embedded_emissions),
            ("transportEmissions", self.transport_emissions),
            ("totalEmissions", self.total_emissions),
            ("cumulativeEmissions", self.cumulative_emissions),
            ("totalProduction", self.total_production),
            ("specificEmissions", self.specific_emissions),
            ("specificCumulativeEmissions", self.specific_cumulative_emissions),
            ("totalEnergy", self.total_energy),
            ("renewableEnergy", self.renewable_energy),
            ("renewableShare", self.renewable_share),
            ("importedMaterialShare", self.imported_material_share),
        ]
    }
}
