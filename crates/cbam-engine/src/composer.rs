//! Results composer
//!
//! Runs every aggregator over one data snapshot and combines the outputs:
//!
//! $$E_{total} = E_{direct} + (E_{process} + E_{indirect}) + E_{installation} + E_{manual}$$
//!
//! $$E_{cumulative} = E_{total} + E_{embedded}$$
//!
//! Specific values divide by total production and are zero without production.
//! Biogenic CO2 and transport emissions are reported but not added to either total.

use crate::aggregators::{
    biogenic_co2_emissions, direct_co2_emissions, direct_emissions_breakdown,
    embedded_emissions_breakdown, embedded_emissions_from_inputs,
    embedded_emissions_from_precursors, installation_source_breakdown,
    installation_source_emissions, process_emissions, process_emissions_breakdown,
    process_indirect_emissions, total_production, transport_emissions,
};
use crate::shares::{
    energy_totals, import_share_by_country, import_share_by_material, imported_material_share,
};
use cbam_core::coerce::{number, ratio};
use cbam_core::factors::FactorResolver;
use cbam_core::model::{DataSnapshot, ResultsSnapshot};
use cbam_core::parameters::EngineParameters;
use tracing::{debug, warn};

/// Computes results snapshots with a fixed set of parameters.
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    parameters: EngineParameters,
}

impl Calculator {
    pub fn new(parameters: EngineParameters) -> Self {
        Self { parameters }
    }

    pub fn parameters(&self) -> &EngineParameters {
        &self.parameters
    }

    /// Computes every aggregate for `data`.
    ///
    /// The snapshot is only read, so calling this twice on the same data
    /// gives identical results.
    pub fn calculate(&self, data: &DataSnapshot) -> ResultsSnapshot {
        let parameters = &self.parameters;
        let resolver = FactorResolver::new(&data.emission_factors, parameters);

        for (index, row) in data.emission_factors.iter().enumerate() {
            if row.is_inert() {
                warn!(
                    row = index,
                    category = %row.category,
                    gas_type = %row.gas_type,
                    "Emission factor override can never match and is ignored"
                );
            }
        }

        let total_direct_co2_emissions = direct_co2_emissions(&data.energy_fuel_data, &resolver);
        let direct_emissions_breakdown =
            direct_emissions_breakdown(&data.energy_fuel_data, &resolver);
        let biogenic_co2_emissions = biogenic_co2_emissions(&data.energy_fuel_data, parameters);

        let process_direct_emissions = process_emissions(&data.processes, &resolver);
        let process_indirect_emissions = process_indirect_emissions(&data.processes, &resolver);
        let total_process_emissions = process_direct_emissions + process_indirect_emissions;
        let process_emissions_breakdown = process_emissions_breakdown(&data.processes, &resolver);

        let installation_source_emissions =
            installation_source_emissions(&data.installation_emission_sources, parameters);
        let installation_source_breakdown =
            installation_source_breakdown(&data.installation_emission_sources, parameters);
        let installation_indirect_co2 = number(data.installation_indirect_co2);
        let indirect_emissions = process_indirect_emissions + installation_indirect_co2;

        let embedded_emissions_from_inputs =
            embedded_emissions_from_inputs(&data.processes, &resolver);
        let embedded_emissions_from_precursors =
            embedded_emissions_from_precursors(&data.purchased_precursors, &resolver);
        let total_embedded_emissions =
            embedded_emissions_from_inputs + embedded_emissions_from_precursors;
        let embedded_emissions_breakdown =
            embedded_emissions_breakdown(&data.processes, &data.purchased_precursors, &resolver);

        let total_emissions = total_direct_co2_emissions
            + total_process_emissions
            + installation_source_emissions
            + installation_indirect_co2;
        let cumulative_emissions = total_emissions + total_embedded_emissions;
        let total_production = total_production(&data.processes);

        let energy = energy_totals(&data.energy_fuel_data);

        debug!(
            total_direct_co2_emissions,
            total_process_emissions,
            installation_source_emissions,
            total_embedded_emissions,
            total_emissions,
            cumulative_emissions,
            total_production,
            "Calculated CBAM emissions"
        );

        ResultsSnapshot {
            total_direct_co2_emissions,
            direct_emissions_breakdown,
            biogenic_co2_emissions,
            process_direct_emissions,
            process_indirect_emissions,
            total_process_emissions,
            process_emissions_breakdown,
            installation_source_emissions,
            installation_source_breakdown,
            installation_indirect_co2,
            indirect_emissions,
            embedded_emissions_from_inputs,
            embedded_emissions_from_precursors,
            total_embedded_emissions,
            embedded_emissions_breakdown,
            transport_emissions: transport_emissions(&data.processes, &resolver),
            total_emissions,
            cumulative_emissions,
            total_production,
            specific_emissions: ratio(total_emissions, total_production),
            specific_cumulative_emissions: ratio(cumulative_emissions, total_production),
            total_energy: energy.total,
            renewable_energy: energy.renewable,
            renewable_share: energy.share,
            imported_material_share: imported_material_share(&data.processes),
            import_share_by_country: import_share_by_country(&data.processes),
            import_share_by_material: import_share_by_material(&data.processes),
        }
    }
}

/// Computes every aggregate for `data` with the default parameters.
pub fn calculate_cbam_emissions(data: &DataSnapshot) -> ResultsSnapshot {
    Calculator::default().calculate(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cbam_core::factors::EmissionFactorOverride;
    use cbam_core::model::{
        ApplicableElements, ElectricityFlow, EnergyFuelRecord, InstallationEmissionSource,
        ProcessInput, ProcessRecord, PurchasedPrecursor,
    };
    use is_close::is_close;

    fn snapshot() -> DataSnapshot {
        DataSnapshot {
            energy_fuel_data: vec![EnergyFuelRecord {
                fuel_type: "Natural gas".into(),
                consumption: Some(100.0),
                unit: "GJ".into(),
                co2_emission_factor: Some(56.1),
                ..Default::default()
            }],
            processes: vec![ProcessRecord {
                process_type: "Steelmaking".into(),
                production_quantity: Some(10.0),
                process_emission_factor: Some(1.9),
                applicable_elements: ApplicableElements {
                    indirect_emissions: true,
                    ..Default::default()
                },
                electricity_consumption: ElectricityFlow {
                    amount: Some(20.0),
                    unit: "MWh".into(),
                    emission_factor: Some(0.5),
                    ..Default::default()
                },
                inputs: vec![ProcessInput {
                    material_name: "Iron Ore".into(),
                    quantity: Some(5.0),
                    ..Default::default()
                }],
                ..Default::default()
            }],
            installation_emission_sources: vec![InstallationEmissionSource {
                source_id: "Flare".into(),
                co2_emissions: Some(4.0),
                ..Default::default()
            }],
            purchased_precursors: vec![PurchasedPrecursor {
                name: "Pig iron".into(),
                total_amount_consumed: Some(1.0),
                specific_direct_embedded_emissions: Some(2.0),
                ..Default::default()
            }],
            installation_indirect_co2: Some(6.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_composition() {
        let results = calculate_cbam_emissions(&snapshot());

        assert!(is_close!(results.total_direct_co2_emissions, 5610.0));
        assert!(is_close!(results.process_direct_emissions, 19.0));
        assert!(is_close!(results.process_indirect_emissions, 10.0));
        assert!(is_close!(results.total_process_emissions, 29.0));
        assert!(is_close!(results.indirect_emissions, 16.0));
        // 5610 + 29 + 4 + 6
        assert!(is_close!(results.total_emissions, 5649.0));
        // 0.15 + 2.0
        assert!(is_close!(results.total_embedded_emissions, 2.15));
        assert!(is_close!(results.cumulative_emissions, 5651.15));
        assert!(is_close!(results.specific_emissions, 564.9));
        assert!(is_close!(results.specific_cumulative_emissions, 565.115));
        assert_eq!(results.installation_source_breakdown["Flare"], 4.0);
    }

    #[test]
    fn test_empty_snapshot() {
        let results = calculate_cbam_emissions(&DataSnapshot::default());
        assert_eq!(results, ResultsSnapshot::default());
    }

    #[test]
    fn test_parameters_flow_through() {
        let parameters = EngineParameters {
            gwp_ch4: 25.0,
            ..Default::default()
        };
        let data = DataSnapshot {
            installation_emission_sources: vec![InstallationEmissionSource {
                ch4_emissions: Some(2.0),
                ..Default::default()
            }],
            ..Default::default()
        };

        let results = Calculator::new(parameters).calculate(&data);
        assert_eq!(results.installation_source_emissions, 50.0);
        assert_eq!(results.installation_source_breakdown["source-1"], 50.0);
    }

    #[test]
    fn test_inert_overrides_are_ignored() {
        let mut data = snapshot();
        data.emission_factors = vec![EmissionFactorOverride {
            category: "Nonsense".into(),
            name: "Iron Ore".into(),
            value: Some(100.0),
            ..Default::default()
        }];
        assert_eq!(
            calculate_cbam_emissions(&data),
            calculate_cbam_emissions(&snapshot())
        );
    }
}
