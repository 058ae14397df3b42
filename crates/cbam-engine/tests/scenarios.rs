//! End-to-end calculation scenarios.
//!
//! Each scenario feeds a snapshot through the public entry points, mostly
//! decoded from the camelCase JSON the reporting form produces.

use approx::assert_relative_eq;
use cbam_core::model::{DataSnapshot, ProcessInput, ProcessRecord};
use cbam_core::parameters::EngineParameters;
use cbam_engine::aggregators::source_emissions;
use cbam_engine::shares::{import_share_by_country, imported_material_share};
use cbam_engine::{calculate_cbam_emissions, validate_calculation_results};

fn snapshot(json: &str) -> DataSnapshot {
    DataSnapshot::from_json(json).expect("Scenario snapshot should decode")
}

mod fuel_combustion {
    use super::*;

    /// A single natural gas record with an entered factor and no production.
    #[test]
    fn test_single_fuel_record() {
        let data = snapshot(
            r#"{
                "energyFuelData": [
                    {"fuelType": "Natural gas", "consumption": 100, "unit": "GJ", "co2EmissionFactor": 56.1}
                ]
            }"#,
        );
        let results = calculate_cbam_emissions(&data);

        assert_relative_eq!(results.total_direct_co2_emissions, 5610.0, epsilon = 1e-9);
        assert_relative_eq!(results.total_emissions, 5610.0, epsilon = 1e-9);
        assert_eq!(results.total_production, 0.0);
        assert_eq!(results.specific_emissions, 0.0);
        assert_eq!(results.specific_cumulative_emissions, 0.0);
        assert_relative_eq!(results.total_energy, 0.1, epsilon = 1e-12);
        assert_eq!(results.renewable_share, 0.0);
    }

    /// Form state with numbers typed as strings still calculates.
    #[test]
    fn test_string_numbers() {
        let data = snapshot(
            r#"{
                "energyFuelData": [
                    {"fuelType": "Natural gas", "consumption": "100", "unit": "GJ", "co2EmissionFactor": "56.1"},
                    {"fuelType": "Diesel", "consumption": "", "unit": "GJ"}
                ]
            }"#,
        );
        let results = calculate_cbam_emissions(&data);
        assert_relative_eq!(results.total_direct_co2_emissions, 5610.0, epsilon = 1e-9);
    }
}

mod production {
    use super::*;

    /// A process with an entered factor and one input priced from the default table.
    #[test]
    fn test_process_and_default_embedded_factor() {
        let data = snapshot(
            r#"{
                "processes": [{
                    "processName": "Sinter",
                    "productionQuantity": 10,
                    "unit": "t",
                    "processEmissionFactor": 1.9,
                    "inputs": [{"materialName": "Iron Ore", "quantity": 5}],
                    "outputs": [{"productName": "Sinter", "quantity": 10}]
                }]
            }"#,
        );
        let results = calculate_cbam_emissions(&data);

        assert_relative_eq!(results.total_process_emissions, 19.0, epsilon = 1e-9);
        assert_relative_eq!(results.embedded_emissions_from_inputs, 0.15, epsilon = 1e-12);
        assert_relative_eq!(results.total_embedded_emissions, 0.15, epsilon = 1e-12);
        assert_relative_eq!(results.cumulative_emissions, 19.15, epsilon = 1e-9);
        assert_relative_eq!(results.specific_emissions, 1.9, epsilon = 1e-12);
        assert_relative_eq!(results.specific_cumulative_emissions, 1.915, epsilon = 1e-12);
    }
}

mod installation_sources {
    use super::*;

    /// Mass balance with half the carbon biogenic.
    #[test]
    fn test_mass_balance_biomass_reduction() {
        let data = snapshot(
            r#"{
                "installationEmissionSources": [{
                    "sourceId": "Kiln",
                    "activityLevel": 100,
                    "calorificValue": 0.04,
                    "carbonContent": 0.02,
                    "oxidationFactor": 1,
                    "conversionFactor": 3.667,
                    "biomassFraction": 50
                }]
            }"#,
        );
        let parameters = EngineParameters::default();

        let mut fossil_only = data.installation_emission_sources[0].clone();
        fossil_only.biomass_fraction = None;
        assert_relative_eq!(
            source_emissions(&fossil_only, &parameters),
            0.29336,
            epsilon = 1e-12
        );

        let results = calculate_cbam_emissions(&data);
        assert_relative_eq!(results.installation_source_emissions, 0.14668, epsilon = 1e-12);
        assert_relative_eq!(
            results.installation_source_breakdown["Kiln"],
            0.14668,
            epsilon = 1e-12
        );
        assert_relative_eq!(results.total_emissions, 0.14668, epsilon = 1e-12);
    }
}

mod import_classification {
    use super::*;

    fn process_with(input: ProcessInput) -> Vec<ProcessRecord> {
        vec![ProcessRecord {
            inputs: vec![input],
            ..Default::default()
        }]
    }

    /// Country of origin alone classifies an input as imported, even with
    /// the import flag off and no origin country.
    #[test]
    fn test_country_of_origin_alone_means_imported() {
        let input = ProcessInput {
            material_name: "Scrap".into(),
            quantity: Some(40.0),
            is_imported: false,
            origin_country: String::new(),
            country_of_origin: "DE".into(),
            ..Default::default()
        };
        assert!(input.is_imported_material());

        let processes = process_with(input);
        assert_eq!(imported_material_share(&processes), 1.0);
        let by_country = import_share_by_country(&processes);
        assert_eq!(by_country["DE"].imported_quantity, 40.0);
        assert_eq!(by_country["DE"].share, 1.0);
    }

    #[test]
    fn test_each_condition_is_sufficient() {
        let flagged = ProcessInput {
            quantity: Some(1.0),
            is_imported: true,
            ..Default::default()
        };
        let origin_country = ProcessInput {
            quantity: Some(1.0),
            origin_country: "CN".into(),
            ..Default::default()
        };
        let domestic = ProcessInput {
            quantity: Some(1.0),
            origin: "On site".into(),
            ..Default::default()
        };

        assert_eq!(imported_material_share(&process_with(flagged)), 1.0);
        assert_eq!(imported_material_share(&process_with(origin_country)), 1.0);
        assert_eq!(imported_material_share(&process_with(domestic)), 0.0);
    }

    #[test]
    fn test_decoded_from_form_state() {
        let data = snapshot(
            r#"{
                "processes": [{
                    "inputs": [
                        {"materialName": "Scrap", "quantity": 30, "isImported": false, "originCountry": "", "countryOfOrigin": "DE"},
                        {"materialName": "Lime", "quantity": 10, "isImported": "false"}
                    ]
                }]
            }"#,
        );
        let results = calculate_cbam_emissions(&data);
        assert_relative_eq!(results.imported_material_share, 0.75, epsilon = 1e-12);
        assert_eq!(results.import_share_by_material["Lime"].share, 0.0);
    }
}

mod precursors {
    use super::*;

    #[test]
    fn test_direct_and_electricity_embedded() {
        let data = snapshot(
            r#"{
                "purchasedPrecursors": [{
                    "name": "Pig iron",
                    "totalAmountConsumed": 10,
                    "specificDirectEmbeddedEmissions": 2.0,
                    "electricityConsumption": 5,
                    "electricityEmissionFactor": 0.475
                }]
            }"#,
        );
        let results = calculate_cbam_emissions(&data);

        assert_relative_eq!(results.embedded_emissions_from_precursors, 22.375, epsilon = 1e-12);
        assert_relative_eq!(results.total_embedded_emissions, 22.375, epsilon = 1e-12);
        assert_relative_eq!(results.cumulative_emissions, 22.375, epsilon = 1e-12);
        assert_eq!(results.total_emissions, 0.0);
    }
}

mod full_installation {
    use super::*;

    /// A steel installation touching every aggregator.
    #[test]
    fn test_complete_snapshot() {
        let data = snapshot(
            r#"{
                "companyInfo": {"companyName": "Acme Steel"},
                "installationInfo": {"installationName": "Works 1"},
                "energyFuelData": [
                    {"fuelType": "Natural gas", "consumption": 200, "unit": "GJ"},
                    {"fuelType": "Biomass", "consumption": 10, "unit": "GJ"},
                    {"fuelType": "Grid", "useCategory": "electricity", "consumption": 500, "unit": "MWh", "renewableShare": 20}
                ],
                "processes": [{
                    "processType": "Electric arc furnace",
                    "processName": "EAF 1",
                    "productionAmount": 1000,
                    "processEmissionFactor": 0.08,
                    "applicableElements": {"indirectEmissions": true},
                    "electricityConsumption": {"amount": 400, "unit": "MWh"},
                    "inputs": [
                        {"materialName": "Scrap", "quantity": 1100, "countryOfOrigin": "NL",
                         "transportDistance": 250, "transportMode": "Road"},
                        {"materialName": "Pig iron", "quantity": 50, "embeddedEmissions": 95}
                    ],
                    "outputs": [{"productName": "Steel billets", "quantity": 1000, "cnCode": "7207"}]
                }],
                "installationEmissionSources": [
                    {"sourceId": "Ladle heater", "activityLevel": 10, "emissionFactor": 2.0}
                ],
                "emissionFactors": [
                    {"category": "Electricity", "name": "Grid electricity", "gasType": "CO2", "value": 0.3, "unit": "t/MWh"}
                ],
                "installationIndirectCO2": 5
            }"#,
        );
        let results = calculate_cbam_emissions(&data);

        // 200 GJ * 56.1 (default)
        assert_relative_eq!(results.total_direct_co2_emissions, 11220.0, epsilon = 1e-9);
        assert_relative_eq!(results.biogenic_co2_emissions, 18.3, epsilon = 1e-9);
        assert_relative_eq!(results.process_direct_emissions, 80.0, epsilon = 1e-9);
        // 400 MWh * 0.3 (override)
        assert_relative_eq!(results.process_indirect_emissions, 120.0, epsilon = 1e-9);
        assert_relative_eq!(results.installation_source_emissions, 20.0, epsilon = 1e-9);
        assert_relative_eq!(results.indirect_emissions, 125.0, epsilon = 1e-9);
        assert_relative_eq!(results.total_emissions, 11445.0, epsilon = 1e-9);
        // Scrap has a zero default factor
        assert_relative_eq!(results.total_embedded_emissions, 95.0, epsilon = 1e-9);
        assert_relative_eq!(results.cumulative_emissions, 11540.0, epsilon = 1e-9);
        assert_relative_eq!(results.specific_emissions, 11.445, epsilon = 1e-12);
        // 250 km * 0.000062 * 1100 t
        assert_relative_eq!(results.transport_emissions, 17.05, epsilon = 1e-9);
        // 0.2 + 0.01 + 1.8 TJ; renewable 0.01 + 0.36
        assert_relative_eq!(results.total_energy, 2.01, epsilon = 1e-9);
        assert_relative_eq!(results.renewable_energy, 0.37, epsilon = 1e-9);
        assert_relative_eq!(results.imported_material_share, 1100.0 / 1150.0, epsilon = 1e-12);

        assert!(validate_calculation_results(&results).is_valid);
    }
}
