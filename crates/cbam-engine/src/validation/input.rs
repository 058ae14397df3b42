use super::{ReportBuilder, ValidationReport};
use cbam_core::coerce::{is_blank, positive};
use cbam_core::model::{
    DataSnapshot, ElectricityFlow, EnergyFuelRecord, InstallationEmissionSource, ProcessRecord,
    PurchasedPrecursor,
};
use cbam_core::parameters::EngineParameters;
use std::collections::HashSet;
use tracing::debug;

/// Checks an input snapshot for completeness and consistency.
pub fn validate_cbam_data(data: &DataSnapshot) -> ValidationReport {
    validate_cbam_data_with(data, &EngineParameters::default())
}

/// Checks an input snapshot, using `parameters` for the plausibility ranges.
pub fn validate_cbam_data_with(
    data: &DataSnapshot,
    parameters: &EngineParameters,
) -> ValidationReport {
    let mut report = ReportBuilder::default();

    check_identity(&mut report, data);
    for (index, record) in data.energy_fuel_data.iter().enumerate() {
        check_energy_record(&mut report, &format!("energyFuelData[{index}]"), record);
    }
    check_processes(&mut report, &data.processes, parameters);
    for (index, source) in data.installation_emission_sources.iter().enumerate() {
        check_source(&mut report, &format!("installationEmissionSources[{index}]"), source);
    }
    for (index, precursor) in data.purchased_precursors.iter().enumerate() {
        check_precursor(&mut report, &format!("purchasedPrecursors[{index}]"), precursor);
    }
    for (index, row) in data.emission_factors.iter().enumerate() {
        let path = format!("emissionFactors[{index}]");
        if is_blank(&row.name) {
            report.error(format!("{path}.name"), "Emission factor override needs a name");
        }
        match row.value {
            None => report.error(format!("{path}.value"), "Emission factor override needs a value"),
            Some(_) => non_negative(&mut report, &format!("{path}.value"), row.value),
        }
        if row.category().is_none() {
            report.warning(
                format!("{path}.category"),
                format!("Unrecognised category '{}'; the override is never used", row.category),
            );
        }
        if row.gas().is_none() {
            report.warning(
                format!("{path}.gasType"),
                format!("Unrecognised gas type '{}'; the override is never used", row.gas_type),
            );
        }
    }
    non_negative(&mut report, "installationIndirectCO2", data.installation_indirect_co2);

    let report = report.finish();
    debug!(
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "Validated CBAM data"
    );
    report
}

fn non_negative(report: &mut ReportBuilder, field: &str, value: Option<f64>) {
    match value {
        Some(v) if !v.is_finite() => report.error(field, "Must be a finite number"),
        Some(v) if v < 0.0 => report.error(field, format!("Must not be negative (got {v})")),
        _ => {}
    }
}

fn percentage(report: &mut ReportBuilder, field: &str, value: Option<f64>) {
    if let Some(v) = value {
        if !(0.0..=100.0).contains(&v) {
            report.error(field, format!("Must be a percentage between 0 and 100 (got {v})"));
        }
    }
}

fn check_identity(report: &mut ReportBuilder, data: &DataSnapshot) {
    if is_blank(&data.company_info.company_name) {
        report.error("companyInfo.companyName", "Company name is required");
    }

    let installation = &data.installation_info;
    if is_blank(&installation.installation_name) && is_blank(&installation.installation_id) {
        report.error(
            "installationInfo.installationName",
            "Installation name or identifier is required",
        );
    }

    // ISO dates order lexicographically
    let start = installation.reporting_period_start.trim();
    let end = installation.reporting_period_end.trim();
    if !start.is_empty() && !end.is_empty() && end < start {
        report.warning(
            "installationInfo.reportingPeriodEnd",
            format!("Reporting period ends ({end}) before it starts ({start})"),
        );
    }
}

fn check_energy_record(report: &mut ReportBuilder, path: &str, record: &EnergyFuelRecord) {
    non_negative(report, &format!("{path}.consumption"), record.consumption);
    non_negative(report, &format!("{path}.co2EmissionFactor"), record.co2_emission_factor);
    non_negative(report, &format!("{path}.ch4EmissionFactor"), record.ch4_emission_factor);
    non_negative(report, &format!("{path}.n2oEmissionFactor"), record.n2o_emission_factor);
    non_negative(
        report,
        &format!("{path}.otherGwpEmissionFactor"),
        record.other_gwp_emission_factor,
    );
    percentage(report, &format!("{path}.biomassShare"), record.biomass_share);
    percentage(report, &format!("{path}.renewableShare"), record.renewable_share);
}

fn check_electricity(report: &mut ReportBuilder, path: &str, flow: &ElectricityFlow) {
    non_negative(report, &format!("{path}.amount"), flow.amount);
    non_negative(report, &format!("{path}.emissionFactor"), flow.emission_factor);
}

fn check_processes(
    report: &mut ReportBuilder,
    processes: &[ProcessRecord],
    parameters: &EngineParameters,
) {
    let mut process_names = HashSet::new();

    for (index, process) in processes.iter().enumerate() {
        let path = format!("processes[{index}]");

        let name = process.process_name.trim().to_lowercase();
        if !name.is_empty() && !process_names.insert(name) {
            report.error(
                format!("{path}.processName"),
                format!("Duplicate process name '{}'", process.process_name.trim()),
            );
        }

        non_negative(report, &format!("{path}.productionAmount"), process.production_amount);
        non_negative(report, &format!("{path}.productionQuantity"), process.production_quantity);
        non_negative(
            report,
            &format!("{path}.processEmissionFactor"),
            process.process_emission_factor,
        );
        non_negative(report, &format!("{path}.ch4EmissionFactor"), process.ch4_emission_factor);
        non_negative(report, &format!("{path}.n2oEmissionFactor"), process.n2o_emission_factor);
        non_negative(
            report,
            &format!("{path}.otherGwpEmissionFactor"),
            process.other_gwp_emission_factor,
        );
        check_electricity(report, &format!("{path}.electricityConsumption"), &process.electricity_consumption);
        check_electricity(report, &format!("{path}.electricityExport"), &process.electricity_export);

        if let Some(factor) = positive(process.process_emission_factor) {
            if let Some(range) = parameters.plausibility_range(process.factor_key()) {
                if !range.contains(factor) {
                    report.warning(
                        format!("{path}.processEmissionFactor"),
                        format!(
                            "Factor {factor} for '{}' is outside the expected range [{}, {}]",
                            process.factor_key(),
                            range.min,
                            range.max
                        ),
                    );
                }
            }
        }

        if process.inputs.is_empty() {
            report.error(
                format!("{path}.inputs"),
                format!("Process '{}' needs at least one input", process.label()),
            );
        }
        if process.outputs.is_empty() {
            report.error(
                format!("{path}.outputs"),
                format!("Process '{}' needs at least one output", process.label()),
            );
        }

        let mut materials = HashSet::new();
        for (input_index, input) in process.inputs.iter().enumerate() {
            let input_path = format!("{path}.inputs[{input_index}]");
            let material = input.material_name.trim().to_lowercase();
            if !material.is_empty() && !materials.insert(material) {
                report.error(
                    format!("{input_path}.materialName"),
                    format!(
                        "Material '{}' is listed more than once in this process",
                        input.material_name.trim()
                    ),
                );
            }
            non_negative(report, &format!("{input_path}.quantity"), input.quantity);
            non_negative(report, &format!("{input_path}.embeddedEmissions"), input.embedded_emissions);
            non_negative(report, &format!("{input_path}.transportDistance"), input.transport_distance);
            non_negative(report, &format!("{input_path}.transportEmissions"), input.transport_emissions);
        }

        for (output_index, output) in process.outputs.iter().enumerate() {
            non_negative(
                report,
                &format!("{path}.outputs[{output_index}].quantity"),
                output.quantity,
            );
        }
    }
}

fn check_source(report: &mut ReportBuilder, path: &str, source: &InstallationEmissionSource) {
    non_negative(report, &format!("{path}.activityLevel"), source.activity_level);
    non_negative(report, &format!("{path}.emissionFactor"), source.emission_factor);
    non_negative(report, &format!("{path}.co2Emissions"), source.co2_emissions);
    non_negative(report, &format!("{path}.calorificValue"), source.calorific_value);
    non_negative(report, &format!("{path}.carbonContent"), source.carbon_content);
    non_negative(report, &format!("{path}.conversionFactor"), source.conversion_factor);
    non_negative(report, &format!("{path}.ch4Emissions"), source.ch4_emissions);
    non_negative(report, &format!("{path}.n2oEmissions"), source.n2o_emissions);
    percentage(report, &format!("{path}.biomassFraction"), source.biomass_fraction);
    if let Some(oxidation) = source.oxidation_factor {
        if !(0.0..=1.0).contains(&oxidation) {
            report.error(
                format!("{path}.oxidationFactor"),
                format!("Oxidation factor must be between 0 and 1 (got {oxidation})"),
            );
        }
    }
}

fn check_precursor(report: &mut ReportBuilder, path: &str, precursor: &PurchasedPrecursor) {
    non_negative(report, &format!("{path}.totalAmountConsumed"), precursor.total_amount_consumed);
    non_negative(
        report,
        &format!("{path}.specificDirectEmbeddedEmissions"),
        precursor.specific_direct_embedded_emissions,
    );
    non_negative(
        report,
        &format!("{path}.electricityConsumption"),
        precursor.electricity_consumption,
    );
    non_negative(
        report,
        &format!("{path}.electricityEmissionFactor"),
        precursor.electricity_emission_factor,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Severity;
    use cbam_core::factors::EmissionFactorOverride;
    use cbam_core::model::{CompanyInfo, InstallationInfo, ProcessInput, ProcessOutput};

    fn input(name: &str, quantity: f64) -> ProcessInput {
        ProcessInput {
            material_name: name.into(),
            quantity: Some(quantity),
            ..Default::default()
        }
    }

    fn process(name: &str) -> ProcessRecord {
        ProcessRecord {
            process_type: "Calcination".into(),
            process_name: name.into(),
            production_quantity: Some(10.0),
            inputs: vec![input("Limestone", 18.0)],
            outputs: vec![ProcessOutput {
                product_name: "Lime".into(),
                quantity: Some(10.0),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    fn complete() -> DataSnapshot {
        DataSnapshot {
            company_info: CompanyInfo {
                company_name: "Acme Lime".into(),
                ..Default::default()
            },
            installation_info: InstallationInfo {
                installation_name: "Kiln site".into(),
                reporting_period_start: "2026-01-01".into(),
                reporting_period_end: "2026-12-31".into(),
                ..Default::default()
            },
            processes: vec![process("Kiln 1")],
            ..Default::default()
        }
    }

    fn fields(issues: &[crate::validation::ValidationIssue]) -> Vec<&str> {
        issues.iter().map(|issue| issue.field.as_str()).collect()
    }

    #[test]
    fn test_complete_snapshot_is_valid() {
        let report = validate_cbam_data(&complete());
        assert!(report.is_valid, "{:?}", report.errors);
        assert!(report.warnings.is_empty(), "{:?}", report.warnings);
    }

    #[test]
    fn test_required_identity() {
        let report = validate_cbam_data(&DataSnapshot::default());
        assert!(!report.is_valid);
        assert_eq!(
            fields(&report.errors),
            vec!["companyInfo.companyName", "installationInfo.installationName"]
        );

        let mut data = complete();
        data.installation_info.installation_name = String::new();
        data.installation_info.installation_id = "DE-0042".into();
        assert!(validate_cbam_data(&data).is_valid);
    }

    #[test]
    fn test_negative_and_out_of_range_values() {
        let mut data = complete();
        data.processes[0].inputs.push(input("Coke", -1.0));
        data.energy_fuel_data.push(EnergyFuelRecord {
            fuel_type: "Wood".into(),
            consumption: Some(5.0),
            biomass_share: Some(120.0),
            ..Default::default()
        });
        data.installation_emission_sources.push(InstallationEmissionSource {
            oxidation_factor: Some(1.2),
            ..Default::default()
        });

        let report = validate_cbam_data(&data);
        assert_eq!(
            fields(&report.errors),
            vec![
                "energyFuelData[0].biomassShare",
                "processes[0].inputs[1].quantity",
                "installationEmissionSources[0].oxidationFactor",
            ]
        );
        assert!(report.errors.iter().all(|e| e.severity == Severity::Error));
    }

    #[test]
    fn test_duplicates_and_missing_flows() {
        let mut data = complete();
        data.processes.push(process(" kiln 1 "));
        data.processes[0].inputs.push(input("LIMESTONE", 1.0));
        data.processes.push(ProcessRecord {
            process_name: "Mill".into(),
            ..Default::default()
        });

        let report = validate_cbam_data(&data);
        assert_eq!(
            fields(&report.errors),
            vec![
                "processes[0].inputs[1].materialName",
                "processes[1].processName",
                "processes[2].inputs",
                "processes[2].outputs",
            ]
        );
    }

    #[test]
    fn test_plausibility_warning() {
        let mut data = complete();
        data.processes[0].process_emission_factor = Some(2.0);

        let report = validate_cbam_data(&data);
        assert!(report.is_valid);
        assert_eq!(fields(&report.warnings), vec!["processes[0].processEmissionFactor"]);

        let relaxed = EngineParameters::from_toml_str(
            "[plausibility_ranges.Calcination]\nmin = 0.1\nmax = 3.0\n",
        )
        .unwrap();
        assert!(validate_cbam_data_with(&data, &relaxed).warnings.is_empty());
    }

    #[test]
    fn test_override_rows_and_period() {
        let mut data = complete();
        data.installation_info.reporting_period_end = "2025-12-31".into();
        data.emission_factors = vec![
            EmissionFactorOverride {
                category: "Fuel".into(),
                name: "Natural gas".into(),
                value: Some(55.0),
                ..Default::default()
            },
            EmissionFactorOverride {
                category: "Fuel".into(),
                value: Some(-1.0),
                ..Default::default()
            },
            EmissionFactorOverride {
                category: "Mystery".into(),
                name: "Coal".into(),
                ..Default::default()
            },
        ];

        let report = validate_cbam_data(&data);
        assert_eq!(
            fields(&report.errors),
            vec![
                "emissionFactors[1].name",
                "emissionFactors[1].value",
                "emissionFactors[2].value",
            ]
        );
        assert_eq!(
            fields(&report.warnings),
            vec!["installationInfo.reportingPeriodEnd", "emissionFactors[2].category"]
        );
    }
}
