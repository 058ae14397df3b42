use super::{ReportBuilder, ValidationReport};
use cbam_core::model::{ImportShare, ResultsSnapshot};
use cbam_core::parameters::EngineParameters;
use std::collections::BTreeMap;
use tracing::warn;

/// Checks a results snapshot for internal consistency, using the default tolerance.
pub fn validate_calculation_results(results: &ResultsSnapshot) -> ValidationReport {
    validate_calculation_results_with(results, EngineParameters::default().consistency_tolerance)
}

/// Checks a results snapshot for internal consistency.
///
/// Sub-totals may exceed the totals they feed by at most `tolerance`.
pub fn validate_calculation_results_with(
    results: &ResultsSnapshot,
    tolerance: f64,
) -> ValidationReport {
    let mut report = ReportBuilder::default();

    for (field, value) in results.aggregates() {
        if !value.is_finite() {
            report.error(field, format!("Must be a finite number (got {value})"));
        } else if value < 0.0 {
            report.error(field, format!("Must not be negative (got {value})"));
        }
    }

    let direct_and_process = results.total_direct_co2_emissions + results.total_process_emissions;
    if direct_and_process > results.total_emissions + tolerance {
        report.error(
            "totalEmissions",
            format!(
                "Direct and process emissions ({direct_and_process}) exceed total emissions ({})",
                results.total_emissions
            ),
        );
    }
    if results.total_embedded_emissions > results.cumulative_emissions + tolerance {
        report.error(
            "totalEmbeddedEmissions",
            format!(
                "Embedded emissions ({}) exceed cumulative emissions ({})",
                results.total_embedded_emissions, results.cumulative_emissions
            ),
        );
    }
    if results.total_emissions > results.cumulative_emissions + tolerance {
        report.error(
            "cumulativeEmissions",
            format!(
                "Total emissions ({}) exceed cumulative emissions ({})",
                results.total_emissions, results.cumulative_emissions
            ),
        );
    }

    share(&mut report, "renewableShare", results.renewable_share);
    share(&mut report, "importedMaterialShare", results.imported_material_share);
    bucket_shares(&mut report, "importShareByCountry", &results.import_share_by_country);
    bucket_shares(&mut report, "importShareByMaterial", &results.import_share_by_material);

    let report = report.finish();
    if !report.is_valid {
        warn!(errors = report.errors.len(), "Calculation results are inconsistent");
    }
    report
}

fn share(report: &mut ReportBuilder, field: &str, value: f64) {
    if !(0.0..=1.0).contains(&value) {
        report.error(field, format!("Share must be between 0 and 1 (got {value})"));
    }
}

fn bucket_shares(report: &mut ReportBuilder, field: &str, buckets: &BTreeMap<String, ImportShare>) {
    for (key, bucket) in buckets {
        share(report, &format!("{field}.{key}.share"), bucket.share);
    }
}
