//! Installation-level emission sources
//!
//! Each source yields CO2 from the first applicable branch:
//!
//! 1. a stored `co2Emissions` value, used as-is
//! 2. activity level times emission factor
//! 3. a mass balance, activity × NCV × carbon content × oxidation × conversion
//!
//! The computed branches are reduced by the source's biomass fraction. CH4
//! and N2O quantities are then added at their global warming potentials.

use cbam_core::coerce::{number, percent_fraction, positive};
use cbam_core::model::InstallationEmissionSource;
use cbam_core::parameters::EngineParameters;
use std::collections::BTreeMap;

fn biomass_retained(source: &InstallationEmissionSource) -> f64 {
    1.0 - percent_fraction(source.biomass_fraction)
}

/// Fossil CO2 of one source, before the non-CO2 gases are added.
pub fn source_co2_emissions(
    source: &InstallationEmissionSource,
    parameters: &EngineParameters,
) -> f64 {
    if let Some(stored) = positive(source.co2_emissions) {
        return stored;
    }

    let activity = number(source.activity_level);
    let computed = match positive(source.emission_factor) {
        Some(factor) => activity * factor,
        None => {
            let oxidation =
                positive(source.oxidation_factor).unwrap_or(parameters.default_oxidation_factor);
            let conversion =
                positive(source.conversion_factor).unwrap_or(parameters.default_conversion_factor);
            activity
                * number(source.calorific_value)
                * number(source.carbon_content)
                * oxidation
                * conversion
        }
    };
    computed * biomass_retained(source)
}

/// CO2-equivalent emissions of one source.
pub fn source_emissions(source: &InstallationEmissionSource, parameters: &EngineParameters) -> f64 {
    source_co2_emissions(source, parameters)
        + number(source.ch4_emissions) * parameters.gwp_ch4
        + number(source.n2o_emissions) * parameters.gwp_n2o
}

/// Total CO2-equivalent emissions over all installation sources.
pub fn installation_source_emissions(
    sources: &[InstallationEmissionSource],
    parameters: &EngineParameters,
) -> f64 {
    sources
        .iter()
        .map(|source| source_emissions(source, parameters))
        .fold(0.0, |sum, value| sum + value)
}

/// Emissions keyed by source id.
///
/// Sources without an id are keyed `source-N` by their 1-based position.
/// Sources sharing an id are summed.
pub fn installation_source_breakdown(
    sources: &[InstallationEmissionSource],
    parameters: &EngineParameters,
) -> BTreeMap<String, f64> {
    let mut breakdown = BTreeMap::new();
    for (index, source) in sources.iter().enumerate() {
        let key = match source.source_id.trim() {
            "" => format!("source-{}", index + 1),
            id => id.to_string(),
        };
        *breakdown.entry(key).or_insert(0.0) += source_emissions(source, parameters);
    }
    breakdown
}
