//! Transport of imported materials
//!
//! Reported on its own; transport is not part of the installation total.

use cbam_core::coerce::{is_blank, number, positive};
use cbam_core::factors::{
    find_override, resolve_chain, FactorCategory, FactorResolver, FactorSource, LookupStep,
};
use cbam_core::gas::GasType;
use cbam_core::model::{ProcessInput, ProcessRecord};

/// Transport factor (t CO2 per tonne-km) for a mode label.
///
/// Looked up in the override table, then among the configured modes, then
/// the transport fallback.
pub fn transport_mode_factor(mode: &str, resolver: &FactorResolver) -> f64 {
    let transport = &resolver.parameters().transport;
    let from_overrides =
        || find_override(resolver.overrides(), FactorCategory::Transport, mode, GasType::Co2);
    let from_modes = || transport.mode_factor(mode);

    resolve_chain(
        &[
            LookupStep {
                source: FactorSource::Override,
                lookup: &from_overrides,
            },
            LookupStep {
                source: FactorSource::Default,
                lookup: &from_modes,
            },
        ],
        transport.fallback,
    )
    .value
}

/// Transport emissions of one input.
///
/// Only imported inputs with a positive distance and a transport mode count.
/// An entered total wins over distance × factor × quantity.
pub fn input_transport_emissions(input: &ProcessInput, resolver: &FactorResolver) -> f64 {
    let distance = number(input.transport_distance);
    if !input.is_imported_material() || distance <= 0.0 || is_blank(&input.transport_mode) {
        return 0.0;
    }
    match positive(input.transport_emissions) {
        Some(total) => total,
        None => {
            let factor = transport_mode_factor(&input.transport_mode, resolver);
            distance * factor * number(input.quantity)
        }
    }
}

/// Transport emissions over every input of every process.
pub fn transport_emissions(processes: &[ProcessRecord], resolver: &FactorResolver) -> f64 {
    processes
        .iter()
        .flat_map(|process| process.inputs.iter())
        .map(|input| input_transport_emissions(input, resolver))
        .fold(0.0, |sum, value| sum + value)
}
