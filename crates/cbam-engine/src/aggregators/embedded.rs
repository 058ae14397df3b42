//! Embedded emissions of consumed materials and purchased precursors.

use super::electricity::electricity_factor;
use cbam_core::coerce::{number, positive};
use cbam_core::factors::{FactorCategory, FactorResolver};
use cbam_core::gas::{GasBreakdown, GasType};
use cbam_core::model::{ProcessInput, ProcessRecord, PurchasedPrecursor};
use cbam_core::units::to_mwh;

/// Embedded CO2 of one process input.
///
/// An entered total wins; otherwise the quantity is multiplied by the
/// embedded factor resolved for the material name.
pub fn input_embedded_emissions(input: &ProcessInput, resolver: &FactorResolver) -> f64 {
    match positive(input.embedded_emissions) {
        Some(total) => total,
        None => {
            number(input.quantity)
                * resolver.resolve(
                    FactorCategory::Embedded,
                    &input.material_name,
                    GasType::Co2,
                    None,
                )
        }
    }
}

/// Embedded CO2 over every input of every process.
pub fn embedded_emissions_from_inputs(
    processes: &[ProcessRecord],
    resolver: &FactorResolver,
) -> f64 {
    processes
        .iter()
        .flat_map(|process| process.inputs.iter())
        .map(|input| input_embedded_emissions(input, resolver))
        .fold(0.0, |sum, value| sum + value)
}

/// Embedded CO2 of one purchased precursor: its direct emissions plus the
/// emissions of the electricity used to make it.
pub fn precursor_embedded_emissions(
    precursor: &PurchasedPrecursor,
    resolver: &FactorResolver,
) -> f64 {
    let direct = number(precursor.total_amount_consumed)
        * resolver.resolve(
            FactorCategory::Embedded,
            &precursor.name,
            GasType::Co2,
            precursor.specific_direct_embedded_emissions,
        );

    let consumption = number(precursor.electricity_consumption);
    let indirect = if consumption > 0.0 {
        to_mwh(consumption, &precursor.electricity_unit)
            * electricity_factor(
                resolver,
                precursor.electricity_emission_factor,
                &precursor.electricity_emission_factor_unit,
            )
    } else {
        0.0
    };

    direct + indirect
}

/// Embedded CO2 over all purchased precursors.
pub fn embedded_emissions_from_precursors(
    precursors: &[PurchasedPrecursor],
    resolver: &FactorResolver,
) -> f64 {
    precursors
        .iter()
        .map(|precursor| precursor_embedded_emissions(precursor, resolver))
        .fold(0.0, |sum, value| sum + value)
}

/// Embedded emissions of inputs and precursors split by gas.
///
/// The CO2 component is the same total reported by the two embedded
/// aggregators. Other gases only come from the override and default tables,
/// and inputs carrying an entered total contribute nothing beyond it.
pub fn embedded_emissions_breakdown(
    processes: &[ProcessRecord],
    precursors: &[PurchasedPrecursor],
    resolver: &FactorResolver,
) -> GasBreakdown {
    let mut breakdown = GasBreakdown::default();
    breakdown.add_gas(
        GasType::Co2,
        embedded_emissions_from_inputs(processes, resolver)
            + embedded_emissions_from_precursors(precursors, resolver),
    );

    let inputs = processes
        .iter()
        .flat_map(|process| process.inputs.iter())
        .filter(|input| positive(input.embedded_emissions).is_none())
        .map(|input| (input.material_name.as_str(), number(input.quantity)));
    let precursor_amounts = precursors
        .iter()
        .map(|precursor| (precursor.name.as_str(), number(precursor.total_amount_consumed)));
    let quantities: Vec<(&str, f64)> = inputs.chain(precursor_amounts).collect();

    for gas in GasType::ALL.into_iter().filter(|gas| !gas.is_primary()) {
        let amount: f64 = quantities
            .iter()
            .map(|(name, quantity)| {
                quantity * resolver.resolve(FactorCategory::Embedded, name, gas, None)
            })
            .fold(0.0, |sum, value| sum + value);
        breakdown.add_gas(gas, amount);
    }
    breakdown
}
