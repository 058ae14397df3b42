//! Production processes
//!
//! Direct process emissions are production multiplied by the resolved
//! process factor, keyed by process type or, failing that, process name.
//! Indirect emissions come from the electricity a process consumes, net of
//! what it exports, and are only counted when the process has indirect
//! emissions enabled.

use super::electricity::electricity_factor;
use cbam_core::coerce::number;
use cbam_core::factors::{FactorCategory, FactorResolver};
use cbam_core::gas::{GasBreakdown, GasType};
use cbam_core::model::{ElectricityFlow, ProcessRecord};
use cbam_core::units::to_mwh;

fn gas_emissions(process: &ProcessRecord, resolver: &FactorResolver, gas: GasType) -> f64 {
    let factor = resolver.resolve(
        FactorCategory::Process,
        process.factor_key(),
        gas,
        process.factor_for(gas),
    );
    process.production() * factor
}

/// Direct CO2 of one process.
pub fn process_direct_emissions(process: &ProcessRecord, resolver: &FactorResolver) -> f64 {
    gas_emissions(process, resolver, GasType::Co2)
}

/// Total direct CO2 over all processes.
pub fn process_emissions(processes: &[ProcessRecord], resolver: &FactorResolver) -> f64 {
    processes
        .iter()
        .map(|process| process_direct_emissions(process, resolver))
        .fold(0.0, |sum, value| sum + value)
}

/// Direct process emissions split by gas.
pub fn process_emissions_breakdown(
    processes: &[ProcessRecord],
    resolver: &FactorResolver,
) -> GasBreakdown {
    let mut breakdown = GasBreakdown::default();
    for process in processes {
        for gas in GasType::ALL {
            breakdown.add_gas(gas, gas_emissions(process, resolver, gas));
        }
    }
    breakdown
}

fn electricity_flow_emissions(flow: &ElectricityFlow, resolver: &FactorResolver) -> f64 {
    let amount = number(flow.amount);
    if amount <= 0.0 {
        return 0.0;
    }
    to_mwh(amount, &flow.unit)
        * electricity_factor(resolver, flow.emission_factor, &flow.emission_factor_unit)
}

/// Indirect emissions of one process from consumed electricity.
///
/// Exported electricity is credited against consumption; the result never
/// goes below zero.
pub fn indirect_electricity_emissions(process: &ProcessRecord, resolver: &FactorResolver) -> f64 {
    if !process.applicable_elements.indirect_emissions {
        return 0.0;
    }
    let consumed = electricity_flow_emissions(&process.electricity_consumption, resolver);
    let exported = electricity_flow_emissions(&process.electricity_export, resolver);
    (consumed - exported).max(0.0)
}

/// Total indirect electricity emissions over all processes.
pub fn process_indirect_emissions(processes: &[ProcessRecord], resolver: &FactorResolver) -> f64 {
    processes
        .iter()
        .map(|process| indirect_electricity_emissions(process, resolver))
        .fold(0.0, |sum, value| sum + value)
}

/// Summed production over all processes.
pub fn total_production(processes: &[ProcessRecord]) -> f64 {
    processes
        .iter()
        .map(ProcessRecord::production)
        .fold(0.0, |sum, value| sum + value)
}
