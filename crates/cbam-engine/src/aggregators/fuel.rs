//! Fuel and energy combustion
//!
//! Direct emissions are consumption multiplied by the resolved factor of each
//! record, with the consumption taken in the unit it was entered in (the
//! factor is expected to match that unit).
//!
//! $$E_{direct} = \sum_i c_i \cdot f_i$$
//!
//! Biogenic CO2 is reported separately and never enters the totals.

use cbam_core::coerce::{number, percent_fraction, positive};
use cbam_core::factors::{FactorCategory, FactorResolver};
use cbam_core::gas::{GasBreakdown, GasType};
use cbam_core::model::EnergyFuelRecord;
use cbam_core::parameters::EngineParameters;

fn record_emissions(record: &EnergyFuelRecord, resolver: &FactorResolver, gas: GasType) -> f64 {
    let factor = resolver.resolve(
        FactorCategory::Fuel,
        &record.fuel_type,
        gas,
        record.factor_for(gas),
    );
    number(record.consumption) * factor
}

/// Total direct CO2 from fuel combustion.
pub fn direct_co2_emissions(records: &[EnergyFuelRecord], resolver: &FactorResolver) -> f64 {
    records
        .iter()
        .map(|record| record_emissions(record, resolver, GasType::Co2))
        .fold(0.0, |sum, value| sum + value)
}

/// Direct emissions from fuel combustion split by gas.
///
/// The CO2 component equals [`direct_co2_emissions`].
pub fn direct_emissions_breakdown(
    records: &[EnergyFuelRecord],
    resolver: &FactorResolver,
) -> GasBreakdown {
    let mut breakdown = GasBreakdown::default();
    for gas in GasType::ALL {
        let amount: f64 = records
            .iter()
            .map(|record| record_emissions(record, resolver, gas))
            .fold(0.0, |sum, value| sum + value);
        breakdown.add_gas(gas, amount);
    }
    breakdown
}

/// CO2 released by burning the biomass part of biogenic records.
///
/// Records count when flagged biogenic or of fuel type "Biomass". The biomass
/// fraction is the record's biomass share, or the whole consumption when no
/// share is given.
pub fn biogenic_co2_emissions(records: &[EnergyFuelRecord], parameters: &EngineParameters) -> f64 {
    records
        .iter()
        .filter(|record| record.is_biomass())
        .map(|record| {
            let fraction = positive(record.biomass_share)
                .map(|share| percent_fraction(Some(share)))
                .unwrap_or(1.0);
            number(record.consumption) * fraction * parameters.biomass_co2_factor
        })
        .fold(0.0, |sum, value| sum + value)
}
