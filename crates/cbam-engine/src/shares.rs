//! Renewable-energy and imported-material shares.

use cbam_core::coerce::{number, percent_fraction, ratio};
use cbam_core::model::{EnergyFuelRecord, ImportShare, ProcessInput, ProcessRecord};
use cbam_core::units::to_common_energy_unit;
use std::collections::BTreeMap;

/// Energy consumption in TJ and its renewable part.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EnergyTotals {
    pub total: f64,
    pub renewable: f64,
    /// `renewable / total`, or 0 when there is no energy.
    pub share: f64,
}

/// Renewable energy of one record in TJ.
///
/// Biomass counts in full. Electricity counts by its renewable share.
/// Everything else is fossil.
fn renewable_energy(record: &EnergyFuelRecord, energy: f64) -> f64 {
    if record.is_biomass() {
        energy
    } else if record.is_electricity() {
        energy * percent_fraction(record.renewable_share)
    } else {
        0.0
    }
}

/// Total and renewable energy over all fuel records, in TJ.
///
/// Records whose unit cannot be converted to TJ are left out of both sums.
pub fn energy_totals(records: &[EnergyFuelRecord]) -> EnergyTotals {
    let (total, renewable) = records.iter().fold((0.0, 0.0), |(total, renewable), record| {
        let energy = to_common_energy_unit(number(record.consumption), &record.unit);
        (total + energy, renewable + renewable_energy(record, energy))
    });
    EnergyTotals {
        total,
        renewable,
        share: ratio(renewable, total),
    }
}

/// Renewable fraction of the energy consumed, 0 when none was consumed.
pub fn renewable_share(records: &[EnergyFuelRecord]) -> f64 {
    energy_totals(records).share
}

fn all_inputs(processes: &[ProcessRecord]) -> impl Iterator<Item = &ProcessInput> {
    processes.iter().flat_map(|process| process.inputs.iter())
}

fn add_to_bucket(bucket: &mut ImportShare, input: &ProcessInput) {
    let quantity = number(input.quantity);
    bucket.total_quantity += quantity;
    if input.is_imported_material() {
        bucket.imported_quantity += quantity;
    }
}

fn bucket_inputs<'a, F>(processes: &'a [ProcessRecord], key: F) -> BTreeMap<String, ImportShare>
where
    F: Fn(&'a ProcessInput) -> &'a str,
{
    let mut buckets: BTreeMap<String, ImportShare> = BTreeMap::new();
    for input in all_inputs(processes) {
        let bucket = buckets.entry(key(input).to_string()).or_default();
        add_to_bucket(bucket, input);
    }
    for bucket in buckets.values_mut() {
        bucket.share = ratio(bucket.imported_quantity, bucket.total_quantity);
    }
    buckets
}

/// Imported fraction of all input quantities.
///
/// See [`ProcessInput::is_imported_material`] for the classification.
pub fn imported_material_share(processes: &[ProcessRecord]) -> f64 {
    let mut overall = ImportShare::default();
    for input in all_inputs(processes) {
        add_to_bucket(&mut overall, input);
    }
    ratio(overall.imported_quantity, overall.total_quantity)
}

/// Import shares bucketed by country of origin.
pub fn import_share_by_country(processes: &[ProcessRecord]) -> BTreeMap<String, ImportShare> {
    bucket_inputs(processes, ProcessInput::country_key)
}

/// Import shares bucketed by material name.
pub fn import_share_by_material(processes: &[ProcessRecord]) -> BTreeMap<String, ImportShare> {
    bucket_inputs(processes, ProcessInput::material_key)
}
