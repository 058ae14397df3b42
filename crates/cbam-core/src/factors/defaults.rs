//! Built-in default emission-factor tables.
//!
//! The tables are immutable statics built on first use. Names are matched
//! case-insensitively after trimming.
//!
//! | Table | Unit | Fallback |
//! |-------|------|----------|
//! | Fuel | t gas / TJ (per unit of consumption) | 0 |
//! | Process | t gas / t product | 0.1 (CO2) |
//! | Embedded | t CO2 / t material | 0.5 |

use crate::gas::GasType;
use std::collections::HashMap;
use std::sync::LazyLock;

/// CO2 factor used for fuels that are not in the table.
pub const FALLBACK_FUEL_FACTOR: f64 = 0.0;
/// CO2 factor used for processes that are not in the table.
pub const FALLBACK_PROCESS_FACTOR: f64 = 0.1;
/// Embedded factor used for materials that are not in the table.
pub const FALLBACK_EMBEDDED_FACTOR: f64 = 0.5;
/// Grid electricity factor (t CO2 / MWh) used when none is given.
pub const DEFAULT_ELECTRICITY_FACTOR: f64 = 0.475;

/// Per-gas factors for one named entry, in [`GasType::ALL`] order.
type GasFactors = [f64; 4];

/// A name-keyed table of per-gas factors.
#[derive(Debug)]
pub struct FactorTable {
    entries: HashMap<String, GasFactors>,
}

impl FactorTable {
    fn from_entries(entries: &[(&str, GasFactors)]) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|(name, factors)| (normalize_key(name), *factors))
                .collect(),
        }
    }

    /// Looks up the factor for `name` and `gas`.
    pub fn lookup(&self, name: &str, gas: GasType) -> Option<f64> {
        let factors = self.entries.get(&normalize_key(name))?;
        let index = GasType::ALL.iter().position(|g| *g == gas)?;
        Some(factors[index])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&normalize_key(name))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn normalize_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Stationary combustion factors (IPCC 2006 defaults, converted to t/TJ).
pub static DEFAULT_FUEL_FACTORS: LazyLock<FactorTable> = LazyLock::new(|| {
    FactorTable::from_entries(&[
        //                     CO2     CH4     N2O     other
        ("Natural gas", [56.1, 0.001, 0.0001, 0.0]),
        ("Diesel", [74.1, 0.003, 0.0006, 0.0]),
        ("Gas oil", [74.1, 0.003, 0.0006, 0.0]),
        ("Fuel oil", [77.4, 0.003, 0.0006, 0.0]),
        ("Heavy fuel oil", [77.4, 0.003, 0.0006, 0.0]),
        ("Petrol", [69.3, 0.003, 0.0006, 0.0]),
        ("Kerosene", [71.9, 0.003, 0.0006, 0.0]),
        ("LPG", [63.1, 0.001, 0.0001, 0.0]),
        ("Coal", [94.6, 0.001, 0.0015, 0.0]),
        ("Hard coal", [94.6, 0.001, 0.0015, 0.0]),
        ("Lignite", [101.0, 0.001, 0.0015, 0.0]),
        ("Coke", [107.0, 0.001, 0.0015, 0.0]),
        ("Petroleum coke", [97.5, 0.003, 0.0006, 0.0]),
        // Biogenic CO2 is reported separately and zero-rated here
        ("Biomass", [0.0, 0.03, 0.004, 0.0]),
        ("Wood", [0.0, 0.03, 0.004, 0.0]),
        ("Electricity", [0.0, 0.0, 0.0, 0.0]),
    ])
});

/// Process emission factors per tonne of product.
pub static DEFAULT_PROCESS_FACTORS: LazyLock<FactorTable> = LazyLock::new(|| {
    FactorTable::from_entries(&[
        ("Calcination", [0.785, 0.0, 0.0, 0.0]),
        ("Clinker production", [0.525, 0.0, 0.0, 0.0]),
        ("Lime production", [0.751, 0.0, 0.0, 0.0]),
        ("Blast furnace", [1.328, 0.0, 0.0, 0.0]),
        ("Basic oxygen furnace", [0.085, 0.0, 0.0, 0.0]),
        ("Electric arc furnace", [0.08, 0.0, 0.0, 0.0]),
        ("Direct reduction", [0.7, 0.0, 0.0, 0.0]),
        ("Aluminium smelting", [1.6, 0.0, 0.0, 0.0]),
        ("Ammonia production", [1.694, 0.0, 0.0, 0.0]),
        ("Hydrogen production", [9.0, 0.0, 0.0, 0.0]),
        ("Nitric acid production", [0.0, 0.0, 0.0025, 0.0]),
        ("Adipic acid production", [0.0, 0.0, 0.27, 0.0]),
    ])
});

/// Embedded emissions per tonne of consumed material. Only CO2 has defaults.
pub static DEFAULT_EMBEDDED_FACTORS: LazyLock<FactorTable> = LazyLock::new(|| {
    FactorTable::from_entries(&[
        ("Iron Ore", [0.03, 0.0, 0.0, 0.0]),
        ("Iron ore pellets", [0.06, 0.0, 0.0, 0.0]),
        ("Limestone", [0.01, 0.0, 0.0, 0.0]),
        ("Coking coal", [0.15, 0.0, 0.0, 0.0]),
        ("Coke", [0.41, 0.0, 0.0, 0.0]),
        ("Scrap", [0.0, 0.0, 0.0, 0.0]),
        ("Pig iron", [1.9, 0.0, 0.0, 0.0]),
        ("Direct reduced iron", [1.1, 0.0, 0.0, 0.0]),
        ("Ferro-manganese", [1.4, 0.0, 0.0, 0.0]),
        ("Clinker", [0.84, 0.0, 0.0, 0.0]),
        ("Cement", [0.7, 0.0, 0.0, 0.0]),
        ("Bauxite", [0.01, 0.0, 0.0, 0.0]),
        ("Alumina", [0.6, 0.0, 0.0, 0.0]),
        ("Aluminium", [1.6, 0.0, 0.0, 0.0]),
        ("Ammonia", [1.9, 0.0, 0.0, 0.0]),
        ("Hydrogen", [9.0, 0.0, 0.0, 0.0]),
    ])
});

/// Default CO2 factor for a fuel, or the fuel fallback when it is not tabulated.
pub fn default_fuel_emission_factor(name: &str) -> f64 {
    DEFAULT_FUEL_FACTORS
        .lookup(name, GasType::Co2)
        .unwrap_or(FALLBACK_FUEL_FACTOR)
}

/// Default CO2 factor for a process type, or the process fallback.
pub fn default_process_emission_factor(name: &str) -> f64 {
    DEFAULT_PROCESS_FACTORS
        .lookup(name, GasType::Co2)
        .unwrap_or(FALLBACK_PROCESS_FACTOR)
}

/// Default embedded-emission factor for a material, or the embedded fallback.
pub fn default_embedded_emission_factor(name: &str) -> f64 {
    DEFAULT_EMBEDDED_FACTORS
        .lookup(name, GasType::Co2)
        .unwrap_or(FALLBACK_EMBEDDED_FACTOR)
}
