//! Unit normalization for energy quantities and electricity emission factors.
//!
//! Three common bases are used throughout the engine:
//!
//! | Quantity | Base | Unknown unit |
//! |----------|------|--------------|
//! | Fuel/energy consumption | TJ | contributes 0 |
//! | Electricity consumption | MWh | assumed to already be MWh |
//! | Electricity emission factor | t/MWh | assumed to already be t/MWh |
//!
//! Unit symbols are looked up in a small static registry after trimming and
//! ignoring ASCII case, with aliases for the spellings the form commonly
//! produces.
//!
//! # Conversion Factor Convention
//!
//! Every factor is the multiplier that converts FROM the registered unit
//! TO the base of its family. For example `GJ` has an energy factor of 1e-3
//! (1 GJ = 0.001 TJ).

use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::warn;

/// Gigajoules per megawatt-hour.
pub const GJ_PER_MWH: f64 = 3.6;

/// Family a registered unit belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitFamily {
    /// Energy amounts (TJ base).
    Energy,
    /// Emission intensity per unit of electricity (t/MWh base).
    ElectricityFactor,
}

/// A registered unit and its multiplier to the family base.
#[derive(Debug, Clone, Copy)]
pub struct UnitInfo {
    pub symbol: &'static str,
    pub family: UnitFamily,
    pub to_base_factor: f64,
}

/// The global unit registry.
pub static UNIT_REGISTRY: LazyLock<UnitRegistry> = LazyLock::new(UnitRegistry::new);

/// Registry of known units with their conversion factors.
#[derive(Debug)]
pub struct UnitRegistry {
    units: HashMap<String, UnitInfo>,
    aliases: HashMap<String, &'static str>,
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitRegistry {
    /// Creates a registry populated with the energy and factor units.
    pub fn new() -> Self {
        let mut registry = Self {
            units: HashMap::new(),
            aliases: HashMap::new(),
        };
        registry.register_energy_units();
        registry.register_electricity_factor_units();
        registry
    }

    /// Looks up a unit by symbol, resolving aliases. Whitespace and ASCII
    /// case are ignored.
    pub fn lookup(&self, symbol: &str) -> Option<UnitInfo> {
        let key = symbol.trim().to_ascii_lowercase();
        if let Some(info) = self.units.get(&key) {
            return Some(*info);
        }
        self.aliases
            .get(&key)
            .and_then(|canonical| self.units.get(&canonical.to_ascii_lowercase()))
            .copied()
    }

    /// Looks up a unit, requiring it to belong to `family`.
    pub fn lookup_in(&self, symbol: &str, family: UnitFamily) -> Option<UnitInfo> {
        self.lookup(symbol).filter(|info| info.family == family)
    }

    fn register(&mut self, symbol: &'static str, family: UnitFamily, to_base_factor: f64) {
        self.units.insert(
            symbol.to_ascii_lowercase(),
            UnitInfo {
                symbol,
                family,
                to_base_factor,
            },
        );
    }

    fn alias(&mut self, alias: &'static str, canonical: &'static str) {
        self.aliases.insert(alias.to_ascii_lowercase(), canonical);
    }

    fn register_energy_units(&mut self) {
        self.register("TJ", UnitFamily::Energy, 1.0);
        self.register("GJ", UnitFamily::Energy, 1e-3);
        self.register("MWh", UnitFamily::Energy, GJ_PER_MWH / 1000.0);
    }

    fn register_electricity_factor_units(&mut self) {
        self.register("t/MWh", UnitFamily::ElectricityFactor, 1.0);
        self.register("t/kWh", UnitFamily::ElectricityFactor, 1000.0);
        self.register("t/GJ", UnitFamily::ElectricityFactor, GJ_PER_MWH);

        self.alias("tCO2/MWh", "t/MWh");
        self.alias("tCO2/kWh", "t/kWh");
        self.alias("tCO2/GJ", "t/GJ");
        self.alias("t CO2/MWh", "t/MWh");
        self.alias("t CO2/kWh", "t/kWh");
        self.alias("t CO2/GJ", "t/GJ");
    }
}

/// Converts an energy amount to TJ.
///
/// Only GJ, MWh and TJ are recognised; any other unit converts to 0 so that
/// records with unusable units silently drop out of energy totals.
///
/// ```
/// use cbam_core::units::to_common_energy_unit;
///
/// assert_eq!(to_common_energy_unit(1000.0, "GJ"), 1.0);
/// assert_eq!(to_common_energy_unit(5.0, "litres"), 0.0);
/// ```
pub fn to_common_energy_unit(value: f64, unit: &str) -> f64 {
    match UNIT_REGISTRY.lookup_in(unit, UnitFamily::Energy) {
        Some(info) => value * info.to_base_factor,
        None => {
            if !unit.trim().is_empty() {
                warn!(unit = %unit, "Unrecognised energy unit; value excluded from energy totals");
            }
            0.0
        }
    }
}

/// Converts an electricity amount to MWh.
///
/// kWh, GJ and TJ are converted; anything else is taken to already be MWh.
pub fn to_mwh(value: f64, unit: &str) -> f64 {
    let unit = unit.trim();
    if unit.eq_ignore_ascii_case("kWh") {
        return value / 1000.0;
    }
    match UNIT_REGISTRY.lookup_in(unit, UnitFamily::Energy) {
        // via TJ -> GJ -> MWh
        Some(info) if info.symbol != "MWh" => value * info.to_base_factor * 1000.0 / GJ_PER_MWH,
        _ => value,
    }
}

/// Normalizes an electricity emission factor to t/MWh.
///
/// `t/kWh` is multiplied by 1000 and `t/GJ` by 3.6; any other unit is assumed
/// to already be expressed per MWh.
pub fn normalize_electricity_factor(value: f64, unit: &str) -> f64 {
    match UNIT_REGISTRY.lookup_in(unit, UnitFamily::ElectricityFactor) {
        Some(info) => value * info.to_base_factor,
        None => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use is_close::is_close;

    #[test]
    fn test_energy_to_tj() {
        assert!(is_close!(to_common_energy_unit(1000.0, "GJ"), 1.0));
        assert!(is_close!(to_common_energy_unit(1000.0 / 3.6, "MWh"), 1.0));
        assert!(is_close!(to_common_energy_unit(2.5, "TJ"), 2.5));
    }

    #[test]
    fn test_energy_aliases_and_whitespace() {
        assert!(is_close!(to_common_energy_unit(1000.0, " gj "), 1.0));
        assert!(is_close!(to_common_energy_unit(1000.0, "mwh"), 3.6));
        assert!(is_close!(to_common_energy_unit(1000.0, "Mwh"), 3.6));
        assert!(is_close!(to_common_energy_unit(2.0, "tJ"), 2.0));
    }

    #[test]
    fn test_unknown_energy_unit_is_zero() {
        assert_eq!(to_common_energy_unit(100.0, "kg"), 0.0);
        assert_eq!(to_common_energy_unit(100.0, ""), 0.0);
        // Factor units are not energy units
        assert_eq!(to_common_energy_unit(100.0, "t/MWh"), 0.0);
    }

    #[test]
    fn test_electricity_to_mwh() {
        assert!(is_close!(to_mwh(5000.0, "kWh"), 5.0));
        assert!(is_close!(to_mwh(36.0, "GJ"), 10.0));
        assert!(is_close!(to_mwh(3.6, "TJ"), 1000.0));
        assert!(is_close!(to_mwh(12.0, "MWh"), 12.0));
        assert!(is_close!(to_mwh(12.0, "unknown"), 12.0));
    }

    #[test]
    fn test_electricity_factor_normalization() {
        assert!(is_close!(normalize_electricity_factor(0.0005, "t/kWh"), 0.5));
        assert!(is_close!(normalize_electricity_factor(0.1, "t/GJ"), 0.36));
        assert!(is_close!(normalize_electricity_factor(0.475, "t/MWh"), 0.475));
        assert!(is_close!(normalize_electricity_factor(0.475, ""), 0.475));
    }

    #[test]
    fn test_factor_units_ignore_case() {
        assert!(is_close!(normalize_electricity_factor(0.0005, "t/kwh"), 0.5));
        assert!(is_close!(normalize_electricity_factor(0.0005, "T/KWH"), 0.5));
        assert!(is_close!(normalize_electricity_factor(0.1, "tco2/gj"), 0.36));
        assert!(is_close!(normalize_electricity_factor(0.0005, " t CO2/kWh "), 0.5));
    }

    #[test]
    fn test_registry_family_filter() {
        assert!(UNIT_REGISTRY.lookup_in("GJ", UnitFamily::Energy).is_some());
        assert!(UNIT_REGISTRY
            .lookup_in("GJ", UnitFamily::ElectricityFactor)
            .is_none());
        assert!(UNIT_REGISTRY.lookup("tCO2/kWh").is_some());
    }
}
