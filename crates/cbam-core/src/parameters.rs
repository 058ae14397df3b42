//! Engine parameters
//!
//! Every constant the calculation depends on lives here, with defaults
//! matching the regulatory default values. Parameters can be loaded from a
//! TOML document; fields that are not given keep their defaults.
//!
//! ```toml
//! gwp_ch4 = 25.0
//!
//! [transport]
//! road = 0.00007
//!
//! [plausibility_ranges.Calcination]
//! min = 0.3
//! max = 1.2
//! ```

use crate::coerce::same_label;
use crate::errors::{CbamError, CbamResult};
use crate::factors::{
    FactorCategory, DEFAULT_ELECTRICITY_FACTOR, FALLBACK_EMBEDDED_FACTOR, FALLBACK_FUEL_FACTOR,
    FALLBACK_PROCESS_FACTOR,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Emission factors for transport of imported materials.
///
/// unit: t CO2 per tonne-kilometre
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportParameters {
    /// default: 0.000062
    pub road: f64,
    /// default: 0.000022
    pub rail: f64,
    /// default: 0.000008
    pub sea: f64,
    /// default: 0.000602
    pub air: f64,
    /// Used for any mode that is not recognised.
    /// default: 0.00005
    pub fallback: f64,
}

impl Default for TransportParameters {
    fn default() -> Self {
        Self {
            road: 0.000062,
            rail: 0.000022,
            sea: 0.000008,
            air: 0.000602,
            fallback: 0.00005,
        }
    }
}

impl TransportParameters {
    /// Factor for a recognised transport mode label, ignoring case.
    pub fn mode_factor(&self, mode: &str) -> Option<f64> {
        match mode.trim().to_ascii_lowercase().as_str() {
            "road" | "truck" | "lorry" => Some(self.road),
            "rail" | "train" => Some(self.rail),
            "sea" | "ship" | "maritime" | "inland waterway" => Some(self.sea),
            "air" | "plane" | "aircraft" => Some(self.air),
            _ => None,
        }
    }

    /// Factor for any transport mode label, using the fallback for unknown modes.
    pub fn factor_for_mode(&self, mode: &str) -> f64 {
        self.mode_factor(mode).unwrap_or(self.fallback)
    }

    fn values(&self) -> [(&'static str, f64); 5] {
        [
            ("transport.road", self.road),
            ("transport.rail", self.rail),
            ("transport.sea", self.sea),
            ("transport.air", self.air),
            ("transport.fallback", self.fallback),
        ]
    }
}

/// Expected range of a process emission factor (t CO2 / t product).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlausibilityRange {
    pub min: f64,
    pub max: f64,
}

impl PlausibilityRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Parameters for the emissions calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineParameters {
    /// Global warming potential of CH4
    /// unit: t CO2e / t CH4
    /// default: 28.0
    pub gwp_ch4: f64,

    /// Global warming potential of N2O
    /// unit: t CO2e / t N2O
    /// default: 265.0
    pub gwp_n2o: f64,

    /// Oxidation factor used by mass-balance sources that leave it blank
    /// unit: dimensionless
    /// default: 1.0
    pub default_oxidation_factor: f64,

    /// Carbon to CO2 conversion used by mass-balance sources (44/12)
    /// unit: t CO2 / t C
    /// default: 3.667
    pub default_conversion_factor: f64,

    /// CO2 released per unit of biomass burned
    /// unit: t CO2 / t biomass
    /// default: 1.83
    pub biomass_co2_factor: f64,

    /// Grid electricity factor when none is entered or overridden
    /// unit: t CO2 / MWh
    /// default: 0.475
    pub default_electricity_factor: f64,

    /// CO2 factor for fuels missing from the default table
    /// default: 0.0
    pub fallback_fuel_factor: f64,

    /// CO2 factor for processes missing from the default table
    /// default: 0.1
    pub fallback_process_factor: f64,

    /// Embedded factor for materials missing from the default table
    /// default: 0.5
    pub fallback_embedded_factor: f64,

    /// Slack allowed when checking that sub-totals do not exceed totals
    /// default: 1e-6
    pub consistency_tolerance: f64,

    pub transport: TransportParameters,

    /// Expected factor range per process type; values outside produce warnings.
    pub plausibility_ranges: BTreeMap<String, PlausibilityRange>,
}

impl Default for EngineParameters {
    fn default() -> Self {
        Self {
            gwp_ch4: 28.0,
            gwp_n2o: 265.0,
            default_oxidation_factor: 1.0,
            default_conversion_factor: 3.667,
            biomass_co2_factor: 1.83,
            default_electricity_factor: DEFAULT_ELECTRICITY_FACTOR,
            fallback_fuel_factor: FALLBACK_FUEL_FACTOR,
            fallback_process_factor: FALLBACK_PROCESS_FACTOR,
            fallback_embedded_factor: FALLBACK_EMBEDDED_FACTOR,
            consistency_tolerance: 1e-6,
            transport: TransportParameters::default(),
            plausibility_ranges: default_plausibility_ranges(),
        }
    }
}

fn default_plausibility_ranges() -> BTreeMap<String, PlausibilityRange> {
    [
        ("Calcination", 0.3, 1.2),
        ("Clinker production", 0.4, 1.0),
        ("Lime production", 0.6, 1.0),
        ("Blast furnace", 1.0, 2.5),
        ("Electric arc furnace", 0.03, 0.6),
        ("Aluminium smelting", 1.2, 2.2),
        ("Ammonia production", 1.5, 2.5),
        ("Hydrogen production", 8.0, 12.0),
    ]
    .into_iter()
    .map(|(name, min, max)| (name.to_string(), PlausibilityRange::new(min, max)))
    .collect()
}

impl EngineParameters {
    /// Parses parameters from TOML and validates them.
    pub fn from_toml_str(source: &str) -> CbamResult<Self> {
        let parameters: Self = toml::from_str(source)?;
        parameters.validate()?;
        Ok(parameters)
    }

    /// Serializes the parameters to TOML.
    pub fn to_toml_string(&self) -> CbamResult<String> {
        Ok(toml::to_string(self)?)
    }

    /// Checks that every constant is finite and in its physical range.
    pub fn validate(&self) -> CbamResult<()> {
        let non_negative = [
            ("gwp_ch4", self.gwp_ch4),
            ("gwp_n2o", self.gwp_n2o),
            ("default_conversion_factor", self.default_conversion_factor),
            ("biomass_co2_factor", self.biomass_co2_factor),
            ("default_electricity_factor", self.default_electricity_factor),
            ("fallback_fuel_factor", self.fallback_fuel_factor),
            ("fallback_process_factor", self.fallback_process_factor),
            ("fallback_embedded_factor", self.fallback_embedded_factor),
            ("consistency_tolerance", self.consistency_tolerance),
        ];
        for (name, value) in non_negative.into_iter().chain(self.transport.values()) {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(name, value, "must be finite and non-negative"));
            }
        }

        if !(self.default_oxidation_factor > 0.0 && self.default_oxidation_factor <= 1.0) {
            return Err(invalid(
                "default_oxidation_factor",
                self.default_oxidation_factor,
                "must be in (0, 1]",
            ));
        }

        for (process, range) in &self.plausibility_ranges {
            if !(range.min.is_finite() && range.max.is_finite()) || range.min > range.max {
                return Err(invalid(
                    &format!("plausibility_ranges.{process}.min"),
                    range.min,
                    "must be finite and not exceed max",
                ));
            }
        }
        Ok(())
    }

    /// CO2 fallback for a category once every lookup has failed.
    pub fn fallback_factor(&self, category: FactorCategory) -> f64 {
        match category {
            FactorCategory::Fuel => self.fallback_fuel_factor,
            FactorCategory::Process => self.fallback_process_factor,
            FactorCategory::Embedded => self.fallback_embedded_factor,
            FactorCategory::Electricity => self.default_electricity_factor,
            FactorCategory::Transport => self.transport.fallback,
        }
    }

    /// Plausibility range for a process type, matched case-insensitively.
    pub fn plausibility_range(&self, process_type: &str) -> Option<&PlausibilityRange> {
        self.plausibility_ranges
            .iter()
            .find(|(name, _)| same_label(name, process_type))
            .map(|(_, range)| range)
    }
}

fn invalid(name: &str, value: f64, reason: &str) -> CbamError {
    CbamError::InvalidParameter {
        name: name.to_string(),
        value,
        reason: reason.to_string(),
    }
}
