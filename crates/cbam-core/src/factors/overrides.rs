//! User-supplied emission-factor overrides.

use crate::coerce::{is_blank, lenient_number, lenient_text, non_negative, same_label};
use crate::gas::GasType;
use crate::units::normalize_electricity_factor;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Input category an override (or a default table) applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FactorCategory {
    Fuel,
    Process,
    Embedded,
    Electricity,
    Transport,
}

impl FactorCategory {
    /// Parses the category labels the form uses, ignoring case.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "fuel" | "energy" | "combustion" => Some(Self::Fuel),
            "process" | "processes" => Some(Self::Process),
            "embedded" | "material" | "materials" | "precursor" | "precursors" => {
                Some(Self::Embedded)
            }
            "electricity" => Some(Self::Electricity),
            "transport" => Some(Self::Transport),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fuel => "Fuel",
            Self::Process => "Process",
            Self::Embedded => "Embedded",
            Self::Electricity => "Electricity",
            Self::Transport => "Transport",
        }
    }
}

impl fmt::Display for FactorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the override table.
///
/// Category and gas type are kept as entered and parsed on use, so an
/// unrecognised label makes the row inert rather than breaking decoding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmissionFactorOverride {
    #[serde(deserialize_with = "lenient_text")]
    pub category: String,
    #[serde(deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(deserialize_with = "lenient_text")]
    pub gas_type: String,
    #[serde(deserialize_with = "lenient_number")]
    pub value: Option<f64>,
    #[serde(deserialize_with = "lenient_text")]
    pub unit: String,
    /// Free-form applicability tag (e.g. "default", "supplier-specific").
    #[serde(deserialize_with = "lenient_text")]
    pub applicability: String,
}

impl EmissionFactorOverride {
    pub fn category(&self) -> Option<FactorCategory> {
        FactorCategory::parse(&self.category)
    }

    /// The gas this row overrides; a blank gas type means CO2.
    pub fn gas(&self) -> Option<GasType> {
        GasType::parse(&self.gas_type)
    }

    /// True when the row can never be selected by a lookup.
    pub fn is_inert(&self) -> bool {
        self.category().is_none() || self.gas().is_none() || is_blank(&self.name)
    }

    pub fn matches(&self, category: FactorCategory, name: &str, gas: GasType) -> bool {
        self.category() == Some(category) && self.gas() == Some(gas) && same_label(&self.name, name)
    }

    /// The usable value, normalized to t/MWh for electricity rows.
    pub fn effective_value(&self) -> Option<f64> {
        let value = non_negative(self.value)?;
        match self.category() {
            Some(FactorCategory::Electricity) => {
                Some(normalize_electricity_factor(value, &self.unit))
            }
            _ => Some(value),
        }
    }
}

/// Finds the first override row matching (category, name, gas) with a usable value.
pub fn find_override(
    overrides: &[EmissionFactorOverride],
    category: FactorCategory,
    name: &str,
    gas: GasType,
) -> Option<f64> {
    if is_blank(name) {
        return None;
    }
    overrides
        .iter()
        .filter(|row| row.matches(category, name, gas))
        .find_map(EmissionFactorOverride::effective_value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(category: &str, name: &str, gas: &str, value: f64) -> EmissionFactorOverride {
        EmissionFactorOverride {
            category: category.into(),
            name: name.into(),
            gas_type: gas.into(),
            value: Some(value),
            ..Default::default()
        }
    }

    #[test]
    fn test_match_is_case_insensitive_on_name() {
        let overrides = vec![row("Embedded", "Iron Ore", "CO2", 0.07)];
        assert_eq!(
            find_override(&overrides, FactorCategory::Embedded, "iron ore", GasType::Co2),
            Some(0.07)
        );
        assert_eq!(
            find_override(&overrides, FactorCategory::Fuel, "iron ore", GasType::Co2),
            None
        );
        assert_eq!(
            find_override(&overrides, FactorCategory::Embedded, "iron ore", GasType::Ch4),
            None
        );
    }

    #[test]
    fn test_first_usable_row_wins() {
        let overrides = vec![
            row("fuel", "Coal", "", -1.0),
            row("fuel", "Coal", "co2", 90.0),
            row("fuel", "Coal", "CO2", 80.0),
        ];
        assert_eq!(
            find_override(&overrides, FactorCategory::Fuel, "Coal", GasType::Co2),
            Some(90.0)
        );
    }

    #[test]
    fn test_electricity_rows_are_normalized() {
        let mut electricity = row("Electricity", "Grid", "CO2", 0.0004);
        electricity.unit = "t/kWh".into();
        assert!((electricity.effective_value().unwrap() - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_inert_rows() {
        assert!(row("Spaceship", "X", "CO2", 1.0).is_inert());
        assert!(row("Fuel", "", "CO2", 1.0).is_inert());
        assert!(row("Fuel", "Coal", "XYZ", 1.0).is_inert());
        assert!(!row("Fuel", "Coal", "", 1.0).is_inert());
    }
}
