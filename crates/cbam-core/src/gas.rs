//! Greenhouse gas types and per-gas totals.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};

/// Gas types tracked separately in emission breakdowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GasType {
    #[serde(rename = "CO2")]
    Co2,
    #[serde(rename = "CH4")]
    Ch4,
    #[serde(rename = "N2O")]
    N2o,
    #[serde(rename = "otherGwp")]
    OtherGwp,
}

impl GasType {
    pub const ALL: [GasType; 4] = [GasType::Co2, GasType::Ch4, GasType::N2o, GasType::OtherGwp];

    /// Parses the labels used in override tables, ignoring case and spacing.
    ///
    /// A blank label is read as CO2, the primary gas.
    pub fn parse(label: &str) -> Option<Self> {
        let normalized: String = label
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "" | "co2" => Some(Self::Co2),
            "ch4" => Some(Self::Ch4),
            "n2o" => Some(Self::N2o),
            "othergwp" | "other" | "othergases" | "pfc" | "pfcs" => Some(Self::OtherGwp),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Co2 => "CO2",
            Self::Ch4 => "CH4",
            Self::N2o => "N2O",
            Self::OtherGwp => "otherGwp",
        }
    }

    pub fn is_primary(&self) -> bool {
        matches!(self, Self::Co2)
    }
}

impl fmt::Display for GasType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Emissions split by gas type, with a derived total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasBreakdown {
    pub co2: f64,
    pub ch4: f64,
    pub n2o: f64,
    pub other_gwp: f64,
    pub total: f64,
}

impl GasBreakdown {
    /// Builds a breakdown from the four gas amounts, computing the total.
    pub fn new(co2: f64, ch4: f64, n2o: f64, other_gwp: f64) -> Self {
        Self {
            co2,
            ch4,
            n2o,
            other_gwp,
            total: co2 + ch4 + n2o + other_gwp,
        }
    }

    pub fn get(&self, gas: GasType) -> f64 {
        match gas {
            GasType::Co2 => self.co2,
            GasType::Ch4 => self.ch4,
            GasType::N2o => self.n2o,
            GasType::OtherGwp => self.other_gwp,
        }
    }

    /// Adds `amount` to one gas and keeps the total in step.
    pub fn add_gas(&mut self, gas: GasType, amount: f64) {
        match gas {
            GasType::Co2 => self.co2 += amount,
            GasType::Ch4 => self.ch4 += amount,
            GasType::N2o => self.n2o += amount,
            GasType::OtherGwp => self.other_gwp += amount,
        }
        self.total += amount;
    }
}

impl Add for GasBreakdown {
    type Output = GasBreakdown;

    fn add(self, rhs: Self) -> Self::Output {
        GasBreakdown::new(
            self.co2 + rhs.co2,
            self.ch4 + rhs.ch4,
            self.n2o + rhs.n2o,
            self.other_gwp + rhs.other_gwp,
        )
    }
}

impl AddAssign for GasBreakdown {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}
