//! Emission-factor resolution.
//!
//! Every aggregator asks for factors through the same ordered chain:
//!
//! 1. the value entered on the record itself
//! 2. the user's override table
//! 3. the built-in default table for the category
//! 4. a category fallback constant
//!
//! The chain is expressed once, as a list of lookup steps walked in order by
//! [`resolve_chain`]; the first step producing a finite, non-negative value wins.

use super::defaults::{
    FactorTable, DEFAULT_EMBEDDED_FACTORS, DEFAULT_FUEL_FACTORS, DEFAULT_PROCESS_FACTORS,
};
use super::overrides::{find_override, EmissionFactorOverride, FactorCategory};
use crate::coerce::{non_negative, positive};
use crate::gas::GasType;
use crate::parameters::EngineParameters;
use tracing::trace;

/// Where a resolved factor came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactorSource {
    Explicit,
    Override,
    Default,
    Fallback,
}

/// A resolved factor together with its origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedFactor {
    pub value: f64,
    pub source: FactorSource,
}

/// One step of a resolution chain.
pub struct LookupStep<'a> {
    pub source: FactorSource,
    pub lookup: &'a dyn Fn() -> Option<f64>,
}

/// Walks `chain` in order and returns the first usable value, else `fallback`.
///
/// Values that are negative or non-finite are skipped, so the result is
/// always finite and non-negative as long as `fallback` is.
pub fn resolve_chain(chain: &[LookupStep<'_>], fallback: f64) -> ResolvedFactor {
    chain
        .iter()
        .find_map(|step| {
            non_negative((step.lookup)()).map(|value| ResolvedFactor {
                value,
                source: step.source,
            })
        })
        .unwrap_or(ResolvedFactor {
            value: fallback,
            source: FactorSource::Fallback,
        })
}

/// The record's own value, if it is usable for `gas`.
///
/// For CO2 a zero means "not entered" and falls through to the next step;
/// for the other gases an explicit zero is a real answer.
pub fn explicit_candidate(gas: GasType, explicit: Option<f64>) -> Option<f64> {
    if gas.is_primary() {
        positive(explicit)
    } else {
        non_negative(explicit)
    }
}

/// Resolves a factor for (category, name, gas) from explicit value, overrides,
/// an optional default table and a fallback constant.
pub fn resolve_factor(
    category: FactorCategory,
    name: &str,
    gas: GasType,
    explicit: Option<f64>,
    overrides: &[EmissionFactorOverride],
    defaults: Option<&FactorTable>,
    fallback: f64,
) -> ResolvedFactor {
    let from_record = || explicit_candidate(gas, explicit);
    let from_overrides = || find_override(overrides, category, name, gas);
    let from_defaults = || defaults.and_then(|table| table.lookup(name, gas));

    let resolved = resolve_chain(
        &[
            LookupStep {
                source: FactorSource::Explicit,
                lookup: &from_record,
            },
            LookupStep {
                source: FactorSource::Override,
                lookup: &from_overrides,
            },
            LookupStep {
                source: FactorSource::Default,
                lookup: &from_defaults,
            },
        ],
        fallback,
    );
    trace!(
        category = %category,
        factor_name = %name,
        gas = %gas,
        value = resolved.value,
        source = ?resolved.source,
        "Resolved emission factor"
    );
    resolved
}

/// Built-in default table for a category, if it has one.
pub fn default_table(category: FactorCategory) -> Option<&'static FactorTable> {
    match category {
        FactorCategory::Fuel => Some(&*DEFAULT_FUEL_FACTORS),
        FactorCategory::Process => Some(&*DEFAULT_PROCESS_FACTORS),
        FactorCategory::Embedded => Some(&*DEFAULT_EMBEDDED_FACTORS),
        FactorCategory::Electricity | FactorCategory::Transport => None,
    }
}

/// Resolves factors against one snapshot's override table and the engine parameters.
#[derive(Debug, Clone, Copy)]
pub struct FactorResolver<'a> {
    overrides: &'a [EmissionFactorOverride],
    parameters: &'a EngineParameters,
}

impl<'a> FactorResolver<'a> {
    pub fn new(overrides: &'a [EmissionFactorOverride], parameters: &'a EngineParameters) -> Self {
        Self {
            overrides,
            parameters,
        }
    }

    pub fn parameters(&self) -> &'a EngineParameters {
        self.parameters
    }

    pub fn overrides(&self) -> &'a [EmissionFactorOverride] {
        self.overrides
    }

    /// Resolves a factor and reports which step supplied it.
    pub fn resolve_detailed(
        &self,
        category: FactorCategory,
        name: &str,
        gas: GasType,
        explicit: Option<f64>,
    ) -> ResolvedFactor {
        let fallback = if gas.is_primary() {
            self.parameters.fallback_factor(category)
        } else {
            0.0
        };
        resolve_factor(
            category,
            name,
            gas,
            explicit,
            self.overrides,
            default_table(category),
            fallback,
        )
    }

    /// Resolves a factor value.
    pub fn resolve(
        &self,
        category: FactorCategory,
        name: &str,
        gas: GasType,
        explicit: Option<f64>,
    ) -> f64 {
        self.resolve_detailed(category, name, gas, explicit).value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn override_row(category: &str, name: &str, gas: &str, value: f64) -> EmissionFactorOverride {
        EmissionFactorOverride {
            category: category.into(),
            name: name.into(),
            gas_type: gas.into(),
            value: Some(value),
            ..Default::default()
        }
    }

    #[test]
    fn test_priority_order() {
        let parameters = EngineParameters::default();
        let overrides = vec![override_row("Fuel", "natural gas", "CO2", 55.0)];
        let resolver = FactorResolver::new(&overrides, &parameters);

        let explicit = resolver.resolve_detailed(
            FactorCategory::Fuel,
            "Natural gas",
            GasType::Co2,
            Some(56.5),
        );
        assert_eq!(explicit.source, FactorSource::Explicit);
        assert_eq!(explicit.value, 56.5);

        let overridden =
            resolver.resolve_detailed(FactorCategory::Fuel, "Natural gas", GasType::Co2, None);
        assert_eq!(overridden.source, FactorSource::Override);
        assert_eq!(overridden.value, 55.0);

        let defaulted =
            resolver.resolve_detailed(FactorCategory::Fuel, "Diesel", GasType::Co2, Some(0.0));
        assert_eq!(defaulted.source, FactorSource::Default);
        assert_eq!(defaulted.value, 74.1);

        let fallback =
            resolver.resolve_detailed(FactorCategory::Process, "Mystery", GasType::Co2, None);
        assert_eq!(fallback.source, FactorSource::Fallback);
        assert_eq!(fallback.value, 0.1);
    }

    #[test]
    fn test_zero_is_explicit_only_for_secondary_gases() {
        let parameters = EngineParameters::default();
        let resolver = FactorResolver::new(&[], &parameters);

        let ch4 = resolver.resolve_detailed(FactorCategory::Fuel, "Coal", GasType::Ch4, Some(0.0));
        assert_eq!(ch4.source, FactorSource::Explicit);
        assert_eq!(ch4.value, 0.0);

        let co2 = resolver.resolve_detailed(FactorCategory::Fuel, "Coal", GasType::Co2, Some(0.0));
        assert_eq!(co2.source, FactorSource::Default);
        assert_eq!(co2.value, 94.6);
    }

    #[test]
    fn test_secondary_gas_fallback_is_zero() {
        let parameters = EngineParameters::default();
        let resolver = FactorResolver::new(&[], &parameters);
        assert_eq!(
            resolver.resolve(FactorCategory::Embedded, "Glass", GasType::N2o, None),
            0.0
        );
        assert_eq!(
            resolver.resolve(FactorCategory::Embedded, "Glass", GasType::Co2, None),
            0.5
        );
    }

    #[test]
    fn test_invalid_values_are_skipped() {
        let parameters = EngineParameters::default();
        let overrides = vec![override_row("Embedded", "Glass", "CO2", -3.0)];
        let resolver = FactorResolver::new(&overrides, &parameters);

        for explicit in [None, Some(-1.0), Some(f64::NAN), Some(f64::INFINITY)] {
            let resolved =
                resolver.resolve(FactorCategory::Embedded, "Glass", GasType::Co2, explicit);
            assert!(resolved.is_finite() && resolved >= 0.0);
            assert_eq!(resolved, 0.5);
        }
    }

    #[test]
    fn test_chain_without_steps_uses_fallback() {
        let resolved = resolve_chain(&[], 1.25);
        assert_eq!(resolved.value, 1.25);
        assert_eq!(resolved.source, FactorSource::Fallback);
    }
}
