//! Emission factors: built-in defaults, user overrides and the resolution chain.

mod defaults;
mod overrides;
mod resolve;

pub use defaults::{
    default_embedded_emission_factor, default_fuel_emission_factor,
    default_process_emission_factor, FactorTable, DEFAULT_ELECTRICITY_FACTOR,
    DEFAULT_EMBEDDED_FACTORS, DEFAULT_FUEL_FACTORS, DEFAULT_PROCESS_FACTORS,
    FALLBACK_EMBEDDED_FACTOR, FALLBACK_FUEL_FACTOR, FALLBACK_PROCESS_FACTOR,
};
pub use overrides::{find_override, EmissionFactorOverride, FactorCategory};
pub use resolve::{
    default_table, explicit_candidate, resolve_chain, resolve_factor, FactorResolver,
    FactorSource, LookupStep, ResolvedFactor,
};
