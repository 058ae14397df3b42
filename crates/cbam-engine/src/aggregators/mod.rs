//! Source aggregators
//!
//! One module per input category. Each aggregator reads its records through
//! the safe coercion helpers, resolves factors through a shared
//! [`FactorResolver`](cbam_core::factors::FactorResolver) and sums. None of
//! them can fail: missing data contributes zero.

pub mod electricity;
pub mod embedded;
pub mod fuel;
pub mod installation;
pub mod process;
pub mod transport;

pub use electricity::{electricity_factor, GRID_ELECTRICITY};
pub use embedded::{
    embedded_emissions_breakdown, embedded_emissions_from_inputs,
    embedded_emissions_from_precursors, input_embedded_emissions, precursor_embedded_emissions,
};
pub use fuel::{biogenic_co2_emissions, direct_co2_emissions, direct_emissions_breakdown};
pub use installation::{
    installation_source_breakdown, installation_source_emissions, source_co2_emissions,
    source_emissions,
};
pub use process::{
    indirect_electricity_emissions, process_direct_emissions, process_emissions,
    process_emissions_breakdown, process_indirect_emissions, total_production,
};
pub use transport::{input_transport_emissions, transport_emissions, transport_mode_factor};
