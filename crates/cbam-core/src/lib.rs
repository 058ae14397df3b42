//! Core types for CBAM emissions reporting.
//!
//! This crate holds everything the calculation reads: the data snapshot
//! produced by the reporting form, lenient coercion of its fields, unit
//! normalization, the default emission-factor tables with the user override
//! table, and the engine parameters. The aggregation itself lives in
//! `cbam-engine`.

pub mod coerce;
pub mod errors;
pub mod factors;
pub mod gas;
pub mod model;
pub mod parameters;
pub mod units;
