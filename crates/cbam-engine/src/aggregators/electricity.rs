//! Electricity emission factors shared by the process and precursor aggregators.

use cbam_core::coerce::positive;
use cbam_core::factors::{FactorCategory, FactorResolver};
use cbam_core::gas::GasType;
use cbam_core::units::normalize_electricity_factor;

/// Override-table name for grid electricity factors.
pub const GRID_ELECTRICITY: &str = "Grid electricity";

/// Resolves an electricity factor in t/MWh.
///
/// An entered factor is normalized by its unit; otherwise the override table
/// is consulted for [`GRID_ELECTRICITY`], then the default grid factor.
pub fn electricity_factor(
    resolver: &FactorResolver,
    factor: Option<f64>,
    factor_unit: &str,
) -> f64 {
    let explicit = positive(factor).map(|value| normalize_electricity_factor(value, factor_unit));
    resolver.resolve(
        FactorCategory::Electricity,
        GRID_ELECTRICITY,
        GasType::Co2,
        explicit,
    )
}
