//! Base load performance.

use crate::coeffs::compute_coeffs_with;
use crate::error::PerfResult;
use crate::nameplate::Nameplate;
use crate::record::PerformanceRecord;
use gt_tables::{AmbientConditions, Extrapolate, TableCollection};
use tracing::info;

/// Performance at 100% load corrected for `ambient`, strict grid policy.
pub fn base_load(
    tables: &TableCollection,
    ambient: &AmbientConditions,
    nameplate: &Nameplate,
) -> PerfResult<PerformanceRecord> {
    base_load_with(tables, ambient, nameplate, Extrapolate::Error)
}

/// Performance at 100% load: aggregate every table in `tables` at `ambient`
/// and combine the coefficients with the nameplate ratings.
///
/// Returns one row per ambient row, in the ambient row order and with the
/// ambient row labels.
pub fn base_load_with(
    tables: &TableCollection,
    ambient: &AmbientConditions,
    nameplate: &Nameplate,
    extrapolate: Extrapolate,
) -> PerfResult<PerformanceRecord> {
    nameplate.validate()?;
    info!(
        model = %nameplate.model,
        rows = ambient.len(),
        tables = tables.table_count(),
        "computing base load performance"
    );
    let coeffs = compute_coeffs_with(tables, ambient, extrapolate)?;
    PerformanceRecord::from_coefficients(nameplate, &coeffs, ambient.index())
}
