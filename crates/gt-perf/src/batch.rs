//! Evaluation over independent ambient batches.
//!
//! Every batch only borrows the shared tables and nameplate, so batches can
//! run on the rayon pool without coordination.

use crate::base_load::base_load_with;
use crate::error::{PerfError, PerfResult};
use crate::nameplate::Nameplate;
use crate::part_load::{PartLoadSettings, part_load};
use crate::record::PerformanceRecord;
use gt_tables::{AmbientConditions, Extrapolate, TableCollection};
use rayon::prelude::*;

/// Base load for each batch, in batch order.
pub fn base_load_batches(
    tables: &TableCollection,
    batches: &[AmbientConditions],
    nameplate: &Nameplate,
    extrapolate: Extrapolate,
    parallelize: bool,
) -> PerfResult<Vec<PerformanceRecord>> {
    run_batches(batches, parallelize, |ambient| {
        base_load_with(tables, ambient, nameplate, extrapolate)
    })
}

/// Part load for each batch, in batch order.
pub fn part_load_batches(
    tables: &TableCollection,
    part_tables: &TableCollection,
    batches: &[AmbientConditions],
    nameplate: &Nameplate,
    settings: &PartLoadSettings,
    parallelize: bool,
) -> PerfResult<Vec<PerformanceRecord>> {
    run_batches(batches, parallelize, |ambient| {
        part_load(tables, part_tables, ambient, nameplate, settings)
    })
}

fn run_batches<F>(
    batches: &[AmbientConditions],
    parallelize: bool,
    eval: F,
) -> PerfResult<Vec<PerformanceRecord>>
where
    F: Fn(&AmbientConditions) -> PerfResult<PerformanceRecord> + Sync,
{
    let tag = |batch: usize, e: PerfError| PerfError::Batch {
        batch,
        source: Box::new(e),
    };
    if parallelize {
        batches
            .par_iter()
            .enumerate()
            .map(|(i, ambient)| eval(ambient).map_err(|e| tag(i, e)))
            .collect()
    } else {
        batches
            .iter()
            .enumerate()
            .map(|(i, ambient)| eval(ambient).map_err(|e| tag(i, e)))
            .collect()
    }
}
