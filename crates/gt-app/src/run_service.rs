//! Study execution.

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Utc};
use gt_perf::{Nameplate, PerformanceRecord, base_load_batches, part_load_batches};
use gt_tables::AmbientConditions;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::study::{self, NameplateSource, StudyConfig, StudyMode};
use crate::table_service;

/// Outcome of one study run.
#[derive(Debug, Clone)]
pub struct RunResponse {
    pub study: String,
    pub mode: StudyMode,
    pub record: PerformanceRecord,
    /// Where the CSV was written, if the study names an output
    pub output: Option<PathBuf>,
    pub batches: usize,
    pub finished_at: DateTime<Utc>,
    pub elapsed_s: f64,
}

/// Load a study file and run it.
pub fn run_study(path: &Path) -> AppResult<RunResponse> {
    let config = study::load_study(path)?;
    execute_study(&config)
}

/// Run an already resolved study.
pub fn execute_study(config: &StudyConfig) -> AppResult<RunResponse> {
    let start = Instant::now();
    study::validate_study(config)?;

    let tables = table_service::load_tables(&config.tables)?;
    let ambient = table_service::load_ambient(&config.ambient, config.ambient_index_column.as_deref())?;
    let nameplate = resolve_nameplate(&config.nameplate)?;
    let batches = ambient.chunks(config.batch_rows);

    info!(
        study = %config.name,
        mode = ?config.mode,
        rows = ambient.len(),
        batches = batches.len(),
        "running study"
    );

    let records = match config.mode {
        StudyMode::BaseLoad => {
            tables.check_ambient(&ambient)?;
            base_load_batches(
                &tables,
                &batches,
                &nameplate,
                config.extrapolate,
                config.parallel,
            )?
        }
        StudyMode::PartLoad => {
            let part_path = config.part_load_tables.as_deref().ok_or_else(|| {
                AppError::Validation("part load study without part_load_tables".to_string())
            })?;
            let part_tables = table_service::load_tables(part_path)?;
            part_load_batches(
                &tables,
                &part_tables,
                &batches,
                &nameplate,
                &config.part_load_settings(),
                config.parallel,
            )?
        }
    };
    let record = PerformanceRecord::concat(&records);

    if let Some(output) = &config.output {
        gt_data::write_performance_csv(output, &record)?;
    }

    Ok(RunResponse {
        study: config.name.clone(),
        mode: config.mode,
        record,
        output: config.output.clone(),
        batches: batches.len(),
        finished_at: Utc::now(),
        elapsed_s: start.elapsed().as_secs_f64(),
    })
}

pub fn resolve_nameplate(source: &NameplateSource) -> AppResult<Nameplate> {
    match source {
        NameplateSource::Inline(np) => {
            np.validate()?;
            Ok(np.clone())
        }
        NameplateSource::File(path) => Ok(gt_data::load_nameplate_yaml(path)?),
    }
}

/// Base-load coefficients for ad hoc inspection.
pub fn coefficient_table(
    tables_path: &Path,
    ambient: &AmbientConditions,
    extrapolate: gt_tables::Extrapolate,
) -> AppResult<gt_perf::Coefficients> {
    let tables = table_service::load_tables(tables_path)?;
    Ok(gt_perf::compute_coeffs_with(&tables, ambient, extrapolate)?)
}
