//! Study files: one YAML document naming the inputs and the calculation.
//!
//! ```yaml
//! name: site-2023
//! mode: part_load
//! tables: tables
//! part_load_tables: part_load
//! ambient: weather.csv
//! ambient_index_column: period
//! nameplate: nameplate.yaml
//! extrapolate: error
//! output: out/performance.csv
//! ```
//!
//! Relative paths resolve against the study file's directory.

use crate::error::{AppError, AppResult};
use gt_perf::{Nameplate, PartLoadSettings};
use gt_tables::Extrapolate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudyMode {
    #[default]
    BaseLoad,
    PartLoad,
}

/// Nameplate given inline or as a path to a YAML file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NameplateSource {
    Inline(Nameplate),
    File(PathBuf),
}

impl Default for NameplateSource {
    fn default() -> Self {
        NameplateSource::Inline(Nameplate::default())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub mode: StudyMode,
    /// Directory of workbooks, or a single workbook
    pub tables: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_load_tables: Option<PathBuf>,
    pub ambient: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ambient_index_column: Option<String>,
    #[serde(default)]
    pub nameplate: NameplateSource,
    #[serde(default)]
    pub extrapolate: Extrapolate,
    #[serde(default)]
    pub part_load: PartLoadSettings,
    /// Rows per ambient batch; 0 evaluates all rows at once
    #[serde(default)]
    pub batch_rows: usize,
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

fn default_name() -> String {
    "study".to_string()
}

fn default_parallel() -> bool {
    true
}

impl StudyConfig {
    /// Copy with every relative path joined onto `base`.
    pub fn resolved(&self, base: &Path) -> Self {
        let join = |p: &Path| if p.is_absolute() { p.to_path_buf() } else { base.join(p) };
        let mut out = self.clone();
        out.tables = join(&self.tables);
        out.part_load_tables = self.part_load_tables.as_deref().map(join);
        out.ambient = join(&self.ambient);
        out.output = self.output.as_deref().map(join);
        if let NameplateSource::File(path) = &self.nameplate {
            out.nameplate = NameplateSource::File(join(path));
        }
        out
    }

    /// Part-load settings with the study-level `extrapolate` applied.
    ///
    /// `part_load.extrapolate` only takes effect when the study-level key is
    /// left at its default.
    pub fn part_load_settings(&self) -> PartLoadSettings {
        let extrapolate = if self.extrapolate == Extrapolate::default() {
            self.part_load.extrapolate
        } else {
            self.extrapolate
        };
        PartLoadSettings {
            extrapolate,
            ..self.part_load.clone()
        }
    }
}

/// Load a study file; relative paths are resolved against its directory.
pub fn load_study(path: &Path) -> AppResult<StudyConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::StudyFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let study: StudyConfig = serde_yaml::from_str(&content)
        .map_err(|e| AppError::Study(format!("Failed to parse study YAML: {}", e)))?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    let study = study.resolved(base);
    validate_study(&study)?;
    Ok(study)
}

pub fn validate_study(study: &StudyConfig) -> AppResult<()> {
    if study.mode == StudyMode::PartLoad && study.part_load_tables.is_none() {
        return Err(AppError::Validation(format!(
            "Study '{}' runs part load but names no part_load_tables",
            study.name
        )));
    }
    if study.part_load.load_column.is_empty() {
        return Err(AppError::Validation("part_load.load_column must not be empty".to_string()));
    }
    let nested = study.part_load.extrapolate;
    if study.extrapolate != Extrapolate::default()
        && nested != Extrapolate::default()
        && nested != study.extrapolate
    {
        return Err(AppError::Validation(format!(
            "Study '{}' sets extrapolate: {:?} but part_load.extrapolate: {:?}",
            study.name, study.extrapolate, nested
        )));
    }
    if let NameplateSource::Inline(np) = &study.nameplate {
        np.validate()?;
    }
    Ok(())
}
