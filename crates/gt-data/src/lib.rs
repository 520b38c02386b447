//! gt-data: file formats for correction tables, ambient data, nameplates and
//! performance output.
//!
//! A workbook is a set of named sheets, stored as a spreadsheet file, a
//! directory of `.csv` files or one `.yaml` file. A directory of workbooks loads as a
//! [`TableCollection`](gt_tables::TableCollection) keyed by workbook stem.

pub mod ambient;
pub mod nameplate;
pub mod output;
pub mod workbook;

pub use ambient::{parse_ambient_csv, read_ambient_csv};
pub use nameplate::load_nameplate_yaml;
pub use output::{write_performance, write_performance_csv};
pub use workbook::{
    parse_table_csv, parse_table_range, read_collection_dir, read_table_csv, read_workbook,
};

use std::path::PathBuf;

pub type DataResult<T> = Result<T, DataError>;

#[derive(thiserror::Error, Debug)]
pub enum DataError {
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("No {what} found in {}", path.display())]
    NoData { path: PathBuf, what: String },

    #[error("Parse error in {source_name}: {what}")]
    Parse { source_name: String, what: String },

    #[error("Table error in {source_name}: {source}")]
    Table {
        source_name: String,
        source: gt_tables::TableError,
    },

    #[error("Invalid nameplate: {0}")]
    Nameplate(#[from] gt_perf::PerfError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DataError {
    pub(crate) fn parse(source_name: impl Into<String>, what: impl Into<String>) -> Self {
        DataError::Parse {
            source_name: source_name.into(),
            what: what.into(),
        }
    }

    pub(crate) fn table(source_name: impl Into<String>, source: gt_tables::TableError) -> Self {
        DataError::Table {
            source_name: source_name.into(),
            source,
        }
    }
}

/// `FileNotFound` when `path` does not exist.
pub(crate) fn ensure_exists(path: &std::path::Path) -> DataResult<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(DataError::FileNotFound {
            path: path.to_path_buf(),
        })
    }
}
