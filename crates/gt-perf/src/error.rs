//! Error types for the coefficient engine.

use gt_tables::TableError;
use thiserror::Error;

pub type PerfResult<T> = Result<T, PerfError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PerfError {
    /// A table failed to evaluate; names the table so bad data can be found.
    #[error("Table '{table}' (group '{group}'): {source}")]
    Table {
        group: String,
        table: String,
        source: TableError,
    },

    #[error(transparent)]
    Tables(#[from] TableError),

    #[error("Invalid nameplate: {what}")]
    Nameplate { what: String },

    #[error("Ambient batch {batch}: {source}")]
    Batch {
        batch: usize,
        source: Box<PerfError>,
    },
}

impl PerfError {
    /// Underlying table error, if any, looking through table and batch context.
    pub fn table_error(&self) -> Option<&TableError> {
        match self {
            PerfError::Table { source, .. } => Some(source),
            PerfError::Tables(source) => Some(source),
            PerfError::Batch { source, .. } => source.table_error(),
            PerfError::Nameplate { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_context_in_message() {
        let err = PerfError::Table {
            group: "pressure".into(),
            table: "PA".into(),
            source: TableError::MissingColumn { column: "P".into() },
        };
        let msg = err.to_string();
        assert!(msg.contains("PA"));
        assert!(msg.contains("pressure"));
        assert!(msg.contains("'P'"));
    }

    #[test]
    fn table_error_looks_through_batches() {
        let err = PerfError::Batch {
            batch: 3,
            source: Box::new(PerfError::Tables(TableError::MissingGroup {
                group: "RH".into(),
            })),
        };
        assert!(matches!(
            err.table_error(),
            Some(TableError::MissingGroup { .. })
        ));
        assert!(err.to_string().contains("batch 3"));
    }
}
