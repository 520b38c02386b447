//! Table loading and introspection.

use std::path::Path;

use gt_core::CoefficientIndex;
use gt_tables::{AmbientConditions, TableCollection, TableGroup};

use crate::error::{AppError, AppResult};

/// Summary of one correction table for listing.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSummary {
    pub group: String,
    pub name: String,
    pub family: String,
    pub coefficient: CoefficientIndex,
    pub shape: (usize, usize),
    /// Temperature probes are evaluated but never applied
    pub probe: bool,
}

/// Load tables from a directory of workbooks or from one workbook.
///
/// A spreadsheet or YAML file, or a directory holding `.csv` sheets, is a single
/// workbook and becomes a one-group collection keyed by its stem.
pub fn load_tables(path: &Path) -> AppResult<TableCollection> {
    if is_single_workbook(path)? {
        let key = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| AppError::InvalidInput(format!("bad workbook path {}", path.display())))?;
        let group: TableGroup = gt_data::read_workbook(path)?;
        Ok(TableCollection::new().with_group(key, group)?)
    } else {
        Ok(gt_data::read_collection_dir(path)?)
    }
}

fn is_single_workbook(path: &Path) -> AppResult<bool> {
    if path.is_file() {
        return Ok(true);
    }
    if !path.is_dir() {
        return Ok(false);
    }
    for entry in std::fs::read_dir(path)? {
        let entry = entry?.path();
        if entry.is_file() && entry.extension().is_some_and(|e| e.eq_ignore_ascii_case("csv")) {
            return Ok(true);
        }
    }
    Ok(false)
}

pub fn load_ambient(path: &Path, index_column: Option<&str>) -> AppResult<AmbientConditions> {
    Ok(gt_data::read_ambient_csv(path, index_column)?)
}

pub fn summarize_tables(tables: &TableCollection) -> Vec<TableSummary> {
    tables
        .tables()
        .map(|(group, name, table)| TableSummary {
            group: group.to_string(),
            name: name.to_string(),
            family: name.family().to_string(),
            coefficient: name.index(),
            shape: table.shape(),
            probe: name.is_temperature_probe(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gt_tables::Table;

    #[test]
    fn summaries_follow_collection_order() {
        let tables = TableCollection::new()
            .with_group(
                "T",
                TableGroup::new()
                    .with("TA", Table::one_d_numeric(vec![0.0, 1.0], vec![1.0, 1.0]).unwrap())
                    .unwrap(),
            )
            .unwrap()
            .with_group(
                "RH",
                TableGroup::new()
                    .with(
                        "RHD",
                        Table::two_d_numeric(vec![0.0, 1.0], vec![0.0], vec![vec![0.0], vec![0.0]])
                            .unwrap(),
                    )
                    .unwrap(),
            )
            .unwrap();
        let summary = summarize_tables(&tables);
        assert_eq!(summary.len(), 2);
        assert!(summary[0].probe);
        assert_eq!(summary[1].family, "RH");
        assert_eq!(summary[1].coefficient, CoefficientIndex::D);
        assert_eq!(summary[1].shape, (2, 1));
    }

    #[test]
    fn missing_path_is_a_data_error() {
        let err = load_tables(Path::new("/definitely/not/here")).unwrap_err();
        assert!(matches!(err, AppError::Data(_)));
    }
}
