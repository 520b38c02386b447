//! Ambient condition CSV files.
//!
//! One header row naming the columns (`T`, `RH`, `P`, `PartLoad`, ...). An
//! optional index column supplies the row labels, otherwise rows are labelled
//! `0..n`. Every other column must be numeric.

use crate::{DataError, DataResult, ensure_exists};
use gt_tables::AmbientConditions;
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::debug;

pub fn parse_ambient_csv<R: Read>(
    reader: R,
    index_column: Option<&str>,
    source_name: &str,
) -> DataResult<AmbientConditions> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();

    let index_pos = match index_column {
        Some(name) => Some(headers.iter().position(|h| h == name).ok_or_else(|| {
            DataError::parse(source_name, format!("index column '{name}' not in header"))
        })?),
        None => None,
    };

    let mut rows = 0;
    let mut index = Vec::new();
    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); headers.len()];
    for (line, record) in rdr.records().enumerate() {
        let record = record?;
        rows += 1;
        for (pos, cell) in record.iter().enumerate() {
            if Some(pos) == index_pos {
                index.push(cell.to_string());
                continue;
            }
            let value = cell.parse::<f64>().map_err(|_| {
                DataError::parse(
                    source_name,
                    format!("row {} column '{}': '{cell}' is not a number", line + 1, &headers[pos]),
                )
            })?;
            columns[pos].push(value);
        }
    }

    let mut ambient = match index_pos {
        Some(_) => AmbientConditions::with_index(index),
        None => AmbientConditions::with_len(rows),
    };
    for (pos, values) in columns.into_iter().enumerate() {
        if Some(pos) == index_pos {
            continue;
        }
        ambient
            .insert_column(&headers[pos], values)
            .map_err(|e| DataError::table(source_name, e))?;
    }
    Ok(ambient)
}

pub fn read_ambient_csv(path: &Path, index_column: Option<&str>) -> DataResult<AmbientConditions> {
    ensure_exists(path)?;
    let file = fs::File::open(path)?;
    let ambient = parse_ambient_csv(file, index_column, &path.display().to_string())?;
    debug!(
        path = %path.display(),
        rows = ambient.len(),
        columns = ?ambient.column_names().collect::<Vec<_>>(),
        "ambient conditions loaded"
    );
    Ok(ambient)
}
