//! Workbook loading.
//!
//! Sheet layout, shared by spreadsheet and CSV sheets:
//!
//! ```text
//! P,50,100        <- first cell names the row axis, the rest are column labels
//! 0,0.90,0.80
//! 50,1.00,0.90
//! 100,1.10,1.00
//! ```
//!
//! A sheet with a single value column loads as a 1D table indexed by the first
//! column. A workbook is an `.xlsx`/`.xlsm`/`.xls`/`.ods` spreadsheet, a
//! directory of `.csv` sheets, or a YAML file mapping sheet names to either
//! `{ rows, columns, values }` (2D) or `{ index, values }` (1D).

use crate::{DataError, DataResult, ensure_exists};
use calamine::{Data, Range, Reader, open_workbook_auto};
use gt_tables::{Axis, AxisLabel, Table, TableCollection, TableGroup};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const SPREADSHEET_EXTENSIONS: [&str; 4] = ["xlsx", "xlsm", "xls", "ods"];
const YAML_EXTENSIONS: [&str; 2] = ["yaml", "yml"];

/// Build a table from a header row and data rows of raw cell text.
fn build_table(sheet: &str, header: &[String], rows: &[Vec<String>]) -> DataResult<Table> {
    if header.len() < 2 {
        return Err(DataError::parse(
            sheet,
            format!("expected an axis column and at least one value column, got {} columns", header.len()),
        ));
    }
    let row_name = Some(header[0].clone()).filter(|s| !s.is_empty());
    let column_labels: Vec<AxisLabel> = header.iter().skip(1).map(|h| AxisLabel::parse(h)).collect();

    let mut row_labels = Vec::with_capacity(rows.len());
    let mut values = Vec::with_capacity(rows.len());
    for (line, record) in rows.iter().enumerate() {
        let mut cells = record.iter();
        let label = cells.next().map(String::as_str).unwrap_or_default();
        row_labels.push(AxisLabel::parse(label));
        let row = cells
            .enumerate()
            .map(|(col, cell)| {
                cell.parse::<f64>().map_err(|_| {
                    DataError::parse(
                        sheet,
                        format!("row {} column {}: '{cell}' is not a number", line + 1, col + 2),
                    )
                })
            })
            .collect::<DataResult<Vec<f64>>>()?;
        values.push(row);
    }
    if row_labels.is_empty() {
        return Err(DataError::parse(sheet, "sheet has no data rows"));
    }

    let rows = Axis::new(row_name, row_labels);
    let table = if column_labels.len() == 1 {
        let series = values.into_iter().map(|row| row.first().copied()).collect::<Option<Vec<f64>>>();
        let series = series.ok_or_else(|| DataError::parse(sheet, "empty value cell in 1D sheet"))?;
        Table::one_d(rows, series)
    } else {
        Table::two_d(rows, Axis::new(None, column_labels), values)
    };
    table.map_err(|e| DataError::table(sheet, e))
}

/// Parse one CSV sheet; `sheet` names the source in errors.
pub fn parse_table_csv<R: Read>(reader: R, sheet: &str) -> DataResult<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let header: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for record in rdr.records() {
        rows.push(record?.iter().map(str::to_string).collect());
    }
    build_table(sheet, &header, &rows)
}

/// Read one CSV sheet from disk.
pub fn read_table_csv(path: &Path) -> DataResult<Table> {
    ensure_exists(path)?;
    let file = fs::File::open(path)?;
    parse_table_csv(file, &path.display().to_string())
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        other => other.to_string(),
    }
}

/// Parse one spreadsheet range: the first row is the header, the first
/// column the row axis. Blank rows are skipped.
pub fn parse_table_range(range: &Range<Data>, sheet: &str) -> DataResult<Table> {
    let mut lines = range
        .rows()
        .filter(|row| row.iter().any(|c| !matches!(c, Data::Empty)))
        .map(|row| row.iter().map(cell_text).collect::<Vec<String>>());
    let header = lines
        .next()
        .ok_or_else(|| DataError::parse(sheet, "sheet is empty"))?;
    let rows: Vec<Vec<String>> = lines.collect();
    build_table(sheet, &header, &rows)
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SheetDoc {
    Grid {
        rows: Vec<f64>,
        columns: Vec<f64>,
        values: Vec<Vec<f64>>,
    },
    Series {
        index: Vec<f64>,
        values: Vec<f64>,
    },
}

/// Read a workbook: a spreadsheet file, a directory of `.csv` sheets or a
/// `.yaml`/`.yml` file.
///
/// Sheets become tables named after the sheet (file stem for CSV), so every
/// sheet name must be a valid table name.
pub fn read_workbook(path: &Path) -> DataResult<TableGroup> {
    ensure_exists(path)?;
    let group = if path.is_dir() {
        read_csv_workbook(path)?
    } else if has_extension(path, &SPREADSHEET_EXTENSIONS) {
        read_spreadsheet(path)?
    } else if has_extension(path, &YAML_EXTENSIONS) {
        read_yaml_workbook(path)?
    } else {
        return Err(DataError::parse(
            path.display().to_string(),
            "unsupported workbook format",
        ));
    };
    debug!(path = %path.display(), sheets = group.len(), "workbook loaded");
    Ok(group)
}

fn read_spreadsheet(path: &Path) -> DataResult<TableGroup> {
    let mut workbook = open_workbook_auto(path)?;
    let names = workbook.sheet_names();
    if names.is_empty() {
        return Err(DataError::NoData {
            path: path.to_path_buf(),
            what: "sheets".to_string(),
        });
    }
    let source = path.display().to_string();
    let mut group = TableGroup::new();
    for name in names {
        let range = workbook.worksheet_range(&name)?;
        let table = parse_table_range(&range, &format!("{source} sheet '{name}'"))?;
        group
            .insert(&name, table)
            .map_err(|e| DataError::table(source.clone(), e))?;
    }
    Ok(group)
}

fn read_csv_workbook(dir: &Path) -> DataResult<TableGroup> {
    let sheets = sorted_entries(dir, |p| has_extension(p, &["csv"]))?;
    if sheets.is_empty() {
        return Err(DataError::NoData {
            path: dir.to_path_buf(),
            what: ".csv sheets".to_string(),
        });
    }
    let mut group = TableGroup::new();
    for sheet in sheets {
        let name = file_stem(&sheet)?;
        let table = read_table_csv(&sheet)?;
        group
            .insert(&name, table)
            .map_err(|e| DataError::table(sheet.display().to_string(), e))?;
    }
    Ok(group)
}

fn read_yaml_workbook(path: &Path) -> DataResult<TableGroup> {
    let content = fs::read_to_string(path)?;
    let sheets: BTreeMap<String, SheetDoc> = serde_yaml::from_str(&content)?;
    if sheets.is_empty() {
        return Err(DataError::NoData {
            path: path.to_path_buf(),
            what: "sheets".to_string(),
        });
    }
    let source = path.display().to_string();
    let mut group = TableGroup::new();
    for (name, sheet) in sheets {
        let table = match sheet {
            SheetDoc::Grid { rows, columns, values } => Table::two_d_numeric(rows, columns, values),
            SheetDoc::Series { index, values } => Table::one_d_numeric(index, values),
        }
        .map_err(|e| DataError::table(format!("{source} sheet '{name}'"), e))?;
        group
            .insert(&name, table)
            .map_err(|e| DataError::table(source.clone(), e))?;
    }
    Ok(group)
}

/// Load every workbook under `dir`, keyed by workbook stem.
///
/// Spreadsheet files, subdirectories of CSV sheets and `.yaml`/`.yml` files
/// are workbooks; anything else is ignored. Workbooks load in file name order.
pub fn read_collection_dir(dir: &Path) -> DataResult<TableCollection> {
    if !dir.is_dir() {
        return Err(DataError::FileNotFound {
            path: dir.to_path_buf(),
        });
    }
    let workbooks = sorted_entries(dir, |p| {
        p.is_dir() || has_extension(p, &SPREADSHEET_EXTENSIONS) || has_extension(p, &YAML_EXTENSIONS)
    })?;
    if workbooks.is_empty() {
        return Err(DataError::NoData {
            path: dir.to_path_buf(),
            what: "workbooks".to_string(),
        });
    }

    let mut collection = TableCollection::new();
    for path in workbooks {
        let key = file_stem(&path)?;
        let group = read_workbook(&path)?;
        collection
            .insert_group(key, group)
            .map_err(|e| DataError::table(path.display().to_string(), e))?;
    }
    info!(
        dir = %dir.display(),
        groups = collection.len(),
        tables = collection.table_count(),
        "table collection loaded"
    );
    Ok(collection)
}

fn sorted_entries(dir: &Path, keep: impl Fn(&Path) -> bool) -> DataResult<Vec<PathBuf>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if keep(&path) {
            entries.push(path);
        }
    }
    entries.sort();
    Ok(entries)
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| extensions.iter().any(|x| e.eq_ignore_ascii_case(x)))
}

fn file_stem(path: &Path) -> DataResult<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .ok_or_else(|| DataError::parse(path.display().to_string(), "file name is not valid UTF-8"))
}
