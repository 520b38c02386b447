//! Correction tables.
//!
//! A table is either a 1D series (one axis, one value per label) or a 2D grid
//! (row axis × column axis). Axis labels come straight from the data source and
//! may be text; the interpolator rejects non-numeric axes when it is asked to
//! use them, so a table with a text header can still be loaded and inspected.

use crate::error::{TableError, TableResult};
use gt_core::is_strictly_increasing;
use std::fmt;

/// One axis label as read from the source.
#[derive(Debug, Clone, PartialEq)]
pub enum AxisLabel {
    Number(f64),
    Text(String),
}

impl AxisLabel {
    /// Numeric when the text parses as a float, text otherwise.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.parse::<f64>() {
            Ok(v) => AxisLabel::Number(v),
            Err(_) => AxisLabel::Text(trimmed.to_string()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            AxisLabel::Number(v) => Some(*v),
            AxisLabel::Text(_) => None,
        }
    }
}

impl fmt::Display for AxisLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisLabel::Number(v) => write!(f, "{v}"),
            AxisLabel::Text(s) => f.write_str(s),
        }
    }
}

/// Labelled table axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    /// Optional header name (e.g. the first CSV header cell).
    pub name: Option<String>,
    pub labels: Vec<AxisLabel>,
}

impl Axis {
    pub fn new(name: Option<String>, labels: Vec<AxisLabel>) -> Self {
        Self { name, labels }
    }

    pub fn numeric(values: Vec<f64>) -> Self {
        Self {
            name: None,
            labels: values.into_iter().map(AxisLabel::Number).collect(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Numeric grid coordinates, or `InvalidInput` naming the axis.
    ///
    /// `role` is the axis position ("index", "rows", "columns") used in errors.
    pub fn grid(&self, role: &str) -> TableResult<Vec<f64>> {
        let described = self.describe(role);
        if self.labels.is_empty() {
            return Err(TableError::invalid_input(described, "axis has no labels"));
        }
        let mut coords = Vec::with_capacity(self.labels.len());
        for label in &self.labels {
            match label.as_number() {
                Some(v) if v.is_finite() => coords.push(v),
                Some(v) => {
                    return Err(TableError::invalid_input(
                        described,
                        format!("axis label {v} is not finite"),
                    ));
                }
                None => {
                    return Err(TableError::invalid_input(
                        described,
                        format!("axis label '{label}' is not numeric"),
                    ));
                }
            }
        }
        if !is_strictly_increasing(&coords) {
            return Err(TableError::invalid_input(
                described,
                "axis labels must be strictly increasing",
            ));
        }
        Ok(coords)
    }

    fn describe(&self, role: &str) -> String {
        match &self.name {
            Some(name) if !name.is_empty() => format!("{role} axis '{name}'"),
            _ => format!("{role} axis"),
        }
    }
}

/// Single-axis table.
#[derive(Debug, Clone, PartialEq)]
pub struct Table1D {
    pub index: Axis,
    pub values: Vec<f64>,
}

/// Two-axis table: `values[row][column]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Table2D {
    pub rows: Axis,
    pub columns: Axis,
    pub values: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Table {
    OneD(Table1D),
    TwoD(Table2D),
}

impl Table {
    /// Build and shape-check a 1D table.
    pub fn one_d(index: Axis, values: Vec<f64>) -> TableResult<Self> {
        if index.len() != values.len() {
            return Err(TableError::Shape {
                what: "1D table values".to_string(),
                expected: index.len(),
                actual: values.len(),
            });
        }
        Ok(Table::OneD(Table1D { index, values }))
    }

    pub fn one_d_numeric(index: Vec<f64>, values: Vec<f64>) -> TableResult<Self> {
        Self::one_d(Axis::numeric(index), values)
    }

    /// Build and shape-check a 2D table.
    pub fn two_d(rows: Axis, columns: Axis, values: Vec<Vec<f64>>) -> TableResult<Self> {
        if rows.len() != values.len() {
            return Err(TableError::Shape {
                what: "2D table rows".to_string(),
                expected: rows.len(),
                actual: values.len(),
            });
        }
        for (i, row) in values.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(TableError::Shape {
                    what: format!("2D table row {i}"),
                    expected: columns.len(),
                    actual: row.len(),
                });
            }
        }
        Ok(Table::TwoD(Table2D {
            rows,
            columns,
            values,
        }))
    }

    pub fn two_d_numeric(rows: Vec<f64>, columns: Vec<f64>, values: Vec<Vec<f64>>) -> TableResult<Self> {
        Self::two_d(Axis::numeric(rows), Axis::numeric(columns), values)
    }

    /// Number of axes (1 or 2).
    pub fn ndim(&self) -> usize {
        match self {
            Table::OneD(_) => 1,
            Table::TwoD(_) => 2,
        }
    }

    /// `(rows, columns)`; 1D tables report a single column.
    pub fn shape(&self) -> (usize, usize) {
        match self {
            Table::OneD(t) => (t.index.len(), 1),
            Table::TwoD(t) => (t.rows.len(), t.columns.len()),
        }
    }
}
