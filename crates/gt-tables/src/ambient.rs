//! Ambient conditions: the evaluation points for a performance calculation.
//!
//! Column-oriented: a row index (labels, e.g. timestamps) and named `f64`
//! columns of the same length. Column order is kept as inserted so output can
//! mirror the input.

use crate::error::{TableError, TableResult};

/// Ambient temperature column.
pub const TEMPERATURE: &str = "T";
/// Relative humidity column.
pub const RELATIVE_HUMIDITY: &str = "RH";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AmbientConditions {
    index: Vec<String>,
    columns: Vec<(String, Vec<f64>)>,
}

impl AmbientConditions {
    /// Empty record set with the given row labels.
    pub fn with_index(index: Vec<String>) -> Self {
        Self {
            index,
            columns: Vec::new(),
        }
    }

    /// Empty record set with rows labelled `0..len`.
    pub fn with_len(len: usize) -> Self {
        Self::with_index((0..len).map(|i| i.to_string()).collect())
    }

    /// Build from columns; rows are labelled `0..len`.
    pub fn from_columns<I, S>(columns: I) -> TableResult<Self>
    where
        I: IntoIterator<Item = (S, Vec<f64>)>,
        S: Into<String>,
    {
        let mut columns = columns.into_iter().peekable();
        let len = columns.peek().map(|(_, v)| v.len()).unwrap_or(0);
        let mut ambient = Self::with_len(len);
        for (name, values) in columns {
            ambient.insert_column(name, values)?;
        }
        Ok(ambient)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn index(&self) -> &[String] {
        &self.index
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|(n, _)| n == name)
    }

    pub fn column(&self, name: &str) -> TableResult<&[f64]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
            .ok_or_else(|| TableError::MissingColumn {
                column: name.to_string(),
            })
    }

    /// Add a new column; fails on length mismatch or an existing name.
    pub fn insert_column(&mut self, name: impl Into<String>, values: Vec<f64>) -> TableResult<()> {
        let name = name.into();
        if self.has_column(&name) {
            return Err(TableError::Duplicate {
                what: "ambient column",
                key: name,
            });
        }
        self.check_len(&name, &values)?;
        self.columns.push((name, values));
        Ok(())
    }

    /// Replace a column's values, adding the column if it is absent.
    pub fn set_column(&mut self, name: &str, values: Vec<f64>) -> TableResult<()> {
        self.check_len(name, &values)?;
        match self.columns.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = values,
            None => self.columns.push((name.to_string(), values)),
        }
        Ok(())
    }

    /// Set every row of a column to `value`, adding the column if it is absent.
    pub fn set_constant(&mut self, name: &str, value: f64) {
        let values = vec![value; self.len()];
        match self.columns.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = values,
            None => self.columns.push((name.to_string(), values)),
        }
    }

    /// Multiply a column element-wise by `factors`.
    pub fn scale_column(&mut self, name: &str, factors: &[f64]) -> TableResult<()> {
        self.check_len(name, factors)?;
        let column = self
            .columns
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values)
            .ok_or_else(|| TableError::MissingColumn {
                column: name.to_string(),
            })?;
        for (v, f) in column.iter_mut().zip(factors) {
            *v *= f;
        }
        Ok(())
    }

    /// Copy holding only `names`, in that order; the index is kept.
    pub fn select(&self, names: &[&str]) -> TableResult<Self> {
        let mut selected = Self::with_index(self.index.clone());
        for name in names {
            selected.insert_column(*name, self.column(name)?.to_vec())?;
        }
        Ok(selected)
    }

    /// Consecutive batches of at most `rows` rows; `rows == 0` keeps one batch.
    pub fn chunks(&self, rows: usize) -> Vec<Self> {
        if rows == 0 || rows >= self.len() {
            return vec![self.clone()];
        }
        (0..self.len())
            .step_by(rows)
            .map(|start| {
                let end = (start + rows).min(self.len());
                Self {
                    index: self.index[start..end].to_vec(),
                    columns: self
                        .columns
                        .iter()
                        .map(|(name, values)| (name.clone(), values[start..end].to_vec()))
                        .collect(),
                }
            })
            .collect()
    }

    fn check_len(&self, name: &str, values: &[f64]) -> TableResult<()> {
        if values.len() != self.len() {
            return Err(TableError::Shape {
                what: format!("ambient column '{name}'"),
                expected: self.len(),
                actual: values.len(),
            });
        }
        Ok(())
    }
}
