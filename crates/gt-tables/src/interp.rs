//! Grid interpolation over correction tables.
//!
//! Linear interpolation for 1D tables and bilinear interpolation for 2D tables,
//! over strictly increasing rectilinear grids. The query shape must match the
//! table: a 1D table takes a vector of scalars, a 2D table takes an N×2 array
//! of `(row, column)` pairs.
//!
//! What happens to points outside the grid is decided by [`Extrapolate`]. The
//! default is [`Extrapolate::Error`], the strict policy: every point is bounds
//! checked before anything is computed, so a failing query never yields a
//! partial result.

use crate::error::{TableError, TableResult};
use crate::table::Table;
use serde::{Deserialize, Serialize};

/// Out-of-grid policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extrapolate {
    /// Reject points outside the grid.
    #[default]
    Error,
    /// Restrict points to the grid bounds.
    Clamp,
    /// Extend the edge cell linearly.
    Linear,
}

/// Interpolation query points.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// One scalar per point (ndim 1).
    Vector(Vec<f64>),
    /// Row-major `N × columns` array (ndim 2).
    Matrix { columns: usize, data: Vec<f64> },
}

impl Query {
    pub fn vector(points: Vec<f64>) -> Self {
        Query::Vector(points)
    }

    /// Build an N×k array, checking that `data` holds whole rows.
    pub fn matrix(columns: usize, data: Vec<f64>) -> TableResult<Self> {
        if columns == 0 || data.len() % columns != 0 {
            return Err(TableError::invalid_input(
                "query",
                format!(
                    "{} values cannot be split into rows of {columns} columns",
                    data.len()
                ),
            ));
        }
        Ok(Query::Matrix { columns, data })
    }

    /// N×2 array from two equally long columns.
    pub fn pairs(first: &[f64], second: &[f64]) -> TableResult<Self> {
        if first.len() != second.len() {
            return Err(TableError::Shape {
                what: "query pair columns".to_string(),
                expected: first.len(),
                actual: second.len(),
            });
        }
        let data = first
            .iter()
            .zip(second)
            .flat_map(|(&a, &b)| [a, b])
            .collect();
        Ok(Query::Matrix { columns: 2, data })
    }

    pub fn ndim(&self) -> usize {
        match self {
            Query::Vector(_) => 1,
            Query::Matrix { .. } => 2,
        }
    }

    /// Number of query points.
    pub fn len(&self) -> usize {
        match self {
            Query::Vector(v) => v.len(),
            Query::Matrix { columns, data } => data.len() / (*columns).max(1),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn describe(&self) -> String {
        match self {
            Query::Vector(v) => format!("a 1D array of {} values", v.len()),
            Query::Matrix { columns, .. } => format!("an N×{columns} array"),
        }
    }
}

/// Interpolate `table` at every query point.
///
/// Returns one value per point, in query order.
///
/// # Errors
/// - `InvalidInput` when the query dimensionality does not match the table,
///   an axis is non-numeric or unsorted, or a value is not finite.
/// - `OutOfBounds` for points outside the grid under [`Extrapolate::Error`].
pub fn multi_interp(table: &Table, query: &Query, extrapolate: Extrapolate) -> TableResult<Vec<f64>> {
    match (table, query) {
        (Table::OneD(t), Query::Vector(points)) => {
            let xs = t.index.grid("index")?;
            ensure_finite_values(t.values.iter().copied())?;
            let points = bound_axis(&xs, points.iter().copied(), extrapolate, "index")?;
            Ok(points
                .into_iter()
                .map(|x| {
                    let (lo, hi, w) = bracket(&xs, x);
                    lerp(t.values[lo], t.values[hi], w)
                })
                .collect())
        }
        (Table::TwoD(t), Query::Matrix { columns: 2, data }) => {
            let xs = t.rows.grid("rows")?;
            let ys = t.columns.grid("columns")?;
            ensure_finite_values(t.values.iter().flatten().copied())?;
            let row_points = bound_axis(&xs, data.iter().step_by(2).copied(), extrapolate, "rows")?;
            let col_points = bound_axis(
                &ys,
                data.iter().skip(1).step_by(2).copied(),
                extrapolate,
                "columns",
            )?;
            Ok(row_points
                .into_iter()
                .zip(col_points)
                .map(|(x, y)| {
                    let (x_l, x_u, x_w) = bracket(&xs, x);
                    let (y_l, y_u, y_w) = bracket(&ys, y);

                    // interpolate along rows
                    let c0 = lerp(t.values[x_l][y_l], t.values[x_u][y_l], x_w);
                    let c1 = lerp(t.values[x_l][y_u], t.values[x_u][y_u], x_w);

                    // then along columns
                    lerp(c0, c1, y_w)
                })
                .collect())
        }
        (Table::OneD(_), q) => Err(TableError::invalid_input(
            "query",
            format!(
                "1D interpolation needs a 1D array with a numeric index, got {}",
                q.describe()
            ),
        )),
        (Table::TwoD(_), q) => Err(TableError::invalid_input(
            "query",
            format!(
                "2D interpolation needs an N×2 array with numeric rows and columns, got {}",
                q.describe()
            ),
        )),
    }
}

fn ensure_finite_values(mut values: impl Iterator<Item = f64>) -> TableResult<()> {
    match values.find(|v| !v.is_finite()) {
        Some(v) => Err(TableError::invalid_input(
            "values",
            format!("table value {v} is not finite"),
        )),
        None => Ok(()),
    }
}

/// Apply the out-of-grid policy to every point on one axis.
fn bound_axis(
    grid: &[f64],
    points: impl Iterator<Item = f64>,
    extrapolate: Extrapolate,
    role: &str,
) -> TableResult<Vec<f64>> {
    let min = grid[0];
    let max = grid[grid.len() - 1];
    points
        .map(|p| {
            if !p.is_finite() {
                return Err(TableError::invalid_input(
                    format!("query {role}"),
                    format!("query value {p} is not finite"),
                ));
            }
            match extrapolate {
                Extrapolate::Error if p < min || p > max => Err(TableError::OutOfBounds {
                    axis: role.to_string(),
                    value: p,
                    min,
                    max,
                }),
                Extrapolate::Clamp => Ok(p.clamp(min, max)),
                _ => Ok(p),
            }
        })
        .collect()
}

/// Exact at both ends and on flat cells.
fn lerp(a: f64, b: f64, w: f64) -> f64 {
    if a == b { a } else { a * (1.0 - w) + b * w }
}

/// Lower and upper grid indices around `x` and the weight of the upper one.
///
/// Points beyond the grid use the edge cell, so the weight falls outside
/// `[0, 1]` and the result extrapolates linearly.
fn bracket(grid: &[f64], x: f64) -> (usize, usize, f64) {
    if grid.len() == 1 {
        return (0, 0, 0.0);
    }
    let lo = find_lower_index(grid, x);
    let hi = lo + 1;
    let w = (x - grid[lo]) / (grid[hi] - grid[lo]);
    (lo, hi, w)
}

/// Index of the lower corner of the cell containing `x`, in `0..=len-2`.
fn find_lower_index(grid: &[f64], x: f64) -> usize {
    let at_or_below = grid.partition_point(|&g| g <= x);
    at_or_below.saturating_sub(1).min(grid.len() - 2)
}
