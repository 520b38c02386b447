//! Float helpers shared by the grid and rating code.

use crate::GtError;

/// Absolute and relative tolerance for comparing corrected ratings.
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: f64,
    pub rel: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

/// Within `tol.abs`, or within `tol.rel` of the larger magnitude.
pub fn nearly_equal(a: f64, b: f64, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    diff <= tol.abs || diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(value: f64, what: &'static str) -> Result<f64, GtError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(GtError::NonFinite { what, value })
    }
}

/// Grid axes must be strictly increasing for cell lookup.
pub fn is_strictly_increasing(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] < w[1])
}
