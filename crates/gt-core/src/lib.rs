//! gt-core: stable foundation for gasturb.
//!
//! Contains:
//! - coefficient (the five correction slots A-E and how each one combines)
//! - units (uom SI types + constructors for rating units)
//! - numeric (tolerances + float helpers)
//! - error (shared error types)

pub mod coefficient;
pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use coefficient::{CoefficientIndex, Combination};
pub use error::{GtError, GtResult};
pub use numeric::*;
