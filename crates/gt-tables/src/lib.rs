//! gt-tables: correction tables, ambient conditions and grid interpolation.
//!
//! Provides:
//! - `Table` (1D series or 2D grid with labelled axes)
//! - `TableName` (family + coefficient letter parsed from a table name)
//! - `TableCollection` (group key -> table name -> table)
//! - `AmbientConditions` (column-oriented evaluation points)
//! - `multi_interp` (linear / bilinear lookup with an explicit out-of-bounds policy)
//!
//! # Example
//!
//! ```
//! use gt_tables::{multi_interp, Extrapolate, Query, Table};
//!
//! let table = Table::one_d_numeric(vec![50.0, 100.0], vec![1.0, 0.9]).unwrap();
//! let out = multi_interp(&table, &Query::vector(vec![75.0]), Extrapolate::Error).unwrap();
//! assert!((out[0] - 0.95).abs() < 1e-12);
//! ```

pub mod ambient;
pub mod collection;
pub mod error;
pub mod interp;
pub mod name;
pub mod table;

// Re-exports
pub use ambient::{AmbientConditions, RELATIVE_HUMIDITY, TEMPERATURE};
pub use collection::{TableCollection, TableGroup};
pub use error::{TableError, TableResult};
pub use interp::{Extrapolate, Query, multi_interp};
pub use name::TableName;
pub use table::{Axis, AxisLabel, Table, Table1D, Table2D};
