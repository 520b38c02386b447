//! gt-perf: gas turbine performance from correction tables.
//!
//! The coefficient engine walks a [`TableCollection`](gt_tables::TableCollection),
//! interpolates every correction table at the ambient conditions and folds the
//! results into five coefficients (A-E). Those are combined with a turbine's
//! [`Nameplate`] ratings to give output, heat rate, heat consumption, exhaust
//! temperature and exhaust flow.
//!
//! - [`compute_coeffs`]: aggregate all tables into [`Coefficients`]
//! - [`base_load`]: performance at 100% load, corrected for ambient conditions
//! - [`part_load`]: performance at a load fraction, corrected relative to the ISO point
//! - [`batch`]: independent ambient batches, optionally on the rayon pool
//!
//! # Example
//!
//! ```
//! use gt_perf::{base_load, Nameplate};
//! use gt_tables::{AmbientConditions, Table, TableCollection, TableGroup};
//!
//! let pressure = TableGroup::new()
//!     .with(
//!         "PA",
//!         Table::two_d_numeric(
//!             vec![0.0, 50.0, 100.0],
//!             vec![50.0, 100.0],
//!             vec![vec![0.9, 0.8], vec![1.0, 0.9], vec![1.1, 1.0]],
//!         )
//!         .unwrap(),
//!     )
//!     .unwrap();
//! let tables = TableCollection::new().with_group("P", pressure).unwrap();
//! let ambient = AmbientConditions::from_columns([("P", vec![50.0]), ("T", vec![50.0])]).unwrap();
//!
//! let record = base_load(&tables, &ambient, &Nameplate::ge_7e03()).unwrap();
//! assert_eq!(record.column(gt_core::CoefficientIndex::A)[0], 90_000.0);
//! ```

pub mod base_load;
pub mod batch;
pub mod coeffs;
pub mod error;
pub mod nameplate;
pub mod part_load;
pub mod record;

pub use base_load::{base_load, base_load_with};
pub use batch::{base_load_batches, part_load_batches};
pub use coeffs::{Coefficients, compute_coeffs, compute_coeffs_with};
pub use error::{PerfError, PerfResult};
pub use nameplate::Nameplate;
pub use part_load::{PartLoadSettings, part_load};
pub use record::{PerformanceRecord, PerformanceRow};
