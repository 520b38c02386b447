//! Shared application service layer for the gas turbine performance tools.
//!
//! Loads studies and their inputs, runs the performance calculations and
//! writes results, so the CLI stays a thin argument parser.

pub mod error;
pub mod price_service;
pub mod run_service;
pub mod study;
pub mod table_service;

pub use error::{AppError, AppResult};
pub use price_service::download_prices;
pub use run_service::{RunResponse, coefficient_table, execute_study, resolve_nameplate, run_study};
pub use study::{NameplateSource, StudyConfig, StudyMode, load_study, validate_study};
pub use table_service::{TableSummary, load_ambient, load_tables, summarize_tables};
