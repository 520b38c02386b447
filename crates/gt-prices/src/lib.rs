//! gt-prices: monthly fuel and electricity prices from the EIA open data API.
//!
//! Fetches a price series, averages observations per month and writes the
//! result as CSV for use as an economic input next to the performance runs.

pub mod aggregate;
pub mod client;
pub mod request;

pub use aggregate::{MonthlyPrices, Observation, monthly_mean, write_price_csv};
pub use client::{API_KEY_VAR, EiaClient, parse_observations};
pub use request::{PriceRequest, PriceSeries, SortSpec};

pub type PricesResult<T> = Result<T, PricesError>;

#[derive(thiserror::Error, Debug)]
pub enum PricesError {
    #[error("Missing API key: set {var}")]
    MissingApiKey { var: &'static str },

    #[error("HTTP error: {0}")]
    Http(Box<ureq::Error>),

    #[error("Unexpected response: {what}")]
    Response { what: String },

    #[error("Invalid period '{period}': {source}")]
    Period {
        period: String,
        source: chrono::ParseError,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ureq::Error> for PricesError {
    fn from(err: ureq::Error) -> Self {
        PricesError::Http(Box::new(err))
    }
}
