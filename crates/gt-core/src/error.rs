use thiserror::Error;

pub type GtResult<T> = Result<T, GtError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GtError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Unknown coefficient index '{letter}' (expected one of A, B, C, D, E)")]
    UnknownCoefficient { letter: char },
}
