//! Error types for each layer of the estimator
//!
//! Business outcomes such as "not over-assessed" are not errors; they are
//! reported through [`crate::valuation::Outcome`]. The types here cover bad
//! input data and I/O failures around the core.

use thiserror::Error;

/// Failure decoding property records from the comparables format
#[derive(Debug, Error)]
pub enum PropertyError {
    #[error("property {pin}: sale date {value:?} is not a valid MM/DD/YYYY date")]
    InvalidSaleDate { pin: String, value: String },

    #[error("property {pin}: assessed value {value} must be finite and non-negative")]
    InvalidAssessedValue { pin: String, value: f64 },

    #[error("property {pin}: building sqft {value} must be finite and non-negative")]
    InvalidBuildingSqft { pin: String, value: f64 },

    #[error("property {pin}: malformed record: {source}")]
    Record {
        pin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read comparables: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure loading the interest rate table
#[derive(Debug, Error)]
pub enum RateTableError {
    #[error("failed to read rate table: {0}")]
    Csv(#[from] csv::Error),

    #[error("rate {rate} for year {year} is out of range")]
    InvalidRate { year: i32, rate: f64 },
}

/// Failure talking to the comparables service
#[derive(Debug, Error)]
pub enum ComparablesError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("comparables service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("comparables service returned no properties for {pin}")]
    Empty { pin: String },

    #[error(transparent)]
    Decode(#[from] PropertyError),
}

/// Failure at the request boundary, before or around the core calculation
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("PIN is required")]
    MissingPin,

    #[error("error fetching comparables data: {0}")]
    Upstream(ComparablesError),

    #[error("invalid comparables data: {0}")]
    DataQuality(PropertyError),
}

impl ServiceError {
    /// HTTP status code for this failure
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::MissingPin => 400,
            ServiceError::Upstream(_) => 500,
            ServiceError::DataQuality(_) => 422,
        }
    }
}

impl From<ComparablesError> for ServiceError {
    fn from(err: ComparablesError) -> Self {
        match err {
            ComparablesError::Decode(inner) => ServiceError::DataQuality(inner),
            other => ServiceError::Upstream(other),
        }
    }
}
