//! Error types for the insight flow.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while asking for, parsing or executing an insight.
#[derive(Debug, Error)]
pub enum InsightError {
    /// Transport failure talking to the model endpoint.
    #[error("network error: {0}")]
    Network(String),

    /// The endpoint answered with a non-success status.
    #[error("model API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The API key environment variable is unset or empty.
    #[error("API key not found: set the {var} environment variable")]
    MissingApiKey { var: String },

    /// The model returned no content.
    #[error("empty response from model")]
    EmptyResponse,

    /// The model content is not valid JSON, or not the expected shape.
    #[error("invalid JSON from model: {0}")]
    InvalidJson(String),

    /// Every attempt failed; carries the last failure.
    #[error("model request failed after {attempts} attempts: {last}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        last: Box<InsightError>,
    },

    /// The model response lacks required fields.
    #[error("model response missing required fields: {}", fields.join(", "))]
    MissingFields { fields: Vec<String> },

    /// The chart query is inconsistent.
    #[error("invalid chart query: {reason}")]
    InvalidQuery { reason: String },

    /// The chart query names a column the dataset does not have.
    #[error("column '{column}' not found in dataset")]
    ColumnNotFound { column: String },

    /// A numeric aggregation targets a non-numeric column.
    #[error("cannot compute {aggregation} over non-numeric column '{column}'")]
    NonNumericColumn {
        column: String,
        aggregation: &'static str,
    },

    /// The chart query produced no data points.
    #[error("generated chart data is empty")]
    EmptyResult,

    /// Reading or writing question history failed.
    #[error("history error for {path}: {message}")]
    History { path: PathBuf, message: String },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {0}")]
    DataFrame(String),
}

impl InsightError {
    /// Returns whether a fresh model request could succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::Api { .. } | Self::EmptyResponse | Self::InvalidJson(_)
        )
    }
}

impl From<reqwest::Error> for InsightError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<polars::prelude::PolarsError> for InsightError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame(err.to_string())
    }
}

/// Result type alias for insight operations.
pub type Result<T> = std::result::Result<T, InsightError>;
