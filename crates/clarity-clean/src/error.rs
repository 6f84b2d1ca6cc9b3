//! Error types for profiling and cleaning.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors that can occur while profiling or cleaning a snapshot.
///
/// Routine shape issues (absent columns, empty frames, all-null columns)
/// never produce an error; only failures inside polars surface here.
#[derive(Debug, Error)]
pub enum CleanError {
    /// A polars operation failed while applying a cleaning step.
    #[error("{operation} failed on column '{column}': {source}")]
    Frame {
        operation: &'static str,
        column: String,
        #[source]
        source: PolarsError,
    },

    /// A polars operation failed outside any single column.
    #[error("DataFrame operation failed: {0}")]
    Polars(#[from] PolarsError),
}

impl CleanError {
    pub(crate) fn frame(operation: &'static str, column: &str) -> impl FnOnce(PolarsError) -> Self {
        let column = column.to_string();
        move |source| Self::Frame {
            operation,
            column,
            source,
        }
    }
}

/// Result type for profiling and cleaning.
pub type Result<T> = std::result::Result<T, CleanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_error_display() {
        let err = CleanError::frame("fill_median", "Age")(PolarsError::ColumnNotFound(
            "Age".into(),
        ));
        assert!(err.to_string().starts_with("fill_median failed on column 'Age'"));
    }

    #[test]
    fn test_error_from_polars() {
        let err: CleanError = PolarsError::ColumnNotFound("x".into()).into();
        assert!(matches!(err, CleanError::Polars(_)));
    }
}
