//! Service-level error taxonomy.
//!
//! Every lower-level error is classified into one of four kinds so callers
//! (the CLI, or an HTTP adapter) can pick a status without inspecting crate
//! internals.

use clarity_clean::CleanError;
use clarity_ingest::IngestError;
use clarity_insight::InsightError;
use clarity_model::ModelError;
use thiserror::Error;

/// Errors returned by service functions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ServiceError {
    /// The request itself is wrong: bad file, bad token, unknown column.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// The referenced dataset has no backing file.
    #[error("not found: {message}")]
    NotFound { message: String },

    /// A result cannot be represented as rows or as a chart.
    #[error("unsupported format: {message}")]
    UnsupportedFormat { message: String },

    /// Unexpected failure while computing.
    #[error("internal error: {message}")]
    Internal { message: String },
}

impl ServiceError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn unsupported_format(message: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// HTTP status conventionally used for this kind.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidArgument { .. } => 400,
            Self::NotFound { .. } => 404,
            Self::UnsupportedFormat { .. } => 422,
            Self::Internal { .. } => 500,
        }
    }

    /// Message without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::InvalidArgument { message }
            | Self::NotFound { message }
            | Self::UnsupportedFormat { message }
            | Self::Internal { message } => message,
        }
    }

    /// Prefixes the message with the failing operation.
    #[must_use]
    pub fn in_operation(self, operation: &str) -> Self {
        let wrap = |message: String| format!("{operation}: {message}");
        match self {
            Self::InvalidArgument { message } => Self::InvalidArgument {
                message: wrap(message),
            },
            Self::NotFound { message } => Self::NotFound {
                message: wrap(message),
            },
            Self::UnsupportedFormat { message } => Self::UnsupportedFormat {
                message: wrap(message),
            },
            Self::Internal { message } => Self::Internal {
                message: wrap(message),
            },
        }
    }
}

impl From<IngestError> for ServiceError {
    fn from(err: IngestError) -> Self {
        let message = err.to_string();
        match err {
            IngestError::FileNotFound { .. } => Self::NotFound { message },
            IngestError::InvalidFilename { .. }
            | IngestError::UnsupportedFileType { .. }
            | IngestError::FileTooLarge { .. }
            | IngestError::UnsupportedEncoding { .. }
            | IngestError::EmptyCsv { .. }
            | IngestError::NoHeaderDetected { .. }
            | IngestError::HeaderRead { .. }
            | IngestError::CsvParse { .. } => Self::InvalidArgument { message },
            IngestError::FileRead { .. }
            | IngestError::FileWrite { .. }
            | IngestError::DirectoryRead { .. }
            | IngestError::DataFrame { .. } => Self::Internal { message },
        }
    }
}

impl From<ModelError> for ServiceError {
    fn from(err: ModelError) -> Self {
        Self::InvalidArgument {
            message: err.to_string(),
        }
    }
}

impl From<CleanError> for ServiceError {
    fn from(err: CleanError) -> Self {
        Self::Internal {
            message: err.to_string(),
        }
    }
}

impl From<InsightError> for ServiceError {
    fn from(err: InsightError) -> Self {
        let message = err.to_string();
        match err {
            InsightError::ColumnNotFound { .. } | InsightError::InvalidQuery { .. } => {
                Self::InvalidArgument { message }
            }
            InsightError::MissingFields { .. }
            | InsightError::NonNumericColumn { .. }
            | InsightError::EmptyResult => Self::UnsupportedFormat { message },
            InsightError::Network(_)
            | InsightError::Api { .. }
            | InsightError::MissingApiKey { .. }
            | InsightError::EmptyResponse
            | InsightError::InvalidJson(_)
            | InsightError::RetriesExhausted { .. }
            | InsightError::History { .. }
            | InsightError::DataFrame(_) => Self::Internal { message },
        }
    }
}

/// Result type alias for service functions.
pub type Result<T> = std::result::Result<T, ServiceError>;
