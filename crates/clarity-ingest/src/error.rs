//! Error types for dataset storage.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while storing, listing or loading datasets.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Naming Errors ===
    /// Dataset name is empty after sanitising.
    #[error("invalid filename '{name}'")]
    InvalidFilename { name: String },

    /// Upload is not a CSV file.
    #[error("unsupported file type for '{name}': only .csv files are accepted")]
    UnsupportedFileType { name: String },

    // === File System Errors ===
    /// Dataset file not found.
    #[error("dataset not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write file or create its directory.
    #[error("failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Upload Validation Errors ===
    /// Upload exceeds the configured size limit.
    #[error("file '{name}' is {size} bytes, exceeding the maximum of {max_size} bytes")]
    FileTooLarge {
        name: String,
        size: u64,
        max_size: u64,
    },

    /// Upload is not UTF-8.
    #[error("unsupported encoding {encoding} in '{name}': please use UTF-8")]
    UnsupportedEncoding {
        name: String,
        encoding: &'static str,
    },

    // === CSV Parsing Errors ===
    /// CSV has no content.
    #[error("CSV file is empty: {name}")]
    EmptyCsv { name: String },

    /// First row holds no column names.
    #[error("could not detect header row in {name}")]
    NoHeaderDetected { name: String },

    /// Failed to read the header row.
    #[error("failed to read CSV header in {name}: {source}")]
    HeaderRead {
        name: String,
        #[source]
        source: csv::Error,
    },

    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("storage/user_data/sales.csv"),
        };
        assert_eq!(err.to_string(), "dataset not found: storage/user_data/sales.csv");

        let err = IngestError::FileTooLarge {
            name: "big.csv".to_string(),
            size: 11,
            max_size: 10,
        };
        assert_eq!(
            err.to_string(),
            "file 'big.csv' is 11 bytes, exceeding the maximum of 10 bytes"
        );
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("test".into());
        let ingest_err: IngestError = polars_err.into();
        assert!(matches!(ingest_err, IngestError::DataFrame { .. }));
    }
}
