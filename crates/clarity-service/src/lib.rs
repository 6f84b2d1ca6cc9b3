//! Endpoint contracts for Clarity.
//!
//! Each public function corresponds to one endpoint: it takes its
//! collaborators (store, history, model client) explicitly, returns a
//! serialisable response, and classifies failures as [`ServiceError`].
//! Transport (HTTP routing, CLI parsing) lives elsewhere.

mod api;
mod datasets;
mod error;
mod insight;

pub use api::{
    Analysis, AskRequest, AskResponse, Chart, CleanRequest, CleanResponse, CleanSummary,
    DatasetMetadata, FilesResponse, HistoryResponse, PreviewRequest, PreviewResponse, Record,
    UploadResponse,
};
pub use datasets::{DEFAULT_SAMPLE_ROWS, clean, list_files, parse_operations, preview_cleaning, upload};
pub use error::{Result, ServiceError};
pub use insight::{ask, history};
