//! Dataset storage for Clarity.
//!
//! This crate provides the file-backed store that every dataset passes
//! through: upload validation, CSV loading into Polars DataFrames, writing
//! cleaned copies, and listing stored files.
//!
//! # Example
//!
//! ```ignore
//! use clarity_ingest::{DatasetStore, DEFAULT_MAX_UPLOAD_BYTES};
//!
//! let store = DatasetStore::new("storage/user_data", DEFAULT_MAX_UPLOAD_BYTES);
//! let uploaded = store.store_upload("sales.csv", &bytes)?;
//! let mut df = store.load(&uploaded.filename)?;
//! store.save(&DatasetStore::cleaned_name(&uploaded.filename), &mut df)?;
//! ```

mod csv;
mod error;
mod store;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading and Writing ===
pub use csv::{read_csv_frame, read_csv_headers, validate_encoding, validate_frame_shape, write_csv_frame};

// === Store ===
pub use store::{
    DEFAULT_MAX_UPLOAD_BYTES, DatasetStore, StoredFile, UploadedDataset, sanitize_filename, size_kb,
};
