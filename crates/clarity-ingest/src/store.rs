//! File-backed dataset store.
//!
//! Datasets live as CSV files directly under one base directory and are
//! addressed by sanitised file name.

use std::path::{Path, PathBuf};

use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

use crate::csv::{read_csv_frame, read_csv_headers, validate_encoding, validate_frame_shape, write_csv_frame};
use crate::error::{IngestError, Result};

/// Default upload limit: 10 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

const CLEANED_PREFIX: &str = "cleaned_";

/// Staged uploads never carry a `.csv` extension, so `list` skips them.
const STAGING_SUFFIX: &str = ".upload";

/// A dataset accepted by [`DatasetStore::store_upload`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedDataset {
    pub filename: String,
    pub size_bytes: u64,
    pub columns: Vec<String>,
    pub rows: usize,
}

/// One entry of [`DatasetStore::list`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredFile {
    pub filename: String,
    pub size_kb: f64,
}

/// Keeps the final path component and drops every character outside
/// `[A-Za-z0-9_.-]`.
///
/// ```
/// use clarity_ingest::sanitize_filename;
///
/// assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
/// assert_eq!(sanitize_filename("sales report (1).csv"), "salesreport1.csv");
/// ```
pub fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    base.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        .collect()
}

/// Size in kilobytes, rounded to two decimals.
pub fn size_kb(bytes: u64) -> f64 {
    (bytes as f64 / 1024.0 * 100.0).round() / 100.0
}

fn has_csv_extension(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

/// Dataset storage rooted at one directory.
#[derive(Debug, Clone)]
pub struct DatasetStore {
    base_dir: PathBuf,
    max_upload_bytes: u64,
}

impl DatasetStore {
    pub fn new(base_dir: impl Into<PathBuf>, max_upload_bytes: u64) -> Self {
        Self {
            base_dir: base_dir.into(),
            max_upload_bytes,
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn max_upload_bytes(&self) -> u64 {
        self.max_upload_bytes
    }

    /// Identifier under which a cleaned copy of `id` is stored.
    pub fn cleaned_name(id: &str) -> String {
        format!("{CLEANED_PREFIX}{}", sanitize_filename(id))
    }

    /// Resolves a dataset identifier to its path inside the store.
    pub fn path_for(&self, id: &str) -> Result<PathBuf> {
        let clean = sanitize_filename(id);
        if clean.is_empty() || clean.chars().all(|c| c == '.') {
            return Err(IngestError::InvalidFilename {
                name: id.to_string(),
            });
        }
        Ok(self.base_dir.join(clean))
    }

    pub fn exists(&self, id: &str) -> bool {
        self.path_for(id).is_ok_and(|path| path.is_file())
    }

    /// Loads a stored dataset.
    pub fn load(&self, id: &str) -> Result<DataFrame> {
        let path = self.path_for(id)?;
        read_csv_frame(&path)
    }

    /// Writes `df` under `id`, replacing any existing file.
    pub fn save(&self, id: &str, df: &mut DataFrame) -> Result<PathBuf> {
        let path = self.path_for(id)?;
        write_csv_frame(df, &path)?;
        tracing::info!(dataset = %id, rows = df.height(), "Saved dataset");
        Ok(path)
    }

    /// File size of a stored dataset in kilobytes.
    pub fn file_size_kb(&self, id: &str) -> Result<f64> {
        let path = self.path_for(id)?;
        let metadata = std::fs::metadata(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                IngestError::FileNotFound { path: path.clone() }
            } else {
                IngestError::FileRead {
                    path: path.clone(),
                    source: e,
                }
            }
        })?;
        Ok(size_kb(metadata.len()))
    }

    /// Validates and stores uploaded CSV content.
    ///
    /// Checks run cheapest first: extension, name, size, encoding, header
    /// row. The bytes are then staged next to the target and parsed. Only a
    /// staged file that parses with at least one data row replaces
    /// `<base>/<name>`; a rejected upload leaves any existing dataset alone.
    pub fn store_upload(&self, name: &str, bytes: &[u8]) -> Result<UploadedDataset> {
        if !has_csv_extension(name) {
            return Err(IngestError::UnsupportedFileType {
                name: name.to_string(),
            });
        }
        let path = self.path_for(name)?;
        let filename = sanitize_filename(name);

        let size = bytes.len() as u64;
        if size > self.max_upload_bytes {
            return Err(IngestError::FileTooLarge {
                name: filename,
                size,
                max_size: self.max_upload_bytes,
            });
        }
        validate_encoding(bytes, &filename)?;
        std::str::from_utf8(bytes).map_err(|_| IngestError::UnsupportedEncoding {
            name: filename.clone(),
            encoding: "non-UTF-8",
        })?;
        read_csv_headers(bytes, &filename)?;

        std::fs::create_dir_all(&self.base_dir).map_err(|e| IngestError::FileWrite {
            path: self.base_dir.clone(),
            source: e,
        })?;
        let staged = self.base_dir.join(format!(".{filename}{STAGING_SUFFIX}"));
        std::fs::write(&staged, bytes).map_err(|e| IngestError::FileWrite {
            path: staged.clone(),
            source: e,
        })?;

        let accepted = read_csv_frame(&staged).and_then(|df| {
            validate_frame_shape(&df, &filename)?;
            std::fs::rename(&staged, &path).map_err(|e| IngestError::FileWrite {
                path: path.clone(),
                source: e,
            })?;
            Ok(df)
        });
        let df = match accepted {
            Ok(df) => df,
            Err(err) => {
                if let Err(remove_err) = std::fs::remove_file(&staged) {
                    tracing::warn!(
                        path = %staged.display(),
                        error = %remove_err,
                        "Failed to remove staged upload"
                    );
                }
                return Err(err);
            }
        };

        tracing::info!(
            dataset = %filename,
            rows = df.height(),
            columns = df.width(),
            "Stored upload"
        );
        Ok(UploadedDataset {
            filename,
            size_bytes: size,
            columns: df
                .get_column_names()
                .into_iter()
                .map(ToString::to_string)
                .collect(),
            rows: df.height(),
        })
    }

    /// Lists stored CSV datasets sorted by name. A missing base directory
    /// yields an empty list.
    pub fn list(&self) -> Result<Vec<StoredFile>> {
        if !self.base_dir.is_dir() {
            return Ok(Vec::new());
        }

        let entries = std::fs::read_dir(&self.base_dir).map_err(|e| IngestError::DirectoryRead {
            path: self.base_dir.clone(),
            source: e,
        })?;

        let mut files = Vec::new();
        for entry_result in entries {
            let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
                path: self.base_dir.clone(),
                source: e,
            })?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(filename) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !has_csv_extension(filename) {
                continue;
            }
            let size = entry
                .metadata()
                .map_err(|e| IngestError::FileRead {
                    path: path.clone(),
                    source: e,
                })?
                .len();
            files.push(StoredFile {
                filename: filename.to_string(),
                size_kb: size_kb(size),
            });
        }

        files.sort_by(|a, b| a.filename.cmp(&b.filename));
        Ok(files)
    }
}
