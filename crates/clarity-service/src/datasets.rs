//! Upload, preview, cleaning and listing of stored datasets.

use clarity_clean::{Cleaner, profile};
use clarity_common::frame_records;
use clarity_ingest::DatasetStore;
use clarity_model::CleaningOperation;

use crate::api::{
    CleanRequest, CleanResponse, CleanSummary, FilesResponse, PreviewRequest, PreviewResponse,
    UploadResponse,
};
use crate::error::{Result, ServiceError};

/// Default number of sample rows in previews.
pub const DEFAULT_SAMPLE_ROWS: usize = 5;

/// Stores an uploaded CSV and reports its shape.
pub fn upload(store: &DatasetStore, filename: &str, bytes: &[u8]) -> Result<UploadResponse> {
    let _span = tracing::info_span!("upload", dataset = %filename).entered();
    let uploaded = store
        .store_upload(filename, bytes)
        .map_err(|e| ServiceError::from(e).in_operation("upload"))?;

    Ok(UploadResponse {
        message: "File Successfully Uploaded".to_string(),
        size: format!("{:.2} KB", uploaded.size_bytes as f64 / 1024.0),
        filename: uploaded.filename,
        columns: uploaded.columns,
        rows: uploaded.rows,
    })
}

/// Profiles a stored dataset without changing it.
pub fn preview_cleaning(
    store: &DatasetStore,
    request: &PreviewRequest,
    sample_rows: usize,
) -> Result<PreviewResponse> {
    let _span = tracing::info_span!("preview_cleaning", dataset = %request.filename).entered();
    let df = store
        .load(&request.filename)
        .map_err(|e| ServiceError::from(e).in_operation("preview"))?;

    let summary = profile::summarize(&df)?;
    let suggestions = profile::suggest_operations(&df)?;
    tracing::info!(
        rows = summary.total_rows,
        missing = summary.total_missing(),
        duplicates = summary.duplicates,
        suggestions = suggestions.len(),
        "Profiled dataset"
    );

    Ok(PreviewResponse {
        summary,
        suggestions,
        sample_data: frame_records(&df, sample_rows),
    })
}

/// Parses every wire operation before anything runs, so a bad token
/// anywhere rejects the whole request.
pub fn parse_operations(request: &CleanRequest) -> Result<Vec<CleaningOperation>> {
    let mut operations = Vec::with_capacity(request.operations.len());
    for (idx, op) in request.operations.iter().enumerate() {
        match op.to_operation() {
            Ok(Some(operation)) => operations.push(operation),
            Ok(None) => tracing::debug!(index = idx, kind = %op.kind, "Ignoring unknown operation type"),
            Err(e) => {
                return Err(ServiceError::from(e).in_operation(&format!("operation {}", idx + 1)));
            }
        }
    }
    Ok(operations)
}

/// Applies the requested operations to a fresh copy of the dataset and
/// stores the result as `cleaned_<filename>`.
pub fn clean(store: &DatasetStore, request: &CleanRequest, sample_rows: usize) -> Result<CleanResponse> {
    let _span = tracing::info_span!("clean", dataset = %request.filename).entered();
    let operations = parse_operations(request)?;
    let df = store
        .load(&request.filename)
        .map_err(|e| ServiceError::from(e).in_operation("clean"))?;

    let mut cleaner = Cleaner::new(&df);
    cleaner.apply(&operations)?;

    let summary = CleanSummary {
        original_rows: cleaner.original().height(),
        cleaned_rows: cleaner.working().height(),
        original_columns: cleaner.original().width(),
        cleaned_columns: cleaner.working().width(),
    };
    let cleaning_log = cleaner.log().to_vec();
    let mut cleaned = cleaner.into_working();

    let cleaned_filename = DatasetStore::cleaned_name(&request.filename);
    store
        .save(&cleaned_filename, &mut cleaned)
        .map_err(|e| ServiceError::from(e).in_operation("save"))?;

    tracing::info!(
        cleaned = %cleaned_filename,
        operations = cleaning_log.len(),
        rows_before = summary.original_rows,
        rows_after = summary.cleaned_rows,
        "Cleaned dataset"
    );

    Ok(CleanResponse {
        message: "Data cleaned successfully".to_string(),
        cleaned_filename,
        cleaning_log,
        summary,
        sample_data: frame_records(&cleaned, sample_rows),
    })
}

/// Lists stored datasets.
pub fn list_files(store: &DatasetStore) -> Result<FilesResponse> {
    let files = store
        .list()
        .map_err(|e| ServiceError::from(e).in_operation("list files"))?;
    Ok(FilesResponse { files })
}
