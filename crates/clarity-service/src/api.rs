//! Request and response bodies.

use clarity_ingest::StoredFile;
use clarity_insight::{ChartPoint, ChartQuery, HistoryEntry};
use clarity_model::{OperationRecord, OperationRequest, QualitySummary, Suggestion};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One preview row: column name to JSON value.
pub type Record = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    pub filename: String,
    /// Human-readable size, e.g. `"12.34 KB"`.
    pub size: String,
    pub columns: Vec<String>,
    pub rows: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewRequest {
    pub filename: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewResponse {
    pub summary: QualitySummary,
    pub suggestions: Vec<Suggestion>,
    pub sample_data: Vec<Record>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanRequest {
    pub filename: String,
    pub operations: Vec<OperationRequest>,
}

/// Shape of the dataset before and after cleaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanSummary {
    pub original_rows: usize,
    pub cleaned_rows: usize,
    pub original_columns: usize,
    pub cleaned_columns: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanResponse {
    pub message: String,
    pub cleaned_filename: String,
    pub cleaning_log: Vec<OperationRecord>,
    pub summary: CleanSummary,
    pub sample_data: Vec<Record>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskRequest {
    pub filename: String,
    pub question: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub explanation: String,
    pub insights: Vec<String>,
    pub query: ChartQuery,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    #[serde(rename = "type")]
    pub chart_type: String,
    pub data: Vec<ChartPoint>,
    pub config: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetMetadata {
    pub filename: String,
    pub size_kb: f64,
    /// `"N rows × M cols"`.
    pub shape: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AskResponse {
    pub analysis: Analysis,
    pub chart: Chart,
    pub metadata: DatasetMetadata,
    pub sample_data: Vec<Record>,
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilesResponse {
    pub files: Vec<StoredFile>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub history: Vec<HistoryEntry>,
}
