//! Question answering and question history.

use clarity_common::frame_records;
use clarity_ingest::{DatasetStore, sanitize_filename};
use clarity_insight::{
    HistoryEntry, HistoryStore, LlmClient, LlmConfig, PROMPT_SAMPLE_ROWS, build_prompt,
    request_insight,
};

use crate::api::{Analysis, AskRequest, AskResponse, Chart, DatasetMetadata, HistoryResponse};
use crate::error::{Result, ServiceError};

/// Answers a natural-language question about a stored dataset with chart
/// data and narrative. The answer is appended to the dataset's history; a
/// failed history write is logged and does not fail the request.
pub fn ask(
    store: &DatasetStore,
    history: &HistoryStore,
    client: &dyn LlmClient,
    request: &AskRequest,
    config: &LlmConfig,
) -> Result<AskResponse> {
    let _span = tracing::info_span!("ask", dataset = %request.filename).entered();
    let question = request.question.trim();
    if question.is_empty() {
        return Err(ServiceError::invalid_argument("question must not be empty"));
    }

    let df = store
        .load(&request.filename)
        .map_err(|e| ServiceError::from(e).in_operation("ask"))?;
    let columns: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(ToString::to_string)
        .collect();
    let sample_data = frame_records(&df, PROMPT_SAMPLE_ROWS);

    let prompt = build_prompt(&columns, &sample_data, question);
    let spec = request_insight(client, &prompt, config.max_retries)?;
    let chart_type = spec
        .chart_type()
        .map(ToString::to_string)
        .ok_or_else(|| ServiceError::unsupported_format("chart_config has no \"type\""))?;
    let data = spec.query.execute(&df)?;
    tracing::info!(
        chart = %chart_type,
        aggregation = %spec.query.aggregation,
        points = data.len(),
        "Answered question"
    );

    if let Err(e) = history.append(&request.filename, &HistoryEntry::new(question, &spec)) {
        tracing::warn!(error = %e, "Failed to save question history");
    }

    let size_kb = store
        .file_size_kb(&request.filename)
        .map_err(|e| ServiceError::from(e).in_operation("ask"))?;
    let metadata = DatasetMetadata {
        filename: sanitize_filename(&request.filename),
        size_kb,
        shape: format!("{} rows × {} cols", df.height(), df.width()),
    };

    Ok(AskResponse {
        analysis: Analysis {
            explanation: spec.explanation,
            insights: spec.insights,
            query: spec.query,
        },
        chart: Chart {
            chart_type,
            data,
            config: spec.chart_config,
        },
        metadata,
        sample_data,
        columns,
    })
}

/// Previously answered questions for a dataset, oldest first.
pub fn history(history: &HistoryStore, filename: &str) -> Result<HistoryResponse> {
    if sanitize_filename(filename).is_empty() {
        return Err(ServiceError::invalid_argument(format!(
            "invalid filename '{filename}'"
        )));
    }
    let entries = history
        .entries(filename)
        .map_err(|e| ServiceError::from(e).in_operation("history"))?;
    Ok(HistoryResponse { history: entries })
}
