//! Per-dataset question history, stored as JSON lines.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use clarity_ingest::sanitize_filename;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{InsightError, Result};
use crate::query::ChartQuery;
use crate::response::ChartSpec;

/// One answered question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub question: String,
    pub query: ChartQuery,
    pub chart_config: Value,
    pub explanation: String,
    pub insights: Vec<String>,
    pub asked_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(question: impl Into<String>, spec: &ChartSpec) -> Self {
        Self {
            question: question.into(),
            query: spec.query.clone(),
            chart_config: spec.chart_config.clone(),
            explanation: spec.explanation.clone(),
            insights: spec.insights.clone(),
            asked_at: Utc::now(),
        }
    }
}

/// History files live in one directory, one file per dataset.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    dir: PathBuf,
}

impl HistoryStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// History file for a dataset: `<sanitized filename>.json`.
    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize_filename(filename)))
    }

    /// Appends one entry as a single JSON line.
    pub fn append(&self, filename: &str, entry: &HistoryEntry) -> Result<()> {
        let path = self.path_for(filename);
        let history_err = |message: String| InsightError::History {
            path: path.clone(),
            message,
        };

        std::fs::create_dir_all(&self.dir).map_err(|e| history_err(e.to_string()))?;
        let line = serde_json::to_string(entry).map_err(|e| history_err(e.to_string()))?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| history_err(e.to_string()))?;
        writeln!(file, "{line}").map_err(|e| history_err(e.to_string()))?;

        tracing::debug!(dataset = %filename, path = %path.display(), "Appended history entry");
        Ok(())
    }

    /// Reads all entries for a dataset, oldest first.
    ///
    /// A missing file yields no entries; malformed lines are skipped.
    pub fn entries(&self, filename: &str) -> Result<Vec<HistoryEntry>> {
        let path = self.path_for(filename);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(InsightError::History {
                    path,
                    message: e.to_string(),
                });
            }
        };

        let mut entries = Vec::new();
        for (line_no, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<HistoryEntry>(line) {
                Ok(entry) => entries.push(entry),
                Err(e) => tracing::warn!(
                    path = %path.display(),
                    line = line_no + 1,
                    error = %e,
                    "Skipping malformed history line"
                ),
            }
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Aggregation;
    use serde_json::json;
    use tempfile::TempDir;

    fn spec() -> ChartSpec {
        ChartSpec {
            query: ChartQuery {
                group_by: "Region".to_string(),
                value_column: None,
                aggregation: Aggregation::Count,
                sort: None,
                limit: None,
            },
            chart_config: json!({"type": "PieChart"}),
            explanation: "Even split.".to_string(),
            insights: vec!["Keep going.".to_string()],
        }
    }

    #[test]
    fn test_path_is_sanitized() {
        let store = HistoryStore::new("/tmp/history");
        assert_eq!(
            store.path_for("../sales data.csv"),
            PathBuf::from("/tmp/history/salesdata.csv.json")
        );
    }

    #[test]
    fn test_append_and_read_back() {
        let dir = TempDir::new().unwrap();
        let store = HistoryStore::new(dir.path().join("history"));
        assert!(store.entries("sales.csv").unwrap().is_empty());

        store.append("sales.csv", &HistoryEntry::new("first?", &spec())).unwrap();
        store.append("sales.csv", &HistoryEntry::new("second?", &spec())).unwrap();

        let entries = store.entries("sales.csv").unwrap();
        let questions: Vec<&str> = entries.iter().map(|e| e.question.as_str()).collect();
        assert_eq!(questions, vec!["first?", "second?"]);
        assert_eq!(entries[0].query, spec().query);
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let dir = TempDir::new().unwrap();
        let store = HistoryStore::new(dir.path());
        store.append("a.csv", &HistoryEntry::new("ok", &spec())).unwrap();
        let path = store.path_for("a.csv");
        let mut file = OpenOptions::new().append(true).open(&path).unwrap();
        writeln!(file, "{{not json").unwrap();
        writeln!(file).unwrap();

        let entries = store.entries("a.csv").unwrap();
        assert_eq!(entries.len(), 1);
    }
}
