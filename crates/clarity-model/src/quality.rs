//! Quality summaries and advisory suggestions produced by the profiler.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::enums::{CleaningStrategy, ColumnKind};

/// Per-column quality facts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnQuality {
    pub name: String,
    /// Polars dtype rendered for display (`i64`, `str`, `f64`, ...).
    pub dtype: String,
    pub kind: ColumnKind,
    pub null_count: usize,
}

/// Data-quality facts about one dataset snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualitySummary {
    pub total_rows: usize,
    pub total_columns: usize,
    /// Columns in frame order.
    pub columns: Vec<ColumnQuality>,
    /// Rows equal to an earlier row; first occurrences are not counted.
    pub duplicates: usize,
    /// Approximate in-memory footprint in bytes.
    pub memory_usage: usize,
}

impl QualitySummary {
    /// Column name to null count.
    pub fn missing_values(&self) -> BTreeMap<String, usize> {
        self.columns
            .iter()
            .map(|column| (column.name.clone(), column.null_count))
            .collect()
    }

    /// Total null cells across all columns.
    pub fn total_missing(&self) -> usize {
        self.columns.iter().map(|column| column.null_count).sum()
    }

    pub fn column(&self, name: &str) -> Option<&ColumnQuality> {
        self.columns.iter().find(|column| column.name == name)
    }
}

/// An advisory recommendation. Never applied automatically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Suggestion {
    MissingValues {
        column: String,
        issue_count: usize,
        percentage: f64,
        suggested_strategy: CleaningStrategy,
    },
    Duplicates {
        issue_count: usize,
        percentage: f64,
    },
}

impl Suggestion {
    pub fn issue_count(&self) -> usize {
        match self {
            Self::MissingValues { issue_count, .. } | Self::Duplicates { issue_count, .. } => {
                *issue_count
            }
        }
    }

    pub fn percentage(&self) -> f64 {
        match self {
            Self::MissingValues { percentage, .. } | Self::Duplicates { percentage, .. } => {
                *percentage
            }
        }
    }
}

/// `count / total * 100` rounded to two decimals; `0.0` when `total` is zero.
pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = count as f64 / total as f64 * 100.0;
    (raw * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(percentage(1, 4), 25.0);
        assert_eq!(percentage(1, 3), 33.33);
        assert_eq!(percentage(2, 3), 66.67);
        assert_eq!(percentage(0, 10), 0.0);
    }

    #[test]
    fn test_percentage_zero_rows() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(3, 0), 0.0);
    }

    #[test]
    fn test_missing_values_map() {
        let summary = QualitySummary {
            total_rows: 4,
            total_columns: 2,
            columns: vec![
                ColumnQuality {
                    name: "Age".to_string(),
                    dtype: "i64".to_string(),
                    kind: ColumnKind::Numeric,
                    null_count: 1,
                },
                ColumnQuality {
                    name: "City".to_string(),
                    dtype: "str".to_string(),
                    kind: ColumnKind::Text,
                    null_count: 2,
                },
            ],
            duplicates: 0,
            memory_usage: 0,
        };
        let missing = summary.missing_values();
        assert_eq!(missing["Age"], 1);
        assert_eq!(missing["City"], 2);
        assert_eq!(summary.total_missing(), 3);
        assert_eq!(summary.column("City").map(|c| c.kind), Some(ColumnKind::Text));
        assert!(summary.column("Zip").is_none());
    }
}
