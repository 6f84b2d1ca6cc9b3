//! Data-quality profiling.
//!
//! Pure functions over a snapshot: summary statistics, advisory cleaning
//! suggestions, and the per-column strategy recommendation.

use clarity_common::is_numeric_dtype;
use clarity_model::{ColumnKind, ColumnQuality, CleaningStrategy, QualitySummary, Suggestion, percentage};
use polars::prelude::{DataFrame, DataType};

use crate::duplicates::count_duplicates;
use crate::error::Result;

/// Classifies a dtype into numeric, text or other.
pub fn column_kind(dtype: &DataType) -> ColumnKind {
    if is_numeric_dtype(dtype) {
        ColumnKind::Numeric
    } else if matches!(dtype, DataType::String) {
        ColumnKind::Text
    } else {
        ColumnKind::Other
    }
}

/// Computes the quality summary of `df`.
pub fn summarize(df: &DataFrame) -> Result<QualitySummary> {
    let columns = df
        .get_columns()
        .iter()
        .map(|column| ColumnQuality {
            name: column.name().to_string(),
            dtype: column.dtype().to_string(),
            kind: column_kind(column.dtype()),
            null_count: column.null_count(),
        })
        .collect();

    Ok(QualitySummary {
        total_rows: df.height(),
        total_columns: df.width(),
        columns,
        duplicates: count_duplicates(df)?,
        memory_usage: df.estimated_size(),
    })
}

/// Recommends a null strategy for `column`, or `None` when it is absent.
pub fn suggest_strategy(df: &DataFrame, column: &str) -> Option<CleaningStrategy> {
    df.column(column)
        .ok()
        .map(|column| column_kind(column.dtype()).suggested_strategy())
}

/// Lists advisory suggestions: one per column with nulls (in column order),
/// then one for duplicate rows if any exist.
pub fn suggest_operations(df: &DataFrame) -> Result<Vec<Suggestion>> {
    let rows = df.height();
    let mut suggestions: Vec<Suggestion> = df
        .get_columns()
        .iter()
        .filter(|column| column.null_count() > 0)
        .map(|column| {
            let nulls = column.null_count();
            Suggestion::MissingValues {
                column: column.name().to_string(),
                issue_count: nulls,
                percentage: percentage(nulls, rows),
                suggested_strategy: column_kind(column.dtype()).suggested_strategy(),
            }
        })
        .collect();

    let duplicates = count_duplicates(df)?;
    if duplicates > 0 {
        suggestions.push(Suggestion::Duplicates {
            issue_count: duplicates,
            percentage: percentage(duplicates, rows),
        });
    }

    tracing::debug!(
        rows,
        suggestions = suggestions.len(),
        "Profiled snapshot"
    );
    Ok(suggestions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    #[test]
    fn test_column_kind() {
        assert_eq!(column_kind(&DataType::Int64), ColumnKind::Numeric);
        assert_eq!(column_kind(&DataType::Float32), ColumnKind::Numeric);
        assert_eq!(column_kind(&DataType::String), ColumnKind::Text);
        assert_eq!(column_kind(&DataType::Boolean), ColumnKind::Other);
        assert_eq!(column_kind(&DataType::Null), ColumnKind::Other);
    }

    #[test]
    fn test_empty_frame_summary() {
        let summary = summarize(&DataFrame::empty()).unwrap();
        assert_eq!(summary.total_rows, 0);
        assert_eq!(summary.total_columns, 0);
        assert_eq!(summary.duplicates, 0);
        assert!(summarize(&DataFrame::empty()).unwrap().columns.is_empty());
        assert!(suggest_operations(&DataFrame::empty()).unwrap().is_empty());
    }

    #[test]
    fn test_suggest_strategy_for_boolean_is_drop() {
        let df = DataFrame::new(vec![
            Series::new("flag".into(), [Some(true), None]).into_column(),
        ])
        .unwrap();
        assert_eq!(suggest_strategy(&df, "flag"), Some(CleaningStrategy::Drop));
        assert_eq!(suggest_strategy(&df, "missing"), None);
    }
}
