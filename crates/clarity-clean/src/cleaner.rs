//! Stateful cleaning session over one snapshot.

use clarity_model::{
    CleaningOperation, CleaningStrategy, KeepStrategy, OperationRecord, QualitySummary, Suggestion,
};
use polars::prelude::{Column, DataFrame};

use crate::columns::standardize_names;
use crate::duplicates::{filter_rows, keep_mask};
use crate::error::{CleanError, Result};
use crate::missing::fill_column;
use crate::profile;

const HANDLE_MISSING: &str = "handle_missing_values";
const REMOVE_DUPLICATES: &str = "remove_duplicates";
const STANDARDIZE: &str = "standardize_columns";

/// Applies cleaning operations to a working copy of a snapshot and keeps an
/// ordered log of what each one did.
///
/// The original snapshot is captured once and never changes. There is no
/// undo: start a new `Cleaner` from [`Cleaner::original`] to revert.
///
/// # Example
///
/// ```ignore
/// let mut cleaner = Cleaner::new(&df);
/// cleaner
///     .handle_missing_values(CleaningStrategy::FillMedian, Some(&["Age".to_string()]))?
///     .remove_duplicates(None, KeepStrategy::First)?
///     .standardize_columns()?;
/// let cleaned = cleaner.into_working();
/// ```
#[derive(Debug, Clone)]
pub struct Cleaner {
    original: DataFrame,
    working: DataFrame,
    log: Vec<OperationRecord>,
}

impl Cleaner {
    /// Starts a session from a copy of `df`.
    pub fn new(df: &DataFrame) -> Self {
        Self {
            original: df.clone(),
            working: df.clone(),
            log: Vec::new(),
        }
    }

    /// The snapshot the session started from, untouched by any operation.
    pub fn original(&self) -> &DataFrame {
        &self.original
    }

    /// The current cleaned snapshot.
    pub fn working(&self) -> &DataFrame {
        &self.working
    }

    /// Records of every applied operation, oldest first.
    pub fn log(&self) -> &[OperationRecord] {
        &self.log
    }

    /// Ends the session and hands back the cleaned snapshot.
    pub fn into_working(self) -> DataFrame {
        self.working
    }

    /// Quality summary of the working snapshot.
    pub fn summary(&self) -> Result<QualitySummary> {
        profile::summarize(&self.working)
    }

    /// Suggestions for the working snapshot.
    pub fn suggestions(&self) -> Result<Vec<Suggestion>> {
        profile::suggest_operations(&self.working)
    }

    /// Splits requested names into those present in the working snapshot
    /// and those that are not. `None` selects every column.
    fn resolve_columns(&self, requested: Option<&[String]>) -> (Vec<String>, Vec<String>) {
        match requested {
            None => (
                self.working
                    .get_column_names()
                    .into_iter()
                    .map(ToString::to_string)
                    .collect(),
                Vec::new(),
            ),
            Some(names) => names
                .iter()
                .cloned()
                .partition(|name| self.working.column(name).is_ok()),
        }
    }

    fn null_total(&self, columns: &[String], operation: &'static str) -> Result<usize> {
        let mut total = 0;
        for name in columns {
            let column = self
                .working
                .column(name)
                .map_err(CleanError::frame(operation, name))?;
            total += column.null_count();
        }
        Ok(total)
    }

    /// Remediates nulls in `columns` (every column when `None`).
    ///
    /// Unknown column names are skipped and reported in the log record.
    /// Columns the strategy does not apply to are left unchanged.
    pub fn handle_missing_values(
        &mut self,
        strategy: CleaningStrategy,
        columns: Option<&[String]>,
    ) -> Result<&mut Self> {
        let _span = tracing::info_span!("handle_missing_values", strategy = %strategy).entered();
        let (present, skipped) = self.resolve_columns(columns);
        if !skipped.is_empty() {
            tracing::debug!(skipped = ?skipped, "Skipping columns not in dataset");
        }

        let nulls_before = self.null_total(&present, HANDLE_MISSING)?;
        for name in &present {
            let column = self
                .working
                .column(name)
                .map_err(CleanError::frame(HANDLE_MISSING, name))?;

            if strategy == CleaningStrategy::Drop {
                let keep = column.as_materialized_series().is_not_null();
                self.working = self
                    .working
                    .filter(&keep)
                    .map_err(CleanError::frame(HANDLE_MISSING, name))?;
                continue;
            }

            match fill_column(column, strategy).map_err(CleanError::frame(HANDLE_MISSING, name))? {
                Some(filled) => {
                    self.working
                        .with_column(filled)
                        .map_err(CleanError::frame(HANDLE_MISSING, name))?;
                }
                None => tracing::debug!(column = %name, "Column left unchanged"),
            }
        }
        let nulls_after = self.null_total(&present, HANDLE_MISSING)?;

        tracing::info!(
            columns = present.len(),
            nulls_before,
            nulls_after,
            rows = self.working.height(),
            "Handled missing values"
        );
        self.log.push(OperationRecord::HandleMissingValues {
            strategy,
            columns: present,
            skipped_columns: skipped,
            nulls_before,
            nulls_after,
        });
        Ok(self)
    }

    /// Removes rows equal over `subset` (every column when `None`).
    ///
    /// An explicit subset with no known column removes nothing.
    pub fn remove_duplicates(
        &mut self,
        subset: Option<&[String]>,
        keep: KeepStrategy,
    ) -> Result<&mut Self> {
        let _span = tracing::info_span!("remove_duplicates", keep = %keep).entered();
        let (resolved, skipped) = self.resolve_columns(subset);
        if !skipped.is_empty() {
            tracing::debug!(skipped = ?skipped, "Skipping subset columns not in dataset");
        }
        if subset.is_some() && resolved.is_empty() {
            tracing::warn!("Duplicate subset matched no columns; no rows removed");
        }

        let rows_before = self.working.height();
        let mask = keep_mask(&self.working, &resolved, keep)
            .map_err(CleanError::frame(REMOVE_DUPLICATES, &resolved.join(",")))?;
        filter_rows(&mut self.working, &mask)?;
        let rows_after = self.working.height();

        tracing::info!(rows_before, rows_after, "Removed duplicate rows");
        self.log.push(OperationRecord::RemoveDuplicates {
            subset: resolved,
            keep,
            rows_before,
            rows_after,
            removed: rows_before - rows_after,
        });
        Ok(self)
    }

    /// Rewrites every column name into lower snake case.
    pub fn standardize_columns(&mut self) -> Result<&mut Self> {
        let _span = tracing::info_span!("standardize_columns").entered();
        let original_columns: Vec<String> = self
            .working
            .get_column_names()
            .into_iter()
            .map(ToString::to_string)
            .collect();
        let new_columns = standardize_names(&original_columns);

        let renamed: Vec<Column> = self
            .working
            .get_columns()
            .iter()
            .zip(&new_columns)
            .map(|(column, name)| column.clone().with_name(name.as_str().into()))
            .collect();
        self.working = DataFrame::new(renamed).map_err(CleanError::frame(STANDARDIZE, "*"))?;

        tracing::info!(columns = new_columns.len(), "Standardized column names");
        self.log.push(OperationRecord::StandardizeColumns {
            original_columns,
            new_columns,
        });
        Ok(self)
    }

    /// Applies `operations` in order and returns the records they appended.
    ///
    /// Stops at the first failure; records for steps already applied stay in
    /// the log.
    pub fn apply(&mut self, operations: &[CleaningOperation]) -> Result<&[OperationRecord]> {
        let start = self.log.len();
        for (step, operation) in operations.iter().enumerate() {
            let _span = tracing::debug_span!("apply", step, operation = operation.name()).entered();
            match operation {
                CleaningOperation::HandleMissingValues { strategy, columns } => {
                    self.handle_missing_values(*strategy, columns.as_deref())?;
                }
                CleaningOperation::RemoveDuplicates { subset, keep } => {
                    self.remove_duplicates(subset.as_deref(), *keep)?;
                }
                CleaningOperation::StandardizeColumns => {
                    self.standardize_columns()?;
                }
            }
        }
        Ok(&self.log[start..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{DataType, IntoColumn, NamedFrom, Series};

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    fn frame() -> DataFrame {
        DataFrame::new(vec![
            Series::new("A".into(), [Some(1i64), None, Some(3), None]).into_column(),
            Series::new("B".into(), [None, Some("x"), Some("y"), Some("z")]).into_column(),
        ])
        .unwrap()
    }

    #[test]
    fn test_drop_is_sequential() {
        let mut cleaner = Cleaner::new(&frame());
        cleaner
            .handle_missing_values(CleaningStrategy::Drop, None)
            .unwrap();
        assert_eq!(cleaner.working().height(), 1);
        assert_eq!(
            cleaner.log()[0],
            OperationRecord::HandleMissingValues {
                strategy: CleaningStrategy::Drop,
                columns: names(&["A", "B"]),
                skipped_columns: Vec::new(),
                nulls_before: 3,
                nulls_after: 0,
            }
        );
    }

    #[test]
    fn test_unknown_columns_are_skipped() {
        let mut cleaner = Cleaner::new(&frame());
        cleaner
            .handle_missing_values(CleaningStrategy::FillZero, Some(&names(&["Zip", "A"])))
            .unwrap();
        match &cleaner.log()[0] {
            OperationRecord::HandleMissingValues {
                columns,
                skipped_columns,
                nulls_before,
                nulls_after,
                ..
            } => {
                assert_eq!(columns, &names(&["A"]));
                assert_eq!(skipped_columns, &names(&["Zip"]));
                assert_eq!((*nulls_before, *nulls_after), (2, 0));
            }
            other => panic!("unexpected record {other:?}"),
        }
        assert_eq!(cleaner.working().column("B").unwrap().null_count(), 1);
    }

    #[test]
    fn test_unmatched_subset_removes_nothing() {
        let df = DataFrame::new(vec![
            Series::new("A".into(), [1i64, 1, 1]).into_column(),
        ])
        .unwrap();
        let mut cleaner = Cleaner::new(&df);
        cleaner
            .remove_duplicates(Some(&names(&["Nope"])), KeepStrategy::First)
            .unwrap();
        assert_eq!(cleaner.working().height(), 3);

        cleaner.remove_duplicates(None, KeepStrategy::DropAll).unwrap();
        assert_eq!(cleaner.working().height(), 0);
    }

    #[test]
    fn test_original_is_never_mutated() {
        let df = frame();
        let mut cleaner = Cleaner::new(&df);
        cleaner
            .handle_missing_values(CleaningStrategy::Drop, None)
            .unwrap()
            .standardize_columns()
            .unwrap();
        assert!(cleaner.original().equals_missing(&df));
        let renamed: Vec<&str> = cleaner
            .working()
            .get_column_names()
            .into_iter()
            .map(|name| name.as_str())
            .collect();
        assert_eq!(renamed, vec!["a", "b"]);
    }

    #[test]
    fn test_apply_returns_new_records() {
        let mut cleaner = Cleaner::new(&frame());
        cleaner.standardize_columns().unwrap();
        let operations = [
            CleaningOperation::HandleMissingValues {
                strategy: CleaningStrategy::FillForward,
                columns: Some(names(&["a"])),
            },
            CleaningOperation::RemoveDuplicates {
                subset: None,
                keep: KeepStrategy::Last,
            },
        ];
        let records = cleaner.apply(&operations).unwrap();
        let kinds: Vec<&str> = records.iter().map(OperationRecord::name).collect();
        let requested: Vec<&str> = operations.iter().map(CleaningOperation::name).collect();
        assert_eq!(kinds, vec!["handle_missing_values", "remove_duplicates"]);
        assert_eq!(kinds, requested);
        assert_eq!(cleaner.log().len(), 3);
    }

    #[test]
    fn test_mean_on_text_leaves_column() {
        let mut cleaner = Cleaner::new(&frame());
        assert!(CleaningStrategy::FillMean.requires_numeric());
        cleaner
            .handle_missing_values(CleaningStrategy::FillMean, None)
            .unwrap();
        assert_eq!(cleaner.working().column("A").unwrap().null_count(), 0);
        assert_eq!(cleaner.working().column("B").unwrap().null_count(), 1);
        assert_eq!(cleaner.working().column("B").unwrap().dtype(), &DataType::String);
    }
}
