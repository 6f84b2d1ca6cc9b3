//! Cleaning operation descriptors, log records and the wire request form.

use serde::{Deserialize, Serialize};

use crate::enums::{CleaningStrategy, KeepStrategy};
use crate::error::{ModelError, Result};

/// A typed, validated cleaning step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum CleaningOperation {
    HandleMissingValues {
        strategy: CleaningStrategy,
        /// `None` targets every column.
        columns: Option<Vec<String>>,
    },
    RemoveDuplicates {
        /// `None` compares every column.
        subset: Option<Vec<String>>,
        #[serde(default)]
        keep: KeepStrategy,
    },
    StandardizeColumns,
}

impl CleaningOperation {
    pub fn name(&self) -> &'static str {
        match self {
            Self::HandleMissingValues { .. } => "handle_missing_values",
            Self::RemoveDuplicates { .. } => "remove_duplicates",
            Self::StandardizeColumns => "standardize_columns",
        }
    }
}

/// An immutable entry in a cleaner's operation log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum OperationRecord {
    HandleMissingValues {
        strategy: CleaningStrategy,
        /// Targeted columns that were present, in request order.
        columns: Vec<String>,
        /// Requested names that did not exist.
        skipped_columns: Vec<String>,
        nulls_before: usize,
        nulls_after: usize,
    },
    RemoveDuplicates {
        subset: Vec<String>,
        keep: KeepStrategy,
        rows_before: usize,
        rows_after: usize,
        removed: usize,
    },
    StandardizeColumns {
        original_columns: Vec<String>,
        new_columns: Vec<String>,
    },
}

impl OperationRecord {
    pub fn name(&self) -> &'static str {
        match self {
            Self::HandleMissingValues { .. } => "handle_missing_values",
            Self::RemoveDuplicates { .. } => "remove_duplicates",
            Self::StandardizeColumns { .. } => "standardize_columns",
        }
    }

    /// One-line human description of what the step did.
    pub fn describe(&self) -> String {
        match self {
            Self::HandleMissingValues {
                strategy,
                columns,
                nulls_before,
                nulls_after,
                ..
            } => format!(
                "{strategy} on {} column(s): nulls {nulls_before} -> {nulls_after}",
                columns.len()
            ),
            Self::RemoveDuplicates {
                keep,
                rows_before,
                rows_after,
                removed,
                ..
            } => format!("keep={keep}: rows {rows_before} -> {rows_after} ({removed} removed)"),
            Self::StandardizeColumns {
                original_columns,
                new_columns,
            } => {
                let renamed = original_columns
                    .iter()
                    .zip(new_columns)
                    .filter(|(before, after)| before != after)
                    .count();
                format!("{renamed} of {} column(s) renamed", new_columns.len())
            }
        }
    }
}

/// Loosely typed operation as it arrives from a client.
///
/// `type` is one of `missing_values`, `duplicates`, `standardize_columns`
/// (short form `standardize`); anything else is ignored by
/// [`OperationRequest::to_operation`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationRequest {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subset: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keep: Option<String>,
}

impl OperationRequest {
    pub const MISSING_VALUES: &'static str = "missing_values";
    pub const DUPLICATES: &'static str = "duplicates";
    pub const STANDARDIZE: &'static str = "standardize_columns";
    const STANDARDIZE_SHORT: &'static str = "standardize";

    pub fn missing_values(strategy: CleaningStrategy, columns: Option<Vec<String>>) -> Self {
        Self {
            kind: Self::MISSING_VALUES.to_string(),
            strategy: Some(strategy.as_str().to_string()),
            columns,
            ..Self::default()
        }
    }

    pub fn duplicates(subset: Option<Vec<String>>, keep: KeepStrategy) -> Self {
        Self {
            kind: Self::DUPLICATES.to_string(),
            subset,
            keep: Some(keep.as_str().to_string()),
            ..Self::default()
        }
    }

    pub fn standardize() -> Self {
        Self {
            kind: Self::STANDARDIZE.to_string(),
            ..Self::default()
        }
    }

    /// Validates the request into a typed operation.
    ///
    /// Returns `Ok(None)` for an unrecognised `type`.
    pub fn to_operation(&self) -> Result<Option<CleaningOperation>> {
        let operation = match self.kind.trim() {
            Self::MISSING_VALUES => {
                let token = self
                    .strategy
                    .as_deref()
                    .ok_or_else(|| ModelError::MissingStrategy {
                        operation: Self::MISSING_VALUES.to_string(),
                    })?;
                CleaningOperation::HandleMissingValues {
                    strategy: token.parse()?,
                    columns: self.columns.clone(),
                }
            }
            Self::DUPLICATES => CleaningOperation::RemoveDuplicates {
                subset: self.subset.clone(),
                keep: match self.keep.as_deref() {
                    Some(token) => token.parse()?,
                    None => KeepStrategy::First,
                },
            },
            Self::STANDARDIZE | Self::STANDARDIZE_SHORT => CleaningOperation::StandardizeColumns,
            _ => return Ok(None),
        };
        Ok(Some(operation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_values_request() {
        let request = OperationRequest::missing_values(
            CleaningStrategy::FillMedian,
            Some(vec!["Age".to_string()]),
        );
        assert_eq!(
            request.to_operation().unwrap(),
            Some(CleaningOperation::HandleMissingValues {
                strategy: CleaningStrategy::FillMedian,
                columns: Some(vec!["Age".to_string()]),
            })
        );
    }

    #[test]
    fn test_missing_strategy_is_rejected() {
        let request = OperationRequest {
            kind: "missing_values".to_string(),
            ..OperationRequest::default()
        };
        assert_eq!(
            request.to_operation(),
            Err(ModelError::MissingStrategy {
                operation: "missing_values".to_string()
            })
        );
    }

    #[test]
    fn test_duplicates_defaults_to_first() {
        let request = OperationRequest {
            kind: "duplicates".to_string(),
            ..OperationRequest::default()
        };
        assert_eq!(
            request.to_operation().unwrap(),
            Some(CleaningOperation::RemoveDuplicates {
                subset: None,
                keep: KeepStrategy::First,
            })
        );
    }

    #[test]
    fn test_unknown_type_is_ignored() {
        let request = OperationRequest {
            kind: "outliers".to_string(),
            ..OperationRequest::default()
        };
        assert_eq!(request.to_operation().unwrap(), None);
    }

    #[test]
    fn test_describe_standardize() {
        let record = OperationRecord::StandardizeColumns {
            original_columns: vec!["User Name".to_string(), "age".to_string()],
            new_columns: vec!["user_name".to_string(), "age".to_string()],
        };
        assert_eq!(record.describe(), "1 of 2 column(s) renamed");
        assert_eq!(record.name(), "standardize_columns");
    }
}
