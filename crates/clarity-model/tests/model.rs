//! Tests for clarity-model wire shapes.

use clarity_model::{
    CleaningOperation, CleaningStrategy, ColumnKind, KeepStrategy, OperationRecord,
    OperationRequest, Suggestion,
};
use serde_json::json;

#[test]
fn suggestion_serializes_with_type_tag() {
    let suggestion = Suggestion::MissingValues {
        column: "Age".to_string(),
        issue_count: 1,
        percentage: 25.0,
        suggested_strategy: CleaningStrategy::FillMedian,
    };
    let value = serde_json::to_value(&suggestion).expect("serialize suggestion");
    assert_eq!(
        value,
        json!({
            "type": "missing_values",
            "column": "Age",
            "issue_count": 1,
            "percentage": 25.0,
            "suggested_strategy": "fill_median"
        })
    );

    let duplicates = serde_json::to_value(Suggestion::Duplicates {
        issue_count: 1,
        percentage: 25.0,
    })
    .expect("serialize duplicates");
    assert_eq!(duplicates["type"], "duplicates");
}

#[test]
fn operation_record_serializes_with_operation_tag() {
    let record = OperationRecord::RemoveDuplicates {
        subset: vec!["Age".to_string(), "City".to_string()],
        keep: KeepStrategy::DropAll,
        rows_before: 4,
        rows_after: 2,
        removed: 2,
    };
    let value = serde_json::to_value(&record).expect("serialize record");
    assert_eq!(value["operation"], "remove_duplicates");
    assert_eq!(value["keep"], "none");
    assert_eq!(value["removed"], 2);

    let round: OperationRecord = serde_json::from_value(value).expect("deserialize record");
    assert_eq!(round, record);
}

#[test]
fn operation_requests_deserialize_from_client_json() {
    let requests: Vec<OperationRequest> = serde_json::from_value(json!([
        {"type": "missing_values", "strategy": "fill_mode", "columns": ["City"]},
        {"type": "duplicates", "keep": "last"},
        {"type": "standardize_columns"},
        {"type": "standardize"},
        {"type": "outliers"}
    ]))
    .expect("deserialize requests");

    let operations: Vec<Option<CleaningOperation>> = requests
        .iter()
        .map(|request| request.to_operation().expect("valid request"))
        .collect();

    assert_eq!(
        operations,
        vec![
            Some(CleaningOperation::HandleMissingValues {
                strategy: CleaningStrategy::FillMode,
                columns: Some(vec!["City".to_string()]),
            }),
            Some(CleaningOperation::RemoveDuplicates {
                subset: None,
                keep: KeepStrategy::Last,
            }),
            Some(CleaningOperation::StandardizeColumns),
            Some(CleaningOperation::StandardizeColumns),
            None,
        ]
    );
}

#[test]
fn invalid_tokens_are_rejected() {
    let bad_strategy = OperationRequest {
        kind: "missing_values".to_string(),
        strategy: Some("interpolate".to_string()),
        ..OperationRequest::default()
    };
    assert!(bad_strategy.to_operation().is_err());

    let bad_keep = OperationRequest {
        kind: "duplicates".to_string(),
        keep: Some("middle".to_string()),
        ..OperationRequest::default()
    };
    assert!(bad_keep.to_operation().is_err());
}

#[test]
fn column_kind_serializes_lowercase() {
    assert_eq!(
        serde_json::to_string(&ColumnKind::Numeric).expect("serialize kind"),
        "\"numeric\""
    );
}
