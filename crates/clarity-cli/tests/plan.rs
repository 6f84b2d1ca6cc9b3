//! Integration tests for plan files and settings.

use std::fs;

use clarity_cli::plan::{load_plan, parse_op};
use clarity_cli::settings::load_settings;
use clarity_model::{CleaningOperation, CleaningStrategy, KeepStrategy, OperationRequest};
use tempfile::TempDir;

#[test]
fn plan_file_accepts_list_and_wrapped_forms() {
    let dir = TempDir::new().expect("tempdir");
    let list = dir.path().join("list.json");
    let wrapped = dir.path().join("wrapped.json");
    fs::write(
        &list,
        r#"[{"type": "missing_values", "strategy": "fill_mean", "columns": ["age"]},
            {"type": "duplicates", "keep": "last"}]"#,
    )
    .expect("write list");
    fs::write(
        &wrapped,
        r#"{"operations": [{"type": "missing_values", "strategy": "fill_mean", "columns": ["age"]},
                           {"type": "duplicates", "keep": "last"}]}"#,
    )
    .expect("write wrapped");

    let from_list = load_plan(&list).expect("list plan");
    assert_eq!(from_list, load_plan(&wrapped).expect("wrapped plan"));
    assert_eq!(
        from_list[0].to_operation().expect("valid"),
        Some(CleaningOperation::HandleMissingValues {
            strategy: CleaningStrategy::FillMean,
            columns: Some(vec!["age".to_string()]),
        })
    );
    assert_eq!(
        from_list[1].to_operation().expect("valid"),
        Some(CleaningOperation::RemoveDuplicates {
            subset: None,
            keep: KeepStrategy::Last,
        })
    );
}

#[test]
fn malformed_plan_is_an_error() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("plan.json");
    fs::write(&path, r#"{"steps": []}"#).expect("write plan");
    let err = load_plan(&path).unwrap_err();
    assert!(format!("{err:#}").contains("parse plan"));
    assert!(load_plan(&dir.path().join("missing.json")).is_err());
}

#[test]
fn op_flags_map_to_wire_operations() {
    let ops: Vec<OperationRequest> = [
        "missing_values:fill_zero:Score",
        "duplicates:none",
        "standardize_columns",
    ]
    .iter()
    .map(|spec| parse_op(spec).expect("parse"))
    .collect();

    let parsed: Vec<CleaningOperation> = ops
        .iter()
        .filter_map(|op| op.to_operation().expect("valid"))
        .collect();
    assert_eq!(
        parsed,
        vec![
            CleaningOperation::HandleMissingValues {
                strategy: CleaningStrategy::FillZero,
                columns: Some(vec!["Score".to_string()]),
            },
            CleaningOperation::RemoveDuplicates {
                subset: None,
                keep: KeepStrategy::DropAll,
            },
            CleaningOperation::StandardizeColumns,
        ]
    );
}

#[test]
fn settings_file_points_stores_at_configured_dirs() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("settings.toml");
    let data_dir = dir.path().join("data");
    fs::write(
        &path,
        format!(
            "[storage]\ndata_dir = {:?}\nmax_upload_bytes = 2048\n",
            data_dir.display().to_string()
        ),
    )
    .expect("write settings");

    let settings = load_settings(Some(&path));
    let store = settings.dataset_store();
    assert_eq!(store.base_dir(), data_dir.as_path());
    assert_eq!(store.max_upload_bytes(), 2048);
}
