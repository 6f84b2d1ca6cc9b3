//! Cleaning plans from the command line.
//!
//! `--op` takes a compact form of one wire operation:
//!
//! - `missing_values:<strategy>[:<col>,<col>...]`
//! - `duplicates[:<keep>[:<col>,<col>...]]`
//! - `standardize_columns` (or `standardize`)
//!
//! `--plan` reads a JSON file holding either an array of wire operations or
//! an object with an `operations` array.

use std::path::Path;

use anyhow::{Context, Result, bail};
use clarity_model::OperationRequest;
use serde::Deserialize;

fn column_list(raw: Option<&str>) -> Option<Vec<String>> {
    let columns: Vec<String> = raw?
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(ToString::to_string)
        .collect();
    (!columns.is_empty()).then_some(columns)
}

fn non_empty(token: Option<&str>) -> Option<String> {
    token
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(ToString::to_string)
}

/// Parses one `--op` value into a wire operation.
///
/// Tokens are not validated here; the service rejects bad strategies and
/// keep values, and ignores unknown types.
pub fn parse_op(spec: &str) -> Result<OperationRequest> {
    let mut parts = spec.splitn(3, ':');
    let kind = parts.next().map(str::trim).unwrap_or_default();
    if kind.is_empty() {
        bail!("empty operation in --op '{spec}'");
    }
    let second = parts.next();
    let third = parts.next();

    let request = match kind {
        OperationRequest::MISSING_VALUES => OperationRequest {
            kind: kind.to_string(),
            strategy: non_empty(second),
            columns: column_list(third),
            ..OperationRequest::default()
        },
        OperationRequest::DUPLICATES => OperationRequest {
            kind: kind.to_string(),
            keep: non_empty(second),
            subset: column_list(third),
            ..OperationRequest::default()
        },
        _ => OperationRequest {
            kind: kind.to_string(),
            ..OperationRequest::default()
        },
    };
    Ok(request)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PlanFile {
    List(Vec<OperationRequest>),
    Wrapped { operations: Vec<OperationRequest> },
}

/// Reads a JSON plan file.
pub fn load_plan(path: &Path) -> Result<Vec<OperationRequest>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("read plan {}", path.display()))?;
    let plan: PlanFile = serde_json::from_str(&content)
        .with_context(|| format!("parse plan {}", path.display()))?;
    Ok(match plan {
        PlanFile::List(operations) | PlanFile::Wrapped { operations } => operations,
    })
}
