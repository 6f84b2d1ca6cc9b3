//! Row-oriented views over a `DataFrame`.

use polars::prelude::{AnyValue, Column, DataFrame};
use serde_json::{Map, Value};

use crate::values::{any_to_json, any_to_string};

/// Renders the first `limit` rows of a frame as JSON records (`column -> value`).
pub fn frame_records(df: &DataFrame, limit: usize) -> Vec<Map<String, Value>> {
    let rows = df.height().min(limit);
    let columns = df.get_columns();
    let mut records = Vec::with_capacity(rows);
    for idx in 0..rows {
        let mut record = Map::with_capacity(columns.len());
        for column in columns {
            let value = column.get(idx).unwrap_or(AnyValue::Null);
            record.insert(column.name().to_string(), any_to_json(value));
        }
        records.push(record);
    }
    records
}

/// Builds a comparable identity for one row over the given columns.
///
/// Nulls are kept distinct from empty strings, and two nulls compare equal.
/// Float `-0.0` and `0.0` share a key.
pub fn row_key(columns: &[&Column], idx: usize) -> Vec<Option<String>> {
    columns
        .iter()
        .map(|column| match column.get(idx).unwrap_or(AnyValue::Null) {
            AnyValue::Null => None,
            AnyValue::Float32(v) if v == 0.0 => Some(any_to_string(AnyValue::Float32(0.0))),
            AnyValue::Float64(v) if v == 0.0 => Some(any_to_string(AnyValue::Float64(0.0))),
            value => Some(any_to_string(value)),
        })
        .collect()
}
