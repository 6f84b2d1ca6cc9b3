//! Shared polars helpers for Clarity crates.
//!
//! Converts polars `AnyValue`s to plain Rust and JSON values, classifies
//! dtypes, and renders frame rows as JSON records for previews.

mod records;
mod values;

pub use records::{frame_records, row_key};
pub use values::{
    any_to_json, any_to_string, format_numeric, is_float_dtype, is_integer_dtype,
    is_numeric_dtype,
};
