//! Row-identity comparison for duplicate detection and removal.

use std::collections::{HashMap, HashSet};

use clarity_common::row_key;
use clarity_model::KeepStrategy;
use polars::prelude::{BooleanChunked, Column, DataFrame, NewChunkedArray, PolarsResult};

type RowKey = Vec<Option<String>>;

/// Builds one comparable key per row over `subset`.
fn row_keys(df: &DataFrame, subset: &[String]) -> PolarsResult<Vec<RowKey>> {
    let columns = subset
        .iter()
        .map(|name| df.column(name))
        .collect::<PolarsResult<Vec<&Column>>>()?;
    Ok((0..df.height()).map(|idx| row_key(&columns, idx)).collect())
}

/// Returns which rows survive duplicate removal over `subset`.
///
/// An empty subset keeps every row.
pub(crate) fn keep_mask(df: &DataFrame, subset: &[String], keep: KeepStrategy) -> PolarsResult<Vec<bool>> {
    if subset.is_empty() {
        return Ok(vec![true; df.height()]);
    }
    let keys = row_keys(df, subset)?;
    Ok(mask_for_keys(&keys, keep))
}

fn mask_for_keys(keys: &[RowKey], keep: KeepStrategy) -> Vec<bool> {
    match keep {
        KeepStrategy::First => {
            let mut seen = HashSet::with_capacity(keys.len());
            keys.iter().map(|key| seen.insert(key)).collect()
        }
        KeepStrategy::Last => {
            let mut seen = HashSet::with_capacity(keys.len());
            let mut mask = vec![false; keys.len()];
            for (idx, key) in keys.iter().enumerate().rev() {
                mask[idx] = seen.insert(key);
            }
            mask
        }
        KeepStrategy::DropAll => {
            let mut counts: HashMap<&RowKey, usize> = HashMap::with_capacity(keys.len());
            for key in keys {
                *counts.entry(key).or_insert(0) += 1;
            }
            keys.iter().map(|key| counts.get(key) == Some(&1)).collect()
        }
    }
}

/// Counts rows equal (over all columns) to an earlier row.
pub(crate) fn count_duplicates(df: &DataFrame) -> PolarsResult<usize> {
    let subset: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(ToString::to_string)
        .collect();
    let mask = keep_mask(df, &subset, KeepStrategy::First)?;
    Ok(mask.iter().filter(|kept| !**kept).count())
}

/// Keeps only the rows flagged in `keep`.
pub(crate) fn filter_rows(df: &mut DataFrame, keep: &[bool]) -> PolarsResult<()> {
    let mask = BooleanChunked::from_slice("keep".into(), keep);
    *df = df.filter(&mask)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(values: &[Option<&str>]) -> RowKey {
        values.iter().map(|v| v.map(str::to_string)).collect()
    }

    #[test]
    fn test_keep_first_and_last() {
        let keys = vec![
            key(&[Some("a")]),
            key(&[Some("b")]),
            key(&[Some("a")]),
        ];
        assert_eq!(mask_for_keys(&keys, KeepStrategy::First), vec![true, true, false]);
        assert_eq!(mask_for_keys(&keys, KeepStrategy::Last), vec![false, true, true]);
        assert_eq!(mask_for_keys(&keys, KeepStrategy::DropAll), vec![false, true, false]);
    }

    #[test]
    fn test_nulls_compare_equal() {
        let keys = vec![key(&[None, Some("x")]), key(&[None, Some("x")]), key(&[Some(""), Some("x")])];
        assert_eq!(mask_for_keys(&keys, KeepStrategy::First), vec![true, false, true]);
    }

    #[test]
    fn test_signed_zero_rows_are_duplicates() {
        use polars::prelude::{IntoColumn, NamedFrom, Series};

        let df = DataFrame::new(vec![
            Series::new("delta".into(), [0.0f64, -0.0, 2.0]).into_column(),
            Series::new("site".into(), ["A", "A", "A"]).into_column(),
        ])
        .unwrap();
        assert_eq!(count_duplicates(&df).unwrap(), 1);
    }
}
