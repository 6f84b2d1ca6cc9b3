//! Column-level null remediation.
//!
//! Each fill returns the replacement column, or `None` when the column is
//! left untouched (no nulls, wrong kind for the strategy, nothing to fill
//! from). Row removal for `drop` lives in the cleaner since it reshapes the
//! whole frame.

use clarity_common::{is_float_dtype, is_integer_dtype, is_numeric_dtype};
use clarity_model::CleaningStrategy;
use polars::prelude::{
    Column, DataFrame, DataType, Expr, FillNullStrategy, IntoLazy, NamedFrom, PolarsResult, Series, col, lit,
};

/// Placeholder written into a column that has no value to take a mode from.
pub const MODE_PLACEHOLDER: &str = "Unknown";

/// Name the column is evaluated under, so any header is safe to use.
const FILL_COLUMN: &str = "fill";

/// Computes the filled replacement for `column`.
pub(crate) fn fill_column(column: &Column, strategy: CleaningStrategy) -> PolarsResult<Option<Series>> {
    if column.null_count() == 0 {
        return Ok(None);
    }
    if strategy.requires_numeric() && !is_numeric_dtype(column.dtype()) {
        return Ok(None);
    }
    let all_null = column.null_count() == column.len();
    let value = col(FILL_COLUMN);
    match strategy {
        CleaningStrategy::Drop => Ok(None),
        CleaningStrategy::FillMean | CleaningStrategy::FillMedian if all_null => Ok(None),
        CleaningStrategy::FillMean => {
            let value = value.cast(DataType::Float64);
            evaluate(column, value.clone().fill_null(value.mean())).map(Some)
        }
        CleaningStrategy::FillMedian => {
            let value = value.cast(DataType::Float64);
            evaluate(column, value.clone().fill_null(value.median())).map(Some)
        }
        CleaningStrategy::FillMode if all_null => Ok(Some(Series::new(
            column.name().clone(),
            vec![MODE_PLACEHOLDER; column.len()],
        ))),
        CleaningStrategy::FillMode => {
            // Ties go to the smallest value.
            let mode = value.clone().drop_nulls().mode().min();
            evaluate(column, value.fill_null(mode)).map(Some)
        }
        CleaningStrategy::FillForward => column
            .as_materialized_series()
            .fill_null(FillNullStrategy::Forward(None))
            .map(Some),
        CleaningStrategy::FillBackward => column
            .as_materialized_series()
            .fill_null(FillNullStrategy::Backward(None))
            .map(Some),
        CleaningStrategy::FillZero => evaluate(column, zero_fill(value, column.dtype())).map(Some),
    }
}

/// Int64 `0` for integers, `0.0` for floats, text `"0"` for everything else.
fn zero_fill(value: Expr, dtype: &DataType) -> Expr {
    if is_integer_dtype(dtype) {
        value.fill_null(lit(0))
    } else if is_float_dtype(dtype) {
        value.fill_null(lit(0.0))
    } else {
        value.cast(DataType::String).fill_null(lit("0"))
    }
}

/// Evaluates `expr` over a one-column frame holding `column` and returns the
/// result under the column's original name.
fn evaluate(column: &Column, expr: Expr) -> PolarsResult<Series> {
    let frame = DataFrame::new(vec![column.clone().with_name(FILL_COLUMN.into())])?;
    let out = frame.lazy().select([expr.alias(FILL_COLUMN)]).collect()?;
    let filled = out.column(FILL_COLUMN)?.as_materialized_series().clone();
    Ok(filled.with_name(column.name().clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::IntoColumn;

    fn ints(values: &[Option<i64>]) -> Column {
        Series::new("n".into(), values.to_vec()).into_column()
    }

    fn texts(values: &[Option<&str>]) -> Column {
        Series::new("s".into(), values.to_vec()).into_column()
    }

    fn as_f64(series: &Series) -> Vec<Option<f64>> {
        series.f64().unwrap().iter().collect()
    }

    #[test]
    fn test_median_even_count_averages_middle() {
        let filled = fill_column(&ints(&[Some(1), None, Some(4), Some(2), Some(10)]), CleaningStrategy::FillMedian)
            .unwrap()
            .unwrap();
        assert_eq!(filled.dtype(), &DataType::Float64);
        assert_eq!(as_f64(&filled), vec![Some(1.0), Some(3.0), Some(4.0), Some(2.0), Some(10.0)]);
    }

    #[test]
    fn test_mean_fill() {
        let filled = fill_column(&ints(&[Some(1), None, Some(2)]), CleaningStrategy::FillMean)
            .unwrap()
            .unwrap();
        assert_eq!(as_f64(&filled), vec![Some(1.0), Some(1.5), Some(2.0)]);
    }

    #[test]
    fn test_numeric_fills_skip_text_and_all_null() {
        let text = texts(&[Some("a"), None]);
        assert!(fill_column(&text, CleaningStrategy::FillMean).unwrap().is_none());
        let empty = ints(&[None, None]);
        assert!(fill_column(&empty, CleaningStrategy::FillMedian).unwrap().is_none());
    }

    #[test]
    fn test_mode_ties_pick_smallest() {
        let text = texts(&[Some("b"), Some("a"), None, Some("b"), Some("a")]);
        let filled = fill_column(&text, CleaningStrategy::FillMode).unwrap().unwrap();
        let values: Vec<Option<&str>> = filled.str().unwrap().iter().collect();
        assert_eq!(values[2], Some("a"));

        let numbers = ints(&[Some(10), Some(9), None, Some(10), Some(9)]);
        let filled = fill_column(&numbers, CleaningStrategy::FillMode).unwrap().unwrap();
        assert_eq!(filled.dtype(), &DataType::Int64);
        let values: Vec<Option<i64>> = filled.i64().unwrap().iter().collect();
        assert_eq!(values, vec![Some(10), Some(9), Some(9), Some(10), Some(9)]);
    }

    #[test]
    fn test_mode_all_null_uses_placeholder() {
        let filled = fill_column(&texts(&[None, None]), CleaningStrategy::FillMode)
            .unwrap()
            .unwrap();
        let values: Vec<Option<&str>> = filled.str().unwrap().iter().collect();
        assert_eq!(values, vec![Some("Unknown"), Some("Unknown")]);
    }

    #[test]
    fn test_forward_and_backward_keep_edge_nulls() {
        let column = ints(&[None, Some(1), None, Some(3), None]);
        let forward = fill_column(&column, CleaningStrategy::FillForward).unwrap().unwrap();
        let values: Vec<Option<i64>> = forward.i64().unwrap().iter().collect();
        assert_eq!(values, vec![None, Some(1), Some(1), Some(3), Some(3)]);

        let backward = fill_column(&column, CleaningStrategy::FillBackward).unwrap().unwrap();
        let values: Vec<Option<i64>> = backward.i64().unwrap().iter().collect();
        assert_eq!(values, vec![Some(1), Some(1), Some(3), Some(3), None]);
    }

    #[test]
    fn test_zero_fill_by_kind() {
        let filled = fill_column(&ints(&[None, Some(5)]), CleaningStrategy::FillZero)
            .unwrap()
            .unwrap();
        let values: Vec<Option<i64>> = filled.i64().unwrap().iter().collect();
        assert_eq!(values, vec![Some(0), Some(5)]);

        let filled = fill_column(&texts(&[None, Some("x")]), CleaningStrategy::FillZero)
            .unwrap()
            .unwrap();
        let values: Vec<Option<&str>> = filled.str().unwrap().iter().collect();
        assert_eq!(values, vec![Some("0"), Some("x")]);
    }

    #[test]
    fn test_no_nulls_is_untouched() {
        let column = ints(&[Some(1), Some(2)]);
        for strategy in CleaningStrategy::all() {
            assert!(fill_column(&column, *strategy).unwrap().is_none());
        }
    }

    #[test]
    fn test_fill_keeps_column_name() {
        let column = Series::new("*".into(), [Some(2.0f64), None, Some(4.0)]).into_column();
        let filled = fill_column(&column, CleaningStrategy::FillMean).unwrap().unwrap();
        assert_eq!(filled.name().as_str(), "*");
        assert_eq!(as_f64(&filled), vec![Some(2.0), Some(3.0), Some(4.0)]);

        let text = texts(&[Some("x"), None, Some("y")]);
        let forward = fill_column(&text, CleaningStrategy::FillForward).unwrap().unwrap();
        assert_eq!(forward.name().as_str(), "s");
        let values: Vec<Option<&str>> = forward.str().unwrap().iter().collect();
        assert_eq!(values, vec![Some("x"), Some("x"), Some("y")]);
    }
}
