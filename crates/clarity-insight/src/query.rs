//! Declarative chart queries.
//!
//! The model describes the chart data as a grouping plus an aggregation;
//! the query is executed here against the dataset rather than run as code.

use std::fmt;

use clarity_common::{any_to_string, is_numeric_dtype};
use polars::prelude::{
    Column, DataFrame, DataType, Expr, IdxSize, IntoLazy, SortMultipleOptions, col, len,
};
use serde::{Deserialize, Serialize};

use crate::error::{InsightError, Result};

/// Aggregation applied to each group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    Sum,
    Mean,
    Count,
    Min,
    Max,
}

impl Aggregation {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Mean => "mean",
            Self::Count => "count",
            Self::Min => "min",
            Self::Max => "max",
        }
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordering of the result by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Chart data request: `aggregation(value_column)` grouped by `group_by`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartQuery {
    pub group_by: String,
    /// Optional for `count`, which otherwise counts rows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_column: Option<String>,
    pub aggregation: Aggregation,
    /// Categories ascend when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortOrder>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

/// One chart data point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub category: String,
    pub value: f64,
}

// Inputs are renamed to these before grouping.
const CATEGORY: &str = "category";
const VALUE: &str = "value";

impl ChartQuery {
    fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
        df.column(name).map_err(|_| InsightError::ColumnNotFound {
            column: name.to_string(),
        })
    }

    /// Per-group aggregate over the `VALUE` input column.
    fn aggregate(&self) -> Expr {
        if self.value_column.is_none() {
            return len();
        }
        let value = col(VALUE);
        match self.aggregation {
            Aggregation::Count => value.count(),
            Aggregation::Sum => value.cast(DataType::Float64).sum(),
            Aggregation::Mean => value.cast(DataType::Float64).mean(),
            Aggregation::Min => value.cast(DataType::Float64).min(),
            Aggregation::Max => value.cast(DataType::Float64).max(),
        }
    }

    /// Runs the query against `df`.
    ///
    /// Rows with a null category are skipped. Groups with no values are
    /// dropped for `mean`, `min` and `max`.
    pub fn execute(&self, df: &DataFrame) -> Result<Vec<ChartPoint>> {
        let group = Self::column(df, &self.group_by)?;
        let value = match (&self.value_column, self.aggregation) {
            (Some(name), _) => Some(Self::column(df, name)?),
            (None, Aggregation::Count) => None,
            (None, aggregation) => {
                return Err(InsightError::InvalidQuery {
                    reason: format!("{aggregation} requires a value_column"),
                });
            }
        };
        if let Some(column) = value
            && self.aggregation != Aggregation::Count
            && !is_numeric_dtype(column.dtype())
        {
            return Err(InsightError::NonNumericColumn {
                column: column.name().to_string(),
                aggregation: self.aggregation.as_str(),
            });
        }

        let mut inputs = vec![group.clone().with_name(CATEGORY.into())];
        if let Some(column) = value {
            inputs.push(column.clone().with_name(VALUE.into()));
        }
        let mut plan = DataFrame::new(inputs)?
            .lazy()
            .filter(col(CATEGORY).is_not_null())
            .group_by([col(CATEGORY)])
            .agg([self.aggregate().cast(DataType::Float64).alias(VALUE)])
            .filter(col(VALUE).is_not_null())
            .sort_by_exprs([col(CATEGORY)], SortMultipleOptions::default());
        if let Some(order) = self.sort {
            plan = plan.sort_by_exprs(
                [col(VALUE)],
                SortMultipleOptions::default()
                    .with_order_descending(order == SortOrder::Desc)
                    .with_maintain_order(true),
            );
        }
        if let Some(limit) = self.limit {
            plan = plan.limit(IdxSize::try_from(limit).unwrap_or(IdxSize::MAX));
        }
        let grouped = plan.collect()?;

        let categories = grouped.column(CATEGORY)?;
        let values = grouped.column(VALUE)?.as_materialized_series().f64()?;
        let mut points = Vec::with_capacity(grouped.height());
        for (idx, value) in values.into_iter().enumerate() {
            let Some(value) = value else {
                continue;
            };
            points.push(ChartPoint {
                category: any_to_string(categories.get(idx)?),
                value,
            });
        }

        if points.is_empty() {
            return Err(InsightError::EmptyResult);
        }
        tracing::debug!(
            group_by = %self.group_by,
            aggregation = %self.aggregation,
            points = points.len(),
            "Executed chart query"
        );
        Ok(points)
    }
}
