//! Closed enumerations for cleaning policies and column classification.
//!
//! Wire-level tokens are parsed with `FromStr`; anything outside the closed
//! set is rejected before it reaches the cleaner.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Remediation policy for null cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleaningStrategy {
    /// Remove rows where the column is null.
    Drop,
    /// Replace nulls with the mean of the non-null values (numeric only).
    FillMean,
    /// Replace nulls with the median of the non-null values (numeric only).
    FillMedian,
    /// Replace nulls with the most frequent value.
    FillMode,
    /// Carry the previous non-null value forward.
    FillForward,
    /// Carry the next non-null value backward.
    FillBackward,
    /// Replace nulls with zero.
    FillZero,
}

impl CleaningStrategy {
    /// All strategies in declaration order.
    pub const fn all() -> &'static [CleaningStrategy] {
        &[
            Self::Drop,
            Self::FillMean,
            Self::FillMedian,
            Self::FillMode,
            Self::FillForward,
            Self::FillBackward,
            Self::FillZero,
        ]
    }

    /// Returns the wire token for this strategy.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Drop => "drop",
            Self::FillMean => "fill_mean",
            Self::FillMedian => "fill_median",
            Self::FillMode => "fill_mode",
            Self::FillForward => "fill_forward",
            Self::FillBackward => "fill_backward",
            Self::FillZero => "fill_zero",
        }
    }

    /// Returns true when the strategy only applies to numeric columns.
    pub const fn requires_numeric(&self) -> bool {
        matches!(self, Self::FillMean | Self::FillMedian)
    }
}

impl fmt::Display for CleaningStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CleaningStrategy {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|strategy| strategy.as_str().eq_ignore_ascii_case(token))
            .ok_or_else(|| ModelError::InvalidStrategy {
                value: s.to_string(),
            })
    }
}

/// Which member of a group of equal rows survives duplicate removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeepStrategy {
    /// Keep the earliest row.
    #[default]
    First,
    /// Keep the latest row.
    Last,
    /// Remove every member of a duplicated group.
    #[serde(rename = "none")]
    DropAll,
}

impl KeepStrategy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Last => "last",
            Self::DropAll => "none",
        }
    }
}

impl fmt::Display for KeepStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeepStrategy {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "first" => Ok(Self::First),
            "last" => Ok(Self::Last),
            "none" => Ok(Self::DropAll),
            _ => Err(ModelError::InvalidKeep {
                value: s.to_string(),
            }),
        }
    }
}

/// Semantic classification of a column, derived from its dtype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Integer or floating-point values.
    Numeric,
    /// Free text or categorical labels.
    Text,
    /// Booleans, temporal values, all-null columns and anything else.
    Other,
}

impl ColumnKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Text => "text",
            Self::Other => "other",
        }
    }

    /// The strategy recommended for nulls in a column of this kind.
    ///
    /// Median resists outliers, mode keeps the dominant category, and
    /// unknown kinds are dropped rather than guessed at.
    pub const fn suggested_strategy(&self) -> CleaningStrategy {
        match self {
            Self::Numeric => CleaningStrategy::FillMedian,
            Self::Text => CleaningStrategy::FillMode,
            Self::Other => CleaningStrategy::Drop,
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
