//! Data-quality profiling and cleaning for tabular snapshots.
//!
//! - [`profile`]: pure functions that summarise a snapshot and suggest fixes.
//! - [`Cleaner`]: a session that applies null handling, duplicate removal
//!   and column-name standardisation to a working copy, logging each step.
//!
//! Snapshots are polars `DataFrame`s. Nothing here performs I/O.

mod cleaner;
mod columns;
mod duplicates;
mod error;
mod missing;

pub mod profile;

pub use cleaner::Cleaner;
pub use columns::{standardize_name, standardize_names};
pub use error::{CleanError, Result};
pub use missing::MODE_PLACEHOLDER;
pub use profile::{column_kind, suggest_operations, suggest_strategy, summarize};
