//! Data-quality model types shared by the profiler, the cleaner and the
//! collaborator layers.

pub mod enums;
pub mod error;
pub mod operation;
pub mod quality;

pub use enums::{CleaningStrategy, ColumnKind, KeepStrategy};
pub use error::{ModelError, Result};
pub use operation::{CleaningOperation, OperationRecord, OperationRequest};
pub use quality::{ColumnQuality, QualitySummary, Suggestion, percentage};
