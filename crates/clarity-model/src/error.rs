use thiserror::Error;

/// Errors raised while converting wire-level values into model types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("unsupported cleaning strategy '{value}'")]
    InvalidStrategy { value: String },
    #[error("unsupported keep option '{value}' (expected first, last or none)")]
    InvalidKeep { value: String },
    #[error("operation '{operation}' requires a strategy")]
    MissingStrategy { operation: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
