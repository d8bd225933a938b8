use std::fmt::{self, Display};

/// Errors produced by model parsers and validation routines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    UnknownVariant { kind: &'static str, value: String },
    InvalidNumber { field: &'static str, value: String },
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::UnknownVariant { kind, value } => {
                write!(f, "unknown {kind}: {value:?}")
            }
            ModelError::InvalidNumber { field, value } => {
                write!(f, "invalid number for {field}: {value:?}")
            }
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;
