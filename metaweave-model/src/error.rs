use std::fmt::{self, Display};

/// Errors produced by model constructors and parsing routines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A provider or route tag that names neither a movie nor a series.
    UnsupportedType(String),
    /// A string that is not a `tmdb-{movie|show}-{id}` identifier.
    InvalidCanonicalId(String),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::UnsupportedType(tag) => {
                write!(f, "unsupported media type: {tag}")
            }
            ModelError::InvalidCanonicalId(raw) => {
                write!(f, "invalid canonical id: {raw}")
            }
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;
