//! Domain model errors

use crate::name::NameId;
use thiserror::Error;

/// Result type for model operations
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised by concept mutation and tag parsing
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// The concept holds no name with this id
    #[error("Concept has no name with id {id}")]
    UnknownName { id: NameId },

    /// A tag string could not be parsed
    #[error("Invalid concept name tag '{tag}': {reason}")]
    InvalidTag { tag: String, reason: String },
}

impl ModelError {
    /// Create an unknown name error
    pub fn unknown_name(id: NameId) -> Self {
        Self::UnknownName { id }
    }

    /// Create an invalid tag error
    pub fn invalid_tag(tag: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTag {
            tag: tag.into(),
            reason: reason.into(),
        }
    }
}
