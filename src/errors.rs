//! Error types for document editing
//!
//! Every editing operation either completes or returns one of these; callers
//! are expected to throw the in-memory tree away on error rather than
//! persisting a half-applied edit.

use thiserror::Error;

/// Failure of a tree lookup or an editing operation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// An id parameter does not resolve in the tree
    #[error("element not found: {0}")]
    NotFound(String),

    /// A value outside a closed enumeration (head shape, clef shape, form, ...)
    #[error("invalid {kind}: '{value}'")]
    InvalidEnum { kind: &'static str, value: String },

    /// Parameters or document structure that the operation cannot work with
    #[error("malformed input: {0}")]
    MalformedInput(String),
}

impl EditError {
    pub fn not_found(id: impl Into<String>) -> Self {
        EditError::NotFound(id.into())
    }

    pub fn invalid_enum(kind: &'static str, value: impl Into<String>) -> Self {
        EditError::InvalidEnum {
            kind,
            value: value.into(),
        }
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        EditError::MalformedInput(msg.into())
    }
}

pub type EditResult<T> = Result<T, EditError>;
