//! Error types for the permission engine.

use thiserror::Error;

/// Result type alias for permission engine operations
pub type Result<T> = std::result::Result<T, PermissionError>;

/// Errors raised by registry lookups, toggles and clone.
///
/// Evaluation predicates never return these: a permission that is simply
/// absent is a `false`, not an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PermissionError {
    #[error("Unknown section: {0}")]
    UnknownSection(String),

    #[error("Unknown submodule: {0}")]
    UnknownSubmodule(String),

    #[error("Action '{action}' is not defined for submodule '{submodule}'")]
    UnknownAction { submodule: String, action: String },

    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Invalid permission structure: {0}")]
    InvalidStructure(String),
}

impl PermissionError {
    /// Registry lookup misses. These indicate a caller iterating ids the
    /// registry never declared.
    pub fn is_lookup(&self) -> bool {
        matches!(
            self,
            PermissionError::UnknownSection(_)
                | PermissionError::UnknownSubmodule(_)
                | PermissionError::UnknownAction { .. }
        )
    }
}
