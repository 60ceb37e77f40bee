//! Cross-cutting error types for fmdesk.
//!
//! Transport errors live in `fmdesk-client`, configuration errors in
//! `fmdesk-config`. The binary converges them through `anyhow`.

use thiserror::Error;

/// Errors raised by the task model itself, before or independent of any I/O.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// A state machine transition was attempted that is not allowed.
    #[error("Invalid state transition: {entity_type} {id} from {from} to {to}")]
    InvalidTransition {
        entity_type: String,
        id: String,
        from: String,
        to: String,
    },

    /// Data failed a local precondition (required field, format, range).
    #[error("Validation error: {0}")]
    Validation(String),
}

impl CoreError {
    /// Not-found error for a task id.
    #[must_use]
    pub fn task_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "task".to_string(),
            id: id.into(),
        }
    }

    /// True for a transition that conflicts with the entity's current state.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::InvalidTransition { .. })
    }
}
