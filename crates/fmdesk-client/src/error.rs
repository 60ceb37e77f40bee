//! Client and service error types.

use fmdesk_core::errors::CoreError;
use thiserror::Error;

/// Errors from talking to the backend API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure: connection refused, timeout, TLS, ...
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend answered with a non-success status code.
    #[error("API error ({status}): {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Best-effort message from the response body.
        message: String,
    },

    /// The response body was not the JSON shape we expected.
    #[error("decode error: {0}")]
    Decode(String),
}

impl ApiError {
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.status(), Some(404))
    }
}

/// Errors surfaced by [`crate::TaskService`] and the approval workflow.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ServiceError {
    /// Local precondition failure; nothing was sent.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Core(CoreError::Validation(_)))
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        match self {
            Self::Core(CoreError::NotFound { .. }) => true,
            Self::Api(api) => api.is_not_found(),
            Self::Core(_) => false,
        }
    }

    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::Core(err) if err.is_conflict())
    }
}
