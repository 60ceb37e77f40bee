//! Explicit request credentials.

use std::fmt;

/// Bearer token attached to every request, if present.
///
/// Passed in at construction; the client never reads tokens from ambient state.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    bearer_token: Option<String>,
}

impl Credentials {
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { bearer_token: None }
    }

    /// Credentials from a token; blank tokens are treated as anonymous.
    #[must_use]
    pub fn bearer(token: impl Into<String>) -> Self {
        let token = token.into();
        let token = token.trim();
        Self {
            bearer_token: (!token.is_empty()).then(|| token.to_string()),
        }
    }

    #[must_use]
    pub const fn is_anonymous(&self) -> bool {
        self.bearer_token.is_none()
    }

    /// `Authorization` header value.
    #[must_use]
    pub fn header_value(&self) -> Option<String> {
        self.bearer_token
            .as_deref()
            .map(|token| format!("Bearer {token}"))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = if self.bearer_token.is_some() {
            "<redacted>"
        } else {
            "<none>"
        };
        f.debug_struct("Credentials")
            .field("bearer_token", &token)
            .finish()
    }
}
