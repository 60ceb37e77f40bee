//! Typed result for reads that may hit an undeployed endpoint.

/// A successful read, tagged with where the value came from.
///
/// A 404 on a read is taken to mean "this backend has not deployed the
/// endpoint yet" and answered with a locally fabricated default, so the
/// caller can still render. Callers and tests can tell the two apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiOutcome<T> {
    /// The backend answered.
    Fetched(T),
    /// The backend answered 404; the value is an empty placeholder.
    NotDeployedFallback(T),
}

impl<T> ApiOutcome<T> {
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::NotDeployedFallback(_))
    }

    #[must_use]
    pub const fn value(&self) -> &T {
        match self {
            Self::Fetched(value) | Self::NotDeployedFallback(value) => value,
        }
    }

    #[must_use]
    pub fn into_inner(self) -> T {
        match self {
            Self::Fetched(value) | Self::NotDeployedFallback(value) => value,
        }
    }

    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiOutcome<U> {
        match self {
            Self::Fetched(value) => ApiOutcome::Fetched(f(value)),
            Self::NotDeployedFallback(value) => ApiOutcome::NotDeployedFallback(f(value)),
        }
    }
}
