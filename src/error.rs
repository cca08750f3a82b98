//! Business-error taxonomy shared by every service.
//!
//! Boundaries map errors to transport codes by switching on [`ErrorKind`], never
//! by inspecting message text.

use serde::Serialize;

use crate::repository::RepositoryError;

/// Classification tag carried alongside every error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Forbidden,
    Unavailable,
}

impl ErrorKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::Forbidden => "forbidden",
            Self::Unavailable => "unavailable",
        }
    }
}

/// Error raised by the domain services.
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    /// Malformed, empty, or out-of-range input; the caller fixes the request.
    #[error("{0}")]
    Validation(String),
    /// The id does not resolve within the tenant. Absence, not leakage.
    #[error("{0}")]
    NotFound(String),
    /// An invariant would be violated: uniqueness, capacity, quorum, linkage.
    #[error("{0}")]
    Conflict(String),
    /// Role-based authorization failure.
    #[error("{0}")]
    Forbidden(String),
    /// Storage failure surfaced unchanged.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("{entity} {id} not found"))
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound(_) | Self::Repository(RepositoryError::NotFound) => ErrorKind::NotFound,
            Self::Conflict(_) | Self::Repository(RepositoryError::Conflict) => ErrorKind::Conflict,
            Self::Forbidden(_) => ErrorKind::Forbidden,
            Self::Repository(RepositoryError::Unavailable(_)) => ErrorKind::Unavailable,
        }
    }
}

/// Per-item report for best-effort bulk operations: every input comes back with
/// either the stored entity or the failure that skipped it.
#[derive(Debug)]
pub struct BulkOutcome<I, T> {
    pub input: I,
    pub outcome: Result<T, BulkFailure>,
}

impl<I, T> BulkOutcome<I, T> {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn succeeded(&self) -> Option<&T> {
        self.outcome.as_ref().ok()
    }
}

/// Failure half of a [`BulkOutcome`], reduced to kind + message so callers can
/// distinguish a conflict from a transient storage error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkFailure {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<DomainError> for BulkFailure {
    fn from(error: DomainError) -> Self {
        Self {
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}
