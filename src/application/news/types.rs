use thiserror::Error;
use uuid::Uuid;

use crate::application::pagination::PaginationError;
use crate::application::repos::RepoError;
use crate::domain::error::DomainError;

#[derive(Debug, Error)]
pub enum NewsError {
    #[error("validation failed: {}", violations.join("; "))]
    Validation { violations: Vec<String> },
    #[error("news `{id}` not found")]
    NotFound { id: Uuid },
    #[error("no news found for the requested page")]
    EmptyResult,
    #[error("invalid argument: {}", violations.join("; "))]
    InvalidArgument { violations: Vec<String> },
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl NewsError {
    /// Short machine-readable kind, used in logs and API error codes.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation_failed",
            Self::NotFound { .. } => "not_found",
            Self::EmptyResult => "empty_result",
            Self::InvalidArgument { .. } => "invalid_argument",
            Self::Domain(_) => "domain_invariant",
            Self::Repo(_) => "repository",
        }
    }

    pub fn violations(&self) -> &[String] {
        match self {
            Self::Validation { violations } | Self::InvalidArgument { violations } => violations,
            _ => &[],
        }
    }

    /// Map a store-level `NotFound` onto the entity that vanished.
    pub(crate) fn from_repo(id: Uuid, err: RepoError) -> Self {
        match err {
            RepoError::NotFound => Self::NotFound { id },
            other => Self::Repo(other),
        }
    }
}

impl From<PaginationError> for NewsError {
    fn from(err: PaginationError) -> Self {
        Self::InvalidArgument {
            violations: vec![err.to_string()],
        }
    }
}

pub fn ensure_valid(violations: Vec<String>) -> Result<(), NewsError> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(NewsError::Validation { violations })
    }
}

pub fn ensure_valid_argument(violations: Vec<String>) -> Result<(), NewsError> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(NewsError::InvalidArgument { violations })
    }
}

/// Take a field that validation has already proven present.
pub(crate) fn required(field: &'static str, value: Option<String>) -> Result<String, NewsError> {
    value.ok_or_else(|| NewsError::Validation {
        violations: vec![format!("{field}: is required")],
    })
}
