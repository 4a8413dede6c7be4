//! Store Error Taxonomy
//!
//! Every store operation returns `Result<T, StoreError>`. The variants
//! map onto four caller-facing categories (validation, not-found,
//! conflict, auth) plus a catch-all for storage backend failures, so UI
//! glue can branch on `kind()` without matching every variant.

use thiserror::Error;

/// Business errors for user and reservation workflows.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("required field `{0}` is missing")]
    MissingField(&'static str),
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
    #[error("{0}")]
    Conflict(String),
    #[error("invalid credentials")]
    Unauthorized,
    #[error("password hashing error: {0}")]
    Hash(String),
    #[error("storage backend failure: {0}")]
    Storage(#[from] anyhow::Error),
}

/// Caller-facing error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Auth,
    Storage,
}

impl StoreError {
    /// Category used by UI glue to pick a localized message.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) | Self::MissingField(_) => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::Unauthorized => ErrorKind::Auth,
            // Hashing failures are internal, never a credential problem
            Self::Hash(_) | Self::Storage(_) => ErrorKind::Storage,
        }
    }

    /// Stable numeric code for external mapping/logging.
    pub fn code(&self) -> u16 {
        match self {
            Self::Validation(_) => 1001,
            Self::MissingField(_) => 1002,
            Self::NotFound { .. } => 1003,
            Self::Conflict(_) => 1004,
            Self::Unauthorized => 1005,
            Self::Hash(_) => 1101,
            Self::Storage(_) => 1200,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(
            StoreError::MissingField("phone").kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            StoreError::NotFound {
                entity: "user",
                id: "u1".into()
            }
            .kind(),
            ErrorKind::NotFound
        );
        assert_eq!(StoreError::Unauthorized.kind(), ErrorKind::Auth);
        assert_eq!(
            StoreError::Storage(anyhow::anyhow!("quota exceeded")).kind(),
            ErrorKind::Storage
        );
    }

    #[test]
    fn test_display_names_field() {
        let err = StoreError::MissingField("demandDescription");
        assert!(err.to_string().contains("demandDescription"));
    }

    #[test]
    fn test_codes_are_distinct() {
        let errs = [
            StoreError::Validation("x".into()).code(),
            StoreError::MissingField("f").code(),
            StoreError::NotFound {
                entity: "user",
                id: "u".into(),
            }
            .code(),
            StoreError::Conflict("c".into()).code(),
            StoreError::Unauthorized.code(),
            StoreError::Hash("h".into()).code(),
            StoreError::Storage(anyhow::anyhow!("s")).code(),
        ];
        let mut sorted = errs.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), errs.len());
    }
}
