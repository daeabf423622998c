//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Two kinds only, so callers can tell bad input apart from a missing
/// product. Every check runs before any state is touched; an `Err` always
/// means nothing was written.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input was structurally or semantically invalid (blank identifier,
    /// negative price or stock, duplicate code, missing required value).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An update targeted a code the store does not hold.
    #[error("product not found: {0}")]
    ProductNotFound(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn product_not_found(code: impl Into<String>) -> Self {
        Self::ProductNotFound(code.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ProductNotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_and_detail() {
        let err = DomainError::validation("name cannot be empty");
        assert_eq!(err.to_string(), "validation failed: name cannot be empty");

        let err = DomainError::product_not_found("A1");
        assert_eq!(err.to_string(), "product not found: A1");
    }

    #[test]
    fn kind_predicates() {
        assert!(DomainError::validation("x").is_validation());
        assert!(!DomainError::validation("x").is_not_found());
        assert!(DomainError::product_not_found("x").is_not_found());
    }
}
