//! Text normalization shared by entities and queries.

use crate::error::{DomainError, DomainResult};

/// True when `value` has no non-whitespace characters.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Owned, trimmed copy of `value`.
pub fn normalize(value: &str) -> String {
    value.trim().to_owned()
}

/// Trimmed copy of `value`, or a validation error naming `field` if blank.
pub fn require_non_blank(value: &str, field: &str) -> DomainResult<String> {
    let trimmed = normalize(value);
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{field} cannot be empty")));
    }
    Ok(trimmed)
}

/// Case-insensitive substring test. `needle` must already be lowercase.
pub fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
