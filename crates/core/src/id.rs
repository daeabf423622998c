//! Strongly-typed identifiers used across the domain.

use core::borrow::Borrow;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::text;

/// Identifier of a product: trimmed, never blank, case-sensitive.
///
/// `Borrow<str>` is implemented (and `Hash` is derived over the inner
/// `String`), so maps keyed by `ProductCode` can be queried with a plain
/// `&str`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductCode(String);

impl ProductCode {
    /// Trim `raw` and reject it if nothing is left.
    pub fn parse(raw: impl AsRef<str>) -> DomainResult<Self> {
        let code = text::normalize(raw.as_ref());
        if code.is_empty() {
            return Err(DomainError::validation("code cannot be empty"));
        }
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl core::fmt::Display for ProductCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProductCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ProductCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl FromStr for ProductCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ProductCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<&str> for ProductCode {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ProductCode> for String {
    fn from(value: ProductCode) -> Self {
        value.0
    }
}
