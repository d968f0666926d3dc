//! Validated research query

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::DomainError;

/// A trimmed, non-empty research query of bounded length
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResearchQuery(String);

impl ResearchQuery {
    /// Maximum query length in characters
    pub const MAX_LEN: usize = 500;

    /// Parse and validate a raw query
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptyQuery`] for blank input and
    /// [`DomainError::QueryTooLong`] when the trimmed query exceeds
    /// [`Self::MAX_LEN`] characters.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyQuery);
        }

        let len = trimmed.chars().count();
        if len > Self::MAX_LEN {
            return Err(DomainError::QueryTooLong {
                max: Self::MAX_LEN,
                actual: len,
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Borrow the query text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ResearchQuery {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ResearchQuery> for String {
    fn from(query: ResearchQuery) -> Self {
        query.0
    }
}

impl AsRef<str> for ResearchQuery {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
