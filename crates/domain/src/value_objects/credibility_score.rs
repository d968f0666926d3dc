//! Credibility score value object
//!
//! A coarse confidence indicator derived from how much readable text a page
//! yielded. Pages with content always land in the 40-90 band; pages without
//! content score 0.
//!
//! # Examples
//!
//! ```
//! use domain::value_objects::CredibilityScore;
//!
//! assert_eq!(CredibilityScore::from_text_len(0).value(), 0);
//! assert_eq!(CredibilityScore::from_text_len(100).value(), 40);
//! assert_eq!(CredibilityScore::from_text_len(3000).value(), 60);
//! assert_eq!(CredibilityScore::from_text_len(10_000).value(), 90);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Credibility score in the range 0-100
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredibilityScore(u8);

impl CredibilityScore {
    /// Score for pages without any content
    pub const NONE: Self = Self(0);

    /// Lowest score a page with content can receive
    pub const FLOOR: u8 = 40;

    /// Highest score a page with content can receive
    pub const CEILING: u8 = 90;

    /// Characters of text per score point
    const CHARS_PER_POINT: usize = 50;

    /// Derive a score from the length of the extracted text
    #[must_use]
    pub fn from_text_len(len: usize) -> Self {
        if len == 0 {
            return Self::NONE;
        }
        let raw = len / Self::CHARS_PER_POINT;
        let clamped = raw.clamp(usize::from(Self::FLOOR), usize::from(Self::CEILING));
        // clamped is at most CEILING, which fits in u8
        Self(u8::try_from(clamped).unwrap_or(Self::CEILING))
    }

    /// Get the raw score
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl Default for CredibilityScore {
    fn default() -> Self {
        Self::NONE
    }
}

impl fmt::Display for CredibilityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
