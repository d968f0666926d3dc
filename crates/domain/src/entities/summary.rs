//! Page summary

use serde::{Deserialize, Serialize};

use crate::CredibilityScore;

/// Summary of a single page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Summary {
    /// Short prose summary
    pub summary: String,

    /// Notable sentences from the page
    pub key_points: Vec<String>,

    /// Heuristic credibility score
    pub credibility_score: CredibilityScore,
}

impl Summary {
    /// Text shown for pages without content
    pub const NO_CONTENT: &'static str = "No content available";

    /// Summary for a page without any text
    #[must_use]
    pub fn empty() -> Self {
        Self {
            summary: Self::NO_CONTENT.to_string(),
            key_points: Vec::new(),
            credibility_score: CredibilityScore::NONE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_summary_has_no_points_and_zero_score() {
        let summary = Summary::empty();
        assert_eq!(summary.summary, "No content available");
        assert!(summary.key_points.is_empty());
        assert_eq!(summary.credibility_score.value(), 0);
    }
}
