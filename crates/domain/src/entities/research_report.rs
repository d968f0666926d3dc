//! Research findings and reports

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{CredibilityScore, PageContent, SearchHit, SearchSource, Summary};

/// One analyzed search result
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResearchFinding {
    pub url: String,
    pub title: String,
    pub source: SearchSource,
    pub summary: String,
    pub key_points: Vec<String>,
    pub credibility_score: CredibilityScore,
    pub display_url: String,
}

impl ResearchFinding {
    /// Combine a hit, its fetched page and the page summary
    ///
    /// The page title wins; the search engine's title is used when the page
    /// had none.
    #[must_use]
    pub fn new(hit: SearchHit, page: PageContent, summary: Summary) -> Self {
        let title = if page.has_title() || hit.title.trim().is_empty() {
            page.title
        } else {
            hit.title
        };

        Self {
            url: hit.url,
            title,
            source: hit.source,
            summary: summary.summary,
            key_points: summary.key_points,
            credibility_score: summary.credibility_score,
            display_url: hit.display_url,
        }
    }
}

/// Outcome of a full research run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchReport {
    /// The query as researched
    pub query: String,

    /// Analyzed results, in search order
    pub findings: Vec<ResearchFinding>,

    /// Search provider that served the query
    pub provider: String,

    /// Summarizer used for the findings
    pub summarizer: String,

    /// Number of hits skipped because their page could not be extracted
    pub skipped: usize,

    /// When the report was produced
    pub generated_at: DateTime<Utc>,

    /// Wall-clock time of the run in milliseconds
    pub elapsed_ms: u64,
}

impl ResearchReport {
    /// Check if the report has any findings
    #[must_use]
    pub fn has_findings(&self) -> bool {
        !self.findings.is_empty()
    }

    /// Average credibility over all findings, if any
    #[must_use]
    pub fn average_credibility(&self) -> Option<u8> {
        if self.findings.is_empty() {
            return None;
        }
        let total: usize = self
            .findings
            .iter()
            .map(|f| usize::from(f.credibility_score.value()))
            .sum();
        u8::try_from(total / self.findings.len()).ok()
    }
}
