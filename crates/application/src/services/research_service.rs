//! Research service - search, scrape, summarize
//!
//! Runs the research pipeline strictly in sequence: one search, then each
//! hit is fetched and summarized in order with a fixed pause between pages.
//! A page that cannot be fetched is logged and skipped.

use std::{fmt, sync::Arc, time::Duration, time::Instant};

use chrono::Utc;
use domain::{ResearchFinding, ResearchQuery, ResearchReport, SearchHit, dedupe_by_url};
use tracing::{debug, info, instrument, warn};

use crate::{
    error::ApplicationError,
    ports::{PageFetchPort, SearchPort, SummarizerPort},
};

/// Tuning knobs for a research run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResearchSettings {
    /// Maximum number of hits analyzed per query
    pub max_results: usize,
    /// Pause between two analyzed pages (zero disables it)
    pub delay_between_pages: Duration,
}

impl Default for ResearchSettings {
    fn default() -> Self {
        Self {
            max_results: 5,
            delay_between_pages: Duration::from_millis(500),
        }
    }
}

/// Orchestrates the research pipeline
pub struct ResearchService {
    search: Arc<dyn SearchPort>,
    pages: Arc<dyn PageFetchPort>,
    summarizer: Arc<dyn SummarizerPort>,
    settings: ResearchSettings,
}

impl fmt::Debug for ResearchService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResearchService")
            .field("provider", &self.search.provider_name())
            .field("summarizer", &self.summarizer.name())
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl ResearchService {
    /// Create a new research service
    pub fn new(
        search: Arc<dyn SearchPort>,
        pages: Arc<dyn PageFetchPort>,
        summarizer: Arc<dyn SummarizerPort>,
        settings: ResearchSettings,
    ) -> Self {
        Self {
            search,
            pages,
            summarizer,
            settings,
        }
    }

    /// Active settings
    pub const fn settings(&self) -> &ResearchSettings {
        &self.settings
    }

    /// Name of the search provider
    pub fn provider_name(&self) -> String {
        self.search.provider_name()
    }

    /// Name of the summarizer
    pub fn summarizer_name(&self) -> String {
        self.summarizer.name()
    }

    /// Search and return unique hits, at most `max_results`
    ///
    /// Search failures are logged and yield an empty list.
    #[instrument(skip(self, query), fields(query = %query))]
    pub async fn conduct_research(&self, query: &ResearchQuery) -> Vec<SearchHit> {
        let max_results = self.settings.max_results;

        let hits = match self.search.search(query.as_str(), max_results).await {
            Ok(hits) => hits,
            Err(e) => {
                warn!(error = %e, "Search failed");
                return Vec::new();
            },
        };

        let found = hits.len();
        let mut unique = dedupe_by_url(hits);
        unique.truncate(max_results);

        debug!(found, unique = unique.len(), "Search hits collected");
        unique
    }

    /// Run the full pipeline for a raw user query
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Domain`] if the query is empty or too
    /// long. Failures of individual pages never fail the run.
    #[instrument(skip(self, raw_query), fields(query_len = raw_query.len()))]
    pub async fn research(&self, raw_query: &str) -> Result<ResearchReport, ApplicationError> {
        let query = ResearchQuery::parse(raw_query)?;
        let start = Instant::now();

        info!(query = %query, "Research started");

        let hits = self.conduct_research(&query).await;
        let total = hits.len();
        let mut findings = Vec::with_capacity(total);
        let mut skipped = 0;

        for (index, hit) in hits.into_iter().enumerate() {
            let page = match self.pages.fetch(&hit.url).await {
                Ok(page) => page,
                Err(e) => {
                    warn!(url = %hit.url, error = %e, "Skipping result, page extraction failed");
                    skipped += 1;
                    continue;
                },
            };

            let summary = self.summarizer.summarize(&page, query.as_str()).await;
            findings.push(ResearchFinding::new(hit, page, summary));

            let is_last = index + 1 == total;
            if !is_last && !self.settings.delay_between_pages.is_zero() {
                tokio::time::sleep(self.settings.delay_between_pages).await;
            }
        }

        let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        info!(
            findings = findings.len(),
            skipped,
            elapsed_ms,
            "Research completed"
        );

        Ok(ResearchReport {
            query: query.as_str().to_string(),
            findings,
            provider: self.search.provider_name(),
            summarizer: self.summarizer.name(),
            skipped,
            generated_at: Utc::now(),
            elapsed_ms,
        })
    }

    /// Whether the search backend is reachable
    pub async fn is_healthy(&self) -> bool {
        self.search.is_available().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ports::{MockPageFetchPort, MockSearchPort, MockSummarizerPort},
        services::ExtractiveSummarizer,
    };
    use domain::{DomainError, PageContent, SearchSource, Summary};

    const PAGE_TEXT: &str = "Async Rust lets a single thread juggle many tasks. \
        Futures are lazy and do nothing until polled. \
        An executor drives futures to completion.";

    fn hit(url: &str, position: u32) -> SearchHit {
        SearchHit::new(
            format!("Hit {position}"),
            url.to_string(),
            String::new(),
            SearchSource::DuckDuckGo,
            position,
        )
    }

    fn no_delay(max_results: usize) -> ResearchSettings {
        ResearchSettings {
            max_results,
            delay_between_pages: Duration::ZERO,
        }
    }

    fn search_returning(hits: Vec<SearchHit>) -> MockSearchPort {
        let mut search = MockSearchPort::new();
        search
            .expect_search()
            .returning(move |_, _| Ok(hits.clone()));
        search
            .expect_provider_name()
            .return_const("duckduckgo".to_string());
        search
    }

    fn pages_ok() -> MockPageFetchPort {
        let mut pages = MockPageFetchPort::new();
        pages.expect_fetch().returning(|url| {
            Ok(PageContent::new(
                url,
                Some(format!("Title of {url}")),
                PAGE_TEXT,
            ))
        });
        pages
    }

    fn service(
        search: MockSearchPort,
        pages: MockPageFetchPort,
        settings: ResearchSettings,
    ) -> ResearchService {
        ResearchService::new(
            Arc::new(search),
            Arc::new(pages),
            Arc::new(ExtractiveSummarizer::default()),
            settings,
        )
    }

    #[test]
    fn default_settings() {
        let settings = ResearchSettings::default();
        assert_eq!(settings.max_results, 5);
        assert_eq!(settings.delay_between_pages, Duration::from_millis(500));
    }

    #[tokio::test]
    async fn conduct_research_dedupes_and_truncates() {
        let search = search_returning(vec![
            hit("https://a.example", 1),
            hit("https://b.example", 2),
            hit("https://a.example", 3),
            hit("https://c.example", 4),
            hit("https://d.example", 5),
        ]);
        let service = service(search, MockPageFetchPort::new(), no_delay(3));

        let query = ResearchQuery::parse("rust").unwrap();
        let hits = service.conduct_research(&query).await;

        let urls: Vec<_> = hits.iter().map(|h| h.url.as_str()).collect();
        assert_eq!(urls, ["https://a.example", "https://b.example", "https://c.example"]);
        assert_eq!(hits[2].position, 3);
    }

    #[tokio::test]
    async fn conduct_research_swallows_search_errors() {
        let mut search = MockSearchPort::new();
        search
            .expect_search()
            .returning(|_, _| Err(ApplicationError::ExternalService("down".to_string())));
        let service = service(search, MockPageFetchPort::new(), no_delay(5));

        let query = ResearchQuery::parse("rust").unwrap();
        assert!(service.conduct_research(&query).await.is_empty());
    }

    #[tokio::test]
    async fn research_passes_trimmed_query_and_limit() {
        let mut search = MockSearchPort::new();
        search
            .expect_search()
            .withf(|query, max| query == "async rust" && *max == 4)
            .times(1)
            .returning(|_, _| Ok(Vec::new()));
        search
            .expect_provider_name()
            .return_const("duckduckgo".to_string());
        let service = service(search, MockPageFetchPort::new(), no_delay(4));

        let report = service.research("  async rust  ").await.unwrap();
        assert_eq!(report.query, "async rust");
        assert!(!report.has_findings());
    }

    #[tokio::test]
    async fn research_builds_findings_in_order() {
        let search = search_returning(vec![hit("https://a.example", 1), hit("https://www.b.example/x", 2)]);
        let service = service(search, pages_ok(), no_delay(5));

        let report = service.research("async rust").await.unwrap();

        assert_eq!(report.findings.len(), 2);
        assert_eq!(report.skipped, 0);
        assert_eq!(report.provider, "duckduckgo");
        assert_eq!(report.summarizer, "extractive:leading");

        let second = &report.findings[1];
        assert_eq!(second.url, "https://www.b.example/x");
        assert_eq!(second.title, "Title of https://www.b.example/x");
        assert_eq!(second.display_url, "b.example");
        assert_eq!(second.key_points.len(), 3);
        assert!(second.credibility_score.value() >= 40);
    }

    #[tokio::test]
    async fn research_skips_failed_pages() {
        let search = search_returning(vec![
            hit("https://ok.example", 1),
            hit("https://broken.example", 2),
            hit("https://ok2.example", 3),
        ]);
        let mut pages = MockPageFetchPort::new();
        pages.expect_fetch().returning(|url| {
            if url.contains("broken") {
                Err(ApplicationError::ExternalService("HTTP status 500".to_string()))
            } else {
                Ok(PageContent::new(url, None, PAGE_TEXT))
            }
        });
        let service = service(search, pages, no_delay(5));

        let report = service.research("rust").await.unwrap();

        assert_eq!(report.findings.len(), 2);
        assert_eq!(report.skipped, 1);
        assert!(report.findings.iter().all(|f| !f.url.contains("broken")));
        // page had no title, so the search engine's title is used
        assert_eq!(report.findings[0].title, "Hit 1");
    }

    #[tokio::test]
    async fn research_keeps_empty_pages_with_empty_summary() {
        let search = search_returning(vec![hit("https://blank.example", 1)]);
        let mut pages = MockPageFetchPort::new();
        pages
            .expect_fetch()
            .returning(|url| Ok(PageContent::new(url, None, "")));
        let service = service(search, pages, no_delay(5));

        let report = service.research("rust").await.unwrap();
        assert_eq!(report.findings[0].summary, Summary::NO_CONTENT);
        assert_eq!(report.findings[0].credibility_score.value(), 0);
    }

    #[tokio::test]
    async fn research_rejects_empty_query() {
        let service = service(MockSearchPort::new(), MockPageFetchPort::new(), no_delay(5));

        let err = service.research("   ").await.unwrap_err();
        assert!(matches!(err, ApplicationError::Domain(DomainError::EmptyQuery)));
    }

    #[tokio::test]
    async fn research_rejects_overlong_query() {
        let service = service(MockSearchPort::new(), MockPageFetchPort::new(), no_delay(5));

        let err = service.research(&"q".repeat(501)).await.unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::QueryTooLong { max: 500, actual: 501 })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn research_waits_between_pages_only() {
        let search = search_returning(vec![
            hit("https://a.example", 1),
            hit("https://b.example", 2),
            hit("https://c.example", 3),
        ]);
        let settings = ResearchSettings {
            max_results: 5,
            delay_between_pages: Duration::from_millis(500),
        };
        let service = service(search, pages_ok(), settings);

        let before = tokio::time::Instant::now();
        let report = service.research("rust").await.unwrap();

        assert_eq!(report.findings.len(), 3);
        // two pauses for three pages
        let waited = before.elapsed();
        assert!(waited >= Duration::from_millis(1000));
        assert!(waited < Duration::from_millis(1500));
    }

    #[tokio::test]
    async fn uses_custom_summarizer() {
        let search = search_returning(vec![hit("https://a.example", 1)]);
        let mut summarizer = MockSummarizerPort::new();
        summarizer
            .expect_summarize()
            .withf(|page, query| page.url == "https://a.example" && query == "rust")
            .returning(|_, _| Summary {
                summary: "custom".to_string(),
                key_points: vec![],
                credibility_score: domain::CredibilityScore::from_text_len(5000),
            });
        summarizer.expect_name().return_const("mock".to_string());

        let service = ResearchService::new(
            Arc::new(search),
            Arc::new(pages_ok()),
            Arc::new(summarizer),
            no_delay(5),
        );

        let report = service.research("rust").await.unwrap();
        assert_eq!(report.findings[0].summary, "custom");
        assert_eq!(report.summarizer, "mock");
    }

    #[tokio::test]
    async fn health_reflects_search_availability() {
        let mut search = MockSearchPort::new();
        search.expect_is_available().returning(|| false);
        let service = service(search, MockPageFetchPort::new(), no_delay(5));

        assert!(!service.is_healthy().await);
    }
}
