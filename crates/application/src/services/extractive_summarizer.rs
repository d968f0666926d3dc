//! Extractive summarizer - picks sentences straight from the page text

use async_trait::async_trait;
use domain::{CredibilityScore, PageContent, Summary};
use serde::{Deserialize, Serialize};

use crate::ports::SummarizerPort;

/// Sentences this short are usually headings, captions or menu items
const MIN_SENTENCE_CHARS: usize = 20;

/// Sentences taken into the summary
const SUMMARY_SENTENCES: usize = 3;

/// Characters used when no sentence qualifies
const FALLBACK_CHARS: usize = 300;

/// How sentences are selected from the candidate list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentenceStrategy {
    /// The first three sentences
    #[default]
    Leading,
    /// First, middle and last sentence
    Spread,
}

impl SentenceStrategy {
    /// Lower-case identifier
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Leading => "leading",
            Self::Spread => "spread",
        }
    }
}

/// Summarizer that quotes sentences from the page
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractiveSummarizer {
    strategy: SentenceStrategy,
}

impl ExtractiveSummarizer {
    /// Create a summarizer using the given strategy
    pub const fn new(strategy: SentenceStrategy) -> Self {
        Self { strategy }
    }

    /// Active strategy
    pub const fn strategy(&self) -> SentenceStrategy {
        self.strategy
    }

    /// Summarize raw text
    pub fn summarize_text(&self, text: &str) -> Summary {
        if text.trim().is_empty() {
            return Summary::empty();
        }

        let candidates = candidate_sentences(text);
        let credibility_score = CredibilityScore::from_text_len(text.chars().count());

        if candidates.is_empty() {
            return Summary {
                summary: text.chars().take(FALLBACK_CHARS).collect(),
                key_points: Vec::new(),
                credibility_score,
            };
        }

        let key_points = match self.strategy {
            SentenceStrategy::Leading => {
                candidates.into_iter().take(SUMMARY_SENTENCES).collect()
            },
            SentenceStrategy::Spread => spread(candidates),
        };

        Summary {
            summary: key_points.join(" "),
            key_points,
            credibility_score,
        }
    }
}

/// Split on runs of `.`, `!` and `?` and keep the substantial pieces
fn candidate_sentences(text: &str) -> Vec<String> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|sentence| sentence.chars().count() > MIN_SENTENCE_CHARS)
        .map(ToString::to_string)
        .collect()
}

fn spread(mut candidates: Vec<String>) -> Vec<String> {
    let last = candidates.len() - 1;
    let mut indices = vec![0, last / 2, last];
    indices.dedup();

    let mut picked = Vec::with_capacity(indices.len());
    for index in indices.into_iter().rev() {
        picked.push(candidates.swap_remove(index));
    }
    picked.reverse();
    picked
}

#[async_trait]
impl SummarizerPort for ExtractiveSummarizer {
    async fn summarize(&self, page: &PageContent, _query: &str) -> Summary {
        self.summarize_text(&page.text)
    }

    fn name(&self) -> String {
        format!("extractive:{}", self.strategy.as_str())
    }
}
