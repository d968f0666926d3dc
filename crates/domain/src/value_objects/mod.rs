//! Value Objects - Immutable, identity-less domain primitives

mod credibility_score;
mod research_query;
mod search_source;

pub use credibility_score::CredibilityScore;
pub use research_query::ResearchQuery;
pub use search_source::SearchSource;
