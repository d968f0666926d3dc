//! Domain entities

mod page_content;
mod research_report;
mod search_hit;
mod summary;

pub use page_content::PageContent;
pub use research_report::{ResearchFinding, ResearchReport};
pub use search_hit::{SearchHit, dedupe_by_url, display_url_for};
pub use summary::Summary;
