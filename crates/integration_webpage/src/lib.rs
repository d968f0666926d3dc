#![forbid(unsafe_code)]
//! Web page integration for the research agent
//!
//! [`PageFetcher`] downloads a result page and [`extract_content`] turns the
//! HTML into a title plus plain text with navigation, scripts and other page
//! chrome removed.

mod config;
mod error;
mod extract;
mod fetcher;

pub use config::PageFetchConfig;
pub use error::PageFetchError;
pub use extract::{ExtractedPage, collapse_whitespace, extract_content, truncate_chars};
pub use fetcher::{FetchedPage, PageFetcher};
