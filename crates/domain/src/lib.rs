//! Domain layer for the research agent
//!
//! Contains the core vocabulary of a research run: search hits, extracted
//! page content, summaries, findings and the final report.
//! This layer has no I/O and no knowledge of search engines or HTTP.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
