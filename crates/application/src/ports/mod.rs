//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod inference_port;
mod page_fetch_port;
mod search_port;
mod summarizer_port;

#[cfg(test)]
pub use inference_port::MockInferencePort;
pub use inference_port::{InferencePort, Completion};
#[cfg(test)]
pub use page_fetch_port::MockPageFetchPort;
pub use page_fetch_port::PageFetchPort;
#[cfg(test)]
pub use search_port::MockSearchPort;
pub use search_port::SearchPort;
#[cfg(test)]
pub use summarizer_port::MockSummarizerPort;
pub use summarizer_port::SummarizerPort;
