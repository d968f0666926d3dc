//! Infrastructure adapters
//!
//! Adapters connect application ports to the integration crates.

mod ollama_inference_adapter;
mod page_fetch_adapter;
mod websearch_adapter;

pub use ollama_inference_adapter::OllamaInferenceAdapter;
pub use page_fetch_adapter::PageFetchAdapter;
pub use websearch_adapter::WebSearchAdapter;
