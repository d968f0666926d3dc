//! Extracted page content

use serde::{Deserialize, Serialize};

/// Readable content extracted from a fetched web page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageContent {
    /// URL the content was fetched from
    pub url: String,

    /// Page title, or [`PageContent::UNTITLED`]
    pub title: String,

    /// Boilerplate-free text, whitespace collapsed
    pub text: String,
}

impl PageContent {
    /// Title used when a page has no `<title>`
    pub const UNTITLED: &'static str = "No title available";

    /// Create page content, substituting the placeholder for a missing title
    #[must_use]
    pub fn new(url: impl Into<String>, title: Option<String>, text: impl Into<String>) -> Self {
        let title = title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| Self::UNTITLED.to_string());

        Self {
            url: url.into(),
            title,
            text: text.into(),
        }
    }

    /// Whether the page had a real title
    #[must_use]
    pub fn has_title(&self) -> bool {
        self.title != Self::UNTITLED
    }

    /// Whether any text was extracted
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_title_uses_placeholder() {
        let page = PageContent::new("https://a.com", None, "text");
        assert_eq!(page.title, PageContent::UNTITLED);
        assert!(!page.has_title());
    }

    #[test]
    fn blank_title_uses_placeholder() {
        let page = PageContent::new("https://a.com", Some("   ".to_string()), "text");
        assert!(!page.has_title());
    }

    #[test]
    fn title_is_trimmed() {
        let page = PageContent::new("https://a.com", Some("  Hello \n".to_string()), "text");
        assert_eq!(page.title, "Hello");
        assert!(page.has_title());
    }

    #[test]
    fn empty_text_detected() {
        assert!(PageContent::new("https://a.com", None, "  ").is_empty());
        assert!(!PageContent::new("https://a.com", None, "x").is_empty());
    }
}
