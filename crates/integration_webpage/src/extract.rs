//! Readable text extraction from HTML

use scraper::{ElementRef, Html, Selector};

/// Elements whose whole subtree is page chrome rather than content
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "nav", "footer", "aside", "header", "form"];

/// Title and text pulled out of an HTML document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedPage {
    /// Contents of `<title>`, if present and non-blank
    pub title: Option<String>,
    /// Visible text, whitespace-collapsed and truncated
    pub text: String,
}

/// Extract the title and readable text of an HTML document
///
/// Text inside `script`, `style`, `nav`, `footer`, `aside`, `header` and
/// `form` elements is dropped. The remaining text nodes are joined, runs of
/// whitespace become a single space and the result is cut to `max_chars`
/// characters.
#[must_use]
pub fn extract_content(html: &str, max_chars: usize) -> ExtractedPage {
    let document = Html::parse_document(html);

    let title = Selector::parse("title")
        .ok()
        .and_then(|selector| {
            document
                .select(&selector)
                .next()
                .map(|el| collapse_whitespace(&el.text().collect::<String>()))
        })
        .filter(|title| !title.is_empty());

    let mut parts = Vec::new();
    collect_text(document.root_element(), &mut parts);
    let text = truncate_chars(&collapse_whitespace(&parts.join("\n")), max_chars);

    ExtractedPage { title, text }
}

fn collect_text(element: ElementRef<'_>, parts: &mut Vec<String>) {
    if SKIPPED_ELEMENTS.contains(&element.value().name()) {
        return;
    }

    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            collect_text(child_element, parts);
        } else if let Some(text) = child.value().as_text() {
            let text = text.trim();
            if !text.is_empty() {
                parts.push(text.to_string());
            }
        }
    }
}

/// Replace every run of whitespace with a single space and trim
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Keep at most `max_chars` characters
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => text[..byte_index].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARTICLE: &str = r#"
        <!DOCTYPE html>
        <html>
        <head>
            <title>  Understanding
                Ownership </title>
            <style>body { color: red; }</style>
            <script>var tracking = true;</script>
        </head>
        <body>
            <header><h1>Site Banner</h1></header>
            <nav><a href="/">Home</a> <a href="/blog">Blog</a></nav>
            <main>
                <article>
                    <h2>Ownership</h2>
                    <p>Ownership is a set of rules that govern memory.</p>
                    <p>Each value has   exactly one
                       owner at a time.</p>
                </article>
                <aside>Related posts</aside>
                <form><input name="q"><label>Search this site</label></form>
            </main>
            <footer>Copyright 2024</footer>
        </body>
        </html>
    "#;

    #[test]
    fn test_extracts_title() {
        let page = extract_content(ARTICLE, 3000);
        assert_eq!(page.title.as_deref(), Some("Understanding Ownership"));
    }

    #[test]
    fn test_drops_boilerplate_elements() {
        let page = extract_content(ARTICLE, 3000);
        assert!(page.text.contains("Ownership is a set of rules that govern memory."));
        assert!(page.text.contains("Each value has exactly one owner at a time."));
        for chrome in [
            "Site Banner",
            "Home",
            "Related posts",
            "Search this site",
            "Copyright",
            "tracking",
            "color: red",
        ] {
            assert!(!page.text.contains(chrome), "found {chrome:?} in {:?}", page.text);
        }
    }

    #[test]
    fn test_text_is_collapsed() {
        let page = extract_content(ARTICLE, 3000);
        assert!(!page.text.contains('\n'));
        assert!(!page.text.contains("  "));
        assert_eq!(page.text, page.text.trim());
    }

    #[test]
    fn test_missing_or_blank_title() {
        assert_eq!(extract_content("<p>Hello there</p>", 100).title, None);
        assert_eq!(
            extract_content("<html><head><title>   </title></head></html>", 100).title,
            None
        );
    }

    #[test]
    fn test_truncates_to_max_chars() {
        let html = format!("<p>{}</p>", "ä".repeat(50));
        let page = extract_content(&html, 10);
        assert_eq!(page.text.chars().count(), 10);
    }

    #[test]
    fn test_empty_document() {
        let page = extract_content("", 100);
        assert_eq!(page.title, None);
        assert!(page.text.is_empty());
    }

    #[test]
    fn test_truncate_chars_is_boundary_safe() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("abc", 0), "");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a \n\t b  "), "a b");
        assert_eq!(collapse_whitespace(" \n "), "");
    }
}
