//! Integration tests for the page fetcher using WireMock

use integration_webpage::{PageFetchConfig, PageFetchError, PageFetcher};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

const ARTICLE_HTML: &str = r#"<!DOCTYPE html>
<html>
<head><title>Borrowing in Rust</title><script>track()</script></head>
<body>
  <nav>Home | Docs | Blog</nav>
  <article>
    <h1>References and Borrowing</h1>
    <p>A reference is like a pointer in that it is an address we can follow.</p>
    <p>Unlike a pointer, a reference is guaranteed to point to a valid value.</p>
  </article>
  <footer>All rights reserved</footer>
</body>
</html>"#;

fn fetcher(config: PageFetchConfig) -> PageFetcher {
    PageFetcher::new(config).unwrap()
}

#[tokio::test]
async fn test_fetch_html_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/article"))
        .and(header("user-agent", "Mozilla/5.0"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(ARTICLE_HTML, "text/html; charset=utf-8"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let page = fetcher(PageFetchConfig::default())
        .fetch(&format!("{}/article", server.uri()))
        .await
        .unwrap();

    assert_eq!(page.title.as_deref(), Some("Borrowing in Rust"));
    assert!(page.text.contains("guaranteed to point to a valid value"));
    assert!(!page.text.contains("Home | Docs"));
    assert!(!page.text.contains("All rights reserved"));
    assert!(!page.text.contains("track()"));
    assert!(page.url.ends_with("/article"));
}

#[tokio::test]
async fn test_fetch_respects_max_chars() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(ARTICLE_HTML, "text/html"),
        )
        .mount(&server)
        .await;

    let config = PageFetchConfig {
        max_chars: 40,
        ..Default::default()
    };
    let page = fetcher(config).fetch(&server.uri()).await.unwrap();
    assert_eq!(page.text.chars().count(), 40);
}

#[tokio::test]
async fn test_fetch_plain_text() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/notes.txt"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("line one\n\n   line <b>two</b>\n", "text/plain"),
        )
        .mount(&server)
        .await;

    let page = fetcher(PageFetchConfig::default())
        .fetch(&format!("{}/notes.txt", server.uri()))
        .await
        .unwrap();

    assert_eq!(page.title, None);
    assert_eq!(page.text, "line one line <b>two</b>");
}

#[tokio::test]
async fn test_fetch_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = fetcher(PageFetchConfig::default())
        .fetch(&server.uri())
        .await
        .unwrap_err();

    assert!(matches!(err, PageFetchError::HttpStatus { status: 404 }));
}

#[tokio::test]
async fn test_fetch_rejects_binary_content() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(b"%PDF-1.7".to_vec(), "application/pdf"),
        )
        .mount(&server)
        .await;

    let err = fetcher(PageFetchConfig::default())
        .fetch(&server.uri())
        .await
        .unwrap_err();

    assert!(matches!(err, PageFetchError::UnsupportedContentType(ref t) if t == "application/pdf"));
}

#[tokio::test]
async fn test_fetch_rejects_oversized_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("x".repeat(2048), "text/html"),
        )
        .mount(&server)
        .await;

    let config = PageFetchConfig {
        max_body_bytes: 1024,
        ..Default::default()
    };
    let err = fetcher(config).fetch(&server.uri()).await.unwrap_err();

    assert!(matches!(err, PageFetchError::BodyTooLarge { limit: 1024 }));
}

#[tokio::test]
async fn test_fetch_connection_refused() {
    let err = fetcher(PageFetchConfig::default())
        .fetch("http://127.0.0.1:1/")
        .await
        .unwrap_err();

    assert!(err.is_retryable() || matches!(err, PageFetchError::RequestFailed(_)));
}
