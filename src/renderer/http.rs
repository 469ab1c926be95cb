//! HTTP renderer implementation
//!
//! Fetches a page over HTTP and extracts tag text and outbound links from
//! the response body in a single pass. Extraction happens synchronously on
//! the fetched body, so no parsed DOM is ever held across an await point.

use crate::config::RendererConfig;
use crate::renderer::{PageRenderer, RenderError, RenderedPage};
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use url::Url;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The renderer configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &RendererConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Renderer that fetches pages with reqwest and parses them with scraper
pub struct HttpRenderer {
    client: Client,
}

impl HttpRenderer {
    /// Creates a renderer from the given configuration
    pub fn new(config: &RendererConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }

    /// Creates a renderer around an existing HTTP client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl PageRenderer for HttpRenderer {
    async fn render(&self, url: &str, selectors: &[String]) -> Result<RenderedPage, RenderError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RenderError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        // Relative links resolve against the final URL after redirects
        let final_url = response.url().clone();
        let body = response
            .text()
            .await
            .map_err(|e| classify_error(url, e))?;

        extract_page(&body, &final_url, selectors)
    }
}

/// Maps a reqwest error to a render error
fn classify_error(url: &str, error: reqwest::Error) -> RenderError {
    if error.is_timeout() {
        RenderError::Timeout {
            url: url.to_string(),
        }
    } else {
        RenderError::Network {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}

/// Extracts tag text and outbound links from an HTML body
///
/// Text is gathered per selector in the order the selectors were given,
/// elements in document order within each selector, trimmed, with empty
/// matches dropped, and joined with blank lines.
fn extract_page(
    html: &str,
    base_url: &Url,
    selectors: &[String],
) -> Result<RenderedPage, RenderError> {
    let document = Html::parse_document(html);

    let mut blocks: Vec<String> = Vec::new();
    for raw in selectors {
        let selector = Selector::parse(raw).map_err(|_| RenderError::Selector {
            selector: raw.clone(),
        })?;
        for element in document.select(&selector) {
            let text = element.text().collect::<String>();
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                blocks.push(trimmed.to_string());
            }
        }
    }

    let links = extract_links(&document, base_url);

    Ok(RenderedPage {
        text: blocks.join("\n\n"),
        links,
    })
}

/// Extracts all anchor links from the document as absolute URLs
fn extract_links(document: &Html, base_url: &Url) -> Vec<String> {
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(absolute_url) = resolve_link(href, base_url) {
                    links.push(absolute_url);
                }
            }
        }
    }

    links
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) => {
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                Some(absolute_url.to_string())
            } else {
                None
            }
        }
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://example.com/page").unwrap()
    }

    fn selectors(tags: &[&str]) -> Vec<String> {
        tags.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_extract_two_paragraphs() {
        let html = r#"<html><body><p>A</p><p>B</p></body></html>"#;
        let page = extract_page(html, &base_url(), &selectors(&["p"])).unwrap();
        assert_eq!(page.text, "A\n\nB");
    }

    #[test]
    fn test_extract_trims_and_drops_empty() {
        let html = r#"<html><body><p>  A  </p><p>   </p><p>B</p></body></html>"#;
        let page = extract_page(html, &base_url(), &selectors(&["p"])).unwrap();
        assert_eq!(page.text, "A\n\nB");
    }

    #[test]
    fn test_extract_groups_by_selector_order() {
        // All h1 matches come before any p match, regardless of document order
        let html = r#"<html><body><p>para</p><h1>title</h1></body></html>"#;
        let page = extract_page(html, &base_url(), &selectors(&["h1", "p"])).unwrap();
        assert_eq!(page.text, "title\n\npara");
    }

    #[test]
    fn test_extract_nested_element_text() {
        let html = r#"<html><body><p>Hello <b>bold</b> world</p></body></html>"#;
        let page = extract_page(html, &base_url(), &selectors(&["p"])).unwrap();
        assert_eq!(page.text, "Hello bold world");
    }

    #[test]
    fn test_no_matches_yields_empty_text() {
        let html = r#"<html><body><div>text</div></body></html>"#;
        let page = extract_page(html, &base_url(), &selectors(&["p"])).unwrap();
        assert_eq!(page.text, "");
    }

    #[test]
    fn test_invalid_selector() {
        let html = r#"<html><body></body></html>"#;
        let result = extract_page(html, &base_url(), &selectors(&["p["]));
        assert!(matches!(result, Err(RenderError::Selector { .. })));
    }

    #[test]
    fn test_extract_absolute_link() {
        let html = r#"<html><body><a href="https://other.com/page">Link</a></body></html>"#;
        let page = extract_page(html, &base_url(), &selectors(&["p"])).unwrap();
        assert_eq!(page.links, vec!["https://other.com/page"]);
    }

    #[test]
    fn test_extract_relative_link() {
        let html = r#"<html><body><a href="/other">Link</a></body></html>"#;
        let page = extract_page(html, &base_url(), &selectors(&["p"])).unwrap();
        assert_eq!(page.links, vec!["https://example.com/other"]);
    }

    #[test]
    fn test_skip_special_scheme_links() {
        let html = r#"
            <html><body>
                <a href="javascript:void(0)">js</a>
                <a href="mailto:test@example.com">mail</a>
                <a href="tel:+1234567890">tel</a>
                <a href="data:text/html,x">data</a>
                <a href="/valid">ok</a>
            </body></html>
        "#;
        let page = extract_page(html, &base_url(), &selectors(&["p"])).unwrap();
        assert_eq!(page.links, vec!["https://example.com/valid"]);
    }

    #[test]
    fn test_links_preserve_document_order() {
        let html = r#"
            <html><body>
                <a href="/first">1</a>
                <a href="/second">2</a>
                <a href="/third">3</a>
            </body></html>
        "#;
        let page = extract_page(html, &base_url(), &selectors(&["p"])).unwrap();
        assert_eq!(
            page.links,
            vec![
                "https://example.com/first",
                "https://example.com/second",
                "https://example.com/third"
            ]
        );
    }

    #[test]
    fn test_fragment_link_is_kept_for_engine_to_filter() {
        // The renderer reports links as-is; fragment filtering is an
        // admission decision, not an extraction one
        let html = r##"<html><body><a href="/page#top">anchor</a></body></html>"##;
        let page = extract_page(html, &base_url(), &selectors(&["p"])).unwrap();
        assert_eq!(page.links, vec!["https://example.com/page#top"]);
    }

    #[test]
    fn test_build_http_client() {
        let config = RendererConfig::default();
        let client = build_http_client(&config);
        assert!(client.is_ok());
    }
}
