//! Page renderer capability
//!
//! The crawl engine never talks to a rendering engine directly: it consumes
//! the [`PageRenderer`] trait, which loads a URL and exposes two decoupled
//! outcomes of one render pass — the text extracted for a set of tag
//! selectors, and the page's outbound links. The production implementation
//! fetches over HTTP and parses the DOM; tests substitute an in-memory
//! renderer.

mod http;

pub use http::{build_http_client, HttpRenderer};

use std::future::Future;
use thiserror::Error;

/// Result of rendering one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    /// Trimmed, non-empty texts of all elements matching any selector, in
    /// selector-match order, joined with blank lines. Empty when nothing
    /// matched.
    pub text: String,

    /// Absolute outbound anchor URLs in document order. Unfiltered: origin
    /// and fragment checks are the engine's responsibility.
    pub links: Vec<String>,
}

/// Errors from a single page render
///
/// All of these are per-URL failures; the engine isolates them and keeps
/// crawling.
#[derive(Debug, Clone, Error)]
pub enum RenderError {
    #[error("request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("invalid tag selector '{selector}'")]
    Selector { selector: String },
}

/// Capability to load a URL and extract text plus outbound links
pub trait PageRenderer {
    /// Renders one page
    ///
    /// # Arguments
    ///
    /// * `url` - The page to load
    /// * `selectors` - Tag selectors whose text content is extracted
    fn render(
        &self,
        url: &str,
        selectors: &[String],
    ) -> impl Future<Output = Result<RenderedPage, RenderError>> + Send;
}
