//! Crawl engine - traversal orchestration
//!
//! This module contains the main crawl loop that walks a site from a seed
//! URL, including:
//! - Explicit frontier management with depth accounting
//! - Visited-URL deduplication (marked before rendering)
//! - Blacklist and origin filtering of discovered links
//! - Per-page rendering, metadata derivation, and record emission
//! - Failure isolation: one page's render error never aborts the crawl

use crate::crawler::filter::{origin_of, should_visit, within_origin};
use crate::crawler::metadata::derive_metadata;
use crate::renderer::PageRenderer;
use crate::sink::RecordSink;
use crate::{HarvestError, Result};
use std::collections::HashSet;
use url::Url;

/// Text content extracted from one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRecord {
    /// The page URL
    pub url: String,

    /// Trimmed, non-empty element texts in selector-match order, joined
    /// with blank lines
    pub text: String,
}

/// Parameters for one crawl run
#[derive(Debug, Clone)]
pub struct CrawlParams {
    /// The URL the crawl starts from; also defines the origin for scope
    pub seed_url: String,

    /// Maximum traversal depth; the seed is at depth 1
    pub max_depth: u32,

    /// URL prefixes that must never be visited
    pub blacklist: Vec<String>,

    /// Tag selectors whose text content is extracted from each page
    pub tags: Vec<String>,
}

/// Counters describing a completed crawl
#[derive(Debug, Clone, Default)]
pub struct CrawlStats {
    /// Pages rendered successfully
    pub pages_rendered: u64,

    /// Pages that produced a (content, metadata) record pair
    pub pages_emitted: u64,

    /// Pages rendered successfully but with no matching text
    pub pages_empty: u64,

    /// Pages whose render failed (timeout, network, extraction)
    pub pages_failed: u64,

    /// In-scope links discovered across all pages, before dedup
    pub links_discovered: u64,
}

/// The crawl engine
///
/// Owns a [`PageRenderer`] and walks the link graph depth-first: each
/// discovered link's entire subtree is processed before the next sibling
/// link, in the order the renderer returned them. The traversal state (the
/// visited set and the frontier) is owned by a single run and discarded
/// when it completes.
pub struct CrawlEngine<R> {
    renderer: R,
}

impl<R: PageRenderer> CrawlEngine<R> {
    /// Creates an engine around the given renderer
    pub fn new(renderer: R) -> Self {
        Self { renderer }
    }

    /// Runs a crawl and emits every record pair to the sink
    ///
    /// Per URL the lifecycle is: admission checks (depth, visited,
    /// blacklist), mark visited, render, emit if non-empty, expand links.
    /// Marking happens before the render so a URL rediscovered while its
    /// own render is outstanding or has already failed is never retried.
    ///
    /// A render failure is logged and skips only that URL. A sink failure
    /// is fatal: the deliverable cannot be produced, so it propagates.
    ///
    /// # Arguments
    ///
    /// * `params` - Seed URL, depth bound, blacklist, and tag selectors
    /// * `sink` - Receives one (content, metadata) pair per emitted page
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlStats)` - Crawl completed (possibly with per-page failures)
    /// * `Err(HarvestError)` - Invalid seed or persistence failure
    pub async fn run<S: RecordSink>(&self, params: &CrawlParams, sink: &mut S) -> Result<CrawlStats> {
        let seed = Url::parse(&params.seed_url).map_err(|e| HarvestError::InvalidSeed {
            url: params.seed_url.clone(),
            message: e.to_string(),
        })?;
        if seed.scheme() != "http" && seed.scheme() != "https" {
            return Err(HarvestError::InvalidSeed {
                url: params.seed_url.clone(),
                message: format!("unsupported scheme '{}'", seed.scheme()),
            });
        }

        let origin = origin_of(&seed);
        tracing::info!(
            "Starting crawl of {} (origin {}, max depth {})",
            params.seed_url,
            origin,
            params.max_depth
        );

        let mut stats = CrawlStats::default();
        let mut visited: HashSet<String> = HashSet::new();

        // Explicit frontier stack instead of recursion: children are pushed
        // in reverse so they pop in renderer order, giving the same
        // depth-first preorder a recursive walk would.
        let mut frontier: Vec<(String, u32)> = vec![(params.seed_url.clone(), 1)];

        let start_time = std::time::Instant::now();

        while let Some((url, depth)) = frontier.pop() {
            if depth > params.max_depth {
                continue;
            }
            if !should_visit(&url, &visited, &params.blacklist) {
                continue;
            }

            // Mark before rendering so an in-flight or failed URL is never
            // dispatched twice.
            visited.insert(url.clone());
            tracing::debug!("Crawling {} (depth {})", url, depth);

            let page = match self.renderer.render(&url, &params.tags).await {
                Ok(page) => page,
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", url, e);
                    stats.pages_failed += 1;
                    continue;
                }
            };
            stats.pages_rendered += 1;

            if page.text.is_empty() {
                tracing::warn!("No content found for {}", url);
                stats.pages_empty += 1;
            } else {
                let content = ContentRecord {
                    url: url.clone(),
                    text: page.text,
                };
                let metadata = derive_metadata(&url);
                sink.persist(&content, &metadata)?;
                stats.pages_emitted += 1;
            }

            // Cross-origin and fragment links never enter the frontier
            let in_scope: Vec<&String> = page
                .links
                .iter()
                .filter(|link| within_origin(link, &origin) && !link.contains('#'))
                .collect();
            stats.links_discovered += in_scope.len() as u64;

            for link in in_scope.into_iter().rev() {
                if !visited.contains(link.as_str()) {
                    frontier.push((link.clone(), depth + 1));
                }
            }

            if stats.pages_rendered % 10 == 0 {
                let rate = stats.pages_rendered as f64 / start_time.elapsed().as_secs_f64();
                tracing::info!(
                    "Progress: {} pages rendered, {} in frontier, {:.2} pages/sec",
                    stats.pages_rendered,
                    frontier.len(),
                    rate
                );
            }
        }

        tracing::info!(
            "Crawl completed: {} pages rendered, {} records emitted, {} failed in {:?}",
            stats.pages_rendered,
            stats.pages_emitted,
            stats.pages_failed,
            start_time.elapsed()
        );

        Ok(stats)
    }
}
