//! Crawler module for site traversal and record emission
//!
//! This module contains the core crawling logic, including:
//! - The crawl engine with its explicit frontier and visited set
//! - Link admission filtering (origin, blacklist, fragments, dedup)
//! - Positional path-segment metadata derivation
//! - Per-page record emission to a sink

mod engine;
mod filter;
mod metadata;

pub use engine::{ContentRecord, CrawlEngine, CrawlParams, CrawlStats};
pub use filter::{is_blacklisted, origin_of, should_visit, within_origin};
pub use metadata::{derive_metadata, strip_scheme, MetadataAttributes, MetadataRecord};

use crate::renderer::PageRenderer;
use crate::sink::RecordSink;
use crate::Result;

/// Runs a complete crawl operation
///
/// This is the main entry point for a one-shot crawl. It will:
/// 1. Validate the seed URL and derive the crawl origin
/// 2. Walk the site depth-first within the origin and depth bound
/// 3. Render each admitted page and extract the requested tag text
/// 4. Emit one (content, metadata) record pair per non-empty page
///
/// # Arguments
///
/// * `renderer` - The page renderer to load URLs with
/// * `params` - Seed URL, depth bound, blacklist, and tag selectors
/// * `sink` - Destination for emitted record pairs
///
/// # Returns
///
/// * `Ok(CrawlStats)` - Crawl completed; counters describe what happened
/// * `Err(HarvestError)` - Seed was invalid or the sink failed
pub async fn crawl<R, S>(renderer: R, params: &CrawlParams, sink: &mut S) -> Result<CrawlStats>
where
    R: PageRenderer,
    S: RecordSink,
{
    CrawlEngine::new(renderer).run(params, sink).await
}
