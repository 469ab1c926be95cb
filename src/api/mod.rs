//! HTTP trigger API
//!
//! Exposes the crawl as a small axum service:
//! - `POST /api/crawl` validates the request, runs a full crawl
//!   synchronously, packages the archive, and reports the outcome
//! - `GET /downloads/{name}` serves the packaged archive
//! - `GET /healthz` liveness probe
//!
//! Crawl runs share one output directory, so they are serialized behind a
//! mutex: a second request waits until the running crawl finishes.

use crate::config::Config;
use crate::crawler::{crawl, CrawlParams};
use crate::renderer::HttpRenderer;
use crate::sink::FsRecordSink;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

/// Shared state for all request handlers
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    crawl_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            crawl_lock: Arc::new(Mutex::new(())),
        }
    }
}

/// Body of a `POST /api/crawl` request
#[derive(Debug, Deserialize)]
pub struct CrawlRequest {
    /// Seed URL to crawl from
    pub url: Option<String>,

    /// Maximum traversal depth; must be a positive integer
    #[serde(rename = "maxDepth")]
    pub max_depth: Option<i64>,

    /// URL prefixes to exclude from the crawl
    #[serde(default)]
    pub blacklist: Vec<String>,

    /// Tag selectors whose text content is extracted
    pub tags: Option<Vec<String>>,
}

/// Body of a successful `POST /api/crawl` response
#[derive(Debug, Serialize)]
pub struct CrawlResponse {
    pub message: String,

    #[serde(rename = "downloadUrl")]
    pub download_url: String,

    #[serde(rename = "pagesArchived")]
    pub pages_archived: u64,

    #[serde(rename = "durationMs")]
    pub duration_ms: u64,

    #[serde(rename = "startedAt")]
    pub started_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

fn bad_request(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
        .into_response()
}

fn internal_error(message: impl Into<String>) -> Response {
    let message = message.into();
    tracing::error!("{}", message);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody { error: message }),
    )
        .into_response()
}

/// Validates a crawl request and converts it into crawl parameters
///
/// Checks run in a fixed order so the first problem is the one reported:
/// url presence, depth positivity, then tag presence.
fn validate_request(request: &CrawlRequest) -> Result<CrawlParams, String> {
    let seed_url = match &request.url {
        Some(url) if !url.trim().is_empty() => url.trim().to_string(),
        _ => return Err("url is required".to_string()),
    };

    let max_depth = match request.max_depth {
        Some(depth) if depth > 0 => depth as u32,
        _ => return Err("maxDepth must be a positive integer".to_string()),
    };

    let tags = match &request.tags {
        Some(tags) if !tags.is_empty() => tags.clone(),
        _ => return Err("tags must be a non-empty array".to_string()),
    };

    Ok(CrawlParams {
        seed_url,
        max_depth,
        blacklist: request.blacklist.clone(),
        tags,
    })
}

/// Rejects download names that could escape the output directory
fn is_safe_download_name(name: &str) -> bool {
    !name.is_empty() && !name.contains('/') && !name.contains('\\') && !name.contains("..")
}

async fn handle_crawl(
    State(state): State<AppState>,
    Json(request): Json<CrawlRequest>,
) -> Response {
    let params = match validate_request(&request) {
        Ok(params) => params,
        Err(message) => return bad_request(message),
    };

    // One crawl at a time: runs share the output directory
    let _guard = state.crawl_lock.lock().await;

    let started_at = Utc::now();
    let clock = Instant::now();

    tracing::info!(
        "Starting crawl of {} (max depth {})",
        params.seed_url,
        params.max_depth
    );

    let renderer = match HttpRenderer::new(&state.config.renderer) {
        Ok(renderer) => renderer,
        Err(e) => return internal_error(format!("Failed to build HTTP client: {}", e)),
    };

    let mut sink = match FsRecordSink::new(&state.config.output.directory_path) {
        Ok(sink) => sink,
        Err(e) => return internal_error(format!("Failed to prepare output directory: {}", e)),
    };

    let stats = match crawl(renderer, &params, &mut sink).await {
        Ok(stats) => stats,
        Err(crate::HarvestError::InvalidSeed { url, message }) => {
            return bad_request(format!("Invalid url '{}': {}", url, message));
        }
        Err(e) => return internal_error(format!("Crawl failed: {}", e)),
    };

    let archive_name = &state.config.output.archive_name;
    if let Err(e) = sink.write_archive(archive_name) {
        return internal_error(format!("Failed to package archive: {}", e));
    }

    let duration_ms = clock.elapsed().as_millis() as u64;
    tracing::info!(
        "Crawl finished: {} pages archived in {}ms",
        stats.pages_emitted,
        duration_ms
    );

    (
        StatusCode::OK,
        Json(CrawlResponse {
            message: "Crawl completed successfully".to_string(),
            download_url: format!("/downloads/{}", archive_name),
            pages_archived: stats.pages_emitted,
            duration_ms,
            started_at,
        }),
    )
        .into_response()
}

async fn handle_download(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    if !is_safe_download_name(&name) {
        return bad_request("Invalid download name");
    }

    let path = std::path::Path::new(&state.config.output.directory_path).join(&name);
    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(_) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorBody {
                    error: format!("No archive named '{}'", name),
                }),
            )
                .into_response();
        }
    };

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", name),
            ),
        ],
        bytes,
    )
        .into_response()
}

async fn handle_healthz() -> Response {
    (StatusCode::OK, "ok").into_response()
}

/// Builds the API router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/crawl", post(handle_crawl))
        .route("/downloads/:name", get(handle_download))
        .route("/healthz", get(handle_healthz))
        .with_state(state)
}

/// Binds the configured address and serves the API until shutdown
pub async fn serve(config: Config) -> crate::Result<()> {
    let bind_address = config.server.bind_address.clone();
    let app = router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Listening on {}", bind_address);
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(url: Option<&str>, max_depth: Option<i64>, tags: Option<Vec<&str>>) -> CrawlRequest {
        CrawlRequest {
            url: url.map(String::from),
            max_depth,
            blacklist: Vec::new(),
            tags: tags.map(|t| t.iter().map(|s| s.to_string()).collect()),
        }
    }

    #[test]
    fn test_validate_accepts_complete_request() {
        let params = validate_request(&request(
            Some("https://a.com"),
            Some(2),
            Some(vec!["p", "h1"]),
        ))
        .unwrap();
        assert_eq!(params.seed_url, "https://a.com");
        assert_eq!(params.max_depth, 2);
        assert_eq!(params.tags, vec!["p", "h1"]);
    }

    #[test]
    fn test_validate_rejects_missing_url() {
        let err = validate_request(&request(None, Some(2), Some(vec!["p"]))).unwrap_err();
        assert_eq!(err, "url is required");
    }

    #[test]
    fn test_validate_rejects_blank_url() {
        let err = validate_request(&request(Some("   "), Some(2), Some(vec!["p"]))).unwrap_err();
        assert_eq!(err, "url is required");
    }

    #[test]
    fn test_validate_rejects_missing_depth() {
        let err = validate_request(&request(Some("https://a.com"), None, Some(vec!["p"])))
            .unwrap_err();
        assert_eq!(err, "maxDepth must be a positive integer");
    }

    #[test]
    fn test_validate_rejects_non_positive_depth() {
        for depth in [0, -1] {
            let err =
                validate_request(&request(Some("https://a.com"), Some(depth), Some(vec!["p"])))
                    .unwrap_err();
            assert_eq!(err, "maxDepth must be a positive integer");
        }
    }

    #[test]
    fn test_validate_rejects_missing_or_empty_tags() {
        let err = validate_request(&request(Some("https://a.com"), Some(2), None)).unwrap_err();
        assert_eq!(err, "tags must be a non-empty array");

        let err =
            validate_request(&request(Some("https://a.com"), Some(2), Some(vec![]))).unwrap_err();
        assert_eq!(err, "tags must be a non-empty array");
    }

    #[test]
    fn test_validate_reports_url_error_first() {
        // All three fields are bad; url wins
        let err = validate_request(&request(None, Some(0), None)).unwrap_err();
        assert_eq!(err, "url is required");
    }

    #[test]
    fn test_safe_download_names() {
        assert!(is_safe_download_name("crawled_data.zip"));
        assert!(!is_safe_download_name(""));
        assert!(!is_safe_download_name("../secrets.zip"));
        assert!(!is_safe_download_name("a/b.zip"));
        assert!(!is_safe_download_name("a\\b.zip"));
    }
}
