//! Site-Harvester: a bounded-depth site text harvester
//!
//! This crate crawls a website from a seed URL, follows same-origin links up
//! to a configurable depth, extracts text from caller-selected HTML tags on
//! each page, and packages the extracted text plus per-page metadata into a
//! single downloadable zip archive.

pub mod api;
pub mod config;
pub mod crawler;
pub mod renderer;
pub mod sink;

use thiserror::Error;

/// Main error type for Site-Harvester operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid seed URL '{url}': {message}")]
    InvalidSeed { url: String, message: String },

    #[error("Persistence error: {0}")]
    Sink(#[from] sink::SinkError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for Site-Harvester operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, CrawlEngine, CrawlParams, CrawlStats};
pub use crawler::{derive_metadata, ContentRecord, MetadataRecord};
pub use renderer::{HttpRenderer, PageRenderer, RenderedPage};
pub use sink::{FsRecordSink, RecordSink};
