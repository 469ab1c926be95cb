//! Record persistence and archival
//!
//! The crawl engine hands every (content, metadata) pair to a [`RecordSink`]
//! and never learns how it is stored. The filesystem sink writes one text
//! file and one metadata JSON file per pair, and the archive builder packs
//! everything into a single flat zip for download.

mod archive;
mod fs;

pub use archive::build_archive;
pub use fs::{sanitize_file_stem, FsRecordSink};

use crate::crawler::{ContentRecord, MetadataRecord};
use thiserror::Error;

/// Errors that can occur while persisting or archiving records
///
/// Unlike render errors, these are fatal to a crawl: if the output cannot
/// be written, the deliverable archive cannot be produced.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("Failed to serialize metadata: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to build archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for sink operations
pub type SinkResult<T> = Result<T, SinkError>;

/// Trait for record sinks
///
/// A sink consumes each emitted record pair. Implementations choose the
/// storage format and the file naming; the engine only guarantees at most
/// one emission per successfully rendered, non-empty-content URL.
pub trait RecordSink {
    /// Persists one (content, metadata) pair
    fn persist(&mut self, content: &ContentRecord, metadata: &MetadataRecord) -> SinkResult<()>;
}
