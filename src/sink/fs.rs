//! Filesystem record sink
//!
//! Writes two artifacts per emitted page into one output directory: a
//! UTF-8 text file with the extracted content and a JSON metadata file.
//! Both share a filename stem derived deterministically from the URL.

use crate::crawler::{strip_scheme, ContentRecord, MetadataRecord};
use crate::sink::{build_archive, RecordSink, SinkError, SinkResult};
use std::path::{Path, PathBuf};

/// Derives the sanitized filename stem for a URL
///
/// The scheme is stripped and every character outside `[A-Za-z0-9-_]` is
/// replaced with an underscore, so the stem is safe as a flat file name.
/// The mapping is deterministic: the same URL always yields the same stem.
///
/// # Example
///
/// ```
/// use site_harvester::sink::sanitize_file_stem;
///
/// assert_eq!(sanitize_file_stem("https://a.com/x/y"), "a_com_x_y");
/// ```
pub fn sanitize_file_stem(url: &str) -> String {
    strip_scheme(url)
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Record sink that writes content and metadata files into a directory
pub struct FsRecordSink {
    output_dir: PathBuf,
    files: Vec<PathBuf>,
}

impl FsRecordSink {
    /// Creates a sink writing into the given directory
    ///
    /// The directory is created if it does not exist.
    pub fn new(output_dir: impl AsRef<Path>) -> SinkResult<Self> {
        let output_dir = output_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&output_dir)?;
        Ok(Self {
            output_dir,
            files: Vec::new(),
        })
    }

    /// Returns the files written so far, in emission order
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Packages all written files into a flat zip inside the output directory
    ///
    /// # Arguments
    ///
    /// * `archive_name` - Bare file name for the archive
    ///
    /// # Returns
    ///
    /// * `Ok(PathBuf)` - Path of the written archive
    /// * `Err(SinkError)` - Archive could not be produced
    pub fn write_archive(&self, archive_name: &str) -> SinkResult<PathBuf> {
        let dest = self.output_dir.join(archive_name);
        build_archive(&self.files, &dest)?;
        tracing::info!(
            "Packaged {} files into {}",
            self.files.len(),
            dest.display()
        );
        Ok(dest)
    }
}

impl RecordSink for FsRecordSink {
    fn persist(&mut self, content: &ContentRecord, metadata: &MetadataRecord) -> SinkResult<()> {
        let stem = sanitize_file_stem(&content.url);

        let content_path = self.output_dir.join(format!("{}.txt", stem));
        let metadata_path = self.output_dir.join(format!("{}.metadata.json", stem));

        std::fs::write(&content_path, &content.text)
            .map_err(|e| SinkError::Write(format!("{}: {}", content_path.display(), e)))?;

        let metadata_json = serde_json::to_string_pretty(metadata)?;
        std::fs::write(&metadata_path, metadata_json)
            .map_err(|e| SinkError::Write(format!("{}: {}", metadata_path.display(), e)))?;

        tracing::debug!("Saved content and metadata for {}", content.url);

        self.files.push(content_path);
        self.files.push(metadata_path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::derive_metadata;
    use tempfile::tempdir;

    fn record(url: &str, text: &str) -> (ContentRecord, MetadataRecord) {
        (
            ContentRecord {
                url: url.to_string(),
                text: text.to_string(),
            },
            derive_metadata(url),
        )
    }

    #[test]
    fn test_sanitize_file_stem() {
        assert_eq!(sanitize_file_stem("https://a.com/x/y"), "a_com_x_y");
        assert_eq!(sanitize_file_stem("http://a.com"), "a_com");
        assert_eq!(
            sanitize_file_stem("https://a.com/p?q=1&r=2"),
            "a_com_p_q_1_r_2"
        );
        assert_eq!(sanitize_file_stem("https://a.com/under_score-ok"), "a_com_under_score-ok");
    }

    #[test]
    fn test_sanitize_is_deterministic() {
        let first = sanitize_file_stem("https://a.com/x");
        let second = sanitize_file_stem("https://a.com/x");
        assert_eq!(first, second);
    }

    #[test]
    fn test_persist_writes_both_artifacts() {
        let dir = tempdir().unwrap();
        let mut sink = FsRecordSink::new(dir.path()).unwrap();

        let (content, metadata) = record("https://a.com/docs", "Hello\n\nWorld");
        sink.persist(&content, &metadata).unwrap();

        let content_path = dir.path().join("a_com_docs.txt");
        let metadata_path = dir.path().join("a_com_docs.metadata.json");

        assert_eq!(
            std::fs::read_to_string(&content_path).unwrap(),
            "Hello\n\nWorld"
        );

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&metadata_path).unwrap()).unwrap();
        assert_eq!(json["metadataAttributes"]["url"], "https://a.com/docs");
        assert_eq!(json["metadataAttributes"]["sub_cate_1"], "docs");

        assert_eq!(sink.files(), &[content_path, metadata_path]);
    }

    #[test]
    fn test_persist_creates_missing_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("deep").join("output");

        let mut sink = FsRecordSink::new(&nested).unwrap();
        let (content, metadata) = record("https://a.com", "text");
        sink.persist(&content, &metadata).unwrap();

        assert!(nested.join("a_com.txt").exists());
    }

    #[test]
    fn test_write_archive_contains_all_files() {
        let dir = tempdir().unwrap();
        let mut sink = FsRecordSink::new(dir.path()).unwrap();

        let (content, metadata) = record("https://a.com/one", "1");
        sink.persist(&content, &metadata).unwrap();
        let (content, metadata) = record("https://a.com/two", "2");
        sink.persist(&content, &metadata).unwrap();

        let archive_path = sink.write_archive("crawled_data.zip").unwrap();
        assert!(archive_path.exists());

        let file = std::fs::File::open(&archive_path).unwrap();
        let mut archive = zip::ZipArchive::new(file).unwrap();
        let names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();

        assert_eq!(names.len(), 4);
        assert!(names.contains(&"a_com_one.txt".to_string()));
        assert!(names.contains(&"a_com_one.metadata.json".to_string()));
        assert!(names.contains(&"a_com_two.txt".to_string()));
        assert!(names.contains(&"a_com_two.metadata.json".to_string()));
        // Flat archive: no directory components
        assert!(names.iter().all(|n| !n.contains('/')));
    }
}
