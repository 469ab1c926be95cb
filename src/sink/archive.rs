//! Flat zip archive construction

use crate::sink::{SinkError, SinkResult};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Builds a flat, maximum-compression zip archive from the given files
///
/// Each entry is stored under its basename only, so the archive has no
/// directory structure. An existing archive at `dest` is overwritten.
///
/// # Arguments
///
/// * `files` - Paths of the files to include, in order
/// * `dest` - Path of the archive to write
pub fn build_archive(files: &[PathBuf], dest: &Path) -> SinkResult<()> {
    let file = File::create(dest)
        .map_err(|e| SinkError::Write(format!("{}: {}", dest.display(), e)))?;
    let mut writer = ZipWriter::new(file);

    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(9));

    for path in files {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| SinkError::Write(format!("bad file name: {}", path.display())))?;

        writer.start_file(name, options)?;
        let bytes = std::fs::read(path)?;
        writer.write_all(&bytes)?;
    }

    writer.finish()?;
    Ok(())
}
