//! Packs a validated manifest into a zip archive held in memory.
//!
//! The archive is built synchronously; callers on the async runtime move it to the
//! blocking pool (see `services::generate`).

use super::manifest::Manifest;
use std::io::{Cursor, Write};
use thiserror::Error;
use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("failed to add {path:?} to the archive: {source}")]
    Entry { path: String, source: ZipError },
    #[error("failed to write {path:?} into the archive: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to finalize the archive: {0}")]
    Finish(ZipError),
}

/// Writes one deflated entry per manifest file and returns the finished zip bytes.
pub fn build_archive(manifest: &Manifest) -> Result<Vec<u8>, ArchiveError> {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    for (path, content) in manifest.iter() {
        zip.start_file(path, options)
            .map_err(|source| ArchiveError::Entry {
                path: path.to_string(),
                source,
            })?;
        zip.write_all(content.as_bytes())
            .map_err(|source| ArchiveError::Write {
                path: path.to_string(),
                source,
            })?;
    }

    let cursor = zip.finish().map_err(ArchiveError::Finish)?;
    Ok(cursor.into_inner())
}
