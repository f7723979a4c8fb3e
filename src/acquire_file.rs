//! Local file import.
//!
//! Reads a file from disk and stores it unmodified. The file's own extension
//! decides both the blob name and the classification:
//!
//! | Extension | `source_type` | `content_type` |
//! |-----------|---------------|----------------|
//! | `.html`, `.htm` | `singlefile_html` | `text/html` |
//! | none (stored as `.html`) | `singlefile_html` | `text/html` |
//! | other | `url` | `application/octet-stream` |
//!
//! The `url` label for non-HTML imports is what the downstream router
//! expects for anything that is not a saved page; keep it unless those
//! consumers change too.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Map;

use crate::acquire::{ensure_dir, fetch_time_now, write_content, Acquirer};
use crate::classify::{default_content_type, extension_for_path, source_type_for_extension};
use crate::error::{AcquireError, Result};
use crate::ident::IdGenerator;
use crate::meta::{absolute, write_meta};
use crate::models::RawDoc;

impl<G: IdGenerator> Acquirer<G> {
    /// Imports `file_path` into `output_dir`.
    ///
    /// `source_uri` records where the file originally came from (for example
    /// the page URL of a saved copy). When it is `None` or empty, the
    /// absolute path of `file_path` is recorded instead.
    ///
    /// # Returns
    ///
    /// Absolute path of the metadata sidecar.
    ///
    /// # Errors
    ///
    /// - [`AcquireError::ReadFile`] if the file is missing or unreadable
    /// - directory, content, and sidecar write failures
    pub fn acquire_file(
        &self,
        file_path: &Path,
        output_dir: &Path,
        source_uri: Option<&str>,
    ) -> Result<PathBuf> {
        let id = self.next_id()?;
        ensure_dir(output_dir)?;

        let body = fs::read(file_path).map_err(|source| AcquireError::ReadFile {
            path: file_path.to_path_buf(),
            source,
        })?;

        let extension = extension_for_path(file_path);
        let storage_path = write_content(output_dir, &id, &extension, &body)?;

        let source_uri = match source_uri.filter(|s| !s.is_empty()) {
            Some(uri) => uri.to_string(),
            None => absolute(file_path)?.to_string_lossy().into_owned(),
        };

        let source_type = source_type_for_extension(&extension);

        let rawdoc = RawDoc {
            document_id: id.to_string(),
            source_type,
            source_uri,
            fetch_time: fetch_time_now(),
            storage_path: storage_path.to_string_lossy().into_owned(),
            content_type: default_content_type(source_type).to_string(),
            content_length: body.len() as u64,
            metadata: Map::new(),
        };

        let meta = write_meta(&rawdoc, output_dir)?;
        tracing::info!(
            document_id = %id,
            source_type = %source_type,
            file = %file_path.display(),
            meta = %meta.display(),
            "imported file"
        );
        Ok(meta)
    }
}
