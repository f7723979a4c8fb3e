//! Listing the RawDocs in an output directory.
//!
//! Downstream stages drop an empty `<document_id>.done` marker next to a
//! sidecar once they have processed it. This module only reads those
//! markers; it never writes them.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Result;
use crate::meta::{read_meta_file, META_SUFFIX};
use crate::models::RawDoc;

pub const DONE_SUFFIX: &str = ".done";

/// One sidecar found in the directory.
#[derive(Debug, Clone)]
pub struct RawDocEntry {
    pub meta_path: PathBuf,
    pub rawdoc: RawDoc,
    /// A `.done` marker exists for this document.
    pub processed: bool,
}

/// Reads every `*.meta.json` directly inside `dir`.
///
/// Sidecars that cannot be read or parsed are skipped with a warning. A
/// directory that does not exist yet holds no documents.
///
/// Results are ordered by `fetch_time`, then `document_id`.
pub fn list_rawdocs(dir: &Path) -> Result<Vec<RawDocEntry>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut entries = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable directory entry");
                continue;
            }
        };
        let path = entry.path();
        let Some(id) = id_from_sidecar(path) else {
            continue;
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let rawdoc = match read_meta_file(path) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!(error = %e, "skipping sidecar");
                continue;
            }
        };

        let processed = dir.join(format!("{}{}", id, DONE_SUFFIX)).exists();

        entries.push(RawDocEntry {
            meta_path: path.to_path_buf(),
            rawdoc,
            processed,
        });
    }

    entries.sort_by(|a, b| {
        a.rawdoc
            .fetch_time
            .cmp(&b.rawdoc.fetch_time)
            .then_with(|| a.rawdoc.document_id.cmp(&b.rawdoc.document_id))
    });

    Ok(entries)
}

/// Entries a downstream stage has not marked done yet.
pub fn pending(entries: &[RawDocEntry]) -> Vec<&RawDocEntry> {
    entries.iter().filter(|e| !e.processed).collect()
}

/// `abc.meta.json` → `abc`. The filename is authoritative for the marker
/// lookup, not the id recorded inside the file.
fn id_from_sidecar(path: &Path) -> Option<&str> {
    path.file_name()?.to_str()?.strip_suffix(META_SUFFIX)
}
