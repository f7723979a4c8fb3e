//! RawDoc sidecar persistence.
//!
//! A sidecar lives next to its content blob as `<document_id>.meta.json` and
//! holds the [`RawDoc`] as pretty-printed JSON.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AcquireError, Result};
use crate::models::RawDoc;

pub const META_SUFFIX: &str = ".meta.json";

/// Path of the sidecar for `document_id` inside `dir`.
pub fn meta_path(dir: &Path, document_id: &str) -> PathBuf {
    dir.join(format!("{}{}", document_id, META_SUFFIX))
}

/// Writes `rawdoc` to `<dir>/<document_id>.meta.json` and returns the
/// absolute path of the written file.
///
/// An existing file at that path is overwritten.
pub fn write_meta(rawdoc: &RawDoc, dir: &Path) -> Result<PathBuf> {
    let path = meta_path(dir, &rawdoc.document_id);
    let json = serde_json::to_vec_pretty(rawdoc).map_err(|source| AcquireError::Serialize {
        document_id: rawdoc.document_id.clone(),
        source,
    })?;

    fs::write(&path, json).map_err(|source| AcquireError::WriteMeta {
        path: path.clone(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "wrote metadata sidecar");

    absolute(&path)
}

/// Reads the sidecar for `document_id` back from `dir`.
pub fn load_meta(dir: &Path, document_id: &str) -> Result<RawDoc> {
    let path = meta_path(dir, document_id);
    if !path.exists() {
        return Err(AcquireError::MetaNotFound {
            document_id: document_id.to_string(),
            dir: dir.to_path_buf(),
        });
    }
    read_meta_file(&path)
}

pub(crate) fn read_meta_file(path: &Path) -> Result<RawDoc> {
    let bytes = fs::read(path).map_err(|source| AcquireError::ReadMeta {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| AcquireError::ParseMeta {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|source| AcquireError::ResolvePath {
        path: path.to_path_buf(),
        source,
    })
}
