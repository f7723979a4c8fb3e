//! Acquisition entry points.
//!
//! An [`Acquirer`] owns the identifier source and HTTP settings shared by the
//! two strategies:
//!
//! - [`Acquirer::acquire_url`]: fetch over HTTP(S) (see `acquire_url.rs`)
//! - [`Acquirer::acquire_file`]: import a local file (see `acquire_file.rs`)
//!
//! Both write `<id><ext>` and `<id>.meta.json` into the output directory and
//! return the absolute path of the sidecar. The free functions at the bottom
//! of this module run an `Acquirer` with default settings.
//!
//! # Partial writes
//!
//! Nothing is cleaned up on failure. If the content blob is written but the
//! sidecar write fails, the blob stays behind; with no sidecar it is never
//! picked up downstream.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{SecondsFormat, Utc};

use crate::error::{AcquireError, Result};
use crate::ident::{DocumentId, IdGenerator, RandomIdGenerator};

/// Runs acquisitions with an injected identifier source.
#[derive(Debug, Clone, Default)]
pub struct Acquirer<G = RandomIdGenerator> {
    pub(crate) ids: G,
    pub(crate) user_agent: Option<String>,
}

impl Acquirer {
    /// An acquirer drawing identifiers from the OS entropy source.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<G: IdGenerator> Acquirer<G> {
    pub fn with_id_generator(ids: G) -> Self {
        Self {
            ids,
            user_agent: None,
        }
    }

    /// Sets the `User-Agent` sent with URL fetches. Unset leaves the HTTP
    /// client's default in place.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Runs whichever strategy `request` names.
    ///
    /// A file path takes precedence over a URL when both are given.
    ///
    /// # Errors
    ///
    /// [`AcquireError::MissingSource`] when the request names neither, plus
    /// anything the chosen strategy returns.
    pub fn acquire(&self, request: &AcquireRequest, output_dir: &Path) -> Result<PathBuf> {
        match request.source()? {
            Source::File(path) => {
                self.acquire_file(path, output_dir, request.source_uri.as_deref())
            }
            Source::Url(url) => self.acquire_url(url, output_dir, request.timeout),
        }
    }

    pub(crate) fn next_id(&self) -> Result<DocumentId> {
        self.ids.generate()
    }
}

/// What to acquire, as supplied by a caller such as the CLI.
#[derive(Debug, Clone)]
pub struct AcquireRequest {
    pub url: Option<String>,
    pub file: Option<PathBuf>,
    /// Provenance override for file imports.
    pub source_uri: Option<String>,
    /// Fetch timeout for URL acquisitions.
    pub timeout: Duration,
}

impl Default for AcquireRequest {
    fn default() -> Self {
        Self {
            url: None,
            file: None,
            source_uri: None,
            timeout: Duration::from_secs(crate::config::DEFAULT_TIMEOUT_SECS),
        }
    }
}

enum Source<'a> {
    Url(&'a str),
    File(&'a Path),
}

impl AcquireRequest {
    fn source(&self) -> Result<Source<'_>> {
        if let Some(file) = self.file.as_deref().filter(|f| !f.as_os_str().is_empty()) {
            return Ok(Source::File(file));
        }
        if let Some(url) = self.url.as_deref().filter(|u| !u.is_empty()) {
            return Ok(Source::Url(url));
        }
        Err(AcquireError::MissingSource)
    }
}

/// Creates `dir` and any missing parents. Succeeds if it already exists.
pub(crate) fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| AcquireError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %dir.display(), "ensured output directory");
    Ok(())
}

/// Writes the content blob `<dir>/<id><ext>` and returns its absolute path.
pub(crate) fn write_content(
    dir: &Path,
    id: &DocumentId,
    extension: &str,
    bytes: &[u8],
) -> Result<PathBuf> {
    let path = dir.join(format!("{}{}", id, extension));
    fs::write(&path, bytes).map_err(|source| AcquireError::WriteContent {
        path: path.clone(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "wrote content");
    crate::meta::absolute(&path)
}

/// Capture instant in RFC 3339 UTC, second precision (`2026-10-18T09:30:00Z`).
pub(crate) fn fetch_time_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Fetches `url` into `output_dir` with default settings.
pub fn acquire_url(url: &str, output_dir: &Path, timeout: Duration) -> Result<PathBuf> {
    Acquirer::new().acquire_url(url, output_dir, timeout)
}

/// Imports `file_path` into `output_dir` with default settings.
pub fn acquire_file(
    file_path: &Path,
    output_dir: &Path,
    source_uri: Option<&str>,
) -> Result<PathBuf> {
    Acquirer::new().acquire_file(file_path, output_dir, source_uri)
}

/// Runs `request` against `output_dir` with default settings.
pub fn acquire(request: &AcquireRequest, output_dir: &Path) -> Result<PathBuf> {
    Acquirer::new().acquire(request, output_dir)
}
