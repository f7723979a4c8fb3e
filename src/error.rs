//! Error type shared by every acquisition entry point.
//!
//! Each failure mode gets its own variant so callers can tell a timeout from
//! a refused connection, or a failed content write from a failed sidecar
//! write, without string matching. [`AcquireError::category`] groups the
//! variants into the four classes the CLI cares about.

use std::path::PathBuf;

/// Broad class of an [`AcquireError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The caller supplied nothing to acquire.
    Input,
    /// Fetching or reading the source failed.
    Acquisition,
    /// Writing content or metadata failed.
    Persistence,
    /// The process cannot safely continue.
    Fatal,
}

/// Everything that can go wrong while acquiring a document.
#[derive(Debug, thiserror::Error)]
pub enum AcquireError {
    #[error("no source given: provide a URL or a file path")]
    MissingSource,

    /// The operating system entropy source failed. Treat as fatal: no
    /// identifier can be produced, so nothing downstream may proceed.
    #[error("entropy source unavailable: {0}")]
    Entropy(getrandom::Error),

    #[error("invalid document id '{0}': expected a hyphenated lowercase UUID")]
    InvalidId(String),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} timed out: {source}")]
    Timeout {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("failed to read response body from {url}: {source}")]
    ReadBody {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to read {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to resolve absolute path for {}: {source}", path.display())]
    ResolvePath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write content to {}: {source}", path.display())]
    WriteContent {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize metadata for {document_id}: {source}")]
    Serialize {
        document_id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write metadata to {}: {source}", path.display())]
    WriteMeta {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no metadata for document {document_id} in {}", dir.display())]
    MetaNotFound { document_id: String, dir: PathBuf },

    #[error("failed to read metadata {}: {source}", path.display())]
    ReadMeta {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid metadata in {}: {source}", path.display())]
    ParseMeta {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl AcquireError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AcquireError::MissingSource | AcquireError::InvalidId(_) => ErrorCategory::Input,
            AcquireError::Entropy(_) => ErrorCategory::Fatal,
            AcquireError::HttpClient(_)
            | AcquireError::Request { .. }
            | AcquireError::Timeout { .. }
            | AcquireError::HttpStatus { .. }
            | AcquireError::ReadBody { .. }
            | AcquireError::ReadFile { .. }
            | AcquireError::MetaNotFound { .. }
            | AcquireError::ReadMeta { .. }
            | AcquireError::ParseMeta { .. } => ErrorCategory::Acquisition,
            AcquireError::ResolvePath { .. }
            | AcquireError::CreateDir { .. }
            | AcquireError::WriteContent { .. }
            | AcquireError::Serialize { .. }
            | AcquireError::WriteMeta { .. } => ErrorCategory::Persistence,
        }
    }

    /// True when the caller must stop rather than retry or continue.
    pub fn is_fatal(&self) -> bool {
        self.category() == ErrorCategory::Fatal
    }

    /// HTTP status code for [`AcquireError::HttpStatus`], if that is what this is.
    pub fn status(&self) -> Option<u16> {
        match self {
            AcquireError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T, E = AcquireError> = std::result::Result<T, E>;
