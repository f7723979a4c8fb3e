//! Core data models.
//!
//! [`RawDoc`] is the contract between acquisition and the later parse stages:
//! it is written once as `<document_id>.meta.json` and read by whatever
//! consumes the rawdocs directory.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// How a document entered the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    /// Fetched over HTTP, or a locally imported non-HTML resource.
    Url,
    /// A locally imported, self-contained HTML page.
    SinglefileHtml,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Url => "url",
            SourceType::SinglefileHtml => "singlefile_html",
        }
    }
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provenance record for one acquired document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDoc {
    #[serde(alias = "rawdoc_id")]
    pub document_id: String,
    pub source_type: SourceType,
    pub source_uri: String,
    /// RFC 3339 UTC, second precision.
    pub fetch_time: String,
    /// Absolute path of the content blob.
    pub storage_path: String,
    pub content_type: String,
    pub content_length: u64,
    /// Open extension field; empty when acquisition writes the record.
    #[serde(default)]
    pub metadata: Map<String, Value>,
}
