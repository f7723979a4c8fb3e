//! Content-type and storage-extension policy.
//!
//! All inference rules live in the tables below so the policy can be audited
//! in one place.
//!
//! # URL fetches
//!
//! | Declared `Content-Type` (parameters stripped) | Extension |
//! |-----------|----------|
//! | empty / absent | `.html` |
//! | contains `html` (any case) | `.html` |
//! | anything else | `.bin` |
//!
//! # Local imports
//!
//! | File extension | `source_type` | `content_type` |
//! |-----------|----------|----------|
//! | `.html`, `.htm` | `singlefile_html` | `text/html` |
//! | none | `singlefile_html` (stored as `.html`) | `text/html` |
//! | dotfile (`.bashrc`), trailing dot (`.`) | `url` | `application/octet-stream` |
//! | other | `url` | `application/octet-stream` |

use std::path::Path;

use crate::models::SourceType;

pub const HTML_EXTENSION: &str = ".html";
pub const BINARY_EXTENSION: &str = ".bin";

pub const MIME_HTML: &str = "text/html";
pub const MIME_OCTET_STREAM: &str = "application/octet-stream";

/// How a declared content type is matched against a rule.
#[derive(Debug, Clone, Copy)]
enum ContentTypeMatch {
    Empty,
    /// Case-insensitive substring.
    Contains(&'static str),
}

impl ContentTypeMatch {
    fn matches(&self, content_type: &str) -> bool {
        match self {
            ContentTypeMatch::Empty => content_type.is_empty(),
            ContentTypeMatch::Contains(needle) => {
                content_type.to_ascii_lowercase().contains(needle)
            }
        }
    }
}

/// First match wins; no match falls through to [`BINARY_EXTENSION`].
const FETCH_EXTENSION_RULES: &[(ContentTypeMatch, &str)] = &[
    (ContentTypeMatch::Empty, HTML_EXTENSION),
    (ContentTypeMatch::Contains("html"), HTML_EXTENSION),
];

/// Import extensions (exact, case-sensitive) classified as self-contained HTML.
const IMPORT_SOURCE_RULES: &[(&str, SourceType)] = &[
    (".html", SourceType::SinglefileHtml),
    (".htm", SourceType::SinglefileHtml),
];

/// Strips parameters (`; charset=...`) from a `Content-Type` header value.
pub fn declared_content_type(header: &str) -> &str {
    match header.find(';') {
        Some(i) => header[..i].trim(),
        None => header,
    }
}

/// Storage extension for a fetched body with the given declared content type.
pub fn extension_for_content_type(content_type: &str) -> &'static str {
    FETCH_EXTENSION_RULES
        .iter()
        .find(|(rule, _)| rule.matches(content_type))
        .map(|(_, ext)| *ext)
        .unwrap_or(BINARY_EXTENSION)
}

/// Storage extension for an imported file, or [`HTML_EXTENSION`] when it has
/// none.
///
/// The extension is everything from the last `.` of the file name, so
/// `.bashrc` keeps its whole name and `name.` yields `.`.
pub fn extension_for_path(path: &Path) -> String {
    let name = match path.file_name() {
        Some(name) => name.to_string_lossy(),
        None => return HTML_EXTENSION.to_string(),
    };
    match name.rfind('.') {
        Some(i) => name[i..].to_string(),
        None => HTML_EXTENSION.to_string(),
    }
}

/// Source type for an import stored under `extension`.
pub fn source_type_for_extension(extension: &str) -> SourceType {
    IMPORT_SOURCE_RULES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, kind)| *kind)
        .unwrap_or(SourceType::Url)
}

/// Content type recorded for a locally imported file of the given kind.
pub fn default_content_type(source_type: SourceType) -> &'static str {
    match source_type {
        SourceType::SinglefileHtml => MIME_HTML,
        SourceType::Url => MIME_OCTET_STREAM,
    }
}
