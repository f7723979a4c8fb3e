//! URL acquisition.
//!
//! Issues a single blocking `GET`, keeps the body only on `200 OK`, and names
//! the stored blob from the declared `Content-Type`:
//!
//! | Declared type | Stored as |
//! |---------------|-----------|
//! | absent / empty | `<id>.html` |
//! | contains `html` | `<id>.html` |
//! | other | `<id>.bin` |
//!
//! No retries. Redirects follow the HTTP client's default policy.

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde_json::Map;

use crate::acquire::{ensure_dir, fetch_time_now, write_content, Acquirer};
use crate::classify::{declared_content_type, extension_for_content_type};
use crate::error::{AcquireError, Result};
use crate::ident::IdGenerator;
use crate::meta::write_meta;
use crate::models::{RawDoc, SourceType};

/// A successful response: body plus the declared content type, parameters
/// already stripped.
struct Fetched {
    body: Vec<u8>,
    content_type: String,
}

impl<G: IdGenerator> Acquirer<G> {
    /// Fetches `url` and stores it in `output_dir`.
    ///
    /// # Workflow
    ///
    /// 1. Generate a document id and create `output_dir`.
    /// 2. `GET url` with `timeout`; anything but `200` fails.
    /// 3. Store the body as `<id>.html` or `<id>.bin`.
    /// 4. Write `<id>.meta.json` with `source_type = "url"`.
    ///
    /// # Returns
    ///
    /// Absolute path of the metadata sidecar.
    ///
    /// # Errors
    ///
    /// - [`AcquireError::Timeout`] when `timeout` elapses
    /// - [`AcquireError::Request`] for connection and other transport failures
    /// - [`AcquireError::HttpStatus`] for any non-200 status; nothing is written
    /// - [`AcquireError::ReadBody`] if the body cannot be read
    /// - directory, content, and sidecar write failures
    pub fn acquire_url(&self, url: &str, output_dir: &Path, timeout: Duration) -> Result<PathBuf> {
        let id = self.next_id()?;
        ensure_dir(output_dir)?;

        tracing::info!(%url, document_id = %id, "fetching");
        let fetched = self.fetch(url, timeout)?;

        let extension = extension_for_content_type(&fetched.content_type);
        let storage_path = write_content(output_dir, &id, extension, &fetched.body)?;

        let rawdoc = RawDoc {
            document_id: id.to_string(),
            source_type: SourceType::Url,
            source_uri: url.to_string(),
            fetch_time: fetch_time_now(),
            storage_path: storage_path.to_string_lossy().into_owned(),
            content_type: fetched.content_type,
            content_length: fetched.body.len() as u64,
            metadata: Map::new(),
        };

        let meta = write_meta(&rawdoc, output_dir)?;
        tracing::info!(
            document_id = %id,
            content_type = %rawdoc.content_type,
            bytes = rawdoc.content_length,
            meta = %meta.display(),
            "acquired url"
        );
        Ok(meta)
    }

    fn client(&self, timeout: Duration) -> Result<Client> {
        let mut builder = Client::builder().timeout(timeout);
        if let Some(ua) = &self.user_agent {
            builder = builder.user_agent(ua.clone());
        }
        builder.build().map_err(AcquireError::HttpClient)
    }

    fn fetch(&self, url: &str, timeout: Duration) -> Result<Fetched> {
        let response = self
            .client(timeout)?
            .get(url)
            .send()
            .map_err(|e| transport_error(url, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!(%url, status = status.as_u16(), "rejected response");
            return Err(AcquireError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| declared_content_type(v).to_string())
            .unwrap_or_default();

        let body = response.bytes().map_err(|e| {
            if e.is_timeout() {
                transport_error(url, e)
            } else {
                AcquireError::ReadBody {
                    url: url.to_string(),
                    source: e,
                }
            }
        })?;

        Ok(Fetched {
            body: body.to_vec(),
            content_type,
        })
    }
}

fn transport_error(url: &str, source: reqwest::Error) -> AcquireError {
    if source.is_timeout() {
        AcquireError::Timeout {
            url: url.to_string(),
            source,
        }
    } else {
        AcquireError::Request {
            url: url.to_string(),
            source,
        }
    }
}
