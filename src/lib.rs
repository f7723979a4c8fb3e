//! # rawdoc-acquire
//!
//! First stage of a document-ingestion pipeline: acquire one document, by
//! HTTP fetch or local import, and record where it came from.
//!
//! Each acquisition writes two files into the rawdocs directory:
//!
//! ```text
//! data/rawdocs/
//! ├── 6f1c2a4e-9b3d-4c58-a0e7-1d2f3b4c5d6e.html        # raw bytes, unmodified
//! └── 6f1c2a4e-9b3d-4c58-a0e7-1d2f3b4c5d6e.meta.json   # RawDoc sidecar
//! ```
//!
//! Later stages find documents through their sidecars; content is never
//! parsed or validated here.
//!
//! ## Quick Start
//!
//! ```bash
//! rawdoc acquire --url https://example.com/article
//! rawdoc acquire --file saved/page.html --source-uri https://example.com/page
//! rawdoc list --pending
//! rawdoc show 6f1c2a4e-9b3d-4c58-a0e7-1d2f3b4c5d6e
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`acquire`](mod@acquire) | `Acquirer`, request dispatch, default entry points |
//! | [`classify`] | Content-type and extension rules |
//! | [`config`] | TOML configuration |
//! | [`error`] | `AcquireError` |
//! | [`ident`] | Document identifiers |
//! | [`inventory`] | Listing sidecars and `.done` markers |
//! | [`meta`] | Sidecar read/write |
//! | [`models`] | `RawDoc` and `SourceType` |

pub mod acquire;
mod acquire_file;
mod acquire_url;
pub mod classify;
pub mod config;
pub mod error;
pub mod ident;
pub mod inventory;
pub mod meta;
pub mod models;

pub use acquire::{acquire, acquire_file, acquire_url, AcquireRequest, Acquirer};
pub use error::{AcquireError, ErrorCategory};
pub use ident::{DocumentId, IdGenerator, RandomIdGenerator};
pub use models::{RawDoc, SourceType};
