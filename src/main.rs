//! # rawdoc CLI
//!
//! Thin command-line wrapper over the `rawdoc_acquire` library.
//!
//! | Command | Description |
//! |---------|-------------|
//! | `rawdoc acquire --url <URL>` | Fetch a URL into the rawdocs directory |
//! | `rawdoc acquire --file <PATH>` | Import a local file |
//! | `rawdoc show <ID>` | Print a RawDoc sidecar |
//! | `rawdoc list` | List RawDocs and whether they have been processed |
//!
//! `acquire` prints only the absolute sidecar path on stdout, so it can be
//! captured by the next pipeline stage. Logs go to stderr (`RUST_LOG`).

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rawdoc_acquire::config::{self, Config};
use rawdoc_acquire::{inventory, meta, AcquireRequest, Acquirer, DocumentId};

const DEFAULT_CONFIG_PATH: &str = "./config/rawdoc.toml";

/// Acquire documents into a rawdocs directory and record their provenance.
#[derive(Parser)]
#[command(name = "rawdoc", version)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/rawdoc.toml`, which is skipped when absent.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// RawDocs directory. Overrides `[acquire].rawdocs_dir`.
    #[arg(long, global = true)]
    rawdocs: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a URL or import a local file.
    ///
    /// Writes `<id><ext>` and `<id>.meta.json` and prints the absolute path
    /// of the metadata file. `--file` wins when both sources are given.
    Acquire {
        /// Fetch from this URL.
        #[arg(long)]
        url: Option<String>,

        /// Import from this local file.
        #[arg(long)]
        file: Option<PathBuf>,

        /// Original location of an imported file (e.g. the page URL of a saved copy).
        #[arg(long)]
        source_uri: Option<String>,

        /// HTTP timeout in seconds. Overrides `[acquire].timeout_secs`.
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Print the metadata sidecar of a document.
    Show {
        /// Document id (hyphenated lowercase UUID).
        id: String,
    },

    /// List the RawDocs in the rawdocs directory.
    List {
        /// Only show documents without a `.done` marker.
        #[arg(long)]
        pending: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("rawdoc_acquire=warn")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let cfg = resolve_config(cli.config.as_deref())?;
    let rawdocs_dir =
        resolve_rawdocs_dir(cli.rawdocs.as_deref().unwrap_or(&cfg.acquire.rawdocs_dir))?;

    match cli.command {
        Commands::Acquire {
            url,
            file,
            source_uri,
            timeout,
        } => {
            let timeout_secs = timeout.unwrap_or(cfg.acquire.timeout_secs);
            if timeout_secs == 0 {
                anyhow::bail!("--timeout must be > 0");
            }
            let request = AcquireRequest {
                url,
                file,
                source_uri,
                timeout: Duration::from_secs(timeout_secs),
            };

            let mut acquirer = Acquirer::new();
            if let Some(ua) = &cfg.acquire.user_agent {
                acquirer = acquirer.user_agent(ua.clone());
            }

            let meta_path = acquirer.acquire(&request, &rawdocs_dir).map_err(|e| {
                if e.is_fatal() {
                    tracing::error!(error = %e, "cannot continue");
                }
                anyhow::Error::new(e)
            })?;
            println!("{}", meta_path.display());
        }
        Commands::Show { id } => {
            let id = DocumentId::parse(&id)?;
            let rawdoc = meta::load_meta(&rawdocs_dir, &id.to_string())?;
            println!("{}", serde_json::to_string_pretty(&rawdoc)?);
        }
        Commands::List { pending } => {
            let entries = inventory::list_rawdocs(&rawdocs_dir)?;
            let shown: Vec<&inventory::RawDocEntry> = if pending {
                inventory::pending(&entries)
            } else {
                entries.iter().collect()
            };
            for entry in shown {
                println!(
                    "{}\t{}\t{}\t{}",
                    entry.rawdoc.document_id,
                    entry.rawdoc.source_type,
                    if entry.processed { "processed" } else { "pending" },
                    entry.rawdoc.source_uri
                );
            }
        }
    }

    Ok(())
}

/// An explicit `--config` must load; the default path is optional.
fn resolve_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(p) => config::load_config(p),
        None => {
            let default = Path::new(DEFAULT_CONFIG_PATH);
            if default.exists() {
                config::load_config(default)
            } else {
                Ok(Config::minimal())
            }
        }
    }
}

/// Relative directories are taken from the current working directory.
fn resolve_rawdocs_dir(dir: &Path) -> Result<PathBuf> {
    if dir.as_os_str().is_empty() {
        anyhow::bail!("rawdocs directory must not be empty");
    }
    std::path::absolute(dir)
        .with_context(|| format!("Failed to resolve rawdocs directory: {}", dir.display()))
}
