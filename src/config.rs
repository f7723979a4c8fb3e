//! TOML configuration for the `rawdoc` binary.
//!
//! ```toml
//! [acquire]
//! rawdocs_dir = "data/rawdocs"
//! timeout_secs = 30
//! # user_agent = "rawdoc-acquire/0.1"
//! ```
//!
//! Every key is optional. Command-line flags override these values.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub acquire: AcquireConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AcquireConfig {
    #[serde(default = "default_rawdocs_dir")]
    pub rawdocs_dir: PathBuf,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for AcquireConfig {
    fn default() -> Self {
        Self {
            rawdocs_dir: default_rawdocs_dir(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}

fn default_rawdocs_dir() -> PathBuf {
    PathBuf::from("data/rawdocs")
}
fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl AcquireConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Built-in defaults, used when no config file is present.
    pub fn minimal() -> Self {
        Self::default()
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

pub fn validate(config: &Config) -> Result<()> {
    if config.acquire.timeout_secs == 0 {
        anyhow::bail!("acquire.timeout_secs must be > 0");
    }
    if config.acquire.rawdocs_dir.as_os_str().is_empty() {
        anyhow::bail!("acquire.rawdocs_dir must not be empty");
    }
    Ok(())
}
