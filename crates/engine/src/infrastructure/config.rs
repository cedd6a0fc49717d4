//! Application configuration

use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{bail, ensure, Context, Result};

/// Default cap on steps entered by one automatic playthrough
pub const DEFAULT_STEP_LIMIT: usize = 256;

/// Campaign storage backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Sqlite,
    Memory,
}

impl FromStr for StoreKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "memory" => Ok(Self::Memory),
            other => bail!("unknown campaign store '{}' (expected sqlite or memory)", other),
        }
    }
}

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Campaign storage backend: "sqlite" or "memory"
    pub store: StoreKind,
    /// SQLite database path (if using sqlite store)
    pub db_path: String,
    /// Campaign guide JSON file
    pub guide_path: Option<PathBuf>,
    /// Max steps entered by one playthrough before giving up
    pub step_limit: usize,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let step_limit = match lookup("GUIDEKEEPER_STEP_LIMIT") {
            Some(value) => value
                .trim()
                .parse()
                .context("GUIDEKEEPER_STEP_LIMIT must be a positive integer")?,
            None => DEFAULT_STEP_LIMIT,
        };
        ensure!(step_limit > 0, "GUIDEKEEPER_STEP_LIMIT must be a positive integer");

        Ok(Self {
            store: lookup("GUIDEKEEPER_STORE")
                .unwrap_or_else(|| "sqlite".to_string())
                .parse()
                .context("GUIDEKEEPER_STORE must be sqlite or memory")?,
            db_path: lookup("GUIDEKEEPER_DB_PATH")
                .unwrap_or_else(|| "./data/campaigns.db".to_string()),
            guide_path: lookup("GUIDEKEEPER_GUIDE_PATH")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
            step_limit,
        })
    }

    /// The guide path, required by the binary.
    pub fn require_guide_path(&self) -> Result<&Path> {
        self.guide_path
            .as_deref()
            .context("GUIDEKEEPER_GUIDE_PATH environment variable is required")
    }
}
