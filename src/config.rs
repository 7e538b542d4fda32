// src/config.rs
//! Scan configuration: the companies to visit, the keyword list and the
//! knobs for one scan run, loaded from a TOML file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

use crate::listing::DEFAULT_CONTAINER_LIMIT;

#[derive(Debug, Clone, Deserialize)]
pub struct ScanConfig {
    /// Role keywords, in priority order. Duplicates and case variants are
    /// collapsed when the taxonomy is built.
    pub keywords: Vec<String>,
    #[serde(default)]
    pub companies: Vec<CompanyEntry>,
    /// Concurrent page workers.
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// Pause before each request, spread across workers.
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_max_containers")]
    pub max_containers_per_page: usize,
    /// Dedup rule that collapses titles sharing their first two words at
    /// one company. Matches long-standing behavior but suppresses real
    /// sibling roles; disable when a company lists many similar titles.
    #[serde(default = "default_fuzzy_title_prefix")]
    pub fuzzy_title_prefix: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompanyEntry {
    pub name: String,
    pub careers_url: String,
}

fn default_workers() -> usize {
    4
}

fn default_request_delay_ms() -> u64 {
    2000
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_max_containers() -> usize {
    DEFAULT_CONTAINER_LIMIT
}

fn default_fuzzy_title_prefix() -> bool {
    true
}

impl ScanConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml_str(&content)?;

        if config.keywords.is_empty() {
            warn!("config has no keywords, scan will match nothing");
        }
        info!(
            companies = config.companies.len(),
            keywords = config.keywords.len(),
            workers = config.workers,
            "scan configuration loaded"
        );
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse scan config")
    }
}

/// Starter configuration written by `init`.
pub const SAMPLE_CONFIG: &str = r#"# Job scan configuration.

keywords = [
    "product manager",
    "senior product manager",
    "product owner",
    "business analyst",
    "remote",
]

workers = 4
request_delay_ms = 2000
timeout_seconds = 30
max_containers_per_page = 10
fuzzy_title_prefix = true

[[companies]]
name = "Acme"
careers_url = "https://acme.example/careers"

[[companies]]
name = "Zenith"
careers_url = "https://boards.greenhouse.io/zenith"
"#;
