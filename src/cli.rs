// src/cli.rs
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::{ScanConfig, SAMPLE_CONFIG};
use crate::fetch::PageFetcher;
use crate::listing::board::JobBoard;
use crate::listing::keywords::Taxonomy;
use crate::listing::{extract_page, ExtractOptions};
use crate::report;
use crate::scan::run_scan;

/// Keywords used by `probe` when no config is readable, so a single page
/// can be inspected without any setup.
const PROBE_FALLBACK_KEYWORDS: &[&str] =
    &["product manager", "project manager", "product management", "project management"];

#[derive(Parser)]
#[command(name = "jobscout")]
#[command(about = "Scan careers pages for job postings matching a keyword list")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Scan configuration file
    #[arg(long, default_value = "jobscout.toml")]
    pub config: PathBuf,
}

#[derive(Subcommand)]
pub enum Command {
    /// Scan all configured companies and write reports
    Scan {
        /// CSV output path
        #[arg(long, default_value = "jobs.csv")]
        csv: PathBuf,
        /// Optional JSON report path
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Fetch one page and show how it classifies and extracts
    Probe { company: String, url: String },
    /// Write a starter configuration file
    Init,
}

pub async fn handle_command(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Scan { csv, json } => {
            let config = ScanConfig::load(&cli.config)?;
            let outcome = run_scan(&config).await;

            report::write_csv(&outcome.records, &csv)?;
            if let Some(json) = json {
                report::write_json(&outcome.records, &json)?;
            }
            info!(
                kept = outcome.summary.records_kept,
                failures = outcome.summary.failures,
                "scan finished"
            );
            Ok(())
        }

        Command::Probe { company, url } => probe_page(&cli.config, &company, &url).await,

        Command::Init => {
            if cli.config.exists() {
                anyhow::bail!("refusing to overwrite existing config {}", cli.config.display());
            }
            std::fs::write(&cli.config, SAMPLE_CONFIG)?;
            info!(path = %cli.config.display(), "starter config written");
            Ok(())
        }
    }
}

/// Keywords, timeout and extraction options for a probe: taken from the
/// scan config when it is readable, built-in fallbacks otherwise.
fn probe_settings(config_path: &Path) -> (Vec<String>, u64, ExtractOptions) {
    match ScanConfig::load(config_path) {
        Ok(config) => (
            config.keywords,
            config.timeout_seconds,
            ExtractOptions { max_containers: config.max_containers_per_page },
        ),
        Err(_) => {
            warn!("no readable config, probing with fallback keywords");
            let keywords = PROBE_FALLBACK_KEYWORDS.iter().map(|kw| kw.to_string()).collect();
            (keywords, 30, ExtractOptions::default())
        }
    }
}

/// One-page diagnosis: fetch, classify, extract, log every record. Used
/// when a site stops yielding postings and the question is which stage
/// went quiet.
async fn probe_page(config_path: &Path, company: &str, url: &str) -> Result<()> {
    let (keywords, timeout_seconds, options) = probe_settings(config_path);

    let taxonomy = Taxonomy::load(keywords);
    let fetcher = PageFetcher::new(timeout_seconds);
    let page = fetcher.fetch_page(company, url).await?;
    let board = JobBoard::classify(&page.url, &page.html);
    info!(%board, bytes = page.html.len(), "page fetched and classified");

    let records = extract_page(&page, &taxonomy, &options);
    if records.is_empty() {
        info!("no matching postings on this page");
    }
    for record in &records {
        info!(
            title = %record.title,
            url = %record.url,
            location = record.location.as_deref().unwrap_or("-"),
            core = ?record.core_matches,
            modifiers = ?record.modifier_matches,
            "posting"
        );
    }
    Ok(())
}
