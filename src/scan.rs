// src/scan.rs
//! One scan run: fetch every configured careers page across a bounded
//! worker pool, extract records per page, then dedupe everything once in
//! a single aggregation pass. The dedup index is only ever touched here,
//! after workers have finished their pages.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::config::ScanConfig;
use crate::dedupe::{dedupe, DedupIndex};
use crate::fetch::{FetchError, PageFetcher};
use crate::listing::keywords::Taxonomy;
use crate::listing::{extract_page, ExtractOptions};
use crate::record::JobRecord;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanSummary {
    pub companies_scanned: usize,
    /// Companies whose page could not be fetched, as opposed to pages
    /// that fetched fine and held no matching postings.
    pub failures: usize,
    pub records_extracted: usize,
    pub records_kept: usize,
}

#[derive(Debug)]
pub struct ScanOutcome {
    pub records: Vec<JobRecord>,
    pub summary: ScanSummary,
}

type WorkerHandle = JoinHandle<Result<Vec<JobRecord>, FetchError>>;

/// Scan every configured company. Workers run fetch and extraction
/// concurrently under the semaphore; results are joined in configuration
/// order so dedup admission is deterministic.
pub async fn run_scan(config: &ScanConfig) -> ScanOutcome {
    if config.companies.is_empty() {
        warn!("no companies configured, nothing to scan");
        return ScanOutcome { records: Vec::new(), summary: ScanSummary::default() };
    }

    info!(companies = config.companies.len(), "starting scan");

    let taxonomy = Arc::new(Taxonomy::load(config.keywords.iter()));
    let fetcher = Arc::new(PageFetcher::new(config.timeout_seconds));
    let limit = Arc::new(Semaphore::new(config.workers.max(1)));
    let delay = Duration::from_millis(config.request_delay_ms);
    let options = ExtractOptions { max_containers: config.max_containers_per_page };

    let mut handles: Vec<(String, WorkerHandle)> = Vec::new();
    for company in &config.companies {
        let taxonomy = Arc::clone(&taxonomy);
        let fetcher = Arc::clone(&fetcher);
        let limit = Arc::clone(&limit);
        let options = options.clone();
        let name = company.name.clone();
        let url = company.careers_url.clone();

        let handle = tokio::spawn(async move {
            let _permit = limit.acquire_owned().await.expect("scan semaphore closed");
            tokio::time::sleep(delay).await;

            let page = fetcher.fetch_page(&name, &url).await?;
            let records = extract_page(&page, &taxonomy, &options);
            if records.is_empty() {
                info!(company = %name, "no matching postings");
            } else {
                info!(company = %name, records = records.len(), "postings extracted");
            }
            Ok(records)
        });
        handles.push((company.name.clone(), handle));
    }

    let mut summary = ScanSummary::default();
    let mut index = DedupIndex::new(config.fuzzy_title_prefix);
    let mut kept = Vec::new();

    for (company, handle) in handles {
        summary.companies_scanned += 1;
        match handle.await {
            Ok(Ok(records)) => {
                summary.records_extracted += records.len();
                kept.extend(dedupe(records, &mut index));
            }
            Ok(Err(err)) => {
                summary.failures += 1;
                error!(company = %company, error = %err, "careers page fetch failed");
            }
            Err(err) => {
                summary.failures += 1;
                error!(company = %company, error = %err, "scan worker failed");
            }
        }
    }

    summary.records_kept = kept.len();
    info!(
        companies = summary.companies_scanned,
        failures = summary.failures,
        extracted = summary.records_extracted,
        kept = summary.records_kept,
        "scan complete"
    );
    log_company_breakdown(&kept);

    ScanOutcome { records: kept, summary }
}

fn log_company_breakdown(records: &[JobRecord]) {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        *counts.entry(record.company.as_str()).or_default() += 1;
    }

    let mut counts: Vec<_> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    for (company, jobs) in counts {
        info!(company, jobs, "company breakdown");
    }
}
