// src/report.rs
//! Writing scan results: a CSV in the long-standing column layout and a
//! JSON document mirroring it for downstream tooling.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;
use tracing::info;

use crate::record::JobRecord;
use crate::text::snippet_of;

/// The description column stays short in the CSV; the JSON report keeps
/// the full snippet.
const CSV_DESCRIPTION_CHARS: usize = 200;

pub fn write_csv(records: &[JobRecord], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file {}", path.display()))?;

    writer
        .write_record(["Company", "Title", "Location", "URL", "Source", "Description"])
        .context("Failed to write CSV header")?;

    for record in records {
        let description = snippet_of(&record.snippet, CSV_DESCRIPTION_CHARS);
        writer
            .write_record([
                record.company.as_str(),
                record.title.as_str(),
                record.location.as_deref().unwrap_or(""),
                record.url.as_str(),
                record.source.label(),
                description.as_str(),
            ])
            .context("Failed to write CSV row")?;
    }

    writer.flush().context("Failed to flush CSV file")?;
    info!(records = records.len(), path = %path.display(), "jobs saved to csv");
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct ScanReport<'a> {
    pub scan_date: DateTime<Utc>,
    pub total_jobs: usize,
    pub jobs: &'a [JobRecord],
}

pub fn write_json(records: &[JobRecord], path: &Path) -> Result<()> {
    let report = ScanReport { scan_date: Utc::now(), total_jobs: records.len(), jobs: records };
    let content =
        serde_json::to_string_pretty(&report).context("Failed to serialize scan report")?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write JSON report {}", path.display()))?;
    info!(records = records.len(), path = %path.display(), "jobs saved to json");
    Ok(())
}
