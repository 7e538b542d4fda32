// src/listing/mod.rs
//! The per-page pipeline: classify which board served a page, locate its
//! job containers, extract one record per container. Everything here is
//! synchronous and touches no shared state, so pages can be processed in
//! parallel freely; cross-page dedup happens afterwards.

pub mod board;
pub mod extractor;
pub mod keywords;
pub mod locator;

use scraper::{ElementRef, Html};
use tracing::debug;

use crate::record::JobRecord;
use crate::text::clean_text;
use board::JobBoard;
use keywords::Taxonomy;

/// Ceiling on containers examined per page. Pages are untrusted input
/// and can be arbitrarily large.
pub const DEFAULT_CONTAINER_LIMIT: usize = 10;

/// One fetched page, ready for extraction.
#[derive(Debug, Clone)]
pub struct PageInput {
    pub company: String,
    pub url: String,
    pub html: String,
}

#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub max_containers: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        ExtractOptions { max_containers: DEFAULT_CONTAINER_LIMIT }
    }
}

/// Run classification, location and extraction over one page. Zero
/// records is the normal outcome for a page with no matching postings.
pub fn extract_page(
    page: &PageInput,
    taxonomy: &Taxonomy,
    options: &ExtractOptions,
) -> Vec<JobRecord> {
    let board = JobBoard::classify(&page.url, &page.html);
    let doc = Html::parse_document(&page.html);
    let containers = locator::locate(board, &doc, options.max_containers);
    debug!(
        company = %page.company,
        %board,
        containers = containers.len(),
        "page classified and containers located"
    );

    let mut records = Vec::new();
    for container in containers {
        if let Some(record) =
            extractor::extract(container, board, &page.url, &page.company, taxonomy)
        {
            records.push(record);
        }
    }

    debug!(company = %page.company, records = records.len(), "page extraction finished");
    records
}

/// Flattened, whitespace-normalized text of an element.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    clean_text(&element.text().collect::<Vec<_>>().join(" "))
}
