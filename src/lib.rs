// src/lib.rs
//! Careers-page scanner: classify which job board platform served a
//! page, locate the listing containers, extract keyword-matched job
//! records and dedupe them across one scan.

pub mod cli;
pub mod config;
pub mod dedupe;
pub mod fetch;
pub mod listing;
pub mod record;
pub mod report;
pub mod scan;
pub mod text;

pub use config::{CompanyEntry, ScanConfig};
pub use dedupe::{dedupe, DedupIndex};
pub use fetch::{FetchError, PageFetcher};
pub use listing::board::JobBoard;
pub use listing::keywords::{KeywordMatches, Taxonomy};
pub use listing::{extract_page, ExtractOptions, PageInput};
pub use record::JobRecord;
pub use scan::{run_scan, ScanOutcome, ScanSummary};
