// src/record.rs
//! The one output entity of a scan: a job posting with its provenance,
//! keyword matches and a stable dedup identity. Records are never mutated
//! after construction.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::listing::board::JobBoard;
use crate::listing::keywords::KeywordMatches;
use crate::text::{normalize, url_without_query};

#[derive(Debug, Clone, Serialize)]
pub struct JobRecord {
    pub company: String,
    pub title: String,
    pub url: String,
    pub location: Option<String>,
    pub source: JobBoard,
    pub core_matches: Vec<String>,
    pub modifier_matches: Vec<String>,
    /// Leading text of the container the record came from, for review.
    pub snippet: String,
    pub discovered_at: DateTime<Utc>,
    pub identity: String,
}

impl JobRecord {
    /// Identity and matches are fixed here; nothing downstream rewrites a
    /// record.
    pub fn new(
        company: &str,
        title: String,
        url: String,
        location: Option<String>,
        source: JobBoard,
        matches: KeywordMatches,
        snippet: String,
    ) -> Self {
        let identity = identity_hash(company, &title, &url);
        JobRecord {
            company: company.to_string(),
            title,
            url,
            location,
            source,
            core_matches: matches.core,
            modifier_matches: matches.modifiers,
            snippet,
            discovered_at: Utc::now(),
            identity,
        }
    }
}

/// Stable dedup key for a posting: company, title and URL (query string
/// and fragment dropped), each normalized, hashed together. The same
/// posting seen twice in a scan, or via a tracking-parameter variant of
/// its URL, hashes identically.
pub fn identity_hash(company: &str, title: &str, url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(normalize(company));
    hasher.update("|");
    hasher.update(normalize(title));
    hasher.update("|");
    hasher.update(normalize(&url_without_query(url)));
    format!("{:x}", hasher.finalize())
}
