// src/dedupe.rs
//! Duplicate suppression across one scan. A record is admitted once and
//! every later sighting of it, under any of the derived keys, is dropped.
//! First occurrence wins and output order is input order.

use std::collections::HashSet;
use tracing::debug;

use crate::record::JobRecord;
use crate::text::{first_two_words, normalize, strip_punctuation};

/// Running index of everything admitted so far. One scan owns exactly one
/// index and feeds it from a single task.
#[derive(Debug)]
pub struct DedupIndex {
    fuzzy_title_prefix: bool,
    identities: HashSet<String>,
    titles: HashSet<(String, String)>,
    bare_titles: HashSet<(String, String)>,
    prefixes: HashSet<(String, String)>,
}

impl Default for DedupIndex {
    fn default() -> Self {
        DedupIndex::new(true)
    }
}

impl DedupIndex {
    /// `fuzzy_title_prefix` enables the coarsest rule: two titles at the
    /// same company sharing their first two words are treated as the same
    /// posting. That collapses "Senior PM, Platform" and "Senior PM,
    /// Growth", so it can be turned off per scan.
    pub fn new(fuzzy_title_prefix: bool) -> Self {
        DedupIndex {
            fuzzy_title_prefix,
            identities: HashSet::new(),
            titles: HashSet::new(),
            bare_titles: HashSet::new(),
            prefixes: HashSet::new(),
        }
    }

    /// Check a record against the index and, if it is new, remember all of
    /// its derived keys. Returns whether the record was new.
    pub fn admit(&mut self, record: &JobRecord) -> bool {
        let company = normalize(&record.company);
        let title = normalize(&record.title);
        let bare_title = strip_punctuation(&title);
        let prefix = first_two_words(&title);

        let rule = if self.identities.contains(&record.identity) {
            Some("identity")
        } else if self.titles.contains(&(company.clone(), title.clone())) {
            Some("company-title")
        } else if self.bare_titles.contains(&(company.clone(), bare_title.clone())) {
            Some("company-title-bare")
        } else if self.fuzzy_title_prefix
            && self.prefixes.contains(&(company.clone(), prefix.clone()))
        {
            Some("title-prefix")
        } else {
            None
        };

        if let Some(rule) = rule {
            debug!(company = %record.company, title = %record.title, rule, "duplicate record dropped");
            return false;
        }

        self.identities.insert(record.identity.clone());
        self.titles.insert((company.clone(), title));
        self.bare_titles.insert((company.clone(), bare_title));
        self.prefixes.insert((company, prefix));
        true
    }
}

/// Filter a record sequence through the index, keeping first occurrences
/// in their original order.
pub fn dedupe(records: impl IntoIterator<Item = JobRecord>, index: &mut DedupIndex) -> Vec<JobRecord> {
    let mut kept = Vec::new();
    for record in records {
        if index.admit(&record) {
            kept.push(record);
        }
    }
    kept
}
