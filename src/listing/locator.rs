// src/listing/locator.rs
//! Locating the sub-regions of a page that plausibly hold one job posting
//! each. Known platforms use their selector tables; everything else runs a
//! cascade of generic heuristics that degrades to whole-page matching.

use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

use super::board::JobBoard;
use super::element_text;

/// Class and attribute markers job listing markup tends to carry.
const GENERIC_CONTAINER_SELECTORS: &[&str] = &[
    ".job",
    ".position",
    ".opening",
    ".career",
    ".role",
    ".opportunity",
    r#"[class*="job"]"#,
    r#"[class*="position"]"#,
    r#"[class*="career"]"#,
    r#"[data-testid*="job"]"#,
    r#"[data-qa*="job"]"#,
];

const HEADING_SELECTOR: &str = "h1, h2, h3, h4, h5, h6";

/// Words that make a heading read like a role title rather than page chrome.
const ROLE_WORDS: &[&str] =
    &["manager", "analyst", "engineer", "director", "specialist", "coordinator"];

/// How many ancestor levels to climb from a role heading toward its
/// listing container.
const MAX_ANCESTOR_HOPS: usize = 3;

/// Text-length window for an ancestor to count as a single posting.
/// Shorter is just the title fragment; longer likely spans several
/// postings or unrelated page chrome.
const MIN_CONTAINER_TEXT: usize = 50;
const MAX_CONTAINER_TEXT: usize = 2000;

/// Which locate step produced a container. Logged per page so selector
/// drift on a platform shows up in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocateStrategy {
    Platform,
    ClassPattern,
    HeadingWalk,
    WholeDocument,
}

impl fmt::Display for LocateStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LocateStrategy::Platform => "platform-selector",
            LocateStrategy::ClassPattern => "class-pattern",
            LocateStrategy::HeadingWalk => "heading-walk",
            LocateStrategy::WholeDocument => "whole-document",
        };
        f.write_str(name)
    }
}

/// A region of the parsed document believed to hold one posting. Valid
/// only for the lifetime of the extraction pass over its document.
#[derive(Debug, Clone, Copy)]
pub struct JobContainer<'a> {
    pub element: ElementRef<'a>,
    pub strategy: LocateStrategy,
}

/// Find up to `limit` job containers in a classified page.
///
/// Platforms with native selectors use those and nothing else; an empty
/// result there means the page really lists no jobs (or the platform
/// changed its markup) and is reported as zero jobs, not retried
/// generically. Unrecognized pages run the cascade: class patterns, then
/// role-word headings walked up to a reasonably sized ancestor, then the
/// whole document as a single container.
pub fn locate<'a>(board: JobBoard, doc: &'a Html, limit: usize) -> Vec<JobContainer<'a>> {
    if limit == 0 {
        return Vec::new();
    }

    if board.has_native_selectors() {
        let containers =
            select_containers(doc, board.container_selectors(), LocateStrategy::Platform, limit);
        debug!(%board, containers = containers.len(), "located containers via platform selectors");
        return containers;
    }

    let containers =
        select_containers(doc, GENERIC_CONTAINER_SELECTORS, LocateStrategy::ClassPattern, limit);
    if !containers.is_empty() {
        debug!(containers = containers.len(), "located containers via class patterns");
        return containers;
    }

    let containers = heading_walk(doc, limit);
    if !containers.is_empty() {
        debug!(containers = containers.len(), "located containers via role headings");
        return containers;
    }

    debug!("no containers located, falling back to whole document");
    vec![JobContainer { element: doc.root_element(), strategy: LocateStrategy::WholeDocument }]
}

/// Union of all elements matched by `selectors`, in selector order, with
/// exact repeats dropped.
fn select_containers<'a>(
    doc: &'a Html,
    selectors: &[&str],
    strategy: LocateStrategy,
    limit: usize,
) -> Vec<JobContainer<'a>> {
    let mut seen = HashSet::new();
    let mut containers = Vec::new();

    for raw in selectors {
        let Ok(selector) = Selector::parse(raw) else {
            continue;
        };
        for element in doc.select(&selector) {
            if seen.insert(element.id()) {
                containers.push(JobContainer { element, strategy });
                if containers.len() == limit {
                    return containers;
                }
            }
        }
    }

    containers
}

/// Headings containing a role word, climbed up to `MAX_ANCESTOR_HOPS`
/// levels to the first ancestor whose text length falls inside the
/// single-posting window.
fn heading_walk<'a>(doc: &'a Html, limit: usize) -> Vec<JobContainer<'a>> {
    let Ok(headings) = Selector::parse(HEADING_SELECTOR) else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut containers = Vec::new();

    for heading in doc.select(&headings) {
        let text = element_text(heading).to_lowercase();
        if !ROLE_WORDS.iter().any(|word| text.contains(word)) {
            continue;
        }

        for ancestor in heading.ancestors().filter_map(ElementRef::wrap).take(MAX_ANCESTOR_HOPS) {
            let length = element_text(ancestor).chars().count();
            if (MIN_CONTAINER_TEXT..=MAX_CONTAINER_TEXT).contains(&length) {
                if seen.insert(ancestor.id()) {
                    containers
                        .push(JobContainer { element: ancestor, strategy: LocateStrategy::HeadingWalk });
                    if containers.len() == limit {
                        return containers;
                    }
                }
                break;
            }
        }
    }

    containers
}
