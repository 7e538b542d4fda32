// src/listing/extractor.rs
//! Turning a located container into a job record, when it really holds
//! one. Title extraction runs an ordered list of strategies with
//! first-success-wins semantics; every discard is logged with its reason.

use scraper::{ElementRef, Selector};
use tracing::debug;

use super::board::JobBoard;
use super::element_text;
use super::keywords::Taxonomy;
use super::locator::JobContainer;
use crate::record::JobRecord;
use crate::text::{clean_text, resolve_href, snippet_of};

const HEADING_SELECTOR: &str = "h1, h2, h3, h4, h5, h6";

/// Titles that are navigation chrome, never postings. Compared verbatim
/// against the lowercased candidate.
const BANNED_TITLES: &[&str] = &["apply", "apply now", "learn more", "job opening", "no title found"];

/// A heading must carry one of these for the keyword-heading strategy;
/// mentioning a keyword inside marketing copy is not enough.
const ROLE_INDICATORS: &[&str] = &["manager", "analyst", "director", "specialist", "engineer"];

/// Phrases that mark a candidate title as narrative prose.
const DESCRIPTION_PHRASES: &[&str] = &[
    "we offer",
    "you will",
    "looking for",
    "benefits",
    "about us",
    "our team",
    "join our",
    "responsibilities",
    "qualifications",
];

/// Anchor text or href fragments that point at a specific posting.
const APPLY_PATTERNS: &[&str] = &["apply", "view job", "see details"];

/// Href fragments that suggest a job link when no apply-style anchor exists.
const JOB_HREF_WORDS: &[&str] = &["job", "position", "career", "apply", "vacancy"];

const MIN_TITLE_CHARS: usize = 5;
const MAX_TITLE_CHARS: usize = 100;

/// Snippet length carried on each record for later review.
const SNIPPET_CHARS: usize = 300;

/// Extract one job record from a container, or nothing if the container
/// fails the keyword gate or yields no usable title. Absence is the
/// normal outcome for most containers, not an error.
pub fn extract(
    container: JobContainer<'_>,
    board: JobBoard,
    page_url: &str,
    company: &str,
    taxonomy: &Taxonomy,
) -> Option<JobRecord> {
    let text = element_text(container.element);
    let matches = taxonomy.classify(&text);
    if matches.core.is_empty() {
        debug!(company, strategy = %container.strategy, "container discarded, no core keyword match");
        return None;
    }

    let Some((title, strategy)) = extract_title(container.element, board, &matches.core) else {
        debug!(company, "container discarded, no strategy produced a usable title");
        return None;
    };

    let url = extract_url(container.element, page_url);
    let location = extract_location(container.element, board);
    let snippet = snippet_of(&text, SNIPPET_CHARS);

    debug!(company, %title, strategy, "job record extracted");
    Some(JobRecord::new(company, title, url, location, board, matches, snippet))
}

struct StrategyInput<'a> {
    element: ElementRef<'a>,
    board: JobBoard,
    core_matches: &'a [String],
}

type TitleStrategy = fn(&StrategyInput) -> Option<String>;

/// Ordered title strategies. Each returns a cleaned, already-validated
/// title or nothing; the first hit wins and its name is logged.
const TITLE_STRATEGIES: &[(&str, TitleStrategy)] = &[
    ("platform-selector", title_from_platform_selectors),
    ("keyword-heading", title_from_keyword_heading),
    ("bold-keyword", title_from_bold_text),
    ("first-heading", title_from_first_heading),
    ("first-line", title_from_first_line),
];

fn extract_title(
    element: ElementRef<'_>,
    board: JobBoard,
    core_matches: &[String],
) -> Option<(String, &'static str)> {
    let input = StrategyInput { element, board, core_matches };
    for (name, strategy) in TITLE_STRATEGIES {
        if let Some(title) = strategy(&input) {
            return Some((title, name));
        }
    }
    None
}

/// The platform's own title selectors, tried in table order.
fn title_from_platform_selectors(input: &StrategyInput) -> Option<String> {
    for raw in input.board.title_selectors() {
        let Ok(selector) = Selector::parse(raw) else {
            continue;
        };
        for element in input.element.select(&selector) {
            let title = element_text(element);
            if valid_title(&title) {
                return Some(title);
            }
        }
    }
    None
}

/// A heading mentioning both a matched core keyword and a role word.
/// The double condition rejects headings that merely drop "Manager"
/// into marketing copy.
fn title_from_keyword_heading(input: &StrategyInput) -> Option<String> {
    let Ok(selector) = Selector::parse(HEADING_SELECTOR) else {
        return None;
    };
    for heading in input.element.select(&selector) {
        let title = element_text(heading);
        let lowered = title.to_lowercase();
        let has_keyword = input.core_matches.iter().any(|kw| lowered.contains(kw.as_str()));
        let has_role = ROLE_INDICATORS.iter().any(|word| lowered.contains(word));
        if has_keyword && has_role && valid_title(&title) {
            return Some(title);
        }
    }
    None
}

/// Bold or strong text carrying a matched core keyword.
fn title_from_bold_text(input: &StrategyInput) -> Option<String> {
    let Ok(selector) = Selector::parse("strong, b") else {
        return None;
    };
    for element in input.element.select(&selector) {
        let title = element_text(element);
        let lowered = title.to_lowercase();
        if input.core_matches.iter().any(|kw| lowered.contains(kw.as_str())) && valid_title(&title) {
            return Some(title);
        }
    }
    None
}

/// First heading whose text fits the title window and does not read like
/// prose.
fn title_from_first_heading(input: &StrategyInput) -> Option<String> {
    let Ok(selector) = Selector::parse(HEADING_SELECTOR) else {
        return None;
    };
    for heading in input.element.select(&selector) {
        let title = element_text(heading);
        if valid_title(&title) && !looks_like_description(&title) {
            return Some(title);
        }
    }
    None
}

/// The container's first non-empty text chunk, and only that one. Taking
/// a later line here would turn this into a catch-all that admits prose.
fn title_from_first_line(input: &StrategyInput) -> Option<String> {
    for chunk in input.element.text() {
        let line = clean_text(chunk);
        if line.is_empty() {
            continue;
        }
        if valid_title(&line) && !looks_like_description(&line) {
            return Some(line);
        }
        return None;
    }
    None
}

fn valid_title(title: &str) -> bool {
    let length = title.chars().count();
    if !(MIN_TITLE_CHARS..=MAX_TITLE_CHARS).contains(&length) {
        return false;
    }
    let lowered = title.to_lowercase();
    if BANNED_TITLES.iter().any(|banned| lowered == *banned) {
        debug!(candidate = %title, "title candidate rejected, banned phrase");
        return false;
    }
    true
}

/// Marketing copy detector for the naive strategies: narrative phrases,
/// sentence-heavy punctuation, or a long candidate ending in a period.
fn looks_like_description(text: &str) -> bool {
    let lowered = text.to_lowercase();
    let reason = if DESCRIPTION_PHRASES.iter().any(|phrase| lowered.contains(phrase)) {
        Some("narrative phrase")
    } else if text.matches('.').count() > 2 || text.matches(',').count() > 3 {
        Some("sentence punctuation")
    } else if text.chars().count() > 50 && text.ends_with('.') {
        Some("long line ending in a period")
    } else {
        None
    };

    if let Some(reason) = reason {
        debug!(candidate = %text, reason, "title candidate filtered as description text");
    }
    reason.is_some()
}

/// Pick the job link for a container: an apply-style anchor first, then
/// an href mentioning a job word, then the first anchor, then the page
/// itself. Relative hrefs resolve against the page URL.
fn extract_url(element: ElementRef<'_>, page_url: &str) -> String {
    let Ok(anchors) = Selector::parse("a[href]") else {
        return page_url.to_string();
    };

    let mut job_word_url = None;
    let mut first_url = None;

    for anchor in element.select(&anchors) {
        let href = anchor.value().attr("href").unwrap_or_default();
        let Some(resolved) = resolve_href(page_url, href) else {
            continue;
        };

        let text = element_text(anchor).to_lowercase();
        let href_lower = href.to_lowercase();
        if APPLY_PATTERNS.iter().any(|p| text.contains(p) || href_lower.contains(p)) {
            return resolved;
        }
        if job_word_url.is_none() && JOB_HREF_WORDS.iter().any(|w| href_lower.contains(w)) {
            job_word_url = Some(resolved.clone());
        }
        if first_url.is_none() {
            first_url = Some(resolved);
        }
    }

    job_word_url.or(first_url).unwrap_or_else(|| page_url.to_string())
}

const GENERIC_LOCATION_SELECTORS: &[&str] = &[
    ".location",
    ".city",
    ".office",
    r#"[class*="location"]"#,
    r#"[class*="city"]"#,
    r#"[class*="office"]"#,
];

fn extract_location(element: ElementRef<'_>, board: JobBoard) -> Option<String> {
    for raw in board.location_selectors().iter().chain(GENERIC_LOCATION_SELECTORS) {
        let Ok(selector) = Selector::parse(raw) else {
            continue;
        };
        if let Some(found) = element.select(&selector).next() {
            let location = element_text(found);
            if !location.is_empty() {
                return Some(location);
            }
        }
    }
    None
}
