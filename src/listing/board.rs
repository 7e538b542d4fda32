// src/listing/board.rs
//! Job board platform detection and the per-platform CSS selector tables.

use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;
use tracing::debug;

use regex::Regex;

static POSTING_CLASS: OnceLock<Regex> = OnceLock::new();

/// Matches a `class` attribute whose value mentions "posting", the marker
/// Lever-rendered boards carry on each listing element. A substring check,
/// so variants like `job-postings` count too.
fn posting_class() -> &'static Regex {
    POSTING_CLASS.get_or_init(|| {
        Regex::new(r#"class\s*=\s*["'][^"']*posting"#).expect("posting class pattern")
    })
}

/// Hosted job board platforms recognized by URL or markup. Platforms
/// without a selector table fall through to the generic container cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobBoard {
    Greenhouse,
    Lever,
    BambooHr,
    Workday,
    SmartRecruiters,
    Jobvite,
    Icims,
    SuccessFactors,
    ApplyToJob,
    Generic,
}

/// URL fragments that identify a hosted platform. Checked in order against
/// the lowercased page URL.
const URL_PATTERNS: &[(&str, JobBoard)] = &[
    ("greenhouse.io", JobBoard::Greenhouse),
    ("lever.co", JobBoard::Lever),
    ("bamboohr.com", JobBoard::BambooHr),
    ("myworkdayjobs.com", JobBoard::Workday),
    ("workday.com", JobBoard::Workday),
    ("smartrecruiters.com", JobBoard::SmartRecruiters),
    ("jobvite.com", JobBoard::Jobvite),
    ("icims.com", JobBoard::Icims),
    ("successfactors.com", JobBoard::SuccessFactors),
    ("applytojob.com", JobBoard::ApplyToJob),
];

impl JobBoard {
    /// Decide which platform served a page. The URL is checked first; when
    /// it gives nothing away, platform fingerprints in the markup decide.
    /// Anything unrecognized is `Generic`.
    pub fn classify(url: &str, html: &str) -> JobBoard {
        let url_lower = url.to_lowercase();
        for (fragment, board) in URL_PATTERNS {
            if url_lower.contains(fragment) {
                debug!(%board, fragment, "job board classified by url");
                return *board;
            }
        }

        let html_lower = html.to_lowercase();
        let board = if html_lower.contains("data-qa=") && html_lower.contains("greenhouse") {
            JobBoard::Greenhouse
        } else if html_lower.contains("data-qa=") && html_lower.contains("bamboohr") {
            JobBoard::BambooHr
        } else if html_lower.contains("data-automation-id=") {
            JobBoard::Workday
        } else if posting_class().is_match(&html_lower) {
            JobBoard::Lever
        } else {
            JobBoard::Generic
        };

        debug!(%board, "job board classified by markup");
        board
    }

    pub fn label(&self) -> &'static str {
        match self {
            JobBoard::Greenhouse => "greenhouse",
            JobBoard::Lever => "lever",
            JobBoard::BambooHr => "bamboohr",
            JobBoard::Workday => "workday",
            JobBoard::SmartRecruiters => "smartrecruiters",
            JobBoard::Jobvite => "jobvite",
            JobBoard::Icims => "icims",
            JobBoard::SuccessFactors => "successfactors",
            JobBoard::ApplyToJob => "applytojob",
            JobBoard::Generic => "generic",
        }
    }

    /// Whether this platform has a dedicated selector table. The rest are
    /// recognized by URL only and use the generic cascade.
    pub fn has_native_selectors(&self) -> bool {
        !self.container_selectors().is_empty()
    }

    /// Selectors that pick out one listing element per job.
    pub fn container_selectors(&self) -> &'static [&'static str] {
        match self {
            JobBoard::Greenhouse => &[r#"[data-qa="opening"]"#, ".opening"],
            JobBoard::Lever => &[".posting"],
            JobBoard::BambooHr => &[r#"[data-qa="job-listing"]"#, ".BambooHR-ATS-Jobs-Item"],
            JobBoard::Workday => &[r#"[data-automation-id="jobTitle"]"#, ".css-1f7j1dc"],
            _ => &[],
        }
    }

    /// Selectors for the job title inside a container.
    pub fn title_selectors(&self) -> &'static [&'static str] {
        match self {
            JobBoard::Greenhouse => &[r#"[data-qa="opening-title"]"#, ".opening a"],
            JobBoard::Lever => &[".posting-title a", ".posting-name"],
            JobBoard::BambooHr => &[r#"[data-qa="job-title"]"#, ".BambooHR-ATS-Jobs-Item-Name a"],
            JobBoard::Workday => &[r#"[data-automation-id="jobTitle"] a"#, "h3 a"],
            _ => &[],
        }
    }

    /// Selectors for the location text inside a container.
    pub fn location_selectors(&self) -> &'static [&'static str] {
        match self {
            JobBoard::Greenhouse => &[r#"[data-qa="opening-location"]"#, ".location"],
            JobBoard::Lever => &[".posting-location"],
            JobBoard::BambooHr => {
                &[r#"[data-qa="job-location"]"#, ".BambooHR-ATS-Jobs-Item-Location"]
            }
            JobBoard::Workday => &[r#"[data-automation-id="locations"]"#],
            _ => &[],
        }
    }
}

impl fmt::Display for JobBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Selector;

    #[test]
    fn test_classify_by_url() {
        assert_eq!(JobBoard::classify("https://boards.greenhouse.io/acme", ""), JobBoard::Greenhouse);
        assert_eq!(JobBoard::classify("https://jobs.lever.co/acme", ""), JobBoard::Lever);
        assert_eq!(JobBoard::classify("https://acme.bamboohr.com/careers", ""), JobBoard::BambooHr);
        assert_eq!(
            JobBoard::classify("https://acme.wd5.myworkdayjobs.com/en-US/ext", ""),
            JobBoard::Workday
        );
        assert_eq!(
            JobBoard::classify("https://careers.smartrecruiters.com/Acme", ""),
            JobBoard::SmartRecruiters
        );
        assert_eq!(JobBoard::classify("https://jobs.jobvite.com/acme", ""), JobBoard::Jobvite);
        assert_eq!(JobBoard::classify("https://careers-acme.icims.com/jobs", ""), JobBoard::Icims);
        assert_eq!(
            JobBoard::classify("https://career5.successfactors.com/career?company=acme", ""),
            JobBoard::SuccessFactors
        );
        assert_eq!(JobBoard::classify("https://acme.applytojob.com/apply", ""), JobBoard::ApplyToJob);
    }

    #[test]
    fn test_url_wins_over_markup() {
        let workday_markup = r#"<div data-automation-id="jobTitle">Engineer</div>"#;
        assert_eq!(
            JobBoard::classify("https://boards.greenhouse.io/acme", workday_markup),
            JobBoard::Greenhouse
        );
    }

    #[test]
    fn test_classify_by_markup_fingerprints() {
        let greenhouse = r#"<div data-qa="opening">x</div><!-- greenhouse embed -->"#;
        assert_eq!(JobBoard::classify("https://acme.com/careers", greenhouse), JobBoard::Greenhouse);

        let bamboo = r#"<div data-qa="job-listing">x</div><script src="bamboohr.js"></script>"#;
        assert_eq!(JobBoard::classify("https://acme.com/careers", bamboo), JobBoard::BambooHr);

        let workday = r#"<div data-automation-id="jobResults">x</div>"#;
        assert_eq!(JobBoard::classify("https://acme.com/careers", workday), JobBoard::Workday);

        let lever = r#"<div class="posting"><a class="posting-title">x</a></div>"#;
        assert_eq!(JobBoard::classify("https://acme.com/careers", lever), JobBoard::Lever);
    }

    #[test]
    fn test_posting_class_substring_is_lever() {
        let html = r#"<ul class="job-postings"><li>Open roles</li></ul>"#;
        assert_eq!(JobBoard::classify("https://acme.com/careers", html), JobBoard::Lever);
    }

    #[test]
    fn test_posting_word_in_prose_is_not_lever() {
        let html = "<p>See all our open postings below.</p>";
        assert_eq!(JobBoard::classify("https://acme.com/careers", html), JobBoard::Generic);
    }

    #[test]
    fn test_unrecognized_falls_back_to_generic() {
        assert_eq!(JobBoard::classify("https://acme.com/careers", "<div>hi</div>"), JobBoard::Generic);
    }

    #[test]
    fn test_native_selector_coverage() {
        for board in [JobBoard::Greenhouse, JobBoard::Lever, JobBoard::BambooHr, JobBoard::Workday] {
            assert!(board.has_native_selectors());
            assert!(!board.title_selectors().is_empty());
            assert!(!board.location_selectors().is_empty());
        }
        for board in [
            JobBoard::SmartRecruiters,
            JobBoard::Jobvite,
            JobBoard::Icims,
            JobBoard::SuccessFactors,
            JobBoard::ApplyToJob,
            JobBoard::Generic,
        ] {
            assert!(!board.has_native_selectors());
        }
    }

    #[test]
    fn test_all_selectors_parse() {
        let boards = [
            JobBoard::Greenhouse,
            JobBoard::Lever,
            JobBoard::BambooHr,
            JobBoard::Workday,
            JobBoard::Generic,
        ];
        for board in boards {
            for sel in board
                .container_selectors()
                .iter()
                .chain(board.title_selectors())
                .chain(board.location_selectors())
            {
                assert!(Selector::parse(sel).is_ok(), "selector failed to parse: {sel}");
            }
        }
    }

    #[test]
    fn test_labels_are_lowercase() {
        for board in [JobBoard::Greenhouse, JobBoard::SuccessFactors, JobBoard::Generic] {
            assert_eq!(board.label(), board.label().to_lowercase());
        }
    }
}
