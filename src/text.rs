// src/text.rs
use url::Url;

/// Collapse messy markup-derived text into a single clean line.
///
/// Drops empty lines, trims the rest, and squeezes all runs of whitespace
/// (including non-breaking spaces) down to single spaces.
pub fn clean_text(text: &str) -> String {
    text.lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .replace('\u{a0}', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalize a string for matching and identity: lowercase, trimmed,
/// whitespace collapsed.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Drop everything that is not alphanumeric or whitespace, then collapse.
/// Used for the punctuation-insensitive dedup key.
pub fn strip_punctuation(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// First two whitespace-separated words of a string (fewer if the string is
/// shorter). Used for the fuzzy title-prefix dedup key.
pub fn first_two_words(text: &str) -> String {
    text.split_whitespace()
        .take(2)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Strip the query string and fragment from a URL so tracking parameters
/// never influence record identity.
pub fn url_without_query(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(mut url) => {
            url.set_query(None);
            url.set_fragment(None);
            url.to_string()
        }
        // Not a parseable absolute URL; cut at the first ? or # instead.
        Err(_) => {
            let end = raw.find(&['?', '#'][..]).unwrap_or(raw.len());
            raw[..end].to_string()
        }
    }
}

/// Resolve an anchor href against the page it was found on.
///
/// Returns `None` for hrefs that can never lead to a job posting: bare
/// fragments, mailto:/tel:/javascript: pseudo-links, or anything that fails
/// to resolve.
pub fn resolve_href(page_url: &str, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }
    let lower = href.to_lowercase();
    if lower.starts_with("mailto:") || lower.starts_with("tel:") || lower.starts_with("javascript:")
    {
        return None;
    }

    let base = Url::parse(page_url).ok()?;
    base.join(href).ok().map(|url| url.to_string())
}

/// First `max_chars` characters of a string, on char boundaries.
pub fn snippet_of(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_collapses_markup_whitespace() {
        assert_eq!(
            clean_text("  Senior\n\n   Product\t Manager  \n"),
            "Senior Product Manager"
        );
        assert_eq!(clean_text("Remote\u{a0}— Anywhere"), "Remote — Anywhere");
        assert_eq!(clean_text("\n\n  \n"), "");
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Senior   Product MANAGER "), "senior product manager");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_strip_punctuation() {
        assert_eq!(
            strip_punctuation("Senior Product Manager, Platform!"),
            "Senior Product Manager Platform"
        );
        assert_eq!(strip_punctuation("Ops/IT - Lead"), "Ops IT Lead");
    }

    #[test]
    fn test_first_two_words() {
        assert_eq!(first_two_words("senior product manager"), "senior product");
        assert_eq!(first_two_words("director"), "director");
        assert_eq!(first_two_words(""), "");
    }

    #[test]
    fn test_url_without_query_strips_tracking() {
        assert_eq!(
            url_without_query("https://acme.example/jobs/42?utm_source=scan&ref=x#apply"),
            "https://acme.example/jobs/42"
        );
        assert_eq!(
            url_without_query("https://acme.example/jobs/42"),
            "https://acme.example/jobs/42"
        );
        // Unparseable input degrades to plain truncation.
        assert_eq!(url_without_query("not a url?x=1"), "not a url");
    }

    #[test]
    fn test_resolve_href() {
        assert_eq!(
            resolve_href("https://acme.example/careers", "/jobs/42").as_deref(),
            Some("https://acme.example/jobs/42")
        );
        assert_eq!(
            resolve_href("https://acme.example/careers", "https://boards.greenhouse.io/acme/jobs/1")
                .as_deref(),
            Some("https://boards.greenhouse.io/acme/jobs/1")
        );
        assert_eq!(resolve_href("https://acme.example/careers", "#openings"), None);
        assert_eq!(resolve_href("https://acme.example/careers", "mailto:hr@acme.example"), None);
        assert_eq!(resolve_href("https://acme.example/careers", "javascript:void(0)"), None);
    }

    #[test]
    fn test_snippet_of_respects_char_boundaries() {
        assert_eq!(snippet_of("héllo wörld", 5), "héllo");
        assert_eq!(snippet_of("short", 300), "short");
    }
}
