// src/listing/keywords.rs
//! Keyword taxonomy: the configured role keywords, split into core role
//! terms and modifier terms, with all matching patterns compiled up front.

use regex::Regex;
use std::collections::HashSet;
use tracing::debug;

use crate::text::normalize;

/// Qualifier terms that never identify a role on their own.
const MODIFIER_TERMS: &[&str] = &["remote", "hybrid", "work from home", "telecommute", "virtual"];

/// Separator allowed between the words of a multi-word keyword: whitespace
/// (markup variance), slashes and dashes. Sentence punctuation is excluded
/// so a keyword never matches across a sentence end.
const WORD_SEPARATOR: &str = r"[\s/\-–—]+";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordCategory {
    Core,
    Modifier,
}

impl KeywordCategory {
    /// Category is a pure function of the normalized keyword text.
    pub fn of(normalized: &str) -> Self {
        if MODIFIER_TERMS.contains(&normalized) {
            KeywordCategory::Modifier
        } else {
            KeywordCategory::Core
        }
    }
}

#[derive(Debug, Clone)]
pub struct Keyword {
    pub raw: String,
    pub normalized: String,
    pub category: KeywordCategory,
    words: Vec<String>,
    /// Word-boundary pattern joining the words with flexible separators.
    /// Only built for multi-word keywords.
    spaced: Option<Regex>,
}

/// Keywords found in a piece of text, partitioned by category.
/// Entries are normalized keyword texts in taxonomy order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordMatches {
    pub core: Vec<String>,
    pub modifiers: Vec<String>,
}

impl KeywordMatches {
    pub fn is_empty(&self) -> bool {
        self.core.is_empty() && self.modifiers.is_empty()
    }
}

/// The loaded, immutable keyword list. Built once at configuration time;
/// `classify` is pure and total after that.
#[derive(Debug, Clone, Default)]
pub struct Taxonomy {
    keywords: Vec<Keyword>,
}

impl Taxonomy {
    /// Build a taxonomy from an ordered keyword list. Case variants and
    /// duplicates collapse to the first occurrence; empty entries are
    /// dropped. An empty input is allowed and simply never matches.
    pub fn load<I, S>(raw_list: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut keywords = Vec::new();

        for raw in raw_list {
            let raw = raw.as_ref();
            let normalized = normalize(raw);
            if normalized.is_empty() || !seen.insert(normalized.clone()) {
                continue;
            }

            let words: Vec<String> = normalized.split_whitespace().map(str::to_string).collect();
            let spaced = if words.len() > 1 {
                let joined = words
                    .iter()
                    .map(|w| regex::escape(w))
                    .collect::<Vec<_>>()
                    .join(WORD_SEPARATOR);
                // Escaped fixed words joined by a fixed class; this cannot
                // fail to compile.
                Regex::new(&format!(r"\b{joined}\b")).ok()
            } else {
                None
            };

            let category = KeywordCategory::of(&normalized);
            keywords.push(Keyword { raw: raw.to_string(), normalized, category, words, spaced });
        }

        debug!(keywords = keywords.len(), "keyword taxonomy loaded");
        Taxonomy { keywords }
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    /// Find every keyword present in `text`.
    ///
    /// A keyword matches if its normalized form is a literal substring of
    /// the lowercased text, or (multi-word keywords only) if all of its
    /// words are present and the compiled word-boundary pattern matches,
    /// which tolerates markup-introduced whitespace variance between the
    /// words. Overlapping keywords ("manager" inside "product manager")
    /// all fire; callers act on the union.
    pub fn classify(&self, text: &str) -> KeywordMatches {
        let lowered = text.to_lowercase();
        let mut matches = KeywordMatches::default();

        for keyword in &self.keywords {
            let hit = lowered.contains(&keyword.normalized)
                || keyword.spaced.as_ref().is_some_and(|pattern| {
                    keyword.words.iter().all(|w| lowered.contains(w.as_str()))
                        && pattern.is_match(&lowered)
                });

            if hit {
                match keyword.category {
                    KeywordCategory::Core => matches.core.push(keyword.normalized.clone()),
                    KeywordCategory::Modifier => matches.modifiers.push(keyword.normalized.clone()),
                }
            }
        }

        matches
    }
}
