use crate::parse::MarkdownDialect;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Slug algorithm applied to heading text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SlugAlgorithm {
    /// Lowercase, every non-word character becomes `-`, runs collapsed, ends trimmed.
    #[default]
    Default,
    /// github-slugger: punctuation dropped, spaces become `-`, nothing collapsed.
    GitHub,
}

impl SlugAlgorithm {
    /// Base slug for `text`, before deduplication.
    pub fn base_slug(self, text: &str) -> String {
        match self {
            SlugAlgorithm::Default => default_slug(text),
            SlugAlgorithm::GitHub => github_slug(text),
        }
    }
}

impl From<MarkdownDialect> for SlugAlgorithm {
    fn from(dialect: MarkdownDialect) -> Self {
        match dialect {
            MarkdownDialect::CommonMark => SlugAlgorithm::Default,
            MarkdownDialect::Gfm => SlugAlgorithm::GitHub,
        }
    }
}

/// Per-document slug generator that keeps anchors unique.
#[derive(Debug, Default)]
pub struct Slugger {
    algorithm: SlugAlgorithm,
    counts: HashMap<String, usize>,
}

impl Slugger {
    /// Creates a new slugger using the given algorithm.
    pub fn new(algorithm: SlugAlgorithm) -> Self {
        Self {
            algorithm,
            counts: HashMap::new(),
        }
    }

    /// Creates the slugger matching a markdown dialect.
    pub fn for_dialect(dialect: MarkdownDialect) -> Self {
        Self::new(dialect.into())
    }

    /// Generates the next slug for the given heading text.
    pub fn next_slug(&mut self, text: &str) -> String {
        let base = self.algorithm.base_slug(text);
        dedupe(base, &mut self.counts)
    }
}

/// Appends `-N` until the slug is unused, then records it.
///
/// Counters are kept for every final slug, so a heading literally named
/// `x-1` and the second `x` never share an anchor.
fn dedupe(base: String, counts: &mut HashMap<String, usize>) -> String {
    let mut slug = base.clone();
    while counts.contains_key(&slug) {
        let count = counts.entry(base.clone()).or_insert(0);
        *count += 1;
        slug = format!("{base}-{count}");
    }
    counts.insert(slug.clone(), 0);
    slug
}

/// Default slug: lowercase, non `[A-Za-z0-9_-]` to `-`, collapse, trim.
pub fn default_slug(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());

    for ch in text.chars().flat_map(char::to_lowercase) {
        let mapped = if ch.is_ascii_alphanumeric() || ch == '_' {
            ch
        } else {
            '-'
        };
        if mapped == '-' && slug.ends_with('-') {
            continue;
        }
        slug.push(mapped);
    }

    slug.trim_matches('-').to_string()
}

/// Unicode marks (`\p{M}`: Mn, Mc, Me), kept by github-slugger.
static COMBINING_MARK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\p{M}$").expect("valid mark regex"));

fn is_combining_mark(ch: char) -> bool {
    let mut buf = [0; 4];
    COMBINING_MARK.is_match(ch.encode_utf8(&mut buf))
}

/// github-slugger compatible base slug.
///
/// 1. Lowercase
/// 2. Remove all characters that are not letters, digits, marks, `-`, `_` or spaces
/// 3. Replace only spaces with hyphens
/// 4. No trailing-hyphen trimming, no consecutive-hyphen collapsing
pub fn github_slug(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());

    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
            slug.push(ch.to_ascii_lowercase());
        } else if !ch.is_ascii() && (ch.is_alphanumeric() || is_combining_mark(ch)) {
            for lower in ch.to_lowercase() {
                slug.push(lower);
            }
        } else if ch == ' ' {
            slug.push('-');
        }
        // punctuation, tabs, emoji, soft hyphens: dropped
    }

    slug
}
