//! Heading id generation.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

static HYPHEN_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"-+").expect("valid regex"));

/// Convert heading text to a URL-safe fragment id
///
/// Rules:
/// - Lowercase
/// - Replace whitespace with hyphens
/// - Remove special characters (except hyphens and underscores)
/// - Collapse multiple hyphens
/// - Trim leading/trailing hyphens
///
/// # Examples
///
/// ```
/// use kcblog_core::slugify;
///
/// assert_eq!(slugify("Hello World"), "hello-world");
/// assert_eq!(slugify("Rust & Safety"), "rust-safety");
/// assert_eq!(slugify("C++ Programming"), "c-programming");
/// ```
pub fn slugify(input: &str) -> String {
    let lowercased = input.to_lowercase();

    let cleaned = lowercased
        .graphemes(true)
        .filter_map(|g| {
            let c = g.chars().next()?;
            if c.is_whitespace() {
                Some("-")
            } else if c.is_alphanumeric() || c == '-' || c == '_' {
                Some(g)
            } else {
                None
            }
        })
        .collect::<String>();

    let collapsed = HYPHEN_RUNS.replace_all(&cleaned, "-");
    collapsed.trim_matches('-').to_string()
}

/// Hands out heading ids that are unique within one document.
///
/// Repeated ids get `_1`, `_2`, ... suffixes in document order.
#[derive(Debug, Default)]
pub struct UniqueIds {
    seen: HashSet<String>,
}

impl UniqueIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve an id that was set explicitly in the source
    pub fn reserve(&mut self, id: &str) {
        self.seen.insert(id.to_string());
    }

    /// Derive a fresh id from heading text
    pub fn next_for(&mut self, text: &str) -> String {
        let mut base = slugify(text);
        if base.is_empty() {
            base = "section".to_string();
        }

        let mut candidate = base.clone();
        let mut n = 1;
        while self.seen.contains(&candidate) {
            candidate = format!("{}_{}", base, n);
            n += 1;
        }
        self.seen.insert(candidate.clone());
        candidate
    }
}
