#![forbid(unsafe_code)]

//! Text normalization shared by the snapshot builder and the locator
//!
//! Headings are matched by their canonical key: whitespace collapsed, leading
//! enumeration (`1.2.`, `IV)`, `3 -`) and trailing punctuation removed, and
//! upper-cased.

use regex::Regex;
use sha2::{Digest, Sha256};
use std::sync::LazyLock;

/// Number of normalized characters that feed the content hash
pub const HASH_PREFIX_CHARS: usize = 80;

/// Hex characters kept from the content hash digest
pub const HASH_HEX_LEN: usize = 12;

/// Maximum characters kept in a paragraph snippet
pub const SNIPPET_CHARS: usize = 120;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex"));

static ENUMERATION_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[\dIVXLCDM]+(\.[\dIVXLCDM]+)*[\)\.\-–: ]+").expect("enumeration prefix regex")
});

static TRAILING_PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\.:\-–\s]+$").expect("trailing punctuation regex"));

/// Trims and collapses every whitespace run to a single space
pub fn normalize_text(s: &str) -> String {
    WHITESPACE.replace_all(s.trim(), " ").into_owned()
}

/// Computes the canonical heading key for `s`
///
/// `"1.2. Введение"`, `"ВВЕДЕНИЕ:"` and `"введение"` all yield `"ВВЕДЕНИЕ"`.
pub fn heading_key(s: &str) -> String {
    let text = normalize_text(s);
    let text = ENUMERATION_PREFIX.replace(&text, "");
    let text = TRAILING_PUNCTUATION.replace(&text, "");
    text.to_uppercase()
}

/// Position-independent identity of a paragraph's text
///
/// Only the first [`HASH_PREFIX_CHARS`] normalized characters are hashed, so
/// two paragraphs sharing that prefix collide.
pub fn content_hash(s: &str) -> String {
    let prefix: String = normalize_text(s).chars().take(HASH_PREFIX_CHARS).collect();
    let mut hasher = Sha256::new();
    hasher.update(prefix.as_bytes());
    let mut digest = hex::encode(hasher.finalize());
    digest.truncate(HASH_HEX_LEN);
    digest
}

/// Takes at most `max` characters from the start of `s`
pub fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Bounded display prefix of a paragraph
pub fn snippet(s: &str) -> String {
    truncate_chars(s, SNIPPET_CHARS)
}

/// True when `s` has at least one cased character and none are lowercase
pub fn is_all_uppercase(s: &str) -> bool {
    let mut has_cased = false;
    for c in s.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_text_collapses_whitespace() {
        assert_eq!(normalize_text("  a \t b\n\nc  "), "a b c");
        assert_eq!(normalize_text("   "), "");
    }

    #[test]
    fn test_heading_key_variants_agree() {
        let expected = "ВВЕДЕНИЕ";
        assert_eq!(heading_key("1.2. ВВЕДЕНИЕ"), expected);
        assert_eq!(heading_key("ВВЕДЕНИЕ:"), expected);
        assert_eq!(heading_key("введение"), expected);
        assert_eq!(heading_key("1.2. Введение"), expected);
    }

    #[test]
    fn test_heading_key_strips_roman_and_dash() {
        assert_eq!(heading_key("IV) Заключение"), "ЗАКЛЮЧЕНИЕ");
        assert_eq!(heading_key("3 – Основная часть –"), "ОСНОВНАЯ ЧАСТЬ");
        assert_eq!(heading_key("  Список   источников. "), "СПИСОК ИСТОЧНИКОВ");
    }

    #[test]
    fn test_heading_key_keeps_words_without_separator() {
        // A leading roman-looking letter followed by more letters is a word.
        assert_eq!(heading_key("Conclusion"), "CONCLUSION");
    }

    #[test]
    fn test_content_hash_shape_and_stability() {
        let h = content_hash("Some paragraph text");
        assert_eq!(h.len(), HASH_HEX_LEN);
        assert!(h.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(h, content_hash("  Some   paragraph\ttext "));
        assert_ne!(h, content_hash("Other paragraph text"));
    }

    #[test]
    fn test_content_hash_uses_prefix_only() {
        let base = "x".repeat(HASH_PREFIX_CHARS);
        assert_eq!(
            content_hash(&format!("{base} tail one")),
            content_hash(&format!("{base} tail two"))
        );
    }

    #[test]
    fn test_snippet_counts_chars_not_bytes() {
        let text = "я".repeat(200);
        assert_eq!(snippet(&text).chars().count(), SNIPPET_CHARS);
    }

    #[test]
    fn test_is_all_uppercase() {
        assert!(is_all_uppercase("ВВЕДЕНИЕ"));
        assert!(is_all_uppercase("1 ВВЕДЕНИЕ."));
        assert!(!is_all_uppercase("Введение"));
        assert!(!is_all_uppercase("12345"));
        assert!(!is_all_uppercase(""));
    }
}
