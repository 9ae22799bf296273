//! The canonical key pipeline.
//!
//! A display name becomes a key in four steps: trim + lowercase,
//! transliterate recognized Cyrillic letters, collapse every other
//! non-alphanumeric run (except `+`) into a single separator, then map
//! each token through the alias table and rejoin the survivors.
//!
//! The pipeline is idempotent: feeding a canonical key back in yields
//! the same key.

use crate::alias::canonical_token;
use crate::translit::latin_equivalent;

/// Separator used inside keys.
const SEPARATOR: char = '-';

/// Canonicalize free text into an asset key. May be empty when nothing
/// survives the pipeline.
pub fn canonical_key(text: &str) -> String {
    let mut flat = String::with_capacity(text.len());
    for c in text.trim().to_lowercase().chars() {
        if c.is_ascii_alphanumeric() || c == '+' {
            flat.push(c);
        } else if let Some(latin) = latin_equivalent(c) {
            flat.push_str(latin);
        } else {
            // Any unrecognized run collapses to one separator at
            // tokenization below.
            flat.push(SEPARATOR);
        }
    }

    let mapped: Vec<&str> = flat
        .split(SEPARATOR)
        .filter(|token| !token.is_empty())
        .map(canonical_token)
        .filter(|token| !token.is_empty())
        .collect();

    mapped.join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transliterates_and_canonicalizes() {
        assert_eq!(canonical_key("Капучино"), "cappuccino");
        assert_eq!(canonical_key("Кофе"), "coffee");
        assert_eq!(canonical_key("Флэт уайт"), "flat-white");
        assert_eq!(canonical_key("Чай чёрный"), "tea-black");
    }

    #[test]
    fn collapses_separator_runs() {
        assert_eq!(canonical_key("  Латте -- со   льдом  "), "latte-so-ldom");
        assert_eq!(canonical_key("раф (ванильный)"), "raf-vanilnyy");
    }

    #[test]
    fn keeps_plus_and_digits() {
        assert_eq!(canonical_key("Латте 1+1"), "latte-1+1");
    }

    #[test]
    fn unmapped_latin_passes_through() {
        assert_eq!(canonical_key("Капучино BENO"), "cappuccino-beno");
        assert_eq!(canonical_key("cappuchino-beno"), "cappuccino-beno");
    }

    #[test]
    fn pipeline_is_idempotent() {
        for input in ["Капучино BENO", "Чай чёрный", "coffee-latte", "Раф"] {
            let once = canonical_key(input);
            assert_eq!(canonical_key(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn stopwords_drop_out() {
        assert_eq!(canonical_key("Напиток капучино"), "cappuccino");
        assert_eq!(canonical_key("Напиток"), "");
        assert_eq!(canonical_key("   "), "");
        assert_eq!(canonical_key(""), "");
    }
}
