//! Token aliasing: transliterated or misspelled tokens to canonical
//! English asset tokens.
//!
//! The table either rewrites a token to its canonical form, erases it
//! (stopwords and category filler), or leaves it alone when unmapped.
//! Matching picks the longest registered alias whose text is a prefix of
//! the token, so inflected forms ("kapuchinos") still land on the
//! canonical token; exact matches are the degenerate prefix case.

/// Alias table. An empty right-hand side erases the token.
///
/// Both the transliterated Russian spellings and the common latinized
/// misspellings map onto the canonical manifest tokens.
const ALIASES: &[(&str, &str)] = &[
    ("kapuchino", "cappuccino"),
    ("cappuchino", "cappuccino"),
    ("capuchino", "cappuccino"),
    ("kofe", "coffee"),
    ("chay", "tea"),
    ("amerikano", "americano"),
    ("espreso", "espresso"),
    ("late", "latte"),
    ("makiato", "macchiato"),
    ("machiato", "macchiato"),
    ("flet", "flat"),
    ("uayt", "white"),
    ("vayt", "white"),
    ("kakao", "cocoa"),
    ("matcha", "matcha"),
    ("chernyy", "black"),
    ("zelenyy", "green"),
    // Stopwords: category filler that never appears in asset keys.
    ("napitok", ""),
    ("napitki", ""),
    ("menyu", ""),
];

/// Map one token through the alias table.
///
/// Returns `None` when the token is unmapped and should pass through
/// unchanged; `Some("")` erases the token.
pub fn map_token(token: &str) -> Option<&'static str> {
    // Longest prefix wins. An exact match is a prefix of itself, so no
    // separate exact lookup is needed.
    let mut best: Option<(&'static str, &'static str)> = None;
    for &(alias, target) in ALIASES {
        if token.starts_with(alias) {
            match best {
                Some((current, _)) if current.len() >= alias.len() => {}
                _ => best = Some((alias, target)),
            }
        }
    }
    best.map(|(_, target)| target)
}

/// Apply the table, passing unmapped tokens through.
pub fn canonical_token(token: &str) -> &str {
    map_token(token).unwrap_or(token)
}
