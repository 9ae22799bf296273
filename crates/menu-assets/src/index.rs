//! The static asset index and candidate matching.
//!
//! Keys are `-`-separated canonical tokens. Resolution first tries an
//! exact hit, then a segment match: the candidate must appear in an
//! indexed key as a whole token span, bounded by separators or string
//! edges. Among competing keys, one *ending* with the candidate beats an
//! internal occurrence, and ties prefer the shorter key, then manifest
//! order, keeping resolution deterministic and explainable.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::key::canonical_key;

/// Built-in manifest of menu assets. Keys are already canonical.
const MANIFEST: &[(&str, &str)] = &[
    ("coffee-espresso", "/images/menu/coffee-espresso.jpg"),
    ("coffee-cappuccino", "/images/menu/coffee-cappuccino.jpg"),
    ("coffee-latte", "/images/menu/coffee-latte.jpg"),
    ("coffee-raf", "/images/menu/coffee-raf.jpg"),
    ("coffee-americano", "/images/menu/coffee-americano.jpg"),
    ("coffee-flat-white", "/images/menu/coffee-flat-white.jpg"),
    ("coffee-macchiato", "/images/menu/coffee-macchiato.jpg"),
    ("tea-black", "/images/menu/tea-black.jpg"),
    ("tea-green", "/images/menu/tea-green.jpg"),
    ("matcha", "/images/menu/matcha.jpg"),
    ("cocoa", "/images/menu/cocoa.jpg"),
    ("dessert-cheesecake", "/images/menu/dessert-cheesecake.jpg"),
    ("dessert-croissant", "/images/menu/dessert-croissant.jpg"),
];

/// One indexed asset.
#[derive(Debug, Clone)]
pub struct AssetIndexEntry {
    pub key: String,
    pub path: String,
}

/// Read-only index over the asset manifest. Built once, never mutated.
#[derive(Debug)]
pub struct AssetIndex {
    entries: Vec<AssetIndexEntry>,
    by_key: HashMap<String, usize>,
}

impl AssetIndex {
    /// Build an index from `(key, path)` pairs. Keys run through the
    /// canonical pipeline so a hand-written manifest cannot drift from
    /// the lookup normalization.
    pub fn from_entries<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut entries = Vec::new();
        let mut by_key = HashMap::new();
        for (key, path) in pairs {
            let key = canonical_key(key);
            if key.is_empty() {
                continue;
            }
            by_key.entry(key.clone()).or_insert(entries.len());
            entries.push(AssetIndexEntry {
                key,
                path: path.to_string(),
            });
        }
        Self { entries, by_key }
    }

    /// The process-wide index over the built-in manifest.
    pub fn builtin() -> &'static AssetIndex {
        static INDEX: OnceLock<AssetIndex> = OnceLock::new();
        INDEX.get_or_init(|| AssetIndex::from_entries(MANIFEST.iter().copied()))
    }

    /// Resolve a display name (and optional category) to an asset path.
    ///
    /// Candidates are tried in order: `category-name`, `name-category`
    /// (manifests order the filename either way), then the bare name.
    /// The first exact or segment hit wins.
    pub fn resolve(&self, name: &str, category: Option<&str>) -> Option<&str> {
        let name_key = canonical_key(name);
        if name_key.is_empty() {
            return None;
        }

        let mut candidates = Vec::with_capacity(3);
        if let Some(category) = category {
            let category_key = canonical_key(category);
            if !category_key.is_empty() {
                candidates.push(format!("{category_key}-{name_key}"));
                candidates.push(format!("{name_key}-{category_key}"));
            }
        }
        candidates.push(name_key);

        candidates.iter().find_map(|candidate| self.lookup(candidate))
    }

    fn lookup(&self, candidate: &str) -> Option<&str> {
        if let Some(&index) = self.by_key.get(candidate) {
            return Some(&self.entries[index].path);
        }
        self.segment_match(candidate)
            .map(|index| self.entries[index].path.as_str())
    }

    /// Best segment occurrence of `candidate` across all indexed keys.
    fn segment_match(&self, candidate: &str) -> Option<usize> {
        let mut best: Option<(bool, usize, usize)> = None; // (is_suffix, key_len, index)
        for (index, entry) in self.entries.iter().enumerate() {
            let Some(is_suffix) = segment_occurrence(&entry.key, candidate) else {
                continue;
            };
            // Suffix beats internal; then the shorter key wins; full
            // ties keep the earliest manifest entry.
            let better = match best {
                None => true,
                Some((best_suffix, best_len, _)) => {
                    if is_suffix != best_suffix {
                        is_suffix
                    } else {
                        entry.key.len() < best_len
                    }
                }
            };
            if better {
                best = Some((is_suffix, entry.key.len(), index));
            }
        }
        best.map(|(_, _, index)| index)
    }
}

/// Whether `candidate` occurs in `key` as a whole token span.
///
/// Returns `Some(true)` for a suffix occurrence, `Some(false)` for an
/// internal one, `None` when the candidate does not occur on token
/// boundaries at all.
fn segment_occurrence(key: &str, candidate: &str) -> Option<bool> {
    if candidate.is_empty() || candidate.len() > key.len() {
        return None;
    }

    let bytes = key.as_bytes();
    let mut found_internal = false;
    let mut search_from = 0;
    while let Some(offset) = key[search_from..].find(candidate) {
        let start = search_from + offset;
        let end = start + candidate.len();
        let left_bounded = start == 0 || bytes[start - 1] == b'-';
        let right_bounded = end == key.len() || bytes[end] == b'-';
        if left_bounded && right_bounded {
            if end == key.len() {
                return Some(true);
            }
            found_internal = true;
        }
        search_from = start + 1;
    }

    found_internal.then_some(false)
}
