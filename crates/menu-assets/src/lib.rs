//! Deterministic resolution of menu item names to static asset keys.
//!
//! Free-text, possibly Cyrillic display names resolve to asset paths
//! through a pure pipeline: transliteration, token aliasing, then exact
//! and segment matching against a fixed manifest. No I/O happens at call
//! time; the built-in index is constructed once per process.
//!
//! # Example
//!
//! ```
//! use menu_assets::resolve_asset;
//!
//! let path = resolve_asset("Капучино", Some("Кофе"));
//! assert_eq!(path, Some("/images/menu/coffee-cappuccino.jpg"));
//!
//! assert_eq!(resolve_asset("Совершенно незнакомое название", None), None);
//! ```

pub mod alias;
pub mod index;
pub mod key;
pub mod translit;

pub use index::{AssetIndex, AssetIndexEntry};
pub use key::canonical_key;

/// Resolve a display name (and optional category) against the built-in
/// manifest. Pure and safe to call concurrently.
pub fn resolve_asset(name: &str, category: Option<&str>) -> Option<&'static str> {
    AssetIndex::builtin().resolve(name, category)
}
