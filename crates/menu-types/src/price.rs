//! Price summaries over an enriched menu item.
//!
//! The list page shows a single price per card: the item's own price when
//! it has one, otherwise the cheapest variant prefixed with "from". This
//! module computes the numbers; formatting stays with the presentation
//! layer.

use crate::catalog::MenuItem;

/// Parsed price information for one item.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceInfo {
    /// The item-level price, when present and parseable.
    pub raw_price: Option<f64>,
    /// Parsed prices of every variant that has one.
    pub variant_prices: Vec<f64>,
    /// Cheapest variant price, when any variant carries one.
    pub min_variant_price: Option<f64>,
}

impl PriceInfo {
    pub fn has_variant_prices(&self) -> bool {
        !self.variant_prices.is_empty()
    }

    /// The price the list page should display: the item's own price wins,
    /// otherwise the cheapest variant.
    pub fn display_price(&self) -> Option<f64> {
        self.raw_price.or(self.min_variant_price)
    }
}

/// Compute price information for an item.
///
/// Item-level prices are not part of the enriched record (variants carry
/// the prices), so `raw_price` comes from the caller when it has one.
pub fn price_info(item: &MenuItem, raw_price: Option<f64>) -> PriceInfo {
    let variant_prices: Vec<f64> = item
        .variants
        .iter()
        .filter_map(|v| v.price.as_ref().and_then(|p| p.as_f64()))
        .collect();
    let min_variant_price = variant_prices.iter().copied().reduce(f64::min);

    PriceInfo {
        raw_price,
        variant_prices,
        min_variant_price,
    }
}
