//! Enriched catalog types served to downstream callers.
//!
//! Field names follow the wire format of the menu endpoint: `sizeName`,
//! `ml` and `price` on variants, and a `{"value": …}` object for the
//! category. Looseness that callers rely on (ids and prices arriving as
//! numbers *or* strings) is kept with untagged enums instead of eager
//! coercion.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::rows::normalize_text;

/// An item id as delivered upstream: a number or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Number(serde_json::Number),
    Text(String),
}

impl ItemId {
    /// Accept a number or string id; anything else is unusable.
    pub fn from_value(value: Option<&Value>) -> Option<Self> {
        match value? {
            Value::Number(n) => Some(ItemId::Number(n.clone())),
            Value::String(s) => Some(ItemId::Text(s.clone())),
            _ => None,
        }
    }

    /// Stringified form used as the join key between tables.
    pub fn as_key(&self) -> String {
        match self {
            ItemId::Number(n) => n.to_string(),
            ItemId::Text(s) => s.clone(),
        }
    }
}

/// A price as delivered upstream: kept verbatim, parsed only on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Price {
    Number(serde_json::Number),
    Text(String),
}

impl Price {
    /// Accept a number or string price; anything else counts as absent.
    pub fn from_value(value: Option<&Value>) -> Option<Self> {
        match value? {
            Value::Number(n) => Some(Price::Number(n.clone())),
            Value::String(s) => Some(Price::Text(s.clone())),
            _ => None,
        }
    }

    /// Tolerant numeric reading of the price.
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            Price::Number(n) => Value::Number(n.clone()),
            Price::Text(s) => Value::String(s.clone()),
        };
        crate::number::parse_numeric(&value)
    }
}

/// Category label wrapped the way the wire format expects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuCategory {
    pub value: String,
}

impl MenuCategory {
    /// Normalize a category field. Single-select fields arrive as objects
    /// with a `value`; older rows may carry `name`/`label`/`id` or a bare
    /// string instead.
    pub fn from_value(value: Option<&Value>) -> Option<Self> {
        let raw = value?;
        if raw.is_null() {
            return None;
        }
        let label = if raw.is_object() {
            normalize_text(raw.get("value"))
                .or_else(|| normalize_text(raw.get("name")))
                .or_else(|| normalize_text(raw.get("label")))
                .or_else(|| normalize_text(raw.get("id")))
        } else {
            normalize_text(Some(raw))
        };
        label.map(|value| MenuCategory { value })
    }
}

/// One size variant of a menu item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuVariant {
    #[serde(rename = "sizeName")]
    pub size_name: Option<String>,
    pub ml: Option<f64>,
    pub price: Option<Price>,
}

/// One enriched menu item with its size variants attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: Option<ItemId>,
    pub name: Option<String>,
    pub category: Option<MenuCategory>,
    pub description: Option<String>,
    pub popular: bool,
    pub variants: Vec<MenuVariant>,
}

impl MenuItem {
    /// Sort variants ascending by volume. Entries without a numeric
    /// volume go after all numeric ones, keeping their relative order
    /// (the sort is stable).
    pub fn sort_variants(&mut self) {
        use std::cmp::Ordering;
        self.variants.sort_by(|a, b| match (a.ml, b.ml) {
            (Some(a_ml), Some(b_ml)) => a_ml.partial_cmp(&b_ml).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
    }
}
