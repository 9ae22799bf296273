//! Three-way fan-out and the catalog join.
//!
//! Aggregation reads the items, variants and sizes tables in parallel,
//! then joins them: each variant row links one or more items to a size
//! and a price, and each size row carries the volume used for ordering.
//! The join itself is pure ([`join_tables`]) so it can be tested without
//! a network.

use std::collections::HashMap;

use serde_json::Value;
use tokio::task;
use tracing::debug;

use menu_gateway_types::catalog::{ItemId, MenuCategory, MenuItem, MenuVariant, Price};
use menu_gateway_types::number::parse_numeric_opt;
use menu_gateway_types::rows::{normalize_flag, normalize_links, normalize_text};
use menu_transport::{TableClient, TableFetch};

use crate::error::CatalogError;

/// Ids of the three tables the catalog is joined from.
#[derive(Debug, Clone)]
pub struct TableIds {
    pub items: String,
    pub variants: String,
    pub sizes: String,
}

/// Fetch all three tables in parallel and join them into enriched items.
///
/// The fan-out never exits early: all three reads settle before the join,
/// and a timeout on one read does not cancel its siblings. If any read
/// failed, the first failing status in items → variants → sizes order is
/// reported.
pub async fn aggregate(
    client: &TableClient,
    tables: &TableIds,
) -> Result<Vec<MenuItem>, CatalogError> {
    let (items_fetch, variants_fetch, sizes_fetch) = tokio::join!(
        fetch_table(client.clone(), tables.items.clone()),
        fetch_table(client.clone(), tables.variants.clone()),
        fetch_table(client.clone(), tables.sizes.clone()),
    );

    if let Some(status) = first_failure(&items_fetch, &variants_fetch, &sizes_fetch) {
        return Err(CatalogError::Upstream { status });
    }

    let items = items_fetch.into_rows().unwrap_or_default();
    let variants = variants_fetch.into_rows().unwrap_or_default();
    let sizes = sizes_fetch.into_rows().unwrap_or_default();
    debug!(
        items = items.len(),
        variants = variants.len(),
        sizes = sizes.len(),
        "joining catalog tables"
    );

    Ok(join_tables(&items, &variants, &sizes))
}

/// The status to report when any of the three reads failed.
///
/// Failure priority is items, then variants, then sizes: the items table
/// is the one the reply cannot exist without, so its status wins even
/// when several reads failed.
fn first_failure(
    items: &TableFetch,
    variants: &TableFetch,
    sizes: &TableFetch,
) -> Option<Option<u16>> {
    [items, variants, sizes]
        .into_iter()
        .find_map(TableFetch::failure_status)
}

/// Run one blocking table read off the async runtime.
async fn fetch_table(client: TableClient, table_id: String) -> TableFetch {
    match task::spawn_blocking(move || client.fetch(&table_id)).await {
        Ok(fetch) => fetch,
        // A panicked fetch task reads as a network-level failure.
        Err(_) => TableFetch::Failed { status: None },
    }
}

/// Stringified join key for a loosely typed id value.
fn id_key(value: Option<&Value>) -> Option<String> {
    ItemId::from_value(value).map(|id| id.as_key())
}

/// Join the three row sets into enriched menu items.
pub fn join_tables(items: &[Value], variants: &[Value], sizes: &[Value]) -> Vec<MenuItem> {
    // Size id -> volume in ml. Unparseable volumes stay present as None
    // so a known size with a broken volume still resolves its name.
    let size_ml_by_id: HashMap<String, Option<f64>> = sizes
        .iter()
        .filter_map(|size| {
            let key = id_key(size.get("id"))?;
            Some((key, parse_numeric_opt(size.get("ml"))))
        })
        .collect();

    // Items in row order, indexed by stringified id for variant linking.
    // Items without a usable id stay in the output but cannot be linked.
    let mut enriched: Vec<MenuItem> = Vec::with_capacity(items.len());
    let mut index_by_id: HashMap<String, usize> = HashMap::new();
    for row in items {
        let item = MenuItem {
            id: ItemId::from_value(row.get("id")),
            name: normalize_text(row.get("name")),
            category: MenuCategory::from_value(row.get("category")),
            description: normalize_text(row.get("description")),
            popular: normalize_flag(row.get("popular")),
            variants: Vec::new(),
        };
        if let Some(id) = &item.id {
            index_by_id.insert(id.as_key(), enriched.len());
        }
        enriched.push(item);
    }

    for variant in variants {
        let item_links = normalize_links(variant.get("item"));
        let size_links = normalize_links(variant.get("size"));
        let size_link = size_links.first();

        // Display name: the first present, non-null label field wins,
        // even if it then normalizes to nothing.
        let size_name = normalize_text(size_link.and_then(|link| {
            ["value", "name", "label", "id"]
                .iter()
                .find_map(|key| link.get(*key).filter(|v| !v.is_null()))
        }));

        let ml = size_link
            .and_then(|link| id_key(link.get("id")))
            .and_then(|key| size_ml_by_id.get(&key).copied())
            .flatten();

        let price = Price::from_value(variant.get("price"));

        // A variant linked to multiple items is duplicated across each.
        for link in &item_links {
            let Some(key) = id_key(link.get("id")) else {
                continue;
            };
            if let Some(&index) = index_by_id.get(&key) {
                enriched[index].variants.push(MenuVariant {
                    size_name: size_name.clone(),
                    ml,
                    price: price.clone(),
                });
            }
        }
    }

    for item in &mut enriched {
        item.sort_variants();
    }

    enriched
}
