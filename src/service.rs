//! Catalog service: configuration check, cached aggregation, and the
//! JSON bodies handed to downstream consumers.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use menu_catalog::{aggregate, CacheState, CatalogCache, CatalogError};
use menu_gateway_types::MenuItem;

use crate::config::Config;

/// One served catalog together with its cache provenance.
#[derive(Debug, Clone)]
pub struct CatalogReply {
    pub items: Arc<Vec<MenuItem>>,
    pub updated_at: DateTime<Utc>,
    pub state: CacheState,
}

/// The gateway's long-lived state: a TTL cache over the aggregation.
pub struct MenuService {
    cache: CatalogCache,
}

impl Default for MenuService {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuService {
    /// Service with the env-overridable default TTL.
    pub fn new() -> Self {
        Self {
            cache: CatalogCache::from_env(),
        }
    }

    /// Service over an explicit cache (used by tests).
    pub fn with_cache(cache: CatalogCache) -> Self {
        Self { cache }
    }

    /// Serve the catalog, refreshing from upstream when the cache is
    /// cold or past its TTL.
    ///
    /// Configuration is validated before any network call; a missing
    /// key routes through the same stale fallback as an upstream
    /// failure, so a previously good catalog keeps being served.
    pub async fn catalog(&self) -> Result<CatalogReply, CatalogError> {
        let served = self
            .cache
            .serve_with(|| async {
                let config = Config::from_env()
                    .map_err(|err| CatalogError::MissingConfig { missing: err.missing })?;
                let client = config.client();
                aggregate(&client, &config.tables).await
            })
            .await?;

        tracing::debug!(items = served.data.len(), state = ?served.state, "catalog served");

        Ok(CatalogReply {
            items: served.data,
            updated_at: served.updated_at,
            state: served.state,
        })
    }

    /// Look one item up by its stringified id.
    pub async fn find_item(&self, id: &str) -> Result<Option<MenuItem>, CatalogError> {
        let reply = self.catalog().await?;
        Ok(find_in(&reply.items, id).cloned())
    }
}

/// Id lookup over served items. Ids compare as strings, so `42` and
/// `"42"` name the same item.
pub fn find_in<'a>(items: &'a [MenuItem], id: &str) -> Option<&'a MenuItem> {
    items
        .iter()
        .find(|item| item.id.as_ref().is_some_and(|item_id| item_id.as_key() == id))
}

/// The success body: the bare item array.
pub fn body_json(reply: &CatalogReply) -> Value {
    json!(&*reply.items)
}

/// Stale metadata, present only when the reply fell back to old data.
pub fn stale_meta(reply: &CatalogReply) -> Option<Value> {
    match reply.state {
        CacheState::Stale(reason) => Some(json!({
            "cache": "stale",
            "reason": reason.as_str(),
        })),
        CacheState::Fresh | CacheState::Refreshed => None,
    }
}

/// The hard-failure body: an error line plus whichever detail applies.
pub fn error_json(err: &CatalogError) -> Value {
    match err {
        CatalogError::MissingConfig { missing } => json!({
            "error": "missing configuration",
            "missing": missing,
        }),
        CatalogError::Upstream { status } => json!({
            "error": "upstream failure",
            "status": status,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menu_catalog::StaleReason;
    use menu_gateway_types::ItemId;
    use serde_json::json;

    fn item(id: Value, name: &str) -> MenuItem {
        MenuItem {
            id: ItemId::from_value(Some(&id)),
            name: Some(name.to_string()),
            category: None,
            description: None,
            popular: false,
            variants: Vec::new(),
        }
    }

    fn reply(items: Vec<MenuItem>, state: CacheState) -> CatalogReply {
        CatalogReply {
            items: Arc::new(items),
            updated_at: Utc::now(),
            state,
        }
    }

    #[test]
    fn find_compares_ids_as_strings() {
        let items = vec![item(json!(42), "Эспрессо"), item(json!("abc"), "Латте")];
        assert_eq!(
            find_in(&items, "42").and_then(|i| i.name.as_deref()),
            Some("Эспрессо")
        );
        assert_eq!(
            find_in(&items, "abc").and_then(|i| i.name.as_deref()),
            Some("Латте")
        );
        assert!(find_in(&items, "7").is_none());
    }

    #[test]
    fn items_without_ids_never_match() {
        let mut anon = item(json!(1), "x");
        anon.id = None;
        assert!(find_in(&[anon], "1").is_none());
    }

    #[test]
    fn success_body_is_the_bare_array() {
        let served = reply(vec![item(json!(1), "Раф")], CacheState::Refreshed);
        let body = body_json(&served);
        assert!(body.is_array());
        assert_eq!(body[0]["name"], "Раф");
        assert!(stale_meta(&served).is_none());
    }

    #[test]
    fn stale_reply_carries_cache_metadata() {
        let failed = reply(vec![], CacheState::Stale(StaleReason::UpstreamFailed));
        assert_eq!(
            stale_meta(&failed),
            Some(json!({"cache": "stale", "reason": "upstream-failed"}))
        );

        let unconfigured = reply(vec![], CacheState::Stale(StaleReason::MissingEnv));
        assert_eq!(
            stale_meta(&unconfigured),
            Some(json!({"cache": "stale", "reason": "missing-env"}))
        );
    }

    #[test]
    fn hard_failures_serialize_with_their_detail() {
        let missing = CatalogError::MissingConfig {
            missing: vec!["BASEROW_TOKEN".to_string()],
        };
        assert_eq!(
            error_json(&missing),
            json!({"error": "missing configuration", "missing": ["BASEROW_TOKEN"]})
        );

        let upstream = CatalogError::Upstream { status: Some(502) };
        assert_eq!(
            error_json(&upstream),
            json!({"error": "upstream failure", "status": 502})
        );

        let opaque = CatalogError::Upstream { status: None };
        assert_eq!(
            error_json(&opaque),
            json!({"error": "upstream failure", "status": null})
        );
    }
}
