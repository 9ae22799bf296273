//! Menu Gateway
//!
//! Aggregation and resilience layer between a tabular CMS backend and the
//! menu consumers:
//!
//! - **Transport**: authenticated table reads ([`menu_transport`])
//! - **Aggregation**: parallel three-table fetch joined into enriched
//!   items ([`menu_catalog::aggregate`])
//! - **Caching**: TTL cache with stale-on-failure fallback
//!   ([`menu_catalog::CatalogCache`])
//! - **Assets**: deterministic name → image resolution ([`menu_assets`])
//!
//! The [`service`] module wires these together behind one call; [`config`]
//! reads the table backend settings from the environment.

pub mod config;
pub mod service;

pub use config::{Config, ConfigError, REQUIRED_ENV_KEYS};
pub use service::{body_json, error_json, find_in, stale_meta, CatalogReply, MenuService};
