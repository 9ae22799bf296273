//! Catalog aggregation and caching.
//!
//! This crate turns three independently fetched tables (items, variants,
//! sizes) into enriched catalog records and wraps the whole operation in
//! a TTL cache with a stale-on-failure fallback:
//!
//! - [`aggregate`]: three-way fan-out and the join that enriches items
//!   with their size variants
//! - [`cache`]: the single process-wide cache slot and its serve policy
//! - [`error`]: the failure taxonomy shared across the layer

pub mod aggregate;
pub mod cache;
pub mod error;

pub use aggregate::{aggregate, join_tables, TableIds};
pub use cache::{CacheState, CatalogCache, Served};
pub use error::{CatalogError, StaleReason};
