//! Shared types for the menu-gateway workspace.
//!
//! This crate provides the foundational data model used across the
//! workspace, breaking circular dependency chains:
//!
//! - [`rows`]: loose access to untyped remote table rows, including
//!   relation-field normalization
//! - [`number`]: tolerant numeric parsing for locale-formatted values
//! - [`catalog`]: the enriched catalog types served downstream
//! - [`price`]: price summaries over an enriched item
//! - [`env`]: environment variable parsing utilities

pub mod catalog;
pub mod env;
pub mod number;
pub mod price;
pub mod rows;

// Re-export commonly used types at crate root
pub use catalog::{ItemId, MenuCategory, MenuItem, MenuVariant, Price};
pub use number::parse_numeric;
pub use rows::{normalize_links, RelationShape};
