//! Failure taxonomy for catalog aggregation.

use std::fmt;

/// Why a catalog refresh could not produce data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// One or more required settings are absent; detected before any
    /// network call. Carries every missing key by name.
    MissingConfig { missing: Vec<String> },
    /// A table read failed. `status` carries the HTTP status of the first
    /// failing table (items, then variants, then sizes); `None` means a
    /// network-level failure.
    Upstream { status: Option<u16> },
}

impl CatalogError {
    /// The machine-readable reason attached to a stale-fallback reply.
    pub fn stale_reason(&self) -> StaleReason {
        match self {
            CatalogError::MissingConfig { .. } => StaleReason::MissingEnv,
            CatalogError::Upstream { .. } => StaleReason::UpstreamFailed,
        }
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::MissingConfig { missing } => {
                write!(f, "missing configuration: {}", missing.join(", "))
            }
            CatalogError::Upstream { status: Some(code) } => {
                write!(f, "upstream table read failed with status {code}")
            }
            CatalogError::Upstream { status: None } => {
                write!(f, "upstream table read failed at the network level")
            }
        }
    }
}

impl std::error::Error for CatalogError {}

/// Why a reply is being served from a stale cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaleReason {
    /// Configuration went missing after the cache was populated.
    MissingEnv,
    /// A refresh attempt failed upstream.
    UpstreamFailed,
}

impl StaleReason {
    /// Wire form used in response metadata.
    pub fn as_str(&self) -> &'static str {
        match self {
            StaleReason::MissingEnv => "missing-env",
            StaleReason::UpstreamFailed => "upstream-failed",
        }
    }
}

impl fmt::Display for StaleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
