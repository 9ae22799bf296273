//! Environment-backed configuration for the gateway.

use std::fmt;

use menu_catalog::TableIds;
use menu_gateway_types::env::gather_env;
use menu_transport::TableClient;

/// The environment keys the gateway cannot run without, in report order.
pub const REQUIRED_ENV_KEYS: [&str; 5] = [
    "BASEROW_API_URL",
    "BASEROW_TABLE_ID",
    "BASEROW_VARIANTS_TABLE_ID",
    "BASEROW_SIZES_TABLE_ID",
    "BASEROW_TOKEN",
];

/// Everything needed to reach the table backend.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub token: String,
    pub tables: TableIds,
}

impl Config {
    /// Read the five required keys from the environment.
    ///
    /// All keys are checked before returning so a single error names
    /// every missing or empty variable, not just the first.
    pub fn from_env() -> Result<Self, ConfigError> {
        let (found, missing) = gather_env(&REQUIRED_ENV_KEYS);
        if !missing.is_empty() {
            return Err(ConfigError { missing });
        }

        let get = |key: &str| -> String {
            found
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
                .unwrap_or_default()
        };

        Ok(Self {
            base_url: get("BASEROW_API_URL"),
            token: get("BASEROW_TOKEN"),
            tables: TableIds {
                items: get("BASEROW_TABLE_ID"),
                variants: get("BASEROW_VARIANTS_TABLE_ID"),
                sizes: get("BASEROW_SIZES_TABLE_ID"),
            },
        })
    }

    /// Build a table client with env-overridable timeouts.
    pub fn client(&self) -> TableClient {
        TableClient::new(&self.base_url, &self.token)
    }
}

/// One or more required environment variables are unset or empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub missing: Vec<String>,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "missing configuration: {}", self.missing.join(", "))
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    // Env-var tests share process state, so each one uses its own key
    // prefix via gather_env directly; from_env itself is exercised by
    // the CLI integration tests where the environment is controlled.

    #[test]
    fn missing_keys_are_all_reported() {
        let err = ConfigError {
            missing: vec!["BASEROW_API_URL".into(), "BASEROW_TOKEN".into()],
        };
        assert_eq!(
            err.to_string(),
            "missing configuration: BASEROW_API_URL, BASEROW_TOKEN"
        );
    }

    #[test]
    fn required_keys_cover_all_three_tables() {
        assert!(REQUIRED_ENV_KEYS.contains(&"BASEROW_TABLE_ID"));
        assert!(REQUIRED_ENV_KEYS.contains(&"BASEROW_VARIANTS_TABLE_ID"));
        assert!(REQUIRED_ENV_KEYS.contains(&"BASEROW_SIZES_TABLE_ID"));
    }
}
