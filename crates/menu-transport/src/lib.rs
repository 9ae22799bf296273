//! HTTP transport for reading remote catalog tables.
//!
//! The catalog's source of truth is a tabular content service exposing
//! named tables of rows over HTTP. [`TableClient`] performs one
//! authenticated read of one table and reports the outcome as data:
//! transport failures and non-success statuses come back as
//! [`TableFetch::Failed`], never as a panic or an `Err` crossing this
//! boundary.
//!
//! # Example
//!
//! ```ignore
//! use menu_transport::TableClient;
//!
//! let client = TableClient::new("https://cms.example.com", "token");
//! match client.fetch("412") {
//!     TableFetch::Rows(rows) => println!("{} rows", rows.len()),
//!     TableFetch::Failed { status } => eprintln!("failed: {:?}", status),
//! }
//! ```

use std::time::Duration;

use serde_json::Value;
use tracing::warn;

use menu_gateway_types::env::env_var_or;

/// Common path segment of every table read endpoint.
const TABLE_PATH: &str = "/api/database/rows/table/";

/// Outcome of one table read.
#[derive(Debug, Clone, PartialEq)]
pub enum TableFetch {
    /// The table's rows; possibly empty.
    Rows(Vec<Value>),
    /// The read failed. `status` carries the HTTP status when the server
    /// answered; `None` is the sentinel for network-level failures
    /// (including timeouts).
    Failed { status: Option<u16> },
}

impl TableFetch {
    pub fn is_ok(&self) -> bool {
        matches!(self, TableFetch::Rows(_))
    }

    /// The failing status, if this fetch failed.
    pub fn failure_status(&self) -> Option<Option<u16>> {
        match self {
            TableFetch::Rows(_) => None,
            TableFetch::Failed { status } => Some(*status),
        }
    }

    /// Consume the fetch, yielding rows for successful reads.
    pub fn into_rows(self) -> Option<Vec<Value>> {
        match self {
            TableFetch::Rows(rows) => Some(rows),
            TableFetch::Failed { .. } => None,
        }
    }
}

/// Client for authenticated reads of one remote table backend.
#[derive(Clone)]
pub struct TableClient {
    base_url: String,
    token: String,
    agent: ureq::Agent,
}

impl TableClient {
    /// Default request timeout in seconds (can be overridden by env).
    const DEFAULT_TIMEOUT_SECS: u64 = 10;
    /// Default connect timeout in seconds (can be overridden by env).
    const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

    fn default_timeouts() -> (Duration, Duration) {
        let timeout_secs = env_var_or("MENU_HTTP_TIMEOUT_SECS", Self::DEFAULT_TIMEOUT_SECS);
        let connect_secs = env_var_or(
            "MENU_HTTP_CONNECT_TIMEOUT_SECS",
            Self::DEFAULT_CONNECT_TIMEOUT_SECS,
        );
        (
            Duration::from_secs(timeout_secs),
            Duration::from_secs(connect_secs),
        )
    }

    fn build_agent(timeout: Duration, connect_timeout: Duration) -> ureq::Agent {
        ureq::AgentBuilder::new()
            .timeout(timeout)
            .timeout_connect(connect_timeout)
            .build()
    }

    /// Create a client with env-overridable default timeouts.
    pub fn new(base_url: &str, token: &str) -> Self {
        let (timeout, connect_timeout) = Self::default_timeouts();
        Self::with_timeouts(base_url, token, timeout, connect_timeout)
    }

    /// Create a client with explicit timeouts.
    pub fn with_timeouts(
        base_url: &str,
        token: &str,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Self {
        Self {
            base_url: base_url.to_string(),
            token: token.to_string(),
            agent: Self::build_agent(timeout, connect_timeout),
        }
    }

    /// Read every row of one table.
    ///
    /// The request asks the backend for human-readable field names and
    /// forbids intermediary caching. Any body that is not the expected
    /// `{"results": […]}` shape collapses to zero rows.
    pub fn fetch(&self, table_id: &str) -> TableFetch {
        let url = build_table_url(&self.base_url, table_id);

        let response = match self
            .agent
            .get(&url)
            .set("Authorization", &format!("Token {}", self.token))
            .set("Cache-Control", "no-store")
            .call()
        {
            Ok(response) => response,
            Err(ureq::Error::Status(code, _)) => {
                return TableFetch::Failed { status: Some(code) };
            }
            Err(err) => {
                warn!(table_id, error = %err, "table read failed before a response arrived");
                return TableFetch::Failed { status: None };
            }
        };

        let body: Value = match response.into_json() {
            Ok(body) => body,
            Err(err) => {
                // A malformed body reads as an empty table, not as a
                // failure; downstream consumers see zero rows.
                warn!(table_id, error = %err, "table body was not valid JSON; treating as empty");
                return TableFetch::Rows(Vec::new());
            }
        };

        TableFetch::Rows(extract_rows(&body))
    }
}

/// Build the read URL for one table, normalizing trailing slashes on the
/// base and asking for human-readable field names.
pub fn build_table_url(base_url: &str, table_id: &str) -> String {
    let base = base_url.trim_end_matches('/');
    format!("{base}{TABLE_PATH}{table_id}/?user_field_names=true")
}

/// Pull the row list out of a response body. Any shape other than
/// `{"results": […]}` yields no rows.
pub fn extract_rows(body: &Value) -> Vec<Value> {
    match body.get("results") {
        Some(Value::Array(rows)) => rows.clone(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn table_url_normalizes_trailing_slashes() {
        assert_eq!(
            build_table_url("https://cms.example.com", "412"),
            "https://cms.example.com/api/database/rows/table/412/?user_field_names=true"
        );
        assert_eq!(
            build_table_url("https://cms.example.com///", "412"),
            "https://cms.example.com/api/database/rows/table/412/?user_field_names=true"
        );
    }

    #[test]
    fn extract_rows_requires_the_results_wrapper() {
        let body = json!({"results": [{"id": 1}, {"id": 2}]});
        assert_eq!(extract_rows(&body).len(), 2);

        // Anything else is "no rows", not an error.
        assert!(extract_rows(&json!([{"id": 1}])).is_empty());
        assert!(extract_rows(&json!({"rows": []})).is_empty());
        assert!(extract_rows(&json!({"results": "nope"})).is_empty());
        assert!(extract_rows(&json!(null)).is_empty());
    }

    #[test]
    fn failed_fetch_exposes_its_status() {
        let server_side = TableFetch::Failed { status: Some(502) };
        assert!(!server_side.is_ok());
        assert_eq!(server_side.failure_status(), Some(Some(502)));
        assert_eq!(server_side.into_rows(), None);

        let network = TableFetch::Failed { status: None };
        assert_eq!(network.failure_status(), Some(None));

        let ok = TableFetch::Rows(vec![json!({"id": 1})]);
        assert_eq!(ok.failure_status(), None);
        assert_eq!(ok.into_rows().unwrap().len(), 1);
    }

    /// Answer exactly one request with a canned 200 response and return
    /// the base URL to reach it.
    fn serve_once(body: &'static str) -> String {
        use std::io::{Read, Write};

        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = [0u8; 4096];
            let _ = stream.read(&mut request);
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
        });
        format!("http://{addr}")
    }

    #[test]
    fn undecodable_body_collapses_to_zero_rows() {
        // A 200 whose body is not JSON at all must read as an empty
        // table, not as a failure.
        let base = serve_once("<!doctype html><p>maintenance</p>");
        let client = TableClient::new(&base, "token");
        assert_eq!(client.fetch("412"), TableFetch::Rows(Vec::new()));
    }

    #[test]
    fn decodable_body_yields_its_rows() {
        let base = serve_once(r#"{"results": [{"id": 1}, {"id": 2}]}"#);
        let client = TableClient::new(&base, "token");
        assert_eq!(
            client.fetch("412"),
            TableFetch::Rows(vec![json!({"id": 1}), json!({"id": 2})])
        );
    }

    #[test]
    #[ignore = "requires network access to a table backend"]
    fn fetch_against_live_backend() {
        let base = std::env::var("BASEROW_API_URL").expect("BASEROW_API_URL");
        let token = std::env::var("BASEROW_TOKEN").expect("BASEROW_TOKEN");
        let table = std::env::var("BASEROW_TABLE_ID").expect("BASEROW_TABLE_ID");

        let client = TableClient::new(&base, &token);
        let fetch = client.fetch(&table);
        assert!(fetch.is_ok(), "live read should succeed: {:?}", fetch);
    }
}
