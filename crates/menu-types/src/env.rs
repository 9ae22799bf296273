//! Environment variable parsing utilities.
//!
//! Small typed helpers that replace the repeated
//! `std::env::var(..).ok().and_then(|v| v.parse().ok()).unwrap_or(..)`
//! pattern.

use std::str::FromStr;

/// Parse an environment variable into a type that implements `FromStr`.
///
/// Returns `None` if the variable is not set or cannot be parsed.
pub fn env_var<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

/// Parse an environment variable with a default value.
///
/// Returns the default if the variable is not set or cannot be parsed.
pub fn env_var_or<T: FromStr>(key: &str, default: T) -> T {
    env_var(key).unwrap_or(default)
}

/// Read the named variables, splitting them into present values and
/// missing names. Empty values count as missing so that a blank line in
/// an env file does not pass for configuration.
pub fn gather_env(keys: &[&str]) -> (Vec<(String, String)>, Vec<String>) {
    let mut values = Vec::new();
    let mut missing = Vec::new();

    for &key in keys {
        match std::env::var(key) {
            Ok(value) if !value.is_empty() => values.push((key.to_string(), value)),
            _ => missing.push(key.to_string()),
        }
    }

    (values, missing)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env mutation is process-global, so each test uses its own keys.

    #[test]
    fn env_var_parses_or_defaults() {
        std::env::set_var("MENU_TYPES_TEST_U64", "42");
        assert_eq!(env_var::<u64>("MENU_TYPES_TEST_U64"), Some(42));
        assert_eq!(env_var_or::<u64>("MENU_TYPES_TEST_UNSET", 7), 7);

        std::env::set_var("MENU_TYPES_TEST_BAD", "not-a-number");
        assert_eq!(env_var_or::<u64>("MENU_TYPES_TEST_BAD", 7), 7);
    }

    #[test]
    fn gather_env_reports_missing_by_name() {
        std::env::set_var("MENU_TYPES_TEST_PRESENT", "x");
        std::env::set_var("MENU_TYPES_TEST_EMPTY", "");

        let (values, missing) = gather_env(&[
            "MENU_TYPES_TEST_PRESENT",
            "MENU_TYPES_TEST_EMPTY",
            "MENU_TYPES_TEST_ABSENT",
        ]);

        assert_eq!(
            values,
            vec![("MENU_TYPES_TEST_PRESENT".to_string(), "x".to_string())]
        );
        assert_eq!(
            missing,
            vec![
                "MENU_TYPES_TEST_EMPTY".to_string(),
                "MENU_TYPES_TEST_ABSENT".to_string()
            ]
        );
    }
}
