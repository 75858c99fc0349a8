//! `${VAR}` and `${VAR:-default}` expansion for configuration strings.

use crate::ConfigError;

/// Expand environment variable references in `value`.
///
/// Values without a `${` are returned unchanged. An unset variable without a
/// default is an error naming `field`.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, LookupError> {
        std::env::var(var).map(Some).map_err(|_| LookupError {
            var_name: var.to_owned(),
        })
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.var_name),
    })
}

struct LookupError {
    var_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_set_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("POLLMARK_TEST_EXPAND_SET", "0.0.0.0");
        }
        let result = expand_env("${POLLMARK_TEST_EXPAND_SET}", "server.host").unwrap();
        assert_eq!(result, "0.0.0.0");
        unsafe {
            std::env::remove_var("POLLMARK_TEST_EXPAND_SET");
        }
    }

    #[test]
    fn test_expand_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("POLLMARK_TEST_EXPAND_UNSET");
        }
        let result = expand_env("${POLLMARK_TEST_EXPAND_UNSET:-/api}", "render.api_base").unwrap();
        assert_eq!(result, "/api");
    }

    #[test]
    fn test_expand_embedded() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("POLLMARK_TEST_EXPAND_PREFIX", "poll");
        }
        let result = expand_env("/${POLLMARK_TEST_EXPAND_PREFIX}/api", "render.api_base").unwrap();
        assert_eq!(result, "/poll/api");
        unsafe {
            std::env::remove_var("POLLMARK_TEST_EXPAND_PREFIX");
        }
    }

    #[test]
    fn test_expand_missing_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("POLLMARK_TEST_EXPAND_MISSING");
        }
        let err = expand_env("${POLLMARK_TEST_EXPAND_MISSING}", "server.host").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        let msg = err.to_string();
        assert!(msg.contains("POLLMARK_TEST_EXPAND_MISSING"));
        assert!(msg.contains("server.host"));
    }

    #[test]
    fn test_literal_unchanged() {
        assert_eq!(expand_env("$HOME/x", "f").unwrap(), "$HOME/x");
        assert_eq!(expand_env("plain", "f").unwrap(), "plain");
    }
}
