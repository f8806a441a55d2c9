//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand environment variable references in a string.
///
/// Supports:
/// - `${VAR}` - expands to the value of VAR, errors if unset
/// - `${VAR:-default}` - expands to VAR if set, otherwise uses default
///
/// Strings without a `${` sequence are returned unchanged, so a bare `$` in
/// a path is kept literally.
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
        message: format!("${{{0}}} not set", e.cause.var_name),
    })
}

/// Lookup failure for a variable referenced in a config string.
struct LookupError {
    var_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_app_name_from_env() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("DJANGIFY_TEST_APP", "blog");
        }
        let result = expand_env("${DJANGIFY_TEST_APP}", "convert.app_name").unwrap();
        assert_eq!(result, "blog");
        unsafe {
            std::env::remove_var("DJANGIFY_TEST_APP");
        }
    }

    #[test]
    fn test_expand_default_when_unset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("DJANGIFY_UNSET_ENCODING");
        }
        let result = expand_env("${DJANGIFY_UNSET_ENCODING:-latin1}", "convert.encoding").unwrap();
        assert_eq!(result, "latin1");
    }

    #[test]
    fn test_expand_inside_path() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("DJANGIFY_TEST_SITE", "site");
        }
        let result = expand_env("/srv/${DJANGIFY_TEST_SITE}/html", "convert.base_dir").unwrap();
        assert_eq!(result, "/srv/site/html");
        unsafe {
            std::env::remove_var("DJANGIFY_TEST_SITE");
        }
    }

    #[test]
    fn test_expand_missing_var_reports_field() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("DJANGIFY_MISSING_VAR");
        }
        let err = expand_env("${DJANGIFY_MISSING_VAR}", "convert.output_dir").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        let msg = err.to_string();
        assert!(msg.contains("DJANGIFY_MISSING_VAR"));
        assert!(msg.contains("convert.output_dir"));
    }

    #[test]
    fn test_expand_literal_unchanged() {
        assert_eq!(expand_env("templates", "convert.base_dir").unwrap(), "templates");
        assert_eq!(expand_env("$HOME/x", "convert.base_dir").unwrap(), "$HOME/x");
    }
}
