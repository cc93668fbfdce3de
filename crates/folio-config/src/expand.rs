//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand environment variable references in a string.
///
/// Supports:
/// - `${VAR}` - expands to the value of VAR, errors if unset
/// - `${VAR:-default}` - expands to VAR if set, otherwise uses default
///
/// Returns the original string unchanged if no `${}` patterns are present.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    // Fast path: no expansion needed
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    let missing = unset_vars(value);
    if let Some(var_name) = missing.first() {
        return Err(ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{var_name}}} not set"),
        });
    }

    Ok(shellexpand::env_with_context_no_errors(value, |var| std::env::var(var).ok()).into_owned())
}

/// Names of `${VAR}` references that are unset and carry no default.
fn unset_vars(value: &str) -> Vec<String> {
    let mut missing = Vec::new();
    let mut rest = value;
    while let Some(start) = rest.find("${") {
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            break;
        };
        let reference = &after[..end];
        if !reference.contains(":-") && std::env::var(reference).is_err() {
            missing.push(reference.to_owned());
        }
        rest = &after[end + 1..];
    }
    missing
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_simple_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("FOLIO_TEST_VAR_SIMPLE", "hello");
        }
        let result = expand_env("${FOLIO_TEST_VAR_SIMPLE}", "test.field").unwrap();
        assert_eq!(result, "hello");
        unsafe {
            std::env::remove_var("FOLIO_TEST_VAR_SIMPLE");
        }
    }

    #[test]
    fn test_expand_with_default_uses_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("FOLIO_UNSET_VAR_TEST");
        }
        let result = expand_env("${FOLIO_UNSET_VAR_TEST:-default}", "test.field").unwrap();
        assert_eq!(result, "default");
    }

    #[test]
    fn test_expand_missing_var_error() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("FOLIO_MISSING_VAR_TEST");
        }
        let err = expand_env("${FOLIO_MISSING_VAR_TEST}", "test.field").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("FOLIO_MISSING_VAR_TEST"));
        assert!(err.to_string().contains("test.field"));
    }

    #[test]
    fn test_expand_literal_unchanged() {
        let result = expand_env("literal string", "test.field").unwrap();
        assert_eq!(result, "literal string");
    }

    #[test]
    fn test_expand_embedded_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("FOLIO_HOST_TEST", "example.com");
        }
        let result = expand_env("https://${FOLIO_HOST_TEST}/", "test.url").unwrap();
        assert_eq!(result, "https://example.com/");
        unsafe {
            std::env::remove_var("FOLIO_HOST_TEST");
        }
    }
}
