//! Environment variable credential lookup.

use secrecy::SecretString;

use pressroom_types::error::ConferenceError;

/// Read the API key from the environment variable `var`.
///
/// Missing, non-Unicode and blank values all count as absent and fail with
/// [`ConferenceError::MissingCredential`].
pub fn resolve_api_key(var: &str) -> Result<SecretString, ConferenceError> {
    resolve_with(var, |name| std::env::var(name).ok())
}

/// Same as [`resolve_api_key`] with an injectable lookup.
pub fn resolve_with<F>(var: &str, lookup: F) -> Result<SecretString, ConferenceError>
where
    F: FnOnce(&str) -> Option<String>,
{
    match lookup(var) {
        Some(value) if !value.trim().is_empty() => {
            tracing::debug!(var, "API key found in environment");
            Ok(SecretString::from(value.trim().to_string()))
        }
        _ => Err(ConferenceError::MissingCredential { var: var.to_string() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_present_key() {
        let key = resolve_with("GEMINI_API_KEY", |_| Some("abc123\n".to_string())).unwrap();
        assert_eq!(key.expose_secret(), "abc123");
    }

    #[test]
    fn test_missing_key() {
        let err = resolve_with("GEMINI_API_KEY", |_| None).unwrap_err();
        assert!(matches!(err, ConferenceError::MissingCredential { ref var } if var == "GEMINI_API_KEY"));
    }

    #[test]
    fn test_blank_key_is_missing() {
        assert!(resolve_with("GEMINI_API_KEY", |_| Some("   ".to_string())).is_err());
    }

    #[test]
    fn test_lookup_uses_requested_name() {
        let key = resolve_with("OTHER_KEY", |name| (name == "OTHER_KEY").then(|| "v".to_string()));
        assert!(key.is_ok());
    }

    #[test]
    fn test_unset_variable_from_process_env() {
        assert!(resolve_api_key("PRESSROOM_TEST_SURELY_UNSET_VAR_7F3A").is_err());
    }
}
