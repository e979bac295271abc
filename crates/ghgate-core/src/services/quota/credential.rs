//! Access token checks
//!
//! GitHub tokens carry a class prefix (`ghp_` for classic personal access
//! tokens). A token with the wrong prefix is rejected before any request is
//! made, so a typo never costs a call against the quota being checked.

use super::provider::QuotaError;

/// Reject a token that does not start with `required_prefix`
///
/// The comparison is a literal, case-sensitive prefix match. The token
/// itself is never included in the error.
pub fn validate_token(token: &str, required_prefix: &str) -> Result<(), QuotaError> {
    if token.starts_with(required_prefix) {
        log::debug!("[quota:credential] Token has the expected '{}' prefix", required_prefix);
        Ok(())
    } else {
        log::debug!("[quota:credential] Token rejected: missing '{}' prefix", required_prefix);
        Err(QuotaError::InvalidCredential(format!(
            "token must start with '{}'",
            required_prefix
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_matching_prefix() {
        assert!(validate_token("ghp_abcdef0123456789", "ghp_").is_ok());
    }

    #[test]
    fn test_rejects_other_token_classes() {
        for token in ["gho_abcdef", "github_pat_11AAAA", "GHP_abcdef", "", "ghp"] {
            let err = validate_token(token, "ghp_").unwrap_err();
            assert!(matches!(err, QuotaError::InvalidCredential(_)), "token {:?}", token);
        }
    }

    #[test]
    fn test_error_does_not_leak_token() {
        let err = validate_token("secret-value", "ghp_").unwrap_err();
        assert!(!err.to_string().contains("secret-value"));
    }

    #[test]
    fn test_custom_prefix() {
        assert!(validate_token("github_pat_11AAAA", "github_pat_").is_ok());
        assert!(validate_token("ghp_abcdef", "github_pat_").is_err());
    }
}
