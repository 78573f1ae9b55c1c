//! Vendor API credential.

use std::fmt;

use crate::error::CredentialError;

/// An API key authorizing calls against the vendor API.
///
/// The key is passed explicitly to every vendor call. Its `Debug` output is
/// redacted so it can sit inside structs that end up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Builds a credential from user input, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::Blank` if the trimmed key is empty.
    pub fn new(api_key: impl AsRef<str>) -> Result<Self, CredentialError> {
        let trimmed = api_key.as_ref().trim();
        if trimmed.is_empty() {
            return Err(CredentialError::Blank);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the raw key for use in the `x-api-key` header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_whitespace() {
        let credential = Credential::new("  abc-123 \n").unwrap();
        assert_eq!(credential.expose(), "abc-123");
    }

    #[test]
    fn test_new_rejects_blank_key() {
        assert!(matches!(Credential::new("   "), Err(CredentialError::Blank)));
        assert!(matches!(Credential::new(""), Err(CredentialError::Blank)));
    }

    #[test]
    fn test_debug_output_is_redacted() {
        let credential = Credential::new("super-secret").unwrap();
        let rendered = format!("{credential:?}");
        assert!(!rendered.contains("super-secret"));
    }
}
