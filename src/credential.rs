use std::fmt::{Debug, Formatter};

use crate::utils::Redact;

/// API key pair issued by the publisher portal.
///
/// Supplied once at client construction and held for the client's
/// lifetime. Both halves must be non-empty.
#[derive(Clone)]
pub struct Credential {
    /// API key identifying the caller.
    pub api_key: String,
    /// API secret used as the HMAC signing key.
    pub api_secret: String,
}

impl Credential {
    /// Create a new credential.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    /// Check that both key and secret are present.
    pub fn is_valid(&self) -> bool {
        !self.api_key.is_empty() && !self.api_secret.is_empty()
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("api_key", &Redact::from(&self.api_key))
            .field("api_secret", &Redact::from(&self.api_secret))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid() {
        assert!(Credential::new("key", "secret").is_valid());
        assert!(!Credential::new("", "secret").is_valid());
        assert!(!Credential::new("key", "").is_valid());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let cred = Credential::new("abcdefghijklmnop", "super-secret-value");
        let out = format!("{cred:?}");
        assert!(!out.contains("super-secret-value"));
        assert!(out.contains("abc***nop"));
    }
}
