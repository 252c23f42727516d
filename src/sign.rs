//! HHMAC authorization for the publishing API.

use std::fmt::Write;

use log::debug;

use crate::credential::Credential;
use crate::hash::{base64_hmac_sha256, hex_sha256};
use crate::time::{format_signing_date, now, DateTime};
use crate::Result;

/// Signer that produces the `HHMAC` authorization header.
///
/// Every call signs fresh: the canonical string embeds a wall-clock
/// timestamp, so two signatures of the same request differ across calls.
#[derive(Debug, Clone)]
pub struct Signer {
    credential: Credential,
    time: Option<DateTime>,
}

impl Signer {
    /// Create a signer for the given credential.
    pub fn new(credential: Credential) -> Self {
        Self {
            credential,
            time: None,
        }
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    #[cfg(test)]
    pub(crate) fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Build the authorization header value for a request.
    ///
    /// `url` is the absolute request URL including any query string,
    /// exactly as it will be sent. `body` is the raw request body when
    /// one is present.
    pub fn authorization(&self, method: &str, url: &str, body: Option<&[u8]>) -> Result<String> {
        let date = format_signing_date(self.time.unwrap_or_else(now));

        let canonical = canonical_string(method, url, &date, body)?;
        let signature = base64_hmac_sha256(self.credential.api_secret.as_bytes(), canonical.as_bytes());

        Ok(format!(
            "HHMAC; key={}; signature={signature}; date={date}",
            self.credential.api_key
        ))
    }
}

/// Construct the canonical string to sign.
///
/// ## Format
///
/// ```text
/// METHOD + URL + DATE [+ "application/json" + hex(sha256(BODY))]
/// ```
///
/// The content type and body hash are appended only when a body is
/// present. The content type contributed here is always the literal
/// `application/json` regardless of how the body is sent.
fn canonical_string(method: &str, url: &str, date: &str, body: Option<&[u8]>) -> Result<String> {
    let mut s = String::new();
    s.write_str(method)?;
    s.write_str(url)?;
    s.write_str(date)?;

    if let Some(body) = body {
        s.write_str("application/json")?;
        s.write_str(&hex_sha256(body))?;
    }

    debug!("string to sign: {}", &s);
    Ok(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono::Utc;

    fn test_signer() -> Signer {
        Signer::new(Credential::new("test-key", "test-secret"))
            .with_time(Utc.with_ymd_and_hms(2022, 3, 13, 7, 20, 4).unwrap())
    }

    #[test]
    fn test_canonical_string_without_body() -> Result<()> {
        let s = canonical_string(
            "GET",
            "https://news-api.apple.com/channels/c1",
            "2022-03-13T07:20:04+00:00",
            None,
        )?;
        assert_eq!(
            s,
            "GEThttps://news-api.apple.com/channels/c12022-03-13T07:20:04+00:00"
        );
        Ok(())
    }

    #[test]
    fn test_canonical_string_with_body() -> Result<()> {
        let s = canonical_string("POST", "https://example.com/a", "2022-03-13T07:20:04+00:00", Some(b"{}"))?;
        assert_eq!(
            s,
            format!(
                "POSThttps://example.com/a2022-03-13T07:20:04+00:00application/json{}",
                hex_sha256(b"{}")
            )
        );
        Ok(())
    }

    #[test]
    fn test_authorization_is_deterministic_with_fixed_time() -> Result<()> {
        let signer = test_signer();

        let a = signer.authorization("GET", "https://news-api.apple.com/channels/c1", None)?;
        let b = signer.authorization("GET", "https://news-api.apple.com/channels/c1", None)?;
        assert_eq!(a, b);

        assert!(a.starts_with("HHMAC; key=test-key; signature="));
        assert!(a.ends_with("; date=2022-03-13T07:20:04+00:00"));
        Ok(())
    }

    #[test]
    fn test_authorization_exact_value() -> Result<()> {
        let signer = test_signer();
        let header = signer.authorization("GET", "https://news-api.apple.com/channels/c1", None)?;

        let canonical = "GEThttps://news-api.apple.com/channels/c12022-03-13T07:20:04+00:00";
        let expected = format!(
            "HHMAC; key=test-key; signature={}; date=2022-03-13T07:20:04+00:00",
            base64_hmac_sha256(b"test-secret", canonical.as_bytes())
        );
        assert_eq!(header, expected);
        Ok(())
    }

    #[test]
    fn test_signature_changes_with_any_input() -> Result<()> {
        let signer = test_signer();
        let base = signer.authorization("GET", "https://example.com/a", None)?;

        assert_ne!(signer.authorization("POST", "https://example.com/a", None)?, base);
        assert_ne!(signer.authorization("GET", "https://example.com/b", None)?, base);
        assert_ne!(signer.authorization("GET", "https://example.com/a", Some(b"{}"))?, base);
        Ok(())
    }

    #[test]
    fn test_signature_changes_with_single_body_byte() -> Result<()> {
        let signer = test_signer();
        let a = signer.authorization("POST", "https://example.com/a", Some(b"{\"a\":1}"))?;
        let b = signer.authorization("POST", "https://example.com/a", Some(b"{\"a\":2}"))?;
        assert_ne!(a, b);
        Ok(())
    }
}
