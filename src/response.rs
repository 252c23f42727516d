//! Response classification.

use bytes::Bytes;
use http::StatusCode;
use serde::Deserialize;

use crate::{Error, Result};

/// Structured error body returned by the API on non-success statuses.
///
/// Both fields are optional on the wire; a failure is only classified as
/// an API error when both are present.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorPayload {
    pub code: Option<i64>,
    pub message: Option<String>,
}

/// Classify an HTTP response into success bytes or a typed failure.
///
/// - 2xx statuses pass the raw body through untouched; payload decoding
///   is the envelope codec's job.
/// - Any other status is inspected for the `{code, message}` error
///   shape. When both fields parse, the failure carries the status, the
///   raw code, its classification, and the server message.
/// - A missing or malformed error body degrades to a failure carrying
///   the status alone.
///
/// This function never fails in a way that isn't a returned `Error`.
pub(crate) fn classify(status: StatusCode, body: Bytes) -> Result<Bytes> {
    if status.is_success() {
        return Ok(body);
    }

    if let Ok(payload) = serde_json::from_slice::<ErrorPayload>(&body) {
        if let (Some(code), Some(message)) = (payload.code, payload.message) {
            return Err(Error::api(status, code, message));
        }
    }

    Err(Error::api_status(status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ApiErrorCode, ErrorKind};

    #[test]
    fn test_success_passes_body_through() {
        let body = Bytes::from_static(b"{\"data\":{}}");
        let out = classify(StatusCode::OK, body.clone()).unwrap();
        assert_eq!(out, body);
    }

    #[test]
    fn test_success_with_unparseable_body_is_still_success() {
        // Classification does not look inside 2xx bodies; a payload that
        // later fails to decode is a decode error, not an API error.
        let out = classify(StatusCode::OK, Bytes::from_static(b"not json"));
        assert!(out.is_ok());
    }

    #[test]
    fn test_structured_error_body() {
        let body = Bytes::from_static(br#"{"code": 4000000, "message": "bad revision"}"#);
        let err = classify(StatusCode::BAD_REQUEST, body).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(err.status_code(), Some(StatusCode::BAD_REQUEST));
        assert_eq!(err.raw_api_code(), Some(4000000));
        assert_eq!(err.api_error(), Some(ApiErrorCode::BadRequest));
        assert_eq!(err.to_string(), "bad revision");
    }

    #[test]
    fn test_unknown_error_code_preserved() {
        let body = Bytes::from_static(br#"{"code": 9999999, "message": "mystery"}"#);
        let err = classify(StatusCode::BAD_REQUEST, body).unwrap_err();

        assert_eq!(err.api_error(), None);
        assert_eq!(err.raw_api_code(), Some(9999999));
        assert_eq!(err.to_string(), "mystery");
    }

    #[test]
    fn test_unparseable_error_body_keeps_status_only() {
        let err = classify(StatusCode::BAD_GATEWAY, Bytes::from_static(b"<html>")).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(err.status_code(), Some(StatusCode::BAD_GATEWAY));
        assert_eq!(err.raw_api_code(), None);
        assert_eq!(err.api_error(), None);
    }

    #[test]
    fn test_error_body_missing_message_keeps_status_only() {
        let body = Bytes::from_static(br#"{"code": 4000000}"#);
        let err = classify(StatusCode::BAD_REQUEST, body).unwrap_err();

        assert_eq!(err.raw_api_code(), None);
        assert_eq!(err.status_code(), Some(StatusCode::BAD_REQUEST));
    }
}
