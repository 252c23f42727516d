use http::StatusCode;
use std::fmt;
use thiserror::Error;

/// The error type for newswire operations.
///
/// Every failure the client produces is one of these; nothing panics or
/// escapes across the public boundary. The optional fields are populated
/// depending on how far the request got before failing: a malformed URL
/// has no status code, a transport failure has only a source, and a
/// structured API error carries the status, the raw wire code, and the
/// classified [`ApiErrorCode`] when the code is a known one.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    status_code: Option<StatusCode>,
    raw_api_code: Option<i64>,
    api_error: Option<ApiErrorCode>,
    #[source]
    source: Option<anyhow::Error>,
}

/// The kind of error that occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Client configuration is invalid (empty credentials, bad endpoint).
    ConfigInvalid,

    /// The request could not be built, nothing was sent.
    RequestInvalid,

    /// Sending the request or reading the response failed.
    Transport,

    /// The server returned a non-success status.
    Api,

    /// The response status was success but the payload did not match the
    /// expected shape.
    Decode,
}

/// Semantic error codes returned by the publishing API.
///
/// The wire carries a numeric code; this is the closed set of codes the
/// API documents. Codes outside this set are preserved raw on the
/// [`Error`] with no classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorCode {
    /// The request was invalid.
    BadRequest,
    /// Authentication failed.
    AuthenticationFailed,
    /// Insufficient permissions.
    Forbidden,
    /// The resource was not found.
    NotFound,
    /// The request conflicts with the current state of the resource.
    Conflict,
    /// The request entity is too large.
    EntityTooLarge,
    /// Too many requests.
    RateLimitExceeded,
    /// A general internal error.
    Internal,
    /// An unknown internal error occurred, but the request can be retried.
    InternalRetryable,
}

impl ApiErrorCode {
    /// Look up the semantic error for a wire code.
    ///
    /// Returns `None` for codes outside the documented set.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            4000000 => Some(Self::BadRequest),
            4010000 => Some(Self::AuthenticationFailed),
            4030000 => Some(Self::Forbidden),
            4040000 => Some(Self::NotFound),
            4090000 => Some(Self::Conflict),
            4130000 => Some(Self::EntityTooLarge),
            4290000 => Some(Self::RateLimitExceeded),
            5000000 => Some(Self::Internal),
            5000001 => Some(Self::InternalRetryable),
            _ => None,
        }
    }

    /// The numeric wire code for this error.
    pub fn code(&self) -> i64 {
        match self {
            Self::BadRequest => 4000000,
            Self::AuthenticationFailed => 4010000,
            Self::Forbidden => 4030000,
            Self::NotFound => 4040000,
            Self::Conflict => 4090000,
            Self::EntityTooLarge => 4130000,
            Self::RateLimitExceeded => 4290000,
            Self::Internal => 5000000,
            Self::InternalRetryable => 5000001,
        }
    }
}

impl Error {
    /// Create a new error with the given kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status_code: None,
            raw_api_code: None,
            api_error: None,
            source: None,
        }
    }

    /// Add a source error.
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Attach the HTTP status of the response that produced this error.
    pub fn with_status_code(mut self, status: StatusCode) -> Self {
        self.status_code = Some(status);
        self
    }

    /// Get the error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// HTTP status of the failed response, if a response was received.
    pub fn status_code(&self) -> Option<StatusCode> {
        self.status_code
    }

    /// Raw numeric error code from the response body, if one was parsed.
    pub fn raw_api_code(&self) -> Option<i64> {
        self.raw_api_code
    }

    /// Classified API error, if the raw code is in the documented set.
    pub fn api_error(&self) -> Option<ApiErrorCode> {
        self.api_error
    }

    /// Check if the server explicitly marked this error retryable.
    ///
    /// The client never retries on its own; this is a convenience for
    /// callers implementing their own policy.
    pub fn is_retryable(&self) -> bool {
        matches!(self.api_error, Some(ApiErrorCode::InternalRetryable))
    }
}

// Convenience constructors
impl Error {
    /// Create a config invalid error.
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }

    /// Create a request invalid error.
    pub fn request_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RequestInvalid, message)
    }

    /// Create a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }

    /// Create a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Decode, message)
    }

    /// Create an API error from a parsed error body.
    pub fn api(status: StatusCode, code: i64, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Api,
            message: message.into(),
            status_code: Some(status),
            raw_api_code: Some(code),
            api_error: ApiErrorCode::from_code(code),
            source: None,
        }
    }

    /// Create an API error for a non-success status with no parseable body.
    pub fn api_status(status: StatusCode) -> Self {
        Self::new(ErrorKind::Api, format!("request failed with status {status}"))
            .with_status_code(status)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::ConfigInvalid => write!(f, "invalid configuration"),
            ErrorKind::RequestInvalid => write!(f, "invalid request"),
            ErrorKind::Transport => write!(f, "transport error"),
            ErrorKind::Api => write!(f, "api error"),
            ErrorKind::Decode => write!(f, "decode error"),
        }
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, Error>;

// Common From implementations
impl From<http::Error> for Error {
    fn from(err: http::Error) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::uri::InvalidUri> for Error {
    fn from(err: http::uri::InvalidUri) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::InvalidHeaderValue> for Error {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<std::fmt::Error> for Error {
    fn from(err: std::fmt::Error) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}
