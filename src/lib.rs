//! Client for the Apple News publishing API.
//!
//! Every operation runs the same authenticated pipeline: build the
//! request URL, serialize the body, sign with a date-stamped HMAC,
//! send through an injectable transport, classify the response, and
//! decode the enveloped payload. Failures never cross the public
//! boundary as panics; everything comes back as a typed [`Error`].
//!
//! ## Overview
//!
//! - [`Client`]: construction, the request pipeline, and one method per
//!   API operation (channels, articles, sections).
//! - [`Signer`]: the `HHMAC` authorization header, recomputed per call
//!   with a fresh timestamp.
//! - [`HttpSend`]: the transport seam. The default implementation uses
//!   `reqwest`; tests substitute a fake.
//! - [`Envelope`] / [`ListEnvelope`]: the wire's `data` wrapper, split
//!   into a required payload plus best-effort side projections.
//! - [`Error`] / [`ApiErrorCode`]: the failure taxonomy, including the
//!   API's closed set of numeric error codes with raw-code fallback.
//!
//! ## Example
//!
//! ```no_run
//! use newswire::Client;
//!
//! # async fn example() -> newswire::Result<()> {
//! let client = Client::new("my-api-key", "my-api-secret")?;
//!
//! let search = client.search_articles("my-channel", None, None).await?;
//! for article in &search.data {
//!     println!("{}: {}", article.id, article.title);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The client never retries: callers that care about
//! [`ApiErrorCode::RateLimitExceeded`] or
//! [`ApiErrorCode::InternalRetryable`] implement their own policy on
//! top of the returned classification.

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod models;
pub mod time;
pub mod utils;

mod client;
pub use client::Client;
mod credential;
pub use credential::Credential;
mod envelope;
pub use envelope::{Envelope, ListEnvelope, ListLinks, ListMeta};
mod error;
pub use error::{ApiErrorCode, Error, ErrorKind, Result};
mod http;
pub use http::{HttpSend, ReqwestHttpSend};
mod response;
mod sign;
pub use sign::Signer;
