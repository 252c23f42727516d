//! HTTP transport abstraction.

use std::fmt::Debug;
use std::time::Duration;

use anyhow::{anyhow, Result};
use bytes::Bytes;
use http_body_util::{BodyExt, Limited};

/// Per-request ceiling enforced by the default transport.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Largest response body the client will buffer.
pub(crate) const MAX_RESPONSE_SIZE: usize = 1024 * 1024;

/// HttpSend is used to send http requests built by the client.
///
/// The client takes an implementation at construction, which is how
/// tests substitute a fake transport for the real one. Implementations
/// collect the full response body and should bound that collection the
/// way the default transport does; the client re-checks the collected
/// size as a guard for transports that don't.
#[async_trait::async_trait]
pub trait HttpSend: Debug + Send + Sync + 'static {
    /// Send http request and return the response.
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>>;
}

/// Collect a response body, aborting once the size cap is exceeded.
///
/// The limit applies during streaming: an oversized or unbounded body
/// fails here without being buffered past the cap.
pub(crate) async fn collect_limited<B>(body: B) -> Result<Bytes>
where
    B: http_body::Body,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    Limited::new(body, MAX_RESPONSE_SIZE)
        .collect()
        .await
        .map(|buf| buf.to_bytes())
        .map_err(|e| anyhow!("failed to collect response body: {e}"))
}

/// Default transport backed by [`reqwest`].
///
/// Holds a connection pool; cloning the client shares it. Dropping the
/// last clone releases the pool.
#[derive(Debug)]
pub struct ReqwestHttpSend {
    client: reqwest::Client,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    ///
    /// The caller's client settings are kept as-is; use this to tune
    /// pooling or TLS. [`ReqwestHttpSend::build`] applies the standard
    /// request timeout instead.
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Build the standard transport with the 30 second request timeout.
    pub fn build() -> Result<Self> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let req = reqwest::Request::try_from(req)?;
        let resp: http::Response<_> = self.client.execute(req).await?.into();

        let (parts, body) = resp.into_parts();
        let bs = collect_limited(body).await?;
        Ok(http::Response::from_parts(parts, bs))
    }
}
