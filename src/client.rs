//! The publishing API client.

use std::sync::Arc;

use bytes::Bytes;
use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use http::{HeaderValue, Method, Uri};
use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::credential::Credential;
use crate::http::{HttpSend, ReqwestHttpSend, MAX_RESPONSE_SIZE};
use crate::models::{
    ArticleResponse, ChannelResponse, SearchResponse, SectionListResponse, SectionResponse,
};
use crate::response::classify;
use crate::sign::Signer;
use crate::time::{format_query_date, DateTime};
use crate::{Error, Result};

/// The production API host.
const PRODUCTION_ENDPOINT: &str = "https://news-api.apple.com";

/// User agent sent with every request.
const USER_AGENT_VALUE: &str = concat!("newswire/", env!("CARGO_PKG_VERSION"));

/// Request body accepted by the pipeline.
///
/// At most one body per request: either a payload serialized to JSON or
/// raw bytes with an explicit content type.
enum RequestBody {
    Json(Vec<u8>),
    Raw(Bytes, &'static str),
}

impl RequestBody {
    fn json(payload: &impl Serialize) -> Result<Self> {
        let bytes = serde_json::to_vec(payload)
            .map_err(|e| Error::request_invalid("failed to serialize request body").with_source(e))?;
        Ok(Self::Json(bytes))
    }

    fn into_parts(self) -> (Bytes, &'static str) {
        match self {
            Self::Json(bytes) => (Bytes::from(bytes), "application/json"),
            Self::Raw(bytes, content_type) => (bytes, content_type),
        }
    }
}

/// Client for the publishing API.
///
/// Holds the immutable credential and a shared transport; cloning is
/// cheap and clones share the transport's connection pool. Every
/// operation is an independent sign, send, classify, decode sequence
/// with no state carried between calls, so a single client may be used
/// concurrently from many tasks. Dropping the last clone tears the
/// transport down.
///
/// # Example
///
/// ```no_run
/// use newswire::Client;
///
/// # async fn example() -> newswire::Result<()> {
/// let client = Client::new("my-api-key", "my-api-secret")?;
/// let channel = client.read_channel("channel-id").await?;
/// println!("channel name: {}", channel.payload.name);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    signer: Signer,
    endpoint: String,
    http: Arc<dyn HttpSend>,
}

impl Client {
    /// Create a client for the production API.
    ///
    /// Fails with a configuration error if either the key or the secret
    /// is empty; nothing is sent on this path.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Result<Self> {
        let credential = Credential::new(api_key, api_secret);
        if !credential.is_valid() {
            return Err(Error::config_invalid(
                "api key and api secret must be non-empty",
            ));
        }

        let http = ReqwestHttpSend::build()
            .map_err(|e| Error::config_invalid("failed to build http transport").with_source(e))?;

        Ok(Self {
            signer: Signer::new(credential),
            endpoint: PRODUCTION_ENDPOINT.to_string(),
            http: Arc::new(http),
        })
    }

    /// Replace the HTTP transport implementation.
    ///
    /// This is the seam tests use to substitute a fake transport.
    pub fn with_http_send(mut self, http: impl HttpSend) -> Self {
        self.http = Arc::new(http);
        self
    }

    /// Point the client at a different host.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Build the absolute request URL from a path and query pairs.
    ///
    /// Each (name, value) pair becomes one query item; no pairs means no
    /// query string. An unparseable result is a pre-send failure.
    fn build_url(&self, path: &str, query: &[(&str, String)]) -> Result<String> {
        let mut url = format!("{}{}", self.endpoint, path);
        if !query.is_empty() {
            let qs = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())))
                .finish();
            url.push('?');
            url.push_str(&qs);
        }

        url.parse::<Uri>()?;
        Ok(url)
    }

    /// Run one request through the pipeline and return the success body.
    ///
    /// Build URL, serialize body, sign, send, cap the collected body,
    /// classify. Entirely linear; every failure becomes an `Error`.
    async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<RequestBody>,
    ) -> Result<Bytes> {
        let url = self.build_url(path, query)?;

        let (body_bytes, content_type) = match body {
            Some(body) => {
                let (bytes, content_type) = body.into_parts();
                (Some(bytes), Some(content_type))
            }
            None => (None, None),
        };

        let authorization =
            self.signer
                .authorization(method.as_str(), &url, body_bytes.as_deref())?;

        let mut builder = http::Request::builder()
            .method(method.clone())
            .uri(url.as_str())
            .header(USER_AGENT, USER_AGENT_VALUE)
            .header(AUTHORIZATION, {
                let mut value: HeaderValue = authorization.parse()?;
                value.set_sensitive(true);
                value
            })
            .header(ACCEPT, "application/json");
        if let Some(content_type) = content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        let req = builder.body(body_bytes.unwrap_or_default())?;

        debug!("sending {method} {url}");
        let resp = self
            .http
            .http_send(req)
            .await
            .map_err(|e| Error::transport("failed to execute request").with_source(e))?;

        let (parts, body) = resp.into_parts();
        // The default transport already aborts collection at the cap;
        // this guards transports that hand back an unbounded body.
        if body.len() > MAX_RESPONSE_SIZE {
            return Err(Error::transport("response body too large").with_source(anyhow::anyhow!(
                "collected {} bytes, limit is {MAX_RESPONSE_SIZE}",
                body.len()
            )));
        }

        classify(parts.status, body)
    }

    /// Run a request and decode the success body into `R`.
    async fn request_decode<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<RequestBody>,
    ) -> Result<R> {
        let bytes = self.request(method, path, query, body).await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| Error::decode("response body did not match the expected shape").with_source(e))
    }
}

/// Request body for promoting an article into a section.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PromoteRequest<'a> {
    section_id: &'a str,
}

impl Client {
    /// Read channel information.
    pub async fn read_channel(&self, channel_id: &str) -> Result<ChannelResponse> {
        self.request_decode(Method::GET, &format!("/channels/{channel_id}"), &[], None)
            .await
    }

    /// Create an article in a channel.
    ///
    /// `article` is the article document as raw JSON bytes, passed
    /// through unmodified.
    pub async fn create_article(
        &self,
        channel_id: &str,
        article: impl Into<Bytes>,
    ) -> Result<ArticleResponse> {
        self.request_decode(
            Method::POST,
            &format!("/channels/{channel_id}/articles"),
            &[],
            Some(RequestBody::Raw(article.into(), "application/json")),
        )
        .await
    }

    /// Read article information.
    pub async fn read_article(&self, article_id: &str) -> Result<ArticleResponse> {
        self.request_decode(Method::GET, &format!("/articles/{article_id}"), &[], None)
            .await
    }

    /// Update an article.
    ///
    /// `revision` must be the article's current revision token; the
    /// server rejects stale revisions with a conflict.
    pub async fn update_article(
        &self,
        article_id: &str,
        revision: &str,
        article: impl Into<Bytes>,
    ) -> Result<ArticleResponse> {
        self.request_decode(
            Method::POST,
            &format!("/articles/{article_id}"),
            &[("revision", revision.to_string())],
            Some(RequestBody::Raw(article.into(), "application/json")),
        )
        .await
    }

    /// Delete an article.
    pub async fn delete_article(&self, article_id: &str) -> Result<()> {
        self.request(Method::DELETE, &format!("/articles/{article_id}"), &[], None)
            .await?;
        Ok(())
    }

    /// Search for articles in a channel.
    ///
    /// `from_date` and `to_date` bound the search when given; each
    /// becomes one ISO-8601 query parameter. The response surfaces the
    /// next-page token but the client never follows it.
    pub async fn search_articles(
        &self,
        channel_id: &str,
        from_date: Option<DateTime>,
        to_date: Option<DateTime>,
    ) -> Result<SearchResponse> {
        let mut query = Vec::new();
        if let Some(from) = from_date {
            query.push(("fromDate", format_query_date(from)));
        }
        if let Some(to) = to_date {
            query.push(("toDate", format_query_date(to)));
        }

        self.request_decode(
            Method::GET,
            &format!("/channels/{channel_id}/articles"),
            &query,
            None,
        )
        .await
    }

    /// Read section information.
    pub async fn read_section(&self, section_id: &str) -> Result<SectionResponse> {
        self.request_decode(Method::GET, &format!("/sections/{section_id}"), &[], None)
            .await
    }

    /// List sections in a channel.
    pub async fn list_sections(&self, channel_id: &str) -> Result<SectionListResponse> {
        self.request_decode(
            Method::GET,
            &format!("/channels/{channel_id}/sections"),
            &[],
            None,
        )
        .await
    }

    /// Promote an article to a section.
    pub async fn promote_article(&self, article_id: &str, section_id: &str) -> Result<()> {
        let body = RequestBody::json(&PromoteRequest { section_id })?;
        self.request(
            Method::POST,
            &format!("/articles/{article_id}/promote"),
            &[],
            Some(body),
        )
        .await?;
        Ok(())
    }
}
