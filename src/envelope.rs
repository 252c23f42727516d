//! Enveloped response codec.
//!
//! The API wraps every singular resource in a `data` object that mixes
//! the resource's own fields with auxiliary link and metadata fields:
//!
//! ```json
//! { "data": { "id": "...", "shareUrl": "...", "revision": "..." } }
//! ```
//!
//! [`Envelope`] splits that one object into a required payload and up to
//! three best-effort side projections decoded independently from the
//! same object. List endpoints use a different shape, where `data` is an
//! array and the pagination keys sit beside it rather than inside it;
//! [`ListEnvelope`] covers that.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// A singular resource response.
///
/// `P` is the payload and is required: if the `data` object does not
/// decode into it, the whole envelope fails to decode. `L`, `M` and `X`
/// are attempted against the same `data` object and come back `None`
/// when absent or shaped differently, never failing the envelope.
///
/// Encoding flattens all present components back into one `data`
/// object. Components are written in payload, links, meta, metadata
/// order; on a field-name collision the later write wins.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope<P, L = (), M = (), X = ()> {
    /// The resource itself.
    pub payload: P,
    /// Related-resource links, when the server included them.
    pub links: Option<L>,
    /// Auxiliary metadata, when the server included it.
    pub meta: Option<M>,
    /// Extra operation metadata, when the server included it.
    pub metadata: Option<X>,
}

impl<P, L, M, X> Envelope<P, L, M, X> {
    /// Wrap a bare payload with no side components.
    pub fn new(payload: P) -> Self {
        Self {
            payload,
            links: None,
            meta: None,
            metadata: None,
        }
    }
}

impl<'de, P, L, M, X> Deserialize<'de> for Envelope<P, L, M, X>
where
    P: DeserializeOwned,
    L: DeserializeOwned,
    M: DeserializeOwned,
    X: DeserializeOwned,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut root = Map::deserialize(deserializer)?;
        let data = root
            .remove("data")
            .ok_or_else(|| serde::de::Error::missing_field("data"))?;

        // The payload is decoded first and is the only required
        // projection. The side components each get an independent
        // attempt at the same object; a shape mismatch means absent.
        let payload = serde_json::from_value(data.clone()).map_err(serde::de::Error::custom)?;
        let links = serde_json::from_value(data.clone()).ok();
        let meta = serde_json::from_value(data.clone()).ok();
        let metadata = serde_json::from_value(data).ok();

        Ok(Envelope {
            payload,
            links,
            meta,
            metadata,
        })
    }
}

impl<P, L, M, X> Serialize for Envelope<P, L, M, X>
where
    P: Serialize,
    L: Serialize,
    M: Serialize,
    X: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::Error;

        let mut data = to_object(&self.payload).map_err(S::Error::custom)?;
        for part in [
            self.links.as_ref().map(to_object).transpose(),
            self.meta.as_ref().map(to_object).transpose(),
            self.metadata.as_ref().map(to_object).transpose(),
        ] {
            if let Some(fields) = part.map_err(S::Error::custom)? {
                data.extend(fields);
            }
        }

        let mut root = Map::with_capacity(1);
        root.insert("data".to_string(), Value::Object(data));
        root.serialize(serializer)
    }
}

/// Serialize a component into its flat field map.
fn to_object<T: Serialize>(value: &T) -> Result<Map<String, Value>, String> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(format!(
            "envelope component must serialize to an object, got {other}"
        )),
        Err(e) => Err(e.to_string()),
    }
}

/// Pagination links on a list response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListLinks {
    /// Endpoint that produced this page.
    #[serde(rename = "self")]
    pub current: String,
    /// Endpoint for the next page.
    pub next: String,
}

/// Pagination metadata on a list response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMeta {
    /// Opaque token for requesting the next page.
    ///
    /// The client surfaces this but never follows it.
    pub next_page_token: i64,
}

/// A list response: `data` holds an array of payloads and the
/// pagination keys are siblings of `data`, not merged into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListEnvelope<P> {
    /// The page of resources.
    pub data: Vec<P>,
    /// Pagination links, when present and well-formed.
    #[serde(default, deserialize_with = "best_effort", skip_serializing_if = "Option::is_none")]
    pub links: Option<ListLinks>,
    /// Pagination metadata, when present and well-formed.
    #[serde(default, deserialize_with = "best_effort", skip_serializing_if = "Option::is_none")]
    pub meta: Option<ListMeta>,
}

/// Decode a field if it matches the target shape, absent otherwise.
fn best_effort<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}
