//! Domain data holders for channels, articles, and sections.
//!
//! These are plain serde structs mirroring the wire fields (camelCase on
//! the wire). Unknown wire fields are ignored on decode.

use serde::{Deserialize, Serialize};

use crate::envelope::{Envelope, ListEnvelope};
use crate::time::DateTime;

/// A publishing channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    /// Channel identifier.
    pub id: String,
    /// Resource type discriminator, `channel`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Channel display name.
    pub name: String,
    /// Public channel URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_url: Option<String>,
    /// Website associated with the channel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// When the channel was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime>,
    /// When the channel was last modified.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime>,
}

/// Links included with a channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelLinks {
    /// Endpoint for this channel.
    #[serde(rename = "self")]
    pub current: String,
    /// Endpoint for the channel's default section.
    pub default_section: String,
}

/// An article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Article identifier.
    pub id: String,
    /// Resource type discriminator, `article`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Article title.
    pub title: String,
    /// Publication state, e.g. `PROCESSING` or `LIVE`.
    pub state: String,
    /// Opaque revision token; required when updating.
    pub revision: String,
    /// Public article URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_url: Option<String>,
    /// Accessory text shown with the article.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessory_text: Option<String>,
    /// When the article was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime>,
    /// When the article was last modified.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime>,
}

/// Links included with an article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleLinks {
    /// Endpoint for this article.
    #[serde(rename = "self")]
    pub current: String,
    /// Endpoint for the article's channel.
    pub channel: String,
    /// Endpoints for the sections the article appears in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<String>>,
}

/// Throttling state reported alongside article operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Throttling {
    /// Whether the channel is currently throttled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_throttled: Option<bool>,
    /// Articles queued ahead of this one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue_size: Option<i64>,
    /// Seconds until processing is expected to begin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_delay_in_seconds: Option<i64>,
    /// Create requests still available in the current window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quota_available: Option<i64>,
}

/// Auxiliary metadata included with article responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    /// Throttling state for the owning channel.
    pub throttling: Throttling,
}

/// Extra metadata included when creating an article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleMetadata {
    /// Whether the article is a preview.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_preview: Option<bool>,
    /// Whether the article is hidden from the feed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_hidden: Option<bool>,
    /// Whether the article is sponsored content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_sponsored: Option<bool>,
    /// Whether the article is a candidate to be featured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_candidate_to_be_featured: Option<bool>,
    /// Maturity rating assigned to the article.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maturity_rating: Option<String>,
}

/// A section within a channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Section identifier.
    pub id: String,
    /// Resource type discriminator, `section`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Section display name.
    pub name: String,
    /// Whether this is the channel's default section.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
    /// Public section URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_url: Option<String>,
    /// When the section was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime>,
    /// When the section was last modified.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime>,
}

/// Links included with a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionLinks {
    /// Endpoint for this section.
    #[serde(rename = "self")]
    pub current: String,
    /// Endpoint for the section's channel.
    pub channel: String,
}

/// Response for channel reads.
pub type ChannelResponse = Envelope<Channel, ChannelLinks>;

/// Response for article reads, creates, and updates.
pub type ArticleResponse = Envelope<Article, ArticleLinks, Meta, ArticleMetadata>;

/// Response for section reads.
pub type SectionResponse = Envelope<Section, SectionLinks>;

/// Response for article searches.
pub type SearchResponse = ListEnvelope<Article>;

/// Response for section listings.
pub type SectionListResponse = ListEnvelope<Section>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_response_decodes_wire_shape() {
        let wire = br#"{
            "data": {
                "id": "article-1",
                "type": "article",
                "title": "Hello",
                "state": "LIVE",
                "revision": "rev-1",
                "shareUrl": "https://apple.news/article-1",
                "self": "https://news-api.apple.com/articles/article-1",
                "channel": "https://news-api.apple.com/channels/channel-1",
                "isPreview": false
            }
        }"#;
        let resp: ArticleResponse = serde_json::from_slice(wire).unwrap();

        assert_eq!(resp.payload.id, "article-1");
        assert_eq!(resp.payload.revision, "rev-1");
        assert_eq!(
            resp.links.as_ref().unwrap().channel,
            "https://news-api.apple.com/channels/channel-1"
        );
        // No throttling key, so the meta projection is absent.
        assert!(resp.meta.is_none());
        assert_eq!(resp.metadata.unwrap().is_preview, Some(false));
    }

    #[test]
    fn test_channel_response_tolerates_unknown_fields() {
        let wire = br#"{
            "data": {
                "id": "channel-1",
                "type": "channel",
                "name": "Tech",
                "someFutureField": {"nested": true}
            }
        }"#;
        let resp: ChannelResponse = serde_json::from_slice(wire).unwrap();

        assert_eq!(resp.payload.name, "Tech");
        assert!(resp.links.is_none());
    }
}
