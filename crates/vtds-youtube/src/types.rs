//! Response types for the `playlistItems` endpoint of the YouTube Data API v3.
//!
//! Only the fields the collector asks for via the `fields` parameter are
//! modeled: `nextPageToken` and `items/snippet(publishedAt,title,description,
//! resourceId/videoId)`.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use vtds_core::merged::YoutubeVideo;
use vtds_core::time::jst;

/// One page of a channel's uploads playlist.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemsResponse {
    #[serde(default)]
    pub next_page_token: Option<String>,
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistItem {
    pub snippet: PlaylistItemSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemSnippet {
    /// RFC 3339 UTC timestamp from the API.
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub resource_id: ResourceId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceId {
    pub video_id: String,
}

impl From<PlaylistItem> for YoutubeVideo {
    fn from(item: PlaylistItem) -> Self {
        let snippet = item.snippet;
        YoutubeVideo {
            video_id: snippet.resource_id.video_id,
            title: snippet.title,
            description: snippet.description,
            // Normalize to the dataset's fixed JST offset at ingestion.
            timestamp: snippet.published_at.map(|dt| dt.with_timezone(&jst())),
        }
    }
}
