//! HTTP client for the YouTube Data API v3 `playlistItems` endpoint.
//!
//! Wraps `reqwest` with the error taxonomy the collection loop depends on:
//! a deleted channel (404) is an empty upload list, quota exhaustion (403) is
//! fatal, and anything else is a per-channel failure the caller may skip.

use std::time::Duration;

use reqwest::{Client, Url};

use vtds_core::merged::YoutubeVideo;

use crate::error::YoutubeError;
use crate::types::PlaylistItemsResponse;

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3/";

/// Page size for `playlistItems`; 50 is the API maximum.
const PAGE_SIZE: u32 = 50;

/// Maximum number of pages to fetch for one channel before returning an
/// error. Prevents infinite loops on cycling page tokens.
const MAX_PAGES: usize = 200;

/// Derives the uploads playlist id from a channel id.
///
/// Channel ids start with `UC`; the matching uploads playlist swaps that
/// prefix for `UU`. Ids already starting with `UU` pass through unchanged.
/// This is an observed convention, not documented API behavior — if it stops
/// working, switch to querying the channel's `contentDetails`.
pub(crate) fn uploads_playlist_id(channel_id: &str) -> Option<String> {
    if let Some(rest) = channel_id.strip_prefix("UC") {
        Some(format!("UU{rest}"))
    } else if channel_id.starts_with("UU") {
        Some(channel_id.to_owned())
    } else {
        None
    }
}

/// Client for the YouTube Data API.
///
/// Use [`YoutubeClient::new`] for production or
/// [`YoutubeClient::with_base_url`] to point at a mock server in tests.
pub struct YoutubeClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl YoutubeClient {
    /// Creates a client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, YoutubeError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`YoutubeError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`YoutubeError::UnexpectedStatus`] if `base_url` is
    /// not parseable.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, YoutubeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Ensure exactly one trailing slash so joined paths land under the
        // base rather than replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|_| YoutubeError::UnexpectedStatus {
            status: 0,
            url: normalised,
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Fetches the complete upload list for a channel, following
    /// `nextPageToken` until exhausted. Videos arrive in the API's playlist
    /// order (newest first).
    ///
    /// A channel whose uploads playlist no longer exists (HTTP 404) yields an
    /// empty list, not an error: directory-sourced ids regularly point at
    /// deleted channels.
    ///
    /// # Errors
    ///
    /// - [`YoutubeError::QuotaExceeded`] — HTTP 403; the caller must abort
    ///   the whole run.
    /// - [`YoutubeError::InvalidChannelId`] — id has no derivable uploads
    ///   playlist.
    /// - [`YoutubeError::UnexpectedStatus`] — any other non-2xx status.
    /// - [`YoutubeError::Http`] — network or TLS failure.
    /// - [`YoutubeError::Deserialize`] — response body does not match the
    ///   expected shape.
    /// - [`YoutubeError::PaginationLimit`] — more than the page cap was
    ///   returned without exhausting the playlist.
    pub async fn list_uploads(&self, channel_id: &str) -> Result<Vec<YoutubeVideo>, YoutubeError> {
        let playlist_id = uploads_playlist_id(channel_id)
            .ok_or_else(|| YoutubeError::InvalidChannelId(channel_id.to_owned()))?;

        let mut videos: Vec<YoutubeVideo> = Vec::new();
        let mut page_token: Option<String> = None;
        let mut page_count = 0usize;

        loop {
            page_count += 1;
            if page_count > MAX_PAGES {
                return Err(YoutubeError::PaginationLimit {
                    channel_id: channel_id.to_owned(),
                    max_pages: MAX_PAGES,
                });
            }

            let page = match self.fetch_page(&playlist_id, page_token.as_deref()).await {
                Ok(page) => page,
                Err(YoutubeError::UnexpectedStatus { status: 404, .. }) => {
                    tracing::info!(channel_id, "uploads playlist not found; treating as empty");
                    return Ok(Vec::new());
                }
                Err(YoutubeError::UnexpectedStatus { status: 403, .. }) => {
                    return Err(YoutubeError::QuotaExceeded {
                        channel_id: channel_id.to_owned(),
                    });
                }
                Err(e) => return Err(e),
            };

            page_token = page.next_page_token.clone();
            videos.extend(page.items.into_iter().map(Into::into));

            if page_token.is_none() {
                break;
            }
        }

        Ok(videos)
    }

    async fn fetch_page(
        &self,
        playlist_id: &str,
        page_token: Option<&str>,
    ) -> Result<PlaylistItemsResponse, YoutubeError> {
        let url = self.playlist_items_url(playlist_id, page_token);

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(YoutubeError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str::<PlaylistItemsResponse>(&body).map_err(|e| {
            YoutubeError::Deserialize {
                context: format!("playlistItems page for {playlist_id}"),
                source: e,
            }
        })
    }

    fn playlist_items_url(&self, playlist_id: &str, page_token: Option<&str>) -> Url {
        let mut url = self.base_url.clone();
        // base_url always ends with '/', so join keeps the base path.
        if let Ok(joined) = url.join("playlistItems") {
            url = joined;
        }
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("part", "snippet")
                .append_pair("maxResults", &PAGE_SIZE.to_string())
                .append_pair("playlistId", playlist_id)
                .append_pair(
                    "fields",
                    "nextPageToken,items/snippet(publishedAt,title,description,resourceId/videoId)",
                )
                .append_pair("key", &self.api_key);
            if let Some(token) = page_token {
                pairs.append_pair("pageToken", token);
            }
        }
        url
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
