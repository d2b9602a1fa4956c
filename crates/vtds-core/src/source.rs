//! Input records produced by the external scrapers.
//!
//! The vpost directory scraper and the YouTube search scraper run as separate
//! processes; their output files are consumed here read-only and merged into
//! [`crate::merged::MergedVtuber`] records by the builder.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Per-person summary row from the vpost directory listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VpostVtuber {
    pub name: String,
    #[serde(default)]
    pub youtube_id: Option<String>,
    #[serde(default)]
    pub youtube_description: Option<String>,
    /// Subscriber count as shown on the directory page.
    #[serde(default)]
    pub registrants_n: Option<u64>,
    /// Total view count.
    #[serde(default)]
    pub play_times: Option<u64>,
    /// Declared upload count.
    #[serde(default)]
    pub upload_videos: Option<u64>,
    #[serde(default)]
    pub group_name: Option<String>,
}

/// One recent video listed on a vpost detail page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VpostVideo {
    pub video_id: String,
    #[serde(default)]
    pub title: Option<String>,
    /// Directory pages show `%Y/%m/%d %H:%M` in JST.
    #[serde(with = "crate::time::vpost_timestamp")]
    pub timestamp: DateTime<FixedOffset>,
    #[serde(default)]
    pub view_n: Option<u64>,
    #[serde(default)]
    pub good: Option<u64>,
}

impl VpostVideo {
    /// Convert into the platform video shape used by the upload caches.
    /// Directory pages carry no description.
    #[must_use]
    pub fn into_youtube_video(self) -> crate::merged::YoutubeVideo {
        crate::merged::YoutubeVideo {
            video_id: self.video_id,
            title: self.title,
            description: None,
            timestamp: Some(self.timestamp),
        }
    }
}

/// Per-person detail page from the vpost directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VpostDetail {
    pub youtube_id: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Social handle as scraped; may carry a leading `@`.
    #[serde(default)]
    pub twitter_id: Option<String>,
    #[serde(default)]
    pub recent_videos: Vec<VpostVideo>,
}

/// Channel row produced by the YouTube search scraper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchedChannel {
    pub channel_id: String,
    pub title: String,
    pub description: String,
    pub publish_time: DateTime<FixedOffset>,
    pub upload_list_id: String,
    pub view_count: u64,
    /// `None` when the channel hides it.
    #[serde(default)]
    pub subscriber_count: Option<u64>,
    pub video_count: u64,
}
