//! Entity schema for the merged per-VTuber record.
//!
//! A [`MergedVtuber`] is created the first time an id is observed from either
//! source (the vpost directory or YouTube search) and is progressively
//! enriched by the collectors. It is keyed by the YouTube channel id, which
//! both sources agree on.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::missing::Maybe;

/// One upload from a channel's playlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YoutubeVideo {
    pub video_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Publication time, normalized to JST. `None` while unknown.
    #[serde(default)]
    pub timestamp: Option<DateTime<FixedOffset>>,
}

impl YoutubeVideo {
    /// Canonical watch URL for this video.
    #[must_use]
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.video_id)
    }
}

/// Channel-level metadata merged from both sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YoutubeChannel {
    pub channel_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub channel_description: Option<String>,
    #[serde(default)]
    pub publish_time: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub subscriber_count: Option<u64>,
    #[serde(default)]
    pub view_count: Option<u64>,
    /// Video count as declared by the channel metadata.
    #[serde(default)]
    pub video_count: Option<u64>,
    /// How many uploads we have actually retrieved into the cache.
    /// Kept separate from `video_count`: that one is authoritative metadata,
    /// this one is collection progress.
    #[serde(default)]
    pub got_video_count: Option<u64>,
}

impl YoutubeChannel {
    /// Bare record carrying only the channel id.
    #[must_use]
    pub fn new(channel_id: impl Into<String>) -> Self {
        Self {
            channel_id: channel_id.into(),
            name: None,
            channel_description: None,
            publish_time: None,
            subscriber_count: None,
            view_count: None,
            video_count: None,
            got_video_count: None,
        }
    }

    /// Whether the full upload history has been retrieved.
    ///
    /// False when either count is still unknown.
    #[must_use]
    pub fn got_upload_list(&self) -> bool {
        match (self.got_video_count, self.video_count) {
            (Some(got), Some(declared)) => got >= declared,
            _ => false,
        }
    }
}

/// A discovered Twitter account. Only the handle is guaranteed; the rest is
/// filled by the (currently unavailable) detail fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwitterAccount {
    /// Handle without the leading `@`.
    pub twitter_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub profile_text: Option<String>,
    #[serde(default)]
    pub header_url: Option<String>,
    #[serde(default)]
    pub icon_url: Option<String>,
    #[serde(default)]
    pub follower_count: Option<u64>,
    #[serde(default)]
    pub follow_count: Option<u64>,
    #[serde(default)]
    pub recent_tweet_urls: Option<Vec<String>>,
    #[serde(default)]
    pub pinned_tweet_url: Option<String>,
}

impl TwitterAccount {
    /// Create an account reference from a raw handle, stripping a leading `@`.
    #[must_use]
    pub fn new(handle: &str) -> Self {
        Self {
            twitter_id: handle.trim_start_matches('@').to_owned(),
            name: None,
            profile_text: None,
            header_url: None,
            icon_url: None,
            follower_count: None,
            follow_count: None,
            recent_tweet_urls: None,
            pinned_tweet_url: None,
        }
    }
}

/// Aggregate root: everything known about one VTuber.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedVtuber {
    /// Stable person id; identical to `youtube.channel_id`.
    pub vtuber_id: String,
    /// When this record was first created.
    pub create_at: DateTime<FixedOffset>,
    pub youtube: YoutubeChannel,
    #[serde(default)]
    pub target_video: Maybe<YoutubeVideo>,
    #[serde(default)]
    pub twitter: Maybe<TwitterAccount>,
}

impl MergedVtuber {
    /// Fresh record for an id first seen now, with both collector-populated
    /// slots unacquired.
    #[must_use]
    pub fn new(vtuber_id: impl Into<String>, youtube: YoutubeChannel) -> Self {
        Self {
            vtuber_id: vtuber_id.into(),
            create_at: crate::time::now_jst(),
            youtube,
            target_video: Maybe::default(),
            twitter: Maybe::default(),
        }
    }
}
