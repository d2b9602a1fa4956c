//! Final dataset projection handed to the annotation tooling.
//!
//! A [`DatasetItem`] is a one-way view derived from a [`MergedVtuber`] at
//! output time. It is never merged back.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::merged::{MergedVtuber, YoutubeVideo};

/// The chosen self-introduction video, either in full or shaped down to its
/// watch URL for the downloader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TargetVideo {
    Full(YoutubeVideo),
    Url(String),
}

/// YouTube slice of a dataset item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YoutubeDatasetItem {
    pub channel_id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub target_video: TargetVideo,
}

/// One entry of the final dataset file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetItem {
    pub vtuber_id: String,
    pub create_at: DateTime<FixedOffset>,
    pub youtube: YoutubeDatasetItem,
}

impl DatasetItem {
    /// Project a merged record into a dataset item.
    ///
    /// `shaped` emits only the video watch URL instead of the full video
    /// record. Returns `None` when no concrete target video has been chosen;
    /// the content filters should have removed such records already.
    #[must_use]
    pub fn from_merged(data: &MergedVtuber, shaped: bool) -> Option<Self> {
        let video = data.target_video.as_known()?;
        let target_video = if shaped {
            TargetVideo::Url(video.watch_url())
        } else {
            TargetVideo::Full(video.clone())
        };

        Some(Self {
            vtuber_id: data.vtuber_id.clone(),
            create_at: data.create_at,
            youtube: YoutubeDatasetItem {
                channel_id: data.youtube.channel_id.clone(),
                name: data.youtube.name.clone(),
                target_video,
            },
        })
    }
}
