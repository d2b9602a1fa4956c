//! Dataset builder: owns the id-keyed merged map and drives the pipeline
//! load → basic filter → collect → content filter → sample → project →
//! persist.
//!
//! Collection is strictly sequential. The external API enforces a global
//! quota, so parallel fetches would only risk bursting the rate limit with
//! no throughput gain. The merged map is checkpointed to disk every
//! `checkpoint_interval` collected records; an interrupted run resumes by
//! re-loading the checkpoint, and channels whose upload cache already exists
//! are not fetched again.

use std::collections::BTreeMap;
use std::path::PathBuf;

use rand::seq::SliceRandom;

use vtds_core::dataset::DatasetItem;
use vtds_core::merged::{MergedVtuber, TwitterAccount, YoutubeChannel};
use vtds_core::missing::Maybe;
use vtds_core::source::{SearchedChannel, VpostDetail, VpostVtuber};
use vtds_core::store;
use vtds_core::time::jst;
use vtds_twitter::TwitterCollector;
use vtds_youtube::{YoutubeCollector, YoutubeError};

use crate::error::BuildError;
use crate::filter::{
    is_self_intro_video, passes_all, tried_to_get_self_intro_video, tried_to_get_twitter_id,
    ALL_FILTERS, BASIC_FILTERS, CONTENT_FILTERS,
};

pub const MERGED_JSON_NAME: &str = "merged.json";
pub const DATASET_JSON_NAME: &str = "dataset.json";
pub const UPLOADS_DIR_NAME: &str = "uploads";

pub struct DatasetBuilder {
    merged_path: PathBuf,
    dataset_path: PathBuf,
    /// One record per vtuber id; upserted by the load methods, enriched by
    /// the collectors, never deleted.
    datum: BTreeMap<String, MergedVtuber>,
    youtube: YoutubeCollector,
    twitter: TwitterCollector,
    dataset_max: usize,
    checkpoint_interval: usize,
    pretty: bool,
    /// Emit dataset items with the video shaped down to its watch URL.
    shape_output: bool,
}

impl DatasetBuilder {
    #[must_use]
    pub fn new(
        save_dir: impl Into<PathBuf>,
        youtube: YoutubeCollector,
        twitter: TwitterCollector,
        dataset_max: usize,
        checkpoint_interval: usize,
        pretty: bool,
        shape_output: bool,
    ) -> Self {
        let save_dir = save_dir.into();
        Self {
            merged_path: save_dir.join(MERGED_JSON_NAME),
            dataset_path: save_dir.join(DATASET_JSON_NAME),
            datum: BTreeMap::new(),
            youtube,
            twitter,
            dataset_max,
            checkpoint_interval: checkpoint_interval.max(1),
            pretty,
            shape_output,
        }
    }

    #[must_use]
    pub fn records(&self) -> &BTreeMap<String, MergedVtuber> {
        &self.datum
    }

    /// Resume from an existing checkpoint, if one is on disk.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Store`] if the checkpoint exists but cannot be
    /// parsed. A missing checkpoint is a fresh start, not an error.
    pub fn load_merged(&mut self) -> Result<(), BuildError> {
        if !self.merged_path.is_file() {
            tracing::info!(path = %self.merged_path.display(), "no checkpoint found, starting fresh");
            return Ok(());
        }
        tracing::info!(path = %self.merged_path.display(), "loading merged checkpoint");
        let datum: Vec<MergedVtuber> = store::load_list(&self.merged_path)?;
        for data in datum {
            self.datum.insert(data.vtuber_id.clone(), data);
        }
        tracing::info!(records = self.datum.len(), "checkpoint loaded");
        Ok(())
    }

    /// Upsert records from the vpost directory scraper's two output files.
    ///
    /// With `overwrite` false, ids already in the map keep their existing
    /// record (idempotent incremental import). The detail pass then seeds
    /// Twitter handles and channel descriptions, and writes each person's
    /// recent videos into the per-channel upload cache.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Store`] if either input file is missing or
    /// malformed, or a cache write fails.
    pub fn load_vpost_data(
        &mut self,
        data_path: impl AsRef<std::path::Path>,
        detail_path: impl AsRef<std::path::Path>,
        overwrite: bool,
    ) -> Result<(), BuildError> {
        tracing::info!(overwrite, "loading vpost data");

        let vtubers: Vec<VpostVtuber> = store::load_list(data_path.as_ref())?;
        for data in vtubers {
            let Some(youtube_id) = data.youtube_id else {
                tracing::debug!(name = %data.name, "directory entry has no channel id, skipping");
                continue;
            };
            if !overwrite && self.datum.contains_key(&youtube_id) {
                tracing::debug!(id = %youtube_id, "already present, skipping");
                continue;
            }

            tracing::debug!(id = %youtube_id, "create or update from vpost");
            let mut channel = YoutubeChannel::new(youtube_id.clone());
            channel.name = Some(data.name);
            channel.channel_description = data.youtube_description;
            channel.subscriber_count = data.registrants_n;
            channel.view_count = data.play_times;
            channel.video_count = data.upload_videos;
            self.datum
                .insert(youtube_id.clone(), MergedVtuber::new(youtube_id, channel));
        }

        let details: Vec<VpostDetail> = store::load_list(detail_path.as_ref())?;
        for detail in details {
            let Some(data) = self.datum.get_mut(&detail.youtube_id) else {
                tracing::info!(id = %detail.youtube_id, "detail without summary record, skipping");
                continue;
            };

            data.twitter = match detail.twitter_id.as_deref().filter(|s| !s.is_empty()) {
                Some(handle) => Maybe::Known(TwitterAccount::new(handle)),
                None => Maybe::default(),
            };
            data.youtube.channel_description = detail.description;

            if !detail.recent_videos.is_empty() {
                let videos: Vec<_> = detail
                    .recent_videos
                    .into_iter()
                    .map(vtds_core::source::VpostVideo::into_youtube_video)
                    .collect();
                let cache_path = self
                    .youtube
                    .uploads_dir()
                    .join(format!("{}.json", detail.youtube_id));
                store::save_list(&videos, cache_path, self.pretty)?;
            }
        }

        tracing::info!(records = self.datum.len(), "vpost data loaded");
        self.save_merged()
    }

    /// Upsert records from the YouTube search scraper's channel file.
    ///
    /// Same upsert contract as [`Self::load_vpost_data`].
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Store`] if the input file is missing or
    /// malformed.
    pub fn load_youtube_data(
        &mut self,
        path: impl AsRef<std::path::Path>,
        overwrite: bool,
    ) -> Result<(), BuildError> {
        tracing::info!(overwrite, "loading youtube search data");

        let channels: Vec<SearchedChannel> = store::load_list(path.as_ref())?;
        for data in channels {
            if !overwrite && self.datum.contains_key(&data.channel_id) {
                tracing::debug!(id = %data.channel_id, "already present, skipping");
                continue;
            }

            let mut channel = YoutubeChannel::new(data.channel_id.clone());
            channel.name = Some(data.title);
            channel.channel_description = Some(data.description);
            channel.publish_time = Some(data.publish_time.with_timezone(&jst()));
            channel.subscriber_count = data.subscriber_count;
            channel.view_count = Some(data.view_count);
            channel.video_count = Some(data.video_count);
            self.datum.insert(
                data.channel_id.clone(),
                MergedVtuber::new(data.channel_id, channel),
            );
        }

        tracing::info!(records = self.datum.len(), "youtube search data loaded");
        self.save_merged()
    }

    /// Sync `got_video_count` from the upload caches already on disk, so a
    /// resumed run knows which channels are complete before fetching.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Store`] if a cache file is malformed.
    pub fn load_upload_counts(&mut self) -> Result<(), BuildError> {
        tracing::info!("syncing retrieved-upload counts from cache");
        for data in self.datum.values_mut() {
            let cache_path = self
                .youtube
                .uploads_dir()
                .join(format!("{}.json", data.vtuber_id));
            if !cache_path.is_file() {
                continue;
            }
            let uploads: Vec<vtds_core::merged::YoutubeVideo> = store::load_list(&cache_path)?;
            if !uploads.is_empty() {
                data.youtube.got_video_count = Some(uploads.len() as u64);
            }
        }
        self.save_merged()
    }

    /// Run the full pipeline once over the current map.
    ///
    /// Quota exhaustion aborts immediately with the checkpoint already
    /// written; per-channel fetch failures are logged and skipped.
    ///
    /// # Errors
    ///
    /// - [`BuildError::Youtube`] with
    ///   [`YoutubeError::QuotaExceeded`] when the API quota runs out.
    /// - [`BuildError::Store`] on checkpoint or cache I/O failure.
    pub async fn build(&mut self) -> Result<(), BuildError> {
        // Basic filters first: never spend an API call on a record they
        // would reject.
        let working: Vec<String> = self
            .datum
            .values()
            .filter(|data| passes_all(BASIC_FILTERS, data))
            .map(|data| data.vtuber_id.clone())
            .collect();
        tracing::info!(
            total = self.datum.len(),
            working = working.len(),
            "basic filters applied"
        );

        self.collect_upload_lists(&working).await?;
        self.select_self_intro_videos(&working)?;

        let mut working: Vec<String> = working
            .into_iter()
            .filter(|id| {
                self.datum
                    .get(id)
                    .is_some_and(|data| passes_all(CONTENT_FILTERS, data))
            })
            .collect();
        tracing::info!(working = working.len(), "content filters applied");

        self.extract_twitter_accounts(&working)?;

        working.retain(|id| {
            self.datum
                .get(id)
                .is_some_and(|data| passes_all(ALL_FILTERS, data))
        });
        tracing::info!(working = working.len(), "all filters applied");

        self.output_dataset(&working)
    }

    /// Fetch upload lists for working records whose history is neither
    /// finally selected nor confirmed complete.
    async fn collect_upload_lists(&mut self, working: &[String]) -> Result<(), BuildError> {
        let pending: Vec<String> = working
            .iter()
            .filter(|id| {
                self.datum.get(*id).is_some_and(|data| {
                    !(tried_to_get_self_intro_video(data) || data.youtube.got_upload_list())
                })
            })
            .cloned()
            .collect();
        tracing::info!(count = pending.len(), "will fetch upload lists");

        for (i, id) in pending.iter().enumerate() {
            let Some(data) = self.datum.get_mut(id) else {
                continue;
            };
            match self.youtube.collect_uploads(data).await {
                Ok(got) => tracing::debug!(id = %id, got, "upload list cached"),
                Err(e @ YoutubeError::QuotaExceeded { .. }) => {
                    // Continuing would burn the remaining quota on requests
                    // that cannot succeed. Checkpoint and stop.
                    self.save_merged()?;
                    return Err(e.into());
                }
                Err(YoutubeError::Store(e)) => {
                    self.save_merged()?;
                    return Err(BuildError::Store(e));
                }
                Err(e) => {
                    tracing::warn!(id = %id, error = %e, "upload fetch failed, moving on");
                }
            }

            if (i + 1) % self.checkpoint_interval == 0 {
                self.save_merged()?;
            }
        }

        self.save_merged()
    }

    /// Re-run self-introduction selection over the whole working subset.
    /// The classifier is cheap, so earlier selections are simply redone.
    fn select_self_intro_videos(&mut self, working: &[String]) -> Result<(), BuildError> {
        tracing::info!("selecting self-intro videos");
        for id in working {
            if let Some(data) = self.datum.get_mut(id) {
                self.youtube.set_self_intro_video(data, is_self_intro_video)?;
            }
        }
        self.save_merged()
    }

    /// Pattern-extract Twitter handles for records not yet attempted.
    fn extract_twitter_accounts(&mut self, working: &[String]) -> Result<(), BuildError> {
        let pending: Vec<&String> = working
            .iter()
            .filter(|id| {
                self.datum
                    .get(*id)
                    .is_some_and(|data| !tried_to_get_twitter_id(data))
            })
            .collect();
        tracing::info!(count = pending.len(), "extracting twitter accounts");

        for id in pending {
            if let Some(data) = self.datum.get_mut(id) {
                data.twitter = self.twitter.extract_account(data);
            }
        }
        self.save_merged()
    }

    fn output_dataset(&self, working: &[String]) -> Result<(), BuildError> {
        let mut survivors: Vec<&MergedVtuber> =
            working.iter().filter_map(|id| self.datum.get(id)).collect();

        // Dataset assembly, not a reproducible algorithm: an unseeded
        // shuffle is fine.
        survivors.shuffle(&mut rand::rng());
        survivors.truncate(self.dataset_max);

        let items: Vec<DatasetItem> = survivors
            .iter()
            .filter_map(|data| DatasetItem::from_merged(data, self.shape_output))
            .collect();

        tracing::info!(items = items.len(), path = %self.dataset_path.display(), "writing dataset");
        store::save_list(&items, &self.dataset_path, self.pretty)?;
        Ok(())
    }

    /// Checkpoint the entire map (not just the working subset).
    fn save_merged(&self) -> Result<(), BuildError> {
        let datum: Vec<&MergedVtuber> = self.datum.values().collect();
        store::save_list(&datum, &self.merged_path, self.pretty)?;
        tracing::debug!(records = datum.len(), "checkpoint written");
        Ok(())
    }
}

#[cfg(test)]
#[path = "builder_test.rs"]
mod tests;
