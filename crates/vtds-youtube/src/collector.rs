//! Upload-list collection and self-introduction video selection.
//!
//! The collector owns the per-channel cache directory: one JSON file per
//! channel id holding the retrieved upload list. Re-running overwrites the
//! cache rather than appending, so repeated invocations are safe.

use std::path::{Path, PathBuf};

use vtds_core::merged::{MergedVtuber, YoutubeVideo};
use vtds_core::missing::{Maybe, MissingValue};
use vtds_core::store;

use crate::client::YoutubeClient;
use crate::error::YoutubeError;

/// Predicate deciding whether one video is a self-introduction.
pub type VideoClassifier = fn(&YoutubeVideo) -> bool;

/// Chooses `target_video` for a merged record from its cached upload list.
///
/// Returns `Unacquired` when no cache file exists yet, the first classified
/// video when one matches, `NotExist` when the full history is confirmed
/// retrieved with no match, and `NotFound` while the history is incomplete.
///
/// # Errors
///
/// Returns [`vtds_core::StoreError`] if an existing cache file cannot be read
/// or parsed. A malformed cache is a hard stop, not a silent miss.
pub fn extract_self_intro_video(
    data: &MergedVtuber,
    uploads_dir: &Path,
    is_self_intro: VideoClassifier,
) -> Result<Maybe<YoutubeVideo>, vtds_core::StoreError> {
    let uploads_path = uploads_dir.join(format!("{}.json", data.vtuber_id));
    if !uploads_path.is_file() {
        return Ok(Maybe::Missing(MissingValue::Unacquired));
    }

    let uploads: Vec<YoutubeVideo> = store::load_list(&uploads_path)?;
    if let Some(video) = uploads.into_iter().find(|v| is_self_intro(v)) {
        return Ok(Maybe::Known(video));
    }

    if data.youtube.got_upload_list() {
        Ok(Maybe::Missing(MissingValue::NotExist))
    } else {
        Ok(Maybe::Missing(MissingValue::NotFound))
    }
}

/// Collects upload lists from the YouTube API and selects self-introduction
/// videos from the cached lists.
pub struct YoutubeCollector {
    client: YoutubeClient,
    uploads_dir: PathBuf,
    pretty: bool,
}

impl YoutubeCollector {
    #[must_use]
    pub fn new(client: YoutubeClient, uploads_dir: impl Into<PathBuf>, pretty: bool) -> Self {
        Self {
            client,
            uploads_dir: uploads_dir.into(),
            pretty,
        }
    }

    #[must_use]
    pub fn uploads_dir(&self) -> &Path {
        &self.uploads_dir
    }

    /// Whether a cached upload list already exists for this record.
    #[must_use]
    pub fn has_cache(&self, data: &MergedVtuber) -> bool {
        self.uploads_path(&data.vtuber_id).is_file()
    }

    /// Fetches the channel's full upload list, rewrites the per-channel
    /// cache, and updates the retrieval-progress counts on the record.
    ///
    /// A deleted channel yields an empty list and an empty cache file; that
    /// is a confirmed result, not a failure.
    ///
    /// # Errors
    ///
    /// - [`YoutubeError::QuotaExceeded`] must abort the whole run.
    /// - Any other [`YoutubeError`] is a per-channel failure; the caller may
    ///   log it and continue with the next record.
    pub async fn collect_uploads(&self, data: &mut MergedVtuber) -> Result<u64, YoutubeError> {
        tracing::debug!(id = %data.vtuber_id, "fetching upload list");
        let videos = self.client.list_uploads(&data.youtube.channel_id).await?;
        store::save_list(&videos, self.uploads_path(&data.vtuber_id), self.pretty)?;

        let got = videos.len() as u64;
        let previous_got = data.youtube.got_video_count;
        data.youtube.got_video_count = Some(got);

        match data.youtube.video_count {
            Some(declared) if declared > got => {
                // Fewer videos than declared. If a second fetch returns the
                // same shrunken count, accept it as the new declared total.
                if previous_got == Some(got) {
                    data.youtube.video_count = Some(got);
                }
            }
            _ => data.youtube.video_count = Some(got),
        }

        Ok(got)
    }

    /// Re-selects `target_video` from the cached upload list. Overwrites any
    /// earlier selection; the classifier is cheap to re-run.
    ///
    /// # Errors
    ///
    /// Propagates [`vtds_core::StoreError`] from a corrupt cache file.
    pub fn set_self_intro_video(
        &self,
        data: &mut MergedVtuber,
        is_self_intro: VideoClassifier,
    ) -> Result<(), vtds_core::StoreError> {
        data.target_video = extract_self_intro_video(data, &self.uploads_dir, is_self_intro)?;
        if let Some(video) = data.target_video.as_known() {
            tracing::debug!(
                id = %data.vtuber_id,
                video_id = %video.video_id,
                title = video.title.as_deref().unwrap_or(""),
                "found self-intro video"
            );
        }
        Ok(())
    }

    fn uploads_path(&self, vtuber_id: &str) -> PathBuf {
        self.uploads_dir.join(format!("{vtuber_id}.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vtds_core::merged::YoutubeChannel;

    fn video(id: &str, title: &str) -> YoutubeVideo {
        YoutubeVideo {
            video_id: id.into(),
            title: Some(title.into()),
            description: None,
            timestamp: None,
        }
    }

    fn titled_self_intro(v: &YoutubeVideo) -> bool {
        v.title.as_deref().is_some_and(|t| t.contains("自己紹介"))
    }

    fn record(id: &str, declared: Option<u64>, got: Option<u64>) -> MergedVtuber {
        let mut data = MergedVtuber::new(id, YoutubeChannel::new(id));
        data.youtube.video_count = declared;
        data.youtube.got_video_count = got;
        data
    }

    #[test]
    fn no_cache_file_yields_unacquired() {
        let dir = tempfile::tempdir().unwrap();
        let data = record("UCnone", Some(3), None);
        let result = extract_self_intro_video(&data, dir.path(), titled_self_intro).unwrap();
        assert_eq!(result, Maybe::Missing(MissingValue::Unacquired));
    }

    #[test]
    fn first_matching_video_is_selected() {
        let dir = tempfile::tempdir().unwrap();
        let uploads = vec![
            video("v1", "【自己紹介】はじめまして"),
            video("v2", "雑談配信"),
            video("v3", "自己紹介その2"),
        ];
        store::save_list(&uploads, dir.path().join("UCa.json"), true).unwrap();

        let data = record("UCa", Some(3), Some(3));
        let result = extract_self_intro_video(&data, dir.path(), titled_self_intro).unwrap();
        assert_eq!(result.as_known().map(|v| v.video_id.as_str()), Some("v1"));
    }

    #[test]
    fn complete_history_without_match_is_not_exist() {
        let dir = tempfile::tempdir().unwrap();
        let uploads = vec![video("v1", "雑談配信")];
        store::save_list(&uploads, dir.path().join("UCb.json"), true).unwrap();

        let data = record("UCb", Some(1), Some(1));
        let result = extract_self_intro_video(&data, dir.path(), titled_self_intro).unwrap();
        assert_eq!(result, Maybe::Missing(MissingValue::NotExist));
    }

    #[test]
    fn incomplete_history_without_match_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let uploads = vec![video("v1", "雑談配信")];
        store::save_list(&uploads, dir.path().join("UCc.json"), true).unwrap();

        let data = record("UCc", Some(5), Some(1));
        let result = extract_self_intro_video(&data, dir.path(), titled_self_intro).unwrap();
        assert_eq!(result, Maybe::Missing(MissingValue::NotFound));
    }

    #[test]
    fn unknown_counts_without_match_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let uploads = vec![video("v1", "雑談配信")];
        store::save_list(&uploads, dir.path().join("UCd.json"), true).unwrap();

        let data = record("UCd", None, None);
        let result = extract_self_intro_video(&data, dir.path(), titled_self_intro).unwrap();
        assert_eq!(result, Maybe::Missing(MissingValue::NotFound));
    }

    #[test]
    fn corrupt_cache_is_a_hard_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("UCe.json"), "not json").unwrap();

        let data = record("UCe", Some(1), Some(1));
        let result = extract_self_intro_video(&data, dir.path(), titled_self_intro);
        assert!(result.is_err());
    }
}
