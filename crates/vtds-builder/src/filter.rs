//! Inclusion filters over merged records, and the self-introduction
//! classifier.
//!
//! A filter is a pure predicate; a chain is an ordered slice combined by
//! logical AND. The *basic* group needs only metadata already on hand and
//! runs before any API spend; the *content* group needs collector-populated
//! fields and runs after. For the count filters an unknown value passes:
//! records are only rejected on confirmed evidence, never on absent data.

use vtds_core::merged::{MergedVtuber, YoutubeVideo};
use vtds_core::missing::{Maybe, MissingValue};

pub type FilterFn = fn(&MergedVtuber) -> bool;

/// Channel names that mark re-upload/clip channels rather than the person
/// themselves.
const NAME_NG_WORDS: &[&str] = &["切り抜き", "きりぬき", "clips", "Clips"];

/// Channel descriptions advertising sponsors we exclude outright.
const CHANNEL_DESCRIPTION_NG_WORDS: &[&str] = &["オンラインカジノ", "online casino"];

/// Title fragments that disqualify a video from being a self-introduction:
/// clip compilations, song covers, member-only and announcement videos,
/// shorts, and non-Japanese-language markers.
const VIDEO_TITLE_NG_WORDS: &[&str] = &[
    "#shorts",
    "#Shorts",
    "#SHORTS",
    "歌ってみた",
    "カバー",
    "cover",
    "MV",
    "ASMR",
    "メン限",
    "メンバー限定",
    "総集編",
    "まとめ",
    "ダイジェスト",
    "告知",
    "お知らせ",
    "予告",
    "ティザー",
    "トレーラー",
    "ラジオ",
    "作業用",
    "耐久",
    "検証",
    "ゆっくり実況",
    "VOICEROID",
    "[ENG]",
    "(ENG)",
    "ENG sub",
    "English",
    "한국어",
    "中文",
];

/// Description fragments that mark the video as belonging to someone else's
/// content (clip sources, agency compilations).
const VIDEO_DESCRIPTION_NG_WORDS: &[&str] = &["切り抜き元", "公式切り抜き", "所属タレント"];

const COLLAB_MARKER: &str = "コラボ";
const LIVE_MARKER: &str = "配信";
const CLIP_MARKER: &str = "切り抜き";
const SELF_INTRO_MARKER: &str = "自己紹介";

/// Passes when the declared upload count is unknown or above the floor.
#[must_use]
pub fn enough_uploads(target: &MergedVtuber) -> bool {
    target.youtube.video_count.is_none_or(|n| n > 3)
}

/// Passes when the total view count is unknown or above the floor.
#[must_use]
pub fn enough_views(target: &MergedVtuber) -> bool {
    target.youtube.view_count.is_none_or(|n| n > 10)
}

/// Passes when the subscriber count is unknown or above the floor.
#[must_use]
pub fn enough_subscribers(target: &MergedVtuber) -> bool {
    target.youtube.subscriber_count.is_none_or(|n| n > 5)
}

/// Rejects channels whose name marks a clip channel or whose description
/// carries a denied sponsor.
#[must_use]
pub fn ng_words_filter(target: &MergedVtuber) -> bool {
    if let Some(name) = &target.youtube.name {
        if NAME_NG_WORDS.iter().any(|w| name.contains(w)) {
            return false;
        }
    }
    if let Some(description) = &target.youtube.channel_description {
        if CHANNEL_DESCRIPTION_NG_WORDS.iter().any(|w| description.contains(w)) {
            return false;
        }
    }
    true
}

/// Passes only when a concrete self-introduction video has been chosen.
#[must_use]
pub fn found_self_intro_video(target: &MergedVtuber) -> bool {
    target.target_video.is_known()
}

/// Passes when selection has reached a final answer: a video was found, or
/// the complete history confirmed there is none.
#[must_use]
pub fn tried_to_get_self_intro_video(target: &MergedVtuber) -> bool {
    found_self_intro_video(target)
        || target.target_video == Maybe::Missing(MissingValue::NotExist)
}

/// Passes only when a concrete Twitter account is attached.
#[must_use]
pub fn has_twitter(target: &MergedVtuber) -> bool {
    target.twitter.is_known()
}

/// Passes when Twitter discovery has been attempted, whatever the outcome.
#[must_use]
pub fn tried_to_get_twitter_id(target: &MergedVtuber) -> bool {
    has_twitter(target) || target.twitter.missing() != Some(MissingValue::Unacquired)
}

/// Filters runnable before any per-channel collection. Shrinks the working
/// subset so no API call is spent on a record these would reject anyway.
pub const BASIC_FILTERS: &[FilterFn] = &[
    enough_uploads,
    enough_views,
    enough_subscribers,
    ng_words_filter,
];

/// Filters over collector-populated fields, applied after collection.
pub const CONTENT_FILTERS: &[FilterFn] = &[found_self_intro_video];

/// Final chain before sampling: everything above plus social presence.
pub const ALL_FILTERS: &[FilterFn] = &[
    enough_uploads,
    enough_views,
    enough_subscribers,
    ng_words_filter,
    found_self_intro_video,
    has_twitter,
];

/// Whether `target` passes every predicate in `conds`.
#[must_use]
pub fn passes_all(conds: &[FilterFn], target: &MergedVtuber) -> bool {
    conds.iter().all(|cond| cond(target))
}

/// Classifies one video as a self-introduction.
///
/// The rules run in a fixed order and the first hit wins:
/// 1. any deny word in the title rejects;
/// 2. any deny word in the description rejects;
/// 3. a collaboration marker in title or description rejects;
/// 4. a livestream marker in the title rejects unless a clip marker is also
///    present;
/// 5. the self-introduction marker in the title accepts;
/// 6. anything else rejects.
///
/// The ordering is load-bearing: a title carrying both the livestream marker
/// and the self-introduction marker is rejected at rule 4 before rule 5 can
/// accept it.
#[must_use]
pub fn is_self_intro_video(video: &YoutubeVideo) -> bool {
    let title = video.title.as_deref().unwrap_or("");
    let description = video.description.as_deref().unwrap_or("");

    if VIDEO_TITLE_NG_WORDS.iter().any(|w| title.contains(w)) {
        return false;
    }
    if VIDEO_DESCRIPTION_NG_WORDS.iter().any(|w| description.contains(w)) {
        return false;
    }
    if title.contains(COLLAB_MARKER) || description.contains(COLLAB_MARKER) {
        return false;
    }
    if title.contains(LIVE_MARKER) && !title.contains(CLIP_MARKER) {
        return false;
    }

    title.contains(SELF_INTRO_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vtds_core::merged::YoutubeChannel;

    fn record(
        subscribers: Option<u64>,
        views: Option<u64>,
        uploads: Option<u64>,
    ) -> MergedVtuber {
        let mut data = MergedVtuber::new("UCx", YoutubeChannel::new("UCx"));
        data.youtube.subscriber_count = subscribers;
        data.youtube.view_count = views;
        data.youtube.video_count = uploads;
        data
    }

    fn video(title: &str, description: &str) -> YoutubeVideo {
        YoutubeVideo {
            video_id: "v".into(),
            title: Some(title.into()),
            description: Some(description.into()),
            timestamp: None,
        }
    }

    #[test]
    fn count_filters_pass_unknown_values() {
        let data = record(None, None, None);
        assert!(enough_uploads(&data));
        assert!(enough_views(&data));
        assert!(enough_subscribers(&data));
    }

    #[test]
    fn count_filters_enforce_floors() {
        assert!(!enough_uploads(&record(None, None, Some(3))));
        assert!(enough_uploads(&record(None, None, Some(4))));

        assert!(!enough_views(&record(None, Some(10), None)));
        assert!(enough_views(&record(None, Some(11), None)));

        assert!(!enough_subscribers(&record(Some(5), None, None)));
        assert!(enough_subscribers(&record(Some(6), None, None)));
    }

    #[test]
    fn ng_words_reject_clip_channels_and_bad_sponsors() {
        let mut data = record(None, None, None);
        assert!(ng_words_filter(&data));

        data.youtube.name = Some("ホロライブ切り抜きch".into());
        assert!(!ng_words_filter(&data));

        data.youtube.name = Some("普通のチャンネル".into());
        data.youtube.channel_description = Some("スポンサー: オンラインカジノ XYZ".into());
        assert!(!ng_words_filter(&data));
    }

    #[test]
    fn basic_filter_result_is_order_independent() {
        let inputs = vec![
            record(Some(6), Some(11), Some(4)),
            record(Some(2), Some(11), Some(4)),
            record(Some(6), Some(3), Some(4)),
            record(Some(6), Some(11), Some(2)),
            record(None, None, None),
        ];

        let conds: [FilterFn; 3] = [enough_uploads, enough_views, enough_subscribers];
        let orderings: [[usize; 3]; 3] = [[0, 1, 2], [2, 0, 1], [1, 2, 0]];

        let survivors: Vec<Vec<bool>> = orderings
            .iter()
            .map(|order| {
                inputs
                    .iter()
                    .map(|data| order.iter().all(|&i| conds[i](data)))
                    .collect()
            })
            .collect();

        assert_eq!(survivors[0], survivors[1]);
        assert_eq!(survivors[1], survivors[2]);
        assert_eq!(survivors[0], vec![true, false, false, false, true]);
    }

    #[test]
    fn classifier_accepts_plain_self_intro() {
        assert!(is_self_intro_video(&video(
            "【自己紹介】はじめまして",
            "よろしくおねがいします"
        )));
    }

    #[test]
    fn classifier_rejects_livestream_even_with_self_intro_marker() {
        // Rule 4 fires before rule 5 can accept.
        assert!(!is_self_intro_video(&video("自己紹介配信", "")));
    }

    #[test]
    fn classifier_allows_clipped_livestream_title() {
        assert!(is_self_intro_video(&video("自己紹介配信の切り抜き", "")));
    }

    #[test]
    fn classifier_rejects_collaboration() {
        assert!(!is_self_intro_video(&video("自己紹介コラボ", "")));
        assert!(!is_self_intro_video(&video(
            "自己紹介",
            "同期とのコラボ動画です"
        )));
    }

    #[test]
    fn classifier_rejects_deny_listed_titles() {
        assert!(!is_self_intro_video(&video("自己紹介 #shorts", "")));
        assert!(!is_self_intro_video(&video("自己紹介ソング歌ってみた", "")));
    }

    #[test]
    fn classifier_rejects_deny_listed_descriptions() {
        assert!(!is_self_intro_video(&video(
            "自己紹介",
            "切り抜き元: 本家チャンネル"
        )));
    }

    #[test]
    fn classifier_rejects_without_marker() {
        assert!(!is_self_intro_video(&video("雑談", "")));
        assert!(!is_self_intro_video(&video("", "自己紹介")));
    }

    #[test]
    fn tried_predicates_distinguish_final_from_pending() {
        let mut data = record(None, None, None);

        data.target_video = Maybe::Missing(MissingValue::NotFound);
        assert!(!tried_to_get_self_intro_video(&data));

        data.target_video = Maybe::Missing(MissingValue::NotExist);
        assert!(tried_to_get_self_intro_video(&data));

        data.target_video = Maybe::Known(video("自己紹介", ""));
        assert!(tried_to_get_self_intro_video(&data));
    }

    #[test]
    fn twitter_predicates() {
        use vtds_core::merged::TwitterAccount;

        let mut data = record(None, None, None);
        assert!(!has_twitter(&data));
        assert!(!tried_to_get_twitter_id(&data));

        data.twitter = Maybe::Missing(MissingValue::NotFound);
        assert!(!has_twitter(&data));
        assert!(tried_to_get_twitter_id(&data));

        data.twitter = Maybe::Known(TwitterAccount::new("@someone"));
        assert!(has_twitter(&data));
        assert!(tried_to_get_twitter_id(&data));
    }
}
