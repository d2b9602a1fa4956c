use regex::Regex;

use vtds_core::merged::{MergedVtuber, TwitterAccount};
use vtds_core::missing::{Maybe, MissingValue};

use crate::error::TwitterError;

/// Extracts the first Twitter handle from a profile URL in `text`.
///
/// Only the bare `https://twitter.com/<handle>` shape is recognized. When a
/// description lists several accounts (their own plus an illustrator's, say)
/// the first one wins.
#[must_use]
pub fn extract_twitter_id(text: &str) -> Option<String> {
    let pattern = Regex::new(r"https://twitter\.com/(\w+)").expect("valid regex");
    pattern
        .captures(text)
        .and_then(|cap| cap.get(1).map(|m| m.as_str().to_string()))
}

/// Finds a Twitter account reference for a merged record.
///
/// Checks the chosen self-introduction video's description first — that is
/// where the owner's own handle is most likely — then the channel
/// description. Returns `NotFound` when neither yields a match.
#[must_use]
pub fn extract_twitter_account(data: &MergedVtuber) -> Maybe<TwitterAccount> {
    if let Some(video) = data.target_video.as_known() {
        if let Some(description) = &video.description {
            if let Some(id) = extract_twitter_id(description) {
                return Maybe::Known(TwitterAccount::new(&id));
            }
        }
    }

    if let Some(description) = &data.youtube.channel_description {
        if let Some(id) = extract_twitter_id(description) {
            return Maybe::Known(TwitterAccount::new(&id));
        }
    }

    Maybe::Missing(MissingValue::NotFound)
}

/// Collector facade for Twitter enrichment.
///
/// Holds the (unused) API key so the constructor shape matches the other
/// collectors; only [`extract_twitter_account`] works today.
pub struct TwitterCollector {
    _api_key: Option<String>,
}

impl TwitterCollector {
    #[must_use]
    pub fn new(api_key: Option<String>) -> Self {
        Self { _api_key: api_key }
    }

    /// Pattern extraction; see [`extract_twitter_account`].
    #[must_use]
    pub fn extract_account(&self, data: &MergedVtuber) -> Maybe<TwitterAccount> {
        let account = extract_twitter_account(data);
        match account.as_known() {
            Some(found) => {
                tracing::debug!(id = %data.vtuber_id, handle = %found.twitter_id, "twitter handle extracted");
            }
            None => tracing::debug!(id = %data.vtuber_id, "no twitter handle in descriptions"),
        }
        account
    }

    /// Find an account via Twitter search by channel name.
    ///
    /// # Errors
    ///
    /// Always returns [`TwitterError::Unimplemented`].
    pub fn search_twitter_id(&self, _data: &MergedVtuber) -> Result<String, TwitterError> {
        Err(TwitterError::Unimplemented("twitter account search"))
    }

    /// Fetch full profile details for a discovered handle.
    ///
    /// # Errors
    ///
    /// Always returns [`TwitterError::Unimplemented`].
    pub fn fetch_account_details(&self, _data: &mut MergedVtuber) -> Result<(), TwitterError> {
        Err(TwitterError::Unimplemented("twitter profile fetch"))
    }
}
