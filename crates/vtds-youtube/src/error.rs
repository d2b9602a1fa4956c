use thiserror::Error;

#[derive(Debug, Error)]
pub enum YoutubeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Daily API quota is exhausted. Fatal: retrying would only burn the
    /// remaining quota on requests that cannot succeed.
    #[error("YouTube API quota exceeded while fetching {channel_id}")]
    QuotaExceeded { channel_id: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("channel id \"{0}\" has no derivable uploads playlist")]
    InvalidChannelId(String),

    #[error("pagination limit reached for {channel_id}: exceeded {max_pages} pages")]
    PaginationLimit {
        channel_id: String,
        max_pages: usize,
    },

    #[error(transparent)]
    Store(#[from] vtds_core::StoreError),
}
