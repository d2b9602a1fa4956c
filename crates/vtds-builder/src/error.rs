use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Store(#[from] vtds_core::StoreError),

    #[error(transparent)]
    Youtube(#[from] vtds_youtube::YoutubeError),

    #[error(transparent)]
    Twitter(#[from] vtds_twitter::TwitterError),
}
