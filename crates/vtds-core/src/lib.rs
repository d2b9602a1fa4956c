pub mod config;
pub mod dataset;
pub mod merged;
pub mod missing;
pub mod source;
pub mod store;
pub mod time;

pub use config::{AppConfig, ConfigError};
pub use dataset::DatasetItem;
pub use merged::{MergedVtuber, TwitterAccount, YoutubeChannel, YoutubeVideo};
pub use missing::{Maybe, MissingValue};
pub use store::StoreError;
