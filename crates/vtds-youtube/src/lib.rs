pub mod client;
pub mod collector;
pub mod error;
pub mod types;

pub use client::YoutubeClient;
pub use collector::{extract_self_intro_video, YoutubeCollector};
pub use error::YoutubeError;
