//! Twitter account discovery for merged records.
//!
//! The only working path is pattern extraction: a profile-URL match against
//! text we already have (video description, then channel description).
//! Deeper enrichment, like searching by display name or fetching profile
//! details for a discovered handle, needs API access we do not have; those
//! paths fail loudly so a caller cannot mistake them for a runtime condition.

pub mod collector;
pub mod error;

pub use collector::{extract_twitter_account, extract_twitter_id, TwitterCollector};
pub use error::TwitterError;
