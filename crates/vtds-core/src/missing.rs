//! Missing-value model shared by every optional slot in the merged record.
//!
//! Collection is incremental: a field can be absent because we have not tried
//! to fetch it yet, because the fetch errored, because we looked and did not
//! find it, or because we confirmed it does not exist. Downstream filters care
//! about the distinction, so a plain `Option` is not enough.

use serde::{Deserialize, Serialize};

/// Why a field has no concrete value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingValue {
    /// No fetch attempted yet.
    Unacquired,
    /// A fetch was attempted and errored.
    Failed,
    /// Searched without success, but non-existence is not confirmed.
    NotFound,
    /// Confirmed absent at the source.
    NotExist,
}

impl MissingValue {
    /// Serialized token for this variant, as it appears in stored JSON.
    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            MissingValue::Unacquired => "unacquired",
            MissingValue::Failed => "failed",
            MissingValue::NotFound => "not_found",
            MissingValue::NotExist => "not_exist",
        }
    }
}

impl std::fmt::Display for MissingValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

/// Either a concrete value or a [`MissingValue`] sentinel.
///
/// Serialized untagged: a `Known` value keeps its own JSON shape, a sentinel
/// becomes its short string token. `Missing` is declared first so that
/// deserialization tests the four tokens before delegating to `T` — a raw
/// string must never be coerced into a payload when it is actually a sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Maybe<T> {
    Missing(MissingValue),
    Known(T),
}

impl<T> Maybe<T> {
    #[must_use]
    pub fn is_known(&self) -> bool {
        matches!(self, Maybe::Known(_))
    }

    #[must_use]
    pub fn as_known(&self) -> Option<&T> {
        match self {
            Maybe::Known(v) => Some(v),
            Maybe::Missing(_) => None,
        }
    }

    /// The sentinel, if this value is missing.
    #[must_use]
    pub fn missing(&self) -> Option<MissingValue> {
        match self {
            Maybe::Missing(m) => Some(*m),
            Maybe::Known(_) => None,
        }
    }
}

impl<T> Default for Maybe<T> {
    fn default() -> Self {
        Maybe::Missing(MissingValue::Unacquired)
    }
}

impl<T> From<MissingValue> for Maybe<T> {
    fn from(m: MissingValue) -> Self {
        Maybe::Missing(m)
    }
}
