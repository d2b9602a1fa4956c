//! Timestamp handling.
//!
//! Every timestamp in the dataset is normalized to JST (+09:00) at ingestion
//! and serialized as ISO-8601 text carrying that offset. Loading parses back
//! to the same fixed offset, never to local or naive time.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};

const JST_SECS: i32 = 9 * 3600;

/// The fixed +09:00 offset used for all dataset timestamps.
#[must_use]
pub fn jst() -> FixedOffset {
    // 9 hours is always a representable offset.
    FixedOffset::east_opt(JST_SECS).expect("JST offset is representable")
}

/// Current time in JST.
#[must_use]
pub fn now_jst() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&jst())
}

/// Reinterpret a naive timestamp as JST wall-clock time.
#[must_use]
pub fn naive_as_jst(naive: NaiveDateTime) -> DateTime<FixedOffset> {
    // A fixed offset has no DST gaps, so the conversion is unambiguous.
    match naive.and_local_timezone(jst()) {
        chrono::LocalResult::Single(dt) | chrono::LocalResult::Ambiguous(dt, _) => dt,
        chrono::LocalResult::None => DateTime::from_naive_utc_and_offset(naive, jst()),
    }
}

/// Serde adapter for the directory site's `%Y/%m/%d %H:%M` timestamps,
/// interpreted as JST wall-clock time.
pub mod vpost_timestamp {
    use chrono::{DateTime, FixedOffset, NaiveDateTime};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y/%m/%d %H:%M";

    /// # Errors
    ///
    /// Returns a serializer error if the formatted string cannot be written.
    pub fn serialize<S>(dt: &DateTime<FixedOffset>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&dt.format(FORMAT))
    }

    /// # Errors
    ///
    /// Returns a deserializer error if the text does not match the
    /// `%Y/%m/%d %H:%M` shape.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        let naive =
            NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)?;
        Ok(super::naive_as_jst(naive))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn jst_offset_is_nine_hours() {
        assert_eq!(jst().local_minus_utc(), 9 * 3600);
    }

    #[test]
    fn now_jst_carries_fixed_offset() {
        let now = now_jst();
        assert_eq!(now.offset().local_minus_utc(), 9 * 3600);
    }

    #[test]
    fn naive_as_jst_keeps_wall_clock() {
        let naive = NaiveDateTime::parse_from_str("2022/01/05 21:30", "%Y/%m/%d %H:%M").unwrap();
        let dt = naive_as_jst(naive);
        assert_eq!(dt.hour(), 21);
        assert_eq!(dt.minute(), 30);
        assert_eq!(dt.offset().local_minus_utc(), 9 * 3600);
    }

    #[test]
    fn vpost_timestamp_round_trips() {
        #[derive(serde::Serialize, serde::Deserialize, PartialEq, Debug)]
        struct Wrapper {
            #[serde(with = "vpost_timestamp")]
            ts: chrono::DateTime<chrono::FixedOffset>,
        }

        let json = r#"{"ts":"2022/03/14 09:26"}"#;
        let w: Wrapper = serde_json::from_str(json).unwrap();
        assert_eq!(serde_json::to_string(&w).unwrap(), json);
    }
}
