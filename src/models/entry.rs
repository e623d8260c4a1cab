use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::mood::Mood;

/// Timestamp layout used by the persisted log.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One classified journal event.
///
/// Entries are immutable once created: corrections happen by appending a
/// new entry or by resetting the whole log, never by editing a stored row.
/// Field names map to the persisted column headers in schema order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodEntry {
    #[serde(rename = "Waktu", with = "waktu")]
    pub timestamp: NaiveDateTime,
    #[serde(rename = "Teks")]
    pub text: String,
    #[serde(rename = "Mood")]
    pub mood: Mood,
    #[serde(rename = "Emoji")]
    pub emoji: String,
    #[serde(rename = "Score")]
    pub score: f64,
}

impl MoodEntry {
    /// Emoji and score are derived from the label here; callers never pick
    /// them.
    pub fn new(timestamp: NaiveDateTime, text: impl Into<String>, mood: Mood) -> Self {
        Self {
            timestamp,
            text: text.into(),
            mood,
            emoji: mood.emoji().to_string(),
            score: mood.score(),
        }
    }

    /// Calendar day the entry belongs to.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

mod waktu {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::TIMESTAMP_FORMAT;

    pub fn serialize<S: Serializer>(
        timestamp: &NaiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&timestamp.format(TIMESTAMP_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}
