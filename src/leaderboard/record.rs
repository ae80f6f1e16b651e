//! Score records and submissions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SemantleError};

/// One completed game. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub day: usize,
    #[serde(with = "unix_seconds")]
    pub timestamp: DateTime<Utc>,
    pub nickname: String,
    pub guess_count: u32,
}

/// Client-supplied part of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub nickname: String,
    pub guess_count: u32,
}

impl Submission {
    pub fn new(nickname: impl Into<String>, guess_count: u32) -> Self {
        Self {
            nickname: nickname.into(),
            guess_count,
        }
    }

    /// Stamp a validated submission into a record.
    ///
    /// The nickname is trimmed; the timestamp is kept to microsecond
    /// precision so it survives the log round trip unchanged.
    pub fn into_record(self, day: usize, timestamp: DateTime<Utc>) -> Result<ScoreRecord> {
        let nickname = self.nickname.trim().to_string();
        if nickname.is_empty() {
            return Err(SemantleError::InvalidRecord(
                "nickname must not be empty".to_string(),
            ));
        }
        if self.guess_count == 0 {
            return Err(SemantleError::InvalidRecord(
                "guess_count must be at least 1".to_string(),
            ));
        }
        let timestamp = DateTime::from_timestamp_micros(timestamp.timestamp_micros())
            .unwrap_or(timestamp);
        Ok(ScoreRecord {
            day,
            timestamp,
            nickname,
            guess_count: self.guess_count,
        })
    }
}

/// Fractional Unix seconds, the log's timestamp encoding.
mod unix_seconds {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    #[allow(clippy::cast_precision_loss)]
    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.timestamp_micros() as f64 / 1_000_000.0)
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        if !secs.is_finite() {
            return Err(D::Error::custom("timestamp is not finite"));
        }
        let micros = (secs * 1_000_000.0).round() as i64;
        DateTime::from_timestamp_micros(micros)
            .ok_or_else(|| D::Error::custom(format!("timestamp {secs} out of range")))
    }
}
