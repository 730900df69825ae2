//! Tolerant deserialisation for loosely typed payload fields.
//!
//! Payloads arrive from other devices and older app versions, so timestamps
//! may be missing, `null`, a plain date, or garbage, and numbers may be
//! encoded as strings. All of that is normalised here, once, so the rest of
//! the crate only ever sees `Timestamp`, `Option<Timestamp>` and integers.
//! Nothing in this module fails: unreadable values become "unknown", which
//! for required timestamps is the Unix epoch (the oldest possible moment).

use jiff::{civil::Date, tz::TimeZone, Timestamp};
use log::warn;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::models::{RATING_MAX, RATING_MIN};

/// Parses an RFC 3339 timestamp, a `YYYY-MM-DD` date (midnight UTC) or a
/// millisecond epoch number.
pub fn parse_timestamp(value: &Value) -> Option<Timestamp> {
    match value {
        Value::String(s) => parse_timestamp_str(s),
        Value::Number(n) => n
            .as_i64()
            .and_then(|ms| Timestamp::from_millisecond(ms).ok()),
        _ => None,
    }
}

/// String form of [`parse_timestamp`].
pub fn parse_timestamp_str(s: &str) -> Option<Timestamp> {
    let s = s.trim();
    if let Ok(ts) = s.parse::<Timestamp>() {
        return Some(ts);
    }
    s.parse::<Date>()
        .ok()
        .and_then(|date| date.to_zoned(TimeZone::UTC).ok())
        .map(|zoned| zoned.timestamp())
}

/// Parses an integer from a number or a numeric string. Non-finite and
/// non-numeric input yields `None`.
pub fn parse_number(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite())
                .map(|f| f.round() as i64)
        }),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(|f| f.round() as i64)
            })
        }
        _ => None,
    }
}

/// Clamps a parsed number into the rating range.
pub fn clamp_rating(n: i64) -> u8 {
    n.clamp(i64::from(RATING_MIN), i64::from(RATING_MAX)) as u8
}

pub(crate) fn epoch() -> Timestamp {
    Timestamp::UNIX_EPOCH
}

pub(crate) fn default_rating() -> u8 {
    (RATING_MIN + RATING_MAX) / 2
}

/// Required timestamp; unreadable input becomes the Unix epoch.
pub mod timestamp {
    use super::*;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(ts: &Timestamp, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(ts, serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Timestamp, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(parse_timestamp(&value).unwrap_or_else(|| {
            warn!("Unreadable timestamp {value}, treating as epoch");
            epoch()
        }))
    }
}

/// Optional timestamp; `null`, missing and unreadable input all become `None`.
pub mod optional_timestamp {
    use super::*;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(
        ts: &Option<Timestamp>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(ts, serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Timestamp>, D::Error> {
        let value = Value::deserialize(deserializer)?;
        if value.is_null() {
            return Ok(None);
        }
        let parsed = parse_timestamp(&value);
        if parsed.is_none() {
            warn!("Unreadable timestamp {value}, treating as absent");
        }
        Ok(parsed)
    }
}

/// List of timestamps; unreadable elements are dropped.
pub mod timestamp_list {
    use super::*;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(list: &[Timestamp], serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(list, serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<Timestamp>, D::Error> {
        let values = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
        Ok(values.iter().filter_map(parse_timestamp).collect())
    }
}

/// Optional integer; numeric strings are accepted, anything else is `None`.
pub mod optional_number {
    use super::*;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(n: &Option<i64>, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(n, serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(parse_number(&value))
    }
}

/// Rating in `RATING_MIN..=RATING_MAX`; out-of-range values are clamped and
/// unreadable ones fall back to the midpoint.
pub mod rating {
    use super::*;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(n: &u8, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*n)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(parse_number(&value).map_or_else(
            || {
                warn!("Unreadable rating {value}, using default");
                default_rating()
            },
            clamp_rating,
        ))
    }
}

/// Any defaultable field; `null` reads as the type's default.
pub mod null_as_default {
    use super::*;
    use serde::{Serialize, Serializer};

    pub fn serialize<T: Serialize, S: Serializer>(v: &T, serializer: S) -> Result<S::Ok, S::Error> {
        v.serialize(serializer)
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: Deserialize<'de> + Default,
        D: Deserializer<'de>,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }
}

/// Scheduler capacity; numeric strings are accepted, and unreadable or
/// non-positive values fall back to the default.
pub mod capacity {
    use super::*;
    use serde::Serializer;

    use crate::models::DEFAULT_MAX_ACTIVE_GOALS;

    pub fn serialize<S: Serializer>(n: &usize, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(*n as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(parse_number(&value)
            .filter(|n| *n > 0)
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or_else(|| {
                warn!("Unreadable capacity {value}, using default");
                DEFAULT_MAX_ACTIVE_GOALS
            }))
    }
}
