//! Serde adapter for `dateOfBirth`.
//!
//! Clients send either a plain calendar date (`1987-06-24`) or a full
//! RFC 3339 timestamp. Both are normalised to a UTC timestamp.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};

pub fn parse(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

/// Present key: `null` clears the date, a string sets it.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Option<DateTime<Utc>>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;

    match raw {
        None => Ok(Some(None)),
        Some(text) => parse(&text).map(|date| Some(Some(date))).ok_or_else(|| {
            serde::de::Error::custom(format!("invalid dateOfBirth `{}`", text))
        }),
    }
}
