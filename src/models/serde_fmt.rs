//! Serde adapters for the on-disk string formats.
//!
//! Stored times are always `HH:MM:SS`, `lastActive` is either
//! `YYYY-MM-DD HH:MM:SS` or the literal `Never`.

use chrono::{NaiveDateTime, NaiveTime};

pub const TIME_FMT: &str = "%H:%M:%S";
pub const DATETIME_FMT: &str = "%Y-%m-%d %H:%M:%S";
pub const NEVER: &str = "Never";

pub mod time_opt {
    use super::TIME_FMT;
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S>(value: &Option<NaiveTime>, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(t) => s.serialize_str(&t.format(TIME_FMT).to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(d: D) -> Result<Option<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(d)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(v) => super::parse_hms(v)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid time '{v}'"))),
        }
    }
}

pub mod last_active {
    use super::{DATETIME_FMT, NEVER};
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S>(value: &Option<NaiveDateTime>, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => s.serialize_str(&dt.format(DATETIME_FMT).to_string()),
            None => s.serialize_str(NEVER),
        }
    }

    pub fn deserialize<'de, D>(d: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(d)?;
        if raw == NEVER {
            return Ok(None);
        }
        NaiveDateTime::parse_from_str(&raw, DATETIME_FMT)
            .map(Some)
            .map_err(|_| D::Error::custom(format!("invalid lastActive '{raw}'")))
    }
}

/// Accepts `HH:MM:SS` and `HH:MM`.
pub fn parse_hms(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, TIME_FMT)
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .ok()
}

pub fn format_datetime(dt: &NaiveDateTime) -> String {
    dt.format(DATETIME_FMT).to_string()
}
