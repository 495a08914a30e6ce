//! Wall-clock helpers shared by the models and the slot generator.
//!
//! Times travel as `"HH:MM"` strings and weekdays as ISO numbers
//! (1 = Monday, 7 = Sunday). Internally they are `chrono` values.

use chrono::{NaiveTime, Timelike, Weekday};

use crate::errors::{SchoolError, SchoolResult};

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Parses a strict 24h `"HH:MM"` string.
pub fn parse_hhmm(value: &str) -> SchoolResult<NaiveTime> {
    let trimmed = value.trim();
    let well_formed = trimmed.len() == 5
        && trimmed.as_bytes()[2] == b':'
        && trimmed
            .bytes()
            .enumerate()
            .all(|(i, b)| i == 2 || b.is_ascii_digit());

    if !well_formed {
        return Err(SchoolError::Validation(format!(
            "Invalid time '{}', expected HH:MM",
            value
        )));
    }

    NaiveTime::parse_from_str(trimmed, "%H:%M").map_err(|_| {
        SchoolError::Validation(format!("Invalid time '{}', expected HH:MM", value))
    })
}

pub fn format_hhmm(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

pub fn minutes_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Inverse of [`minutes_of_day`]; `None` at or past midnight.
pub fn time_from_minutes(minutes: u32) -> Option<NaiveTime> {
    if minutes >= MINUTES_PER_DAY {
        return None;
    }
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0)
}

pub fn weekday_from_iso(number: u8) -> SchoolResult<Weekday> {
    match number {
        1 => Ok(Weekday::Mon),
        2 => Ok(Weekday::Tue),
        3 => Ok(Weekday::Wed),
        4 => Ok(Weekday::Thu),
        5 => Ok(Weekday::Fri),
        6 => Ok(Weekday::Sat),
        7 => Ok(Weekday::Sun),
        _ => Err(SchoolError::Validation(format!(
            "Invalid day of week {}, expected 1-7",
            number
        ))),
    }
}

pub fn weekday_to_iso(day: Weekday) -> u8 {
    day.number_from_monday() as u8
}

/// `serde(with = ...)` adapter for `"HH:MM"` times.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_hhmm(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_hhmm(&raw).map_err(D::Error::custom)
    }
}

/// `serde(with = ...)` adapter for a single ISO weekday number.
pub mod iso_weekday {
    use chrono::Weekday;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(day: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(super::weekday_to_iso(*day))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Weekday, D::Error> {
        let number = u8::deserialize(deserializer)?;
        super::weekday_from_iso(number).map_err(D::Error::custom)
    }
}

/// `serde(with = ...)` adapter for a list of ISO weekday numbers.
/// Deserialized lists come back sorted Monday first, without duplicates.
pub mod iso_weekdays {
    use chrono::Weekday;
    use serde::{Deserialize, Deserializer, Serializer, de::Error, ser::SerializeSeq};

    pub fn serialize<S: Serializer>(days: &[Weekday], serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(days.len()))?;
        for day in days {
            seq.serialize_element(&super::weekday_to_iso(*day))?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<Weekday>, D::Error> {
        let mut numbers = Vec::<u8>::deserialize(deserializer)?;
        numbers.sort_unstable();
        numbers.dedup();
        numbers
            .into_iter()
            .map(|n| super::weekday_from_iso(n).map_err(D::Error::custom))
            .collect()
    }
}
