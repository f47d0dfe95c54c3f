use std::{str::FromStr, sync::LazyLock};

use chrono::{Datelike, NaiveDateTime, Timelike};
use derive_more::Display;
use regex::Regex;
use serde::Serialize;

const TS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// chrono accepts unpadded fields, so the shape is pinned down first.
static TS_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2}$")
        .expect("valid timestamp shape")
});

/// Access time of a request, second precision, no zone.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    pub fn hour(&self) -> Hour {
        Hour(self.0.hour() as u8)
    }
}

impl FromStr for Timestamp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !TS_SHAPE.is_match(s) {
            return Err(format!("{s:?} is not in YYYY-MM-DD HH:MM:SS form"));
        }
        let parsed =
            NaiveDateTime::parse_from_str(s, TS_FORMAT).map_err(|e| format!("{s:?}: {e}"))?;
        // chrono reads second 60 as a leap second in any minute
        if parsed.nanosecond() >= 1_000_000_000 {
            return Err(format!("{s:?} has no such second"));
        }
        if parsed.year() < 1 {
            return Err(format!("{s:?} is before year 1"));
        }
        Ok(Self(parsed))
    }
}

/// Hour of day, 0 through 23.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Hour(u8);

impl Hour {
    #[cfg(test)]
    pub fn new(hour: u8) -> Option<Self> {
        (hour < 24).then_some(Self(hour))
    }
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Browser {
    Firefox,
    Chrome,
    #[display("Internet Explorer")]
    #[serde(rename = "Internet Explorer")]
    InternetExplorer,
    Safari,
}

impl Browser {
    /// Canonical order, also the tie-break order for popularity.
    pub const ALL: [Browser; 4] = [
        Browser::Firefox,
        Browser::Chrome,
        Browser::InternetExplorer,
        Browser::Safari,
    ];
}
