//! Wall-clock time localized to an IANA timezone

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

/// Hour, minute and second of a localized clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeFields {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl TimeFields {
    pub fn new(hour: u32, minute: u32, second: u32) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }
}

/// A moment as seen on the wall clock of one timezone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalTime {
    pub zone: Tz,
    pub datetime: NaiveDateTime,
}

impl LocalTime {
    pub fn fields(&self) -> TimeFields {
        TimeFields {
            hour: self.datetime.hour(),
            minute: self.datetime.minute(),
            second: self.datetime.second(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.datetime.date()
    }

    /// `YYYY-MM-DD`, the format the astronomy endpoint expects
    pub fn iso_date(&self) -> String {
        self.datetime.format("%Y-%m-%d").to_string()
    }

    /// 12-hour display, e.g. `3:07:09 PM`
    pub fn display_time(&self) -> String {
        self.datetime.format("%-I:%M:%S %p").to_string()
    }

    /// Month/day/year display, e.g. `10/19/2026`
    pub fn display_date(&self) -> String {
        self.datetime.format("%-m/%-d/%Y").to_string()
    }
}

/// Localize `instant` to `zone`
pub fn local_time_at(zone: Tz, instant: DateTime<Utc>) -> LocalTime {
    LocalTime {
        zone,
        datetime: zone.from_utc_datetime(&instant.naive_utc()).naive_local(),
    }
}

/// Current wall-clock time in `zone`
pub fn local_now(zone: Tz) -> LocalTime {
    local_time_at(zone, Utc::now())
}

/// Parse an IANA identifier such as `Asia/Kolkata`
pub fn parse_zone(name: &str) -> Option<Tz> {
    name.parse::<Tz>().ok()
}
