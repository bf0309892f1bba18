use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use swisseph::swe::julday;

/// Julian Day on the UT time scale.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct JulianDay(f64);

/// JD of the J2000.0 epoch (2000-01-01 12:00 UT).
pub const J2000: f64 = 2451545.0;
pub const DAYS_PER_JULIAN_YEAR: f64 = 365.25;

// gregflag for swe_julday
const GREG_CAL: u32 = 1;

impl JulianDay {
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Julian years elapsed since `epoch` (a raw JD).
    pub fn years_since(&self, epoch: f64) -> f64 {
        (self.0 - epoch) / DAYS_PER_JULIAN_YEAR
    }

    /// Convert a UT civil date-time on the Gregorian calendar.
    pub fn from_utc(dt: NaiveDateTime) -> Self {
        let hour_decimal = dt.hour() as f64
            + dt.minute() as f64 / 60.0
            + (dt.second() as f64 + dt.nanosecond() as f64 / 1e9) / 3600.0;
        Self(julday(dt.year(), dt.month() as i32, dt.day() as i32, hour_decimal, GREG_CAL))
    }
}

impl From<f64> for JulianDay {
    fn from(v: f64) -> Self {
        JulianDay::new(v)
    }
}
