//! Civil moment of a listing event.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::ephemeris::GeoLocation;
use crate::error::ChartError;
use crate::time::JulianDay;

/// Listing time assumed when none is recorded.
pub const DEFAULT_LISTING_TIME: &str = "10:00";

const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

/// Local civil date-time at a geographic site.
///
/// The offset is the site's civil offset from UT in minutes. It defaults
/// to zero, in which case the local time is taken as UT.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredMoment")]
pub struct Moment {
    local: NaiveDateTime,
    site: GeoLocation,
    utc_offset_minutes: i32,
}

#[derive(Deserialize)]
struct StoredMoment {
    local: NaiveDateTime,
    site: GeoLocation,
    #[serde(default)]
    utc_offset_minutes: i32,
}

impl TryFrom<StoredMoment> for Moment {
    type Error = ChartError;

    fn try_from(stored: StoredMoment) -> Result<Self, Self::Error> {
        Moment::new(stored.local, stored.site)?.with_utc_offset(stored.utc_offset_minutes)
    }
}

impl Moment {
    pub fn new(local: NaiveDateTime, site: GeoLocation) -> Result<Self, ChartError> {
        site.validate()?;
        Ok(Self {
            local,
            site,
            utc_offset_minutes: 0,
        })
    }

    /// Build from raw calendar fields, rejecting impossible dates and times.
    pub fn from_civil(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        site: GeoLocation,
    ) -> Result<Self, ChartError> {
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            ChartError::InvalidInput(format!("invalid date {:04}-{:02}-{:02}", year, month, day))
        })?;
        let time = NaiveTime::from_hms_opt(hour, minute, second).ok_or_else(|| {
            ChartError::InvalidInput(format!("invalid time {:02}:{:02}:{:02}", hour, minute, second))
        })?;
        Self::new(date.and_time(time), site)
    }

    /// Listing date plus an exchange-style time string ("HH:MM" or "HH").
    pub fn for_listing(
        date: NaiveDate,
        listing_time: &str,
        site: GeoLocation,
    ) -> Result<Self, ChartError> {
        let time = parse_listing_time(listing_time)?;
        Self::new(date.and_time(time), site)
    }

    pub fn with_utc_offset(mut self, minutes: i32) -> Result<Self, ChartError> {
        if minutes.abs() > MAX_UTC_OFFSET_MINUTES {
            return Err(ChartError::InvalidInput(format!(
                "UTC offset {} minutes outside ±{}",
                minutes, MAX_UTC_OFFSET_MINUTES
            )));
        }
        if self.local.checked_sub_signed(Duration::minutes(minutes as i64)).is_none() {
            return Err(ChartError::InvalidInput(format!(
                "{} shifted by {} minutes leaves the supported date range",
                self.local, minutes
            )));
        }
        self.utc_offset_minutes = minutes;
        Ok(self)
    }

    pub fn local(&self) -> NaiveDateTime {
        self.local
    }

    pub fn site(&self) -> GeoLocation {
        self.site
    }

    pub fn utc_offset_minutes(&self) -> i32 {
        self.utc_offset_minutes
    }

    pub fn utc(&self) -> NaiveDateTime {
        // the shift is range-checked in with_utc_offset
        self.local
            .checked_sub_signed(Duration::minutes(self.utc_offset_minutes as i64))
            .unwrap_or(self.local)
    }

    pub fn julian_day(&self) -> JulianDay {
        JulianDay::from_utc(self.utc())
    }
}

/// Parse "HH:MM", "HH:MM:SS" or "HH". Missing minutes default to zero.
pub fn parse_listing_time(text: &str) -> Result<NaiveTime, ChartError> {
    let invalid = || ChartError::InvalidInput(format!("invalid listing time '{}'", text));
    let mut fields = text.trim().split(':');

    let mut next_field = |required: bool| -> Result<u32, ChartError> {
        match fields.next() {
            Some(part) => part.trim().parse::<u32>().map_err(|_| invalid()),
            None if required => Err(invalid()),
            None => Ok(0),
        }
    };
    let hour = next_field(true)?;
    let minute = next_field(false)?;
    let second = next_field(false)?;
    if fields.next().is_some() {
        return Err(invalid());
    }

    NaiveTime::from_hms_opt(hour, minute, second).ok_or_else(invalid)
}
