//! Birth data as supplied by callers, and its resolution into a UTC moment.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::ephemeris::GeoLocation;
use crate::error::InputError;
use crate::settings::EngineSettings;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthData {
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<GeoLocation>,
    /// Offset of the local birth time from UTC
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utc_offset_minutes: Option<i32>,
}

impl BirthData {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            time: None,
            place: None,
            utc_offset_minutes: None,
        }
    }

    pub fn with_time(mut self, time: NaiveTime) -> Self {
        self.time = Some(time);
        self
    }

    pub fn with_place(mut self, place: GeoLocation) -> Self {
        self.place = Some(place);
        self
    }

    pub fn with_utc_offset(mut self, minutes: i32) -> Self {
        self.utc_offset_minutes = Some(minutes);
        self
    }

    /// Parse `YYYY-MM-DD` and an optional `HH:MM[:SS]`.
    pub fn parse(date: &str, time: Option<&str>) -> Result<Self, InputError> {
        let date = parse_date(date)?;
        let mut birth = BirthData::new(date);
        if let Some(time) = time {
            birth.time = Some(parse_time(time)?);
        }
        Ok(birth)
    }

    /// Fill defaults from `settings` and convert the local birth moment to UTC.
    pub fn resolve(&self, settings: &EngineSettings) -> Result<ResolvedBirth, InputError> {
        let minutes = self
            .utc_offset_minutes
            .unwrap_or(settings.default_utc_offset_minutes);
        let offset =
            FixedOffset::east_opt(minutes * 60).ok_or(InputError::InvalidUtcOffset(minutes))?;
        let local_time = self.time.unwrap_or(settings.default_birth_time);
        let location = self.place.unwrap_or(settings.default_location);

        Ok(ResolvedBirth {
            local_date: self.date,
            local_time,
            offset,
            location,
            moment: local_to_utc(self.date, local_time, offset)?,
        })
    }
}

/// Birth data with every default applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedBirth {
    pub local_date: NaiveDate,
    pub local_time: NaiveTime,
    pub offset: FixedOffset,
    pub location: GeoLocation,
    /// Birth moment in UTC
    pub moment: DateTime<Utc>,
}

impl ResolvedBirth {
    /// UTC instant of the birth time-of-day on another local date.
    pub fn at_local_date(&self, date: NaiveDate) -> Result<DateTime<Utc>, InputError> {
        local_to_utc(date, self.local_time, self.offset)
    }
}

fn local_to_utc(
    date: NaiveDate,
    time: NaiveTime,
    offset: FixedOffset,
) -> Result<DateTime<Utc>, InputError> {
    let naive = date.and_time(time);
    offset
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| InputError::InvalidLocalTime(naive.to_string()))
}

pub fn parse_date(text: &str) -> Result<NaiveDate, InputError> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
        .map_err(|_| InputError::InvalidDate(text.to_string()))
}

pub fn parse_time(text: &str) -> Result<NaiveTime, InputError> {
    let text = text.trim();
    NaiveTime::parse_from_str(text, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M"))
        .map_err(|_| InputError::InvalidTime(text.to_string()))
}
