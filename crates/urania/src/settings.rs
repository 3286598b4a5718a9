//! Engine-wide settings and their defaults.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::ephemeris::{GeoLocation, HouseSystem};

/// Fallback birth place when the caller supplies none.
pub const DEFAULT_LOCATION: GeoLocation = GeoLocation::new(55.7558, 37.6176);

/// How return charts locate the moment of return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnSearch {
    /// Date approximation: birthday anniversary (solar) or 29-day cycle
    /// stepping (lunar). Cheap, can be off by a day.
    Anniversary,
    /// Bracketed bisection on the longitude difference, refined to a minute.
    #[default]
    Bisection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub default_location: GeoLocation,
    pub default_birth_time: NaiveTime,
    /// Offset applied to birth date/time when the caller supplies none
    pub default_utc_offset_minutes: i32,
    pub house_system: HouseSystem,
    pub return_search: ReturnSearch,
    /// Swiss Ephemeris data directory; `None` uses the adapter's fallbacks
    pub ephemeris_path: Option<PathBuf>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            default_location: DEFAULT_LOCATION,
            default_birth_time: NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN),
            default_utc_offset_minutes: 0,
            house_system: HouseSystem::default(),
            return_search: ReturnSearch::default(),
            ephemeris_path: None,
        }
    }
}
