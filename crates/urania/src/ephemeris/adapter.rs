use super::types::{GeoLocation, HouseSet, HouseSystem, Planet, PlanetPosition, PositionSet};
use super::{EphemerisError, EphemerisService};
use chrono::{DateTime, Datelike, Timelike, Utc};
use log::debug;
use std::env;
use std::path::PathBuf;
use swisseph::swe::{calc_ut, houses_ex, julday, set_ephe_path};
use swisseph::{AscMc, Cusp};

const DEFAULT_EPHEMERIS_PATH: &str = "/usr/local/share/swisseph";

/// FLG_SWIEPH | FLG_SPEED: Swiss files, with daily motion in out[3]
const CALC_FLAGS: i32 = 2 | 256;

/// Swiss Ephemeris body codes
const PLANET_CODES: &[(Planet, i32)] = &[
    (Planet::Sun, 0),
    (Planet::Moon, 1),
    (Planet::Mercury, 2),
    (Planet::Venus, 3),
    (Planet::Mars, 4),
    (Planet::Jupiter, 5),
    (Planet::Saturn, 6),
    (Planet::Uranus, 7),
    (Planet::Neptune, 8),
    (Planet::Pluto, 9),
];

/// Swiss Ephemeris adapter implementation (tropical zodiac)
#[derive(Debug, Clone)]
pub struct SwissEphemerisAdapter {
    ephemeris_path: PathBuf,
    house_system: HouseSystem,
}

impl SwissEphemerisAdapter {
    /// Create a new adapter with optional ephemeris path.
    ///
    /// Falls back to `SWISS_EPHEMERIS_PATH`, then the system default location.
    pub fn new(
        ephemeris_path: Option<PathBuf>,
        house_system: HouseSystem,
    ) -> Result<Self, EphemerisError> {
        let path = ephemeris_path.unwrap_or_else(|| {
            env::var("SWISS_EPHEMERIS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_EPHEMERIS_PATH))
        });

        if !path.exists() {
            return Err(EphemerisError::FileNotFound {
                path: path.display().to_string(),
                message: "Ephemeris path does not exist. \
                          Please ensure Swiss Ephemeris data files are installed."
                    .to_string(),
            });
        }

        // Process-wide in the Swiss Ephemeris library; the last adapter built wins
        set_ephe_path(&path.to_string_lossy());

        debug!(
            "Swiss Ephemeris adapter using {} ({:?} houses)",
            path.display(),
            house_system
        );

        Ok(Self {
            ephemeris_path: path,
            house_system,
        })
    }

    pub fn ephemeris_path(&self) -> &PathBuf {
        &self.ephemeris_path
    }

    pub fn house_system(&self) -> HouseSystem {
        self.house_system
    }

    /// Calculate position for a single planet
    pub fn calc_planet_position(
        &self,
        planet: Planet,
        at: DateTime<Utc>,
    ) -> Result<PlanetPosition, EphemerisError> {
        let code = PLANET_CODES
            .iter()
            .find(|(p, _)| *p == planet)
            .map(|(_, code)| *code)
            .ok_or_else(|| EphemerisError::CalculationFailed {
                planet,
                datetime: at,
                message: "No Swiss Ephemeris code for body".to_string(),
            })?;

        let jd = datetime_to_julian_day(at);
        let result = calc_ut(jd, code as u32, CALC_FLAGS as u32).map_err(|e| {
            EphemerisError::CalculationFailed {
                planet,
                datetime: at,
                message: format!("Swiss Ephemeris error: {}", e),
            }
        })?;

        let out = result.out;
        Ok(PlanetPosition::new(planet, out[0], out[3]))
    }
}

impl EphemerisService for SwissEphemerisAdapter {
    fn positions(
        &self,
        at: DateTime<Utc>,
        _location: &GeoLocation,
    ) -> Result<PositionSet, EphemerisError> {
        let mut set = PositionSet::new();
        for planet in Planet::ALL {
            set.insert(self.calc_planet_position(planet, at)?);
        }
        set.ensure_complete()
    }

    fn houses(
        &self,
        at: DateTime<Utc>,
        location: &GeoLocation,
    ) -> Result<HouseSet, EphemerisError> {
        if !location.is_valid() {
            return Err(EphemerisError::HouseCalculationFailed {
                message: format!("coordinates out of range: {}, {}", location.lat, location.lon),
            });
        }

        let jd = datetime_to_julian_day(at);
        let (c, a) = houses_ex(
            jd,
            CALC_FLAGS,
            location.lat,
            location.lon,
            self.house_system.code() as i32,
        );
        let cusps = Cusp::from_array(c);
        let ascmc = AscMc::from_array(a);

        let cusp_values = [
            cusps.first, cusps.second, cusps.third, cusps.fourth,
            cusps.fifth, cusps.sixth, cusps.seventh, cusps.eighth,
            cusps.ninth, cusps.tenth, cusps.eleventh, cusps.twelfth,
        ];
        if cusp_values.iter().any(|c| !c.is_finite()) {
            return Err(EphemerisError::HouseCalculationFailed {
                message: format!(
                    "{:?} cusps undefined at latitude {}",
                    self.house_system, location.lat
                ),
            });
        }

        Ok(HouseSet::from_cusps(
            self.house_system,
            cusp_values,
            ascmc.ascendant,
            ascmc.mc,
        ))
    }

    fn longitude(
        &self,
        planet: Planet,
        at: DateTime<Utc>,
        _location: &GeoLocation,
    ) -> Result<f64, EphemerisError> {
        Ok(self.calc_planet_position(planet, at)?.longitude)
    }
}

/// UT Julian Day, keeping sub-second precision for the return searches.
fn datetime_to_julian_day(dt: DateTime<Utc>) -> f64 {
    let seconds = dt.num_seconds_from_midnight() as f64 + dt.nanosecond() as f64 / 1e9;
    // GREG_CAL = 1
    julday(dt.year(), dt.month() as i32, dt.day() as i32, seconds / 3600.0, 1)
}
