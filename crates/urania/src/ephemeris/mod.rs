//! Ephemeris boundary.
//!
//! The engine never computes planetary positions itself; it consumes them
//! through [`EphemerisService`]. [`SwissEphemerisAdapter`] is the production
//! implementation.

pub mod adapter;
pub mod types;

pub use adapter::SwissEphemerisAdapter;
pub use types::{
    normalize_longitude, GeoLocation, HouseCusp, HouseSet, HouseSystem, MoonPhase, Planet,
    PlanetPosition, PositionSet, Sign,
};

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur during ephemeris calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EphemerisError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("Failed to calculate position for {planet} at {datetime}: {message}")]
    CalculationFailed {
        planet: Planet,
        datetime: DateTime<Utc>,
        message: String,
    },
    #[error("House calculation failed: {message}")]
    HouseCalculationFailed { message: String },
    #[error("Ephemeris returned incomplete positions, missing: {missing:?}")]
    IncompletePositions { missing: Vec<Planet> },
    #[error("Ephemeris service unavailable: {0}")]
    Unavailable(String),
}

/// Source of raw planetary positions and house cusps.
///
/// Implementations must return all ten bodies from [`positions`] or fail.
///
/// [`positions`]: EphemerisService::positions
pub trait EphemerisService {
    fn positions(
        &self,
        at: DateTime<Utc>,
        location: &GeoLocation,
    ) -> Result<PositionSet, EphemerisError>;

    fn houses(&self, at: DateTime<Utc>, location: &GeoLocation)
        -> Result<HouseSet, EphemerisError>;

    /// Longitude of a single body. Searches call this repeatedly, so
    /// adapters that can compute one body cheaply should override it.
    fn longitude(
        &self,
        planet: Planet,
        at: DateTime<Utc>,
        location: &GeoLocation,
    ) -> Result<f64, EphemerisError> {
        self.positions(at, location)?
            .longitude(planet)
            .ok_or(EphemerisError::IncompletePositions {
                missing: vec![planet],
            })
    }

    /// Geocentric lunar phase; location does not matter for the elongation.
    fn moon_phase(&self, at: DateTime<Utc>) -> Result<MoonPhase, EphemerisError> {
        let origin = GeoLocation::new(0.0, 0.0);
        let sun = self.longitude(Planet::Sun, at, &origin)?;
        let moon = self.longitude(Planet::Moon, at, &origin)?;
        Ok(MoonPhase::from_longitudes(sun, moon))
    }
}

impl<E: EphemerisService + ?Sized> EphemerisService for &E {
    fn positions(
        &self,
        at: DateTime<Utc>,
        location: &GeoLocation,
    ) -> Result<PositionSet, EphemerisError> {
        (**self).positions(at, location)
    }

    fn houses(
        &self,
        at: DateTime<Utc>,
        location: &GeoLocation,
    ) -> Result<HouseSet, EphemerisError> {
        (**self).houses(at, location)
    }

    fn longitude(
        &self,
        planet: Planet,
        at: DateTime<Utc>,
        location: &GeoLocation,
    ) -> Result<f64, EphemerisError> {
        (**self).longitude(planet, at, location)
    }

    fn moon_phase(&self, at: DateTime<Utc>) -> Result<MoonPhase, EphemerisError> {
        (**self).moon_phase(at)
    }
}
