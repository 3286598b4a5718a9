#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use std::collections::BTreeMap;
use urania::ephemeris::{
    EphemerisError, EphemerisService, GeoLocation, HouseSet, HouseSystem, Planet, PlanetPosition,
    PositionSet,
};

pub fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

fn days_since(epoch: DateTime<Utc>, at: DateTime<Utc>) -> f64 {
    (at - epoch).num_milliseconds() as f64 / 86_400_000.0
}

fn equal_houses(ascendant: f64) -> HouseSet {
    let mut cusps = [0.0; 12];
    for (i, cusp) in cusps.iter_mut().enumerate() {
        *cusp = ascendant + 30.0 * i as f64;
    }
    HouseSet::from_cusps(HouseSystem::Equal, cusps, ascendant, ascendant + 270.0)
}

/// Every body moves at a constant speed from a base longitude at `epoch`.
/// Houses are equal houses from an ascendant that also moves linearly.
#[derive(Debug, Clone)]
pub struct LinearEphemeris {
    epoch: DateTime<Utc>,
    bodies: BTreeMap<Planet, (f64, f64)>,
    ascendant: (f64, f64),
}

impl LinearEphemeris {
    /// Rough mean motions, spread-out starting longitudes.
    pub fn new(epoch: DateTime<Utc>) -> Self {
        let defaults = [
            (Planet::Sun, 280.0, 0.9856),
            (Planet::Moon, 100.0, 13.176),
            (Planet::Mercury, 265.0, 1.2),
            (Planet::Venus, 300.0, 1.1),
            (Planet::Mars, 210.0, 0.52),
            (Planet::Jupiter, 95.0, 0.083),
            (Planet::Saturn, 285.0, 0.034),
            (Planet::Uranus, 275.0, 0.012),
            (Planet::Neptune, 282.0, 0.006),
            (Planet::Pluto, 225.0, 0.004),
        ];
        Self {
            epoch,
            bodies: defaults.iter().map(|&(p, lon, speed)| (p, (lon, speed))).collect(),
            ascendant: (0.0, 0.0),
        }
    }

    pub fn with_body(mut self, planet: Planet, longitude: f64, speed: f64) -> Self {
        self.bodies.insert(planet, (longitude, speed));
        self
    }

    pub fn with_ascendant(mut self, longitude: f64, speed: f64) -> Self {
        self.ascendant = (longitude, speed);
        self
    }
}

impl EphemerisService for LinearEphemeris {
    fn positions(
        &self,
        at: DateTime<Utc>,
        _location: &GeoLocation,
    ) -> Result<PositionSet, EphemerisError> {
        let days = days_since(self.epoch, at);
        Ok(self
            .bodies
            .iter()
            .map(|(&planet, &(lon, speed))| PlanetPosition::new(planet, lon + speed * days, speed))
            .collect())
    }

    fn houses(
        &self,
        at: DateTime<Utc>,
        _location: &GeoLocation,
    ) -> Result<HouseSet, EphemerisError> {
        let days = days_since(self.epoch, at);
        Ok(equal_houses(self.ascendant.0 + self.ascendant.1 * days))
    }
}

/// Returns a fixed chart for each registered moment and fails otherwise.
#[derive(Debug, Clone, Default)]
pub struct ScriptedEphemeris {
    charts: Vec<(DateTime<Utc>, PositionSet)>,
}

impl ScriptedEphemeris {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(mut self, moment: DateTime<Utc>, chart: PositionSet) -> Self {
        self.charts.push((moment, chart));
        self
    }
}

impl EphemerisService for ScriptedEphemeris {
    fn positions(
        &self,
        at: DateTime<Utc>,
        _location: &GeoLocation,
    ) -> Result<PositionSet, EphemerisError> {
        self.charts
            .iter()
            .find(|(moment, _)| *moment == at)
            .map(|(_, chart)| chart.clone())
            .ok_or_else(|| EphemerisError::Unavailable(format!("no chart scripted for {}", at)))
    }

    fn houses(
        &self,
        _at: DateTime<Utc>,
        _location: &GeoLocation,
    ) -> Result<HouseSet, EphemerisError> {
        Ok(equal_houses(0.0))
    }
}

/// Always unavailable.
pub struct FailingEphemeris;

impl EphemerisService for FailingEphemeris {
    fn positions(
        &self,
        _at: DateTime<Utc>,
        _location: &GeoLocation,
    ) -> Result<PositionSet, EphemerisError> {
        Err(EphemerisError::Unavailable("connection refused".to_string()))
    }

    fn houses(
        &self,
        _at: DateTime<Utc>,
        _location: &GeoLocation,
    ) -> Result<HouseSet, EphemerisError> {
        Err(EphemerisError::Unavailable("connection refused".to_string()))
    }
}

/// Drops Pluto from every chart.
pub struct IncompleteEphemeris(pub LinearEphemeris);

impl EphemerisService for IncompleteEphemeris {
    fn positions(
        &self,
        at: DateTime<Utc>,
        location: &GeoLocation,
    ) -> Result<PositionSet, EphemerisError> {
        let full = self.0.positions(at, location)?;
        Ok(full.iter().filter(|p| p.planet != Planet::Pluto).cloned().collect())
    }

    fn houses(
        &self,
        at: DateTime<Utc>,
        location: &GeoLocation,
    ) -> Result<HouseSet, EphemerisError> {
        self.0.houses(at, location)
    }
}

/// Chart with `overrides` applied and every other body placed at
/// `base + i * step` in canonical order.
pub fn chart(base: f64, step: f64, overrides: &[(Planet, f64)]) -> PositionSet {
    Planet::ALL
        .iter()
        .enumerate()
        .map(|(i, &planet)| {
            let lon = overrides
                .iter()
                .find(|(p, _)| *p == planet)
                .map(|(_, lon)| *lon)
                .unwrap_or(base + i as f64 * step);
            PlanetPosition::new(planet, lon, 0.5)
        })
        .collect()
}
