use crate::aspects::types::{AspectDefinition, AspectMatch, ASPECT_DEFINITIONS};
use crate::ephemeris::{PlanetPosition, PositionSet};

/// Projection window for the applying/separating test (days)
const APPLYING_TIME_STEP: f64 = 0.1;

/// Below this speed (deg/day) a body is treated as stationary
const STATIONARY_SPEED: f64 = 0.01;

/// Shortest arc between two longitudes, in [0, 180].
pub fn circular_separation(lon1: f64, lon2: f64) -> f64 {
    let raw_diff = (lon1 - lon2).abs() % 360.0;
    if raw_diff > 180.0 {
        360.0 - raw_diff
    } else {
        raw_diff
    }
}

/// Signed arc from `from` to `to`, normalized to (-180, 180].
pub fn signed_separation(from: f64, to: f64) -> f64 {
    let d = (to - from).rem_euclid(360.0);
    if d > 180.0 {
        d - 360.0
    } else {
        d
    }
}

/// First aspect definition (ascending angle order) whose orb band
/// contains `separation`. Bands are inclusive at the orb boundary.
pub fn find_aspect(separation: f64) -> Option<(&'static AspectDefinition, f64)> {
    ASPECT_DEFINITIONS.iter().find_map(|def| {
        let orb = (separation - def.angle).abs();
        (orb <= def.orb).then_some((def, orb))
    })
}

/// Aspect matcher between a transiting (or otherwise moving) chart and a
/// fixed natal chart.
#[derive(Debug, Clone, Copy, Default)]
pub struct AspectMatcher;

impl AspectMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Match every (moving, natal) body pair. Pairs of the same body are
    /// included: a transit to its own natal place is meaningful.
    pub fn match_positions(&self, moving: &PositionSet, natal: &PositionSet) -> Vec<AspectMatch> {
        let mut matches = Vec::new();
        for transit in moving.iter() {
            for natal_pos in natal.iter() {
                if let Some(m) = self.match_pair(transit, natal_pos) {
                    matches.push(m);
                }
            }
        }
        matches
    }

    /// Match a single pair; at most one aspect per pair.
    pub fn match_pair(
        &self,
        transit: &PlanetPosition,
        natal: &PlanetPosition,
    ) -> Option<AspectMatch> {
        let separation = circular_separation(transit.longitude, natal.longitude);
        let (def, orb) = find_aspect(separation)?;

        Some(AspectMatch {
            transit_planet: transit.planet,
            natal_planet: natal.planet,
            aspect: def.kind,
            exact_angle: separation,
            orb,
            is_applying: self.is_aspect_applying(
                transit.longitude,
                natal.longitude,
                transit.speed,
                def.angle,
                orb,
            ),
            is_retrograde: transit.speed < 0.0,
        })
    }

    /// Determine if an aspect is applying (approaching exact) or separating.
    /// The natal point does not move, so only the transit speed matters.
    fn is_aspect_applying(
        &self,
        transit_lon: f64,
        natal_lon: f64,
        transit_speed: f64,
        aspect_angle: f64,
        current_orb: f64,
    ) -> bool {
        if transit_speed.abs() < STATIONARY_SPEED {
            return false;
        }

        let signed_diff = signed_separation(natal_lon, transit_lon);
        let future_diff = signed_separation(0.0, signed_diff + transit_speed * APPLYING_TIME_STEP);
        let future_orb = (future_diff.abs() - aspect_angle).abs();

        future_orb < current_orb
    }
}
