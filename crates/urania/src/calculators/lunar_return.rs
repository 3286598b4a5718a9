//! Lunar return: the chart for the next moment the Moon comes back to its
//! natal longitude, read as a forecast for the month ahead.

use chrono::{DateTime, Utc};
use log::{debug, warn};

use super::return_chart::{cast_chart, ReturnInterpretation, ReturnKind, ReturnResult};
use super::search::{add_days, LongitudeSearch, ReturnFix};
use crate::aspects::signed_separation;
use crate::birth::BirthData;
use crate::ephemeris::{EphemerisService, HouseSet, Planet, PlanetPosition};
use crate::error::{CalculationError, CalculationKind, EngineError, InputError};
use crate::interpretation::{house_theme, moon_sign_theme};
use crate::settings::{EngineSettings, ReturnSearch};

/// Step of the date approximation
pub const LUNAR_CYCLE_DAYS: i64 = 29;

const SCAN_STEP_DAYS: f64 = 0.5;
/// Longer than a sidereal month, so a return is always inside
const SCAN_WINDOW_DAYS: f64 = 30.0;

/// Whole lunar cycles from birth up to `target`, stepped forward once more if
/// that lands before `target`.
pub fn cycle_estimate(
    birth: DateTime<Utc>,
    target: DateTime<Utc>,
) -> Result<DateTime<Utc>, InputError> {
    let cycles = ((target - birth).num_days() / LUNAR_CYCLE_DAYS).max(0);
    let mut estimate = add_days(birth, (cycles * LUNAR_CYCLE_DAYS) as f64)?;
    if estimate < target {
        estimate = add_days(estimate, LUNAR_CYCLE_DAYS as f64)?;
    }
    Ok(estimate)
}

pub fn interpret_lunar_return(moon: &PlanetPosition, houses: &HouseSet) -> ReturnInterpretation {
    let house = houses.house_of(moon.longitude);
    let ascendant_sign = houses.ascendant_sign();
    let focus = moon_sign_theme(moon.sign);
    let tone = house
        .and_then(house_theme)
        .unwrap_or("no single area of life");

    ReturnInterpretation {
        house,
        sign: moon.sign,
        ascendant_sign,
        focus: focus.to_string(),
        tone: tone.to_string(),
        summary: format!(
            "Moon in {}: {}, with feelings centred on {}",
            moon.sign, focus, tone
        ),
    }
}

pub struct LunarReturnLocator<'a, E: EphemerisService + ?Sized> {
    ephemeris: &'a E,
    settings: &'a EngineSettings,
}

impl<'a, E: EphemerisService + ?Sized> LunarReturnLocator<'a, E> {
    pub fn new(ephemeris: &'a E, settings: &'a EngineSettings) -> Self {
        Self { ephemeris, settings }
    }

    /// Nearest return at or after `target_date` (default now).
    pub fn calculate_lunar_return(
        &self,
        birth: &BirthData,
        target_date: Option<DateTime<Utc>>,
    ) -> Result<ReturnResult, CalculationError> {
        let target = target_date.unwrap_or_else(Utc::now);
        self.calculate(birth, target).map_err(|e| {
            warn!("Lunar return calculation failed: {}", e);
            CalculationError::new(CalculationKind::LunarReturn, &e)
        })
    }

    fn calculate(
        &self,
        birth: &BirthData,
        target: DateTime<Utc>,
    ) -> Result<ReturnResult, EngineError> {
        let resolved = birth.resolve(self.settings)?;
        let location = resolved.location;
        let natal = self
            .ephemeris
            .positions(resolved.moment, &location)?
            .ensure_complete()?;
        let natal_moon = natal.require(Planet::Moon)?.longitude;

        let fix = match self.settings.return_search {
            ReturnSearch::Anniversary => {
                let moment = cycle_estimate(resolved.moment, target)?;
                let lon = self.ephemeris.longitude(Planet::Moon, moment, &location)?;
                ReturnFix {
                    moment,
                    residual: signed_separation(natal_moon, lon).abs(),
                }
            }
            ReturnSearch::Bisection => {
                LongitudeSearch::new(self.ephemeris, Planet::Moon, natal_moon, location)
                    .next_after(target, SCAN_STEP_DAYS, SCAN_WINDOW_DAYS)?
            }
        };
        debug!(
            "Lunar return after {} resolved at {} ({:?}, residual {:.4} deg)",
            target, fix.moment, self.settings.return_search, fix.residual
        );

        let (positions, houses) = cast_chart(self.ephemeris, fix.moment, &location)?;
        let interpretation = interpret_lunar_return(positions.require(Planet::Moon)?, &houses);

        Ok(ReturnResult {
            kind: ReturnKind::Lunar,
            return_date: fix.moment,
            location,
            natal_longitude: natal_moon,
            residual: fix.residual,
            search: self.settings.return_search,
            positions,
            houses,
            interpretation,
        })
    }
}
