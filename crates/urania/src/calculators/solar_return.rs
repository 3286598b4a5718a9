//! Solar return: the chart for the moment the Sun comes back to its natal
//! longitude, read as a forecast for the year ahead.

use chrono::{Datelike, NaiveDate, Utc};
use log::{debug, warn};

use super::return_chart::{cast_chart, ReturnInterpretation, ReturnKind, ReturnResult};
use super::search::{LongitudeSearch, ReturnFix};
use crate::aspects::signed_separation;
use crate::birth::BirthData;
use crate::ephemeris::{EphemerisService, HouseSet, Planet, PlanetPosition};
use crate::error::{CalculationError, CalculationKind, EngineError, InputError};
use crate::interpretation::{ascendant_tone, house_theme};
use crate::settings::{EngineSettings, ReturnSearch};

/// The search brackets the anniversary by this many days on each side
const SEARCH_HALF_WINDOW_DAYS: f64 = 2.0;
const SEARCH_STEP_DAYS: f64 = 1.0;

/// Birthday in `year`; Feb 29 falls back to Feb 28 in common years.
pub fn anniversary_date(birth_date: NaiveDate, year: i32) -> Result<NaiveDate, InputError> {
    NaiveDate::from_ymd_opt(year, birth_date.month(), birth_date.day())
        .or_else(|| {
            (birth_date.month() == 2 && birth_date.day() == 29)
                .then(|| NaiveDate::from_ymd_opt(year, 2, 28))
                .flatten()
        })
        .ok_or(InputError::InvalidYear(year))
}

pub fn interpret_solar_return(sun: &PlanetPosition, houses: &HouseSet) -> ReturnInterpretation {
    let house = houses.house_of(sun.longitude);
    let ascendant_sign = houses.ascendant_sign();
    let focus = house
        .and_then(house_theme)
        .unwrap_or("a balanced spread of life themes");
    let tone = ascendant_tone(ascendant_sign);

    ReturnInterpretation {
        house,
        sign: sun.sign,
        ascendant_sign,
        focus: focus.to_string(),
        tone: tone.to_string(),
        summary: format!("The year ahead focuses on {}, {}", focus, tone),
    }
}

pub struct SolarReturnLocator<'a, E: EphemerisService + ?Sized> {
    ephemeris: &'a E,
    settings: &'a EngineSettings,
}

impl<'a, E: EphemerisService + ?Sized> SolarReturnLocator<'a, E> {
    pub fn new(ephemeris: &'a E, settings: &'a EngineSettings) -> Self {
        Self { ephemeris, settings }
    }

    /// `target_year` defaults to the current year.
    pub fn calculate_solar_return(
        &self,
        birth: &BirthData,
        target_year: Option<i32>,
    ) -> Result<ReturnResult, CalculationError> {
        let year = target_year.unwrap_or_else(|| Utc::now().year());
        self.calculate(birth, year).map_err(|e| {
            warn!("Solar return calculation failed: {}", e);
            CalculationError::new(CalculationKind::SolarReturn, &e)
        })
    }

    fn calculate(&self, birth: &BirthData, year: i32) -> Result<ReturnResult, EngineError> {
        let resolved = birth.resolve(self.settings)?;
        let location = resolved.location;
        let natal = self
            .ephemeris
            .positions(resolved.moment, &location)?
            .ensure_complete()?;
        let natal_sun = natal.require(Planet::Sun)?.longitude;

        let anniversary = resolved.at_local_date(anniversary_date(birth.date, year)?)?;
        let fix = match self.settings.return_search {
            ReturnSearch::Anniversary => {
                let lon = self.ephemeris.longitude(Planet::Sun, anniversary, &location)?;
                ReturnFix {
                    moment: anniversary,
                    residual: signed_separation(natal_sun, lon).abs(),
                }
            }
            ReturnSearch::Bisection => {
                LongitudeSearch::new(self.ephemeris, Planet::Sun, natal_sun, location)
                    .within(anniversary, SEARCH_HALF_WINDOW_DAYS, SEARCH_STEP_DAYS)?
            }
        };
        debug!(
            "Solar return {} resolved at {} ({:?}, residual {:.4} deg)",
            year, fix.moment, self.settings.return_search, fix.residual
        );

        let (positions, houses) = cast_chart(self.ephemeris, fix.moment, &location)?;
        let interpretation = interpret_solar_return(positions.require(Planet::Sun)?, &houses);

        Ok(ReturnResult {
            kind: ReturnKind::Solar,
            return_date: fix.moment,
            location,
            natal_longitude: natal_sun,
            residual: fix.residual,
            search: self.settings.return_search,
            positions,
            houses,
            interpretation,
        })
    }
}
