//! Facade bundling an ephemeris with engine settings.
//!
//! Every calculation is a pure function of its arguments plus whatever the
//! ephemeris returns; the engine holds no mutable state and can be shared
//! across threads when the ephemeris can.

use chrono::{DateTime, NaiveDate, Utc};
use log::warn;

use crate::birth::BirthData;
use crate::calculators::{
    LunarReturnLocator, ProgressionCalculator, ProgressionResult, ReturnResult,
    SolarReturnLocator, TransitCalculator, TransitResult,
};
use crate::ephemeris::{EphemerisService, MoonPhase};
use crate::error::{CalculationError, CalculationKind, EngineError};
use crate::settings::EngineSettings;

pub struct TransitEngine<E: EphemerisService> {
    ephemeris: E,
    settings: EngineSettings,
}

impl<E: EphemerisService> TransitEngine<E> {
    pub fn new(ephemeris: E, settings: EngineSettings) -> Self {
        Self { ephemeris, settings }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn ephemeris(&self) -> &E {
        &self.ephemeris
    }

    pub fn calculate_current_transits(
        &self,
        birth: &BirthData,
        current_date: Option<DateTime<Utc>>,
    ) -> Result<TransitResult, CalculationError> {
        TransitCalculator::new(&self.ephemeris, &self.settings)
            .calculate_current_transits(birth, current_date)
    }

    pub fn calculate_progressions(
        &self,
        birth: &BirthData,
        target_date: Option<NaiveDate>,
    ) -> Result<ProgressionResult, CalculationError> {
        ProgressionCalculator::new(&self.ephemeris, &self.settings)
            .calculate_progressions(birth, target_date)
    }

    pub fn calculate_solar_return(
        &self,
        birth: &BirthData,
        target_year: Option<i32>,
    ) -> Result<ReturnResult, CalculationError> {
        SolarReturnLocator::new(&self.ephemeris, &self.settings)
            .calculate_solar_return(birth, target_year)
    }

    pub fn calculate_lunar_return(
        &self,
        birth: &BirthData,
        target_date: Option<DateTime<Utc>>,
    ) -> Result<ReturnResult, CalculationError> {
        LunarReturnLocator::new(&self.ephemeris, &self.settings)
            .calculate_lunar_return(birth, target_date)
    }

    /// Pass-through for callers combining results with the lunar calendar.
    pub fn moon_phase(&self, at: Option<DateTime<Utc>>) -> Result<MoonPhase, CalculationError> {
        self.ephemeris
            .moon_phase(at.unwrap_or_else(Utc::now))
            .map_err(|e| {
                warn!("Moon phase calculation failed: {}", e);
                CalculationError::new(CalculationKind::MoonPhase, &EngineError::from(e))
            })
    }
}
