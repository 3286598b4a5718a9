//! Secondary progressions ("day for a year"): each day after birth stands
//! for one year of life.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::aspects::signed_separation;
use crate::birth::BirthData;
use crate::ephemeris::{EphemerisService, Planet, PositionSet, Sign};
use crate::error::{CalculationError, CalculationKind, EngineError, InputError};
use crate::interpretation::progression_text;
use crate::settings::EngineSettings;

pub const DAYS_PER_YEAR: f64 = 365.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressionIntensity {
    Stable,
    Moderate,
    Active,
}

impl ProgressionIntensity {
    /// |movement| < 5 stable, < 15 moderate, otherwise active.
    pub fn classify(movement: f64) -> ProgressionIntensity {
        let magnitude = movement.abs();
        if magnitude < 5.0 {
            ProgressionIntensity::Stable
        } else if magnitude < 15.0 {
            ProgressionIntensity::Moderate
        } else {
            ProgressionIntensity::Active
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progression {
    pub planet: Planet,
    pub natal_position: f64,
    pub progressed_position: f64,
    /// Progressed minus natal, in (-180, 180]
    pub movement_degrees: f64,
    pub natal_sign: Sign,
    pub progressed_sign: Sign,
    pub sign_changed: bool,
    pub intensity: ProgressionIntensity,
    pub interpretation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionResult {
    pub birth_moment: DateTime<Utc>,
    pub target_date: NaiveDate,
    pub progression_date: DateTime<Utc>,
    pub years_lived: f64,
    pub progressions: Vec<Progression>,
    pub active_count: usize,
    pub interpretation: String,
}

/// Overall reading from the number of active progressions.
pub fn overall_interpretation(active_count: usize) -> &'static str {
    match active_count {
        0 => "A period of stability: the inner landscape stays familiar",
        1 | 2 => "A period of moderate change: some areas of life are evolving",
        _ => "A period of active change: several areas of life are transforming at once",
    }
}

/// Compare natal and progressed longitudes for the personal bodies.
pub fn progress_planets(natal: &PositionSet, progressed: &PositionSet) -> Vec<Progression> {
    Planet::PERSONAL
        .into_iter()
        .filter_map(|planet| {
            let natal_pos = natal.get(planet)?;
            let progressed_pos = progressed.get(planet)?;
            let movement = signed_separation(natal_pos.longitude, progressed_pos.longitude);
            let intensity = ProgressionIntensity::classify(movement);
            Some(Progression {
                planet,
                natal_position: natal_pos.longitude,
                progressed_position: progressed_pos.longitude,
                movement_degrees: movement,
                natal_sign: natal_pos.sign,
                progressed_sign: progressed_pos.sign,
                sign_changed: natal_pos.sign != progressed_pos.sign,
                intensity,
                interpretation: progression_text(planet, intensity).to_string(),
            })
        })
        .collect()
}

pub struct ProgressionCalculator<'a, E: EphemerisService + ?Sized> {
    ephemeris: &'a E,
    settings: &'a EngineSettings,
}

impl<'a, E: EphemerisService + ?Sized> ProgressionCalculator<'a, E> {
    pub fn new(ephemeris: &'a E, settings: &'a EngineSettings) -> Self {
        Self { ephemeris, settings }
    }

    /// `target_date` defaults to today (UTC).
    pub fn calculate_progressions(
        &self,
        birth: &BirthData,
        target_date: Option<NaiveDate>,
    ) -> Result<ProgressionResult, CalculationError> {
        let target = target_date.unwrap_or_else(|| Utc::now().date_naive());
        self.calculate(birth, target).map_err(|e| {
            warn!("Progression calculation failed: {}", e);
            CalculationError::new(CalculationKind::Progressions, &e)
        })
    }

    fn calculate(
        &self,
        birth: &BirthData,
        target: NaiveDate,
    ) -> Result<ProgressionResult, EngineError> {
        let resolved = birth.resolve(self.settings)?;

        let days_lived = (target - birth.date).num_days();
        let years_lived = days_lived as f64 / DAYS_PER_YEAR;
        // The birth date, not the target, is advanced by one day per year lived
        let progressed_date = birth
            .date
            .checked_add_signed(Duration::days(years_lived.floor() as i64))
            .ok_or_else(|| {
                InputError::DateOverflow(format!("{} + {:.2} days", birth.date, years_lived))
            })?;
        let progression_moment = resolved.at_local_date(progressed_date)?;

        let natal = self
            .ephemeris
            .positions(resolved.moment, &resolved.location)?
            .ensure_complete()?;
        let progressed = self
            .ephemeris
            .positions(progression_moment, &resolved.location)?
            .ensure_complete()?;

        let progressions = progress_planets(&natal, &progressed);
        let active_count = progressions
            .iter()
            .filter(|p| p.intensity == ProgressionIntensity::Active)
            .count();
        debug!(
            "Progressions to {}: {:.2} years lived, progressed moment {}, {} active",
            target, years_lived, progression_moment, active_count
        );

        Ok(ProgressionResult {
            birth_moment: resolved.moment,
            target_date: target,
            progression_date: progression_moment,
            years_lived,
            progressions,
            active_count,
            interpretation: overall_interpretation(active_count).to_string(),
        })
    }
}
