//! Current transits: natal chart against the sky at a given moment.

use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::aspects::{
    rank, strength, AspectMatch, AspectMatcher, AspectQuality, TimingPhase, TransitAspect,
};
use crate::birth::BirthData;
use crate::ephemeris::{EphemerisService, PositionSet};
use crate::error::{CalculationError, CalculationKind, EngineError};
use crate::interpretation::interpret;
use crate::settings::EngineSettings;

/// Overall character of the transit period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodTone {
    Calm,
    Harmonious,
    Challenging,
    Mixed,
}

impl PeriodTone {
    pub fn message(self) -> &'static str {
        match self {
            PeriodTone::Calm => "A calm, stable period with no significant transits",
            PeriodTone::Harmonious => "A harmonious period: favorable influences prevail",
            PeriodTone::Challenging => "A challenging period: tense influences call for patience",
            PeriodTone::Mixed => "A mixed period: supportive and testing influences alternate",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitSummary {
    pub total_aspects: usize,
    pub significant_count: usize,
    pub harmonious: usize,
    pub challenging: usize,
    pub neutral: usize,
    /// Label of the most significant aspect, e.g. "Jupiter conjunction Sun"
    pub strongest: Option<String>,
    pub tone: PeriodTone,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitResult {
    pub birth_moment: DateTime<Utc>,
    pub transit_moment: DateTime<Utc>,
    pub natal_positions: PositionSet,
    pub transit_positions: PositionSet,
    pub all_aspects: Vec<TransitAspect>,
    /// At most ten, by strength desc then orb asc
    pub significant_aspects: Vec<TransitAspect>,
    pub summary: TransitSummary,
}

/// Score, classify and interpret one raw match.
pub fn build_transit_aspect(m: &AspectMatch) -> TransitAspect {
    let timing = TimingPhase::classify(m.orb);
    TransitAspect {
        transit_planet: m.transit_planet,
        natal_planet: m.natal_planet,
        aspect_name: m.aspect,
        aspect_angle: m.aspect.angle(),
        exact_angle: m.exact_angle,
        orb: m.orb,
        strength: strength(m),
        timing_phase: timing,
        timing_description: timing.description().to_string(),
        is_applying: m.is_applying,
        is_retrograde: m.is_retrograde,
        interpretation: interpret(m.transit_planet, m.aspect),
    }
}

/// Aggregate the significant aspects into a period summary.
pub fn summarize(all: &[TransitAspect], significant: &[TransitAspect]) -> TransitSummary {
    let count = |quality: AspectQuality| {
        significant
            .iter()
            .filter(|a| a.aspect_name.quality() == quality)
            .count()
    };
    let harmonious = count(AspectQuality::Harmonious);
    let challenging = count(AspectQuality::Challenging);
    let neutral = count(AspectQuality::Neutral);

    let tone = if significant.is_empty() {
        PeriodTone::Calm
    } else if challenging > harmonious {
        PeriodTone::Challenging
    } else if harmonious > challenging {
        PeriodTone::Harmonious
    } else {
        PeriodTone::Mixed
    };

    TransitSummary {
        total_aspects: all.len(),
        significant_count: significant.len(),
        harmonious,
        challenging,
        neutral,
        strongest: significant.first().map(TransitAspect::label),
        tone,
        message: tone.message().to_string(),
    }
}

/// Compare a moving chart against a natal chart and rank the result.
pub fn compare_charts(
    natal: &PositionSet,
    moving: &PositionSet,
) -> (Vec<TransitAspect>, Vec<TransitAspect>) {
    let all: Vec<TransitAspect> = AspectMatcher::new()
        .match_positions(moving, natal)
        .iter()
        .map(build_transit_aspect)
        .collect();
    let significant = rank(&all);
    (all, significant)
}

pub struct TransitCalculator<'a, E: EphemerisService + ?Sized> {
    ephemeris: &'a E,
    settings: &'a EngineSettings,
}

impl<'a, E: EphemerisService + ?Sized> TransitCalculator<'a, E> {
    pub fn new(ephemeris: &'a E, settings: &'a EngineSettings) -> Self {
        Self { ephemeris, settings }
    }

    /// `current_date` defaults to now.
    pub fn calculate_current_transits(
        &self,
        birth: &BirthData,
        current_date: Option<DateTime<Utc>>,
    ) -> Result<TransitResult, CalculationError> {
        let current = current_date.unwrap_or_else(Utc::now);
        self.calculate(birth, current).map_err(|e| {
            warn!("Transit calculation failed: {}", e);
            CalculationError::new(CalculationKind::Transits, &e)
        })
    }

    fn calculate(
        &self,
        birth: &BirthData,
        current: DateTime<Utc>,
    ) -> Result<TransitResult, EngineError> {
        let resolved = birth.resolve(self.settings)?;
        let natal = self
            .ephemeris
            .positions(resolved.moment, &resolved.location)?
            .ensure_complete()?;
        let transit = self
            .ephemeris
            .positions(current, &resolved.location)?
            .ensure_complete()?;

        let (all_aspects, significant_aspects) = compare_charts(&natal, &transit);
        debug!(
            "Transits for {} at {}: {} aspects, {} significant",
            resolved.moment,
            current,
            all_aspects.len(),
            significant_aspects.len()
        );
        let summary = summarize(&all_aspects, &significant_aspects);

        Ok(TransitResult {
            birth_moment: resolved.moment,
            transit_moment: current,
            natal_positions: natal,
            transit_positions: transit,
            all_aspects,
            significant_aspects,
            summary,
        })
    }
}
