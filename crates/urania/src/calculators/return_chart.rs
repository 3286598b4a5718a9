use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ephemeris::{EphemerisService, GeoLocation, HouseSet, Planet, PositionSet, Sign};
use crate::error::EngineError;
use crate::settings::ReturnSearch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnKind {
    Solar,
    Lunar,
}

impl ReturnKind {
    pub fn body(self) -> Planet {
        match self {
            ReturnKind::Solar => Planet::Sun,
            ReturnKind::Lunar => Planet::Moon,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnInterpretation {
    /// House of the returning body in the return chart
    pub house: Option<u8>,
    /// Sign of the returning body in the return chart
    pub sign: Sign,
    pub ascendant_sign: Sign,
    /// Main theme of the period
    pub focus: String,
    /// How the period presents itself (from the Ascendant)
    pub tone: String,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnResult {
    pub kind: ReturnKind,
    pub return_date: DateTime<Utc>,
    pub location: GeoLocation,
    pub natal_longitude: f64,
    /// Distance of the returning body from its natal longitude at `return_date`
    pub residual: f64,
    pub search: ReturnSearch,
    pub positions: PositionSet,
    pub houses: HouseSet,
    pub interpretation: ReturnInterpretation,
}

/// Positions and houses at the resolved return instant.
pub(crate) fn cast_chart<E: EphemerisService + ?Sized>(
    ephemeris: &E,
    at: DateTime<Utc>,
    location: &GeoLocation,
) -> Result<(PositionSet, HouseSet), EngineError> {
    let positions = ephemeris.positions(at, location)?.ensure_complete()?;
    let houses = ephemeris.houses(at, location)?;
    Ok((positions, houses))
}
