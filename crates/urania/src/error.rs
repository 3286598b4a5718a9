use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ephemeris::{EphemerisError, Planet};

/// Malformed caller input that arithmetic rejects.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Invalid time '{0}', expected HH:MM or HH:MM:SS")]
    InvalidTime(String),
    #[error("Invalid UTC offset of {0} minutes")]
    InvalidUtcOffset(i32),
    #[error("Local time {0} does not exist at the given offset")]
    InvalidLocalTime(String),
    #[error("Year {0} is out of the supported range")]
    InvalidYear(i32),
    #[error("Date arithmetic overflowed: {0}")]
    DateOverflow(String),
}

/// Internal failure of a calculation, before conversion at the public boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("{planet} return not found within {window_days} days of {from}")]
    ReturnNotFound {
        planet: Planet,
        from: String,
        window_days: f64,
    },
}

/// Which public calculation failed; selects the user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalculationKind {
    Transits,
    Progressions,
    SolarReturn,
    LunarReturn,
    MoonPhase,
}

impl CalculationKind {
    pub fn failure_message(self) -> &'static str {
        match self {
            CalculationKind::Transits => "Failed to calculate transits",
            CalculationKind::Progressions => "Failed to calculate progressions",
            CalculationKind::SolarReturn => "Failed to calculate the solar return",
            CalculationKind::LunarReturn => "Failed to calculate the lunar return",
            CalculationKind::MoonPhase => "Failed to calculate the moon phase",
        }
    }
}

/// Typed error record returned by every public calculation:
/// a user-facing message plus the raw cause.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[error("{error}: {details}")]
pub struct CalculationError {
    pub error: String,
    pub details: String,
}

impl CalculationError {
    pub fn new(kind: CalculationKind, cause: &EngineError) -> Self {
        Self {
            error: kind.failure_message().to_string(),
            details: cause.to_string(),
        }
    }
}

/// Either a populated result or an error record, serialized as a plain map.
/// Callers branch on the presence of the `error` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CalculationOutcome<T> {
    Failure(CalculationError),
    Success(T),
}

impl<T> From<Result<T, CalculationError>> for CalculationOutcome<T> {
    fn from(result: Result<T, CalculationError>) -> Self {
        match result {
            Ok(value) => CalculationOutcome::Success(value),
            Err(err) => CalculationOutcome::Failure(err),
        }
    }
}

impl<T> CalculationOutcome<T> {
    pub fn is_error(&self) -> bool {
        matches!(self, CalculationOutcome::Failure(_))
    }

    pub fn into_result(self) -> Result<T, CalculationError> {
        match self {
            CalculationOutcome::Success(value) => Ok(value),
            CalculationOutcome::Failure(err) => Err(err),
        }
    }
}
