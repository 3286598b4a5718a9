//! Transit, progression and return calculations over a natal chart.
//!
//! Positions come from an [`EphemerisService`]; everything here is a pure
//! transformation of longitudes into ranked, interpreted aspects and
//! return charts.

pub mod aspects;
pub mod birth;
pub mod calculators;
pub mod engine;
pub mod ephemeris;
pub mod error;
pub mod interpretation;
pub mod settings;

pub use aspects::{AspectKind, TimingPhase, TransitAspect};
pub use birth::BirthData;
pub use calculators::{
    Progression, ProgressionResult, ReturnKind, ReturnResult, TransitResult, TransitSummary,
};
pub use engine::TransitEngine;
pub use ephemeris::{
    EphemerisError, EphemerisService, GeoLocation, HouseSet, Planet, PlanetPosition, PositionSet,
    Sign, SwissEphemerisAdapter,
};
pub use error::{CalculationError, CalculationOutcome, EngineError, InputError};
pub use settings::{EngineSettings, ReturnSearch};
