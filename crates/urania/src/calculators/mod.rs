pub mod lunar_return;
pub mod progression;
pub mod return_chart;
pub mod search;
pub mod solar_return;
pub mod transit;

pub use lunar_return::LunarReturnLocator;
pub use progression::{Progression, ProgressionCalculator, ProgressionIntensity, ProgressionResult};
pub use return_chart::{ReturnInterpretation, ReturnKind, ReturnResult};
pub use solar_return::SolarReturnLocator;
pub use transit::{PeriodTone, TransitCalculator, TransitResult, TransitSummary};
