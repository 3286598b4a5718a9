pub mod calculator;
pub mod ranking;
pub mod timing;
pub mod types;

pub use calculator::{circular_separation, find_aspect, signed_separation, AspectMatcher};
pub use ranking::{rank, strength, SIGNIFICANT_LIMIT};
pub use timing::TimingPhase;
pub use types::{
    AspectDefinition, AspectKind, AspectMatch, AspectQuality, TransitAspect, ASPECT_DEFINITIONS,
};
