//! Interpretation lookup: short descriptions and advice for transits,
//! progressions and return charts.

pub mod tables;

pub use tables::{
    ascendant_tone, aspect_nature, house_theme, moon_sign_theme, planet_influence,
    progression_text, GENERIC_ADVICE,
};

use serde::{Deserialize, Serialize};

use crate::aspects::AspectKind;
use crate::ephemeris::Planet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectInterpretation {
    pub summary: String,
    pub influence: String,
    pub nature: String,
    pub advice: String,
}

/// Look up the interpretation of a transiting body forming `aspect`.
/// Pairs without dedicated advice get [`GENERIC_ADVICE`].
pub fn interpret(transit_planet: Planet, aspect: AspectKind) -> AspectInterpretation {
    let influence = planet_influence(transit_planet);
    let nature = aspect_nature(aspect);
    let advice = tables::specific_advice(transit_planet, aspect).unwrap_or(GENERIC_ADVICE);

    AspectInterpretation {
        summary: format!("{} {}: {} in {}", transit_planet, aspect, nature, influence),
        influence: influence.to_string(),
        nature: nature.to_string(),
        advice: advice.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpret_known_pair() {
        let interp = interpret(Planet::Jupiter, AspectKind::Conjunction);
        assert_eq!(interp.influence, planet_influence(Planet::Jupiter));
        assert_eq!(interp.nature, "intense, concentrated energy");
        assert_ne!(interp.advice, GENERIC_ADVICE);
        assert!(interp.summary.starts_with("Jupiter conjunction"));
    }

    #[test]
    fn test_interpret_falls_back_to_generic_advice() {
        let interp = interpret(Planet::Neptune, AspectKind::Sextile);
        assert_eq!(interp.advice, GENERIC_ADVICE);
        assert_eq!(interp.nature, "harmonious opportunity");
    }
}
