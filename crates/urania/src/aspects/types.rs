use serde::{Deserialize, Serialize};
use std::fmt;

use super::timing::TimingPhase;
use crate::ephemeris::Planet;
use crate::interpretation::AspectInterpretation;

/// The five recognized aspects, in ascending angle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectKind {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
}

/// Static catalog entry for one aspect
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectDefinition {
    pub kind: AspectKind,
    pub angle: f64,
    /// Transit orb; tighter than natal-chart orbs
    pub orb: f64,
    pub weight: f64,
}

/// Checked in this order; the first satisfied definition wins.
pub const ASPECT_DEFINITIONS: [AspectDefinition; 5] = [
    AspectDefinition {
        kind: AspectKind::Conjunction,
        angle: 0.0,
        orb: 3.0,
        weight: 10.0,
    },
    AspectDefinition {
        kind: AspectKind::Sextile,
        angle: 60.0,
        orb: 2.0,
        weight: 4.0,
    },
    AspectDefinition {
        kind: AspectKind::Square,
        angle: 90.0,
        orb: 3.0,
        weight: 8.0,
    },
    AspectDefinition {
        kind: AspectKind::Trine,
        angle: 120.0,
        orb: 3.0,
        weight: 6.0,
    },
    AspectDefinition {
        kind: AspectKind::Opposition,
        angle: 180.0,
        orb: 3.0,
        weight: 9.0,
    },
];

/// Broad quality of an aspect, used by the transit summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectQuality {
    Harmonious,
    Challenging,
    Neutral,
}

impl AspectKind {
    pub const ALL: [AspectKind; 5] = [
        AspectKind::Conjunction,
        AspectKind::Sextile,
        AspectKind::Square,
        AspectKind::Trine,
        AspectKind::Opposition,
    ];

    pub fn definition(self) -> &'static AspectDefinition {
        &ASPECT_DEFINITIONS[self as usize]
    }

    pub fn angle(self) -> f64 {
        self.definition().angle
    }

    pub fn orb(self) -> f64 {
        self.definition().orb
    }

    pub fn weight(self) -> f64 {
        self.definition().weight
    }

    pub fn quality(self) -> AspectQuality {
        match self {
            AspectKind::Trine | AspectKind::Sextile => AspectQuality::Harmonious,
            AspectKind::Square | AspectKind::Opposition => AspectQuality::Challenging,
            AspectKind::Conjunction => AspectQuality::Neutral,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AspectKind::Conjunction => "conjunction",
            AspectKind::Sextile => "sextile",
            AspectKind::Square => "square",
            AspectKind::Trine => "trine",
            AspectKind::Opposition => "opposition",
        }
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unscored match between a transiting and a natal body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectMatch {
    pub transit_planet: Planet,
    pub natal_planet: Planet,
    pub aspect: AspectKind,
    /// Circular separation between the two longitudes, [0, 180]
    pub exact_angle: f64,
    /// Deviation from the aspect angle
    pub orb: f64,
    /// Whether the separation is closing on the aspect angle
    pub is_applying: bool,
    /// Whether the transiting body is retrograde
    pub is_retrograde: bool,
}

/// A scored, classified and interpreted transit aspect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitAspect {
    pub transit_planet: Planet,
    pub natal_planet: Planet,
    pub aspect_name: AspectKind,
    pub aspect_angle: f64,
    pub exact_angle: f64,
    pub orb: f64,
    pub strength: f64,
    pub timing_phase: TimingPhase,
    pub timing_description: String,
    pub is_applying: bool,
    pub is_retrograde: bool,
    pub interpretation: AspectInterpretation,
}

impl TransitAspect {
    /// "Jupiter conjunction Sun"
    pub fn label(&self) -> String {
        format!("{} {} {}", self.transit_planet, self.aspect_name, self.natal_planet)
    }
}
