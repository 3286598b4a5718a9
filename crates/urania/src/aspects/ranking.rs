//! Strength scoring and significance ranking of matched aspects.

use std::cmp::Ordering;

use crate::aspects::types::{AspectMatch, TransitAspect};

/// How many aspects are kept as significant
pub const SIGNIFICANT_LIMIT: usize = 10;

/// `(w_transit + w_natal) * w_aspect * accuracy / 10`, where accuracy falls
/// linearly from 1 at exact to 0 at the edge of the orb.
pub fn strength(m: &AspectMatch) -> f64 {
    let max_orb = m.aspect.orb();
    let accuracy = ((max_orb - m.orb) / max_orb).clamp(0.0, 1.0);
    (m.transit_planet.weight() + m.natal_planet.weight()) * m.aspect.weight() * accuracy / 10.0
}

/// Strength descending, then orb ascending, then body pair in canonical
/// order. Total over distinct pairs.
pub fn compare_significance(a: &TransitAspect, b: &TransitAspect) -> Ordering {
    b.strength
        .total_cmp(&a.strength)
        .then_with(|| a.orb.total_cmp(&b.orb))
        .then_with(|| a.transit_planet.cmp(&b.transit_planet))
        .then_with(|| a.natal_planet.cmp(&b.natal_planet))
}

/// Most significant aspects, at most [`SIGNIFICANT_LIMIT`].
pub fn rank(aspects: &[TransitAspect]) -> Vec<TransitAspect> {
    let mut ranked = aspects.to_vec();
    ranked.sort_by(compare_significance);
    ranked.truncate(SIGNIFICANT_LIMIT);
    ranked
}
