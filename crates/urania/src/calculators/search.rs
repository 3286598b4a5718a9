//! Root-finding on a body's longitude: locate the instant a moving body
//! returns to a fixed ecliptic longitude.
//!
//! Works on the residual f(t) = normalize(lon(t) - target) in (-180, 180].
//! A coarse scan brackets a genuine zero crossing, bisection refines it.

use chrono::{DateTime, Duration, Utc};
use log::{debug, warn};

use crate::aspects::signed_separation;
use crate::ephemeris::{EphemerisService, GeoLocation, Planet};
use crate::error::{EngineError, InputError};

/// Bisection stops once the bracket is narrower than this (days)
const CONVERGENCE_DAYS: f64 = 1.0 / 1440.0;

const MAX_ITERATIONS: usize = 50;

/// Wider than chrono's whole calendar range
const MAX_OFFSET_DAYS: f64 = 2.0e8;

/// A resolved return instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReturnFix {
    pub moment: DateTime<Utc>,
    /// |lon(moment) - target| in degrees
    pub residual: f64,
}

/// `t + days`, failing instead of panicking at the edge of chrono's range.
pub fn add_days(t: DateTime<Utc>, days: f64) -> Result<DateTime<Utc>, InputError> {
    let overflow = || InputError::DateOverflow(format!("{} + {} days", t, days));
    if !days.is_finite() || days.abs() > MAX_OFFSET_DAYS {
        return Err(overflow());
    }
    let millis = (days * 86_400_000.0).round() as i64;
    t.checked_add_signed(Duration::milliseconds(millis))
        .ok_or_else(overflow)
}

fn days_between(a: DateTime<Utc>, b: DateTime<Utc>) -> f64 {
    (b - a).num_milliseconds() as f64 / 86_400_000.0
}

/// A sign change between two residual samples that is a real crossing and
/// not the +180/-180 wrap discontinuity.
fn is_genuine_crossing(f_a: f64, f_b: f64) -> bool {
    f_a * f_b < 0.0 && (f_a - f_b).abs() < 90.0
}

pub struct LongitudeSearch<'a, E: EphemerisService + ?Sized> {
    ephemeris: &'a E,
    planet: Planet,
    target: f64,
    location: GeoLocation,
}

impl<'a, E: EphemerisService + ?Sized> LongitudeSearch<'a, E> {
    pub fn new(ephemeris: &'a E, planet: Planet, target: f64, location: GeoLocation) -> Self {
        Self {
            ephemeris,
            planet,
            target,
            location,
        }
    }

    fn residual(&self, t: DateTime<Utc>) -> Result<f64, EngineError> {
        let lon = self.ephemeris.longitude(self.planet, t, &self.location)?;
        Ok(signed_separation(self.target, lon))
    }

    /// First return at or after `start`, scanning `step_days` at a time for
    /// at most `window_days`.
    pub fn next_after(
        &self,
        start: DateTime<Utc>,
        step_days: f64,
        window_days: f64,
    ) -> Result<ReturnFix, EngineError> {
        let mut t_prev = start;
        let mut f_prev = self.residual(start)?;
        if f_prev == 0.0 {
            return Ok(ReturnFix { moment: start, residual: 0.0 });
        }

        let steps = (window_days / step_days).ceil() as usize;
        for _ in 0..steps {
            let t_curr = add_days(t_prev, step_days)?;
            let f_curr = self.residual(t_curr)?;
            if f_curr == 0.0 {
                return Ok(ReturnFix { moment: t_curr, residual: 0.0 });
            }
            if is_genuine_crossing(f_prev, f_curr) {
                return self.bisect(t_prev, f_prev, t_curr);
            }
            t_prev = t_curr;
            f_prev = f_curr;
        }

        Err(EngineError::ReturnNotFound {
            planet: self.planet,
            from: start.to_rfc3339(),
            window_days,
        })
    }

    /// Return inside `center ± half_window_days`. Without a bracketed
    /// crossing, the sample with the smallest residual is used.
    pub fn within(
        &self,
        center: DateTime<Utc>,
        half_window_days: f64,
        step_days: f64,
    ) -> Result<ReturnFix, EngineError> {
        let start = add_days(center, -half_window_days)?;
        let steps = ((2.0 * half_window_days) / step_days).round() as usize;

        let mut samples = Vec::with_capacity(steps + 1);
        for i in 0..=steps {
            let t = add_days(start, i as f64 * step_days)?;
            samples.push((t, self.residual(t)?));
        }

        for pair in samples.windows(2) {
            let (t_a, f_a) = pair[0];
            let (t_b, f_b) = pair[1];
            if f_a == 0.0 {
                return Ok(ReturnFix { moment: t_a, residual: 0.0 });
            }
            if is_genuine_crossing(f_a, f_b) {
                return self.bisect(t_a, f_a, t_b);
            }
        }

        let (moment, f) = samples
            .iter()
            .copied()
            .min_by(|a, b| a.1.abs().total_cmp(&b.1.abs()))
            .ok_or(EngineError::ReturnNotFound {
                planet: self.planet,
                from: center.to_rfc3339(),
                window_days: 2.0 * half_window_days,
            })?;
        warn!(
            "{} return not bracketed around {}; using closest sample {} (residual {:.4} deg)",
            self.planet, center, moment, f.abs()
        );
        Ok(ReturnFix { moment, residual: f.abs() })
    }

    fn bisect(
        &self,
        mut t_a: DateTime<Utc>,
        mut f_a: f64,
        mut t_b: DateTime<Utc>,
    ) -> Result<ReturnFix, EngineError> {
        let mut last_f = f_a;
        for _ in 0..MAX_ITERATIONS {
            if days_between(t_a, t_b) < CONVERGENCE_DAYS {
                break;
            }
            let t_mid = add_days(t_a, days_between(t_a, t_b) / 2.0)?;
            let f_mid = self.residual(t_mid)?;
            last_f = f_mid;

            if f_a * f_mid <= 0.0 {
                t_b = t_mid;
            } else {
                t_a = t_mid;
                f_a = f_mid;
            }
        }

        let moment = add_days(t_a, days_between(t_a, t_b) / 2.0)?;
        debug!(
            "{} return converged at {} (last residual {:.6} deg)",
            self.planet, moment, last_f
        );
        Ok(ReturnFix {
            moment,
            residual: self.residual(moment)?.abs(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_wrap_is_not_a_crossing() {
        assert!(is_genuine_crossing(-0.4, 0.6));
        assert!(is_genuine_crossing(3.0, -3.5));
        assert!(!is_genuine_crossing(179.0, -175.0));
        assert!(!is_genuine_crossing(1.0, 2.0));
    }

    #[test]
    fn test_add_days_fractional() {
        let t = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(
            add_days(t, 1.5).unwrap(),
            Utc.with_ymd_and_hms(2000, 1, 2, 12, 0, 0).unwrap()
        );
        assert_eq!(
            add_days(t, -0.25).unwrap(),
            Utc.with_ymd_and_hms(1999, 12, 31, 18, 0, 0).unwrap()
        );
        assert!(matches!(add_days(t, 1e12), Err(InputError::DateOverflow(_))));
    }
}
