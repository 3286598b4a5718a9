//! Qualitative timing phase of a transit, from its residual orb.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Thresholds are fixed: < 0.5 exact, < 1.0 close, < 2.0 approaching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimingPhase {
    Exact,
    Close,
    Approaching,
    Weak,
}

impl TimingPhase {
    pub fn classify(orb: f64) -> TimingPhase {
        if orb < 0.5 {
            TimingPhase::Exact
        } else if orb < 1.0 {
            TimingPhase::Close
        } else if orb < 2.0 {
            TimingPhase::Approaching
        } else {
            TimingPhase::Weak
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimingPhase::Exact => "exact",
            TimingPhase::Close => "close",
            TimingPhase::Approaching => "approaching",
            TimingPhase::Weak => "weak",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            TimingPhase::Exact => "The influence is at its peak right now",
            TimingPhase::Close => "The influence is strongly felt in the coming days",
            TimingPhase::Approaching => "The influence is building and will grow stronger",
            TimingPhase::Weak => "The influence is in the background and subtle",
        }
    }
}

impl fmt::Display for TimingPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_thresholds() {
        assert_eq!(TimingPhase::classify(0.0), TimingPhase::Exact);
        assert_eq!(TimingPhase::classify(0.49), TimingPhase::Exact);
        assert_eq!(TimingPhase::classify(0.5), TimingPhase::Close);
        assert_eq!(TimingPhase::classify(0.99), TimingPhase::Close);
        assert_eq!(TimingPhase::classify(1.0), TimingPhase::Approaching);
        assert_eq!(TimingPhase::classify(1.99), TimingPhase::Approaching);
        assert_eq!(TimingPhase::classify(2.0), TimingPhase::Weak);
        assert_eq!(TimingPhase::classify(3.0), TimingPhase::Weak);
    }
}
