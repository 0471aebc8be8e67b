use serde::{Deserialize, Serialize};

const HIGH_CUT_POINT: u32 = 8;
const MODERATE_CUT_POINT: u32 = 4;

/// Qualitative strength of the winning pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConfidenceTier {
    Low,
    Moderate,
    High,
}

impl ConfidenceTier {
    pub fn from_score(score: u32) -> Self {
        if score >= HIGH_CUT_POINT {
            ConfidenceTier::High
        } else if score >= MODERATE_CUT_POINT {
            ConfidenceTier::Moderate
        } else {
            ConfidenceTier::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ConfidenceTier::Low => "Low",
            ConfidenceTier::Moderate => "Moderate",
            ConfidenceTier::High => "High",
        }
    }
}
