use serde::{Deserialize, Serialize};

use super::super::scoring::ConfidenceTier;

const HIGH_RISK_THRESHOLD: f64 = 90.0;
const PROBABLE_RISK_THRESHOLD: f64 = 70.0;

/// Final status shown to the reader. Serialized as its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FusionStatus {
    #[serde(rename = "Consistently low risk")]
    ConsistentlyLowRisk,
    #[serde(rename = "Mixed pattern — needs clinical evaluation")]
    MixedNeedsEvaluation,
    #[serde(rename = "Mixed pattern — possible early/subclinical presentation")]
    MixedSubclinical,
    #[serde(rename = "High risk — aligned")]
    HighRiskAligned,
    #[serde(rename = "Probable risk — suggestive")]
    ProbableRisk,
    #[serde(rename = "Borderline — inconclusive")]
    Borderline,
}

impl FusionStatus {
    pub fn label(self) -> &'static str {
        match self {
            FusionStatus::ConsistentlyLowRisk => "Consistently low risk",
            FusionStatus::MixedNeedsEvaluation => "Mixed pattern — needs clinical evaluation",
            FusionStatus::MixedSubclinical => {
                "Mixed pattern — possible early/subclinical presentation"
            }
            FusionStatus::HighRiskAligned => "High risk — aligned",
            FusionStatus::ProbableRisk => "Probable risk — suggestive",
            FusionStatus::Borderline => "Borderline — inconclusive",
        }
    }

    /// Classify a fused score when both sources point at disease. Both cut-points are inclusive.
    pub fn from_fused_score(fused: f64) -> Self {
        if fused >= HIGH_RISK_THRESHOLD {
            FusionStatus::HighRiskAligned
        } else if fused >= PROBABLE_RISK_THRESHOLD {
            FusionStatus::ProbableRisk
        } else {
            FusionStatus::Borderline
        }
    }

    pub fn discloses_condition(self) -> bool {
        matches!(
            self,
            FusionStatus::HighRiskAligned | FusionStatus::ProbableRisk
        )
    }
}

/// Numeric stand-in for the pattern tier when blending with the model confidence.
pub fn lab_confidence_proxy(tier: ConfidenceTier) -> u8 {
    match tier {
        ConfidenceTier::High => 80,
        ConfidenceTier::Moderate => 60,
        ConfidenceTier::Low => 40,
    }
}

/// Integer-percent weights for the model and lab components; they always sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FusionWeights {
    pub ml_percent: u8,
    pub lab_percent: u8,
}

impl FusionWeights {
    pub fn for_confidence(confidence_percent: f64) -> Self {
        if confidence_percent >= 50.0 {
            Self {
                ml_percent: 60,
                lab_percent: 40,
            }
        } else if confidence_percent <= 40.0 {
            Self {
                ml_percent: 30,
                lab_percent: 70,
            }
        } else {
            Self {
                ml_percent: 50,
                lab_percent: 50,
            }
        }
    }

    pub fn blend(self, confidence_percent: f64, lab_proxy: u8) -> f64 {
        (confidence_percent * f64::from(self.ml_percent)
            + f64::from(lab_proxy) * f64::from(self.lab_percent))
            / 100.0
    }
}

/// Risk band derived from the model confidence alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MlRiskBand {
    #[serde(rename = "Very High Risk")]
    VeryHigh,
    #[serde(rename = "High Risk")]
    High,
    #[serde(rename = "Moderate Risk")]
    Moderate,
    #[serde(rename = "Low Confidence")]
    LowConfidence,
}

impl MlRiskBand {
    pub fn from_confidence(confidence_percent: f64) -> Self {
        if confidence_percent >= 85.0 {
            MlRiskBand::VeryHigh
        } else if confidence_percent >= 70.0 {
            MlRiskBand::High
        } else if confidence_percent >= 50.0 {
            MlRiskBand::Moderate
        } else {
            MlRiskBand::LowConfidence
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MlRiskBand::VeryHigh => "Very High Risk",
            MlRiskBand::High => "High Risk",
            MlRiskBand::Moderate => "Moderate Risk",
            MlRiskBand::LowConfidence => "Low Confidence",
        }
    }
}
