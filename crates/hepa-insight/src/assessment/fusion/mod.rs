mod policy;

pub use policy::{lab_confidence_proxy, FusionStatus, FusionWeights, MlRiskBand};

use serde::Serialize;
use tracing::info;

use super::catalog::ConditionCatalog;
use super::domain::ConditionKey;
use super::prediction::MlVerdict;
use super::scoring::PatternVerdict;

const LOW_CONFIDENCE_NOTE: &str = "The model is not very confident in this prediction. Please treat this only as a supportive tool and consult a qualified doctor for confirmation.";
const DISEASE_NOTE: &str = "This tool does not replace a medical diagnosis. Please discuss these findings with a healthcare professional.";
const NO_DISEASE_NOTE: &str = "Even when the model suggests no disease, any symptoms or concerns should be discussed with a doctor.";

/// Reconciles the model verdict with the lab pattern into a single narrative.
#[derive(Debug, Clone, Copy, Default)]
pub struct FusionEngine;

impl FusionEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn fuse(&self, ml: MlVerdict, pattern: &PatternVerdict) -> FusionVerdict {
        let confidence = ml.confidence_percent();
        let ml_risk = MlRiskBand::from_confidence(confidence);

        let verdict = match (ml.has_disease(), pattern.is_normal()) {
            (false, true) => FusionVerdict {
                status: FusionStatus::ConsistentlyLowRisk,
                narrative: "ML model does not detect liver disease, and your lab pattern is close to normal ranges.".to_string(),
                show_condition: false,
                fused_score: None,
                weights: None,
                ml_risk,
                clinician_note: NO_DISEASE_NOTE,
            },
            (false, false) => FusionVerdict {
                status: FusionStatus::MixedNeedsEvaluation,
                narrative: "ML model does not detect liver disease, but the lab pattern shows some deviations that may require clinical correlation.".to_string(),
                show_condition: false,
                fused_score: None,
                weights: None,
                ml_risk,
                clinician_note: NO_DISEASE_NOTE,
            },
            (true, true) => FusionVerdict {
                status: FusionStatus::MixedSubclinical,
                narrative: "Liver disease is detected by the ML model, but the lab values sit close to normal ranges. This may reflect an early or subclinical presentation; clinical correlation is advised.".to_string(),
                show_condition: false,
                fused_score: None,
                weights: None,
                ml_risk,
                clinician_note: disease_note(confidence),
            },
            (true, false) => Self::fuse_disease_pattern(ml, pattern, ml_risk),
        };

        info!(
            status = verdict.status.label(),
            show_condition = verdict.show_condition,
            fused_score = verdict.fused_score,
            "fused model verdict with lab pattern"
        );

        verdict
    }

    fn fuse_disease_pattern(
        ml: MlVerdict,
        pattern: &PatternVerdict,
        ml_risk: MlRiskBand,
    ) -> FusionVerdict {
        let confidence = ml.confidence_percent();
        let weights = FusionWeights::for_confidence(confidence);
        let fused = weights.blend(confidence, lab_confidence_proxy(pattern.tier));
        let status = FusionStatus::from_fused_score(fused);
        let show_condition = status.discloses_condition();

        let narrative = if show_condition {
            let profile = ConditionCatalog::lookup(pattern.winner);
            format!(
                "Liver disease is detected by the ML model, and the lab pattern most closely resembles {}. {}",
                profile.display_name, profile.rationale
            )
        } else {
            "Liver disease is detected by the ML model, but the combined evidence is inconclusive. Please correlate clinically before drawing conclusions.".to_string()
        };

        FusionVerdict {
            status,
            narrative,
            show_condition,
            fused_score: Some(fused),
            weights: Some(weights),
            ml_risk,
            clinician_note: disease_note(confidence),
        }
    }
}

fn disease_note(confidence_percent: f64) -> &'static str {
    if confidence_percent < 50.0 {
        LOW_CONFIDENCE_NOTE
    } else {
        DISEASE_NOTE
    }
}

/// Output of the fusion step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FusionVerdict {
    pub status: FusionStatus,
    pub narrative: String,
    pub show_condition: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fused_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weights: Option<FusionWeights>,
    pub ml_risk: MlRiskBand,
    pub clinician_note: &'static str,
}

impl FusionVerdict {
    pub fn status_label(&self) -> &'static str {
        self.status.label()
    }

    /// The condition that may be named to the reader, if any.
    pub fn disclosed_condition(&self, pattern: &PatternVerdict) -> Option<ConditionKey> {
        self.show_condition.then_some(pattern.winner)
    }
}
