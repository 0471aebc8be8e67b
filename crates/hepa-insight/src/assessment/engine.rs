use serde::Serialize;

use super::catalog::{ConditionCatalog, ConditionProfile};
use super::domain::{LabObservation, LabSubmission};
use super::fusion::{FusionEngine, FusionVerdict};
use super::intake::{IntakeGuard, IntakeViolation};
use super::prediction::{MlVerdict, DISEASE_DETECTED, NO_DISEASE};
use super::scoring::{PatternScorer, PatternVerdict};

/// Stateless core: `(LabObservation, MlVerdict) -> Assessment`. Holds no per-request data, so a
/// single engine can serve concurrent evaluations.
#[derive(Debug, Clone, Default)]
pub struct AssessmentEngine {
    guard: IntakeGuard,
    scorer: PatternScorer,
    fusion: FusionEngine,
}

impl AssessmentEngine {
    pub fn new(scorer: PatternScorer) -> Self {
        Self {
            guard: IntakeGuard::new(),
            scorer,
            fusion: FusionEngine::new(),
        }
    }

    pub fn canonical() -> Self {
        Self::new(PatternScorer::canonical())
    }

    pub fn guard(&self) -> &IntakeGuard {
        &self.guard
    }

    pub fn scorer(&self) -> &PatternScorer {
        &self.scorer
    }

    pub fn evaluate(&self, observation: &LabObservation, ml: MlVerdict) -> Assessment {
        let pattern = self.scorer.score(observation);
        let fusion = self.fusion.fuse(ml, &pattern);
        let condition = ConditionCatalog::lookup(pattern.winner);

        Assessment {
            ml,
            pattern,
            condition,
            fusion,
        }
    }

    /// Validate raw input and evaluate it against a verdict the caller already holds.
    pub fn evaluate_submission(
        &self,
        submission: &LabSubmission,
        ml: MlVerdict,
    ) -> Result<Assessment, IntakeViolation> {
        let observation = self.guard.observation_from_submission(submission)?;
        Ok(self.evaluate(&observation, ml))
    }
}

/// Everything produced for one evaluation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub ml: MlVerdict,
    pub pattern: PatternVerdict,
    pub condition: &'static ConditionProfile,
    pub fusion: FusionVerdict,
}

impl Assessment {
    /// Reader-facing projection that withholds the condition unless fusion allows it.
    pub fn view(&self) -> AssessmentView {
        let disclosed = self.fusion.show_condition;

        AssessmentView {
            status: self.fusion.status_label(),
            narrative: self.fusion.narrative.clone(),
            show_condition: disclosed,
            clinician_note: self.fusion.clinician_note,
            ml_result: if self.ml.has_disease() {
                DISEASE_DETECTED
            } else {
                NO_DISEASE
            },
            ml_confidence: self.ml.confidence_percent(),
            ml_risk: self.fusion.ml_risk.label(),
            fused_score: self.fusion.fused_score,
            lab_confidence: self.pattern.tier.label(),
            scores: self
                .pattern
                .scores
                .iter()
                .map(|(key, score)| ScoreEntry {
                    condition: key.as_str(),
                    score,
                })
                .collect(),
            condition: disclosed.then_some(self.condition),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreEntry {
    pub condition: &'static str,
    pub score: u32,
}

/// Sanitized representation returned to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentView {
    pub status: &'static str,
    pub narrative: String,
    pub show_condition: bool,
    pub clinician_note: &'static str,
    pub ml_result: &'static str,
    pub ml_confidence: f64,
    pub ml_risk: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fused_score: Option<f64>,
    pub lab_confidence: &'static str,
    pub scores: Vec<ScoreEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<&'static ConditionProfile>,
}
