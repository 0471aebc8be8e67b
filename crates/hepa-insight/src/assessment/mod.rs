//! Liver-panel assessment: intake validation, rule-based pattern scoring, and fusion of the
//! pattern with the external risk model's verdict.
//!
//! The scoring and fusion steps are pure and synchronous. Only [`AssessmentService::assess`]
//! reaches out to the risk model, through the [`PredictionModel`] seam.

pub mod batch;
pub mod catalog;
pub mod domain;
pub mod engine;
pub mod fusion;
pub mod intake;
pub mod prediction;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use batch::{BatchError, BatchEvaluator, BatchOutcome, BatchReport, BatchRowOutcome};
pub use catalog::{ConditionCatalog, ConditionProfile, ReferenceRanges};
pub use domain::{
    Biomarker, ConditionKey, ConditionScoreVector, FieldInput, Gender, LabField, LabObservation,
    LabPanel, LabSubmission,
};
pub use engine::{Assessment, AssessmentEngine, AssessmentView, ScoreEntry};
pub use fusion::{FusionEngine, FusionStatus, FusionVerdict, FusionWeights, MlRiskBand};
pub use intake::{IntakeGuard, IntakeViolation};
pub use prediction::{
    HttpPredictionClient, MlVerdict, PredictionError, PredictionModel, PredictionResponse,
};
pub use router::{assessment_router, EvaluateRequest};
pub use scoring::{
    ConfidenceTier, PatternScorer, PatternVerdict, Predicate, Rule, RuleMatch, RuleTable,
};
pub use service::{AssessmentService, AssessmentServiceError};
