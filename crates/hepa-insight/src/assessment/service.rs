use std::sync::Arc;

use tracing::warn;

use super::domain::LabSubmission;
use super::engine::{Assessment, AssessmentEngine};
use super::intake::IntakeViolation;
use super::prediction::{MlVerdict, PredictionError, PredictionModel};

/// Service composing intake, the external risk model and the assessment engine.
pub struct AssessmentService<P> {
    engine: Arc<AssessmentEngine>,
    predictor: Arc<P>,
}

impl<P> AssessmentService<P>
where
    P: PredictionModel + 'static,
{
    pub fn new(predictor: Arc<P>, engine: AssessmentEngine) -> Self {
        Self {
            engine: Arc::new(engine),
            predictor,
        }
    }

    pub fn engine(&self) -> &AssessmentEngine {
        &self.engine
    }

    /// Validate a submission, ask the risk model for its verdict and evaluate both.
    pub async fn assess(
        &self,
        submission: &LabSubmission,
    ) -> Result<Assessment, AssessmentServiceError> {
        let observation = self
            .engine
            .guard()
            .observation_from_submission(submission)
            .inspect_err(|violation| warn!(%violation, "lab submission rejected"))?;

        let ml = self
            .predictor
            .predict(&observation)
            .await
            .inspect_err(|err| warn!(error = %err, "risk model unavailable"))?;

        Ok(self.engine.evaluate(&observation, ml))
    }

    /// Evaluate a submission against a verdict obtained elsewhere.
    pub fn evaluate(
        &self,
        submission: &LabSubmission,
        ml: MlVerdict,
    ) -> Result<Assessment, AssessmentServiceError> {
        let assessment = self
            .engine
            .evaluate_submission(submission, ml)
            .inspect_err(|violation| warn!(%violation, "lab submission rejected"))?;
        Ok(assessment)
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeViolation),
    #[error(transparent)]
    Prediction(#[from] PredictionError),
}
