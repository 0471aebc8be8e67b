use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::assessment::domain::{Gender, LabObservation, LabPanel, LabSubmission};
use crate::assessment::engine::AssessmentEngine;
use crate::assessment::prediction::{MlVerdict, PredictionError, PredictionModel};
use crate::assessment::router::assessment_router;
use crate::assessment::scoring::PatternScorer;
use crate::assessment::service::AssessmentService;

/// Panel within every normal reference range.
pub(super) fn normal_panel() -> LabPanel {
    LabPanel {
        age: 30.0,
        gender: Gender::Male,
        total_bilirubin: 0.8,
        direct_bilirubin: 0.2,
        alkaline_phosphatase: 90.0,
        alt: 30.0,
        ast: 25.0,
        total_proteins: 7.0,
        albumin: 4.0,
        ag_ratio: 1.3,
    }
}

/// Obstructive picture scoring 12 for cholestasis.
pub(super) fn cholestasis_panel() -> LabPanel {
    LabPanel {
        age: 45.0,
        gender: Gender::Female,
        total_bilirubin: 8.0,
        direct_bilirubin: 4.0,
        alkaline_phosphatase: 450.0,
        alt: 110.0,
        ast: 120.0,
        total_proteins: 6.5,
        albumin: 3.0,
        ag_ratio: 0.9,
    }
}

/// Fatty-liver picture scoring 10 for NAFLD.
pub(super) fn nafld_panel() -> LabPanel {
    LabPanel {
        age: 42.0,
        gender: Gender::Male,
        total_bilirubin: 1.2,
        direct_bilirubin: 0.4,
        alkaline_phosphatase: 150.0,
        alt: 70.0,
        ast: 55.0,
        total_proteins: 7.2,
        albumin: 4.2,
        ag_ratio: 1.4,
    }
}

/// NAFLD leads with 6, a moderate tier.
pub(super) fn moderate_nafld_panel() -> LabPanel {
    LabPanel {
        age: 40.0,
        gender: Gender::Female,
        total_bilirubin: 1.0,
        direct_bilirubin: 0.3,
        alkaline_phosphatase: 180.0,
        alt: 35.0,
        ast: 45.0,
        total_proteins: 6.8,
        albumin: 3.0,
        ag_ratio: 1.0,
    }
}

/// Only the direct-bilirubin rule fires, leaving cholestasis on 3.
pub(super) fn low_tier_panel() -> LabPanel {
    LabPanel {
        age: 30.0,
        gender: Gender::Male,
        total_bilirubin: 25.0,
        direct_bilirubin: 2.0,
        alkaline_phosphatase: 1000.0,
        alt: 1500.0,
        ast: 1000.0,
        total_proteins: 7.0,
        albumin: 1.5,
        ag_ratio: 0.5,
    }
}

/// Cholestasis and cirrhosis both reach 13 under the reference table.
pub(super) fn cholestasis_cirrhosis_tie_panel() -> LabPanel {
    LabPanel {
        age: 60.0,
        gender: Gender::Male,
        total_bilirubin: 6.0,
        direct_bilirubin: 2.0,
        alkaline_phosphatase: 300.0,
        alt: 100.0,
        ast: 150.0,
        total_proteins: 5.5,
        albumin: 3.5,
        ag_ratio: 0.8,
    }
}

pub(super) fn observation(panel: LabPanel) -> LabObservation {
    LabObservation::new(panel).expect("fixture panel is valid")
}

pub(super) fn submission(panel: &LabPanel) -> LabSubmission {
    LabSubmission::from(panel)
}

pub(super) fn verdict(has_disease: bool, confidence: f64) -> MlVerdict {
    MlVerdict::new(has_disease, confidence).expect("confidence within range")
}

pub(super) fn scorer() -> PatternScorer {
    PatternScorer::canonical()
}

pub(super) fn engine() -> AssessmentEngine {
    AssessmentEngine::canonical()
}

/// Model stub returning a fixed verdict and counting calls.
#[derive(Default)]
pub(super) struct StaticModel {
    verdict: Option<MlVerdict>,
    calls: AtomicUsize,
}

impl StaticModel {
    pub(super) fn returning(verdict: MlVerdict) -> Self {
        Self {
            verdict: Some(verdict),
            calls: AtomicUsize::new(0),
        }
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PredictionModel for StaticModel {
    async fn predict(&self, _observation: &LabObservation) -> Result<MlVerdict, PredictionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.verdict
            .ok_or_else(|| PredictionError::Service("model not loaded".to_string()))
    }
}

pub(super) struct FailingModel;

impl PredictionModel for FailingModel {
    async fn predict(&self, _observation: &LabObservation) -> Result<MlVerdict, PredictionError> {
        Err(PredictionError::Status {
            status: 503,
            message: "Prediction failed".to_string(),
        })
    }
}

pub(super) fn service_with<P: PredictionModel + 'static>(model: Arc<P>) -> AssessmentService<P> {
    AssessmentService::new(model, engine())
}

pub(super) fn router_with<P: PredictionModel + 'static>(model: Arc<P>) -> axum::Router {
    assessment_router(Arc::new(service_with(model)))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
