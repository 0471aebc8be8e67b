use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::catalog::{ConditionCatalog, ConditionProfile};
use super::domain::LabSubmission;
use super::prediction::{MlVerdict, PredictionModel, PredictionResponse};
use super::service::{AssessmentService, AssessmentServiceError};

/// Lab values paired with a verdict the caller already obtained from the risk model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateRequest {
    pub observation: LabSubmission,
    pub prediction: PredictionResponse,
}

/// Router builder exposing the assessment endpoints.
pub fn assessment_router<P>(service: Arc<AssessmentService<P>>) -> Router
where
    P: PredictionModel + 'static,
{
    Router::new()
        .route("/api/v1/assessments", post(assess_handler::<P>))
        .route("/api/v1/assessments/evaluate", post(evaluate_handler::<P>))
        .route("/api/v1/conditions", get(conditions_handler))
        .with_state(service)
}

pub(crate) async fn assess_handler<P>(
    State(service): State<Arc<AssessmentService<P>>>,
    Json(submission): Json<LabSubmission>,
) -> Response
where
    P: PredictionModel + 'static,
{
    match service.assess(&submission).await {
        Ok(assessment) => (StatusCode::OK, Json(assessment.view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn evaluate_handler<P>(
    State(service): State<Arc<AssessmentService<P>>>,
    Json(request): Json<EvaluateRequest>,
) -> Response
where
    P: PredictionModel + 'static,
{
    let ml = match MlVerdict::from_response(&request.prediction) {
        Ok(ml) => ml,
        Err(err) => {
            let payload = json!({ "error": err.to_string() });
            return (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response();
        }
    };

    match service.evaluate(&request.observation, ml) {
        Ok(assessment) => (StatusCode::OK, Json(assessment.view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn conditions_handler() -> Json<Vec<&'static ConditionProfile>> {
    Json(ConditionCatalog::entries().collect())
}

fn error_response(err: AssessmentServiceError) -> Response {
    let status = match &err {
        AssessmentServiceError::Intake(_) => StatusCode::UNPROCESSABLE_ENTITY,
        AssessmentServiceError::Prediction(_) => StatusCode::BAD_GATEWAY,
    };
    let payload = json!({ "error": err.to_string() });
    (status, Json(payload)).into_response()
}
