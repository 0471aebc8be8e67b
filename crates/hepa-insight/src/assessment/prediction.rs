use std::future::Future;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::LabObservation;
use crate::config::PredictionConfig;

pub const DISEASE_DETECTED: &str = "Liver Disease Detected";
pub const NO_DISEASE: &str = "No Liver Disease";

/// Binary verdict of the external risk model with its confidence in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MlVerdict {
    has_disease: bool,
    confidence_percent: f64,
}

impl MlVerdict {
    pub fn new(has_disease: bool, confidence_percent: f64) -> Result<Self, PredictionError> {
        if !confidence_percent.is_finite() || !(0.0..=100.0).contains(&confidence_percent) {
            return Err(PredictionError::Malformed(format!(
                "probability {confidence_percent} outside 0–100"
            )));
        }

        Ok(Self {
            has_disease,
            confidence_percent,
        })
    }

    /// Interpret the model's response payload. Only the two sentinel strings are accepted.
    pub fn from_response(response: &PredictionResponse) -> Result<Self, PredictionError> {
        if let Some(message) = &response.error {
            return Err(PredictionError::Service(message.clone()));
        }

        let has_disease = match response.result.as_deref().map(str::trim) {
            Some(DISEASE_DETECTED) => true,
            Some(NO_DISEASE) => false,
            Some(other) => {
                return Err(PredictionError::Malformed(format!(
                    "unrecognised result '{other}'"
                )))
            }
            None => return Err(PredictionError::Malformed("missing result".to_string())),
        };

        let probability = response
            .probability
            .ok_or_else(|| PredictionError::Malformed("missing probability".to_string()))?;

        Self::new(has_disease, probability)
    }

    pub fn has_disease(&self) -> bool {
        self.has_disease
    }

    pub fn confidence_percent(&self) -> f64 {
        self.confidence_percent
    }
}

/// Response body of the risk model's `/predict` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PredictionResponse {
    pub fn verdict(has_disease: bool, probability: f64) -> Self {
        Self {
            result: Some(if has_disease { DISEASE_DETECTED } else { NO_DISEASE }.to_string()),
            probability: Some(probability),
            error: None,
        }
    }
}

/// Failures of the external model. Kept apart from intake violations.
#[derive(Debug, thiserror::Error)]
pub enum PredictionError {
    #[error("prediction service unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("prediction service returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("prediction service reported an error: {0}")]
    Service(String),
    #[error("malformed prediction payload: {0}")]
    Malformed(String),
}

/// Seam for the opaque risk model so the assessment flow can run without the network.
pub trait PredictionModel: Send + Sync {
    fn predict(
        &self,
        observation: &LabObservation,
    ) -> impl Future<Output = Result<MlVerdict, PredictionError>> + Send;
}

/// JSON-over-HTTP adapter for the hosted risk model.
#[derive(Debug, Clone)]
pub struct HttpPredictionClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpPredictionClient {
    pub fn new(config: &PredictionConfig) -> Result<Self, PredictionError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.predict_url(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl PredictionModel for HttpPredictionClient {
    async fn predict(&self, observation: &LabObservation) -> Result<MlVerdict, PredictionError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(observation.panel())
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        debug!(%status, bytes = body.len(), "prediction service responded");

        if !status.is_success() {
            return Err(status_error(status, &body));
        }

        let payload: PredictionResponse = serde_json::from_slice(&body)
            .map_err(|err| PredictionError::Malformed(err.to_string()))?;

        MlVerdict::from_response(&payload)
    }
}

fn status_error(status: StatusCode, body: &[u8]) -> PredictionError {
    let message = serde_json::from_slice::<PredictionResponse>(body)
        .ok()
        .and_then(|payload| payload.error)
        .unwrap_or_else(|| "Prediction failed".to_string());

    PredictionError::Status {
        status: status.as_u16(),
        message,
    }
}
