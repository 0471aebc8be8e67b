use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{info, warn};

use super::domain::{FieldInput, LabSubmission};
use super::engine::{Assessment, AssessmentEngine};
use super::prediction::{MlVerdict, PredictionResponse};

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("failed to read batch input: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid batch CSV data: {0}")]
    Csv(#[from] csv::Error),
}

/// Evaluates a CSV of lab panels that already carry the risk model's verdict. Rows are
/// independent: a rejected row is reported and the rest of the file is still evaluated.
pub struct BatchEvaluator<'a> {
    engine: &'a AssessmentEngine,
}

impl<'a> BatchEvaluator<'a> {
    pub fn new(engine: &'a AssessmentEngine) -> Self {
        Self { engine }
    }

    pub fn evaluate_path<P: AsRef<Path>>(&self, path: P) -> Result<BatchReport, BatchError> {
        let file = std::fs::File::open(path)?;
        self.evaluate_reader(file)
    }

    pub fn evaluate_reader<R: Read>(&self, reader: R) -> Result<BatchReport, BatchError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);
        let headers = csv_reader.headers()?.clone();
        let mut outcomes = Vec::new();
        let mut record = csv::StringRecord::new();

        loop {
            let line = csv_reader.position().line();
            match csv_reader.read_record(&mut record) {
                Ok(true) => {}
                Ok(false) => break,
                Err(err) if err.is_io_error() => return Err(err.into()),
                Err(err) => {
                    outcomes.push(Self::reject(line, format!("unreadable row: {err}")));
                    continue;
                }
            }

            let line = record.position().map_or(line, |position| position.line());
            let outcome = match self.evaluate_record(&record, &headers) {
                Ok(assessment) => BatchOutcome {
                    line,
                    outcome: BatchRowOutcome::Evaluated(Box::new(assessment)),
                },
                Err(reason) => Self::reject(line, reason),
            };
            outcomes.push(outcome);
        }

        let report = BatchReport { outcomes };
        info!(
            evaluated = report.evaluated_count(),
            rejected = report.rejected_count(),
            "batch evaluation finished"
        );
        Ok(report)
    }

    fn reject(line: u64, reason: String) -> BatchOutcome {
        warn!(line, %reason, "batch row rejected");
        BatchOutcome {
            line,
            outcome: BatchRowOutcome::Rejected { reason },
        }
    }

    fn evaluate_record(
        &self,
        record: &csv::StringRecord,
        headers: &csv::StringRecord,
    ) -> Result<Assessment, String> {
        if record.len() != headers.len() {
            return Err(format!(
                "expected {} columns, found {}",
                headers.len(),
                record.len()
            ));
        }

        let row: BatchRow = record
            .deserialize(Some(headers))
            .map_err(|err| format!("unreadable row: {err}"))?;
        let submission = row.submission();
        let observation = self
            .engine
            .guard()
            .observation_from_submission(&submission)
            .map_err(|violation| violation.to_string())?;

        let probability = match row.probability.as_deref() {
            Some(raw) => Some(
                raw.parse::<f64>()
                    .map_err(|_| format!("probability '{raw}' is not a number"))?,
            ),
            None => None,
        };
        let response = PredictionResponse {
            result: row.result.clone(),
            probability,
            error: None,
        };
        let ml = MlVerdict::from_response(&response).map_err(|err| err.to_string())?;

        Ok(self.engine.evaluate(&observation, ml))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    pub outcomes: Vec<BatchOutcome>,
}

impl BatchReport {
    pub fn evaluated(&self) -> impl Iterator<Item = (u64, &Assessment)> + '_ {
        self.outcomes
            .iter()
            .filter_map(|outcome| match &outcome.outcome {
                BatchRowOutcome::Evaluated(assessment) => Some((outcome.line, assessment.as_ref())),
                BatchRowOutcome::Rejected { .. } => None,
            })
    }

    pub fn evaluated_count(&self) -> usize {
        self.evaluated().count()
    }

    pub fn rejected_count(&self) -> usize {
        self.outcomes.len() - self.evaluated_count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchOutcome {
    pub line: u64,
    #[serde(flatten)]
    pub outcome: BatchRowOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BatchRowOutcome {
    Evaluated(Box<Assessment>),
    Rejected { reason: String },
}

#[derive(Debug, Deserialize)]
struct BatchRow {
    #[serde(rename = "Age", default, deserialize_with = "empty_string_as_none")]
    age: Option<String>,
    #[serde(rename = "Gender", default, deserialize_with = "empty_string_as_none")]
    gender: Option<String>,
    #[serde(
        rename = "Total_Bilirubin",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    total_bilirubin: Option<String>,
    #[serde(
        rename = "Direct_Bilirubin",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    direct_bilirubin: Option<String>,
    #[serde(rename = "Alkphos", default, deserialize_with = "empty_string_as_none")]
    alkphos: Option<String>,
    #[serde(rename = "Sgpt", default, deserialize_with = "empty_string_as_none")]
    sgpt: Option<String>,
    #[serde(rename = "Sgot", default, deserialize_with = "empty_string_as_none")]
    sgot: Option<String>,
    #[serde(
        rename = "Total_Proteins",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    total_proteins: Option<String>,
    #[serde(rename = "Albumin", default, deserialize_with = "empty_string_as_none")]
    albumin: Option<String>,
    #[serde(rename = "AG_Ratio", default, deserialize_with = "empty_string_as_none")]
    ag_ratio: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    result: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    probability: Option<String>,
}

impl BatchRow {
    fn submission(&self) -> LabSubmission {
        let text = |value: &Option<String>| value.as_deref().map(FieldInput::from);

        LabSubmission {
            age: text(&self.age),
            gender: text(&self.gender),
            total_bilirubin: text(&self.total_bilirubin),
            direct_bilirubin: text(&self.direct_bilirubin),
            alkphos: text(&self.alkphos),
            sgpt: text(&self.sgpt),
            sgot: text(&self.sgot),
            total_proteins: text(&self.total_proteins),
            albumin: text(&self.albumin),
            ag_ratio: text(&self.ag_ratio),
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
