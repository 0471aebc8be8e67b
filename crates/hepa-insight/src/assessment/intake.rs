use super::domain::{FieldInput, Gender, LabField, LabObservation, LabPanel, LabSubmission};

pub const MAX_AGE_YEARS: f64 = 120.0;

/// Validation errors raised while turning a submission into an observation. Only the first
/// violation found is reported.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntakeViolation {
    #[error("Please fill in all fields")]
    MissingField { field: LabField },
    #[error("Gender must be Male or Female (found '{found}')")]
    InvalidGender { found: String },
    #[error("{} must be a positive number", .field.label())]
    NotPositive { field: LabField },
    #[error("Direct Bilirubin cannot be greater than Total Bilirubin")]
    DirectExceedsTotal { direct: f64, total: f64 },
    #[error("Age must be realistic (0–120 years)")]
    AgeOutOfRange { age: f64 },
}

/// Guard responsible for producing `LabObservation` instances from raw form input.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntakeGuard;

impl IntakeGuard {
    pub fn new() -> Self {
        Self
    }

    /// Convert an inbound submission into a validated observation. Fields are checked in form
    /// order, each for presence and then for a usable value.
    pub fn observation_from_submission(
        &self,
        submission: &LabSubmission,
    ) -> Result<LabObservation, IntakeViolation> {
        let mut numbers = [0.0_f64; LabField::ALL.len()];
        let mut gender = None;

        for (index, field) in LabField::ALL.iter().copied().enumerate() {
            let input = submission
                .field(field)
                .filter(|input| !input.is_blank())
                .ok_or(IntakeViolation::MissingField { field })?;

            if field == LabField::Gender {
                gender = Some(parse_gender(input)?);
            } else {
                numbers[index] = parse_non_negative(field, input)?;
            }
        }

        let gender = gender.ok_or(IntakeViolation::MissingField {
            field: LabField::Gender,
        })?;

        LabObservation::new(LabPanel {
            age: numbers[0],
            gender,
            total_bilirubin: numbers[2],
            direct_bilirubin: numbers[3],
            alkaline_phosphatase: numbers[4],
            alt: numbers[5],
            ast: numbers[6],
            total_proteins: numbers[7],
            albumin: numbers[8],
            ag_ratio: numbers[9],
        })
    }
}

/// Invariants every observation must satisfy regardless of how it was built.
pub(crate) fn check_panel(panel: &LabPanel) -> Result<(), IntakeViolation> {
    let readings = [
        (LabField::Age, panel.age),
        (LabField::TotalBilirubin, panel.total_bilirubin),
        (LabField::DirectBilirubin, panel.direct_bilirubin),
        (LabField::Alkphos, panel.alkaline_phosphatase),
        (LabField::Sgpt, panel.alt),
        (LabField::Sgot, panel.ast),
        (LabField::TotalProteins, panel.total_proteins),
        (LabField::Albumin, panel.albumin),
        (LabField::AgRatio, panel.ag_ratio),
    ];

    if let Some((field, _)) = readings
        .iter()
        .find(|(_, value)| !value.is_finite() || *value < 0.0)
    {
        return Err(IntakeViolation::NotPositive { field: *field });
    }

    if panel.direct_bilirubin > panel.total_bilirubin {
        return Err(IntakeViolation::DirectExceedsTotal {
            direct: panel.direct_bilirubin,
            total: panel.total_bilirubin,
        });
    }

    if panel.age > MAX_AGE_YEARS {
        return Err(IntakeViolation::AgeOutOfRange { age: panel.age });
    }

    Ok(())
}

fn parse_gender(input: &FieldInput) -> Result<Gender, IntakeViolation> {
    match input {
        FieldInput::Text(text) => {
            Gender::parse(text).ok_or_else(|| IntakeViolation::InvalidGender {
                found: text.trim().to_string(),
            })
        }
        FieldInput::Number(value) => Err(IntakeViolation::InvalidGender {
            found: value.to_string(),
        }),
    }
}

fn parse_non_negative(field: LabField, input: &FieldInput) -> Result<f64, IntakeViolation> {
    let value = match input {
        FieldInput::Number(value) => Some(*value),
        FieldInput::Text(text) => text.trim().parse::<f64>().ok(),
    };

    value
        .filter(|value| value.is_finite() && *value >= 0.0)
        .ok_or(IntakeViolation::NotPositive { field })
}
