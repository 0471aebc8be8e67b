use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::intake::{self, IntakeViolation};

/// Biological sex as captured by the intake form and expected by the risk model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }

    pub(crate) fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            _ => None,
        }
    }
}

/// Typed liver panel using the field names shared with the risk model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabPanel {
    #[serde(rename = "Age")]
    pub age: f64,
    #[serde(rename = "Gender")]
    pub gender: Gender,
    #[serde(rename = "Total_Bilirubin")]
    pub total_bilirubin: f64,
    #[serde(rename = "Direct_Bilirubin")]
    pub direct_bilirubin: f64,
    #[serde(rename = "Alkphos")]
    pub alkaline_phosphatase: f64,
    #[serde(rename = "Sgpt")]
    pub alt: f64,
    #[serde(rename = "Sgot")]
    pub ast: f64,
    #[serde(rename = "Total_Proteins")]
    pub total_proteins: f64,
    #[serde(rename = "Albumin")]
    pub albumin: f64,
    #[serde(rename = "AG_Ratio")]
    pub ag_ratio: f64,
}

/// A validated panel. Construction is the only place the intake invariants are checked, so
/// every `LabObservation` in circulation has non-negative values, `direct <= total` bilirubin
/// and an age within 0..=120.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LabObservation {
    panel: LabPanel,
}

impl LabObservation {
    pub fn new(panel: LabPanel) -> Result<Self, IntakeViolation> {
        intake::check_panel(&panel)?;
        Ok(Self { panel })
    }

    pub fn panel(&self) -> &LabPanel {
        &self.panel
    }

    /// AST/ALT (De Ritis) ratio, `None` when ALT is zero.
    pub fn ast_alt_ratio(&self) -> Option<f64> {
        if self.panel.alt > 0.0 {
            Some(self.panel.ast / self.panel.alt)
        } else {
            None
        }
    }

    /// Reading used by rule predicates. Derived markers may be absent.
    pub fn value(&self, biomarker: Biomarker) -> Option<f64> {
        let panel = &self.panel;
        match biomarker {
            Biomarker::Age => Some(panel.age),
            Biomarker::TotalBilirubin => Some(panel.total_bilirubin),
            Biomarker::DirectBilirubin => Some(panel.direct_bilirubin),
            Biomarker::AlkalinePhosphatase => Some(panel.alkaline_phosphatase),
            Biomarker::Alt => Some(panel.alt),
            Biomarker::Ast => Some(panel.ast),
            Biomarker::TotalProteins => Some(panel.total_proteins),
            Biomarker::Albumin => Some(panel.albumin),
            Biomarker::AgRatio => Some(panel.ag_ratio),
            Biomarker::AstAltRatio => self.ast_alt_ratio(),
        }
    }
}

/// Quantities the pattern rules can test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Biomarker {
    Age,
    TotalBilirubin,
    DirectBilirubin,
    AlkalinePhosphatase,
    Alt,
    Ast,
    TotalProteins,
    Albumin,
    AgRatio,
    AstAltRatio,
}

impl Biomarker {
    pub fn label(self) -> &'static str {
        match self {
            Biomarker::Age => "age",
            Biomarker::TotalBilirubin => "total bilirubin",
            Biomarker::DirectBilirubin => "direct bilirubin",
            Biomarker::AlkalinePhosphatase => "ALP",
            Biomarker::Alt => "ALT",
            Biomarker::Ast => "AST",
            Biomarker::TotalProteins => "total proteins",
            Biomarker::Albumin => "albumin",
            Biomarker::AgRatio => "A/G ratio",
            Biomarker::AstAltRatio => "AST/ALT ratio",
        }
    }
}

/// Candidate clinical patterns. Declaration order is the tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConditionKey {
    AcuteViral,
    Alcoholic,
    Cholestasis,
    Cirrhosis,
    Nafld,
    Normal,
}

impl ConditionKey {
    pub const ALL: [ConditionKey; 6] = [
        ConditionKey::AcuteViral,
        ConditionKey::Alcoholic,
        ConditionKey::Cholestasis,
        ConditionKey::Cirrhosis,
        ConditionKey::Nafld,
        ConditionKey::Normal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ConditionKey::AcuteViral => "acuteViral",
            ConditionKey::Alcoholic => "alcoholic",
            ConditionKey::Cholestasis => "cholestasis",
            ConditionKey::Cirrhosis => "cirrhosis",
            ConditionKey::Nafld => "nafld",
            ConditionKey::Normal => "normal",
        }
    }

    pub fn is_normal(self) -> bool {
        self == ConditionKey::Normal
    }
}

impl fmt::Display for ConditionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accumulated rule weight per condition. Every key is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ConditionScoreVector {
    scores: BTreeMap<ConditionKey, u32>,
}

impl ConditionScoreVector {
    pub fn zeroed() -> Self {
        Self {
            scores: ConditionKey::ALL.iter().map(|key| (*key, 0)).collect(),
        }
    }

    pub(crate) fn add(&mut self, key: ConditionKey, weight: u32) {
        *self.scores.entry(key).or_insert(0) += weight;
    }

    pub fn get(&self, key: ConditionKey) -> u32 {
        self.scores.get(&key).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ConditionKey, u32)> + '_ {
        self.scores.iter().map(|(key, score)| (*key, *score))
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Highest-scoring key; on a tie the key declared first wins.
    pub fn leader(&self) -> (ConditionKey, u32) {
        let mut leader = (ConditionKey::ALL[0], self.get(ConditionKey::ALL[0]));
        for key in ConditionKey::ALL.iter().skip(1) {
            let score = self.get(*key);
            if score > leader.1 {
                leader = (*key, score);
            }
        }
        leader
    }
}

impl Default for ConditionScoreVector {
    fn default() -> Self {
        Self::zeroed()
    }
}

/// Intake form fields in the order they are validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LabField {
    Age,
    Gender,
    TotalBilirubin,
    DirectBilirubin,
    Alkphos,
    Sgpt,
    Sgot,
    TotalProteins,
    Albumin,
    AgRatio,
}

impl LabField {
    pub const ALL: [LabField; 10] = [
        LabField::Age,
        LabField::Gender,
        LabField::TotalBilirubin,
        LabField::DirectBilirubin,
        LabField::Alkphos,
        LabField::Sgpt,
        LabField::Sgot,
        LabField::TotalProteins,
        LabField::Albumin,
        LabField::AgRatio,
    ];

    /// Key used on the wire and in CSV headers.
    pub fn wire_name(self) -> &'static str {
        match self {
            LabField::Age => "Age",
            LabField::Gender => "Gender",
            LabField::TotalBilirubin => "Total_Bilirubin",
            LabField::DirectBilirubin => "Direct_Bilirubin",
            LabField::Alkphos => "Alkphos",
            LabField::Sgpt => "Sgpt",
            LabField::Sgot => "Sgot",
            LabField::TotalProteins => "Total_Proteins",
            LabField::Albumin => "Albumin",
            LabField::AgRatio => "AG_Ratio",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LabField::Age => "Age",
            LabField::Gender => "Gender",
            LabField::TotalBilirubin => "Total Bilirubin",
            LabField::DirectBilirubin => "Direct Bilirubin",
            LabField::Alkphos => "Alkphos",
            LabField::Sgpt => "Sgpt",
            LabField::Sgot => "Sgot",
            LabField::TotalProteins => "Total Proteins",
            LabField::Albumin => "Albumin",
            LabField::AgRatio => "AG Ratio",
        }
    }
}

impl fmt::Display for LabField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw value as posted by a form: either a JSON number or the text typed into the field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldInput {
    Number(f64),
    Text(String),
}

impl FieldInput {
    pub(crate) fn is_blank(&self) -> bool {
        matches!(self, FieldInput::Text(text) if text.trim().is_empty())
    }
}

impl From<f64> for FieldInput {
    fn from(value: f64) -> Self {
        FieldInput::Number(value)
    }
}

impl From<&str> for FieldInput {
    fn from(value: &str) -> Self {
        FieldInput::Text(value.to_string())
    }
}

/// Unvalidated intake payload. Every field is optional so missing values surface as
/// intake violations instead of deserialization failures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabSubmission {
    #[serde(rename = "Age", default)]
    pub age: Option<FieldInput>,
    #[serde(rename = "Gender", default)]
    pub gender: Option<FieldInput>,
    #[serde(rename = "Total_Bilirubin", default)]
    pub total_bilirubin: Option<FieldInput>,
    #[serde(rename = "Direct_Bilirubin", default)]
    pub direct_bilirubin: Option<FieldInput>,
    #[serde(rename = "Alkphos", default)]
    pub alkphos: Option<FieldInput>,
    #[serde(rename = "Sgpt", default)]
    pub sgpt: Option<FieldInput>,
    #[serde(rename = "Sgot", default)]
    pub sgot: Option<FieldInput>,
    #[serde(rename = "Total_Proteins", default)]
    pub total_proteins: Option<FieldInput>,
    #[serde(rename = "Albumin", default)]
    pub albumin: Option<FieldInput>,
    #[serde(rename = "AG_Ratio", default)]
    pub ag_ratio: Option<FieldInput>,
}

impl LabSubmission {
    pub fn field(&self, field: LabField) -> Option<&FieldInput> {
        match field {
            LabField::Age => self.age.as_ref(),
            LabField::Gender => self.gender.as_ref(),
            LabField::TotalBilirubin => self.total_bilirubin.as_ref(),
            LabField::DirectBilirubin => self.direct_bilirubin.as_ref(),
            LabField::Alkphos => self.alkphos.as_ref(),
            LabField::Sgpt => self.sgpt.as_ref(),
            LabField::Sgot => self.sgot.as_ref(),
            LabField::TotalProteins => self.total_proteins.as_ref(),
            LabField::Albumin => self.albumin.as_ref(),
            LabField::AgRatio => self.ag_ratio.as_ref(),
        }
    }
}

impl From<&LabPanel> for LabSubmission {
    fn from(panel: &LabPanel) -> Self {
        Self {
            age: Some(panel.age.into()),
            gender: Some(panel.gender.label().into()),
            total_bilirubin: Some(panel.total_bilirubin.into()),
            direct_bilirubin: Some(panel.direct_bilirubin.into()),
            alkphos: Some(panel.alkaline_phosphatase.into()),
            sgpt: Some(panel.alt.into()),
            sgot: Some(panel.ast.into()),
            total_proteins: Some(panel.total_proteins.into()),
            albumin: Some(panel.albumin.into()),
            ag_ratio: Some(panel.ag_ratio.into()),
        }
    }
}
