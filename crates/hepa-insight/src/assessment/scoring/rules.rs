use std::borrow::Cow;

use serde::Serialize;

use super::super::domain::{Biomarker, ConditionKey, LabObservation};
use Biomarker::{
    Age, Albumin, AlkalinePhosphatase, Alt, Ast, AstAltRatio, DirectBilirubin, TotalBilirubin,
    TotalProteins,
};
use ConditionKey::{AcuteViral, Alcoholic, Cholestasis, Cirrhosis, Nafld, Normal};

/// Single membership test over one biomarker. Bands are inclusive at both ends; `Above` and
/// `Below` are strict. A biomarker with no reading (e.g. the AST/ALT ratio when ALT is zero)
/// never matches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Predicate {
    Within {
        biomarker: Biomarker,
        min: f64,
        max: f64,
    },
    Above {
        biomarker: Biomarker,
        threshold: f64,
    },
    Below {
        biomarker: Biomarker,
        threshold: f64,
    },
}

impl Predicate {
    pub fn biomarker(&self) -> Biomarker {
        match self {
            Predicate::Within { biomarker, .. }
            | Predicate::Above { biomarker, .. }
            | Predicate::Below { biomarker, .. } => *biomarker,
        }
    }

    pub fn matches(&self, observation: &LabObservation) -> bool {
        let Some(value) = observation.value(self.biomarker()) else {
            return false;
        };

        match self {
            Predicate::Within { min, max, .. } => value >= *min && value <= *max,
            Predicate::Above { threshold, .. } => value > *threshold,
            Predicate::Below { threshold, .. } => value < *threshold,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Predicate::Within {
                biomarker,
                min,
                max,
            } => format!("{} {}–{}", biomarker.label(), min, max),
            Predicate::Above {
                biomarker,
                threshold,
            } => format!("{} > {}", biomarker.label(), threshold),
            Predicate::Below {
                biomarker,
                threshold,
            } => format!("{} < {}", biomarker.label(), threshold),
        }
    }
}

/// One additive scoring rule: when every clause holds, `weight` is added to `condition`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rule {
    pub condition: ConditionKey,
    pub clauses: &'static [Predicate],
    pub weight: u32,
}

impl Rule {
    pub fn matches(&self, observation: &LabObservation) -> bool {
        !self.clauses.is_empty() && self.clauses.iter().all(|clause| clause.matches(observation))
    }

    pub fn describe(&self) -> String {
        self.clauses
            .iter()
            .map(Predicate::describe)
            .collect::<Vec<_>>()
            .join(" and ")
    }
}

/// Ordered rule list evaluated by the pattern scorer.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleTable {
    rules: Cow<'static, [Rule]>,
}

impl RuleTable {
    /// Reference table for the six liver patterns.
    pub fn canonical() -> Self {
        Self {
            rules: Cow::Borrowed(CANONICAL_RULES),
        }
    }

    pub fn new(rules: Vec<Rule>) -> Self {
        Self {
            rules: Cow::Owned(rules),
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn for_condition(&self, condition: ConditionKey) -> impl Iterator<Item = &Rule> + '_ {
        self.rules
            .iter()
            .filter(move |rule| rule.condition == condition)
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::canonical()
    }
}

const fn within(biomarker: Biomarker, min: f64, max: f64) -> Predicate {
    Predicate::Within {
        biomarker,
        min,
        max,
    }
}

const fn above(biomarker: Biomarker, threshold: f64) -> Predicate {
    Predicate::Above {
        biomarker,
        threshold,
    }
}

const fn below(biomarker: Biomarker, threshold: f64) -> Predicate {
    Predicate::Below {
        biomarker,
        threshold,
    }
}

const fn rule(condition: ConditionKey, clauses: &'static [Predicate], weight: u32) -> Rule {
    Rule {
        condition,
        clauses,
        weight,
    }
}

const CANONICAL_RULES: &[Rule] = &[
    // acute viral hepatitis: marked transaminase rise with ALT > AST
    rule(AcuteViral, &[within(TotalBilirubin, 5.0, 15.0)], 3),
    rule(AcuteViral, &[within(AlkalinePhosphatase, 150.0, 350.0)], 2),
    rule(AcuteViral, &[within(Ast, 400.0, 800.0)], 3),
    rule(
        AcuteViral,
        &[within(Alt, 600.0, 1200.0), below(AstAltRatio, 1.0)],
        3,
    ),
    rule(AcuteViral, &[within(Albumin, 3.5, 5.0)], 1),
    // alcoholic liver disease: AST/ALT near 2
    rule(Alcoholic, &[within(TotalBilirubin, 3.0, 10.0)], 2),
    rule(Alcoholic, &[within(AlkalinePhosphatase, 120.0, 250.0)], 2),
    rule(Alcoholic, &[within(Ast, 150.0, 400.0)], 3),
    rule(
        Alcoholic,
        &[within(Alt, 50.0, 200.0), within(AstAltRatio, 1.8, 2.3)],
        3,
    ),
    rule(Alcoholic, &[within(Albumin, 2.5, 3.5)], 2),
    // cholestasis
    rule(Cholestasis, &[within(TotalBilirubin, 5.0, 20.0)], 3),
    rule(Cholestasis, &[above(DirectBilirubin, 1.5)], 3),
    rule(Cholestasis, &[within(AlkalinePhosphatase, 300.0, 900.0)], 4),
    rule(Cholestasis, &[below(Ast, 200.0), below(Alt, 200.0)], 2),
    rule(Cholestasis, &[within(Albumin, 3.5, 5.0)], 1),
    // cirrhosis / chronic disease: reduced synthetic function
    rule(Cirrhosis, &[within(TotalBilirubin, 2.0, 15.0)], 2),
    rule(Cirrhosis, &[within(AlkalinePhosphatase, 120.0, 300.0)], 2),
    rule(Cirrhosis, &[within(Ast, 80.0, 300.0)], 2),
    rule(
        Cirrhosis,
        &[within(Alt, 40.0, 200.0), above(AstAltRatio, 1.0)],
        2,
    ),
    rule(Cirrhosis, &[within(Albumin, 2.0, 3.5)], 3),
    rule(Cirrhosis, &[above(Age, 50.0)], 1),
    rule(Cirrhosis, &[below(TotalProteins, 6.0)], 1),
    // NAFLD
    rule(Nafld, &[within(TotalBilirubin, 0.8, 2.0)], 2),
    rule(Nafld, &[within(AlkalinePhosphatase, 100.0, 200.0)], 2),
    rule(Nafld, &[within(Ast, 30.0, 70.0)], 2),
    rule(
        Nafld,
        &[within(Alt, 40.0, 100.0), within(AstAltRatio, 0.7, 1.5)],
        3,
    ),
    rule(Nafld, &[within(Albumin, 3.5, 5.0)], 1),
    // normal reference ranges
    rule(Normal, &[within(TotalBilirubin, 0.3, 1.2)], 2),
    rule(Normal, &[within(AlkalinePhosphatase, 44.0, 147.0)], 2),
    rule(Normal, &[within(Ast, 10.0, 40.0)], 1),
    rule(Normal, &[within(Alt, 7.0, 56.0)], 1),
    rule(Normal, &[within(Albumin, 3.5, 5.0)], 2),
];
