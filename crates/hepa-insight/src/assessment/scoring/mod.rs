mod rules;
mod tier;

pub use rules::{Predicate, Rule, RuleTable};
pub use tier::ConfidenceTier;

use serde::Serialize;
use tracing::debug;

use super::domain::{ConditionKey, ConditionScoreVector, LabObservation};

/// Stateless scorer that applies a rule table to an observation.
#[derive(Debug, Clone, Default)]
pub struct PatternScorer {
    table: RuleTable,
}

impl PatternScorer {
    pub fn new(table: RuleTable) -> Self {
        Self { table }
    }

    pub fn canonical() -> Self {
        Self::new(RuleTable::canonical())
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    pub fn score(&self, observation: &LabObservation) -> PatternVerdict {
        let mut scores = ConditionScoreVector::zeroed();
        let mut matched = Vec::new();

        for rule in self.table.rules() {
            if rule.matches(observation) {
                scores.add(rule.condition, rule.weight);
                matched.push(RuleMatch {
                    condition: rule.condition,
                    weight: rule.weight,
                    notes: rule.describe(),
                });
            }
        }

        let (winner, winning_score) = scores.leader();
        let tier = ConfidenceTier::from_score(winning_score);

        debug!(
            %winner,
            winning_score,
            tier = tier.label(),
            matched_rules = matched.len(),
            "scored lab pattern"
        );

        PatternVerdict {
            scores,
            winner,
            winning_score,
            tier,
            matched,
        }
    }
}

/// Rule that fired during scoring, kept so the verdict can be audited.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleMatch {
    pub condition: ConditionKey,
    pub weight: u32,
    pub notes: String,
}

/// Scoring output: per-condition evidence, the winning pattern and its tier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternVerdict {
    pub scores: ConditionScoreVector,
    pub winner: ConditionKey,
    pub winning_score: u32,
    pub tier: ConfidenceTier,
    pub matched: Vec<RuleMatch>,
}

impl PatternVerdict {
    pub fn is_normal(&self) -> bool {
        self.winner.is_normal()
    }

    pub fn matched_for(&self, condition: ConditionKey) -> impl Iterator<Item = &RuleMatch> + '_ {
        self.matched
            .iter()
            .filter(move |matched| matched.condition == condition)
    }
}
