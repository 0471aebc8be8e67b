use super::common::*;
use crate::assessment::catalog::ConditionCatalog;
use crate::assessment::domain::ConditionKey;
use crate::assessment::fusion::{
    lab_confidence_proxy, FusionEngine, FusionStatus, FusionWeights, MlRiskBand,
};
use crate::assessment::scoring::ConfidenceTier;

#[test]
fn no_disease_with_normal_pattern_is_consistently_low_risk() {
    let pattern = scorer().score(&observation(normal_panel()));
    let fused = FusionEngine::new().fuse(verdict(false, 90.0), &pattern);

    assert_eq!(fused.status, FusionStatus::ConsistentlyLowRisk);
    assert_eq!(fused.status_label(), "Consistently low risk");
    assert!(!fused.show_condition);
    assert_eq!(fused.fused_score, None);
    assert_eq!(fused.disclosed_condition(&pattern), None);
}

#[test]
fn no_disease_with_abnormal_pattern_never_discloses_condition() {
    let pattern = scorer().score(&observation(nafld_panel()));
    assert_eq!(pattern.winner, ConditionKey::Nafld);

    let fused = FusionEngine::new().fuse(verdict(false, 80.0), &pattern);

    assert_eq!(fused.status, FusionStatus::MixedNeedsEvaluation);
    assert_eq!(
        fused.status_label(),
        "Mixed pattern — needs clinical evaluation"
    );
    assert!(!fused.show_condition);
    let nafld_name = ConditionCatalog::lookup(ConditionKey::Nafld).display_name;
    assert!(!fused.narrative.contains(nafld_name));
}

#[test]
fn disease_with_normal_pattern_flags_subclinical_presentation() {
    let pattern = scorer().score(&observation(normal_panel()));
    let fused = FusionEngine::new().fuse(verdict(true, 97.0), &pattern);

    assert_eq!(fused.status, FusionStatus::MixedSubclinical);
    assert!(!fused.show_condition);
    assert_eq!(fused.fused_score, None);
}

#[test]
fn high_tier_at_95_percent_lands_just_below_alignment() {
    let pattern = scorer().score(&observation(cholestasis_panel()));
    assert_eq!(pattern.winning_score, 12);

    let fused = FusionEngine::new().fuse(verdict(true, 95.0), &pattern);

    assert_eq!(fused.fused_score, Some(89.0));
    assert_eq!(
        fused.weights,
        Some(FusionWeights {
            ml_percent: 60,
            lab_percent: 40,
        })
    );
    assert_eq!(fused.status, FusionStatus::ProbableRisk);
    assert_eq!(fused.status_label(), "Probable risk — suggestive");
    assert!(fused.show_condition);
    assert!(fused
        .narrative
        .contains("Cholestasis / Bile Obstruction Pattern"));
    assert_eq!(
        fused.disclosed_condition(&pattern),
        Some(ConditionKey::Cholestasis)
    );
}

#[test]
fn high_tier_with_certain_model_is_aligned() {
    let pattern = scorer().score(&observation(cholestasis_panel()));
    let fused = FusionEngine::new().fuse(verdict(true, 100.0), &pattern);

    assert_eq!(fused.fused_score, Some(92.0));
    assert_eq!(fused.status, FusionStatus::HighRiskAligned);
    assert!(fused.show_condition);
}

#[test]
fn fused_score_boundaries_are_inclusive() {
    assert_eq!(
        FusionStatus::from_fused_score(90.0),
        FusionStatus::HighRiskAligned
    );
    assert_eq!(
        FusionStatus::from_fused_score(89.999),
        FusionStatus::ProbableRisk
    );
    assert_eq!(
        FusionStatus::from_fused_score(70.0),
        FusionStatus::ProbableRisk
    );
    assert_eq!(
        FusionStatus::from_fused_score(69.999),
        FusionStatus::Borderline
    );
    assert!(FusionStatus::HighRiskAligned.discloses_condition());
    assert!(FusionStatus::ProbableRisk.discloses_condition());
    assert!(!FusionStatus::Borderline.discloses_condition());
}

#[test]
fn weights_follow_model_confidence_bands() {
    let confident = FusionWeights {
        ml_percent: 60,
        lab_percent: 40,
    };
    let hesitant = FusionWeights {
        ml_percent: 30,
        lab_percent: 70,
    };
    let even = FusionWeights {
        ml_percent: 50,
        lab_percent: 50,
    };

    assert_eq!(FusionWeights::for_confidence(50.0), confident);
    assert_eq!(FusionWeights::for_confidence(99.0), confident);
    assert_eq!(FusionWeights::for_confidence(40.0), hesitant);
    assert_eq!(FusionWeights::for_confidence(5.0), hesitant);
    assert_eq!(FusionWeights::for_confidence(40.5), even);
    assert_eq!(FusionWeights::for_confidence(49.9), even);
}

#[test]
fn lab_proxy_tracks_tier() {
    assert_eq!(lab_confidence_proxy(ConfidenceTier::High), 80);
    assert_eq!(lab_confidence_proxy(ConfidenceTier::Moderate), 60);
    assert_eq!(lab_confidence_proxy(ConfidenceTier::Low), 40);
}

#[test]
fn moderate_pattern_with_hesitant_model_is_borderline() {
    let pattern = scorer().score(&observation(moderate_nafld_panel()));
    assert_eq!(pattern.winner, ConditionKey::Nafld);
    assert_eq!(pattern.tier, ConfidenceTier::Moderate);

    let fused = FusionEngine::new().fuse(verdict(true, 45.0), &pattern);

    assert_eq!(fused.fused_score, Some(52.5));
    assert_eq!(fused.status, FusionStatus::Borderline);
    assert!(!fused.show_condition);
    assert!(fused.narrative.contains("inconclusive"));
}

#[test]
fn high_pattern_cannot_rescue_low_model_confidence() {
    let pattern = scorer().score(&observation(cholestasis_panel()));
    let fused = FusionEngine::new().fuse(verdict(true, 40.0), &pattern);

    assert_eq!(fused.fused_score, Some(68.0));
    assert_eq!(fused.status, FusionStatus::Borderline);
    assert!(fused.clinician_note.contains("not very confident"));
}

#[test]
fn moderate_model_with_high_pattern_is_probable() {
    let pattern = scorer().score(&observation(cholestasis_panel()));
    let fused = FusionEngine::new().fuse(verdict(true, 75.0), &pattern);

    assert_eq!(fused.fused_score, Some(77.0));
    assert_eq!(fused.status, FusionStatus::ProbableRisk);
    assert_eq!(fused.ml_risk, MlRiskBand::High);
}

#[test]
fn low_tier_pattern_blends_to_borderline() {
    let pattern = scorer().score(&observation(low_tier_panel()));
    assert_eq!(pattern.tier, ConfidenceTier::Low);
    assert_eq!(pattern.winner, ConditionKey::Cholestasis);

    let fused = FusionEngine::new().fuse(verdict(true, 30.0), &pattern);

    assert_eq!(fused.fused_score, Some(37.0));
    assert_eq!(fused.status, FusionStatus::Borderline);
}

#[test]
fn ml_risk_band_uses_model_confidence_only() {
    assert_eq!(MlRiskBand::from_confidence(85.0), MlRiskBand::VeryHigh);
    assert_eq!(MlRiskBand::from_confidence(84.9), MlRiskBand::High);
    assert_eq!(MlRiskBand::from_confidence(70.0), MlRiskBand::High);
    assert_eq!(MlRiskBand::from_confidence(50.0), MlRiskBand::Moderate);
    assert_eq!(MlRiskBand::from_confidence(49.0), MlRiskBand::LowConfidence);
}

#[test]
fn status_serializes_as_display_label() {
    let value = serde_json::to_value(FusionStatus::HighRiskAligned).expect("serializes");
    assert_eq!(value, serde_json::json!("High risk — aligned"));
}
