use std::io::Cursor;

use super::common::*;
use crate::assessment::batch::{BatchEvaluator, BatchRowOutcome};
use crate::assessment::domain::ConditionKey;
use crate::assessment::fusion::FusionStatus;

const HEADER: &str = "Age,Gender,Total_Bilirubin,Direct_Bilirubin,Alkphos,Sgpt,Sgot,Total_Proteins,Albumin,AG_Ratio,result,probability";

#[test]
fn evaluates_rows_independently() {
    let csv = format!(
        "{HEADER}\n\
         45,Female,8,4,450,110,120,6.5,3.0,0.9,Liver Disease Detected,95\n\
         30,Male,0.8,0.2,90,30,25,7,4,1.3,No Liver Disease,91\n\
         50,Male,1.0,2.0,90,30,25,7,4,1.3,No Liver Disease,91\n"
    );
    let engine = engine();

    let report = BatchEvaluator::new(&engine)
        .evaluate_reader(Cursor::new(csv))
        .expect("batch");

    assert_eq!(report.outcomes.len(), 3);
    assert_eq!(report.evaluated_count(), 2);
    assert_eq!(report.rejected_count(), 1);

    let lines: Vec<_> = report.outcomes.iter().map(|outcome| outcome.line).collect();
    assert_eq!(lines, vec![2, 3, 4]);

    let evaluated: Vec<_> = report.evaluated().collect();
    assert_eq!(evaluated[0].1.pattern.winner, ConditionKey::Cholestasis);
    assert_eq!(evaluated[0].1.fusion.status, FusionStatus::ProbableRisk);
    assert_eq!(evaluated[1].1.fusion.status, FusionStatus::ConsistentlyLowRisk);

    match &report.outcomes[2].outcome {
        BatchRowOutcome::Rejected { reason } => {
            assert_eq!(
                reason,
                "Direct Bilirubin cannot be greater than Total Bilirubin"
            );
        }
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[test]
fn blank_cells_and_bad_verdicts_are_rejected_per_row() {
    let csv = format!(
        "{HEADER}\n\
         30,Male,0.8,,90,30,25,7,4,1.3,No Liver Disease,91\n\
         30,Male,0.8,0.2,90,30,25,7,4,1.3,Unknown,91\n\
         30,Male,0.8,0.2,90,30,25,7,4,1.3,No Liver Disease,lots\n"
    );
    let engine = engine();

    let report = BatchEvaluator::new(&engine)
        .evaluate_reader(Cursor::new(csv))
        .expect("batch");

    assert_eq!(report.rejected_count(), 3);
    let reasons: Vec<_> = report
        .outcomes
        .iter()
        .filter_map(|outcome| match &outcome.outcome {
            BatchRowOutcome::Rejected { reason } => Some(reason.as_str()),
            BatchRowOutcome::Evaluated(_) => None,
        })
        .collect();
    assert_eq!(reasons[0], "Please fill in all fields");
    assert!(reasons[1].contains("Unknown"));
    assert!(reasons[2].contains("lots"));
}

#[test]
fn ragged_row_is_rejected_without_aborting_the_batch() {
    let csv = format!(
        "{HEADER}\n\
         30,Male,0.8,0.2,90,30,25,7,4,1.3,No Liver Disease,91\n\
         30,Male,0.8,0.2,90\n\
         45,Female,8,4,450,110,120,6.5,3.0,0.9,Liver Disease Detected,95\n"
    );
    let engine = engine();

    let report = BatchEvaluator::new(&engine)
        .evaluate_reader(Cursor::new(csv))
        .expect("ragged rows do not abort the batch");

    assert_eq!(report.outcomes.len(), 3);
    assert_eq!(report.evaluated_count(), 2);
    assert_eq!(report.rejected_count(), 1);

    let lines: Vec<_> = report.outcomes.iter().map(|outcome| outcome.line).collect();
    assert_eq!(lines, vec![2, 3, 4]);

    match &report.outcomes[1].outcome {
        BatchRowOutcome::Rejected { reason } => {
            assert_eq!(reason, "expected 12 columns, found 5");
        }
        other => panic!("expected rejection, got {other:?}"),
    }

    let winners: Vec<_> = report
        .evaluated()
        .map(|(line, assessment)| (line, assessment.pattern.winner))
        .collect();
    assert_eq!(
        winners,
        vec![(2, ConditionKey::Normal), (4, ConditionKey::Cholestasis)]
    );
}

#[test]
fn row_with_extra_columns_is_rejected() {
    let csv = format!(
        "{HEADER}\n30,Male,0.8,0.2,90,30,25,7,4,1.3,No Liver Disease,91,extra\n"
    );
    let engine = engine();

    let report = BatchEvaluator::new(&engine)
        .evaluate_reader(Cursor::new(csv))
        .expect("batch");

    assert_eq!(report.rejected_count(), 1);
    assert_eq!(report.outcomes[0].line, 2);
}

#[test]
fn report_serializes_with_outcome_tag() {
    let csv = format!("{HEADER}\n30,Male,0.8,0.2,90,30,25,7,4,1.3,No Liver Disease,91\n");
    let engine = engine();

    let report = BatchEvaluator::new(&engine)
        .evaluate_reader(Cursor::new(csv))
        .expect("batch");
    let value = serde_json::to_value(&report).expect("serializes");

    assert_eq!(value["outcomes"][0]["line"], serde_json::json!(2));
    assert_eq!(value["outcomes"][0]["outcome"], serde_json::json!("evaluated"));
}

#[test]
fn missing_file_is_an_io_error() {
    let engine = engine();
    let err = BatchEvaluator::new(&engine)
        .evaluate_path("/definitely/not/here.csv")
        .unwrap_err();

    assert!(err.to_string().starts_with("failed to read batch input"));
}
