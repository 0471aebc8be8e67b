use clap::Args;
use hepa_insight::assessment::{
    Assessment, AssessmentEngine, AssessmentService, AssessmentServiceError, BatchEvaluator,
    BatchReport, BatchRowOutcome, FieldInput, Gender, HttpPredictionClient, LabPanel,
    LabSubmission, MlVerdict, PredictionResponse,
};
use hepa_insight::config::AppConfig;
use hepa_insight::error::AppError;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Age in years
    #[arg(long)]
    pub(crate) age: f64,
    /// Male or Female
    #[arg(long)]
    pub(crate) gender: String,
    /// Total bilirubin (mg/dL)
    #[arg(long)]
    pub(crate) total_bilirubin: f64,
    /// Direct bilirubin (mg/dL)
    #[arg(long)]
    pub(crate) direct_bilirubin: f64,
    /// Alkaline phosphatase (IU/L)
    #[arg(long)]
    pub(crate) alkphos: f64,
    /// ALT / SGPT (IU/L)
    #[arg(long)]
    pub(crate) sgpt: f64,
    /// AST / SGOT (IU/L)
    #[arg(long)]
    pub(crate) sgot: f64,
    /// Total proteins (g/dL)
    #[arg(long)]
    pub(crate) total_proteins: f64,
    /// Albumin (g/dL)
    #[arg(long)]
    pub(crate) albumin: f64,
    /// Albumin/globulin ratio
    #[arg(long)]
    pub(crate) ag_ratio: f64,
    /// Use this model result instead of calling the prediction service
    #[arg(long, requires = "ml_probability")]
    pub(crate) ml_result: Option<String>,
    /// Model confidence in percent, paired with --ml-result
    #[arg(long, requires = "ml_result")]
    pub(crate) ml_probability: Option<f64>,
    /// Print the assessment view as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

impl AssessArgs {
    fn submission(&self) -> LabSubmission {
        LabSubmission {
            age: Some(FieldInput::from(self.age)),
            gender: Some(FieldInput::from(self.gender.as_str())),
            total_bilirubin: Some(FieldInput::from(self.total_bilirubin)),
            direct_bilirubin: Some(FieldInput::from(self.direct_bilirubin)),
            alkphos: Some(FieldInput::from(self.alkphos)),
            sgpt: Some(FieldInput::from(self.sgpt)),
            sgot: Some(FieldInput::from(self.sgot)),
            total_proteins: Some(FieldInput::from(self.total_proteins)),
            albumin: Some(FieldInput::from(self.albumin)),
            ag_ratio: Some(FieldInput::from(self.ag_ratio)),
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV with the lab columns plus `result` and `probability`
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Print the full report as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Print each assessment view as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) async fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let submission = args.submission();
    let engine = AssessmentEngine::canonical();

    let assessment = match (&args.ml_result, args.ml_probability) {
        (Some(result), Some(probability)) => {
            let response = PredictionResponse {
                result: Some(result.clone()),
                probability: Some(probability),
                error: None,
            };
            let ml = MlVerdict::from_response(&response).map_err(AssessmentServiceError::from)?;
            engine
                .evaluate_submission(&submission, ml)
                .map_err(AssessmentServiceError::from)?
        }
        _ => {
            let config = AppConfig::load()?;
            let client = HttpPredictionClient::new(&config.prediction)
                .map_err(AssessmentServiceError::from)?;
            let service = AssessmentService::new(Arc::new(client), engine);
            service.assess(&submission).await?
        }
    };

    if args.json {
        print_json(&assessment.view())
    } else {
        render_assessment(&assessment);
        Ok(())
    }
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let engine = AssessmentEngine::canonical();
    let report = BatchEvaluator::new(&engine).evaluate_path(&args.input)?;

    if args.json {
        return print_json(&report);
    }

    render_batch_report(&report);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let engine = AssessmentEngine::canonical();

    println!("Liver panel assessment demo");
    for case in demo_cases() {
        println!("\n== {} ==", case.title);
        let ml = MlVerdict::new(case.has_disease, case.confidence)
            .map_err(AssessmentServiceError::from)?;
        let assessment = engine
            .evaluate_submission(&LabSubmission::from(&case.panel), ml)
            .map_err(AssessmentServiceError::from)?;

        if args.json {
            print_json(&assessment.view())?;
        } else {
            render_assessment(&assessment);
        }
    }

    Ok(())
}

struct DemoCase {
    title: &'static str,
    panel: LabPanel,
    has_disease: bool,
    confidence: f64,
}

fn demo_cases() -> Vec<DemoCase> {
    vec![
        DemoCase {
            title: "Routine check-up",
            panel: LabPanel {
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
            },
            has_disease: false,
            confidence: 91.0,
        },
        DemoCase {
            title: "Obstructive jaundice work-up",
            panel: LabPanel {
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
            },
            has_disease: true,
            confidence: 95.0,
        },
        DemoCase {
            title: "Hesitant model, moderate fatty-liver pattern",
            panel: LabPanel {
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
            },
            has_disease: true,
            confidence: 45.0,
        },
    ]
}

fn render_assessment(assessment: &Assessment) {
    let view = assessment.view();

    println!("Status: {}", view.status);
    println!(
        "ML model: {} ({:.1}% confidence, {})",
        view.ml_result, view.ml_confidence, view.ml_risk
    );
    println!("Lab pattern confidence: {}", view.lab_confidence);
    if let Some(fused) = view.fused_score {
        println!("Fused score: {fused:.1}");
    }
    println!("{}", view.narrative);

    println!("Pattern scores:");
    for entry in &view.scores {
        println!("  {:<12} {}", entry.condition, entry.score);
    }

    if let Some(profile) = view.condition {
        println!("Guidance for {}:", profile.display_name);
        for tip in profile.lifestyle_tips {
            println!("  - {tip}");
        }
    }

    println!("Note: {}", view.clinician_note);
}

fn render_batch_report(report: &BatchReport) {
    println!(
        "Evaluated {} row(s), rejected {}",
        report.evaluated_count(),
        report.rejected_count()
    );

    for outcome in &report.outcomes {
        match &outcome.outcome {
            BatchRowOutcome::Evaluated(assessment) => {
                let view = assessment.view();
                let condition = view
                    .condition
                    .map(|profile| profile.display_name)
                    .unwrap_or("not disclosed");
                println!("  line {:>4}: {} | {}", outcome.line, view.status, condition);
            }
            BatchRowOutcome::Rejected { reason } => {
                println!("  line {:>4}: rejected ({reason})", outcome.line);
            }
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(value).map_err(std::io::Error::other)?;
    println!("{rendered}");
    Ok(())
}
