use crate::infra::InMemoryEvaluationStore;
use crate::routes::encode_csv;
use clap::Args;
use scieval::error::AppError;
use scieval::evaluation::{
    CategoryInputs, EvaluationRecord, EvaluationService, InnovationInputs, OutreachInputs, Period,
    ProjectInputs, RawSubmission, ResearchInputs, SubjectId, SupersedePolicy, WeightConfig,
};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Evaluation period used for the sample records
    #[arg(long, default_value = "2024")]
    pub(crate) period: String,
    /// Write the period report as CSV to this path
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ExportArgs {
    /// Evaluation period used for the sample records
    #[arg(long, default_value = "2024")]
    pub(crate) period: String,
    /// Destination file for the CSV report (stdout when omitted)
    #[arg(long)]
    pub(crate) out: Option<PathBuf>,
}

/// Evaluate the sample units and write the period report as CSV, to a
/// file or to stdout.
pub(crate) fn run_export(args: ExportArgs) -> Result<(), AppError> {
    let period = Period(args.period.clone());
    let store = Arc::new(InMemoryEvaluationStore::default());
    let service = EvaluationService::new(store);
    seed_sample_period(&service, &period, sample_weights())?;

    let rows = service.report_for_period(&period)?;
    let bytes = encode_csv(&rows).map_err(|err| AppError::Io(std::io::Error::other(err)))?;
    match args.out {
        Some(path) => {
            std::fs::write(&path, bytes)?;
            println!("{} rows written to {}", rows.len(), path.display());
        }
        None => std::io::stdout().write_all(&bytes)?,
    }

    Ok(())
}

/// Evaluate three sample units, supersede one of them with corrected
/// figures, and print the resulting report.
pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let period = Period(args.period.clone());
    let store = Arc::new(InMemoryEvaluationStore::default());
    let service = EvaluationService::new(store);
    let weights = sample_weights();

    println!("Scientific activity evaluation demo — period {period}");
    println!(
        "Weights: R {:.2}  P {:.2}  O {:.2}  I {:.2}",
        weights.research, weights.projects, weights.outreach, weights.innovation
    );
    println!();

    let (records, corrected) = seed_sample_period(&service, &period, weights)?;
    for record in &records {
        print_record(record);
    }
    println!("-- correction applied to {} --", corrected.subject);
    print_record(&corrected);

    let rows = service.report_for_period(&period)?;
    println!();
    println!("Report ({} rows):", rows.len());
    println!("subject,period,research,projects,outreach,innovation,index,status");
    for row in &rows {
        println!(
            "{},{},{:.3},{:.3},{:.3},{:.3},{:.3},{}",
            row.subject,
            row.period,
            row.research,
            row.projects,
            row.outreach,
            row.innovation,
            row.index,
            row.status
        );
    }

    if let Some(path) = args.csv {
        let bytes = encode_csv(&rows).map_err(|err| AppError::Io(std::io::Error::other(err)))?;
        std::fs::write(&path, bytes)?;
        println!();
        println!("Report written to {}", path.display());
    }

    Ok(())
}

/// Commit one final record per sample unit, then supersede the
/// institute's record with corrected figures. Returns the initial
/// records and the correction.
fn seed_sample_period(
    service: &EvaluationService<InMemoryEvaluationStore>,
    period: &Period,
    weights: WeightConfig,
) -> Result<(Vec<EvaluationRecord>, EvaluationRecord), AppError> {
    let mut records = Vec::new();
    for (subject, submission) in sample_submissions() {
        let record = service
            .evaluate(subject, period.clone(), submission, weights)
            .and_then(|draft| service.commit(draft, SupersedePolicy::Deny))?;
        records.push(record);
    }

    // A correction arrives for the institute: the original figures missed a
    // funded project, so the final record is superseded rather than edited.
    let corrected = service
        .evaluate(
            SubjectId("institute-a".to_string()),
            period.clone(),
            corrected_institute_submission(),
            weights,
        )
        .and_then(|draft| service.commit(draft, SupersedePolicy::Replace))?;

    Ok((records, corrected))
}

fn sample_weights() -> WeightConfig {
    WeightConfig {
        research: 0.4,
        projects: 0.3,
        outreach: 0.2,
        innovation: 0.1,
    }
}

fn print_record(record: &EvaluationRecord) {
    println!(
        "{} [{}] index {:.3} ({}) — strongest {}, weakest {}",
        record.subject,
        record.status.label(),
        record.index,
        record.level().label(),
        record
            .strongest_block()
            .map_or("-", |category| category.code()),
        record
            .weakest_block()
            .map_or("-", |category| category.code()),
    );
}

fn sample_submissions() -> Vec<(SubjectId, RawSubmission)> {
    vec![
        (
            SubjectId("institute-a".to_string()),
            RawSubmission {
                entries: vec![
                    CategoryInputs::Research(ResearchInputs {
                        publications: 14,
                        citations: 120,
                        degree_holder_share: 0.6,
                    }),
                    CategoryInputs::Projects(ProjectInputs {
                        active_projects: 3,
                        international_projects: 1,
                        funding_kusd: 180.0,
                    }),
                    CategoryInputs::Outreach(OutreachInputs {
                        awards: 2,
                        conferences_organized: 3,
                        supervised_students: 9,
                    }),
                    CategoryInputs::Innovation(InnovationInputs {
                        initiatives: 4,
                        patents: 2,
                        readiness_level: "pilot".to_string(),
                    }),
                ],
            },
        ),
        (
            SubjectId("institute-b".to_string()),
            RawSubmission {
                entries: vec![
                    CategoryInputs::Research(ResearchInputs {
                        publications: 6,
                        citations: 30,
                        degree_holder_share: 0.35,
                    }),
                    CategoryInputs::Projects(ProjectInputs {
                        active_projects: 1,
                        international_projects: 0,
                        funding_kusd: 40.0,
                    }),
                    CategoryInputs::Outreach(OutreachInputs {
                        awards: 0,
                        conferences_organized: 1,
                        supervised_students: 4,
                    }),
                    CategoryInputs::Innovation(InnovationInputs {
                        initiatives: 1,
                        patents: 0,
                        readiness_level: "prototype".to_string(),
                    }),
                ],
            },
        ),
        (
            SubjectId("lab-c".to_string()),
            RawSubmission {
                entries: vec![
                    CategoryInputs::Research(ResearchInputs {
                        publications: 22,
                        citations: 310,
                        degree_holder_share: 0.8,
                    }),
                    CategoryInputs::Projects(ProjectInputs {
                        active_projects: 6,
                        international_projects: 3,
                        funding_kusd: 420.0,
                    }),
                    CategoryInputs::Outreach(OutreachInputs {
                        awards: 4,
                        conferences_organized: 5,
                        supervised_students: 12,
                    }),
                    CategoryInputs::Innovation(InnovationInputs {
                        initiatives: 7,
                        patents: 5,
                        readiness_level: "market".to_string(),
                    }),
                ],
            },
        ),
    ]
}

fn corrected_institute_submission() -> RawSubmission {
    RawSubmission {
        entries: vec![
            CategoryInputs::Research(ResearchInputs {
                publications: 14,
                citations: 120,
                degree_holder_share: 0.6,
            }),
            CategoryInputs::Projects(ProjectInputs {
                active_projects: 4,
                international_projects: 2,
                funding_kusd: 260.0,
            }),
            CategoryInputs::Outreach(OutreachInputs {
                awards: 2,
                conferences_organized: 3,
                supervised_students: 9,
            }),
            CategoryInputs::Innovation(InnovationInputs {
                initiatives: 4,
                patents: 2,
                readiness_level: "pilot".to_string(),
            }),
        ],
    }
}
