use crate::infra::{effective_report_config, emit_report, report_date, warn_skipped};
use chrono::NaiveDate;
use clap::Args;
use ctd_ild::config::{ReportConfig, ReportFormat};
use ctd_ild::error::AppError;
use ctd_ild::workflows::assessment::reference::pattern_details;
use ctd_ild::workflows::assessment::{
    AssessmentBlueprint, AssessmentReport, AssessmentSession, HrctPattern, SectionId,
};
use ctd_ild::workflows::intake::{AnswerImporter, ImportedAnswers};
use std::io::Cursor;
use std::path::PathBuf;

/// Synthetic dermatomyositis patient with anti-MDA5 rapidly progressive ILD.
const DEMO_ANSWERS: &str = "section,field,value
anamnese,age,52
anamnese,sexe,F
anamnese,tabac,never
anamnese,delaiEvolution,subaigu
clinical,muscleWeakness,oui
clinical,gottron,oui
clinical,heliotrope,oui
clinical,dyspnea,oui
clinical,dryCough,oui
clinical,crackles,oui
clinical,fever,oui
standard-bio,cpk,1450
standard-bio,ferritin,1800
standard-bio,ldh,520
standard-bio,crp,24
targeted-immuno,antiMDA5,positive
respiratory,mmrcDyspnea,3
respiratory,coughType,dry
respiratory,respiratoryOnset,recent
respiratory,respiratoryEvolution,rapidly-progressive
imaging,fvc,58
imaging,dlco,38
imaging,spo2,91
imaging,extension,35
imaging,groundGlass,oui
imaging,consolidations,oui
imaging,lowerPredominant,oui
patterns,selectedPattern,OP
correlation,PMDM,oui
essential-tests,PMDM-essential-0,oui
essential-tests,PMDM-essential-1,oui
essential-tests,PMDM-essential-2,oui
essential-tests,PMDM-essential-3,oui
treatment-plan,ildSeverity,rp-ild
treatment-plan,diseaseProgression,rapidly_progressive
treatment-plan,hypoxemia,oui
treatment-plan,antiMda5Positive,oui
treatment-plan,rpILD,oui
follow-up,treatmentPhase,initiation
";

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// CSV file with `section,field,value` answer rows
    #[arg(long)]
    pub(crate) answers: PathBuf,
    /// Report date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) date: Option<NaiveDate>,
    /// Output format, overriding CTD_REPORT_FORMAT
    #[arg(long, value_parser = crate::infra::parse_report_format)]
    pub(crate) format: Option<ReportFormat>,
    /// Author line printed in the report header, overriding CTD_REPORT_AUTHOR
    #[arg(long)]
    pub(crate) author: Option<String>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Report date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) date: Option<NaiveDate>,
    /// Output format, overriding CTD_REPORT_FORMAT
    #[arg(long, value_parser = crate::infra::parse_report_format)]
    pub(crate) format: Option<ReportFormat>,
}

pub(crate) fn run_report(args: ReportArgs, config: &ReportConfig) -> Result<(), AppError> {
    let ReportArgs {
        answers,
        date,
        format,
        author,
    } = args;

    let settings = effective_report_config(config, format, author);
    let imported = AnswerImporter::from_path(&answers)?;
    warn_skipped(&imported);

    let (session, reached) = run_session(imported);
    if reached != SectionId::Report {
        eprintln!("warning: assessment stopped at section `{reached}`; the report is partial");
    }

    let report = AssessmentReport::assemble(&session, report_date(date))
        .with_author(settings.author.as_deref());
    emit_report(&report, settings.format)
}

pub(crate) fn run_demo(args: DemoArgs, config: &ReportConfig) -> Result<(), AppError> {
    let DemoArgs { date, format } = args;
    let settings = effective_report_config(config, format, None);

    let imported = AnswerImporter::from_reader(Cursor::new(DEMO_ANSWERS))?;
    let (session, _) = run_session(imported);

    if settings.format == ReportFormat::Text {
        println!("CTD-ILD assessment demo (synthetic patient)");
        for entry in session.controller().progress() {
            println!(
                "- Phase {} ({}): {} [{}]",
                entry.phase, entry.phase_label, entry.title, entry.status_label
            );
        }
        if let Some(analysis) = session.results().correlation() {
            println!("Significant diagnoses:");
            for candidate in &analysis.significant {
                println!("  - {} ({}%)", candidate.name, candidate.score);
            }
        }
        println!();
    }

    let report = AssessmentReport::assemble(&session, report_date(date))
        .with_author(settings.author.as_deref());
    emit_report(&report, settings.format)
}

pub(crate) fn run_phases() {
    let blueprint = AssessmentBlueprint::standard();
    for step in blueprint.steps() {
        println!("Phase {} - {}: {}", step.id, step.phase, step.title);
        for section in blueprint.sections_for_phase(step.id) {
            if let Some(item) = blueprint.nav_item(section) {
                println!("  - {} ({})", item.label, section);
            }
        }
    }
}

pub(crate) fn run_patterns() {
    for pattern in HrctPattern::ordered() {
        let details = pattern_details(pattern);
        println!("{} - {}", pattern, details.name);
        println!("  {}", details.description);
        println!("  Critères :");
        for criterion in details.criteria {
            println!("    - {criterion}");
        }
        println!("  Associations : {}", details.associations.join(", "));
        println!();
    }
}

fn run_session(imported: ImportedAnswers) -> (AssessmentSession, SectionId) {
    let mut session = AssessmentSession::with_forms(imported.forms);
    let reached = session.run_all();
    (session, reached)
}
