use chrono::NaiveDate;
use ctd_ild::workflows::assessment::scoring::TreatmentProtocol;
use ctd_ild::workflows::assessment::{
    AssessmentReport, AssessmentSession, CtdCode, HrctPattern, Likelihood, PhaseStatus,
    SectionId,
};
use ctd_ild::workflows::intake::AnswerImporter;

const RHEUMATOID_UIP: &str = "section,field,value
clinical,arthritis,oui
clinical,morningStiffness,oui
imaging,fvc,65
imaging,dlco,50
imaging,extension,30
patterns,selectedPattern,UIP
correlation,RA,oui
essential-tests,RA-essential-0,oui
essential-tests,RA-essential-1,oui
essential-tests,RA-essential-2,oui
follow-up,treatmentPhase,stabilization
";

fn report_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 11, 18).expect("valid report date")
}

fn imported_session(csv: &str) -> AssessmentSession {
    let imported = AnswerImporter::from_reader(csv.as_bytes()).expect("import succeeds");
    assert!(imported.is_clean(), "unexpected skipped rows: {:?}", imported.skipped);
    AssessmentSession::with_forms(imported.forms)
}

#[test]
fn full_workflow_retains_rheumatoid_arthritis_with_uip() {
    let mut session = imported_session(RHEUMATOID_UIP);

    let reached = session.run_all();
    assert_eq!(reached, SectionId::Report);

    let results = session.results();
    let correlation = results.correlation().expect("correlation computed");
    assert_eq!(correlation.scores.get(CtdCode::Ra), 70);
    assert_eq!(correlation.scores.get(CtdCode::Ssc), 15);
    assert_eq!(correlation.scores.get(CtdCode::Sle), 15);
    assert_eq!(correlation.significant.len(), 1);
    assert_eq!(correlation.significant[0].code, CtdCode::Ra);

    let selected: Vec<_> = session.selected().iter().map(|s| s.code).collect();
    assert_eq!(selected, vec![CtdCode::Ra]);

    let diagnosis = results.final_diagnosis().expect("diagnosis retained");
    assert_eq!(diagnosis.code, CtdCode::Ra);
    assert_eq!(diagnosis.score, 75);
    assert_eq!(diagnosis.confidence, Likelihood::Forte);
    assert_eq!(diagnosis.pattern, Some(HrctPattern::Uip));
    assert_eq!(diagnosis.classification.severity, "Étendue");
    assert_eq!(diagnosis.classification.prognosis, "Sombre (pattern UIP)");

    let plan = results.treatment_plan().expect("treatment plan");
    assert_eq!(plan.protocol, TreatmentProtocol::RheumatoidArthritis);
    assert_eq!(plan.rule, "uip");

    let progress = session.controller().progress();
    assert_eq!(progress.len(), 10);
    assert!(progress[..9]
        .iter()
        .all(|entry| entry.status == PhaseStatus::Completed));
    assert_eq!(progress[9].status, PhaseStatus::Active);
}

#[test]
fn full_workflow_report_renders_every_block() {
    let mut session = imported_session(RHEUMATOID_UIP);
    session.run_all();

    let report = AssessmentReport::assemble(&session, report_date());
    assert!(report.is_complete());

    let text = report.render_text();
    assert!(text.contains("Date : 18/11/2024"));
    assert!(text.contains("Polyarthrite Rhumatoïde-ILD"));
    assert!(text.contains("Certitude diagnostique : Forte"));
    assert!(text.contains("CVF : 65%"));
    assert!(text.contains("DLCO : 50%"));
    assert!(text.contains("Pronostic global : Sombre (pattern UIP)"));
    assert!(text.contains("PR-UIP: Approche similaire à FPI, IS controversés."));
    assert!(text.contains("PROTOCOLE DE SURVEILLANCE"));

    let json: serde_json::Value =
        serde_json::from_str(&report.to_json().expect("serialises")).expect("valid json");
    assert_eq!(json["body"]["status"], "complete");
    assert_eq!(json["body"]["diagnosis"]["code"], "RA");
}

#[test]
fn workflow_stops_where_answers_run_out() {
    let mut session = imported_session("section,field,value\nclinical,arthritis,oui\n");

    let reached = session.run_all();

    assert_eq!(reached, SectionId::Patterns);
    assert!(session.results().correlation().is_none());
    assert!(session.results().final_diagnosis().is_none());
    let report = AssessmentReport::assemble(&session, report_date());
    assert!(!report.is_complete());
}

#[test]
fn locked_phases_cannot_be_opened_out_of_order() {
    let mut session = AssessmentSession::new();

    assert!(!session.select_section(SectionId::FinalDiagnosis));
    assert_eq!(session.controller().active_section(), SectionId::Anamnese);
    assert!(!session.select_section(SectionId::TargetedImmuno));
    assert!(session.select_section(SectionId::Clinical));
    assert_eq!(session.controller().active_section(), SectionId::Clinical);

    assert!(session.analyze(SectionId::Clinical));
    assert_eq!(session.next(SectionId::Clinical), Some(SectionId::StandardBio));
    assert!(session.controller().is_unlocked(2));
    assert!(session.select_section(SectionId::Anamnese));
    assert!(session.select_section(SectionId::StandardBio));
}

#[test]
fn empty_candidate_selection_blocks_the_third_phase() {
    let csv = "section,field,value
clinical,arthritis,oui
clinical,morningStiffness,oui
patterns,selectedPattern,OP
";
    let mut session = imported_session(csv);

    let reached = session.run_all();

    assert_eq!(reached, SectionId::Correlation);
    assert!(session.selected().is_empty());
    let options = session.selector().expect("selector built").options();
    assert!(options
        .iter()
        .any(|option| option.code == CtdCode::Ra && option.label.contains("(65%)")));
}
