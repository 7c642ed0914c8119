use chrono::NaiveDate;
use serde::Serialize;

use super::super::results::AnalysisResults;
use super::super::scoring::{FinalDiagnosis, FollowUpPlan, TreatmentPlan};
use super::super::session::AssessmentSession;
use super::views::{
    DiagnosisView, FollowUpView, PulmonaryView, ReportBody, ReportContent, ReportHeader,
    ScheduleRowView, SynthesisView, TreatmentView,
};

pub(crate) const TITLE: &str = "RAPPORT MÉDICAL SPÉCIALISÉ";
pub(crate) const SUBTITLE: &str = "Connectivite avec Atteinte Pulmonaire Interstitielle";
pub(crate) const PENDING_MESSAGE: &str =
    "Le diagnostic final n'a pas encore été établi. Veuillez compléter les étapes précédentes.";
pub(crate) const FOOTER: [&str; 3] = [
    "Rapport généré par CTD-ILD Diagnostic Assistant.",
    "Ce rapport doit être interprété dans le contexte clinique global du patient.",
    "Adapté à partir du Guideline © 2021 de la Japanese Respiratory Society 2020 : Guide for the diagnosis and treatment of interstitial lung disease associated with connective tissue disease.",
];

const NOT_REPORTED: &str = "NR";

/// Printable synthesis of a session, built from whatever results exist.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentReport {
    pub header: ReportHeader,
    pub body: ReportBody,
    pub footer: Vec<&'static str>,
}

impl AssessmentReport {
    pub fn assemble(session: &AssessmentSession, date: NaiveDate) -> Self {
        let results = session.results();
        let body = match results.final_diagnosis() {
            Some(diagnosis) => ReportBody::Complete(Box::new(content(results, diagnosis))),
            None => ReportBody::Pending {
                message: PENDING_MESSAGE,
            },
        };

        Self {
            header: ReportHeader {
                title: TITLE,
                subtitle: SUBTITLE,
                date: date.format("%d/%m/%Y").to_string(),
                author: None,
            },
            body,
            footer: FOOTER.to_vec(),
        }
    }

    pub fn with_author(mut self, author: Option<&str>) -> Self {
        self.header.author = author
            .map(str::trim)
            .filter(|author| !author.is_empty())
            .map(str::to_string);
        self
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.body, ReportBody::Complete(_))
    }

    pub fn content(&self) -> Option<&ReportContent> {
        match &self.body {
            ReportBody::Complete(content) => Some(content.as_ref()),
            ReportBody::Pending { .. } => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn percent_label(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{value}%"),
        None => NOT_REPORTED.to_string(),
    }
}

fn content(results: &AnalysisResults, diagnosis: &FinalDiagnosis) -> ReportContent {
    let pattern = diagnosis.pattern.or(results.selected_pattern());
    let pattern_label = pattern
        .map(|pattern| pattern.code().to_string())
        .unwrap_or_else(|| "Non déterminé".to_string());

    let clinical_arguments = match results.anamnesis() {
        Some(anamnesis) if !anamnesis.suspicions.is_empty() => {
            anamnesis.suspicions.iter().map(|s| s.to_string()).collect()
        }
        _ => vec!["Données cliniques non détaillées.".to_string()],
    };
    let biological_arguments = match results.targeted_immuno() {
        Some(immunology) if immunology.has_confirmed_diagnoses() => immunology
            .confirmed_diagnoses
            .iter()
            .map(|d| d.to_string())
            .collect(),
        _ => vec!["Sérologie auto-immune non détaillée.".to_string()],
    };

    let imaging = results.imaging();
    let classification = &diagnosis.classification;
    let fvc = classification.fvc.or(imaging.and_then(|i| i.fvc));
    let dlco = classification.dlco.or(imaging.and_then(|i| i.dlco));
    let extension = classification.extension.or(imaging.and_then(|i| i.extension));

    ReportContent {
        diagnosis: DiagnosisView {
            code: diagnosis.code,
            diagnosis_label: format!("{}-ILD", diagnosis.name),
            score: diagnosis.score,
            pattern,
            pattern_label: pattern_label.clone(),
            confidence: diagnosis.confidence,
            confidence_label: diagnosis.confidence.label(),
        },
        synthesis: SynthesisView {
            clinical_arguments,
            biological_arguments,
            other_arguments: diagnosis.arguments.clone(),
        },
        pulmonary: PulmonaryView {
            pattern_label,
            fvc_label: percent_label(fvc),
            dlco_label: percent_label(dlco),
            extension_label: percent_label(extension),
            severity: classification.severity,
        },
        prognosis: classification.prognosis,
        treatment: results.treatment_plan().map(treatment_view),
        follow_up: results
            .follow_up_plan()
            .filter(|plan| !plan.is_empty())
            .map(follow_up_view),
    }
}

fn treatment_view(plan: &TreatmentPlan) -> TreatmentView {
    TreatmentView {
        protocol: plan.protocol,
        protocol_label: plan.protocol.label(),
        headline: format!("{} ({})", plan.first_line, plan.urgency),
        urgent: plan.is_urgent(),
        medications: plan.medications.clone(),
        monitoring: plan.monitoring.clone(),
        second_line: plan.second_line,
        notes: plan.notes.clone(),
    }
}

fn follow_up_view(plan: &FollowUpPlan) -> FollowUpView {
    FollowUpView {
        phase: plan.phase,
        phase_label: plan.phase.map(|phase| phase.label()),
        schedule: plan
            .schedule
            .iter()
            .map(|entry| ScheduleRowView {
                parameter_label: entry.parameter_label(),
                frequency: entry.frequency,
            })
            .collect(),
        alerts: plan.alerts.clone(),
        objectives: plan.objectives.clone(),
    }
}
