use serde::Serialize;

use super::super::domain::{CtdCode, HrctPattern, Likelihood};
use super::super::forms::TreatmentPhase;
use super::super::scoring::TreatmentProtocol;

#[derive(Debug, Clone, Serialize)]
pub struct ReportHeader {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub date: String,
    pub author: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DiagnosisView {
    pub code: CtdCode,
    pub diagnosis_label: String,
    pub score: u32,
    pub pattern: Option<HrctPattern>,
    pub pattern_label: String,
    pub confidence: Likelihood,
    pub confidence_label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct SynthesisView {
    pub clinical_arguments: Vec<String>,
    pub biological_arguments: Vec<String>,
    pub other_arguments: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PulmonaryView {
    pub pattern_label: String,
    pub fvc_label: String,
    pub dlco_label: String,
    pub extension_label: String,
    pub severity: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct TreatmentView {
    pub protocol: TreatmentProtocol,
    pub protocol_label: &'static str,
    pub headline: String,
    pub urgent: bool,
    pub medications: Vec<&'static str>,
    pub monitoring: Vec<&'static str>,
    pub second_line: Option<&'static str>,
    pub notes: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScheduleRowView {
    pub parameter_label: String,
    pub frequency: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct FollowUpView {
    pub phase: Option<TreatmentPhase>,
    pub phase_label: Option<&'static str>,
    pub schedule: Vec<ScheduleRowView>,
    pub alerts: Vec<&'static str>,
    pub objectives: Vec<&'static str>,
}

/// Everything below the header once a final diagnosis exists.
#[derive(Debug, Clone, Serialize)]
pub struct ReportContent {
    pub diagnosis: DiagnosisView,
    pub synthesis: SynthesisView,
    pub pulmonary: PulmonaryView,
    pub prognosis: &'static str,
    pub treatment: Option<TreatmentView>,
    pub follow_up: Option<FollowUpView>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReportBody {
    Pending { message: &'static str },
    Complete(Box<ReportContent>),
}
