use tracing::{debug, info};

use super::controller::PhaseController;
use super::domain::{CtdCode, SectionId};
use super::forms::{FormData, FormError};
use super::results::AnalysisResults;
use super::scoring::{
    anamnesis, biology, clinical, correlation, essential_tests, final_diagnosis, follow_up,
    imaging, immunology, respiratory, treatment, EssentialTestCatalog, FinalDiagnosisInputs,
};
use super::selection::{CandidateSelector, SelectedDiagnosis};

/// One patient assessment: the answers, the computed results, the wizard
/// position and the candidate selection.
#[derive(Debug, Clone, Default)]
pub struct AssessmentSession {
    forms: FormData,
    results: AnalysisResults,
    controller: PhaseController,
    selector: Option<CandidateSelector>,
    selected: Vec<SelectedDiagnosis>,
}

impl AssessmentSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_forms(forms: FormData) -> Self {
        Self {
            forms,
            ..Self::default()
        }
    }

    pub fn forms(&self) -> &FormData {
        &self.forms
    }

    pub fn forms_mut(&mut self) -> &mut FormData {
        &mut self.forms
    }

    pub fn results(&self) -> &AnalysisResults {
        &self.results
    }

    pub fn controller(&self) -> &PhaseController {
        &self.controller
    }

    pub fn selector(&self) -> Option<&CandidateSelector> {
        self.selector.as_ref()
    }

    pub fn selected(&self) -> &[SelectedDiagnosis] {
        &self.selected
    }

    pub fn apply(&mut self, section: SectionId, field: &str, raw: &str) -> Result<(), FormError> {
        self.forms.apply(section, field, raw)
    }

    pub fn select_section(&mut self, section: SectionId) -> bool {
        self.controller.select_section(section)
    }

    /// Runs the scoring function of `section` against the current answers
    /// and stores its result. Returns `false` when the section has nothing
    /// to compute yet (no selected pattern, no final diagnosis for the
    /// treatment plan) or never computes anything (the report).
    pub fn analyze(&mut self, section: SectionId) -> bool {
        let forms = &self.forms;
        let results = &mut self.results;

        match section {
            SectionId::Anamnese => {
                let analysis = anamnesis::evaluate(&forms.anamnesis);
                debug!(
                    %section,
                    risk_factors = analysis.risk_factors.len(),
                    suspicions = analysis.suspicions.len(),
                    "section analysed"
                );
                results.set_anamnesis(analysis);
            }
            SectionId::Clinical => {
                let analysis = clinical::evaluate(&forms.clinical);
                debug!(%section, scores = ?analysis.ctd_suspicions, "section analysed");
                results.set_clinical(analysis);
            }
            SectionId::StandardBio => {
                let analysis = biology::evaluate(&forms.standard_bio);
                debug!(%section, orientations = analysis.orientations.len(), "section analysed");
                results.set_standard_bio(analysis);
            }
            SectionId::TargetedImmuno => {
                let analysis = immunology::evaluate(&forms.targeted_immuno);
                debug!(%section, findings = ?analysis.findings, "section analysed");
                results.set_targeted_immuno(analysis);
            }
            SectionId::Respiratory => {
                let analysis = respiratory::evaluate(&forms.respiratory);
                debug!(
                    %section,
                    severity = analysis.severity.len(),
                    urgency = analysis.urgency.len(),
                    "section analysed"
                );
                results.set_respiratory(analysis);
            }
            SectionId::Imaging => {
                let analysis = imaging::evaluate(&forms.imaging);
                debug!(
                    %section,
                    severity = analysis.severity.len(),
                    biomarkers = analysis.biomarkers.len(),
                    "section analysed"
                );
                results.set_imaging(analysis);
            }
            SectionId::Patterns => {
                let Some(pattern) = forms.patterns.selected_pattern else {
                    debug!(%section, "no HRCT pattern selected");
                    return false;
                };
                debug!(%section, %pattern, "section analysed");
                results.set_selected_pattern(pattern);
            }
            SectionId::Correlation => {
                let analysis = correlation::evaluate(
                    results.clinical(),
                    results.targeted_immuno(),
                    results.selected_pattern(),
                );
                let mut selector = CandidateSelector::new(&analysis);
                for code in &forms.correlation.checked {
                    selector.set_checked(*code, true);
                }
                // a previous confirmation is rechecked against the new candidates
                if !self.selected.is_empty() {
                    for previous in &self.selected {
                        selector.set_checked(previous.code, true);
                    }
                    self.selected = selector.confirm();
                    let catalog =
                        EssentialTestCatalog::for_codes(self.selected.iter().map(|s| s.code));
                    info!(
                        selected = self.selected.len(),
                        checklists = catalog.entries().len(),
                        "candidate selection reconfirmed"
                    );
                    results.set_essential_tests_data(catalog);
                }
                debug!(
                    %section,
                    significant = analysis.significant.len(),
                    "section analysed"
                );
                self.selector = Some(selector);
                results.set_correlation(analysis);
            }
            SectionId::EssentialTests => {
                let empty = EssentialTestCatalog::default();
                let catalog = results.essential_tests_data().unwrap_or(&empty);
                let evaluation = essential_tests::evaluate(catalog, &forms.essential_tests);
                debug!(%section, evaluated = evaluation.results.len(), "section analysed");
                results.set_essential_tests_evaluation(evaluation);
            }
            SectionId::FinalDiagnosis => {
                let diagnosis = final_diagnosis::evaluate(FinalDiagnosisInputs {
                    evaluation: results.essential_tests_evaluation(),
                    correlation: results.correlation(),
                    imaging: results.imaging(),
                    immunology: results.targeted_immuno(),
                    pattern: results.selected_pattern(),
                    clinical_analysed: results.clinical().is_some(),
                });
                info!(
                    %section,
                    code = %diagnosis.code,
                    confidence = diagnosis.confidence.label(),
                    "final diagnosis retained"
                );
                results.set_final_diagnosis(diagnosis);
            }
            SectionId::TreatmentPlan => {
                let Some(diagnosis) = results.final_diagnosis() else {
                    debug!(%section, "treatment plan needs a final diagnosis");
                    return false;
                };
                let plan = treatment::evaluate(diagnosis, &forms.treatment, results.selected_pattern());
                debug!(%section, rule = plan.rule, urgency = plan.urgency, "section analysed");
                results.set_treatment_plan(plan);
            }
            SectionId::FollowUp => {
                let plan = follow_up::evaluate(&forms.follow_up);
                debug!(%section, alerts = plan.alerts.len(), "section analysed");
                results.set_follow_up_plan(plan);
            }
            SectionId::Report => return false,
        }

        true
    }

    pub fn toggle_candidate(&mut self, code: CtdCode) {
        if let Some(selector) = self.selector.as_mut() {
            selector.toggle(code);
        }
    }

    /// Materialises the checked candidates and rebuilds the essential test
    /// catalog for them. Replaces any previous selection.
    pub fn confirm_candidates(&mut self) -> &[SelectedDiagnosis] {
        let Some(selector) = self.selector.as_ref() else {
            debug!("no candidate selection to confirm before correlation");
            return &self.selected;
        };
        self.selected = selector.confirm();
        let catalog = EssentialTestCatalog::for_codes(self.selected.iter().map(|s| s.code));
        info!(
            selected = self.selected.len(),
            checklists = catalog.entries().len(),
            "candidate diagnoses confirmed"
        );
        self.results.set_essential_tests_data(catalog);
        &self.selected
    }

    /// Whether the "next" action is available from `section`.
    pub fn can_advance(&self, section: SectionId) -> bool {
        match section {
            SectionId::Correlation => {
                self.results.correlation().is_some() && !self.selected.is_empty()
            }
            other => self.results.has_result(other),
        }
    }

    /// Advances past `section` once its result exists.
    pub fn next(&mut self, section: SectionId) -> Option<SectionId> {
        if !self.can_advance(section) {
            debug!(%section, "next blocked: section not analysed");
            return None;
        }
        self.controller.advance(section)
    }

    /// Walks every section from the start, analysing each one and confirming
    /// the candidates captured in the correlation answers. Stops at the
    /// report or at the first section that cannot be completed, and returns
    /// the section reached.
    pub fn run_all(&mut self) -> SectionId {
        self.controller.select_section(SectionId::Anamnese);
        loop {
            let section = self.controller.active_section();
            self.analyze(section);
            if section == SectionId::Correlation {
                self.confirm_candidates();
            }
            if self.next(section).is_none() {
                return self.controller.active_section();
            }
        }
    }
}
