use serde::Serialize;

use super::domain::{HrctPattern, SectionId};
use super::scoring::{
    AnamnesisAnalysis, ClinicalAnalysis, CorrelationAnalysis, EssentialTestCatalog,
    EssentialTestEvaluation, FinalDiagnosis, FollowUpPlan, ImagingAnalysis, ImmunologyAnalysis,
    RespiratoryAnalysis, StandardBioAnalysis, TreatmentPlan,
};

/// One slot per phase result. Slots are only ever filled or replaced by a
/// recomputation; nothing clears them during a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalysisResults {
    anamnesis: Option<AnamnesisAnalysis>,
    clinical: Option<ClinicalAnalysis>,
    standard_bio: Option<StandardBioAnalysis>,
    targeted_immuno: Option<ImmunologyAnalysis>,
    respiratory: Option<RespiratoryAnalysis>,
    imaging: Option<ImagingAnalysis>,
    selected_pattern: Option<HrctPattern>,
    correlation: Option<CorrelationAnalysis>,
    essential_tests_data: Option<EssentialTestCatalog>,
    essential_tests_evaluation: Option<EssentialTestEvaluation>,
    final_diagnosis: Option<FinalDiagnosis>,
    treatment_plan: Option<TreatmentPlan>,
    follow_up_plan: Option<FollowUpPlan>,
}

impl AnalysisResults {
    pub fn anamnesis(&self) -> Option<&AnamnesisAnalysis> {
        self.anamnesis.as_ref()
    }

    pub fn clinical(&self) -> Option<&ClinicalAnalysis> {
        self.clinical.as_ref()
    }

    pub fn standard_bio(&self) -> Option<&StandardBioAnalysis> {
        self.standard_bio.as_ref()
    }

    pub fn targeted_immuno(&self) -> Option<&ImmunologyAnalysis> {
        self.targeted_immuno.as_ref()
    }

    pub fn respiratory(&self) -> Option<&RespiratoryAnalysis> {
        self.respiratory.as_ref()
    }

    pub fn imaging(&self) -> Option<&ImagingAnalysis> {
        self.imaging.as_ref()
    }

    pub fn selected_pattern(&self) -> Option<HrctPattern> {
        self.selected_pattern
    }

    pub fn correlation(&self) -> Option<&CorrelationAnalysis> {
        self.correlation.as_ref()
    }

    pub fn essential_tests_data(&self) -> Option<&EssentialTestCatalog> {
        self.essential_tests_data.as_ref()
    }

    pub fn essential_tests_evaluation(&self) -> Option<&EssentialTestEvaluation> {
        self.essential_tests_evaluation.as_ref()
    }

    pub fn final_diagnosis(&self) -> Option<&FinalDiagnosis> {
        self.final_diagnosis.as_ref()
    }

    pub fn treatment_plan(&self) -> Option<&TreatmentPlan> {
        self.treatment_plan.as_ref()
    }

    pub fn follow_up_plan(&self) -> Option<&FollowUpPlan> {
        self.follow_up_plan.as_ref()
    }

    /// Whether the section's own result has been computed. Sections with no
    /// result of their own (the report) always count as done.
    pub fn has_result(&self, section: SectionId) -> bool {
        match section {
            SectionId::Anamnese => self.anamnesis.is_some(),
            SectionId::Clinical => self.clinical.is_some(),
            SectionId::StandardBio => self.standard_bio.is_some(),
            SectionId::TargetedImmuno => self.targeted_immuno.is_some(),
            SectionId::Respiratory => self.respiratory.is_some(),
            SectionId::Imaging => self.imaging.is_some(),
            SectionId::Patterns => self.selected_pattern.is_some(),
            SectionId::Correlation => self.correlation.is_some(),
            SectionId::EssentialTests => self.essential_tests_evaluation.is_some(),
            SectionId::FinalDiagnosis => self.final_diagnosis.is_some(),
            SectionId::TreatmentPlan => self.treatment_plan.is_some(),
            SectionId::FollowUp => self.follow_up_plan.is_some(),
            SectionId::Report => true,
        }
    }

    pub(crate) fn set_anamnesis(&mut self, value: AnamnesisAnalysis) {
        self.anamnesis = Some(value);
    }

    pub(crate) fn set_clinical(&mut self, value: ClinicalAnalysis) {
        self.clinical = Some(value);
    }

    pub(crate) fn set_standard_bio(&mut self, value: StandardBioAnalysis) {
        self.standard_bio = Some(value);
    }

    pub(crate) fn set_targeted_immuno(&mut self, value: ImmunologyAnalysis) {
        self.targeted_immuno = Some(value);
    }

    pub(crate) fn set_respiratory(&mut self, value: RespiratoryAnalysis) {
        self.respiratory = Some(value);
    }

    pub(crate) fn set_imaging(&mut self, value: ImagingAnalysis) {
        self.imaging = Some(value);
    }

    pub(crate) fn set_selected_pattern(&mut self, value: HrctPattern) {
        self.selected_pattern = Some(value);
    }

    pub(crate) fn set_correlation(&mut self, value: CorrelationAnalysis) {
        self.correlation = Some(value);
    }

    pub(crate) fn set_essential_tests_data(&mut self, value: EssentialTestCatalog) {
        self.essential_tests_data = Some(value);
    }

    pub(crate) fn set_essential_tests_evaluation(&mut self, value: EssentialTestEvaluation) {
        self.essential_tests_evaluation = Some(value);
    }

    pub(crate) fn set_final_diagnosis(&mut self, value: FinalDiagnosis) {
        self.final_diagnosis = Some(value);
    }

    pub(crate) fn set_treatment_plan(&mut self, value: TreatmentPlan) {
        self.treatment_plan = Some(value);
    }

    pub(crate) fn set_follow_up_plan(&mut self, value: FollowUpPlan) {
        self.follow_up_plan = Some(value);
    }
}
