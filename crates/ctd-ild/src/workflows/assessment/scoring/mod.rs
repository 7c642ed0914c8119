//! Deterministic scoring rules, one pure function per wizard phase.
//!
//! Each `evaluate` takes the answers of its own section plus whatever prior
//! results it depends on, and never fails: missing or unparsable answers
//! simply contribute nothing.

pub mod anamnesis;
pub mod biology;
pub mod clinical;
pub mod correlation;
pub mod essential_tests;
pub mod final_diagnosis;
pub mod follow_up;
pub mod imaging;
pub mod immunology;
pub mod respiratory;
pub mod treatment;

#[cfg(test)]
mod tests;

pub use anamnesis::AnamnesisAnalysis;
pub use biology::StandardBioAnalysis;
pub use clinical::ClinicalAnalysis;
pub use correlation::{
    CorrelationAnalysis, SignificantDiagnosis, CORRELATION_CAP, SIGNIFICANCE_THRESHOLD,
};
pub use essential_tests::{
    EssentialTestCatalog, EssentialTestEntry, EssentialTestEvaluation, EssentialTestResult,
};
pub use final_diagnosis::{ClassificationPrognosis, FinalDiagnosis, FinalDiagnosisInputs};
pub use follow_up::{FollowUpPlan, ScheduleEntry};
pub use imaging::{Biomarker, BiomarkerClass, ImagingAnalysis};
pub use immunology::{AntibodyFinding, ImmunologyAnalysis};
pub use respiratory::RespiratoryAnalysis;
pub use treatment::{TreatmentPlan, TreatmentProtocol};
