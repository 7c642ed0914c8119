mod blueprint;
mod controller;
pub mod domain;
pub mod forms;
pub mod reference;
pub mod report;
mod results;
pub mod scoring;
mod selection;
mod session;

pub use blueprint::{AssessmentBlueprint, NavItem, PhaseStep};
pub use controller::{PhaseController, PhaseProgressEntry, PhaseState, PhaseStatus};
pub use domain::{CtdCode, CtdScores, HrctPattern, Likelihood, PhaseId, SectionId};
pub use forms::{FormData, FormError, SectionAnswers};
pub use report::AssessmentReport;
pub use results::AnalysisResults;
pub use selection::{CandidateOption, CandidateSelector, SelectedDiagnosis};
pub use session::AssessmentSession;
