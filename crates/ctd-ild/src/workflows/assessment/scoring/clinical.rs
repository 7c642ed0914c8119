use serde::Serialize;

use crate::workflows::assessment::domain::{CtdCode, CtdScores};
use crate::workflows::assessment::forms::ClinicalForm;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClinicalAnalysis {
    pub ctd_suspicions: CtdScores,
}

/// Additive clinical suspicion scores. Each sign contributes independently
/// and the totals are not capped.
pub fn evaluate(form: &ClinicalForm) -> ClinicalAnalysis {
    let mut scores = CtdScores::default();

    if form.arthritis {
        scores.add(CtdCode::Ra, 25);
        scores.add(CtdCode::Sle, 15);
    }
    if form.morning_stiffness {
        scores.add(CtdCode::Ra, 20);
    }
    if form.raynaud_present == Some(true) {
        scores.add(CtdCode::Ssc, 30);
        scores.add(CtdCode::Mctd, 25);
        scores.add(CtdCode::Pmdm, 10);
    }
    if form.sclerodactyly {
        scores.add(CtdCode::Ssc, 25);
    }
    if form.heliotrope || form.gottron {
        scores.add(CtdCode::Pmdm, 35);
    }
    if form.muscle_weakness {
        scores.add(CtdCode::Pmdm, 20);
    }
    if form.malar_rash || form.photosensitivity {
        scores.add(CtdCode::Sle, 25);
    }
    if form.dry_eyes || form.dry_mouth {
        scores.add(CtdCode::Ss, 30);
    }

    ClinicalAnalysis {
        ctd_suspicions: scores,
    }
}
