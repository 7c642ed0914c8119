use serde::Serialize;

use super::clinical::ClinicalAnalysis;
use super::immunology::{AntibodyFinding, ImmunologyAnalysis};
use crate::workflows::assessment::domain::{CtdCode, CtdScores, HrctPattern};

/// Upper bound applied to every correlation increment.
pub const CORRELATION_CAP: u32 = 95;
/// Minimum correlation score for a diagnosis to be proposed as a candidate.
pub const SIGNIFICANCE_THRESHOLD: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SignificantDiagnosis {
    pub code: CtdCode,
    pub name: &'static str,
    pub score: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CorrelationAnalysis {
    pub scores: CtdScores,
    /// Candidates at or above the threshold, highest score first.
    pub significant: Vec<SignificantDiagnosis>,
}

fn pattern_bonuses(pattern: HrctPattern, anti_mda5: bool) -> Vec<(CtdCode, u32)> {
    match pattern {
        HrctPattern::Uip => vec![(CtdCode::Ra, 25), (CtdCode::Ssc, 15)],
        HrctPattern::Fnsip => vec![(CtdCode::Ssc, 30), (CtdCode::Pmdm, 25)],
        HrctPattern::Op => vec![(CtdCode::Ra, 20), (CtdCode::Sle, 15)],
        HrctPattern::Lip => vec![(CtdCode::Ss, 35)],
        HrctPattern::Fop => vec![(CtdCode::Pmdm, 30)],
        HrctPattern::Dad if anti_mda5 => vec![(CtdCode::Pmdm, 35), (CtdCode::Sle, 20)],
        HrctPattern::Dad => vec![(CtdCode::Sle, 20)],
    }
}

/// Radio-clinical correlation. Missing inputs contribute nothing.
pub fn evaluate(
    clinical: Option<&ClinicalAnalysis>,
    immunology: Option<&ImmunologyAnalysis>,
    pattern: Option<HrctPattern>,
) -> CorrelationAnalysis {
    let mut scores = CtdScores::default();

    if let Some(clinical) = clinical {
        for (code, score) in clinical.ctd_suspicions.entries() {
            scores.add_capped(code, score, CORRELATION_CAP);
        }
    }

    if let Some(immunology) = immunology {
        for finding in &immunology.findings {
            let (code, bonus) = finding.correlation_bonus();
            scores.add_capped(code, bonus, CORRELATION_CAP);
        }
    }

    if let Some(pattern) = pattern {
        let anti_mda5 = immunology
            .is_some_and(|immunology| immunology.has(AntibodyFinding::AntiMda5Dermatomyositis));
        for (code, bonus) in pattern_bonuses(pattern, anti_mda5) {
            scores.add_capped(code, bonus, CORRELATION_CAP);
        }
    }

    let mut significant: Vec<SignificantDiagnosis> = scores
        .entries()
        .filter(|(_, score)| *score >= SIGNIFICANCE_THRESHOLD)
        .map(|(code, score)| SignificantDiagnosis {
            code,
            name: code.label(),
            score,
        })
        .collect();
    // stable: ties keep the fixed code order
    significant.sort_by(|left, right| right.score.cmp(&left.score));

    CorrelationAnalysis {
        scores,
        significant,
    }
}
