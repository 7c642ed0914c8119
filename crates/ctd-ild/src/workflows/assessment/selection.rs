use std::collections::BTreeSet;

use serde::Serialize;

use super::domain::CtdCode;
use super::scoring::{CorrelationAnalysis, SignificantDiagnosis};

/// Diagnosis retained for the confirmatory checklist step. IPAF carries no
/// correlation score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectedDiagnosis {
    pub code: CtdCode,
    pub name: &'static str,
    pub score: Option<u32>,
}

impl SelectedDiagnosis {
    pub fn score_label(&self) -> String {
        match self.score {
            Some(score) => format!("{score}%"),
            None => "N/A".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateOption {
    pub code: CtdCode,
    pub label: String,
    pub checked: bool,
}

/// Checkbox list offered after correlation: every significant diagnosis in
/// ranked order, then IPAF.
#[derive(Debug, Clone, Default)]
pub struct CandidateSelector {
    candidates: Vec<SignificantDiagnosis>,
    checked: BTreeSet<CtdCode>,
}

impl CandidateSelector {
    pub fn new(correlation: &CorrelationAnalysis) -> Self {
        Self {
            candidates: correlation.significant.clone(),
            checked: BTreeSet::new(),
        }
    }

    pub fn is_candidate(&self, code: CtdCode) -> bool {
        code == CtdCode::Ipaf || self.candidates.iter().any(|c| c.code == code)
    }

    /// Flips a checkbox. Codes that are not offered are ignored.
    pub fn toggle(&mut self, code: CtdCode) {
        if !self.is_candidate(code) {
            return;
        }
        if !self.checked.remove(&code) {
            self.checked.insert(code);
        }
    }

    pub fn set_checked(&mut self, code: CtdCode, checked: bool) {
        if !self.is_candidate(code) {
            return;
        }
        if checked {
            self.checked.insert(code);
        } else {
            self.checked.remove(&code);
        }
    }

    pub fn options(&self) -> Vec<CandidateOption> {
        let ranked = self.candidates.iter().map(|candidate| CandidateOption {
            code: candidate.code,
            label: format!("{} ({}%)", candidate.name, candidate.score),
            checked: self.checked.contains(&candidate.code),
        });
        let ipaf = CandidateOption {
            code: CtdCode::Ipaf,
            label: format!("{} (si critères CTD non remplis)", CtdCode::Ipaf.label()),
            checked: self.checked.contains(&CtdCode::Ipaf),
        };
        ranked.chain(std::iter::once(ipaf)).collect()
    }

    /// Checked candidates, significant ones in ranked order followed by IPAF.
    pub fn confirm(&self) -> Vec<SelectedDiagnosis> {
        let mut selected: Vec<SelectedDiagnosis> = self
            .candidates
            .iter()
            .filter(|candidate| self.checked.contains(&candidate.code))
            .map(|candidate| SelectedDiagnosis {
                code: candidate.code,
                name: candidate.name,
                score: Some(candidate.score),
            })
            .collect();
        if self.checked.contains(&CtdCode::Ipaf) {
            selected.push(SelectedDiagnosis {
                code: CtdCode::Ipaf,
                name: CtdCode::Ipaf.label(),
                score: None,
            });
        }
        selected
    }
}
