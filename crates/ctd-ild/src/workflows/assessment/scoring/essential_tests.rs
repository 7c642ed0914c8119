use serde::Serialize;

use crate::workflows::assessment::domain::{CtdCode, Likelihood};
use crate::workflows::assessment::forms::EssentialTestMarks;
use crate::workflows::assessment::reference::{essential_tests_for, EssentialTestSpec};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EssentialTestEntry {
    pub code: CtdCode,
    pub name: &'static str,
    pub essential: Vec<&'static str>,
    pub optional: Vec<&'static str>,
    pub criteria: &'static str,
}

impl From<&EssentialTestSpec> for EssentialTestEntry {
    fn from(spec: &EssentialTestSpec) -> Self {
        Self {
            code: spec.code,
            name: spec.code.label(),
            essential: spec.essential.to_vec(),
            optional: spec.optional.to_vec(),
            criteria: spec.criteria,
        }
    }
}

/// Confirmatory checklists for the selected candidate diagnoses, kept in
/// the fixed code order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EssentialTestCatalog {
    entries: Vec<EssentialTestEntry>,
}

impl EssentialTestCatalog {
    pub fn new(mut entries: Vec<EssentialTestEntry>) -> Self {
        entries.sort_by_key(|entry| entry.code);
        entries.dedup_by_key(|entry| entry.code);
        Self { entries }
    }

    /// Builds the catalog from reference data. Codes without a checklist
    /// are left out.
    pub fn for_codes(codes: impl IntoIterator<Item = CtdCode>) -> Self {
        let entries = codes
            .into_iter()
            .filter_map(essential_tests_for)
            .map(EssentialTestEntry::from)
            .collect();
        Self::new(entries)
    }

    pub fn entries(&self) -> &[EssentialTestEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EssentialTestResult {
    pub code: CtdCode,
    pub name: &'static str,
    pub positive_tests: usize,
    pub total_tests: usize,
    pub percentage: u32,
    pub likelihood: Likelihood,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EssentialTestEvaluation {
    pub results: Vec<EssentialTestResult>,
}

impl EssentialTestEvaluation {
    pub fn get(&self, code: CtdCode) -> Option<&EssentialTestResult> {
        self.results.iter().find(|result| result.code == code)
    }
}

fn percentage(positive: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (positive as f64 / total as f64 * 100.0).round() as u32
}

fn likelihood(code: CtdCode, total: usize, percentage: u32) -> Likelihood {
    if total > 0 {
        Likelihood::from_percentage(percentage)
    } else if code == CtdCode::Ipaf {
        Likelihood::Moderee
    } else {
        Likelihood::Faible
    }
}

pub fn evaluate(catalog: &EssentialTestCatalog, marks: &EssentialTestMarks) -> EssentialTestEvaluation {
    let results = catalog
        .entries()
        .iter()
        .map(|entry| {
            let total_tests = entry.essential.len();
            let positive_tests = (0..total_tests)
                .filter(|index| marks.is_positive(entry.code, *index))
                .count();
            let percentage = percentage(positive_tests, total_tests);
            EssentialTestResult {
                code: entry.code,
                name: entry.name,
                positive_tests,
                total_tests,
                percentage,
                likelihood: likelihood(entry.code, total_tests, percentage),
            }
        })
        .collect();

    EssentialTestEvaluation { results }
}
