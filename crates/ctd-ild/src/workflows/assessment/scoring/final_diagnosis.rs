use serde::Serialize;

use super::correlation::CorrelationAnalysis;
use super::essential_tests::EssentialTestEvaluation;
use super::imaging::ImagingAnalysis;
use super::immunology::{AntibodyFinding, ImmunologyAnalysis};
use crate::workflows::assessment::domain::{CtdCode, HrctPattern, Likelihood};

/// Prior results the final diagnosis depends on.
#[derive(Debug, Clone, Copy, Default)]
pub struct FinalDiagnosisInputs<'a> {
    pub evaluation: Option<&'a EssentialTestEvaluation>,
    pub correlation: Option<&'a CorrelationAnalysis>,
    pub imaging: Option<&'a ImagingAnalysis>,
    pub immunology: Option<&'a ImmunologyAnalysis>,
    pub pattern: Option<HrctPattern>,
    pub clinical_analysed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationPrognosis {
    pub severity: &'static str,
    pub prognosis: &'static str,
    pub extension: Option<f64>,
    pub fvc: Option<f64>,
    pub dlco: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalDiagnosis {
    pub code: CtdCode,
    pub name: &'static str,
    pub score: u32,
    pub pattern: Option<HrctPattern>,
    pub confidence: Likelihood,
    pub arguments: Vec<String>,
    pub classification: ClassificationPrognosis,
}

struct Retained {
    code: CtdCode,
    score: u32,
    likelihood: Likelihood,
}

/// Best checklist result: Faible is never retained, Forte outranks
/// Modérée, and the first code in fixed order wins on equal scores.
fn retain_from_evaluation(evaluation: &EssentialTestEvaluation) -> Option<Retained> {
    let mut best: Option<Retained> = None;
    let mut max_score = 0;

    for code in CtdCode::ordered() {
        let Some(result) = evaluation.get(code) else {
            continue;
        };
        if result.likelihood == Likelihood::Faible {
            continue;
        }
        let adjusted = result.percentage + result.likelihood.ranking_bonus();
        if adjusted > max_score {
            max_score = adjusted;
            best = Some(Retained {
                code,
                score: result.percentage,
                likelihood: result.likelihood,
            });
        }
    }

    best
}

fn fallback(correlation: Option<&CorrelationAnalysis>) -> Retained {
    match correlation.and_then(|correlation| correlation.significant.first()) {
        Some(candidate) => Retained {
            code: candidate.code,
            score: candidate.score,
            likelihood: Likelihood::Moderee,
        },
        None => Retained {
            code: CtdCode::Ipaf,
            score: 0,
            likelihood: Likelihood::Moderee,
        },
    }
}

fn severity_and_prognosis(
    fvc: Option<f64>,
    extension: Option<f64>,
) -> (&'static str, &'static str) {
    match (fvc, extension) {
        (Some(fvc), Some(extension)) if fvc < 50.0 || extension > 50.0 => ("Sévère", "Réservé"),
        (Some(fvc), Some(extension)) if fvc < 70.0 || extension > 20.0 => {
            ("Étendue", "Intermédiaire")
        }
        (Some(_), Some(_)) => ("Limitée", "Favorable"),
        _ => ("Non évaluée", "À déterminer"),
    }
}

pub fn evaluate(inputs: FinalDiagnosisInputs<'_>) -> FinalDiagnosis {
    let retained = inputs
        .evaluation
        .and_then(retain_from_evaluation)
        .unwrap_or_else(|| fallback(inputs.correlation));

    let fvc = inputs.imaging.and_then(|imaging| imaging.fvc);
    let dlco = inputs.imaging.and_then(|imaging| imaging.dlco);
    let extension = inputs.imaging.and_then(|imaging| imaging.extension);

    let anti_mda5 = inputs
        .immunology
        .is_some_and(|immunology| immunology.has(AntibodyFinding::AntiMda5Dermatomyositis));

    let (severity, mut prognosis) = severity_and_prognosis(fvc, extension);
    if inputs.pattern == Some(HrctPattern::Uip) {
        prognosis = "Sombre (pattern UIP)";
    } else if retained.code == CtdCode::Pmdm && anti_mda5 {
        prognosis = "Réservé (Anti-MDA5+)";
    }

    let mut arguments = Vec::new();
    if inputs.clinical_analysed {
        arguments.push("Signes cliniques compatibles".to_string());
    }
    if inputs
        .immunology
        .is_some_and(ImmunologyAnalysis::has_confirmed_diagnoses)
    {
        arguments.push("Anticorps spécifiques positifs".to_string());
    }
    if let Some(pattern) = inputs.pattern {
        arguments.push(format!("Pattern HRCT : {pattern}"));
    }
    if fvc.is_some() || dlco.is_some() {
        arguments.push("Atteinte fonctionnelle respiratoire documentée".to_string());
    }

    FinalDiagnosis {
        code: retained.code,
        name: retained.code.label(),
        score: retained.score,
        pattern: inputs.pattern,
        confidence: retained.likelihood,
        arguments,
        classification: ClassificationPrognosis {
            severity,
            prognosis,
            extension,
            fvc,
            dlco,
        },
    }
}
