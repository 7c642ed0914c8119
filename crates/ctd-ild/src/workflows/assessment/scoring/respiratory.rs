use serde::Serialize;

use crate::workflows::assessment::forms::{RespiratoryEvolution, RespiratoryForm, RespiratoryOnset};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RespiratoryAnalysis {
    pub severity: Vec<&'static str>,
    pub urgency: Vec<&'static str>,
    pub mmrc: Option<u8>,
    pub onset: Option<RespiratoryOnset>,
    pub evolution: Option<RespiratoryEvolution>,
}

pub fn evaluate(form: &RespiratoryForm) -> RespiratoryAnalysis {
    let mut analysis = RespiratoryAnalysis {
        mmrc: form.mmrc,
        onset: form.onset,
        evolution: form.evolution,
        ..RespiratoryAnalysis::default()
    };

    if form.mmrc.is_some_and(|grade| grade >= 3) {
        analysis
            .severity
            .push("Dyspnée sévère (mMRC ≥3) - ILD symptomatique");
    }
    if form.onset == Some(RespiratoryOnset::Recent)
        && form.evolution == Some(RespiratoryEvolution::RapidlyProgressive)
    {
        analysis.urgency.push(
            "⚠️ ÉVOLUTION RAPIDEMENT PROGRESSIVE - Bilan urgent, traitement d'exception à discuter",
        );
    }
    if form.mtx_exposure {
        analysis
            .urgency
            .push("Exposition MTX récente - Éliminer pneumopathie médicamenteuse");
    }

    analysis
}
