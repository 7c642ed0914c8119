use serde::Serialize;

use crate::workflows::assessment::forms::{AnamnesisForm, EvolutionDelay, Sex};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnamnesisAnalysis {
    pub risk_factors: Vec<&'static str>,
    pub suspicions: Vec<&'static str>,
}

pub fn evaluate(form: &AnamnesisForm) -> AnamnesisAnalysis {
    let mut analysis = AnamnesisAnalysis::default();

    if form.age.is_some_and(|age| age > 60.0) {
        analysis
            .risk_factors
            .push("Âge > 60 ans (facteur de risque CTD-ILD)");
    }
    if form.sex == Some(Sex::Male) {
        analysis
            .risk_factors
            .push("Sexe masculin (risque accru RA-ILD, SSc-ILD)");
    }

    match form.evolution_delay {
        Some(EvolutionDelay::Acute) => analysis
            .suspicions
            .push("Évolution aiguë : suspecter Anti-MDA5+ DM, Lupus pneumonitis"),
        Some(EvolutionDelay::Chronic) => analysis
            .suspicions
            .push("Évolution chronique : orienter vers SSc-ILD, syndrome anti-synthétase"),
        Some(EvolutionDelay::Subacute) | None => {}
    }

    analysis
}
