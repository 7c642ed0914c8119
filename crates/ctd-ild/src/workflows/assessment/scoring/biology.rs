use serde::Serialize;

use crate::workflows::assessment::forms::{AnaPattern, AnaTiter, SerologyResult, StandardBioForm};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StandardBioAnalysis {
    pub orientations: Vec<&'static str>,
    pub next_tests: Vec<&'static str>,
    pub ana_titer: Option<AnaTiter>,
    pub ana_pattern: Option<AnaPattern>,
}

impl StandardBioAnalysis {
    fn orient(&mut self, orientation: &'static str, next_tests: &'static str) {
        self.orientations.push(orientation);
        self.next_tests.push(next_tests);
    }
}

fn pattern_orientation(pattern: AnaPattern) -> (&'static str, &'static str) {
    match pattern {
        AnaPattern::Homogeneous => (
            "ANA homogène → Rechercher Anti-ADN natif, Anti-histones (SLE)",
            "Anti-ADN natif, Anti-Sm, Anti-SSA/SSB",
        ),
        AnaPattern::Speckled => (
            "ANA moucheté → Rechercher Anti-Sm, RNP, SSA/SSB",
            "Anti-Sm, Anti-RNP, Anti-SSA/SSB",
        ),
        AnaPattern::Nucleolar => (
            "ANA nucléolaire → Suspecter SSc, rechercher Anti-Scl70",
            "Anti-Scl70, Anti-PM-Scl, Anti-Th/To",
        ),
        AnaPattern::Centromere => (
            "ANA centromère → SSc limitée probable",
            "Anticentromère (confirmation), Capillaroscopie",
        ),
        AnaPattern::Cytoplasmic => (
            "ANA cytoplasmique → Suspecter myosite",
            "Anti-Jo1, Anti-PL7/PL12, Anti-MDA5",
        ),
    }
}

pub fn evaluate(form: &StandardBioForm) -> StandardBioAnalysis {
    let mut analysis = StandardBioAnalysis {
        ana_titer: form.ana_titer,
        ana_pattern: form.ana_pattern,
        ..StandardBioAnalysis::default()
    };

    let ana_positive = matches!(form.ana_titer, Some(titer) if titer != AnaTiter::Negative);
    if ana_positive {
        if let Some(pattern) = form.ana_pattern {
            let (orientation, next_tests) = pattern_orientation(pattern);
            analysis.orient(orientation, next_tests);
        }
    }

    let rf_positive = form.rf.is_some_and(|rf| rf > 20.0);
    let ccp_positive = form.anti_ccp.is_some_and(|ccp| ccp > 17.0);
    if rf_positive || ccp_positive {
        analysis.orient(
            "FR+ et/ou Anti-CCP+ → Polyarthrite rhumatoïde probable",
            "Bilan PR complet, Recherche RA-ILD",
        );
    }
    if form.cpk.is_some_and(|cpk| cpk > 200.0) {
        analysis.orient(
            "CPK élevées → Suspecter myosite",
            "Anti-Jo1, Anti-MDA5, Anti-Mi2, EMG, Biopsie musculaire",
        );
    }
    if form.anca_mpo == Some(SerologyResult::Positive) {
        analysis.orient(
            "MPO-ANCA+ → Vascularite ou ILD-ANCA+",
            "Bilan vascularite, Recherche atteinte rénale",
        );
    }

    analysis
}
