use serde::Serialize;

use crate::workflows::assessment::forms::ImagingForm;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BiomarkerClass {
    High,
    Elevated,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Biomarker {
    pub label: String,
    pub class: BiomarkerClass,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImagingAnalysis {
    pub severity: Vec<&'static str>,
    pub biomarkers: Vec<Biomarker>,
    pub pattern_suggestion: Option<&'static str>,
    pub fvc: Option<f64>,
    pub dlco: Option<f64>,
    pub extension: Option<f64>,
}

pub fn evaluate(form: &ImagingForm) -> ImagingAnalysis {
    let mut analysis = ImagingAnalysis {
        fvc: form.fvc,
        dlco: form.dlco,
        extension: form.extension,
        ..ImagingAnalysis::default()
    };

    match form.fvc {
        Some(fvc) if fvc < 50.0 => analysis.severity.push("ILD sévère (CVF < 50%)"),
        Some(fvc) if fvc < 70.0 => analysis.severity.push("ILD étendue (CVF < 70%)"),
        _ => {}
    }
    if form.dlco.is_some_and(|dlco| dlco < 40.0) {
        analysis
            .severity
            .push("Atteinte sévère des échanges gazeux (DLCO < 40%)");
    }
    if form.extension.is_some_and(|extension| extension > 20.0) {
        analysis.severity.push("ILD étendue sur HRCT (> 20%)");
    }

    if let Some(kl6) = form.kl6 {
        let class = if kl6 > 1000.0 {
            Some(BiomarkerClass::High)
        } else if kl6 > 500.0 {
            Some(BiomarkerClass::Elevated)
        } else {
            None
        };
        if let Some(class) = class {
            analysis.biomarkers.push(Biomarker {
                label: format!("KL-6: {kl6} U/mL"),
                class,
            });
        }
    }

    analysis.pattern_suggestion = if form.honeycombing && form.subpleural_distribution {
        Some("UIP (rayon de miel + distribution sous-pleurale)")
    } else if form.ground_glass && form.subpleural_sparing {
        Some("f-NSIP (verre dépoli + épargne sous-pleurale)")
    } else if form.consolidations {
        Some("OP (condensations multiples)")
    } else if form.cysts {
        Some("LIP (kystes pathognomoniques)")
    } else {
        None
    };

    analysis
}
