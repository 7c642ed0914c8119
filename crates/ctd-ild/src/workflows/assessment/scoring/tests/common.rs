use crate::workflows::assessment::domain::{CtdCode, HrctPattern, Likelihood};
use crate::workflows::assessment::forms::{
    ClinicalForm, DiseaseProgression, EssentialTestMarks, IldSeverity, TargetedImmunoForm,
    TreatmentInputs,
};
use crate::workflows::assessment::reference::PrognosticFactor;
use crate::workflows::assessment::scoring::final_diagnosis::{
    ClassificationPrognosis, FinalDiagnosis,
};
use crate::workflows::assessment::scoring::{clinical, immunology};
use crate::workflows::assessment::scoring::{ClinicalAnalysis, ImmunologyAnalysis};

pub(super) fn rheumatoid_form() -> ClinicalForm {
    ClinicalForm {
        arthritis: true,
        morning_stiffness: true,
        ..ClinicalForm::default()
    }
}

pub(super) fn myositis_form() -> ClinicalForm {
    ClinicalForm {
        heliotrope: true,
        gottron: true,
        muscle_weakness: true,
        raynaud_present: Some(true),
        ..ClinicalForm::default()
    }
}

pub(super) fn clinical_analysis(form: &ClinicalForm) -> ClinicalAnalysis {
    clinical::evaluate(form)
}

pub(super) fn anti_mda5_immunology() -> ImmunologyAnalysis {
    immunology::evaluate(&TargetedImmunoForm {
        anti_mda5: true,
        ..TargetedImmunoForm::default()
    })
}

pub(super) fn scleroderma_immunology() -> ImmunologyAnalysis {
    immunology::evaluate(&TargetedImmunoForm {
        anti_scl70: true,
        anti_centromere: true,
        ..TargetedImmunoForm::default()
    })
}

pub(super) fn marks(code: CtdCode, positives: &[usize]) -> EssentialTestMarks {
    let mut marks = EssentialTestMarks::default();
    for index in positives {
        marks.mark(code, *index, true);
    }
    marks
}

pub(super) fn diagnosis(code: CtdCode, pattern: Option<HrctPattern>) -> FinalDiagnosis {
    FinalDiagnosis {
        code,
        name: code.label(),
        score: 75,
        pattern,
        confidence: Likelihood::Forte,
        arguments: Vec::new(),
        classification: ClassificationPrognosis {
            severity: "Non évaluée",
            prognosis: "À déterminer",
            extension: None,
            fvc: None,
            dlco: None,
        },
    }
}

pub(super) fn treatment_inputs(
    severity: Option<IldSeverity>,
    progression: Option<DiseaseProgression>,
    factors: &[PrognosticFactor],
) -> TreatmentInputs {
    TreatmentInputs {
        ild_severity: severity,
        disease_progression: progression,
        factors: factors.iter().copied().collect(),
        ..TreatmentInputs::default()
    }
}
