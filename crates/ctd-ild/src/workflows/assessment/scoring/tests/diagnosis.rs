use super::common::*;
use crate::workflows::assessment::domain::{CtdCode, HrctPattern, Likelihood};
use crate::workflows::assessment::forms::{EssentialTestMarks, ImagingForm};
use crate::workflows::assessment::scoring::{
    correlation, essential_tests, final_diagnosis, imaging, EssentialTestCatalog,
    EssentialTestEntry, FinalDiagnosisInputs,
};

fn empty_entry(code: CtdCode) -> EssentialTestEntry {
    EssentialTestEntry {
        code,
        name: code.label(),
        essential: Vec::new(),
        optional: Vec::new(),
        criteria: "",
    }
}

#[test]
fn catalog_follows_fixed_code_order_and_skips_mctd() {
    let catalog = EssentialTestCatalog::for_codes([
        CtdCode::Ipaf,
        CtdCode::Ss,
        CtdCode::Mctd,
        CtdCode::Ra,
        CtdCode::Ra,
    ]);

    let codes: Vec<_> = catalog.entries().iter().map(|entry| entry.code).collect();
    assert_eq!(codes, vec![CtdCode::Ra, CtdCode::Ss, CtdCode::Ipaf]);
    assert_eq!(catalog.entries()[0].essential.len(), 4);
}

#[test]
fn essential_test_percentage_rounds_to_nearest() {
    let catalog = EssentialTestCatalog::for_codes([CtdCode::Ssc, CtdCode::Ra]);
    let mut marks = marks(CtdCode::Ssc, &[0, 2, 4, 6]);
    marks.mark(CtdCode::Ra, 1, true);

    let evaluation = essential_tests::evaluate(&catalog, &marks);

    let ssc = evaluation.get(CtdCode::Ssc).expect("ssc evaluated");
    assert_eq!((ssc.positive_tests, ssc.total_tests), (4, 7));
    assert_eq!(ssc.percentage, 57);
    assert_eq!(ssc.likelihood, Likelihood::Moderee);

    let ra = evaluation.get(CtdCode::Ra).expect("ra evaluated");
    assert_eq!(ra.percentage, 25);
    assert_eq!(ra.likelihood, Likelihood::Faible);
}

#[test]
fn empty_checklists_score_zero_and_only_ipaf_stays_moderate() {
    let catalog = EssentialTestCatalog::new(vec![empty_entry(CtdCode::Ipaf), empty_entry(CtdCode::Ss)]);

    let evaluation = essential_tests::evaluate(&catalog, &EssentialTestMarks::default());

    let ss = evaluation.get(CtdCode::Ss).expect("ss evaluated");
    assert_eq!((ss.percentage, ss.likelihood), (0, Likelihood::Faible));
    let ipaf = evaluation.get(CtdCode::Ipaf).expect("ipaf evaluated");
    assert_eq!((ipaf.percentage, ipaf.likelihood), (0, Likelihood::Moderee));
    assert_eq!(evaluation.results[0].code, CtdCode::Ss);
}

#[test]
fn no_positive_tests_is_faible_and_never_retained() {
    let catalog = EssentialTestCatalog::for_codes([CtdCode::Ra]);
    let evaluation = essential_tests::evaluate(&catalog, &EssentialTestMarks::default());

    let ra = evaluation.get(CtdCode::Ra).expect("ra evaluated");
    assert_eq!((ra.positive_tests, ra.total_tests), (0, 4));
    assert_eq!((ra.percentage, ra.likelihood), (0, Likelihood::Faible));

    let diagnosis = final_diagnosis::evaluate(FinalDiagnosisInputs {
        evaluation: Some(&evaluation),
        ..FinalDiagnosisInputs::default()
    });

    assert_eq!(diagnosis.code, CtdCode::Ipaf);
    assert_eq!(diagnosis.score, 0);
    assert_eq!(diagnosis.confidence, Likelihood::Moderee);
}

#[test]
fn forte_outranks_moderee_regardless_of_percentage() {
    let catalog = EssentialTestCatalog::for_codes([CtdCode::Ssc, CtdCode::Pmdm]);
    let mut marks = marks(CtdCode::Ssc, &[0, 1, 2]);
    marks.mark(CtdCode::Pmdm, 0, true);
    marks.mark(CtdCode::Pmdm, 1, true);
    marks.mark(CtdCode::Pmdm, 2, true);
    let evaluation = essential_tests::evaluate(&catalog, &marks);

    let diagnosis = final_diagnosis::evaluate(FinalDiagnosisInputs {
        evaluation: Some(&evaluation),
        ..FinalDiagnosisInputs::default()
    });

    // PMDM 3/4 = 75 Forte beats SSc 3/7 = 43 Modérée
    assert_eq!(diagnosis.code, CtdCode::Pmdm);
    assert_eq!(diagnosis.score, 75);
    assert_eq!(diagnosis.confidence, Likelihood::Forte);
    assert_eq!(diagnosis.name, "Polymyosite/Dermatomyosite");
}

#[test]
fn equal_adjusted_scores_keep_first_code() {
    let catalog = EssentialTestCatalog::for_codes([CtdCode::Ss, CtdCode::Ra]);
    let mut marks = marks(CtdCode::Ra, &[0, 1]);
    marks.mark(CtdCode::Ss, 2, true);
    marks.mark(CtdCode::Ss, 3, true);
    let evaluation = essential_tests::evaluate(&catalog, &marks);

    let diagnosis = final_diagnosis::evaluate(FinalDiagnosisInputs {
        evaluation: Some(&evaluation),
        ..FinalDiagnosisInputs::default()
    });

    assert_eq!(diagnosis.code, CtdCode::Ra);
    assert_eq!(diagnosis.confidence, Likelihood::Moderee);
}

#[test]
fn fallback_uses_top_correlation_candidate() {
    let clinical = clinical_analysis(&rheumatoid_form());
    let correlation = correlation::evaluate(Some(&clinical), None, None);

    let diagnosis = final_diagnosis::evaluate(FinalDiagnosisInputs {
        correlation: Some(&correlation),
        clinical_analysed: true,
        ..FinalDiagnosisInputs::default()
    });

    assert_eq!(diagnosis.code, CtdCode::Ra);
    assert_eq!(diagnosis.score, 45);
    assert_eq!(diagnosis.confidence, Likelihood::Moderee);
    assert_eq!(diagnosis.arguments, vec!["Signes cliniques compatibles"]);
}

#[test]
fn severe_function_gives_reserved_prognosis() {
    let imaging = imaging::evaluate(&ImagingForm {
        fvc: Some(45.0),
        extension: Some(60.0),
        ..ImagingForm::default()
    });

    let diagnosis = final_diagnosis::evaluate(FinalDiagnosisInputs {
        imaging: Some(&imaging),
        ..FinalDiagnosisInputs::default()
    });

    assert_eq!(diagnosis.classification.severity, "Sévère");
    assert_eq!(diagnosis.classification.prognosis, "Réservé");
    assert_eq!(
        diagnosis.arguments,
        vec!["Atteinte fonctionnelle respiratoire documentée"]
    );
}

#[test]
fn severity_grades_follow_fvc_and_extension() {
    let grade = |fvc: Option<f64>, extension: Option<f64>| {
        let imaging = imaging::evaluate(&ImagingForm {
            fvc,
            extension,
            ..ImagingForm::default()
        });
        let diagnosis = final_diagnosis::evaluate(FinalDiagnosisInputs {
            imaging: Some(&imaging),
            ..FinalDiagnosisInputs::default()
        });
        (
            diagnosis.classification.severity,
            diagnosis.classification.prognosis,
        )
    };

    assert_eq!(grade(Some(65.0), Some(10.0)), ("Étendue", "Intermédiaire"));
    assert_eq!(grade(Some(85.0), Some(30.0)), ("Étendue", "Intermédiaire"));
    assert_eq!(grade(Some(85.0), Some(10.0)), ("Limitée", "Favorable"));
    assert_eq!(grade(None, Some(60.0)), ("Non évaluée", "À déterminer"));
    assert_eq!(grade(Some(45.0), None), ("Non évaluée", "À déterminer"));
}

#[test]
fn uip_pattern_forces_dark_prognosis() {
    let imaging = imaging::evaluate(&ImagingForm {
        fvc: Some(85.0),
        extension: Some(5.0),
        ..ImagingForm::default()
    });

    let diagnosis = final_diagnosis::evaluate(FinalDiagnosisInputs {
        imaging: Some(&imaging),
        pattern: Some(HrctPattern::Uip),
        ..FinalDiagnosisInputs::default()
    });

    assert_eq!(diagnosis.classification.severity, "Limitée");
    assert_eq!(diagnosis.classification.prognosis, "Sombre (pattern UIP)");
    assert_eq!(
        diagnosis.arguments,
        vec![
            "Pattern HRCT : UIP",
            "Atteinte fonctionnelle respiratoire documentée"
        ]
    );
}

#[test]
fn anti_mda5_myositis_gets_reserved_prognosis() {
    let catalog = EssentialTestCatalog::for_codes([CtdCode::Pmdm]);
    let evaluation = essential_tests::evaluate(&catalog, &marks(CtdCode::Pmdm, &[0, 1, 2, 3]));
    let immunology = anti_mda5_immunology();

    let diagnosis = final_diagnosis::evaluate(FinalDiagnosisInputs {
        evaluation: Some(&evaluation),
        immunology: Some(&immunology),
        pattern: Some(HrctPattern::Fop),
        ..FinalDiagnosisInputs::default()
    });

    assert_eq!(diagnosis.code, CtdCode::Pmdm);
    assert_eq!(diagnosis.score, 100);
    assert_eq!(diagnosis.classification.prognosis, "Réservé (Anti-MDA5+)");
    assert_eq!(
        diagnosis.arguments,
        vec!["Anticorps spécifiques positifs", "Pattern HRCT : FOP"]
    );
}
