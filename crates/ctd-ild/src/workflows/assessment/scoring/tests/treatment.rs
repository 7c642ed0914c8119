use super::common::*;
use crate::workflows::assessment::domain::{CtdCode, HrctPattern};
use crate::workflows::assessment::forms::{DiseaseProgression, IldSeverity};
use crate::workflows::assessment::reference::PrognosticFactor;
use crate::workflows::assessment::scoring::treatment::{self, TreatmentProtocol};

#[test]
fn anti_mda5_rapid_myositis_triggers_triple_therapy() {
    let diagnosis = diagnosis(CtdCode::Pmdm, Some(HrctPattern::Dad));
    let inputs = treatment_inputs(
        Some(IldSeverity::RpIld),
        None,
        &[PrognosticFactor::AntiMda5Positive],
    );

    let plan = treatment::evaluate(&diagnosis, &inputs, diagnosis.pattern);

    assert_eq!(plan.protocol, TreatmentProtocol::Myositis);
    assert_eq!(plan.rule, "rp_ild_anti_mda5");
    assert_eq!(plan.urgency, "🚨 URGENCE VITALE");
    assert!(plan.is_urgent());
    assert_eq!(plan.medications.len(), 4);
    assert_eq!(plan.monitoring.len(), 3);
    assert!(plan.second_line.is_some());
    assert!(plan
        .notes
        .iter()
        .all(|note| !note.starts_with("PM/DM-ILD: Algorithme")));
}

#[test]
fn severe_myositis_without_anti_mda5_is_urgent_but_not_vital() {
    let diagnosis = diagnosis(CtdCode::Pmdm, None);
    let inputs = treatment_inputs(Some(IldSeverity::Severe), None, &[]);

    let plan = treatment::evaluate(&diagnosis, &inputs, None);

    assert_eq!(plan.rule, "acute_or_severe");
    assert_eq!(plan.urgency, "Traitement urgent");
    assert!(!plan.is_urgent());
    assert_eq!(plan.notes.len(), 1);
}

#[test]
fn chronic_anti_synthetase_myositis_adds_maintenance_note() {
    let diagnosis = diagnosis(CtdCode::Pmdm, Some(HrctPattern::Fnsip));
    let inputs = treatment_inputs(
        Some(IldSeverity::Mild),
        Some(DiseaseProgression::SlowlyProgressive),
        &[PrognosticFactor::AntiArsPositive],
    );

    let plan = treatment::evaluate(&diagnosis, &inputs, diagnosis.pattern);

    assert_eq!(plan.rule, "chronic_progressive");
    assert_eq!(plan.urgency, "Standard");
    assert_eq!(
        plan.notes[0],
        "PM/DM-ILD: Algorithme basé sur Fig.1 du guide 2020."
    );
    assert!(plan.notes[1].starts_with("Syndrome Anti-Synthétase"));
}

#[test]
fn stable_myositis_medications_depend_on_antibodies() {
    let diagnosis = diagnosis(CtdCode::Pmdm, None);

    let plain = treatment::evaluate(&diagnosis, &treatment_inputs(None, None, &[]), None);
    let flagged = treatment::evaluate(
        &diagnosis,
        &treatment_inputs(None, None, &[PrognosticFactor::AntiMda5Positive]),
        None,
    );

    assert_eq!(plain.rule, "chronic_stable");
    assert_eq!(plain.notes.len(), 1);
    assert_eq!(flagged.rule, "chronic_stable");
    assert_eq!(flagged.notes.len(), 2);
    assert_ne!(plain.medications, flagged.medications);
}

#[test]
fn end_stage_sclerosis_advice_depends_on_age() {
    let diagnosis = diagnosis(CtdCode::Ssc, None);

    let young = treatment::evaluate(
        &diagnosis,
        &treatment_inputs(Some(IldSeverity::EndStage), None, &[]),
        None,
    );
    let older = treatment::evaluate(
        &diagnosis,
        &treatment_inputs(
            Some(IldSeverity::EndStage),
            None,
            &[PrognosticFactor::AgeOver60],
        ),
        None,
    );

    assert_eq!(young.rule, "end_stage");
    assert!(young
        .medications
        .contains(&"CONSIDÉRER INSCRIPTION SUR LISTE DE TRANSPLANTATION PULMONAIRE."));
    assert!(older
        .medications
        .iter()
        .all(|medication| !medication.contains("TRANSPLANTATION")));
    assert!(young.monitoring.is_empty());
}

#[test]
fn sclerosis_risk_factors_select_extensive_protocol() {
    let diagnosis = diagnosis(CtdCode::Ssc, None);

    let at_risk = treatment::evaluate(
        &diagnosis,
        &treatment_inputs(Some(IldSeverity::Mild), None, &[PrognosticFactor::LowDlco]),
        None,
    );
    let limited = treatment::evaluate(
        &diagnosis,
        &treatment_inputs(Some(IldSeverity::Mild), None, &[]),
        None,
    );

    assert_eq!(at_risk.rule, "extensive_or_at_risk");
    assert_eq!(at_risk.medications.len(), 4);
    assert_eq!(limited.rule, "limited");
    assert_eq!(limited.notes.len(), 2);
}

#[test]
fn rheumatoid_protocol_follows_pattern() {
    let inputs = treatment_inputs(None, None, &[]);
    let rule_for = |pattern: Option<HrctPattern>| {
        let diagnosis = diagnosis(CtdCode::Ra, pattern);
        treatment::evaluate(&diagnosis, &inputs, pattern)
    };

    let uip = rule_for(Some(HrctPattern::Uip));
    assert_eq!(uip.rule, "uip");
    assert_eq!(uip.urgency, "⚠️ Pattern UIP - Prudence");

    let nsip = rule_for(Some(HrctPattern::Fnsip));
    assert_eq!(nsip.rule, "nsip_or_op");
    assert_eq!(
        nsip.first_line,
        "PR-ILD (Pattern fNSIP): Traitement anti-inflammatoire/immunosuppresseur."
    );

    let dad = rule_for(Some(HrctPattern::Dad));
    assert_eq!(dad.rule, "acute_exacerbation");
    assert!(dad.is_urgent());

    assert_eq!(rule_for(Some(HrctPattern::Lip)).rule, "indeterminate");
}

#[test]
fn uip_prognostic_factor_counts_without_selected_pattern() {
    let diagnosis = diagnosis(CtdCode::Ra, None);
    let inputs = treatment_inputs(None, None, &[PrognosticFactor::UipPattern]);

    let plan = treatment::evaluate(&diagnosis, &inputs, None);

    assert_eq!(plan.rule, "uip");
}

#[test]
fn lupus_splits_acute_and_chronic() {
    let diagnosis = diagnosis(CtdCode::Sle, None);

    let acute = treatment::evaluate(
        &diagnosis,
        &treatment_inputs(None, Some(DiseaseProgression::AcuteExacerbation), &[]),
        None,
    );
    let chronic = treatment::evaluate(&diagnosis, &treatment_inputs(None, None, &[]), None);

    assert_eq!(acute.rule, "acute_pneumonitis");
    assert_eq!(acute.notes.len(), 2);
    assert_eq!(chronic.rule, "chronic");
    assert_eq!(
        chronic.first_line,
        "LED-ILD Chronique: Corticoïdes ± Immunosuppresseur."
    );
}

#[test]
fn ipaf_uses_general_protocol_with_note() {
    let ipaf = diagnosis(CtdCode::Ipaf, None);
    let mctd = diagnosis(CtdCode::Mctd, None);
    let inputs = treatment_inputs(None, None, &[]);

    let general = treatment::evaluate(&ipaf, &inputs, None);
    let mixed = treatment::evaluate(&mctd, &inputs, None);

    assert_eq!(general.protocol, TreatmentProtocol::General);
    assert_eq!(
        general.first_line,
        "Traitement pour IPAF (Interstitial Pneumonia with Autoimmune Features)-ILD"
    );
    assert_eq!(general.notes.len(), 1);
    assert_eq!(mixed.protocol, TreatmentProtocol::MixedConnectiveTissue);
    assert_eq!(mixed.monitoring, vec!["Surveillance EFR/HRCT et recherche PH."]);
}

#[test]
fn every_protocol_ends_with_a_catch_all_rule() {
    let inputs = treatment_inputs(None, None, &[]);
    for code in CtdCode::ordered() {
        let diagnosis = diagnosis(code, None);
        let plan = treatment::evaluate(&diagnosis, &inputs, None);
        assert!(!plan.first_line.is_empty(), "{code} produced an empty plan");
        assert!(!plan.medications.is_empty());
    }
}
