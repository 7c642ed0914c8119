use super::{PlanDraft, TreatmentContext, TreatmentRule, STANDARD_URGENCY};
use crate::workflows::assessment::domain::{CtdCode, HrctPattern};
use crate::workflows::assessment::forms::{DiseaseProgression, IldSeverity};
use crate::workflows::assessment::reference::PrognosticFactor;

const MYOSITIS_NOTE: &str = "PM/DM-ILD: Algorithme basé sur Fig.1 du guide 2020.";
const SCLEROSIS_NOTE: &str = "SSc-ILD: Algorithme basé sur Fig.2 du guide 2020.";
const RHEUMATOID_NOTE: &str =
    "PR-ILD: Recommandations basées sur le pattern HRCT et l'activité de la PR.";
const LUPUS_NOTE: &str = "LED-ILD: Distinguer pneumopathie lupique aiguë (PLA) et ILD chronique.";

fn always(_: &TreatmentContext<'_>) -> bool {
    true
}

pub(crate) const MYOSITIS: &[TreatmentRule] = &[
    TreatmentRule {
        name: "rp_ild_anti_mda5",
        applies: myositis_rp_ild_anti_mda5,
        plan: myositis_triple_therapy,
    },
    TreatmentRule {
        name: "acute_or_severe",
        applies: myositis_acute_or_severe,
        plan: myositis_urgent,
    },
    TreatmentRule {
        name: "chronic_progressive",
        applies: myositis_slowly_progressive,
        plan: myositis_chronic_progressive,
    },
    TreatmentRule {
        name: "chronic_stable",
        applies: always,
        plan: myositis_chronic_stable,
    },
];

fn myositis_rp_ild_anti_mda5(ctx: &TreatmentContext<'_>) -> bool {
    ctx.rapidly_progressive() && ctx.anti_mda5()
}

fn myositis_acute_or_severe(ctx: &TreatmentContext<'_>) -> bool {
    ctx.progression_is(DiseaseProgression::RapidlyProgressive)
        || ctx.severity_is(IldSeverity::RpIld)
        || ctx.severity_is(IldSeverity::Severe)
}

fn myositis_slowly_progressive(ctx: &TreatmentContext<'_>) -> bool {
    ctx.progression_is(DiseaseProgression::SlowlyProgressive)
}

// The urgent myositis plans replace the whole record, algorithm note included.
fn myositis_triple_therapy(_: &TreatmentContext<'_>) -> PlanDraft {
    PlanDraft {
        urgency: "🚨 URGENCE VITALE",
        first_line: "RP-ILD Anti-MDA5 (+) suspectée: TRIPLE THERAPIE IMMEDIATE (PSL forte dose + CNI + IVCY)".to_string(),
        medications: vec![
            "Méthylprednisolone (mPSL) pulse 500-1000mg/j IV x3j, puis Prednisolone (PSL) 1mg/kg/j",
            "Tacrolimus (TAC) C0: 10-15 ng/mL OU Cyclosporine (CsA) C0: 150-200 ng/mL (ou C2: 1000-1500 ng/mL)",
            "Cyclophosphamide (IVCY) 500-1000mg/m²/mois (adapter à fonction rénale/âge)",
            "Hospitalisation (soins intensifs si SpO2 <90% ou détresse respiratoire)",
        ],
        monitoring: vec![
            "Clinique rapprochée (SpO2, FR, dyspnée)",
            "Bilan biologique fréquent (NFS, rein, foie, CPK, LDH, Ferritine, KL-6)",
            "HRCT contrôle précoce (J7-J14)",
        ],
        second_line: Some(
            "Si inefficace J10-14: discuter échanges plasmatiques, IgIV, Rituximab. Orientation centre expert.",
        ),
        notes: vec![
            "Anti-MDA5(+) RP-ILD: pronostic sombre, traitement agressif d'emblée.",
            "CNI: adapter posologie selon fonction rénale et interactions.",
        ],
    }
}

fn myositis_urgent(_: &TreatmentContext<'_>) -> PlanDraft {
    PlanDraft {
        urgency: "Traitement urgent",
        first_line: "ILD Aiguë/Subaiguë Sévère (non-MDA5+ RP-ILD typique): PSL forte dose + Immunosuppresseur (IS)".to_string(),
        medications: vec![
            "mPSL pulse 500-1000mg/j IV x3j (si hypoxémie/atteinte étendue), puis PSL 0.5-1mg/kg/j",
            "CNI: TAC C0: 5-10 ng/mL OU CsA C0: 100-150 ng/mL (ou C2: 600-800 ng/mL) - Souvent préféré",
            "Alternative IS: IVCY (si CNI insuffisant/contre-indiqué)",
        ],
        monitoring: vec!["Évaluation réponse à S2-S4", "Bilan biologique régulier"],
        second_line: Some(
            "Si CNI seul insuffisant, considérer ajout IVCY. Si progression rapide, réévaluer pour triple thérapie.",
        ),
        notes: vec![
            "Si multiples facteurs de mauvais pronostic (âge, SpO2, CRP, Ferritine, KL-6), traitement plus agressif peut être requis.",
        ],
    }
}

fn myositis_chronic_progressive(ctx: &TreatmentContext<'_>) -> PlanDraft {
    let mut notes = vec![MYOSITIS_NOTE];
    if ctx.anti_ars() {
        notes.push("Syndrome Anti-Synthétase: ILD chronique fréquente, bonne réponse initiale mais rechutes possibles. MMF ou AZA en maintenance.");
    }
    PlanDraft {
        urgency: STANDARD_URGENCY,
        first_line: "ILD Chronique Progressive: PSL ± Immunosuppresseur(s)".to_string(),
        medications: vec![
            "PSL 0.5-1mg/kg/j (réduire progressivement)",
            "IS: TAC, CsA, IVCY, ou MMF selon profil patient et réponse.",
        ],
        monitoring: vec!["EFR/HRCT tous les 3-6 mois pour évaluer progression."],
        second_line: None,
        notes,
    }
}

fn myositis_chronic_stable(ctx: &TreatmentContext<'_>) -> PlanDraft {
    let mut notes = vec![MYOSITIS_NOTE];
    let medications = if ctx.anti_mda5() || ctx.anti_ars() {
        notes.push(
            "Même si non-progressif actuellement, Ac spécifiques peuvent indiquer risque de réactivation.",
        );
        vec!["PSL faible dose (ex: 5-10mg/j) et/ou IS de maintenance (AZA, MMF) si antécédent d'activité."]
    } else {
        vec!["Surveillance rapprochée sans traitement ou PSL faible dose si symptomatique."]
    };
    PlanDraft {
        urgency: STANDARD_URGENCY,
        first_line: "ILD Chronique Non Progressive: Surveillance ou PSL faible dose".to_string(),
        medications,
        monitoring: vec!["EFR/HRCT tous les 6-12 mois."],
        second_line: None,
        notes,
    }
}

pub(crate) const SYSTEMIC_SCLEROSIS: &[TreatmentRule] = &[
    TreatmentRule {
        name: "end_stage",
        applies: sclerosis_end_stage,
        plan: sclerosis_end_stage_plan,
    },
    TreatmentRule {
        name: "extensive_or_at_risk",
        applies: sclerosis_extensive_or_at_risk,
        plan: sclerosis_extensive_plan,
    },
    TreatmentRule {
        name: "limited",
        applies: always,
        plan: sclerosis_limited_plan,
    },
];

fn sclerosis_end_stage(ctx: &TreatmentContext<'_>) -> bool {
    ctx.severity_is(IldSeverity::EndStage)
}

fn sclerosis_extensive_or_at_risk(ctx: &TreatmentContext<'_>) -> bool {
    ctx.severity_is(IldSeverity::Moderate)
        || ctx.severity_is(IldSeverity::Severe)
        || ctx.has(PrognosticFactor::ExtensiveFibrosisHrct)
        || ctx.has(PrognosticFactor::LowDlco)
}

fn sclerosis_end_stage_plan(ctx: &TreatmentContext<'_>) -> PlanDraft {
    let mut medications = vec![
        "Oxygénothérapie",
        "Réhabilitation respiratoire",
        "Soins de support",
    ];
    if ctx.has(PrognosticFactor::AgeOver60) {
        medications.push("Discuter Nintédanib ou IS avec prudence (données limitées pour ce stade).");
    } else {
        medications.push("CONSIDÉRER INSCRIPTION SUR LISTE DE TRANSPLANTATION PULMONAIRE.");
    }
    PlanDraft {
        urgency: "Soins palliatifs / Transplantation",
        first_line: "Maladie terminale (O2-dépendance ou CVF <50%)".to_string(),
        medications,
        monitoring: Vec::new(),
        second_line: None,
        notes: vec![SCLEROSIS_NOTE],
    }
}

fn sclerosis_extensive_plan(_: &TreatmentContext<'_>) -> PlanDraft {
    PlanDraft {
        urgency: STANDARD_URGENCY,
        first_line: "SSc-ILD extensive OU limitée avec facteurs de risque de progression".to_string(),
        medications: vec![
            "Option 1: Cyclophosphamide (POCY ou IVCY) pour 6-12 mois, PUIS relais par Azathioprine (AZA) ou Mycophenolate Mofetil (MMF). (Dose totale CYC < 36g)",
            "Option 2: Mycophenolate Mofetil (MMF) 2-3g/j d'emblée.",
            "Option 3: Nintédanib 150mg x2/j (seul ou en association avec MMF ou CYC - éviter CYC+MMF).",
            "Tocilizumab (TCZ) peut être une option, surtout si SSc cutanée diffuse précoce et progressive.",
        ],
        monitoring: vec!["EFR et HRCT tous les 6-12 mois pour évaluer la réponse/progression."],
        second_line: Some(
            "Si progression: Changer/associer les options de 1ère ligne, Rituximab (RTX), Transplantation de cellules souches hématopoïétiques (HSCT) dans centres experts.",
        ),
        notes: vec![
            SCLEROSIS_NOTE,
            "PSL faible dose (<10-15mg/j) si inflammation active, mais prudence (risque crise rénale sclérodermique).",
        ],
    }
}

fn sclerosis_limited_plan(_: &TreatmentContext<'_>) -> PlanDraft {
    PlanDraft {
        urgency: STANDARD_URGENCY,
        first_line: "SSc-ILD limitée sans facteurs de risque clairs de progression".to_string(),
        medications: vec!["Surveillance active avec EFR et HRCT tous les 6-12 mois."],
        monitoring: vec![
            "Si progression documentée, traiter comme 'limitée avec facteurs de risque'.",
        ],
        second_line: None,
        notes: vec![
            SCLEROSIS_NOTE,
            "Discuter Nintédanib même en l'absence de progression si fibrose >10% sur HRCT (SENSCIS).",
        ],
    }
}

pub(crate) const RHEUMATOID_ARTHRITIS: &[TreatmentRule] = &[
    TreatmentRule {
        name: "uip",
        applies: rheumatoid_uip,
        plan: rheumatoid_uip_plan,
    },
    TreatmentRule {
        name: "nsip_or_op",
        applies: rheumatoid_nsip_or_op,
        plan: rheumatoid_nsip_or_op_plan,
    },
    TreatmentRule {
        name: "acute_exacerbation",
        applies: rheumatoid_acute,
        plan: rheumatoid_acute_plan,
    },
    TreatmentRule {
        name: "indeterminate",
        applies: always,
        plan: rheumatoid_indeterminate_plan,
    },
];

fn rheumatoid_uip(ctx: &TreatmentContext<'_>) -> bool {
    ctx.uip()
}

fn rheumatoid_nsip_or_op(ctx: &TreatmentContext<'_>) -> bool {
    matches!(
        ctx.pattern,
        Some(HrctPattern::Fnsip | HrctPattern::Op | HrctPattern::Fop)
    )
}

fn rheumatoid_acute(ctx: &TreatmentContext<'_>) -> bool {
    ctx.pattern == Some(HrctPattern::Dad)
        || ctx.progression_is(DiseaseProgression::AcuteExacerbation)
}

fn rheumatoid_uip_plan(_: &TreatmentContext<'_>) -> PlanDraft {
    PlanDraft {
        urgency: "⚠️ Pattern UIP - Prudence",
        first_line: "PR-UIP: Approche similaire à FPI, IS controversés.".to_string(),
        medications: vec![
            "Optimiser traitement de la PR (DMARDs, Biothérapies). Éviter MTX si ILD active/sévère ou facteurs de risque.",
            "Nintédanib ou Pirfénidone (comme pour FPI) à discuter, surtout si progression.",
            "PSL faible dose (<10-15mg/j) si inflammation active ou exacerbation. Éviter fortes doses prolongées.",
        ],
        monitoring: vec![
            "EFR/DLCO/Test de marche tous les 3-6 mois.",
            "HRCT tous les 6-12 mois.",
            "Surveillance exacerbations aiguës.",
        ],
        second_line: Some(
            "Orientation précoce vers transplantation pulmonaire si progression et éligibilité.",
        ),
        notes: vec![
            RHEUMATOID_NOTE,
            "Le rôle des IS dans PR-UIP reste débattu. Rituximab ou Abatacept peuvent être plus sûrs pour la PR avec ILD que anti-TNF.",
        ],
    }
}

fn rheumatoid_nsip_or_op_plan(ctx: &TreatmentContext<'_>) -> PlanDraft {
    let pattern = ctx
        .pattern
        .map(|pattern| pattern.code())
        .unwrap_or("NSIP/OP");
    PlanDraft {
        urgency: STANDARD_URGENCY,
        first_line: format!(
            "PR-ILD (Pattern {pattern}): Traitement anti-inflammatoire/immunosuppresseur."
        ),
        medications: vec![
            "PSL 0.5-1mg/kg/j initialement, puis dégression lente.",
            "Concomitant: MMF, AZA, ou Cyclosporine/Tacrolimus.",
            "Optimiser traitement PR (DMARDs, Biothérapies - prudence avec MTX, anti-TNF).",
        ],
        monitoring: vec![
            "EFR/DLCO tous les 3-6 mois.",
            "HRCT à 6 mois, puis selon évolution.",
        ],
        second_line: Some("Si résistance/rechute: Rituximab, IVCY."),
        notes: vec![RHEUMATOID_NOTE],
    }
}

fn rheumatoid_acute_plan(_: &TreatmentContext<'_>) -> PlanDraft {
    PlanDraft {
        urgency: "🚨 URGENCE",
        first_line: "PR-ILD - Exacerbation Aiguë / DAD: Exclure infection. Traitement agressif."
            .to_string(),
        medications: vec![
            "mPSL pulse IV 500-1000mg/j x3j",
            "IVCY à discuter",
            "Support ventilatoire si besoin.",
        ],
        monitoring: vec!["Réévaluation très rapprochée."],
        second_line: None,
        notes: vec![RHEUMATOID_NOTE],
    }
}

fn rheumatoid_indeterminate_plan(_: &TreatmentContext<'_>) -> PlanDraft {
    PlanDraft {
        urgency: STANDARD_URGENCY,
        first_line: "PR-ILD (Pattern indéterminé ou autre): Approche individualisée.".to_string(),
        medications: vec![
            "Surveillance si stable et peu symptomatique.",
            "Traitement similaire à NSIP/OP si inflammation/progression.",
        ],
        monitoring: Vec::new(),
        second_line: None,
        notes: vec![RHEUMATOID_NOTE],
    }
}

pub(crate) const LUPUS: &[TreatmentRule] = &[
    TreatmentRule {
        name: "acute_pneumonitis",
        applies: lupus_acute,
        plan: lupus_acute_plan,
    },
    TreatmentRule {
        name: "chronic",
        applies: always,
        plan: lupus_chronic_plan,
    },
];

fn lupus_acute(ctx: &TreatmentContext<'_>) -> bool {
    ctx.progression_is(DiseaseProgression::AcuteExacerbation)
        || ctx.severity_is(IldSeverity::RpIld)
        || ctx.severity_is(IldSeverity::Severe)
}

fn lupus_acute_plan(_: &TreatmentContext<'_>) -> PlanDraft {
    PlanDraft {
        urgency: "🚨 URGENCE",
        first_line: "Pneumopathie Lupique Aiguë / ILD Sévère-Aiguë: Traitement immunosuppresseur majeur.".to_string(),
        medications: vec![
            "mPSL pulse IV 1g/j x3-5j, puis PSL 1-1.5mg/kg/j.",
            "IVCY (schéma Euro-Lupus ou NIH) OU MMF forte dose (2-3g/j).",
            "Si réfractaire/très sévère: Rituximab, échanges plasmatiques, IgIV.",
        ],
        monitoring: vec!["Réponse clinique et radiologique à J7-J14."],
        second_line: None,
        notes: vec![LUPUS_NOTE, "HCQ peut être poursuivi/ajouté. Exclure infection!"],
    }
}

fn lupus_chronic_plan(_: &TreatmentContext<'_>) -> PlanDraft {
    PlanDraft {
        urgency: STANDARD_URGENCY,
        first_line: "LED-ILD Chronique: Corticoïdes ± Immunosuppresseur.".to_string(),
        medications: vec![
            "PSL 0.5-1mg/kg/j initialement, dégression selon réponse.",
            "MMF (1-2g/j) ou AZA (1-2mg/kg/j) en épargne cortisonique ou si réfractaire.",
            "Rituximab en cas d'échec.",
        ],
        monitoring: vec!["EFR/HRCT tous les 3-6 mois initialement."],
        second_line: None,
        notes: vec![LUPUS_NOTE],
    }
}

pub(crate) const SJOGREN: &[TreatmentRule] = &[TreatmentRule {
    name: "corticosteroids",
    applies: always,
    plan: sjogren_plan,
}];

fn sjogren_plan(_: &TreatmentContext<'_>) -> PlanDraft {
    PlanDraft {
        urgency: STANDARD_URGENCY,
        first_line: "Sjögren-ILD: Corticoïdes ± Immunosuppresseur.".to_string(),
        medications: vec![
            "PSL 0.5-1mg/kg/j si ILD active/progressive, puis dégression.",
            "MMF ou AZA en épargne cortisonique ou si insuffisant.",
            "Rituximab rapporté comme efficace dans des cas réfractaires.",
        ],
        monitoring: vec![
            "EFR/HRCT tous les 6-12 mois. Attention aux complications infectieuses (kystes).",
        ],
        second_line: None,
        notes: vec!["Sjögren-ILD: Souvent NSIP ou LIP. Traitement si symptomatique ou progressif."],
    }
}

pub(crate) const MIXED_CONNECTIVE_TISSUE: &[TreatmentRule] = &[TreatmentRule {
    name: "dominant_phenotype",
    applies: always,
    plan: mixed_connective_plan,
}];

fn mixed_connective_plan(_: &TreatmentContext<'_>) -> PlanDraft {
    PlanDraft {
        urgency: STANDARD_URGENCY,
        first_line: "MCTD-ILD: Approche basée sur le phénotype ILD prédominant.".to_string(),
        medications: vec![
            "Si pattern/évolution SSc-like: cf. algorithme SSc-ILD.",
            "Si pattern/évolution PM-like: cf. algorithme PM-ILD.",
            "Généralement: PSL ± IS (MMF, AZA, CYC si sévère).",
        ],
        monitoring: vec!["Surveillance EFR/HRCT et recherche PH."],
        second_line: None,
        notes: vec![
            "MCTD-ILD: Traiter selon le phénotype dominant (SSc-like, PM-like, SLE-like).",
        ],
    }
}

pub(crate) const GENERAL: &[TreatmentRule] = &[TreatmentRule {
    name: "general",
    applies: always,
    plan: general_plan,
}];

pub(crate) fn general_plan(ctx: &TreatmentContext<'_>) -> PlanDraft {
    let mut notes = Vec::new();
    if ctx.diagnosis.code == CtdCode::Ipaf {
        notes.push("IPAF: Traitement guidé par le pattern HRCT et la sévérité. Si NSIP/OP-like -> CS/IS. Si UIP-like et progressif -> antifibrotiques peuvent être envisagés (PF-ILD).");
    }
    PlanDraft {
        urgency: STANDARD_URGENCY,
        first_line: format!("Traitement pour {}-ILD", ctx.diagnosis.name),
        medications: vec![
            "Prednisolone 0.5-1mg/kg/j (selon sévérité/activité)",
            "Immunosuppresseur adapté (MMF, AZA, Tacrolimus) si besoin d'épargne cortisonique ou si maladie progressive/sévère.",
            "Nintédanib ou Pirfénidone à discuter si phénotype fibrosant progressif (PF-ILD) malgré traitement IS.",
        ],
        monitoring: vec!["EFR tous les 3-6 mois", "HRCT tous les 6-12 mois"],
        second_line: Some(
            "Adapter selon réponse et tolérance. Discuter biothérapies ou antifibrotiques si progression.",
        ),
        notes,
    }
}
