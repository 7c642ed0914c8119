//! Immutable clinical reference tables consumed by the scoring engine and
//! the report.

use super::domain::{CtdCode, HrctPattern};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PatternDetails {
    pub pattern: HrctPattern,
    pub name: &'static str,
    pub description: &'static str,
    pub criteria: &'static [&'static str],
    pub associations: &'static [&'static str],
}

/// Confirmatory checklist and classification criteria for one diagnosis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EssentialTestSpec {
    pub code: CtdCode,
    pub essential: &'static [&'static str],
    pub optional: &'static [&'static str],
    pub criteria: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrognosticCategory {
    General,
    Pft,
    Hrct,
    Biomarker,
    ClinicalCourse,
    Autoantibody,
    ClinicalSsc,
}

/// Prognostic factors captured before generating a treatment plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrognosticFactor {
    AgeOver60,
    MaleSex,
    SmokingHistory,
    LowDlco,
    ExtensiveFibrosisHrct,
    UipPattern,
    HighKl6,
    HighFerritin,
    RpIld,
    AntiMda5Positive,
    AntiArsPositive,
    AntiScl70Positive,
    SevereSkinInvolvement,
    HighRf,
    AntiCcpPositive,
}

impl PrognosticFactor {
    pub const fn ordered() -> [Self; 15] {
        [
            Self::AgeOver60,
            Self::MaleSex,
            Self::SmokingHistory,
            Self::LowDlco,
            Self::ExtensiveFibrosisHrct,
            Self::UipPattern,
            Self::HighKl6,
            Self::HighFerritin,
            Self::RpIld,
            Self::AntiMda5Positive,
            Self::AntiArsPositive,
            Self::AntiScl70Positive,
            Self::SevereSkinInvolvement,
            Self::HighRf,
            Self::AntiCcpPositive,
        ]
    }

    /// Form field identifier.
    pub const fn key(self) -> &'static str {
        match self {
            Self::AgeOver60 => "ageOver60",
            Self::MaleSex => "maleSex",
            Self::SmokingHistory => "smokingHistory",
            Self::LowDlco => "lowDLCO",
            Self::ExtensiveFibrosisHrct => "extensiveFibrosisHRCT",
            Self::UipPattern => "uipPattern",
            Self::HighKl6 => "highKL6",
            Self::HighFerritin => "highFerritin",
            Self::RpIld => "rpILD",
            Self::AntiMda5Positive => "antiMda5Positive",
            Self::AntiArsPositive => "antiARSPositive",
            Self::AntiScl70Positive => "antiScl70Positive",
            Self::SevereSkinInvolvement => "severeSkinInvolvement",
            Self::HighRf => "highRF",
            Self::AntiCcpPositive => "antiCCPPositive",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::AgeOver60 => "Âge > 60 ans",
            Self::MaleSex => "Sexe Masculin",
            Self::SmokingHistory => "Tabagisme (actuel ou sevré)",
            Self::LowDlco => "DLCO < 40-50%",
            Self::ExtensiveFibrosisHrct => "Fibrose extensive sur HRCT (>20%)",
            Self::UipPattern => "Pattern UIP sur HRCT",
            Self::HighKl6 => "KL-6 élevé (>1000 U/mL)",
            Self::HighFerritin => "Ferritine sérique élevée (>500 ng/mL)",
            Self::RpIld => "RP-ILD (Rapidly Progressive ILD)",
            Self::AntiMda5Positive => "Anticorps Anti-MDA5 positifs",
            Self::AntiArsPositive => "Anticorps Anti-Synthétase (ex: Anti-Jo1) positifs",
            Self::AntiScl70Positive => "Anticorps Anti-Scl-70 (topoisomerase I) positifs",
            Self::SevereSkinInvolvement => "Atteinte cutanée diffuse/sévère (SSc)",
            Self::HighRf => "Facteur Rhumatoïde (FR) élevé",
            Self::AntiCcpPositive => "Anti-CCP positifs",
        }
    }

    pub const fn category(self) -> PrognosticCategory {
        match self {
            Self::AgeOver60 | Self::MaleSex | Self::SmokingHistory => PrognosticCategory::General,
            Self::LowDlco => PrognosticCategory::Pft,
            Self::ExtensiveFibrosisHrct | Self::UipPattern => PrognosticCategory::Hrct,
            Self::HighKl6 | Self::HighFerritin => PrognosticCategory::Biomarker,
            Self::RpIld => PrognosticCategory::ClinicalCourse,
            Self::SevereSkinInvolvement => PrognosticCategory::ClinicalSsc,
            Self::AntiMda5Positive
            | Self::AntiArsPositive
            | Self::AntiScl70Positive
            | Self::HighRf
            | Self::AntiCcpPositive => PrognosticCategory::Autoantibody,
        }
    }

    /// Resolves a form field identifier, including the legacy aliases
    /// `uipPatternHRCT` and `antiMda5Risk`.
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        if key.eq_ignore_ascii_case("uipPatternHRCT") {
            return Some(Self::UipPattern);
        }
        if key.eq_ignore_ascii_case("antiMda5Risk") {
            return Some(Self::AntiMda5Positive);
        }
        Self::ordered()
            .into_iter()
            .find(|factor| factor.key().eq_ignore_ascii_case(key))
    }
}

const COMMON_FACTORS: [PrognosticFactor; 9] = [
    PrognosticFactor::AgeOver60,
    PrognosticFactor::MaleSex,
    PrognosticFactor::SmokingHistory,
    PrognosticFactor::LowDlco,
    PrognosticFactor::ExtensiveFibrosisHrct,
    PrognosticFactor::UipPattern,
    PrognosticFactor::HighKl6,
    PrognosticFactor::HighFerritin,
    PrognosticFactor::RpIld,
];

/// Prognostic factors offered for a retained diagnosis: the common set plus
/// disease-specific antibodies for PM/DM, SSc and RA.
pub fn prognostic_factors_for(code: CtdCode) -> Vec<PrognosticFactor> {
    let mut factors = COMMON_FACTORS.to_vec();
    let specific: &[PrognosticFactor] = match code {
        CtdCode::Pmdm => &[
            PrognosticFactor::AntiMda5Positive,
            PrognosticFactor::AntiArsPositive,
        ],
        CtdCode::Ssc => &[
            PrognosticFactor::AntiScl70Positive,
            PrognosticFactor::SevereSkinInvolvement,
        ],
        CtdCode::Ra => &[PrognosticFactor::HighRf, PrognosticFactor::AntiCcpPositive],
        _ => &[],
    };
    factors.extend_from_slice(specific);
    factors
}

pub fn pattern_details(pattern: HrctPattern) -> &'static PatternDetails {
    match pattern {
        HrctPattern::Uip => &UIP_DETAILS,
        HrctPattern::Fnsip => &FNSIP_DETAILS,
        HrctPattern::Op => &OP_DETAILS,
        HrctPattern::Lip => &LIP_DETAILS,
        HrctPattern::Fop => &FOP_DETAILS,
        HrctPattern::Dad => &DAD_DETAILS,
    }
}

/// Essential test catalog for a diagnosis. Mixed connective tissue disease
/// has no dedicated checklist.
pub fn essential_tests_for(code: CtdCode) -> Option<&'static EssentialTestSpec> {
    match code {
        CtdCode::Ssc => Some(&SSC_TESTS),
        CtdCode::Pmdm => Some(&PMDM_TESTS),
        CtdCode::Sle => Some(&SLE_TESTS),
        CtdCode::Ss => Some(&SS_TESTS),
        CtdCode::Ra => Some(&RA_TESTS),
        CtdCode::Ipaf => Some(&IPAF_TESTS),
        CtdCode::Mctd => None,
    }
}

const UIP_DETAILS: PatternDetails = PatternDetails {
    pattern: HrctPattern::Uip,
    name: "UIP (Usual Interstitial Pneumonia)",
    description: "Pattern de mauvais pronostic, souvent associé à la PR et à la SSc avancée. Caractérisé par des réticulations sous-pleurales et basales, rayon de miel, et bronchectasies de traction. Hétérogène.",
    criteria: &[
        "Rayon de miel sous-pleural obligatoire (peut être absent si autres signes typiques)",
        "Réticulations irrégulières prédominantes",
        "Distribution hétérogène, souvent basale et périphérique",
        "Bronchectasies/bronchiolectasies de traction",
    ],
    associations: &[
        "PR-ILD (souvent UIP)",
        "SSc-ILD (formes avancées)",
        "IPF-like",
        "Pronostic plus réservé",
    ],
};

const FNSIP_DETAILS: PatternDetails = PatternDetails {
    pattern: HrctPattern::Fnsip,
    name: "fNSIP (Fibrosing Nonspecific Interstitial Pneumonia)",
    description: "Pattern le plus fréquent dans les CTD-ILD, notamment SSc et Myosites. Verre dépoli prédominant avec réticulations fines. Distribution souvent symétrique, épargne sous-pleurale relative.",
    criteria: &[
        "Verre dépoli prédominant, souvent bilatéral et symétrique",
        "Réticulations fines associées",
        "Épargne sous-pleurale relative fréquente",
        "Bronchectasies de traction modérées",
        "Peu ou pas de rayon de miel",
    ],
    associations: &[
        "SSc-ILD (le plus fréquent)",
        "PM/DM-ILD",
        "Syndrome anti-synthétase",
        "Pronostic généralement favorable",
    ],
};

const OP_DETAILS: PatternDetails = PatternDetails {
    pattern: HrctPattern::Op,
    name: "OP (Organizing Pneumonia)",
    description: "Condensations alvéolaires multifocales, souvent périphériques ou péribronchiques. Signe du halo inversé possible. Bonne réponse aux corticoïdes.",
    criteria: &[
        "Condensations alvéolaires, uni ou bilatérales",
        "Distribution souvent périphérique et/ou péribronchovasculaire",
        "Signe du halo inversé (atoll sign) possible",
        "Peu ou pas de fibrose extensive (rayon de miel)",
    ],
    associations: &[
        "PM/DM-ILD",
        "PR-ILD",
        "LED-ILD",
        "Syndrome anti-synthétase",
        "Réversible sous corticoïdes",
    ],
};

const LIP_DETAILS: PatternDetails = PatternDetails {
    pattern: HrctPattern::Lip,
    name: "LIP/DLH (Lymphoid Interstitial Pneumonia / Diffuse Lymphoid Hyperplasia)",
    description: "Infiltration lymphoïde diffuse. Verre dépoli, kystes à parois fines, nodules centrolobulaires. Fortement associé au Syndrome de Sjögren.",
    criteria: &[
        "Verre dépoli diffus",
        "Kystes à parois fines (pathognomoniques si présents)",
        "Nodules centrolobulaires ou péribronchovasculaires",
        "Épaississement septal interlobulaire",
    ],
    associations: &[
        "Syndrome de Sjögren-ILD (très évocateur)",
        "LED-ILD",
        "PR-ILD",
    ],
};

const FOP_DETAILS: PatternDetails = PatternDetails {
    pattern: HrctPattern::Fop,
    name: "FOP (Fibrosing Organizing Pneumonia) / NSIP avec chevauchement OP",
    description: "Combinaison de signes de NSIP (verre dépoli, réticulations) et d'OP (condensations). Fréquent dans le syndrome anti-synthétase.",
    criteria: &[
        "Coexistence de zones de verre dépoli/réticulations (type NSIP)",
        "Et de zones de condensations (type OP)",
        "Distribution souvent péribronchovasculaire et basale",
    ],
    associations: &["Syndrome anti-synthétase (très fréquent)", "PM/DM-ILD"],
};

const DAD_DETAILS: PatternDetails = PatternDetails {
    pattern: HrctPattern::Dad,
    name: "DAD (Diffuse Alveolar Damage)",
    description: "Expression radiologique de l'atteinte alvéolaire aiguë. Verre dépoli bilatéral et étendu, condensations. Évolution rapide. Souvent dans les formes aiguës de LED ou myosites (anti-MDA5).",
    criteria: &[
        "Verre dépoli bilatéral et diffus, souvent étendu",
        "Condensations alvéolaires rapidement progressives",
        "Épaississement septal interlobulaire",
        "Parfois bronchectasies de traction si évolution vers fibrose",
    ],
    associations: &[
        "Anti-MDA5+ DM (RP-ILD)",
        "Lupus pneumonitis aigu",
        "Exacerbation aiguë d'une ILD préexistante",
        "Urgence thérapeutique, pronostic réservé",
    ],
};

const SSC_TESTS: EssentialTestSpec = EssentialTestSpec {
    code: CtdCode::Ssc,
    essential: &[
        "Capillaroscopie périunguéale (critère diagnostique majeur)",
        "Anticorps anti-Scl-70 (topoisomerase I)",
        "Anticorps anti-centromère (ACA)",
        "Anticorps anti-ARN polymérase III",
        "Échocardiographie (dépistage HTAP et atteinte cardiaque)",
        "EFR complètes (CVF, DLCO) si non déjà faites exhaustivement",
        "HRCT thoracique (si non déjà fait pour bilan ILD initial)",
    ],
    optional: &[
        "Manométrie oesophagienne / TOGD (atteinte digestive)",
        "Biopsie cutanée (si doute diagnostique)",
        "Dosage NT-proBNP (suspicion HTAP/cardio)",
    ],
    criteria: "Critères ACR/EULAR 2013 (score ≥9)",
};

const PMDM_TESTS: EssentialTestSpec = EssentialTestSpec {
    code: CtdCode::Pmdm,
    essential: &[
        "Panel complet d'anticorps spécifiques des myosites (MSA) incluant anti-ARS (Jo-1, PL-7, PL-12, EJ, OJ), anti-MDA5, anti-Mi-2, anti-TIF1gamma, anti-NXP2, anti-SAE",
        "Enzymes musculaires (CPK, LDH, aldolase, transaminases)",
        "EMG (tracé myogène, recherche signes de dénervation si overlap)",
        "IRM musculaire (recherche œdème, inflammation, atrophie, évaluation topographique pour biopsie)",
    ],
    optional: &[
        "Biopsie musculaire (si diagnostic incertain ou pour recherche phénotypique)",
        "Bilan de néoplasie (surtout si DM ou âge > 40 ans, TIF1gamma+)",
        "EFR complètes et HRCT thoracique (systématique pour ILD)",
        "ECG, Échocardiographie (atteinte cardiaque possible)",
    ],
    criteria: "Critères EULAR/ACR 2017 (score ≥5.5 avec biopsie, ≥6.7 sans biopsie pour Myosite définie)",
};

const SLE_TESTS: EssentialTestSpec = EssentialTestSpec {
    code: CtdCode::Sle,
    essential: &[
        "Anticorps anti-ADN natif (quantitatif)",
        "Anticorps anti-Sm",
        "Dosage du complément (C3, C4, CH50)",
        "Anticorps antiphospholipides (Anticoagulant lupique, anti-cardiolipine IgG/IgM, anti-beta2GP1 IgG/IgM)",
        "Protéinurie des 24h / Rapport Protéine/Créatinine urinaire",
        "Sédiment urinaire (recherche cylindres, hématurie)",
    ],
    optional: &[
        "Anti-RNP, anti-SSA/Ro, anti-SSB/La (si non déjà faits)",
        "Test de Coombs direct",
        "Biopsie rénale (si protéinurie significative ou syndrome néphrotique/néphritique)",
        "HRCT thoracique et EFR (si suspicion ILD)",
    ],
    criteria: "Critères EULAR/ACR 2019 (score ≥10 avec au moins 1 critère clinique)",
};

const SS_TESTS: EssentialTestSpec = EssentialTestSpec {
    code: CtdCode::Ss,
    essential: &[
        "Anticorps anti-SSA/Ro (Ro60 et/ou Ro52) et anti-SSB/La",
        "Test de Schirmer et/ou test au Rose Bengale/Vert de Lissamine (sécheresse oculaire objective)",
        "Biopsie des glandes salivaires accessoires (BGSA) - Chisholm score ≥1 (focus score)",
        "Débit salivaire non stimulé (sialométrie)",
    ],
    optional: &[
        "Facteur rhumatoïde, ANA (souvent positifs)",
        "Échographie des glandes salivaires",
        "Cryoglobulinémie, Électrophorèse des protéines sériques (hypergammaglobulinémie polyclonale)",
        "HRCT thoracique et EFR (dépistage ILD - LIP, NSIP fréquents)",
    ],
    criteria: "Critères ACR/EULAR 2016 (score ≥4)",
};

const RA_TESTS: EssentialTestSpec = EssentialTestSpec {
    code: CtdCode::Ra,
    essential: &[
        "Facteur Rhumatoïde (FR) - IgM, IgA",
        "Anticorps anti-CCP (ACPA)",
        "VS, CRP (marqueurs inflammation)",
        "Radiographies des mains/poignets et pieds (érosions, pincement articulaire)",
    ],
    optional: &[
        "Échographie articulaire (synovite, érosions précoces, Doppler puissance)",
        "IRM articulaire (si doute ou suspicion atteinte axiale)",
        "HRCT thoracique et EFR (dépistage ILD - UIP fréquent)",
        "ANA (pour diagnostics différentiels ou overlap)",
    ],
    criteria: "Critères ACR/EULAR 2010 (score ≥6)",
};

const IPAF_TESTS: EssentialTestSpec = EssentialTestSpec {
    code: CtdCode::Ipaf,
    essential: &[
        "Revue détaillée des 3 domaines IPAF (Clinique, Sérologique, Morphologique)",
        "Panel ANA complet (incluant patterns spécifiques)",
        "FR, Anti-CCP",
        "Enzymes musculaires (CPK)",
        "HRCT thoracique (relecture multidisciplinaire pour patterns ILD)",
        "Examen clinique systémique (recherche signes extra-thoraciques subtils de CTD)",
    ],
    optional: &[
        "Anticorps spécifiques des myosites (si signes cliniques évocateurs)",
        "Capillaroscopie (si phénomène de Raynaud)",
        "Consultation rhumatologie/médecine interne spécialisée",
    ],
    criteria: "Critères IPAF (ATS/ERS 2015) - Au moins 2 domaines sur 3",
};
