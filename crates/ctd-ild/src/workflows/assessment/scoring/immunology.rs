use serde::Serialize;

use crate::workflows::assessment::domain::CtdCode;
use crate::workflows::assessment::forms::TargetedImmunoForm;

/// Antibody-confirmed diagnoses. Later phases match on these instead of the
/// display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AntibodyFinding {
    DiffuseSystemicSclerosis,
    LimitedSystemicSclerosis,
    AntiSynthetaseSyndrome,
    AntiMda5Dermatomyositis,
    SystemicLupus,
}

impl AntibodyFinding {
    pub const fn diagnosis(self) -> &'static str {
        match self {
            Self::DiffuseSystemicSclerosis => "Sclérodermie systémique diffuse",
            Self::LimitedSystemicSclerosis => "Sclérodermie systémique limitée",
            Self::AntiSynthetaseSyndrome => "Syndrome anti-synthétase (Anti-Jo1+)",
            Self::AntiMda5Dermatomyositis => "Dermatomyosite Anti-MDA5+",
            Self::SystemicLupus => "Lupus érythémateux systémique",
        }
    }

    pub const fn specificity(self) -> &'static str {
        match self {
            Self::DiffuseSystemicSclerosis => {
                "Anti-Scl70+ : Risque élevé d'ILD extensive et évolutive"
            }
            Self::LimitedSystemicSclerosis => {
                "Anticentromère+ : Risque d'HTAP plutôt qu'ILD sévère"
            }
            Self::AntiSynthetaseSyndrome => {
                "Anti-Jo1+ : ILD chronique, réponse habituelle au traitement"
            }
            Self::AntiMda5Dermatomyositis => {
                "Anti-MDA5+ : ATTENTION - Risque d'ILD rapidement progressive, pronostic sombre"
            }
            Self::SystemicLupus => "Critères SLE remplis - Rechercher pneumopathie lupique",
        }
    }

    /// Disease whose correlation score the finding supports, with its bonus.
    pub(crate) const fn correlation_bonus(self) -> (CtdCode, u32) {
        match self {
            Self::DiffuseSystemicSclerosis | Self::LimitedSystemicSclerosis => (CtdCode::Ssc, 40),
            Self::AntiSynthetaseSyndrome => (CtdCode::Pmdm, 35),
            Self::AntiMda5Dermatomyositis => (CtdCode::Pmdm, 40),
            Self::SystemicLupus => (CtdCode::Sle, 40),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImmunologyAnalysis {
    pub findings: Vec<AntibodyFinding>,
    pub confirmed_diagnoses: Vec<&'static str>,
    pub specificities: Vec<&'static str>,
}

impl ImmunologyAnalysis {
    pub fn has(&self, finding: AntibodyFinding) -> bool {
        self.findings.contains(&finding)
    }

    pub fn has_confirmed_diagnoses(&self) -> bool {
        !self.findings.is_empty()
    }
}

pub fn evaluate(form: &TargetedImmunoForm) -> ImmunologyAnalysis {
    let candidates = [
        (form.anti_scl70, AntibodyFinding::DiffuseSystemicSclerosis),
        (form.anti_centromere, AntibodyFinding::LimitedSystemicSclerosis),
        (form.anti_jo1, AntibodyFinding::AntiSynthetaseSyndrome),
        (form.anti_mda5, AntibodyFinding::AntiMda5Dermatomyositis),
        (form.anti_dna || form.anti_sm, AntibodyFinding::SystemicLupus),
    ];

    let findings: Vec<AntibodyFinding> = candidates
        .into_iter()
        .filter_map(|(present, finding)| present.then_some(finding))
        .collect();

    ImmunologyAnalysis {
        confirmed_diagnoses: findings.iter().map(|f| f.diagnosis()).collect(),
        specificities: findings.iter().map(|f| f.specificity()).collect(),
        findings,
    }
}
