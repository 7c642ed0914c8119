use serde::{Deserialize, Serialize};
use std::fmt;

/// Connective tissue disease codes handled by the assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CtdCode {
    #[serde(rename = "RA")]
    Ra,
    #[serde(rename = "SSc")]
    Ssc,
    #[serde(rename = "PMDM")]
    Pmdm,
    #[serde(rename = "SLE")]
    Sle,
    #[serde(rename = "SS")]
    Ss,
    #[serde(rename = "MCTD")]
    Mctd,
    #[serde(rename = "IPAF")]
    Ipaf,
}

impl CtdCode {
    /// Codes that carry a numeric suspicion score.
    pub const fn scored() -> [Self; 6] {
        [
            Self::Ra,
            Self::Ssc,
            Self::Pmdm,
            Self::Sle,
            Self::Ss,
            Self::Mctd,
        ]
    }

    pub const fn ordered() -> [Self; 7] {
        [
            Self::Ra,
            Self::Ssc,
            Self::Pmdm,
            Self::Sle,
            Self::Ss,
            Self::Mctd,
            Self::Ipaf,
        ]
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::Ra => "RA",
            Self::Ssc => "SSc",
            Self::Pmdm => "PMDM",
            Self::Sle => "SLE",
            Self::Ss => "SS",
            Self::Mctd => "MCTD",
            Self::Ipaf => "IPAF",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Ra => "Polyarthrite Rhumatoïde",
            Self::Ssc => "Sclérodermie Systémique",
            Self::Pmdm => "Polymyosite/Dermatomyosite",
            Self::Sle => "Lupus Érythémateux Systémique",
            Self::Ss => "Syndrome de Sjögren",
            Self::Mctd => "Connectivite Mixte",
            Self::Ipaf => "IPAF (Interstitial Pneumonia with Autoimmune Features)",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ordered()
            .into_iter()
            .find(|code| code.code().eq_ignore_ascii_case(value))
    }
}

impl fmt::Display for CtdCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Radiologic HRCT pattern categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HrctPattern {
    #[serde(rename = "UIP")]
    Uip,
    #[serde(rename = "fNSIP")]
    Fnsip,
    #[serde(rename = "OP")]
    Op,
    #[serde(rename = "LIP")]
    Lip,
    #[serde(rename = "FOP")]
    Fop,
    #[serde(rename = "DAD")]
    Dad,
}

impl HrctPattern {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Uip,
            Self::Fnsip,
            Self::Op,
            Self::Lip,
            Self::Fop,
            Self::Dad,
        ]
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::Uip => "UIP",
            Self::Fnsip => "fNSIP",
            Self::Op => "OP",
            Self::Lip => "LIP",
            Self::Fop => "FOP",
            Self::Dad => "DAD",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ordered()
            .into_iter()
            .find(|pattern| pattern.code().eq_ignore_ascii_case(value))
    }
}

impl fmt::Display for HrctPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Diagnostic likelihood derived from the essential test checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Likelihood {
    #[serde(rename = "Forte")]
    Forte,
    #[serde(rename = "Modérée")]
    Moderee,
    #[serde(rename = "Faible")]
    Faible,
}

impl Likelihood {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Forte => "Forte",
            Self::Moderee => "Modérée",
            Self::Faible => "Faible",
        }
    }

    pub(crate) fn from_percentage(percentage: u32) -> Self {
        if percentage >= 60 {
            Self::Forte
        } else if percentage >= 30 {
            Self::Moderee
        } else {
            Self::Faible
        }
    }

    /// Bonus added to the checklist percentage when ranking final candidates.
    pub(crate) const fn ranking_bonus(self) -> u32 {
        match self {
            Self::Forte => 100,
            Self::Moderee => 50,
            Self::Faible => 0,
        }
    }
}

/// Per-disease suspicion scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CtdScores {
    #[serde(rename = "RA")]
    pub ra: u32,
    #[serde(rename = "SSc")]
    pub ssc: u32,
    #[serde(rename = "PMDM")]
    pub pmdm: u32,
    #[serde(rename = "SLE")]
    pub sle: u32,
    #[serde(rename = "SS")]
    pub ss: u32,
    #[serde(rename = "MCTD")]
    pub mctd: u32,
}

impl CtdScores {
    pub fn get(&self, code: CtdCode) -> u32 {
        match code {
            CtdCode::Ra => self.ra,
            CtdCode::Ssc => self.ssc,
            CtdCode::Pmdm => self.pmdm,
            CtdCode::Sle => self.sle,
            CtdCode::Ss => self.ss,
            CtdCode::Mctd => self.mctd,
            CtdCode::Ipaf => 0,
        }
    }

    fn slot_mut(&mut self, code: CtdCode) -> Option<&mut u32> {
        match code {
            CtdCode::Ra => Some(&mut self.ra),
            CtdCode::Ssc => Some(&mut self.ssc),
            CtdCode::Pmdm => Some(&mut self.pmdm),
            CtdCode::Sle => Some(&mut self.sle),
            CtdCode::Ss => Some(&mut self.ss),
            CtdCode::Mctd => Some(&mut self.mctd),
            CtdCode::Ipaf => None,
        }
    }

    pub fn add(&mut self, code: CtdCode, delta: u32) {
        if let Some(slot) = self.slot_mut(code) {
            *slot += delta;
        }
    }

    pub fn add_capped(&mut self, code: CtdCode, delta: u32, cap: u32) {
        if let Some(slot) = self.slot_mut(code) {
            *slot = (*slot + delta).min(cap);
        }
    }

    /// Scores in the fixed code order.
    pub fn entries(&self) -> impl Iterator<Item = (CtdCode, u32)> + '_ {
        CtdCode::scored()
            .into_iter()
            .map(move |code| (code, self.get(code)))
    }
}

/// Wizard sections in their fixed navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionId {
    Anamnese,
    Clinical,
    StandardBio,
    TargetedImmuno,
    Respiratory,
    Imaging,
    Patterns,
    Correlation,
    EssentialTests,
    FinalDiagnosis,
    TreatmentPlan,
    FollowUp,
    Report,
}

impl SectionId {
    pub const fn ordered() -> [Self; 13] {
        [
            Self::Anamnese,
            Self::Clinical,
            Self::StandardBio,
            Self::TargetedImmuno,
            Self::Respiratory,
            Self::Imaging,
            Self::Patterns,
            Self::Correlation,
            Self::EssentialTests,
            Self::FinalDiagnosis,
            Self::TreatmentPlan,
            Self::FollowUp,
            Self::Report,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Anamnese => "anamnese",
            Self::Clinical => "clinical",
            Self::StandardBio => "standard-bio",
            Self::TargetedImmuno => "targeted-immuno",
            Self::Respiratory => "respiratory",
            Self::Imaging => "imaging",
            Self::Patterns => "patterns",
            Self::Correlation => "correlation",
            Self::EssentialTests => "essential-tests",
            Self::FinalDiagnosis => "final-diagnosis",
            Self::TreatmentPlan => "treatment-plan",
            Self::FollowUp => "follow-up",
            Self::Report => "report",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ordered()
            .into_iter()
            .find(|section| section.key().eq_ignore_ascii_case(value))
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Wizard phase number, 1-based.
pub type PhaseId = u8;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capped_addition_never_exceeds_cap() {
        let mut scores = CtdScores {
            ssc: 80,
            ..CtdScores::default()
        };
        scores.add_capped(CtdCode::Ssc, 40, 95);
        scores.add_capped(CtdCode::Ssc, 40, 95);
        assert_eq!(scores.ssc, 95);
    }

    #[test]
    fn ipaf_has_no_score_slot() {
        let mut scores = CtdScores::default();
        scores.add(CtdCode::Ipaf, 50);
        assert_eq!(scores, CtdScores::default());
        assert_eq!(scores.get(CtdCode::Ipaf), 0);
    }

    #[test]
    fn codes_parse_case_insensitively() {
        assert_eq!(CtdCode::parse("ssc"), Some(CtdCode::Ssc));
        assert_eq!(CtdCode::parse(" PMDM "), Some(CtdCode::Pmdm));
        assert_eq!(CtdCode::parse("ipf"), None);
        assert_eq!(HrctPattern::parse("fnsip"), Some(HrctPattern::Fnsip));
        assert_eq!(SectionId::parse("standard-bio"), Some(SectionId::StandardBio));
    }

    #[test]
    fn likelihood_thresholds() {
        assert_eq!(Likelihood::from_percentage(60), Likelihood::Forte);
        assert_eq!(Likelihood::from_percentage(59), Likelihood::Moderee);
        assert_eq!(Likelihood::from_percentage(30), Likelihood::Moderee);
        assert_eq!(Likelihood::from_percentage(29), Likelihood::Faible);
    }
}
