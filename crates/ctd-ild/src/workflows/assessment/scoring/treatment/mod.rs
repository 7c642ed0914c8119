//! Treatment plan generation. The retained diagnosis selects a protocol and
//! the first rule of that protocol whose condition holds builds the plan.

mod protocols;

use serde::Serialize;

use super::final_diagnosis::FinalDiagnosis;
use crate::workflows::assessment::domain::{CtdCode, HrctPattern};
use crate::workflows::assessment::forms::{DiseaseProgression, IldSeverity, TreatmentInputs};
use crate::workflows::assessment::reference::PrognosticFactor;

pub(crate) const STANDARD_URGENCY: &str = "Standard";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreatmentPlan {
    pub protocol: TreatmentProtocol,
    pub rule: &'static str,
    pub urgency: &'static str,
    pub first_line: String,
    pub medications: Vec<&'static str>,
    pub monitoring: Vec<&'static str>,
    pub second_line: Option<&'static str>,
    pub notes: Vec<&'static str>,
}

impl TreatmentPlan {
    pub fn is_urgent(&self) -> bool {
        self.urgency.contains("URGENCE")
    }
}

/// Everything a treatment rule may inspect.
#[derive(Debug, Clone, Copy)]
pub struct TreatmentContext<'a> {
    pub diagnosis: &'a FinalDiagnosis,
    pub inputs: &'a TreatmentInputs,
    pub pattern: Option<HrctPattern>,
}

impl TreatmentContext<'_> {
    fn severity_is(&self, severity: IldSeverity) -> bool {
        self.inputs.ild_severity == Some(severity)
    }

    fn progression_is(&self, progression: DiseaseProgression) -> bool {
        self.inputs.disease_progression == Some(progression)
    }

    fn has(&self, factor: PrognosticFactor) -> bool {
        self.inputs.has(factor)
    }

    fn rapidly_progressive(&self) -> bool {
        self.severity_is(IldSeverity::RpIld)
            || self.progression_is(DiseaseProgression::RapidlyProgressive)
            || self.has(PrognosticFactor::RpIld)
    }

    fn anti_mda5(&self) -> bool {
        self.has(PrognosticFactor::AntiMda5Positive)
    }

    fn anti_ars(&self) -> bool {
        self.has(PrognosticFactor::AntiArsPositive)
    }

    fn uip(&self) -> bool {
        self.has(PrognosticFactor::UipPattern) || self.pattern == Some(HrctPattern::Uip)
    }
}

/// Ordered rule: the condition is evaluated top to bottom and the first
/// match produces the plan.
pub(crate) struct TreatmentRule {
    pub(crate) name: &'static str,
    pub(crate) applies: fn(&TreatmentContext<'_>) -> bool,
    pub(crate) plan: fn(&TreatmentContext<'_>) -> PlanDraft,
}

/// Plan fields produced by a rule before the protocol metadata is attached.
pub(crate) struct PlanDraft {
    pub(crate) urgency: &'static str,
    pub(crate) first_line: String,
    pub(crate) medications: Vec<&'static str>,
    pub(crate) monitoring: Vec<&'static str>,
    pub(crate) second_line: Option<&'static str>,
    pub(crate) notes: Vec<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TreatmentProtocol {
    Myositis,
    SystemicSclerosis,
    RheumatoidArthritis,
    Lupus,
    Sjogren,
    MixedConnectiveTissue,
    General,
}

impl TreatmentProtocol {
    pub const fn for_code(code: CtdCode) -> Self {
        match code {
            CtdCode::Pmdm => Self::Myositis,
            CtdCode::Ssc => Self::SystemicSclerosis,
            CtdCode::Ra => Self::RheumatoidArthritis,
            CtdCode::Sle => Self::Lupus,
            CtdCode::Ss => Self::Sjogren,
            CtdCode::Mctd => Self::MixedConnectiveTissue,
            CtdCode::Ipaf => Self::General,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Myositis => "PM/DM-ILD",
            Self::SystemicSclerosis => "SSc-ILD",
            Self::RheumatoidArthritis => "PR-ILD",
            Self::Lupus => "LED-ILD",
            Self::Sjogren => "Sjögren-ILD",
            Self::MixedConnectiveTissue => "MCTD-ILD",
            Self::General => "CTD-ILD",
        }
    }

    pub(crate) fn rules(self) -> &'static [TreatmentRule] {
        match self {
            Self::Myositis => protocols::MYOSITIS,
            Self::SystemicSclerosis => protocols::SYSTEMIC_SCLEROSIS,
            Self::RheumatoidArthritis => protocols::RHEUMATOID_ARTHRITIS,
            Self::Lupus => protocols::LUPUS,
            Self::Sjogren => protocols::SJOGREN,
            Self::MixedConnectiveTissue => protocols::MIXED_CONNECTIVE_TISSUE,
            Self::General => protocols::GENERAL,
        }
    }
}

pub fn evaluate(
    diagnosis: &FinalDiagnosis,
    inputs: &TreatmentInputs,
    pattern: Option<HrctPattern>,
) -> TreatmentPlan {
    let context = TreatmentContext {
        diagnosis,
        inputs,
        pattern,
    };
    let protocol = TreatmentProtocol::for_code(diagnosis.code);

    let (rule, draft) = protocol
        .rules()
        .iter()
        .find(|rule| (rule.applies)(&context))
        .map(|rule| (rule.name, (rule.plan)(&context)))
        .unwrap_or_else(|| ("general", protocols::general_plan(&context)));

    TreatmentPlan {
        protocol,
        rule,
        urgency: draft.urgency,
        first_line: draft.first_line,
        medications: draft.medications,
        monitoring: draft.monitoring,
        second_line: draft.second_line,
        notes: draft.notes,
    }
}
