use super::domain::{CtdCode, HrctPattern, SectionId};
use super::reference::PrognosticFactor;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("section `{0}` does not accept answers")]
    ReadOnlySection(SectionId),
    #[error("unknown field `{field}` in section `{section}`")]
    UnknownField { section: SectionId, field: String },
    #[error("field `{field}` in section `{section}` expects a yes/no value, got `{value}`")]
    InvalidFlag {
        section: SectionId,
        field: String,
        value: String,
    },
}

/// Field-level update entry point shared by every section record.
pub trait SectionAnswers {
    const SECTION: SectionId;

    fn apply(&mut self, field: &str, raw: &str) -> Result<(), FormError>;
}

/// Numeric answers that do not parse are treated as absent.
pub(crate) fn parse_number(raw: &str) -> Option<f64> {
    raw.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Whole-number answers (age, HRCT extension) drop any fractional part.
pub(crate) fn parse_whole_number(raw: &str) -> Option<f64> {
    parse_number(raw).map(f64::trunc)
}

pub(crate) fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" | "oui" | "x" | "on" | "checked" | "positive" | "positif"
        | "+" => Some(true),
        "" | "false" | "0" | "no" | "n" | "non" | "off" | "negative" | "négatif" | "negatif"
        | "-" => Some(false),
        _ => None,
    }
}

fn parse_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Lowercased field name with separators removed (`il6_level` -> `il6level`).
fn field_key(field: &str) -> String {
    field
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn unknown_field(section: SectionId, field: &str) -> FormError {
    FormError::UnknownField {
        section,
        field: field.trim().to_string(),
    }
}

fn flag_value(section: SectionId, field: &str, raw: &str) -> Result<bool, FormError> {
    parse_flag(raw).ok_or_else(|| FormError::InvalidFlag {
        section,
        field: field.trim().to_string(),
        value: raw.trim().to_string(),
    })
}

fn lowered(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Sex {
    pub fn parse(raw: &str) -> Option<Self> {
        match lowered(raw).as_str() {
            "m" | "masculin" | "male" => Some(Self::Male),
            "f" | "féminin" | "feminin" | "female" => Some(Self::Female),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmokingStatus {
    Never,
    Current,
    Former,
}

impl SmokingStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        match lowered(raw).as_str() {
            "never" => Some(Self::Never),
            "current" => Some(Self::Current),
            "former" => Some(Self::Former),
            _ => None,
        }
    }
}

/// Time since the first symptoms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EvolutionDelay {
    #[serde(rename = "aigu")]
    Acute,
    #[serde(rename = "subaigu")]
    Subacute,
    #[serde(rename = "chronique")]
    Chronic,
}

impl EvolutionDelay {
    pub fn parse(raw: &str) -> Option<Self> {
        match lowered(raw).as_str() {
            "aigu" => Some(Self::Acute),
            "subaigu" => Some(Self::Subacute),
            "chronique" => Some(Self::Chronic),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnamnesisForm {
    pub age: Option<f64>,
    pub sex: Option<Sex>,
    pub origin: Option<String>,
    pub smoking: Option<SmokingStatus>,
    pub pack_years: Option<f64>,
    pub profession: Option<String>,
    pub silica: bool,
    pub asbestos: bool,
    pub metals: bool,
    pub birds: bool,
    pub molds: bool,
    pub hay: bool,
    pub family_ctd: bool,
    pub family_raynaud: bool,
    pub family_ild: bool,
    pub family_autoimmune: bool,
    pub evolution_delay: Option<EvolutionDelay>,
    pub onset_mode: Option<String>,
    pub evolution: Option<String>,
}

impl SectionAnswers for AnamnesisForm {
    const SECTION: SectionId = SectionId::Anamnese;

    fn apply(&mut self, field: &str, raw: &str) -> Result<(), FormError> {
        let slot = match field_key(field).as_str() {
            "age" => {
                self.age = parse_whole_number(raw);
                return Ok(());
            }
            "sexe" | "sex" => {
                self.sex = Sex::parse(raw);
                return Ok(());
            }
            "origine" | "origin" => {
                self.origin = parse_text(raw);
                return Ok(());
            }
            "tabac" | "smoking" => {
                self.smoking = SmokingStatus::parse(raw);
                return Ok(());
            }
            "pa" | "packyears" => {
                self.pack_years = parse_number(raw);
                return Ok(());
            }
            "profession" => {
                self.profession = parse_text(raw);
                return Ok(());
            }
            "delaievolution" => {
                self.evolution_delay = EvolutionDelay::parse(raw);
                return Ok(());
            }
            "modeinstallation" => {
                self.onset_mode = parse_text(raw);
                return Ok(());
            }
            "evolution" => {
                self.evolution = parse_text(raw);
                return Ok(());
            }
            "silice" => &mut self.silica,
            "amiante" => &mut self.asbestos,
            "metaux" => &mut self.metals,
            "oiseaux" => &mut self.birds,
            "moisissures" => &mut self.molds,
            "foin" => &mut self.hay,
            "atcdctd" => &mut self.family_ctd,
            "atcdraynaud" => &mut self.family_raynaud,
            "atcdild" => &mut self.family_ild,
            "atcdautoimmun" => &mut self.family_autoimmune,
            _ => return Err(unknown_field(Self::SECTION, field)),
        };
        *slot = flag_value(Self::SECTION, field, raw)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicalForm {
    pub arthritis: bool,
    pub morning_stiffness: bool,
    pub deformities: bool,
    pub muscle_weakness: bool,
    pub myalgia: bool,
    pub malar_rash: bool,
    pub heliotrope: bool,
    pub gottron: bool,
    pub sclerodactyly: bool,
    pub telangiectasia: bool,
    pub digital_ulcers: bool,
    pub oral_ulcers: bool,
    pub photosensitivity: bool,
    /// `Some(true)` only when Raynaud's phenomenon is explicitly reported.
    pub raynaud_present: Option<bool>,
    pub raynaud_sequence: Option<String>,
    pub raynaud_severity: Option<String>,
    pub dyspnea: bool,
    pub dry_cough: bool,
    pub crackles: bool,
    pub clubbing: bool,
    pub cyanosis: bool,
    pub dry_eyes: bool,
    pub dry_mouth: bool,
    pub fever: bool,
    pub weight_loss: bool,
    pub lymph_nodes: bool,
}

impl SectionAnswers for ClinicalForm {
    const SECTION: SectionId = SectionId::Clinical;

    fn apply(&mut self, field: &str, raw: &str) -> Result<(), FormError> {
        let slot = match field_key(field).as_str() {
            "raynaudpresent" => {
                self.raynaud_present = match lowered(raw).as_str() {
                    "oui" => Some(true),
                    "non" => Some(false),
                    _ => None,
                };
                return Ok(());
            }
            "raynaudsequence" => {
                self.raynaud_sequence = parse_text(raw);
                return Ok(());
            }
            "raynaudseverity" => {
                self.raynaud_severity = parse_text(raw);
                return Ok(());
            }
            "arthritis" => &mut self.arthritis,
            "morningstiffness" => &mut self.morning_stiffness,
            "deformities" => &mut self.deformities,
            "muscleweakness" => &mut self.muscle_weakness,
            "myalgia" => &mut self.myalgia,
            "malarrash" => &mut self.malar_rash,
            "heliotrope" => &mut self.heliotrope,
            "gottron" => &mut self.gottron,
            "sclerodactyly" => &mut self.sclerodactyly,
            "telangiectasia" => &mut self.telangiectasia,
            "digitalulcers" => &mut self.digital_ulcers,
            "oralulcers" => &mut self.oral_ulcers,
            "photosensitivity" => &mut self.photosensitivity,
            "dyspnea" => &mut self.dyspnea,
            "drycough" => &mut self.dry_cough,
            "crackles" => &mut self.crackles,
            "clubbing" => &mut self.clubbing,
            "cyanosis" => &mut self.cyanosis,
            "dryeyes" => &mut self.dry_eyes,
            "drymouth" => &mut self.dry_mouth,
            "fever" => &mut self.fever,
            "weightloss" => &mut self.weight_loss,
            "lymphnodes" => &mut self.lymph_nodes,
            _ => return Err(unknown_field(Self::SECTION, field)),
        };
        *slot = flag_value(Self::SECTION, field, raw)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnaTiter {
    #[serde(rename = "negative")]
    Negative,
    #[serde(rename = "1-80")]
    T80,
    #[serde(rename = "1-160")]
    T160,
    #[serde(rename = "1-320")]
    T320,
    #[serde(rename = "1-640")]
    T640,
    #[serde(rename = "1-1280")]
    T1280,
}

impl AnaTiter {
    pub fn parse(raw: &str) -> Option<Self> {
        match lowered(raw).replace('/', "-").as_str() {
            "negative" => Some(Self::Negative),
            "1-80" => Some(Self::T80),
            "1-160" => Some(Self::T160),
            "1-320" => Some(Self::T320),
            "1-640" => Some(Self::T640),
            "1-1280" => Some(Self::T1280),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Negative => "Négatif",
            Self::T80 => "1/80",
            Self::T160 => "1/160",
            Self::T320 => "1/320",
            Self::T640 => "1/640",
            Self::T1280 => "≥1/1280",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnaPattern {
    Homogeneous,
    Speckled,
    Nucleolar,
    Centromere,
    Cytoplasmic,
}

impl AnaPattern {
    pub fn parse(raw: &str) -> Option<Self> {
        match lowered(raw).as_str() {
            "homogeneous" => Some(Self::Homogeneous),
            "speckled" => Some(Self::Speckled),
            "nucleolar" => Some(Self::Nucleolar),
            "centromere" => Some(Self::Centromere),
            "cytoplasmic" => Some(Self::Cytoplasmic),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Homogeneous => "Homogène",
            Self::Speckled => "Moucheté",
            Self::Nucleolar => "Nucléolaire",
            Self::Centromere => "Centromère",
            Self::Cytoplasmic => "Cytoplasmique",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SerologyResult {
    Negative,
    Positive,
}

impl SerologyResult {
    pub fn parse(raw: &str) -> Option<Self> {
        match lowered(raw).as_str() {
            "negative" => Some(Self::Negative),
            "positive" => Some(Self::Positive),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StandardBioForm {
    pub esr: Option<f64>,
    pub crp: Option<f64>,
    pub ferritin: Option<f64>,
    pub cpk: Option<f64>,
    pub ldh: Option<f64>,
    pub aldolase: Option<f64>,
    pub ana_titer: Option<AnaTiter>,
    pub ana_pattern: Option<AnaPattern>,
    pub rf: Option<f64>,
    pub anti_ccp: Option<f64>,
    pub anca_mpo: Option<SerologyResult>,
    pub anca_pr3: Option<SerologyResult>,
}

impl SectionAnswers for StandardBioForm {
    const SECTION: SectionId = SectionId::StandardBio;

    fn apply(&mut self, field: &str, raw: &str) -> Result<(), FormError> {
        let number = match field_key(field).as_str() {
            "anatiter" => {
                self.ana_titer = AnaTiter::parse(raw);
                return Ok(());
            }
            "anapattern" => {
                self.ana_pattern = AnaPattern::parse(raw);
                return Ok(());
            }
            "ancampo" => {
                self.anca_mpo = SerologyResult::parse(raw);
                return Ok(());
            }
            "ancapr3" => {
                self.anca_pr3 = SerologyResult::parse(raw);
                return Ok(());
            }
            "vs" | "esr" => &mut self.esr,
            "crp" => &mut self.crp,
            "ferritin" => &mut self.ferritin,
            "cpk" => &mut self.cpk,
            "ldh" => &mut self.ldh,
            "aldolase" => &mut self.aldolase,
            "rf" => &mut self.rf,
            "anticcp" => &mut self.anti_ccp,
            _ => return Err(unknown_field(Self::SECTION, field)),
        };
        *number = parse_number(raw);
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetedImmunoForm {
    pub anti_dna: bool,
    pub anti_sm: bool,
    pub anti_rnp: bool,
    pub anti_ssa: bool,
    pub anti_ssb: bool,
    pub anti_scl70: bool,
    pub anti_centromere: bool,
    pub anti_rna_pol: bool,
    pub anti_pm_scl: bool,
    pub anti_jo1: bool,
    pub anti_pl7: bool,
    pub anti_pl12: bool,
    pub anti_mda5: bool,
    pub anti_mi2: bool,
    pub anti_ej: bool,
    pub anti_oj: bool,
    pub anti_ks: bool,
}

impl SectionAnswers for TargetedImmunoForm {
    const SECTION: SectionId = SectionId::TargetedImmuno;

    fn apply(&mut self, field: &str, raw: &str) -> Result<(), FormError> {
        let slot = match field_key(field).as_str() {
            "antidna" => &mut self.anti_dna,
            "antism" => &mut self.anti_sm,
            "antirnp" => &mut self.anti_rnp,
            "antissa" => &mut self.anti_ssa,
            "antissb" => &mut self.anti_ssb,
            "antiscl70" => &mut self.anti_scl70,
            "anticentromere" => &mut self.anti_centromere,
            "antirnapol" => &mut self.anti_rna_pol,
            "antipmscl" => &mut self.anti_pm_scl,
            "antijo1" => &mut self.anti_jo1,
            "antipl7" => &mut self.anti_pl7,
            "antipl12" => &mut self.anti_pl12,
            "antimda5" => &mut self.anti_mda5,
            "antimi2" => &mut self.anti_mi2,
            "antiej" => &mut self.anti_ej,
            "antioj" => &mut self.anti_oj,
            "antiks" => &mut self.anti_ks,
            _ => return Err(unknown_field(Self::SECTION, field)),
        };
        *slot = flag_value(Self::SECTION, field, raw)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoughType {
    None,
    Dry,
    Productive,
    Hemoptysis,
}

impl CoughType {
    pub fn parse(raw: &str) -> Option<Self> {
        match lowered(raw).as_str() {
            "none" => Some(Self::None),
            "dry" => Some(Self::Dry),
            "productive" => Some(Self::Productive),
            "hemoptysis" => Some(Self::Hemoptysis),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RespiratoryOnset {
    Recent,
    Subacute,
    Chronic,
}

impl RespiratoryOnset {
    pub fn parse(raw: &str) -> Option<Self> {
        match lowered(raw).as_str() {
            "recent" => Some(Self::Recent),
            "subacute" => Some(Self::Subacute),
            "chronic" => Some(Self::Chronic),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RespiratoryEvolution {
    Stable,
    SlowlyProgressive,
    RapidlyProgressive,
    Fluctuating,
}

impl RespiratoryEvolution {
    pub fn parse(raw: &str) -> Option<Self> {
        match lowered(raw).as_str() {
            "stable" => Some(Self::Stable),
            "slowly-progressive" => Some(Self::SlowlyProgressive),
            "rapidly-progressive" => Some(Self::RapidlyProgressive),
            "fluctuating" => Some(Self::Fluctuating),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RespiratoryForm {
    /// mMRC dyspnea grade, 0 to 4.
    pub mmrc: Option<u8>,
    pub cough: Option<CoughType>,
    pub onset: Option<RespiratoryOnset>,
    pub evolution: Option<RespiratoryEvolution>,
    pub mtx_exposure: bool,
    pub recent_infection: bool,
    pub drug_induced: bool,
}

impl SectionAnswers for RespiratoryForm {
    const SECTION: SectionId = SectionId::Respiratory;

    fn apply(&mut self, field: &str, raw: &str) -> Result<(), FormError> {
        let slot = match field_key(field).as_str() {
            "mmrcdyspnea" | "mmrc" => {
                self.mmrc = raw.trim().parse::<u8>().ok().filter(|grade| *grade <= 4);
                return Ok(());
            }
            "coughtype" => {
                self.cough = CoughType::parse(raw);
                return Ok(());
            }
            "respiratoryonset" => {
                self.onset = RespiratoryOnset::parse(raw);
                return Ok(());
            }
            "respiratoryevolution" => {
                self.evolution = RespiratoryEvolution::parse(raw);
                return Ok(());
            }
            "mtxexposure" => &mut self.mtx_exposure,
            "infectionrecent" => &mut self.recent_infection,
            "druginduced" => &mut self.drug_induced,
            _ => return Err(unknown_field(Self::SECTION, field)),
        };
        *slot = flag_value(Self::SECTION, field, raw)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImagingForm {
    pub fvc: Option<f64>,
    pub dlco: Option<f64>,
    pub spo2: Option<f64>,
    pub kl6: Option<f64>,
    pub spd: Option<f64>,
    pub ccl18: Option<f64>,
    pub il6: Option<f64>,
    pub ground_glass: bool,
    pub reticulations: bool,
    pub honeycombing: bool,
    pub traction_bronchiectasis: bool,
    pub consolidations: bool,
    pub cysts: bool,
    pub lower_predominant: bool,
    pub subpleural_distribution: bool,
    pub peribronchovascular: bool,
    pub subpleural_sparing: bool,
    /// HRCT extension in percent of lung volume.
    pub extension: Option<f64>,
}

impl Default for ImagingForm {
    fn default() -> Self {
        Self {
            fvc: None,
            dlco: None,
            spo2: None,
            kl6: None,
            spd: None,
            ccl18: None,
            il6: None,
            ground_glass: false,
            reticulations: false,
            honeycombing: false,
            traction_bronchiectasis: false,
            consolidations: false,
            cysts: false,
            lower_predominant: false,
            subpleural_distribution: false,
            peribronchovascular: false,
            subpleural_sparing: false,
            extension: Some(0.0),
        }
    }
}

impl SectionAnswers for ImagingForm {
    const SECTION: SectionId = SectionId::Imaging;

    fn apply(&mut self, field: &str, raw: &str) -> Result<(), FormError> {
        let key = field_key(field);
        let number = match key.as_str() {
            "fvc" => Some(&mut self.fvc),
            "dlco" => Some(&mut self.dlco),
            "spo2" => Some(&mut self.spo2),
            "kl6" => Some(&mut self.kl6),
            "spd" => Some(&mut self.spd),
            "ccl18" => Some(&mut self.ccl18),
            "il6level" | "il6" => Some(&mut self.il6),
            "extensionrange" | "extension" => {
                self.extension = parse_whole_number(raw);
                return Ok(());
            }
            _ => None,
        };
        if let Some(number) = number {
            *number = parse_number(raw);
            return Ok(());
        }

        let slot = match key.as_str() {
            "groundglass" => &mut self.ground_glass,
            "reticulations" => &mut self.reticulations,
            "honeycombing" => &mut self.honeycombing,
            "tractionbe" => &mut self.traction_bronchiectasis,
            "consolidations" => &mut self.consolidations,
            "cysts" => &mut self.cysts,
            "lowerpredominant" => &mut self.lower_predominant,
            "subpleuraldist" => &mut self.subpleural_distribution,
            "peribronchovascular" => &mut self.peribronchovascular,
            "subpleuralsparing" => &mut self.subpleural_sparing,
            _ => return Err(unknown_field(Self::SECTION, field)),
        };
        *slot = flag_value(Self::SECTION, field, raw)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternForm {
    pub selected_pattern: Option<HrctPattern>,
}

impl SectionAnswers for PatternForm {
    const SECTION: SectionId = SectionId::Patterns;

    fn apply(&mut self, field: &str, raw: &str) -> Result<(), FormError> {
        match field_key(field).as_str() {
            "selectedpattern" | "pattern" => {
                self.selected_pattern = HrctPattern::parse(raw);
                Ok(())
            }
            _ => Err(unknown_field(Self::SECTION, field)),
        }
    }
}

/// Candidate diagnoses checked in the correlation step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateForm {
    pub checked: BTreeSet<CtdCode>,
}

impl SectionAnswers for CandidateForm {
    const SECTION: SectionId = SectionId::Correlation;

    fn apply(&mut self, field: &str, raw: &str) -> Result<(), FormError> {
        let code = CtdCode::parse(field).ok_or_else(|| unknown_field(Self::SECTION, field))?;
        if flag_value(Self::SECTION, field, raw)? {
            self.checked.insert(code);
        } else {
            self.checked.remove(&code);
        }
        Ok(())
    }
}

/// Positive essential tests, keyed by diagnosis and checklist index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EssentialTestMarks {
    positive: BTreeSet<(CtdCode, usize)>,
}

impl EssentialTestMarks {
    pub fn mark(&mut self, code: CtdCode, index: usize, positive: bool) {
        if positive {
            self.positive.insert((code, index));
        } else {
            self.positive.remove(&(code, index));
        }
    }

    pub fn is_positive(&self, code: CtdCode, index: usize) -> bool {
        self.positive.contains(&(code, index))
    }

    /// Parses a `<CODE>-essential-<index>` field name.
    fn parse_field(field: &str) -> Option<(CtdCode, usize)> {
        let (code, index) = field.trim().split_once("-essential-")?;
        Some((CtdCode::parse(code)?, index.trim().parse().ok()?))
    }
}

impl SectionAnswers for EssentialTestMarks {
    const SECTION: SectionId = SectionId::EssentialTests;

    fn apply(&mut self, field: &str, raw: &str) -> Result<(), FormError> {
        let (code, index) =
            Self::parse_field(field).ok_or_else(|| unknown_field(Self::SECTION, field))?;
        let positive = flag_value(Self::SECTION, field, raw)?;
        self.mark(code, index, positive);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IldSeverity {
    Mild,
    Moderate,
    Severe,
    RpIld,
    EndStage,
}

impl IldSeverity {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Mild,
            Self::Moderate,
            Self::Severe,
            Self::RpIld,
            Self::EndStage,
        ]
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match lowered(raw).as_str() {
            "mild" => Some(Self::Mild),
            "moderate" => Some(Self::Moderate),
            "severe" => Some(Self::Severe),
            "rp-ild" => Some(Self::RpIld),
            "end-stage" => Some(Self::EndStage),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Mild => "Légère/Limitée (ex: CVF >80%, atteinte HRCT <10-20%)",
            Self::Moderate => "Modérée (ex: CVF 50-80%, atteinte HRCT 20-40%)",
            Self::Severe => "Sévère (ex: CVF <50%, atteinte HRCT >40%, hypoxémie)",
            Self::RpIld => "Rapidement Progressive (RP-ILD)",
            Self::EndStage => "Terminale (O2-dépendante, CVF très basse)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiseaseProgression {
    Stable,
    SlowlyProgressive,
    RapidlyProgressive,
    AcuteExacerbation,
}

impl DiseaseProgression {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Stable,
            Self::SlowlyProgressive,
            Self::RapidlyProgressive,
            Self::AcuteExacerbation,
        ]
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match lowered(raw).as_str() {
            "stable" => Some(Self::Stable),
            "slowly_progressive" => Some(Self::SlowlyProgressive),
            "rapidly_progressive" => Some(Self::RapidlyProgressive),
            "acute_exacerbation" => Some(Self::AcuteExacerbation),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Stable => "Stable ou amélioration",
            Self::SlowlyProgressive => "Lentement progressive (clinique/EFR/HRCT)",
            Self::RapidlyProgressive => "Rapidement progressive (clinique/EFR/HRCT)",
            Self::AcuteExacerbation => "Exacerbation aiguë d'ILD",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreatmentInputs {
    pub ild_severity: Option<IldSeverity>,
    pub disease_progression: Option<DiseaseProgression>,
    pub factors: BTreeSet<PrognosticFactor>,
}

impl TreatmentInputs {
    pub fn has(&self, factor: PrognosticFactor) -> bool {
        self.factors.contains(&factor)
    }
}

impl SectionAnswers for TreatmentInputs {
    const SECTION: SectionId = SectionId::TreatmentPlan;

    fn apply(&mut self, field: &str, raw: &str) -> Result<(), FormError> {
        match field_key(field).as_str() {
            "ildseverity" => {
                self.ild_severity = IldSeverity::parse(raw);
                return Ok(());
            }
            "diseaseprogression" => {
                self.disease_progression = DiseaseProgression::parse(raw);
                return Ok(());
            }
            // legacy checkboxes: validated, not used by any protocol rule
            "hypoxemia" | "badprognosismda5" => {
                flag_value(Self::SECTION, field, raw)?;
                return Ok(());
            }
            _ => {}
        }

        let factor =
            PrognosticFactor::from_key(field).ok_or_else(|| unknown_field(Self::SECTION, field))?;
        if flag_value(Self::SECTION, field, raw)? {
            self.factors.insert(factor);
        } else {
            self.factors.remove(&factor);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreatmentPhase {
    Initiation,
    Stabilization,
    Maintenance,
    Progression,
}

impl TreatmentPhase {
    pub fn parse(raw: &str) -> Option<Self> {
        match lowered(raw).as_str() {
            "initiation" => Some(Self::Initiation),
            "stabilization" => Some(Self::Stabilization),
            "maintenance" => Some(Self::Maintenance),
            "progression" => Some(Self::Progression),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Initiation => "Initiation (0-6 mois)",
            Self::Stabilization => "Stabilisation (6-18 mois)",
            Self::Maintenance => "Maintenance (>18 mois)",
            Self::Progression => "Progression malgré traitement",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowUpInputs {
    pub treatment_phase: Option<TreatmentPhase>,
}

impl Default for FollowUpInputs {
    fn default() -> Self {
        Self {
            treatment_phase: Some(TreatmentPhase::Initiation),
        }
    }
}

impl SectionAnswers for FollowUpInputs {
    const SECTION: SectionId = SectionId::FollowUp;

    fn apply(&mut self, field: &str, raw: &str) -> Result<(), FormError> {
        match field_key(field).as_str() {
            "treatmentphase" => self.treatment_phase = TreatmentPhase::parse(raw),
            // legacy field, superseded by the treatment phase
            "carephase" => {}
            _ => return Err(unknown_field(Self::SECTION, field)),
        }
        Ok(())
    }
}

/// All answers captured during a session, one record per wizard section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormData {
    pub anamnesis: AnamnesisForm,
    pub clinical: ClinicalForm,
    pub standard_bio: StandardBioForm,
    pub targeted_immuno: TargetedImmunoForm,
    pub respiratory: RespiratoryForm,
    pub imaging: ImagingForm,
    pub patterns: PatternForm,
    pub correlation: CandidateForm,
    pub essential_tests: EssentialTestMarks,
    pub treatment: TreatmentInputs,
    pub follow_up: FollowUpInputs,
}

impl FormData {
    /// Updates a single field, leaving every other answer untouched.
    pub fn apply(&mut self, section: SectionId, field: &str, raw: &str) -> Result<(), FormError> {
        match section {
            SectionId::Anamnese => self.anamnesis.apply(field, raw),
            SectionId::Clinical => self.clinical.apply(field, raw),
            SectionId::StandardBio => self.standard_bio.apply(field, raw),
            SectionId::TargetedImmuno => self.targeted_immuno.apply(field, raw),
            SectionId::Respiratory => self.respiratory.apply(field, raw),
            SectionId::Imaging => self.imaging.apply(field, raw),
            SectionId::Patterns => self.patterns.apply(field, raw),
            SectionId::Correlation => self.correlation.apply(field, raw),
            SectionId::EssentialTests => self.essential_tests.apply(field, raw),
            SectionId::TreatmentPlan => self.treatment.apply(field, raw),
            SectionId::FollowUp => self.follow_up.apply(field, raw),
            SectionId::FinalDiagnosis | SectionId::Report => {
                Err(FormError::ReadOnlySection(section))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_touches_only_the_named_field() {
        let mut forms = FormData::default();
        forms
            .apply(SectionId::Clinical, "arthritis", "true")
            .expect("arthritis flag");
        let mut expected = FormData::default();
        expected.clinical.arthritis = true;
        assert_eq!(forms, expected);
    }

    #[test]
    fn non_numeric_values_are_stored_as_absent() {
        let mut forms = FormData::default();
        forms
            .apply(SectionId::Imaging, "fvc", "62")
            .expect("numeric fvc");
        assert_eq!(forms.imaging.fvc, Some(62.0));
        forms
            .apply(SectionId::Imaging, "fvc", "unknown")
            .expect("non numeric fvc");
        assert_eq!(forms.imaging.fvc, None);
        forms
            .apply(SectionId::Imaging, "dlco", "38,5")
            .expect("decimal comma");
        assert_eq!(forms.imaging.dlco, Some(38.5));
    }

    #[test]
    fn unknown_enumerations_are_stored_as_absent() {
        let mut forms = FormData::default();
        forms
            .apply(SectionId::StandardBio, "anaTiter", "1/320")
            .expect("titer");
        assert_eq!(forms.standard_bio.ana_titer, Some(AnaTiter::T320));
        forms
            .apply(SectionId::StandardBio, "anaPattern", "granular")
            .expect("pattern");
        assert_eq!(forms.standard_bio.ana_pattern, None);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let mut forms = FormData::default();
        let err = forms
            .apply(SectionId::Clinical, "tailLength", "1")
            .expect_err("unknown field");
        match err {
            FormError::UnknownField { section, field } => {
                assert_eq!(section, SectionId::Clinical);
                assert_eq!(field, "tailLength");
            }
            other => panic!("expected unknown field, got {other:?}"),
        }
    }

    #[test]
    fn read_only_sections_reject_answers() {
        let mut forms = FormData::default();
        assert_eq!(
            forms.apply(SectionId::Report, "anything", "1"),
            Err(FormError::ReadOnlySection(SectionId::Report))
        );
    }

    #[test]
    fn invalid_flags_are_rejected() {
        let mut forms = FormData::default();
        let err = forms
            .apply(SectionId::TargetedImmuno, "antiMda5", "maybe")
            .expect_err("invalid flag");
        assert!(matches!(err, FormError::InvalidFlag { .. }));
    }

    #[test]
    fn field_names_ignore_case_and_separators() {
        let mut forms = FormData::default();
        forms
            .apply(SectionId::Imaging, "il6_level", "12")
            .expect("il6");
        forms
            .apply(SectionId::Anamnese, "DelaiEvolution", "aigu")
            .expect("delay");
        assert_eq!(forms.imaging.il6, Some(12.0));
        assert_eq!(forms.anamnesis.evolution_delay, Some(EvolutionDelay::Acute));
    }

    #[test]
    fn essential_test_fields_carry_code_and_index() {
        let mut forms = FormData::default();
        forms
            .apply(SectionId::EssentialTests, "SSc-essential-3", "oui")
            .expect("essential mark");
        assert!(forms.essential_tests.is_positive(CtdCode::Ssc, 3));
        assert!(!forms.essential_tests.is_positive(CtdCode::Ssc, 2));
        assert!(forms
            .apply(SectionId::EssentialTests, "SSc-optional-1", "1")
            .is_err());
    }

    #[test]
    fn candidate_checks_toggle_codes() {
        let mut forms = FormData::default();
        forms
            .apply(SectionId::Correlation, "IPAF", "true")
            .expect("ipaf");
        forms
            .apply(SectionId::Correlation, "SSc", "1")
            .expect("ssc");
        forms
            .apply(SectionId::Correlation, "SSc", "0")
            .expect("ssc unchecked");
        assert_eq!(
            forms.correlation.checked.iter().copied().collect::<Vec<_>>(),
            vec![CtdCode::Ipaf]
        );
    }

    #[test]
    fn legacy_treatment_aliases_fold_into_factors() {
        let mut forms = FormData::default();
        forms
            .apply(SectionId::TreatmentPlan, "antiMda5Risk", "true")
            .expect("legacy mda5");
        forms
            .apply(SectionId::TreatmentPlan, "ildSeverity", "rp-ild")
            .expect("severity");
        assert!(forms.treatment.has(PrognosticFactor::AntiMda5Positive));
        assert_eq!(forms.treatment.ild_severity, Some(IldSeverity::RpIld));
    }

    #[test]
    fn legacy_checkboxes_are_validated_but_not_stored() {
        let mut forms = FormData::default();
        forms
            .apply(SectionId::TreatmentPlan, "hypoxemia", "oui")
            .expect("hypoxemia accepted");
        forms
            .apply(SectionId::TreatmentPlan, "badPrognosisMDA5", "non")
            .expect("mda5 checkbox accepted");
        forms
            .apply(SectionId::FollowUp, "carePhase", "maintenance")
            .expect("care phase accepted");
        assert_eq!(forms, FormData::default());

        let err = forms
            .apply(SectionId::TreatmentPlan, "hypoxemia", "sometimes")
            .expect_err("invalid flag");
        assert!(matches!(err, FormError::InvalidFlag { .. }));
    }

    #[test]
    fn age_and_extension_keep_the_whole_part_only() {
        let mut forms = FormData::default();
        forms
            .apply(SectionId::Anamnese, "age", "60.9")
            .expect("age");
        forms
            .apply(SectionId::Imaging, "extension", "20,5")
            .expect("extension");
        forms
            .apply(SectionId::Imaging, "fvc", "69.5")
            .expect("fvc");
        assert_eq!(forms.anamnesis.age, Some(60.0));
        assert_eq!(forms.imaging.extension, Some(20.0));
        assert_eq!(forms.imaging.fvc, Some(69.5));
    }

    #[test]
    fn follow_up_defaults_to_initiation() {
        let forms = FormData::default();
        assert_eq!(
            forms.follow_up.treatment_phase,
            Some(TreatmentPhase::Initiation)
        );
        assert_eq!(forms.imaging.extension, Some(0.0));
    }
}
