use super::domain::{PhaseId, SectionId};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PhaseStep {
    pub id: PhaseId,
    pub phase: &'static str,
    pub title: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub section: SectionId,
    pub label: &'static str,
    pub icon: &'static str,
    pub phase: PhaseId,
}

/// Phase and navigation topology of the assessment wizard.
#[derive(Debug, Clone)]
pub struct AssessmentBlueprint {
    steps: Vec<PhaseStep>,
    nav: Vec<NavItem>,
}

impl AssessmentBlueprint {
    pub fn standard() -> Self {
        Self {
            steps: standard_steps(),
            nav: standard_nav_items(),
        }
    }

    pub fn steps(&self) -> &[PhaseStep] {
        &self.steps
    }

    pub fn nav_items(&self) -> &[NavItem] {
        &self.nav
    }

    pub fn step(&self, phase: PhaseId) -> Option<&PhaseStep> {
        self.steps.iter().find(|step| step.id == phase)
    }

    pub fn nav_item(&self, section: SectionId) -> Option<&NavItem> {
        self.nav.iter().find(|item| item.section == section)
    }

    /// Owning phase of a section. Every section has an entry in the
    /// standard topology.
    pub fn phase_of(&self, section: SectionId) -> PhaseId {
        self.nav_item(section).map(|item| item.phase).unwrap_or(1)
    }

    pub fn sections_for_phase(&self, phase: PhaseId) -> Vec<SectionId> {
        self.nav
            .iter()
            .filter(|item| item.phase == phase)
            .map(|item| item.section)
            .collect()
    }

    /// Section following `section` in navigation order.
    pub fn next_section(&self, section: SectionId) -> Option<SectionId> {
        let index = self.nav.iter().position(|item| item.section == section)?;
        self.nav.get(index + 1).map(|item| item.section)
    }
}

fn standard_steps() -> Vec<PhaseStep> {
    vec![
        PhaseStep {
            id: 1,
            phase: "PHASE 1",
            title: "Présomption Clinique",
        },
        PhaseStep {
            id: 2,
            phase: "PHASE 2",
            title: "Biologie Standard",
        },
        PhaseStep {
            id: 3,
            phase: "PHASE 3",
            title: "Immuno Ciblée",
        },
        PhaseStep {
            id: 4,
            phase: "PHASE 4",
            title: "Atteinte Pulmonaire",
        },
        PhaseStep {
            id: 5,
            phase: "PHASE 5",
            title: "Imagerie & EFR",
        },
        PhaseStep {
            id: 6,
            phase: "PHASE 6",
            title: "Signes Élémentaires",
        },
        PhaseStep {
            id: 7,
            phase: "PHASE 7",
            title: "Corrélation & Sélection Diag.",
        },
        PhaseStep {
            id: 8,
            phase: "PHASE 8",
            title: "Examens Essentiels",
        },
        PhaseStep {
            id: 9,
            phase: "PHASE 9",
            title: "Diagnostic Final",
        },
        PhaseStep {
            id: 10,
            phase: "PHASE 10",
            title: "Traitement & Suivi",
        },
    ]
}

fn standard_nav_items() -> Vec<NavItem> {
    vec![
        NavItem {
            section: SectionId::Anamnese,
            label: "Anamnèse & Facteurs",
            icon: "📋",
            phase: 1,
        },
        NavItem {
            section: SectionId::Clinical,
            label: "Signes Cliniques",
            icon: "🔍",
            phase: 1,
        },
        NavItem {
            section: SectionId::StandardBio,
            label: "Biologie Standard",
            icon: "🧪",
            phase: 2,
        },
        NavItem {
            section: SectionId::TargetedImmuno,
            label: "Immunologie Ciblée",
            icon: "🎯",
            phase: 3,
        },
        NavItem {
            section: SectionId::Respiratory,
            label: "Évaluation Respiratoire",
            icon: "🫁",
            phase: 4,
        },
        NavItem {
            section: SectionId::Imaging,
            label: "Imagerie & EFR",
            icon: "🖼️",
            phase: 5,
        },
        NavItem {
            section: SectionId::Patterns,
            label: "Signes Élémentaires (Pattern HRCT)",
            icon: "🔬",
            phase: 6,
        },
        NavItem {
            section: SectionId::Correlation,
            label: "Corrélation & Sélection Diag.",
            icon: "🧩",
            phase: 7,
        },
        NavItem {
            section: SectionId::EssentialTests,
            label: "Examens Essentiels",
            icon: "🎯",
            phase: 8,
        },
        NavItem {
            section: SectionId::FinalDiagnosis,
            label: "Diagnostic Final",
            icon: "✅",
            phase: 9,
        },
        NavItem {
            section: SectionId::TreatmentPlan,
            label: "Plan Thérapeutique",
            icon: "💊",
            phase: 10,
        },
        NavItem {
            section: SectionId::FollowUp,
            label: "Protocole de Suivi",
            icon: "📅",
            phase: 10,
        },
        NavItem {
            section: SectionId::Report,
            label: "Rapport de Synthèse",
            icon: "📄",
            phase: 10,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nav_follows_section_order() {
        let blueprint = AssessmentBlueprint::standard();
        let sections: Vec<SectionId> = blueprint
            .nav_items()
            .iter()
            .map(|item| item.section)
            .collect();
        assert_eq!(sections, SectionId::ordered().to_vec());
    }

    #[test]
    fn phases_never_decrease_along_navigation() {
        let blueprint = AssessmentBlueprint::standard();
        let phases: Vec<PhaseId> = blueprint.nav_items().iter().map(|item| item.phase).collect();
        assert!(phases.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(blueprint.steps().len(), 10);
    }

    #[test]
    fn phase_ten_owns_the_closing_sections() {
        let blueprint = AssessmentBlueprint::standard();
        assert_eq!(
            blueprint.sections_for_phase(10),
            vec![
                SectionId::TreatmentPlan,
                SectionId::FollowUp,
                SectionId::Report
            ]
        );
        assert_eq!(blueprint.next_section(SectionId::Report), None);
        assert_eq!(
            blueprint.next_section(SectionId::Patterns),
            Some(SectionId::Correlation)
        );
    }
}
