use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{debug, info};

use super::blueprint::AssessmentBlueprint;
use super::domain::{PhaseId, SectionId};

/// Wizard position: the current phase, the section on screen and every
/// phase reached so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseState {
    pub current_phase: PhaseId,
    pub active_section: SectionId,
    pub unlocked_phases: BTreeSet<PhaseId>,
}

impl Default for PhaseState {
    fn default() -> Self {
        Self {
            current_phase: 1,
            active_section: SectionId::Anamnese,
            unlocked_phases: BTreeSet::from([1]),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseStatus {
    Completed,
    Active,
    Available,
    Locked,
}

impl PhaseStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Completed => "Terminée",
            Self::Active => "En cours",
            Self::Available => "Disponible",
            Self::Locked => "Verrouillée",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PhaseProgressEntry {
    pub phase: PhaseId,
    pub phase_label: &'static str,
    pub title: &'static str,
    pub status: PhaseStatus,
    pub status_label: &'static str,
}

/// Gates wizard navigation on the set of unlocked phases.
#[derive(Debug, Clone)]
pub struct PhaseController {
    blueprint: AssessmentBlueprint,
    state: PhaseState,
}

impl Default for PhaseController {
    fn default() -> Self {
        Self::new(AssessmentBlueprint::standard())
    }
}

impl PhaseController {
    pub fn new(blueprint: AssessmentBlueprint) -> Self {
        Self {
            blueprint,
            state: PhaseState::default(),
        }
    }

    pub fn blueprint(&self) -> &AssessmentBlueprint {
        &self.blueprint
    }

    pub fn state(&self) -> &PhaseState {
        &self.state
    }

    pub fn current_phase(&self) -> PhaseId {
        self.state.current_phase
    }

    pub fn active_section(&self) -> SectionId {
        self.state.active_section
    }

    pub fn is_unlocked(&self, phase: PhaseId) -> bool {
        self.state.unlocked_phases.contains(&phase)
    }

    /// Moves to `section` if its phase is unlocked. Returns whether the
    /// state changed; a locked target leaves everything untouched.
    pub fn select_section(&mut self, section: SectionId) -> bool {
        let phase = self.blueprint.phase_of(section);
        if !self.is_unlocked(phase) {
            debug!(section = %section, phase, "navigation blocked: phase locked");
            return false;
        }
        self.state.active_section = section;
        self.state.current_phase = phase;
        true
    }

    /// Unlocks and activates the section after `from`. The report is
    /// terminal, so advancing from it returns `None`.
    pub fn advance(&mut self, from: SectionId) -> Option<SectionId> {
        let next = self.blueprint.next_section(from)?;
        let phase = self.blueprint.phase_of(next);
        if self.state.unlocked_phases.insert(phase) {
            info!(phase, section = %next, "phase unlocked");
        }
        self.state.active_section = next;
        self.state.current_phase = phase;
        Some(next)
    }

    pub fn progress(&self) -> Vec<PhaseProgressEntry> {
        self.blueprint
            .steps()
            .iter()
            .map(|step| {
                let status = self.status_of(step.id);
                PhaseProgressEntry {
                    phase: step.id,
                    phase_label: step.phase,
                    title: step.title,
                    status,
                    status_label: status.label(),
                }
            })
            .collect()
    }

    fn status_of(&self, phase: PhaseId) -> PhaseStatus {
        if !self.is_unlocked(phase) {
            PhaseStatus::Locked
        } else if phase < self.state.current_phase {
            PhaseStatus::Completed
        } else if phase == self.state.current_phase {
            PhaseStatus::Active
        } else {
            PhaseStatus::Available
        }
    }
}
