use serde::Serialize;

use crate::workflows::assessment::forms::{FollowUpInputs, TreatmentPhase};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScheduleEntry {
    pub parameter: &'static str,
    pub frequency: &'static str,
}

impl ScheduleEntry {
    /// Parameter name with its first letter capitalised, as printed in the
    /// report table.
    pub fn parameter_label(&self) -> String {
        let mut chars = self.parameter.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FollowUpPlan {
    pub phase: Option<TreatmentPhase>,
    pub schedule: Vec<ScheduleEntry>,
    pub alerts: Vec<&'static str>,
    pub objectives: Vec<&'static str>,
}

impl FollowUpPlan {
    pub fn is_empty(&self) -> bool {
        self.schedule.is_empty() && self.alerts.is_empty() && self.objectives.is_empty()
    }
}

const PARAMETERS: [&str; 6] = [
    "consultation",
    "biologie",
    "efr",
    "hrct",
    "echocardiographie",
    "biomarqueurs",
];

struct PhaseTable {
    frequencies: [&'static str; 6],
    alerts: &'static [&'static str],
    objectives: &'static [&'static str],
}

const INITIATION: PhaseTable = PhaseTable {
    frequencies: [
        "Toutes les 2-4 semaines",
        "Toutes les 2 semaines puis mensuelle",
        "À 1, 3 et 6 mois",
        "À 6 mois",
        "À 6 mois",
        "KL-6, SP-D à 1, 3, 6 mois",
    ],
    alerts: &[
        "Déclin CVF >10% ou >200mL",
        "Déclin DLCO >15%",
        "Progression radiologique",
        "Aggravation dyspnée (+1 mMRC)",
        "Infections opportunistes",
        "Effets secondaires médicamenteux",
    ],
    objectives: &[
        "Stabilisation fonction pulmonaire",
        "Contrôle inflammation (CRP, VS)",
        "Amélioration qualité de vie",
        "Prévention exacerbations",
    ],
};

const STABILIZATION: PhaseTable = PhaseTable {
    frequencies: [
        "Tous les 2-3 mois",
        "Mensuelle puis trimestrielle",
        "Tous les 3-6 mois",
        "Tous les 6-12 mois",
        "Annuelle",
        "Tous les 3-6 mois",
    ],
    alerts: &[
        "Déclin CVF >5% entre 2 mesures",
        "Nouvel épisode de dyspnée",
        "Infection respiratoire",
        "Signes d'HTAP (échocardiographie)",
    ],
    objectives: &[
        "Maintien fonction pulmonaire stable",
        "Sevrage corticoïdes <10mg/j",
        "Retour activités de la vie quotidienne",
        "Prévention complications à long terme",
    ],
};

const MAINTENANCE: PhaseTable = PhaseTable {
    frequencies: [
        "Tous les 3-6 mois",
        "Tous les 3-6 mois",
        "Tous les 6 mois",
        "Annuelle",
        "Annuelle",
        "Tous les 6 mois",
    ],
    alerts: &[
        "Toute détérioration de la fonction pulmonaire",
        "Récidive de l'activité de la CTD",
        "Infections récidivantes",
        "Néoplasies (surveillance accrue)",
    ],
    objectives: &[
        "Prévention de la progression",
        "Qualité de vie optimale",
        "Dose minimale efficace d'immunosuppresseurs",
        "Dépistage complications long terme",
    ],
};

const PROGRESSION: PhaseTable = PhaseTable {
    frequencies: [
        "Rapprochée (selon sévérité)",
        "Régulière (selon traitement)",
        "Fréquente (tous les 1-3 mois)",
        "Selon besoin clinique",
        "Selon besoin clinique",
        "Réguliers (KL-6, SP-D)",
    ],
    alerts: &[
        "Absence d'amélioration malgré adaptation thérapeutique",
        "Effets secondaires majeurs des traitements de seconde ligne",
        "Dégradation rapide de l'état général",
    ],
    objectives: &[
        "Réévaluer le diagnostic et les options thérapeutiques",
        "Discuter greffe pulmonaire si éligible",
        "Soins palliatifs et de support si indiqué",
        "Maintenir la meilleure qualité de vie possible",
    ],
};

const fn table_for(phase: TreatmentPhase) -> &'static PhaseTable {
    match phase {
        TreatmentPhase::Initiation => &INITIATION,
        TreatmentPhase::Stabilization => &STABILIZATION,
        TreatmentPhase::Maintenance => &MAINTENANCE,
        TreatmentPhase::Progression => &PROGRESSION,
    }
}

pub fn evaluate(inputs: &FollowUpInputs) -> FollowUpPlan {
    let Some(phase) = inputs.treatment_phase else {
        return FollowUpPlan::default();
    };
    let table = table_for(phase);

    FollowUpPlan {
        phase: Some(phase),
        schedule: PARAMETERS
            .iter()
            .zip(table.frequencies.iter())
            .map(|(parameter, frequency)| ScheduleEntry {
                parameter,
                frequency,
            })
            .collect(),
        alerts: table.alerts.to_vec(),
        objectives: table.objectives.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_keeps_parameter_order() {
        let plan = evaluate(&FollowUpInputs::default());
        let parameters: Vec<_> = plan.schedule.iter().map(|entry| entry.parameter).collect();
        assert_eq!(parameters, PARAMETERS.to_vec());
        assert_eq!(plan.schedule[5].frequency, "KL-6, SP-D à 1, 3, 6 mois");
        assert_eq!(plan.schedule[0].parameter_label(), "Consultation");
    }

    #[test]
    fn missing_phase_yields_empty_plan() {
        let inputs = FollowUpInputs {
            treatment_phase: None,
            ..FollowUpInputs::default()
        };
        assert!(evaluate(&inputs).is_empty());
    }

    #[test]
    fn progression_phase_has_three_alerts() {
        let inputs = FollowUpInputs {
            treatment_phase: Some(TreatmentPhase::Progression),
            ..FollowUpInputs::default()
        };
        let plan = evaluate(&inputs);
        assert_eq!(plan.alerts.len(), 3);
        assert_eq!(plan.objectives[1], "Discuter greffe pulmonaire si éligible");
    }
}
