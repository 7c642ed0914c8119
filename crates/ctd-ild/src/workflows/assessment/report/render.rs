use std::fmt::{self, Write};

use super::summary::AssessmentReport;
use super::views::{ReportBody, ReportContent};

fn heading(f: &mut impl Write, title: &str) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "{title}")?;
    writeln!(f, "{}", "-".repeat(title.chars().count()))
}

fn bullets<T: fmt::Display>(f: &mut impl Write, items: &[T]) -> fmt::Result {
    for item in items {
        writeln!(f, "  - {item}")?;
    }
    Ok(())
}

fn write_content(f: &mut impl Write, content: &ReportContent) -> fmt::Result {
    heading(f, "DIAGNOSTIC RETENU")?;
    writeln!(f, "{}", content.diagnosis.diagnosis_label)?;
    writeln!(f, "Pattern HRCT : {}", content.diagnosis.pattern_label)?;
    writeln!(
        f,
        "Certitude diagnostique : {}",
        content.diagnosis.confidence_label
    )?;

    heading(f, "SYNTHÈSE CLINIQUE & BIOLOGIQUE")?;
    writeln!(f, "Arguments cliniques :")?;
    bullets(f, &content.synthesis.clinical_arguments)?;
    writeln!(f, "Arguments biologiques :")?;
    bullets(f, &content.synthesis.biological_arguments)?;
    if !content.synthesis.other_arguments.is_empty() {
        writeln!(f, "Autres Arguments :")?;
        bullets(f, &content.synthesis.other_arguments)?;
    }

    heading(f, "ATTEINTE PULMONAIRE")?;
    let pulmonary = &content.pulmonary;
    writeln!(f, "Pattern HRCT : {}", pulmonary.pattern_label)?;
    writeln!(f, "CVF : {}", pulmonary.fvc_label)?;
    writeln!(f, "DLCO : {}", pulmonary.dlco_label)?;
    writeln!(f, "Extension : {}", pulmonary.extension_label)?;
    writeln!(f, "Sévérité ILD : {}", pulmonary.severity)?;

    heading(f, "ÉVALUATION PRONOSTIQUE")?;
    writeln!(f, "Pronostic global : {}", content.prognosis)?;

    if let Some(treatment) = &content.treatment {
        heading(f, "PLAN THÉRAPEUTIQUE PROPOSÉ")?;
        writeln!(f, "{}", treatment.headline)?;
        writeln!(f, "Médications :")?;
        bullets(f, &treatment.medications)?;
        writeln!(f, "Surveillance spécifique au traitement :")?;
        bullets(f, &treatment.monitoring)?;
        if let Some(second_line) = treatment.second_line {
            writeln!(f, "Deuxième ligne : {second_line}")?;
        }
        if !treatment.notes.is_empty() {
            writeln!(f, "Notes :")?;
            bullets(f, &treatment.notes)?;
        }
    }

    if let Some(follow_up) = &content.follow_up {
        heading(f, "PROTOCOLE DE SURVEILLANCE")?;
        if let Some(phase) = follow_up.phase_label {
            writeln!(f, "Phase : {phase}")?;
        }
        writeln!(f, "Calendrier :")?;
        let width = follow_up
            .schedule
            .iter()
            .map(|row| row.parameter_label.chars().count())
            .chain(std::iter::once("Paramètre".chars().count()))
            .max()
            .unwrap_or_default();
        writeln!(f, "  {:<width$} | Fréquence", "Paramètre")?;
        for row in &follow_up.schedule {
            writeln!(f, "  {:<width$} | {}", row.parameter_label, row.frequency)?;
        }
        writeln!(f, "Critères d'Alerte :")?;
        bullets(f, &follow_up.alerts)?;
        writeln!(f, "Objectifs Thérapeutiques :")?;
        bullets(f, &follow_up.objectives)?;
    }

    Ok(())
}

impl fmt::Display for AssessmentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header.title)?;
        writeln!(f, "{}", self.header.subtitle)?;
        writeln!(f, "Date : {}", self.header.date)?;
        if let Some(author) = &self.header.author {
            writeln!(f, "Auteur : {author}")?;
        }

        match &self.body {
            ReportBody::Pending { message } => {
                writeln!(f)?;
                writeln!(f, "{message}")?;
            }
            ReportBody::Complete(content) => write_content(f, content)?,
        }

        writeln!(f)?;
        for line in &self.footer {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

impl AssessmentReport {
    /// Plain-text print form of the report.
    pub fn render_text(&self) -> String {
        self.to_string()
    }
}
