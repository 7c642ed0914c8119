mod render;
mod summary;
pub mod views;

pub use summary::AssessmentReport;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::assessment::domain::{CtdCode, HrctPattern, SectionId};
    use crate::workflows::assessment::session::AssessmentSession;
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).expect("valid date")
    }

    #[test]
    fn pending_report_explains_missing_diagnosis() {
        let session = AssessmentSession::new();

        let report = AssessmentReport::assemble(&session, date());
        let text = report.render_text();

        assert!(!report.is_complete());
        assert!(text.starts_with("RAPPORT MÉDICAL SPÉCIALISÉ\n"));
        assert!(text.contains("Date : 05/03/2024"));
        assert!(text.contains("Le diagnostic final n'a pas encore été établi."));
        assert!(!text.contains("DIAGNOSTIC RETENU"));
    }

    #[test]
    fn complete_report_lists_every_section() {
        let mut session = AssessmentSession::new();
        session.forms_mut().imaging.fvc = Some(45.0);
        session.forms_mut().imaging.extension = Some(60.0);
        session.forms_mut().patterns.selected_pattern = Some(HrctPattern::Uip);
        for section in [
            SectionId::Anamnese,
            SectionId::TargetedImmuno,
            SectionId::Imaging,
            SectionId::Patterns,
            SectionId::FinalDiagnosis,
            SectionId::TreatmentPlan,
            SectionId::FollowUp,
        ] {
            session.analyze(section);
        }

        let report = AssessmentReport::assemble(&session, date()).with_author(Some(" Dr Martin "));
        let text = report.render_text();

        let content = report.content().expect("diagnosis established");
        assert_eq!(content.diagnosis.code, CtdCode::Ipaf);
        assert_eq!(content.pulmonary.fvc_label, "45%");
        assert_eq!(content.pulmonary.dlco_label, "NR");
        assert_eq!(content.prognosis, "Sombre (pattern UIP)");
        assert!(text.contains("Auteur : Dr Martin"));
        assert!(text.contains("IPAF (Interstitial Pneumonia with Autoimmune Features)-ILD"));
        assert!(text.contains("Données cliniques non détaillées."));
        assert!(text.contains("Sérologie auto-immune non détaillée."));
        assert!(text.contains("Sévérité ILD : Sévère"));
        assert!(text.contains("PLAN THÉRAPEUTIQUE PROPOSÉ"));
        assert!(text.contains("Consultation"));
        assert!(text.contains("Japanese Respiratory Society"));
    }

    #[test]
    fn json_report_tags_body_status() {
        let session = AssessmentSession::new();
        let report = AssessmentReport::assemble(&session, date());

        let json = report.to_json().expect("serialises");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");

        assert_eq!(value["body"]["status"], "pending");
        assert_eq!(value["header"]["date"], "05/03/2024");
    }
}
