use chrono::{Local, NaiveDate};
use ctd_ild::config::{ReportConfig, ReportFormat};
use ctd_ild::error::AppError;
use ctd_ild::workflows::assessment::AssessmentReport;
use ctd_ild::workflows::intake::ImportedAnswers;

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_report_format(raw: &str) -> Result<ReportFormat, String> {
    ReportFormat::parse(raw).ok_or_else(|| format!("unsupported report format '{raw}' (text|json)"))
}

pub(crate) fn report_date(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(|| Local::now().date_naive())
}

/// Flags given on the command line win over the loaded configuration.
pub(crate) fn effective_report_config(
    config: &ReportConfig,
    format: Option<ReportFormat>,
    author: Option<String>,
) -> ReportConfig {
    ReportConfig {
        format: format.unwrap_or(config.format),
        author: author.or_else(|| config.author.clone()),
    }
}

pub(crate) fn warn_skipped(imported: &ImportedAnswers) {
    for skipped in &imported.skipped {
        eprintln!(
            "warning: row {} ignored ({} / {}): {}",
            skipped.row, skipped.section, skipped.field, skipped.reason
        );
    }
}

pub(crate) fn emit_report(report: &AssessmentReport, format: ReportFormat) -> Result<(), AppError> {
    match format {
        ReportFormat::Text => print!("{}", report.render_text()),
        ReportFormat::Json => println!("{}", report.to_json()?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_accepts_iso_dates() {
        assert_eq!(
            parse_date(" 2024-03-05 "),
            Ok(NaiveDate::from_ymd_opt(2024, 3, 5).expect("valid date"))
        );
        assert!(parse_date("05/03/2024").is_err());
    }

    #[test]
    fn command_line_overrides_loaded_settings() {
        let loaded = ReportConfig {
            format: ReportFormat::Json,
            author: Some("Service de Pneumologie".to_string()),
        };

        let merged = effective_report_config(&loaded, Some(ReportFormat::Text), None);
        assert_eq!(merged.format, ReportFormat::Text);
        assert_eq!(merged.author.as_deref(), Some("Service de Pneumologie"));

        let merged = effective_report_config(&loaded, None, Some("Dr Martin".to_string()));
        assert_eq!(merged.format, ReportFormat::Json);
        assert_eq!(merged.author.as_deref(), Some("Dr Martin"));
    }

    #[test]
    fn parse_report_format_rejects_unknown_values() {
        assert_eq!(parse_report_format("json"), Ok(ReportFormat::Json));
        assert!(parse_report_format("pdf").is_err());
    }
}
