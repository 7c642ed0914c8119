mod mapping;
mod normalizer;
mod parser;

use crate::workflows::assessment::{FormData, FormError, SectionId};
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

use parser::AnswerRecord;

#[derive(Debug)]
pub enum AnswerImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for AnswerImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnswerImportError::Io(err) => write!(f, "failed to read answers file: {}", err),
            AnswerImportError::Csv(err) => write!(f, "invalid answers CSV data: {}", err),
        }
    }
}

impl std::error::Error for AnswerImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AnswerImportError::Io(err) => Some(err),
            AnswerImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for AnswerImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for AnswerImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Why an answer row was left out of the imported forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    UnknownSection,
    Rejected(FormError),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::UnknownSection => f.write_str("unknown section"),
            SkipReason::Rejected(err) => write!(f, "{err}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedAnswer {
    pub row: usize,
    pub section: String,
    pub field: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Default)]
pub struct ImportedAnswers {
    pub forms: FormData,
    pub applied: usize,
    pub skipped: Vec<SkippedAnswer>,
}

impl ImportedAnswers {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Loads `section,field,value` rows into a fresh set of section answers.
pub struct AnswerImporter;

impl AnswerImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<ImportedAnswers, AnswerImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<ImportedAnswers, AnswerImportError> {
        let mut imported = ImportedAnswers::default();

        for record in parser::parse_records(reader)? {
            match mapping::section_for_label(&record.section) {
                Some(section) => apply_record(section, record, &mut imported),
                None => skip(record, SkipReason::UnknownSection, &mut imported),
            }
        }

        debug!(
            applied = imported.applied,
            skipped = imported.skipped.len(),
            "answer import finished"
        );
        Ok(imported)
    }
}

fn apply_record(section: SectionId, record: AnswerRecord, imported: &mut ImportedAnswers) {
    match imported.forms.apply(section, &record.field, &record.value) {
        Ok(()) => {
            debug!(row = record.row, %section, field = %record.field, "answer applied");
            imported.applied += 1;
        }
        Err(err) => skip(record, SkipReason::Rejected(err), imported),
    }
}

fn skip(record: AnswerRecord, reason: SkipReason, imported: &mut ImportedAnswers) {
    warn!(
        row = record.row,
        section = %record.section,
        field = %record.field,
        %reason,
        "answer row ignored"
    );
    imported.skipped.push(SkippedAnswer {
        row: record.row,
        section: record.section,
        field: record.field,
        reason,
    });
}
