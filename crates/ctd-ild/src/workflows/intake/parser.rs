use super::normalizer::normalize_label;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug)]
pub(crate) struct AnswerRecord {
    pub(crate) row: usize,
    pub(crate) section: String,
    pub(crate) field: String,
    pub(crate) value: String,
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<AnswerRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let mut records = Vec::new();

    for (index, record) in csv_reader.deserialize::<AnswerRow>().enumerate() {
        let row = record?;
        if row.section.trim().is_empty() && row.field.trim().is_empty() {
            continue;
        }

        records.push(AnswerRecord {
            row: index + 1,
            section: normalize_label(&row.section),
            field: row.field.replace(['\u{feff}', '\u{200b}'], ""),
            value: row.value.unwrap_or_default(),
        });
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct AnswerRow {
    #[serde(alias = "Section", alias = "\u{feff}section")]
    section: String,
    #[serde(alias = "Field")]
    field: String,
    #[serde(alias = "Value", default)]
    value: Option<String>,
}
