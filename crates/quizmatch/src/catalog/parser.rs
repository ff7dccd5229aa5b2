use serde::{Deserialize, Deserializer};
use std::io::Read;

use super::raw::{RawMatchCondition, RawResultDefinition};

/// One CSV row tagged with the assessment it belongs to.
#[derive(Debug)]
pub(crate) struct CsvCatalogRecord {
    pub(crate) assessment_id: String,
    pub(crate) definition: RawResultDefinition,
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<CsvCatalogRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for record in csv_reader.deserialize::<CatalogRow>() {
        let row = record?;
        records.push(row.into_record());
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    assessment_id: String,
    result_id: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    target_gender: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    min_score: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    max_score: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    codes: Option<String>,
}

impl CatalogRow {
    fn into_record(self) -> CsvCatalogRecord {
        let codes = self.codes.map(|codes| {
            codes
                .split(';')
                .map(|entry| entry.trim().to_string())
                .filter(|entry| !entry.is_empty())
                .collect::<Vec<_>>()
        });

        // Unparseable bounds are kept as NaN so normalization rejects the row instead of
        // silently widening the range.
        let condition = RawMatchCondition {
            kind: None,
            codes,
            min: None,
            min_score: self.min_score.as_deref().map(parse_bound),
            max: None,
            max_score: self.max_score.as_deref().map(parse_bound),
        };

        CsvCatalogRecord {
            assessment_id: self.assessment_id,
            definition: RawResultDefinition {
                id: Some(self.result_id),
                name: self.name,
                description: None,
                theme: None,
                target_gender: self.target_gender,
                match_condition: Some(condition),
            },
        }
    }
}

fn parse_bound(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(f64::NAN)
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
