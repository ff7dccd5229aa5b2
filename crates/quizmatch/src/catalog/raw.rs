use serde::{Deserialize, Deserializer};

use crate::engine::domain::{
    CodePattern, Gender, MatchCondition, ResultDefinition, ResultId, ResultPresentation,
    ScoreRange,
};

/// Result definition as authored in the catalog store, before normalization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawResultDefinition {
    #[serde(default, deserialize_with = "id_as_string")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub theme: Option<serde_json::Value>,
    #[serde(default, alias = "targetGender")]
    pub target_gender: Option<String>,
    #[serde(default, alias = "matchCondition")]
    pub match_condition: Option<RawMatchCondition>,
}

/// Loosely-typed rule object: a `type` hint, a `codes` array, and/or aliased numeric bounds.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMatchCondition {
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub codes: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub min: Option<f64>,
    #[serde(default, alias = "minScore", deserialize_with = "lenient_number")]
    pub min_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub max: Option<f64>,
    #[serde(default, alias = "maxScore", deserialize_with = "lenient_number")]
    pub max_score: Option<f64>,
}

/// Reason a catalog entry was excluded from matching.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogEntryError {
    #[error("result definition has no id")]
    MissingId,
    #[error("match condition is missing")]
    MissingCondition,
    #[error("match condition sets both a code set and a score range")]
    ConflictingConditions,
    #[error("score range minimum {min} exceeds maximum {max}")]
    InvertedRange { min: f64, max: f64 },
    #[error("score range bound is not a finite number")]
    NonFiniteBound,
    #[error("unknown target gender '{0}'")]
    UnknownGender(String),
    #[error("result definition has an invalid shape: {0}")]
    InvalidShape(String),
}

/// Decoded entry, or the id it carried (if readable) and why it was set aside.
pub(crate) type DecodedEntry = Result<RawResultDefinition, (Option<String>, CatalogEntryError)>;

/// Decodes one JSON catalog entry. A badly typed field rejects this entry only.
pub(crate) fn decode_entry(value: serde_json::Value) -> DecodedEntry {
    let id = match value.get("id") {
        Some(serde_json::Value::String(text)) => Some(text.clone()),
        Some(serde_json::Value::Number(number)) => Some(number.to_string()),
        _ => None,
    };

    serde_json::from_value(value)
        .map_err(|err| (id, CatalogEntryError::InvalidShape(err.to_string())))
}

impl RawResultDefinition {
    /// Normalizes into the tagged-union shape the engine consumes.
    pub fn normalize(self) -> Result<ResultDefinition, CatalogEntryError> {
        let id = self
            .id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .ok_or(CatalogEntryError::MissingId)?;
        let target_gender = parse_target_gender(self.target_gender.as_deref())?;
        let condition = self
            .match_condition
            .ok_or(CatalogEntryError::MissingCondition)?
            .normalize()?;

        Ok(ResultDefinition {
            id: ResultId(id),
            condition,
            target_gender,
            presentation: ResultPresentation {
                name: self.name,
                description: self.description,
                theme: self.theme,
            },
        })
    }
}

impl RawMatchCondition {
    pub fn normalize(self) -> Result<MatchCondition, CatalogEntryError> {
        let kind = self
            .kind
            .as_deref()
            .map(|kind| kind.trim().to_ascii_lowercase());
        let has_codes = self.codes.is_some() || kind.as_deref() == Some("code");
        let has_range = [self.min, self.min_score, self.max, self.max_score]
            .iter()
            .any(Option::is_some)
            || matches!(kind.as_deref(), Some("score" | "range"));

        match (has_codes, has_range) {
            (true, true) => Err(CatalogEntryError::ConflictingConditions),
            (false, false) => Err(CatalogEntryError::MissingCondition),
            (true, false) => Ok(MatchCondition::CodeSet {
                entries: parse_entries(self.codes.unwrap_or_default()),
            }),
            (false, true) => {
                let defaults = ScoreRange::default();
                let min = self.min.or(self.min_score).unwrap_or(defaults.min);
                let max = self.max.or(self.max_score).unwrap_or(defaults.max);
                if !min.is_finite() || max.is_nan() {
                    return Err(CatalogEntryError::NonFiniteBound);
                }
                if min > max {
                    return Err(CatalogEntryError::InvertedRange { min, max });
                }
                Ok(MatchCondition::ScoreRange(ScoreRange::new(min, max)))
            }
        }
    }
}

fn parse_entries(raw: Vec<String>) -> Vec<CodePattern> {
    raw.iter()
        .filter_map(|entry| {
            let parsed = CodePattern::parse(entry);
            if parsed.is_none() {
                tracing::debug!(entry = %entry, "dropping unparseable code entry");
            }
            parsed
        })
        .collect()
}

pub(crate) fn parse_target_gender(raw: Option<&str>) -> Result<Option<Gender>, CatalogEntryError> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "any" | "all" | "both" => Ok(None),
        other => Gender::parse(other)
            .map(Some)
            .ok_or_else(|| CatalogEntryError::UnknownGender(raw.to_string())),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<NumberOrString>::deserialize(deserializer)?;
    match value {
        None => Ok(None),
        Some(NumberOrString::Number(number)) => Ok(Some(number)),
        Some(NumberOrString::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(NumberOrString::Text(text)) => text
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("'{text}' is not a number"))),
    }
}

fn id_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i64),
        Text(String),
    }

    Ok(Option::<RawId>::deserialize(deserializer)?.map(|id| match id {
        RawId::Number(number) => number.to_string(),
        RawId::Text(text) => text,
    }))
}
