use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for an assessment (one quiz definition).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssessmentId(pub String);

impl fmt::Display for AssessmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for a result definition within an assessment catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultId(pub String);

impl fmt::Display for ResultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Respondent demographic attribute used for soft targeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    /// Case-insensitive parse of the two supported values.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            _ => None,
        }
    }
}

/// Inclusive numeric band used by score-based result definitions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreRange {
    pub min: f64,
    pub max: f64,
}

impl ScoreRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, score: f64) -> bool {
        self.min <= score && score <= self.max
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

impl Default for ScoreRange {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: f64::INFINITY,
        }
    }
}

/// One entry of a code set: a single trait code or an ordered two-code combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodePattern {
    Single(String),
    Pair(String, String),
}

impl CodePattern {
    /// Parses `"P"` or `"H+E"`. Blank entries, blank members, and more than two members yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let parts: Vec<&str> = raw.split('+').map(str::trim).collect();
        if parts.iter().any(|part| part.is_empty()) {
            return None;
        }

        match parts.as_slice() {
            [code] => Some(CodePattern::Single((*code).to_string())),
            [first, second] => Some(CodePattern::Pair(
                (*first).to_string(),
                (*second).to_string(),
            )),
            _ => None,
        }
    }

    pub fn is_single(&self, code: &str) -> bool {
        matches!(self, CodePattern::Single(single) if single == code)
    }

    /// Order-significant pair comparison.
    pub fn is_pair(&self, first: &str, second: &str) -> bool {
        matches!(self, CodePattern::Pair(a, b) if a == first && b == second)
    }

    pub fn pair_includes(&self, code: &str) -> bool {
        matches!(self, CodePattern::Pair(a, b) if a == code || b == code)
    }
}

impl fmt::Display for CodePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodePattern::Single(code) => f.write_str(code),
            CodePattern::Pair(first, second) => write!(f, "{first}+{second}"),
        }
    }
}

/// Rule attached to a result definition. Exactly one variant by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchCondition {
    ScoreRange(ScoreRange),
    CodeSet { entries: Vec<CodePattern> },
}

impl MatchCondition {
    pub fn score_range(&self) -> Option<&ScoreRange> {
        match self {
            MatchCondition::ScoreRange(range) => Some(range),
            MatchCondition::CodeSet { .. } => None,
        }
    }

    pub fn code_entries(&self) -> &[CodePattern] {
        match self {
            MatchCondition::CodeSet { entries } => entries,
            MatchCondition::ScoreRange(_) => &[],
        }
    }
}

/// Presentational payload carried through matching untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultPresentation {
    pub name: Option<String>,
    pub description: Option<String>,
    pub theme: Option<serde_json::Value>,
}

/// One possible classification outcome for an assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultDefinition {
    pub id: ResultId,
    pub condition: MatchCondition,
    pub target_gender: Option<Gender>,
    #[serde(default)]
    pub presentation: ResultPresentation,
}

impl ResultDefinition {
    pub fn new(id: impl Into<String>, condition: MatchCondition) -> Self {
        Self {
            id: ResultId(id.into()),
            condition,
            target_gender: None,
            presentation: ResultPresentation::default(),
        }
    }

    pub fn with_target_gender(mut self, gender: Gender) -> Self {
        self.target_gender = Some(gender);
        self
    }

    pub fn applies_to(&self, gender: Gender) -> bool {
        self.target_gender.map_or(true, |target| target == gender)
    }
}

/// One completed response, assembled by the response collector.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MatchInput {
    pub total_score: f64,
    pub codes: Vec<Option<String>>,
    pub gender: Option<Gender>,
}

impl MatchInput {
    pub fn new(total_score: f64) -> Self {
        Self {
            total_score,
            ..Self::default()
        }
    }

    pub fn with_codes<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.codes = codes.into_iter().map(|code| Some(code.into())).collect();
        self
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }
}
