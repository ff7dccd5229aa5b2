use crate::engine::domain::{
    CodePattern, Gender, MatchCondition, MatchInput, ResultDefinition, ScoreRange,
};
use crate::engine::MatchEngine;

pub(super) fn code_result(id: &str, entries: &[&str]) -> ResultDefinition {
    let entries = entries
        .iter()
        .map(|entry| CodePattern::parse(entry).expect("valid code pattern"))
        .collect();
    ResultDefinition::new(id, MatchCondition::CodeSet { entries })
}

pub(super) fn range_result(id: &str, min: f64, max: f64) -> ResultDefinition {
    ResultDefinition::new(id, MatchCondition::ScoreRange(ScoreRange::new(min, max)))
}

pub(super) fn targeted(definition: ResultDefinition, gender: Gender) -> ResultDefinition {
    definition.with_target_gender(gender)
}

pub(super) fn response(score: f64, codes: &[&str]) -> MatchInput {
    MatchInput::new(score).with_codes(codes.iter().copied())
}

pub(super) fn engine() -> MatchEngine {
    MatchEngine::default()
}

pub(super) fn selected_id(catalog: &[ResultDefinition], input: &MatchInput) -> Option<String> {
    engine()
        .select(catalog, input)
        .map(|outcome| outcome.definition.id.0.clone())
}
