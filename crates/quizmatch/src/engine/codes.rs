use tracing::debug;

use super::config::MatcherConfig;
use super::domain::{CodePattern, ResultDefinition};
use super::frequency::CodeFrequency;
use super::MatchStrategy;

/// Runs the four code strategies in priority order against one candidate pass.
pub(crate) fn resolve_codes<'a>(
    candidates: &[&'a ResultDefinition],
    frequency: &CodeFrequency,
    config: &MatcherConfig,
) -> Option<(&'a ResultDefinition, MatchStrategy)> {
    let top = frequency.top().code.as_str();

    if let Some(definition) = find_entry(candidates, |entry| entry.is_single(top)) {
        return Some((definition, MatchStrategy::ExactCode));
    }

    if frequency.top_is_dominant(config) {
        if let Some(definition) = find_entry(candidates, |entry| entry.is_pair(top, top)) {
            return Some((definition, MatchStrategy::DominantPair));
        }
    } else {
        debug!(code = top, "top code not dominant; skipping self-combination");
    }

    if let Some(runner_up) = frequency.runner_up() {
        let second = runner_up.code.as_str();
        let found = find_entry(candidates, |entry| entry.is_pair(top, second))
            .or_else(|| find_entry(candidates, |entry| entry.is_pair(second, top)));
        if let Some(definition) = found {
            return Some((definition, MatchStrategy::TopTwoPair));
        }
    }

    find_entry(candidates, |entry| entry.pair_includes(top))
        .map(|definition| (definition, MatchStrategy::PairInclusion))
}

/// First candidate in catalog order with a code entry satisfying `predicate`.
fn find_entry<'a, F>(
    candidates: &[&'a ResultDefinition],
    predicate: F,
) -> Option<&'a ResultDefinition>
where
    F: Fn(&CodePattern) -> bool,
{
    candidates
        .iter()
        .copied()
        .find(|definition| definition.condition.code_entries().iter().any(&predicate))
}
