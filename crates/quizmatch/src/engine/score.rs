use super::domain::ResultDefinition;

/// Selects the tightest score band containing `total_score`.
///
/// Equal spans resolve to the earliest candidate in catalog order.
pub(crate) fn resolve_score<'a>(
    candidates: &[&'a ResultDefinition],
    total_score: f64,
) -> Option<&'a ResultDefinition> {
    let mut best: Option<(&'a ResultDefinition, f64)> = None;

    for definition in candidates.iter().copied() {
        let Some(range) = definition.condition.score_range() else {
            continue;
        };
        if !range.contains(total_score) {
            continue;
        }

        let span = range.span();
        match best {
            Some((_, best_span)) if span >= best_span => {}
            _ => best = Some((definition, span)),
        }
    }

    best.map(|(definition, _)| definition)
}
