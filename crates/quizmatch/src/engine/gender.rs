use super::domain::{Gender, ResultDefinition};

/// Narrows candidates to those targeted at the respondent or untargeted.
///
/// Without a respondent gender nothing can be filtered and every candidate is kept.
pub(crate) fn filter_by_gender<'a>(
    candidates: &[&'a ResultDefinition],
    gender: Option<Gender>,
) -> Vec<&'a ResultDefinition> {
    match gender {
        Some(gender) => candidates
            .iter()
            .copied()
            .filter(|definition| definition.applies_to(gender))
            .collect(),
        None => candidates.to_vec(),
    }
}
