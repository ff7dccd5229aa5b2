use super::domain::{Gender, ResultDefinition};

/// Last-resort pick: the first definition targeted at the respondent's gender,
/// otherwise the first definition in catalog order.
pub(crate) fn select_fallback<'a>(
    catalog: &[&'a ResultDefinition],
    gender: Option<Gender>,
) -> Option<&'a ResultDefinition> {
    gender
        .and_then(|gender| {
            catalog
                .iter()
                .copied()
                .find(|definition| definition.target_gender == Some(gender))
        })
        .or_else(|| catalog.first().copied())
}
