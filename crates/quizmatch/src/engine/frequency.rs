use super::config::MatcherConfig;

/// Occurrence count of a single trait code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeCount {
    pub code: String,
    pub count: usize,
}

/// Frequency ranking of the non-empty code slots of one response.
///
/// Codes are ordered by descending count. Equal counts keep first-seen order, so the
/// ranking is fully determined by the input sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeFrequency {
    ranking: Vec<CodeCount>,
    total: usize,
}

impl CodeFrequency {
    /// Returns `None` when the response carries no non-empty code at all.
    pub fn analyze(codes: &[Option<String>]) -> Option<Self> {
        let mut ranking: Vec<CodeCount> = Vec::new();
        let mut total = 0;

        for code in codes.iter().flatten() {
            let code = code.trim();
            if code.is_empty() {
                continue;
            }

            total += 1;
            match ranking.iter_mut().find(|entry| entry.code == code) {
                Some(entry) => entry.count += 1,
                None => ranking.push(CodeCount {
                    code: code.to_string(),
                    count: 1,
                }),
            }
        }

        if ranking.is_empty() {
            return None;
        }

        // `sort_by` is stable; ties stay in first-seen order.
        ranking.sort_by(|a, b| b.count.cmp(&a.count));

        Some(Self { ranking, total })
    }

    pub fn top(&self) -> &CodeCount {
        &self.ranking[0]
    }

    pub fn runner_up(&self) -> Option<&CodeCount> {
        self.ranking.get(1)
    }

    pub fn ranking(&self) -> &[CodeCount] {
        &self.ranking
    }

    /// Number of non-empty code slots.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn count_of(&self, code: &str) -> usize {
        self.ranking
            .iter()
            .find(|entry| entry.code == code)
            .map_or(0, |entry| entry.count)
    }

    /// Whether the top code clears either the share or the margin threshold.
    pub fn top_is_dominant(&self, config: &MatcherConfig) -> bool {
        let top = self.top().count as f64;
        let Some(runner_up) = self.runner_up() else {
            return true;
        };

        top >= config.dominance_share * self.total as f64
            || top >= config.dominance_margin * runner_up.count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(raw: &[&str]) -> Vec<Option<String>> {
        raw.iter().map(|code| Some(code.to_string())).collect()
    }

    #[test]
    fn counts_skip_empty_and_missing_slots() {
        let mut input = codes(&["H", "", "S", "  ", "H"]);
        input.push(None);

        let frequency = CodeFrequency::analyze(&input).expect("codes present");

        assert_eq!(frequency.total(), 3);
        assert_eq!(frequency.top().code, "H");
        assert_eq!(frequency.count_of("H"), 2);
        assert_eq!(frequency.count_of("S"), 1);
        assert_eq!(frequency.count_of("E"), 0);
    }

    #[test]
    fn returns_none_without_usable_codes() {
        assert!(CodeFrequency::analyze(&[]).is_none());
        assert!(CodeFrequency::analyze(&[None, Some(" ".to_string())]).is_none());
    }

    #[test]
    fn equal_counts_keep_first_seen_order() {
        let frequency =
            CodeFrequency::analyze(&codes(&["S", "H", "E", "H", "S", "E"])).expect("codes");

        let order: Vec<&str> = frequency
            .ranking()
            .iter()
            .map(|entry| entry.code.as_str())
            .collect();
        assert_eq!(order, vec!["S", "H", "E"]);
    }

    #[test]
    fn higher_count_outranks_earlier_code() {
        let frequency = CodeFrequency::analyze(&codes(&["S", "H", "H"])).expect("codes");
        assert_eq!(frequency.top().code, "H");
        assert_eq!(frequency.runner_up().map(|entry| entry.code.as_str()), Some("S"));
    }

    #[test]
    fn dominance_by_share_margin_or_uniqueness() {
        let config = MatcherConfig::default();

        let by_share = CodeFrequency::analyze(&codes(&["H", "H", "H", "S"])).expect("codes");
        assert!(by_share.top_is_dominant(&config));

        // 2 of 5 is below 60%, but twice the runner-up.
        let by_margin =
            CodeFrequency::analyze(&codes(&["H", "H", "S", "E", "P"])).expect("codes");
        assert!(by_margin.top_is_dominant(&config));

        let single = CodeFrequency::analyze(&codes(&["H"])).expect("codes");
        assert!(single.top_is_dominant(&config));

        let tied = CodeFrequency::analyze(&codes(&["H", "S", "H", "S"])).expect("codes");
        assert!(!tied.top_is_dominant(&config));
    }
}
