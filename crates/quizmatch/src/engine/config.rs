use serde::{Deserialize, Serialize};

/// Thresholds deciding when the most frequent code counts as dominant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Minimum share of non-empty code slots held by the top code.
    pub dominance_share: f64,
    /// Minimum ratio of the top code's count over the runner-up's count.
    pub dominance_margin: f64,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            dominance_share: 0.6,
            dominance_margin: 2.0,
        }
    }
}
