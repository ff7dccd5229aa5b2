//! Result-matching engine.
//!
//! Given a completed response and the result catalog of its assessment, the engine selects
//! exactly one result definition (or none for an empty catalog). Code patterns are tried
//! first, then score bands, then a deterministic fallback. Each rule-based step runs against
//! the gender-filtered candidates first and the full catalog second.

mod codes;
mod config;
pub mod domain;
mod fallback;
mod frequency;
mod gender;
mod score;

#[cfg(test)]
mod tests;

pub use config::MatcherConfig;
pub use domain::{
    AssessmentId, CodePattern, Gender, MatchCondition, MatchInput, ResultDefinition,
    ResultId, ResultPresentation, ScoreRange,
};
pub use frequency::{CodeCount, CodeFrequency};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which rule produced a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    ExactCode,
    DominantPair,
    TopTwoPair,
    PairInclusion,
    ScoreRange,
    Fallback,
}

impl MatchStrategy {
    pub fn label(&self) -> &'static str {
        match self {
            MatchStrategy::ExactCode => "exact code",
            MatchStrategy::DominantPair => "dominant code pair",
            MatchStrategy::TopTwoPair => "top-two code pair",
            MatchStrategy::PairInclusion => "code pair inclusion",
            MatchStrategy::ScoreRange => "score range",
            MatchStrategy::Fallback => "fallback",
        }
    }
}

/// Candidate set a selection was made from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidatePass {
    GenderFiltered,
    FullCatalog,
}

/// Selected definition plus the provenance of the decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchOutcome<'a> {
    pub definition: &'a ResultDefinition,
    pub strategy: MatchStrategy,
    pub pass: CandidatePass,
}

impl MatchOutcome<'_> {
    /// True when no rule matched and the default policy picked the result.
    pub fn is_fallback(&self) -> bool {
        self.strategy == MatchStrategy::Fallback
    }
}

/// Stateless matcher applying the configured dominance thresholds.
#[derive(Debug, Clone, Default)]
pub struct MatchEngine {
    config: MatcherConfig,
}

impl MatchEngine {
    pub fn new(config: MatcherConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    pub fn select<'a>(
        &self,
        catalog: &'a [ResultDefinition],
        input: &MatchInput,
    ) -> Option<MatchOutcome<'a>> {
        if catalog.is_empty() {
            return None;
        }

        let all: Vec<&'a ResultDefinition> = catalog.iter().collect();
        let filtered = gender::filter_by_gender(&all, input.gender);

        let mut passes = vec![(CandidatePass::GenderFiltered, filtered.as_slice())];
        if filtered.len() != all.len() {
            passes.push((CandidatePass::FullCatalog, all.as_slice()));
        }

        if let Some(frequency) = CodeFrequency::analyze(&input.codes) {
            for (pass, candidates) in &passes {
                if let Some((definition, strategy)) =
                    codes::resolve_codes(candidates, &frequency, &self.config)
                {
                    debug!(result = %definition.id, ?strategy, ?pass, "code match");
                    return Some(MatchOutcome {
                        definition,
                        strategy,
                        pass: *pass,
                    });
                }
            }
        }

        for (pass, candidates) in &passes {
            if let Some(definition) = score::resolve_score(candidates, input.total_score) {
                debug!(result = %definition.id, ?pass, score = input.total_score, "score match");
                return Some(MatchOutcome {
                    definition,
                    strategy: MatchStrategy::ScoreRange,
                    pass: *pass,
                });
            }
        }

        let definition = fallback::select_fallback(&all, input.gender)?;
        debug!(result = %definition.id, "no rule matched; using fallback");
        Some(MatchOutcome {
            definition,
            strategy: MatchStrategy::Fallback,
            pass: CandidatePass::FullCatalog,
        })
    }
}

/// Selects a result with the default thresholds.
pub fn match_result<'a>(
    catalog: &'a [ResultDefinition],
    input: &MatchInput,
) -> Option<&'a ResultDefinition> {
    MatchEngine::default()
        .select(catalog, input)
        .map(|outcome| outcome.definition)
}
