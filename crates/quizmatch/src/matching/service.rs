use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog::{CatalogRepository, RepositoryError};
use crate::engine::{
    AssessmentId, Gender, MatchEngine, MatchInput, MatchStrategy, MatcherConfig, ResultId,
};

/// Completed response submitted for classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRequest {
    pub assessment_id: AssessmentId,
    pub total_score: f64,
    #[serde(default)]
    pub codes: Vec<Option<String>>,
    #[serde(default)]
    pub gender: Option<Gender>,
}

impl MatchRequest {
    fn input(&self) -> MatchInput {
        MatchInput {
            total_score: self.total_score,
            codes: self.codes.clone(),
            gender: self.gender,
        }
    }
}

/// Selected result id, `None` only for an empty catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResponse {
    pub result_id: Option<ResultId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<MatchStrategy>,
    #[serde(default)]
    pub fallback: bool,
}

impl MatchResponse {
    fn empty() -> Self {
        Self {
            result_id: None,
            strategy: None,
            fallback: false,
        }
    }
}

/// Service composing the catalog repository and the matching engine.
pub struct MatchService<R> {
    repository: Arc<R>,
    engine: Arc<MatchEngine>,
}

impl<R> MatchService<R>
where
    R: CatalogRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: MatcherConfig) -> Self {
        Self {
            repository,
            engine: Arc::new(MatchEngine::new(config)),
        }
    }

    /// Classify one completed response against its assessment's catalog.
    pub fn classify(&self, request: &MatchRequest) -> Result<MatchResponse, MatchServiceError> {
        let catalog = self
            .repository
            .results_for(&request.assessment_id)
            .map_err(|err| match err {
                RepositoryError::NotFound => {
                    MatchServiceError::UnknownAssessment(request.assessment_id.clone())
                }
                other => MatchServiceError::Repository(other),
            })?;

        let input = request.input();
        let Some(outcome) = self.engine.select(&catalog, &input) else {
            warn!(
                assessment = %request.assessment_id,
                "result catalog is empty; no result can be assigned"
            );
            return Ok(MatchResponse::empty());
        };

        debug!(
            assessment = %request.assessment_id,
            result = %outcome.definition.id,
            strategy = outcome.strategy.label(),
            "response classified"
        );

        Ok(MatchResponse {
            result_id: Some(outcome.definition.id.clone()),
            strategy: Some(outcome.strategy),
            fallback: outcome.is_fallback(),
        })
    }
}

/// Error raised by the match service.
#[derive(Debug, thiserror::Error)]
pub enum MatchServiceError {
    #[error("unknown assessment '{0}'")]
    UnknownAssessment(AssessmentId),
    #[error(transparent)]
    Repository(RepositoryError),
}
