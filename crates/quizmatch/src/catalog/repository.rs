use std::sync::Arc;

use crate::engine::domain::{AssessmentId, ResultDefinition};

/// Boundary to the result catalog store.
pub trait CatalogRepository: Send + Sync {
    /// Normalized definitions for an assessment, in catalog order.
    fn results_for(
        &self,
        assessment: &AssessmentId,
    ) -> Result<Arc<[ResultDefinition]>, RepositoryError>;
}

/// Error enumeration for catalog store failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("assessment not found")]
    NotFound,
    #[error("catalog store unavailable: {0}")]
    Unavailable(String),
}
