use std::collections::HashMap;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::Response;
use serde_json::Value;

use crate::catalog::{CatalogRepository, RepositoryError};
use crate::engine::domain::{
    AssessmentId, CodePattern, Gender, MatchCondition, ResultDefinition, ScoreRange,
};
use crate::engine::MatcherConfig;
use crate::matching::{MatchRequest, MatchService};

pub(super) const ASSESSMENT: &str = "love-style";
pub(super) const EMPTY_ASSESSMENT: &str = "unpublished";

pub(super) fn catalog() -> Vec<ResultDefinition> {
    vec![
        ResultDefinition::new(
            "romantic",
            MatchCondition::CodeSet {
                entries: vec![
                    CodePattern::Single("R".to_string()),
                    CodePattern::Pair("R".to_string(), "P".to_string()),
                ],
            },
        ),
        ResultDefinition::new(
            "pragmatic-male",
            MatchCondition::ScoreRange(ScoreRange::new(40.0, 60.0)),
        )
        .with_target_gender(Gender::Male),
        ResultDefinition::new(
            "steady",
            MatchCondition::ScoreRange(ScoreRange::new(0.0, 100.0)),
        ),
    ]
}

#[derive(Default)]
pub(super) struct MemoryCatalogs {
    catalogs: HashMap<AssessmentId, Arc<[ResultDefinition]>>,
}

impl MemoryCatalogs {
    pub(super) fn seeded() -> Self {
        let mut catalogs: HashMap<AssessmentId, Arc<[ResultDefinition]>> = HashMap::new();
        catalogs.insert(AssessmentId(ASSESSMENT.to_string()), Arc::from(catalog()));
        catalogs.insert(
            AssessmentId(EMPTY_ASSESSMENT.to_string()),
            Arc::from(Vec::<ResultDefinition>::new()),
        );
        Self { catalogs }
    }
}

impl CatalogRepository for MemoryCatalogs {
    fn results_for(
        &self,
        assessment: &AssessmentId,
    ) -> Result<Arc<[ResultDefinition]>, RepositoryError> {
        self.catalogs
            .get(assessment)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }
}

pub(super) struct UnavailableCatalogs;

impl CatalogRepository for UnavailableCatalogs {
    fn results_for(
        &self,
        _assessment: &AssessmentId,
    ) -> Result<Arc<[ResultDefinition]>, RepositoryError> {
        Err(RepositoryError::Unavailable("catalog store offline".to_string()))
    }
}

pub(super) fn service() -> Arc<MatchService<MemoryCatalogs>> {
    Arc::new(MatchService::new(
        Arc::new(MemoryCatalogs::seeded()),
        MatcherConfig::default(),
    ))
}

pub(super) fn request(assessment: &str, score: f64, codes: &[&str]) -> MatchRequest {
    MatchRequest {
        assessment_id: AssessmentId(assessment.to_string()),
        total_score: score,
        codes: codes.iter().map(|code| Some(code.to_string())).collect(),
        gender: None,
    }
}

pub(super) async fn json_body(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let value = serde_json::from_slice(&bytes).expect("json body");
    (status, value)
}
