use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::service::{MatchRequest, MatchService, MatchServiceError};
use crate::catalog::CatalogRepository;

/// Router builder exposing the classification endpoint.
pub fn match_router<R>(service: Arc<MatchService<R>>) -> Router
where
    R: CatalogRepository + 'static,
{
    Router::new()
        .route("/api/v1/match", post(match_handler::<R>))
        .with_state(service)
}

pub(crate) async fn match_handler<R>(
    State(service): State<Arc<MatchService<R>>>,
    axum::Json(request): axum::Json<MatchRequest>,
) -> Response
where
    R: CatalogRepository + 'static,
{
    match service.classify(&request) {
        Ok(response) => (StatusCode::OK, axum::Json(response)).into_response(),
        Err(error @ MatchServiceError::UnknownAssessment(_)) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
