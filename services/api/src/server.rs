use crate::cli::ServeArgs;
use crate::infra::{load_catalogs, AppState, InMemoryCatalogRepository};
use crate::routes::with_match_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use quizmatch::config::AppConfig;
use quizmatch::error::AppError;
use quizmatch::matching::MatchService;
use quizmatch::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(catalog) = args.catalog.take() {
        config.catalog.path = Some(catalog);
    }

    telemetry::init(&config)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = match &config.catalog.path {
        Some(path) => InMemoryCatalogRepository::from_set(load_catalogs(path)?),
        None => {
            warn!("APP_CATALOG_PATH not set; serving an empty result catalog");
            InMemoryCatalogRepository::default()
        }
    };
    let assessments = repository.assessment_count();
    let match_service = Arc::new(MatchService::new(Arc::new(repository), config.matcher));

    let app = with_match_routes(match_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, assessments, "result matcher ready");

    axum::serve(listener, app).await?;
    Ok(())
}
