use metrics_exporter_prometheus::PrometheusHandle;
use quizmatch::catalog::{
    CatalogImportError, CatalogImporter, CatalogRepository, CatalogSet, RepositoryError,
};
use quizmatch::engine::{AssessmentId, ResultDefinition};
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Read-only catalog store loaded once at startup.
#[derive(Default, Clone)]
pub(crate) struct InMemoryCatalogRepository {
    catalogs: Arc<HashMap<AssessmentId, Arc<[ResultDefinition]>>>,
}

impl InMemoryCatalogRepository {
    pub(crate) fn from_set(set: CatalogSet) -> Self {
        let catalogs: HashMap<AssessmentId, Arc<[ResultDefinition]>> = set
            .into_iter()
            .map(|catalog| (catalog.assessment_id, Arc::from(catalog.definitions)))
            .collect();
        Self {
            catalogs: Arc::new(catalogs),
        }
    }

    pub(crate) fn assessment_count(&self) -> usize {
        self.catalogs.len()
    }
}

impl CatalogRepository for InMemoryCatalogRepository {
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

/// Imports a catalog file and logs a summary of what was accepted.
pub(crate) fn load_catalogs(path: &Path) -> Result<CatalogSet, CatalogImportError> {
    let set = CatalogImporter::from_path(path)?;

    for catalog in set.iter() {
        if catalog.is_empty() {
            warn!(assessment = %catalog.assessment_id, "assessment has no usable result definitions");
        }
        info!(
            assessment = %catalog.assessment_id,
            accepted = catalog.definitions.len(),
            rejected = catalog.rejected.len(),
            "loaded result catalog"
        );
    }

    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn repository_serves_imported_catalogs() {
        let set = CatalogImporter::from_reader(Cursor::new(
            r#"{ "assessments": [ { "id": "quiz", "results": [
                { "id": "calm", "match_condition": { "min": 0, "max": 10 } }
            ] } ] }"#,
        ))
        .expect("imports");
        let repository = InMemoryCatalogRepository::from_set(set);

        assert_eq!(repository.assessment_count(), 1);
        let catalog = repository
            .results_for(&AssessmentId("quiz".to_string()))
            .expect("catalog present");
        assert_eq!(catalog.len(), 1);
        assert!(matches!(
            repository.results_for(&AssessmentId("other".to_string())),
            Err(RepositoryError::NotFound)
        ));
    }
}
