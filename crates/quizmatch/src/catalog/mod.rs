//! Result catalog ingestion.
//!
//! Source catalogs describe match rules loosely (a `type` hint, a `codes` array, or numeric
//! bounds under several spellings). Ingestion normalizes every entry once into
//! [`MatchCondition`](crate::engine::MatchCondition) and sets malformed entries aside so a
//! single bad definition never blocks matching for the rest of the catalog.

mod parser;
mod raw;
pub mod repository;

pub use raw::{CatalogEntryError, RawMatchCondition, RawResultDefinition};

use raw::DecodedEntry;
pub use repository::{CatalogRepository, RepositoryError};

use serde::Deserialize;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use tracing::warn;

use crate::engine::domain::{AssessmentId, ResultDefinition};

/// Catalog entry that failed normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedEntry {
    pub index: usize,
    pub id: Option<String>,
    pub reason: CatalogEntryError,
}

/// Normalized result catalog for one assessment.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    pub assessment_id: AssessmentId,
    pub definitions: Vec<ResultDefinition>,
    pub rejected: Vec<RejectedEntry>,
}

impl Catalog {
    pub fn from_raw<I>(assessment_id: AssessmentId, entries: I) -> Self
    where
        I: IntoIterator<Item = RawResultDefinition>,
    {
        Self::from_decoded(assessment_id, entries.into_iter().map(Ok))
    }

    fn from_decoded<I>(assessment_id: AssessmentId, entries: I) -> Self
    where
        I: IntoIterator<Item = DecodedEntry>,
    {
        let mut definitions = Vec::new();
        let mut rejected = Vec::new();

        for (index, entry) in entries.into_iter().enumerate() {
            let normalized = entry.and_then(|raw| {
                let id = raw.id.clone();
                raw.normalize().map_err(|reason| (id, reason))
            });
            match normalized {
                Ok(definition) => definitions.push(definition),
                Err((id, reason)) => {
                    warn!(
                        assessment = %assessment_id,
                        index,
                        id = id.as_deref().unwrap_or("<none>"),
                        %reason,
                        "excluding malformed result definition"
                    );
                    rejected.push(RejectedEntry { index, id, reason });
                }
            }
        }

        Self {
            assessment_id,
            definitions,
            rejected,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// Catalogs for every assessment in an import, keyed by assessment id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogSet {
    catalogs: BTreeMap<AssessmentId, Catalog>,
}

impl CatalogSet {
    pub fn get(&self, assessment_id: &AssessmentId) -> Option<&Catalog> {
        self.catalogs.get(assessment_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Catalog> {
        self.catalogs.values()
    }

    pub fn len(&self) -> usize {
        self.catalogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty()
    }

    fn insert(&mut self, catalog: Catalog) -> Result<(), CatalogImportError> {
        if self.catalogs.contains_key(&catalog.assessment_id) {
            return Err(CatalogImportError::DuplicateAssessment(
                catalog.assessment_id,
            ));
        }
        self.catalogs.insert(catalog.assessment_id.clone(), catalog);
        Ok(())
    }
}

impl IntoIterator for CatalogSet {
    type Item = Catalog;
    type IntoIter = std::collections::btree_map::IntoValues<AssessmentId, Catalog>;

    fn into_iter(self) -> Self::IntoIter {
        self.catalogs.into_values()
    }
}

#[derive(Debug)]
pub enum CatalogImportError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Csv(csv::Error),
    DuplicateAssessment(AssessmentId),
}

impl std::fmt::Display for CatalogImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogImportError::Io(err) => write!(f, "failed to read catalog: {}", err),
            CatalogImportError::Json(err) => write!(f, "invalid catalog JSON: {}", err),
            CatalogImportError::Csv(err) => write!(f, "invalid catalog CSV data: {}", err),
            CatalogImportError::DuplicateAssessment(id) => {
                write!(f, "assessment '{}' appears more than once", id)
            }
        }
    }
}

impl std::error::Error for CatalogImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogImportError::Io(err) => Some(err),
            CatalogImportError::Json(err) => Some(err),
            CatalogImportError::Csv(err) => Some(err),
            CatalogImportError::DuplicateAssessment(_) => None,
        }
    }
}

impl From<std::io::Error> for CatalogImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for CatalogImportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<csv::Error> for CatalogImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    assessments: Vec<AssessmentDocument>,
}

#[derive(Debug, Deserialize)]
struct AssessmentDocument {
    #[serde(alias = "assessment_id", alias = "assessmentId")]
    id: String,
    #[serde(default)]
    results: Vec<serde_json::Value>,
}

pub struct CatalogImporter;

impl CatalogImporter {
    /// Reads a catalog file, choosing CSV for `.csv` paths and JSON otherwise.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<CatalogSet, CatalogImportError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

        if is_csv {
            Self::from_csv_reader(file)
        } else {
            Self::from_reader(file)
        }
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<CatalogSet, CatalogImportError> {
        let document: CatalogDocument = serde_json::from_reader(reader)?;
        let mut set = CatalogSet::default();

        for assessment in document.assessments {
            let id = AssessmentId(assessment.id.trim().to_string());
            let entries = assessment.results.into_iter().map(raw::decode_entry);
            set.insert(Catalog::from_decoded(id, entries))?;
        }

        Ok(set)
    }

    /// Rows for the same assessment may be interleaved; catalog order follows row order.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<CatalogSet, CatalogImportError> {
        let mut grouped: BTreeMap<AssessmentId, Vec<RawResultDefinition>> = BTreeMap::new();

        for record in parser::parse_records(reader)? {
            grouped
                .entry(AssessmentId(record.assessment_id))
                .or_default()
                .push(record.definition);
        }

        let mut set = CatalogSet::default();
        for (assessment_id, entries) in grouped {
            set.insert(Catalog::from_raw(assessment_id, entries))?;
        }

        Ok(set)
    }
}
