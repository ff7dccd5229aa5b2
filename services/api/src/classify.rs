use crate::infra::load_catalogs;
use clap::{Args, ValueEnum};
use quizmatch::catalog::CatalogSet;
use quizmatch::config::AppConfig;
use quizmatch::engine::{AssessmentId, Gender, MatchEngine, MatchInput};
use quizmatch::error::AppError;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum GenderArg {
    Male,
    Female,
}

impl From<GenderArg> for Gender {
    fn from(value: GenderArg) -> Self {
        match value {
            GenderArg::Male => Gender::Male,
            GenderArg::Female => Gender::Female,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct ClassifyArgs {
    /// Result catalog file (JSON, or CSV when the extension is .csv)
    #[arg(long)]
    pub(crate) catalog: PathBuf,
    /// Assessment whose catalog should be used
    #[arg(long)]
    pub(crate) assessment: String,
    /// Total score accumulated by the response
    #[arg(long, allow_hyphen_values = true)]
    pub(crate) score: f64,
    /// Per-question trait codes, comma separated, in question order
    #[arg(long, value_delimiter = ',')]
    pub(crate) codes: Vec<String>,
    /// Respondent gender, if provided
    #[arg(long, value_enum)]
    pub(crate) gender: Option<GenderArg>,
}

#[derive(Args, Debug)]
pub(crate) struct CatalogCheckArgs {
    /// Result catalog file (JSON, or CSV when the extension is .csv)
    #[arg(long)]
    pub(crate) catalog: PathBuf,
}

pub(crate) fn run_classify(args: ClassifyArgs) -> Result<(), AppError> {
    let ClassifyArgs {
        catalog,
        assessment,
        score,
        codes,
        gender,
    } = args;

    let config = AppConfig::load()?;
    let engine = MatchEngine::new(config.matcher);
    let catalogs = load_catalogs(&catalog)?;
    let assessment_id = AssessmentId(assessment);
    let input = MatchInput {
        total_score: score,
        codes: codes.into_iter().map(Some).collect(),
        gender: gender.map(Gender::from),
    };

    println!(
        "{}",
        render_classification(&engine, &catalogs, &assessment_id, &input)
    );
    Ok(())
}

pub(crate) fn run_catalog_check(args: CatalogCheckArgs) -> Result<(), AppError> {
    let catalogs = load_catalogs(&args.catalog)?;
    println!("{}", render_catalog_check(&catalogs));
    Ok(())
}

fn render_classification(
    engine: &MatchEngine,
    catalogs: &CatalogSet,
    assessment_id: &AssessmentId,
    input: &MatchInput,
) -> String {
    let Some(catalog) = catalogs.get(assessment_id) else {
        return format!("Assessment '{assessment_id}' not found in catalog");
    };

    match engine.select(&catalog.definitions, input) {
        Some(outcome) => {
            let name = outcome
                .definition
                .presentation
                .name
                .as_deref()
                .unwrap_or("(unnamed)");
            let mut lines = vec![
                format!("Assessment: {assessment_id}"),
                format!("Result: {} - {}", outcome.definition.id, name),
                format!("Matched by: {}", outcome.strategy.label()),
            ];
            if outcome.is_fallback() {
                lines.push("Note: no rule matched; default result selected".to_string());
            }
            lines.join("\n")
        }
        None => format!("Assessment '{assessment_id}' has no usable result definitions"),
    }
}

fn render_catalog_check(catalogs: &CatalogSet) -> String {
    if catalogs.is_empty() {
        return "Catalog contains no assessments".to_string();
    }

    let mut lines = Vec::new();
    for catalog in catalogs.iter() {
        lines.push(format!(
            "{}: {} accepted, {} rejected",
            catalog.assessment_id,
            catalog.definitions.len(),
            catalog.rejected.len()
        ));
        for rejected in &catalog.rejected {
            lines.push(format!(
                "  - entry #{} ({}): {}",
                rejected.index,
                rejected.id.as_deref().unwrap_or("no id"),
                rejected.reason
            ));
        }
    }
    lines.join("\n")
}
