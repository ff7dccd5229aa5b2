use crate::classify::{run_catalog_check, run_classify, CatalogCheckArgs, ClassifyArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use quizmatch::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Assessment Result Matcher",
    about = "Classify completed assessment responses into result definitions",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Classify a single response against a catalog file
    Classify(ClassifyArgs),
    /// Inspect result catalog files
    Catalog {
        #[command(subcommand)]
        command: CatalogCommand,
    },
}

#[derive(Subcommand, Debug)]
enum CatalogCommand {
    /// Report accepted and rejected result definitions per assessment
    Check(CatalogCheckArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the configured result catalog file (JSON or CSV)
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Classify(args) => run_classify(args),
        Command::Catalog {
            command: CatalogCommand::Check(args),
        } => run_catalog_check(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve_without_subcommand() {
        let cli = Cli::try_parse_from(["quizmatch-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_classify_arguments() {
        let cli = Cli::try_parse_from([
            "quizmatch-api",
            "classify",
            "--catalog",
            "catalog.json",
            "--assessment",
            "love-style",
            "--score",
            "42.5",
            "--codes",
            "H,S,H",
            "--gender",
            "female",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Classify(args)) => {
                assert_eq!(args.assessment, "love-style");
                assert_eq!(args.score, 42.5);
                assert_eq!(args.codes, vec!["H", "S", "H"]);
                assert!(args.gender.is_some());
            }
            other => panic!("expected classify command, got {other:?}"),
        }
    }

    #[test]
    fn parses_catalog_check() {
        let cli = Cli::try_parse_from(["quizmatch-api", "catalog", "check", "--catalog", "x.csv"])
            .expect("parses");
        assert!(matches!(
            cli.command,
            Some(Command::Catalog {
                command: CatalogCommand::Check(_)
            })
        ));
    }
}
