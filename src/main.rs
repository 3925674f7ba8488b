use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use phpdoc_annotator::{
    AnnotatorConfig, Annotator, DocblockReconciler, StaticConfigTagGenerator, Workspace, WriteMode,
    logging,
};

/// Keep PHP class docblocks in sync with framework-provided members.
#[derive(Debug, Parser)]
#[command(name = "phpdoc-annotator", version, about)]
struct Cli {
    /// Project root (where composer.json lives).
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Configuration file to use instead of the default lookup.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Reconcile the docblocks of every class in the given files or directories.
    Annotate {
        /// Files or directories; defaults to the PSR-4 source directories.
        paths: Vec<PathBuf>,

        /// Print updated sources instead of writing them.
        #[arg(long, conflicts_with = "check")]
        dry_run: bool,

        /// Exit with status 1 if any file would change.
        #[arg(long)]
        check: bool,
    },
    /// Print the reconciled docblock of a class.
    Show {
        /// Fully-qualified class name.
        class: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = AnnotatorConfig::load(&cli.root, cli.config.as_deref())
        .context("failed to load configuration")?;
    let workspace = Workspace::discover(&cli.root);

    match cli.command {
        Command::Annotate {
            paths,
            dry_run,
            check,
        } => {
            let mode = if check {
                WriteMode::Check
            } else if dry_run {
                WriteMode::DryRun
            } else {
                WriteMode::Write
            };
            let paths = if paths.is_empty() {
                workspace.source_directories()
            } else {
                paths
            };
            annotate(config, mode, &paths)
        }
        Command::Show { class } => {
            let reconciler = DocblockReconciler::new(
                StaticConfigTagGenerator::new(&workspace),
                config.markers,
            );
            let docblock = reconciler
                .reconcile_class(&workspace, &class)
                .with_context(|| format!("failed to reconcile {}", class))?;
            println!("{}", docblock);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn annotate(config: AnnotatorConfig, mode: WriteMode, paths: &[PathBuf]) -> Result<ExitCode> {
    let annotator = Annotator::new(config, mode);
    let report = annotator.annotate_paths(paths);

    for change in &report.changed {
        match (&change.updated, mode) {
            (Some(updated), _) => {
                println!("// {}", change.path.display());
                println!("{}", updated);
            }
            (None, WriteMode::Check) => println!("would update {}", change.path.display()),
            (None, _) => println!("updated {}", change.path.display()),
        }
    }

    eprintln!(
        "{} file(s) scanned, {} changed, {} class(es) updated, {} failure(s)",
        report.files_scanned,
        report.files_changed(),
        report.classes_updated,
        report.failures.len()
    );

    if mode == WriteMode::Check && report.files_changed() > 0 {
        return Ok(ExitCode::from(1));
    }
    Ok(ExitCode::SUCCESS)
}
