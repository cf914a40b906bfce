use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use docsample_extractor::ExtractorConfig;
use docsample_inliner::{InlineStats, Inliner, InlinerError, ReferenceScanner};
use docsample_repository::{
    backup_sources, restore_sources, ExtractStats, RepositoryError, SampleRepository,
    DEFAULT_BACKUP_EXCLUDES,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;

mod config;

pub use config::{DocsampleConfig, PathsConfig, CONFIG_FILE_NAME};

#[derive(Parser)]
#[command(name = "docsample")]
#[command(about = "Extract code samples and inline them into documentation comments", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Project root; relative configured paths resolve against it
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Configuration file (default: <root>/docsample.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for JSON)
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that every sample source declares a single public class
    #[command(name = "check-sources")]
    CheckSources(OutputArgs),

    /// Extract samples into Markdown artifacts
    Extract(OutputArgs),

    /// Check that every SAMPLE reference has an extracted artifact
    #[command(name = "check-references")]
    CheckReferences(OutputArgs),

    /// Inline extracted samples into documentation comments
    Inline(InlineArgs),

    /// Restore sources saved by `inline --in-place`
    Restore(OutputArgs),

    /// Check sources, extract, check references and inline, stopping at the first failing stage
    Run(OutputArgs),
}

impl Commands {
    fn json(&self) -> bool {
        match self {
            Commands::CheckSources(args)
            | Commands::Extract(args)
            | Commands::CheckReferences(args)
            | Commands::Restore(args)
            | Commands::Run(args) => args.json,
            Commands::Inline(args) => args.json,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Commands::CheckSources(_) => "check-sources",
            Commands::Extract(_) => "extract",
            Commands::CheckReferences(_) => "check-references",
            Commands::Inline(_) => "inline",
            Commands::Restore(_) => "restore",
            Commands::Run(_) => "run",
        }
    }
}

#[derive(Args)]
struct OutputArgs {
    /// Output JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct InlineArgs {
    /// Rewrite the main sources themselves after backing them up
    #[arg(long)]
    in_place: bool,

    /// Output JSON
    #[arg(long)]
    json: bool,
}

/// Outcome of one command, printed as JSON with `--json`
#[derive(Serialize)]
struct Report {
    command: &'static str,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<String>,
}

pub fn main_entry() -> Result<()> {
    let mut cli = Cli::parse();

    // Keep stdout clean for JSON parsing
    let json_output = cli.command.json();
    if json_output {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let command = cli.command.name();
    match execute(&cli) {
        Ok((data, summary)) => {
            if json_output {
                print_report(&Report {
                    command,
                    status: "ok",
                    data: Some(data),
                    errors: Vec::new(),
                })?;
            } else {
                println!("{summary}");
            }
            Ok(())
        }
        Err(err) => {
            let errors = failure_messages(&err);
            if json_output {
                print_report(&Report {
                    command,
                    status: "error",
                    data: None,
                    errors,
                })?;
            } else {
                for line in &errors {
                    eprintln!("Error: {line}");
                }
            }
            std::process::exit(1);
        }
    }
}

fn execute(cli: &Cli) -> Result<(Value, String)> {
    let config = DocsampleConfig::load(&cli.root, cli.config.as_deref())?;
    let paths = config.paths.resolve(&cli.root);

    match &cli.command {
        Commands::CheckSources(_) => {
            let checked = run_check_sources(&config.conventions, &paths)?;
            Ok((
                json!({ "sample_sources": checked }),
                format!("Checked {checked} sample sources"),
            ))
        }
        Commands::Extract(_) => {
            let stats = run_extract(&config.conventions, &paths)?;
            Ok((
                serde_json::to_value(&stats)?,
                format!(
                    "Extracted {} samples from {} sample sources into {}",
                    stats.samples,
                    stats.sample_sources,
                    paths.extracted.display()
                ),
            ))
        }
        Commands::CheckReferences(_) => {
            let references = run_check_references(&paths)?;
            Ok((
                json!({ "references": references }),
                format!("All {references} sample references resolved"),
            ))
        }
        Commands::Inline(args) => {
            let stats = run_inline(&paths, args.in_place)?;
            let target = if args.in_place {
                &paths.main
            } else {
                &paths.inlined
            };
            Ok((
                serde_json::to_value(&stats)?,
                format!(
                    "Inlined {} samples into {} files under {}",
                    stats.references,
                    stats.rewritten_files,
                    target.display()
                ),
            ))
        }
        Commands::Restore(_) => {
            let restored = run_restore(&paths)?;
            Ok((
                json!({ "restored": restored }),
                format!("Restored {restored} files into {}", paths.sources.display()),
            ))
        }
        Commands::Run(_) => {
            let checked = run_check_sources(&config.conventions, &paths)?;
            let extract = run_extract(&config.conventions, &paths)?;
            let references = run_check_references(&paths)?;
            let inline = run_inline(&paths, false)?;
            Ok((
                json!({
                    "sample_sources": checked,
                    "extract": extract,
                    "references": references,
                    "inline": inline,
                }),
                format!(
                    "Inlined {} samples ({} extracted) into {}",
                    inline.references,
                    extract.samples,
                    paths.inlined.display()
                ),
            ))
        }
    }
}

fn run_check_sources(conventions: &ExtractorConfig, paths: &PathsConfig) -> Result<usize> {
    let repository = SampleRepository::new(conventions.clone());
    Ok(repository.check_all(&paths.sources)?)
}

fn run_extract(conventions: &ExtractorConfig, paths: &PathsConfig) -> Result<ExtractStats> {
    if paths.extracted.exists() {
        fs::remove_dir_all(&paths.extracted).with_context(|| {
            format!("Failed to clear {}", paths.extracted.display())
        })?;
    }
    let repository = SampleRepository::new(conventions.clone());
    Ok(repository.extract_into(&paths.sources, &paths.extracted)?)
}

fn run_check_references(paths: &PathsConfig) -> Result<usize> {
    Ok(ReferenceScanner::new(&paths.extracted).check_tree(&paths.main)?)
}

fn run_inline(paths: &PathsConfig, in_place: bool) -> Result<InlineStats> {
    let mut inliner = Inliner::new(&paths.extracted);
    if !in_place {
        if paths.inlined.exists() {
            fs::remove_dir_all(&paths.inlined).with_context(|| {
                format!("Failed to clear {}", paths.inlined.display())
            })?;
        }
        return Ok(inliner.inline_tree(&paths.main, &paths.inlined)?);
    }

    if !paths.main.starts_with(&paths.sources) {
        anyhow::bail!(
            "In-place inlining needs the main sources ({}) inside the backed up tree ({})",
            paths.main.display(),
            paths.sources.display()
        );
    }
    ReferenceScanner::new(&paths.extracted).check_tree(&paths.main)?;
    backup_sources(&paths.sources, &paths.backup, DEFAULT_BACKUP_EXCLUDES)?;
    Ok(inliner.inline_tree(&paths.main, &paths.main)?)
}

fn run_restore(paths: &PathsConfig) -> Result<usize> {
    if !paths.backup.is_dir() {
        anyhow::bail!("No backup found at {}", paths.backup.display());
    }
    Ok(restore_sources(&paths.backup, &paths.sources)?)
}

/// One line per violation for pipeline failures, the error chain otherwise
fn failure_messages(err: &anyhow::Error) -> Vec<String> {
    if let Some(err) = err.downcast_ref::<RepositoryError>() {
        return err.messages();
    }
    if let Some(err) = err.downcast_ref::<InlinerError>() {
        return err.messages();
    }
    vec![format!("{err:#}")]
}

fn print_report(report: &Report) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}
