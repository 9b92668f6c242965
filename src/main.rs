//! CLI entry point for the documentation generator.
//!
//! Scans sources for documentation comments, binds them to the entities
//! listed by the analysis pass, and writes the resulting documentation.

use clap::{
    Parser, Subcommand,
    builder::styling::{AnsiColor, Effects, Styles},
};
use console::style;
use docweave::render::{entries, render_json, render_markdown};
use docweave::{DocError, DocumentationRun, EntityIndex, Settings};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn clap_cargo_style() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

/// Documentation generator
#[derive(Parser)]
#[command(
    name = "docweave",
    version = env!("CARGO_PKG_VERSION"),
    about = "Documentation generator for C and C++ headers",
    long_about = "Scan headers for documentation comments and bind them to code entities.",
    next_line_help = true,
    styles = clap_cargo_style()
)]
struct Cli {
    /// Path to custom settings.toml file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print debug information
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
enum Commands {
    #[command(about = "Set up .docweave directory with default configuration")]
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    #[command(about = "Display active settings")]
    Config,

    #[command(about = "Scan sources and report the documentation comments found")]
    Scan {
        /// Files or directories to scan
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Number of parallel threads
        #[arg(short, long)]
        threads: Option<usize>,
    },

    #[command(about = "Generate documentation for the entities of an analysis pass")]
    Generate {
        /// Files or directories to scan
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// JSON entity list written by the analysis pass
        #[arg(short, long)]
        entities: PathBuf,

        /// Number of parallel threads
        #[arg(short, long)]
        threads: Option<usize>,

        /// Emit JSON instead of Markdown
        #[arg(long)]
        json: bool,

        /// Output file, stdout if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn load_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let settings = match &cli.config {
        Some(path) => Settings::load_from(path).map_err(|e| {
            anyhow::anyhow!("Configuration error loading from {}: {e}", path.display())
        })?,
        None => Settings::load().unwrap_or_else(|e| {
            eprintln!("Configuration error: {e}");
            eprintln!("Using default configuration.");
            Settings::default()
        }),
    };
    Ok(settings)
}

/// Print recovery hints before handing the error to anyhow
fn report(error: DocError) -> anyhow::Error {
    for suggestion in error.recovery_suggestions() {
        eprintln!("{} {suggestion}", style("hint:").cyan().bold());
    }
    let code = error.status_code();
    anyhow::Error::new(error).context(code)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut settings = load_settings(&cli)?;
    init_logging(cli.verbose || settings.debug);

    match &cli.command {
        Commands::Init { force } => {
            let path = Settings::init_config_file(*force)
                .map_err(|e| anyhow::anyhow!("{e}"))?;
            println!("Created configuration file at: {}", path.display());
            println!("Edit this file to customize your settings.");
        }

        Commands::Config => {
            println!("Current Configuration:");
            println!("{}", "=".repeat(50));
            println!("{}", toml::to_string_pretty(&settings)?);
        }

        Commands::Scan { paths, threads } => {
            if let Some(t) = threads {
                settings.input.parallel_threads = *t;
            }
            let run = DocumentationRun::new(Arc::new(settings)).map_err(report)?;
            let stats = run.scan(paths).map_err(report)?;
            println!("{}", stats.summary());

            if stats.duplicates > 0 {
                eprintln!(
                    "\n{} {} duplicate documentation comments were ignored",
                    style("warning:").yellow().bold(),
                    stats.duplicates
                );
            }
        }

        Commands::Generate {
            paths,
            entities,
            threads,
            json,
            output,
        } => {
            if let Some(t) = threads {
                settings.input.parallel_threads = *t;
            }
            let entity_index = EntityIndex::load(entities).map_err(report)?;
            info!(
                "Loaded {} entities with {} unique names",
                entity_index.len(),
                entity_index.unique_name_count()
            );
            let run = DocumentationRun::new(Arc::new(settings)).map_err(report)?;

            // Every comment must be registered before the first lookup
            let stats = run.scan(paths).map_err(report)?;
            let bound = run.bind(&entity_index);

            let docs = entries(&bound, run.settings());
            let rendered = if *json {
                render_json(&docs)?
            } else {
                render_markdown(&docs)
            };

            match output {
                Some(path) => {
                    std::fs::write(path, rendered)
                        .map_err(|source| DocError::FileWrite {
                            path: path.clone(),
                            source,
                        })
                        .map_err(report)?;
                    eprintln!(
                        "{} {} entries from {} files to {}",
                        style("Wrote").green().bold(),
                        docs.len(),
                        stats.files_scanned,
                        path.display()
                    );
                }
                None => print!("{rendered}"),
            }
        }
    }

    Ok(())
}
