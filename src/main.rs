//! scanscope - compute the paths a static-analysis run should scan.
//!
//! Usage:
//!   scanscope [PATH]                     Print include paths for PATH
//!   scanscope -e 'vendor/**' [PATH]      Add an exclude pattern (repeatable)
//!   scanscope --no-git [PATH]            Ignore version-control ignore rules
//!   scanscope -f json [PATH]             Print a JSON array
//!   scanscope --help                     Show help
//!
//! Set `RUST_LOG=scanscope_scan=debug` to see every prune and collapse.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use color_eyre::Section;
use color_eyre::eyre::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use scanscope_core::{BuildConfig, IncludePaths};
use scanscope_scan::IncludePathsBuilder;

#[derive(Parser)]
#[command(
    name = "scanscope",
    version,
    about = "Compute the minimal set of paths a static-analysis run should scan",
    long_about = "scanscope walks a source tree and reconciles version-control ignore rules, \
                  user exclude patterns and file permissions into a compact list of include \
                  paths. Fully includable directories collapse into a single `dir/` entry; \
                  a tree with nothing excluded prints `./`."
)]
struct Cli {
    /// Root of the source tree (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Exclude paths matching this glob (repeatable)
    #[arg(short = 'e', long = "exclude", value_name = "PATTERN")]
    excludes: Vec<String>,

    /// Do not consult version-control ignore rules
    #[arg(long)]
    no_git: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let paths = run(&cli)?;
    println!("{}", render(&paths, cli.format)?);

    Ok(())
}

/// Build include paths for the CLI arguments.
fn run(cli: &Cli) -> Result<IncludePaths> {
    let root = cli.path.canonicalize().context("Invalid path")?;

    let config = BuildConfig::builder()
        .root(root)
        .exclude_patterns(cli.excludes.clone())
        .use_vcs(!cli.no_git)
        .build()
        .context("Invalid configuration")?;

    let builder = IncludePathsBuilder::detect(config).context("Failed to open repository")?;
    match builder.build() {
        Ok(paths) => Ok(paths),
        Err(err) if err.is_unreadable() => {
            Err(err).suggestion("adjust exclude_paths or file permissions")
        }
        Err(err) => Err(err).context("Failed to build include paths"),
    }
}

/// Render include paths, one per line or as a JSON array.
fn render(paths: &IncludePaths, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(paths.to_strings().join("\n")),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(paths)?),
    }
}
