//! Runlint - structural linter for Markdown runbooks.
//!
//! Checks runbook documents for a title, sequential step numbering,
//! matching sub-step indices, and a manual testing plan, and reports
//! violations in text or JSON form with a CI-friendly exit code.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use runlint::{
    batch, report, Config, Document, DocumentReport, DocumentStatus, ReportFormat, ReportOptions,
    ViolationKind,
};

/// Structural linter for Markdown runbook documents
#[derive(Parser)]
#[command(name = "runlint")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check runbook files or directories (default)
    Check {
        /// Files or directories to check
        #[arg(default_value = ".")]
        paths: Vec<PathBuf>,

        /// Output format (text, json)
        #[arg(short, long)]
        format: Option<String>,

        /// Treat warning-severity violations as failures
        #[arg(long)]
        fail_on_warnings: bool,

        /// Configuration file to use instead of the default lookup
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// List the validation rules
    Rules {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Print a skeleton runbook that passes validation
    Template {
        /// Runbook title
        title: String,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },

    /// Show configuration
    Config {
        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose { EnvFilter::new("debug") } else { EnvFilter::new("warn") };

    tracing_subscriber::registry().with(fmt::layer().with_target(false)).with(filter).init();

    match cli.command {
        None => {
            let code = cmd_check(&[PathBuf::from(".")], None, false, None)?;
            std::process::exit(code);
        }
        Some(Commands::Check { paths, format, fail_on_warnings, config }) => {
            let code = cmd_check(&paths, format.as_deref(), fail_on_warnings, config.as_deref())?;
            std::process::exit(code);
        }
        Some(Commands::Rules { format }) => {
            cmd_rules(&format)?;
        }
        Some(Commands::Template { title }) => {
            print!("{}", Document::template(&title));
        }
        Some(Commands::Completions { shell }) => {
            cmd_completions(shell);
        }
        Some(Commands::Config { path }) => {
            cmd_config(path)?;
        }
    }

    Ok(())
}

/// Handle the check command. Returns the process exit code.
fn cmd_check(
    paths: &[PathBuf],
    format: Option<&str>,
    fail_on_warnings: bool,
    config_file: Option<&Path>,
) -> Result<i32> {
    let config = match config_file {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load()?,
    };

    let format = match format {
        Some(s) => s.parse::<ReportFormat>()?,
        None => config.report.format,
    };
    let options = ReportOptions {
        format,
        fail_on_warnings: fail_on_warnings || config.report.fail_on_warnings,
    };

    // Partial-failure semantics: an unreadable path becomes an entry in
    // the report, and the remaining paths are still checked.
    let mut reports: Vec<DocumentReport> = Vec::new();
    for path in paths {
        match batch::check_path(path, &config.rules) {
            Ok(found) => reports.extend(found),
            Err(e) => {
                tracing::warn!(path = ?path, error = %e, "Failed to check path");
                reports.push(DocumentReport {
                    path: path.display().to_string(),
                    status: DocumentStatus::IoFailed(e.to_string()),
                });
            }
        }
    }

    let (output, code) = report::render(&reports, &options)?;
    print!("{output}");
    Ok(code)
}

/// Handle the rules command.
fn cmd_rules(format: &str) -> Result<()> {
    match format.parse::<ReportFormat>()? {
        ReportFormat::Json => {
            let rules: Vec<_> = ViolationKind::ALL
                .iter()
                .map(|kind| {
                    serde_json::json!({
                        "name": kind.name(),
                        "description": kind.description(),
                        "default": "error",
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rules)?);
        }
        ReportFormat::Text => {
            for kind in ViolationKind::ALL {
                println!("{:<26} {}", kind.name(), kind.description());
            }
        }
    }
    Ok(())
}

/// Handle the completions command.
fn cmd_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

/// Handle the config command.
fn cmd_config(show_path: bool) -> Result<()> {
    if show_path {
        match Config::config_path() {
            Some(path) => println!("{}", path.display()),
            None => println!("(no config file found, using defaults)"),
        }
        return Ok(());
    }

    let config = Config::load()?;
    let toml = toml::to_string_pretty(&config)?;
    print!("{toml}");

    Ok(())
}
