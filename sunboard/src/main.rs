//! Sunboard - dashboard state from the terminal
//!
//! Runs the typewriter headline animation and edits the persisted footer
//! tabs using the same state core the dashboard uses.

#![forbid(unsafe_code)]

mod commands;
mod ui;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use sunboard_common::{
    AssignError, ConfigError, ErrorCode, HasErrorCode, LoadedConfig, Role, StorageError,
    TypewriterError, load_config,
};
use tracing::{debug, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::config::{ConfigAction, ValidationFailed};
use commands::helpers::indent_lines;
use commands::tabs::TabsAction;
use commands::typewriter::{SignalError, TypewriterArgs};
use ui::OutputContext;

#[derive(Parser)]
#[command(name = "sunboard")]
#[command(author, version, about = "Sunboard - dashboard typewriter and footer tabs")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit machine-readable JSON on stdout
    #[arg(long, global = true)]
    json: bool,

    /// Write logs to stderr as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    /// Path to config.toml (default: platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory holding preferences.json
    #[arg(long, global = true, value_name = "PATH")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Animate the rotating headline
    Typewriter(TypewriterArgs),

    /// Show or edit the footer tabs
    Tabs {
        /// Role whose tab catalog applies
        #[arg(long, global = true)]
        role: Option<Role>,

        #[command(subcommand)]
        action: TabsAction,
    },

    /// Inspect the effective configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// List error codes, or explain one
    Errors {
        /// Code such as SB-E301
        code: Option<String>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let ctx = OutputContext::new(cli.json);

    // Config is read before logging so its level can seed the filter.
    let loaded = load_config(cli.config.as_deref());
    let level = loaded
        .as_ref()
        .map(|l| l.config.general.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    init_logging(cli.verbose, &level, cli.log_json);

    match run(cli, loaded, &ctx).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err, &ctx);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool, level: &str, json: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    };

    if json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .with(filter)
            .init();
    }
}

async fn run(
    cli: Cli,
    loaded: Result<LoadedConfig, ConfigError>,
    ctx: &OutputContext,
) -> Result<()> {
    if let Commands::Errors { code } = &cli.command {
        return commands::errors::run(code.as_deref(), ctx);
    }

    let mut loaded = loaded.context("failed to load configuration")?;
    if let Some(dir) = cli.data_dir {
        loaded.config.general.data_dir = Some(dir);
        loaded.record_cli("general.data_dir", "--data-dir");
    }
    for rejected in &loaded.env_errors {
        warn!(code = %rejected.error_code().code_string(), "{rejected}");
    }
    debug!(path = ?loaded.path, "configuration resolved");

    match cli.command {
        Commands::Typewriter(args) => {
            args.apply_to(&mut loaded);
            commands::typewriter::run(&args, &loaded, ctx).await
        }
        Commands::Tabs { role, action } => {
            if let Some(role) = role {
                loaded.config.general.role = role;
                loaded.record_cli("general.role", "--role");
            }
            let data_dir = loaded.data_dir()?;
            commands::tabs::run(&action, loaded.config.general.role, &data_dir, ctx)
        }
        Commands::Config { action } => commands::config::run(&action, &loaded, ctx),
        Commands::Errors { .. } => Ok(()),
    }
}

/// Find the first catalogued error in the cause chain.
fn error_code(err: &anyhow::Error) -> Option<ErrorCode> {
    err.chain().find_map(|cause| {
        if let Some(e) = cause.downcast_ref::<AssignError>() {
            Some(e.error_code())
        } else if let Some(e) = cause.downcast_ref::<TypewriterError>() {
            Some(e.error_code())
        } else if let Some(e) = cause.downcast_ref::<ConfigError>() {
            Some(e.error_code())
        } else if let Some(e) = cause.downcast_ref::<StorageError>() {
            Some(e.error_code())
        } else if let Some(e) = cause.downcast_ref::<SignalError>() {
            Some(e.error_code())
        } else {
            cause
                .downcast_ref::<ValidationFailed>()
                .map(HasErrorCode::error_code)
        }
    })
}

fn report(err: &anyhow::Error, ctx: &OutputContext) {
    let entry = error_code(err).map(|code| code.entry());

    if ctx.is_json() {
        let payload = serde_json::json!({
            "error": format!("{err:#}"),
            "code": entry.as_ref().map(|e| e.code.clone()),
            "remediation": entry.as_ref().map(|e| e.remediation.clone()),
        });
        if ctx.json(&payload).is_err() {
            ui::eprint_error(&format!("{err:#}"));
        }
        return;
    }

    ui::eprint_error(&format!("{err:#}"));
    if let Some(entry) = entry {
        eprintln!();
        eprintln!("{}", indent_lines(entry.format_full().trim_end(), "  "));
    }
}
