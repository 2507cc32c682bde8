//! `sunboard config`: show and check the effective configuration.

use super::helpers::{humanize_millis, quoted};
use crate::ui::{OutputContext, StatusIndicator};
use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;
use sunboard_common::config::{ConfigValueSource, ConfigWarning, validate_config};
use sunboard_common::{ErrorCode, HasErrorCode, LoadedConfig, SunboardConfig};
use thiserror::Error;

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print every setting with the layer it came from
    Show,
    /// Check the configuration; exits non-zero when errors are found
    Validate,
}

/// Validation found at least one error-severity problem.
#[derive(Debug, Error)]
#[error("configuration has {0} error(s)")]
pub struct ValidationFailed(pub usize);

impl HasErrorCode for ValidationFailed {
    fn error_code(&self) -> ErrorCode {
        ErrorCode::ConfigValidationError
    }
}

#[derive(Debug, Serialize)]
struct FieldRow {
    field: &'static str,
    value: String,
    source: ConfigValueSource,
}

/// A `SUNBOARD_*` override that was rejected; the previous layer's value
/// stayed in effect.
#[derive(Debug, Serialize)]
struct EnvRejection {
    code: String,
    message: String,
}

#[derive(Debug, Serialize)]
struct ConfigReport<'a> {
    path: Option<String>,
    config: &'a SunboardConfig,
    fields: Vec<FieldRow>,
    warnings: Vec<ConfigWarning>,
    env_errors: Vec<EnvRejection>,
}

pub fn run(action: &ConfigAction, loaded: &LoadedConfig, ctx: &OutputContext) -> Result<()> {
    let warnings = validate_config(&loaded.config);
    match action {
        ConfigAction::Show => show(loaded, warnings, ctx),
        ConfigAction::Validate => validate(warnings, ctx),
    }
}

fn show(loaded: &LoadedConfig, warnings: Vec<ConfigWarning>, ctx: &OutputContext) -> Result<()> {
    let report = ConfigReport {
        path: loaded.path.as_ref().map(|p| p.display().to_string()),
        config: &loaded.config,
        fields: loaded
            .sources()
            .into_iter()
            .map(|(field, source)| FieldRow {
                field,
                value: render_value(&loaded.config, field),
                source,
            })
            .collect(),
        warnings,
        env_errors: env_rejections(loaded),
    };
    if ctx.is_json() {
        return ctx.json(&report);
    }

    let theme = ctx.theme();
    println!("{}", theme.format_header("Sunboard configuration"));
    match &report.path {
        Some(path) => println!("  file: {path}"),
        None => println!("  file: {}", theme.muted("(none, using defaults)")),
    }
    println!();
    for row in &report.fields {
        println!(
            "  {:<32} {:<40} {}",
            row.field,
            row.value,
            theme.muted(&row.source.to_string())
        );
    }
    for rejection in &report.env_errors {
        println!(
            "{} [{}] {}",
            StatusIndicator::Warning.display(theme),
            rejection.code,
            rejection.message
        );
    }
    for warning in &report.warnings {
        println!("{} {}", indicator(warning).display(theme), warning);
    }
    Ok(())
}

fn validate(warnings: Vec<ConfigWarning>, ctx: &OutputContext) -> Result<()> {
    let errors = warnings.iter().filter(|w| w.is_error()).count();
    if ctx.is_json() {
        ctx.json(&serde_json::json!({ "valid": errors == 0, "warnings": warnings }))?;
    } else if warnings.is_empty() {
        println!(
            "{} configuration is valid",
            StatusIndicator::Success.display(ctx.theme())
        );
    } else {
        for warning in &warnings {
            println!("{} {}", indicator(warning).display(ctx.theme()), warning);
        }
    }
    if errors > 0 {
        return Err(ValidationFailed(errors).into());
    }
    Ok(())
}

fn env_rejections(loaded: &LoadedConfig) -> Vec<EnvRejection> {
    loaded
        .env_errors
        .iter()
        .map(|error| EnvRejection {
            code: error.error_code().code_string(),
            message: error.to_string(),
        })
        .collect()
}

fn indicator(warning: &ConfigWarning) -> StatusIndicator {
    if warning.is_error() {
        StatusIndicator::Error
    } else {
        StatusIndicator::Warning
    }
}

fn render_value(config: &SunboardConfig, field: &str) -> String {
    let general = &config.general;
    let tw = &config.typewriter;
    match field {
        "general.log_level" => general.log_level.clone(),
        "general.data_dir" => general
            .data_dir
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(platform default)".to_string()),
        "general.role" => general.role.to_string(),
        "typewriter.messages" => tw
            .messages
            .iter()
            .map(|m| quoted(m))
            .collect::<Vec<_>>()
            .join(", "),
        "typewriter.typing_speed_ms" => humanize_millis(tw.typing_speed_ms),
        "typewriter.deleting_speed_ms" => humanize_millis(tw.deleting_speed_ms),
        "typewriter.pause_after_type_ms" => humanize_millis(tw.pause_after_type_ms),
        "typewriter.pause_after_delete_ms" => humanize_millis(tw.pause_after_delete_ms),
        _ => String::new(),
    }
}
