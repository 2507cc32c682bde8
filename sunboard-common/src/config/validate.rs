//! Semantic checks on a resolved [`SunboardConfig`].
//!
//! Parsing guarantees shape; this module checks values. All findings are
//! collected before returning.

use crate::types::SunboardConfig;
use serde::Serialize;
use std::fmt;

/// Pauses longer than this are legal but almost certainly a typo.
const LONG_PAUSE_MS: u64 = 60_000;

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// One finding, addressed by dotted field path (e.g. `typewriter.messages`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigWarning {
    pub severity: Severity,
    pub field: String,
    pub message: String,
}

impl ConfigWarning {
    fn error(field: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            field: field.to_string(),
            message: message.into(),
        }
    }

    fn warning(field: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.severity, self.field, self.message)
    }
}

/// Check `config` and return every finding, errors first.
pub fn validate_config(config: &SunboardConfig) -> Vec<ConfigWarning> {
    let mut findings = Vec::new();
    let general = &config.general;
    let tw = &config.typewriter;

    if !LOG_LEVELS.contains(&general.log_level.to_lowercase().as_str()) {
        findings.push(ConfigWarning::error(
            "general.log_level",
            format!(
                "'{}' is not one of {}",
                general.log_level,
                LOG_LEVELS.join(", ")
            ),
        ));
    }

    if let Some(dir) = &general.data_dir
        && dir.is_relative()
    {
        findings.push(ConfigWarning::warning(
            "general.data_dir",
            format!(
                "'{}' is relative and resolves against the working directory",
                dir.display()
            ),
        ));
    }

    if tw.messages.is_empty() {
        findings.push(ConfigWarning::error(
            "typewriter.messages",
            "at least one message is required",
        ));
    } else if tw.messages.iter().all(String::is_empty)
        && tw.pause_after_type_ms == 0
        && tw.pause_after_delete_ms == 0
    {
        findings.push(ConfigWarning::error(
            "typewriter.messages",
            "every message is empty and both pauses are zero; the animation would never wait",
        ));
    } else if tw.messages.iter().all(|m| m.trim().is_empty()) {
        findings.push(ConfigWarning::warning(
            "typewriter.messages",
            "every message is blank; nothing will be typed",
        ));
    }

    for (field, value) in [
        ("typewriter.typing_speed_ms", tw.typing_speed_ms),
        ("typewriter.deleting_speed_ms", tw.deleting_speed_ms),
    ] {
        if value == 0 {
            findings.push(ConfigWarning::error(field, "must be greater than zero"));
        }
    }

    for (field, value) in [
        ("typewriter.pause_after_type_ms", tw.pause_after_type_ms),
        ("typewriter.pause_after_delete_ms", tw.pause_after_delete_ms),
    ] {
        if value > LONG_PAUSE_MS {
            findings.push(ConfigWarning::warning(
                field,
                format!("{value} ms is longer than a minute"),
            ));
        }
    }

    findings.sort_by(|a, b| b.severity.cmp(&a.severity));
    findings
}
