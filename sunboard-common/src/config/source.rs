//! Source tracking for configuration values.

use serde::Serialize;
use std::path::Path;

/// Where a configuration value came from, lowest precedence first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
    CommandLine,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::File => write!(f, "file"),
            Self::Environment => write!(f, "env"),
            Self::CommandLine => write!(f, "cli"),
        }
    }
}

/// A source plus the detail needed to find it (variable name, file path, flag).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigValueSource {
    pub source: ConfigSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ConfigValueSource {
    pub fn default_value() -> Self {
        Self {
            source: ConfigSource::Default,
            detail: None,
        }
    }

    pub fn file(path: &Path) -> Self {
        Self {
            source: ConfigSource::File,
            detail: Some(path.display().to_string()),
        }
    }

    pub fn env(var: impl Into<String>) -> Self {
        Self {
            source: ConfigSource::Environment,
            detail: Some(var.into()),
        }
    }

    pub fn cli(flag: impl Into<String>) -> Self {
        Self {
            source: ConfigSource::CommandLine,
            detail: Some(flag.into()),
        }
    }
}

impl std::fmt::Display for ConfigValueSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "{} ({})", self.source, detail),
            None => write!(f, "{}", self.source),
        }
    }
}

/// A value tagged with its source.
#[derive(Debug, Clone, PartialEq)]
pub struct Sourced<T> {
    pub value: T,
    pub source: ConfigValueSource,
}

impl<T> Sourced<T> {
    pub fn default_value(value: T) -> Self {
        Self {
            value,
            source: ConfigValueSource::default_value(),
        }
    }

    pub fn from_env(value: T, var: impl Into<String>) -> Self {
        Self {
            value,
            source: ConfigValueSource::env(var),
        }
    }

    pub fn is_from_env(&self) -> bool {
        self.source.source == ConfigSource::Environment
    }
}
