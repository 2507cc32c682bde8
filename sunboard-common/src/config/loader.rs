//! Config file discovery and layered resolution.
//!
//! `load_config` reads the TOML file (explicit path, or the platform config
//! directory), then applies `SUNBOARD_*` overrides. Command-line overrides are
//! applied by the binary through [`LoadedConfig::record_cli`].

use super::env::{EnvError, EnvParser};
use super::source::{ConfigSource, ConfigValueSource, Sourced};
use crate::types::SunboardConfig;
use directories::ProjectDirs;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

pub const CONFIG_FILE: &str = "config.toml";

/// Upper bound accepted for any delay coming from the environment.
const MAX_DELAY_MS: u64 = 600_000;

/// Every field that carries a tracked source.
pub const TRACKED_FIELDS: [&str; 8] = [
    "general.log_level",
    "general.data_dir",
    "general.role",
    "typewriter.messages",
    "typewriter.typing_speed_ms",
    "typewriter.deleting_speed_ms",
    "typewriter.pause_after_type_ms",
    "typewriter.pause_after_delete_ms",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error in {name}: {source}")]
    Parse {
        name: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("no data directory configured and the platform provides none")]
    NoDataDir,
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "sunboard")
}

/// `<platform config dir>/sunboard/config.toml`, if the platform has one.
pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

/// Platform data directory for persisted preferences.
pub fn default_data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

/// A resolved configuration plus where each field came from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: SunboardConfig,
    /// File that was read, if any.
    pub path: Option<PathBuf>,
    sources: BTreeMap<&'static str, ConfigValueSource>,
    /// Rejected environment values; the previous layer's value was kept.
    pub env_errors: Vec<EnvError>,
}

impl LoadedConfig {
    pub fn defaults() -> Self {
        Self {
            config: SunboardConfig::default(),
            path: None,
            sources: BTreeMap::new(),
            env_errors: Vec::new(),
        }
    }

    pub fn source_of(&self, field: &str) -> ConfigValueSource {
        self.sources
            .get(field)
            .cloned()
            .unwrap_or_else(ConfigValueSource::default_value)
    }

    /// Sources for every tracked field, in declaration order.
    pub fn sources(&self) -> Vec<(&'static str, ConfigValueSource)> {
        TRACKED_FIELDS
            .iter()
            .map(|field| (*field, self.source_of(field)))
            .collect()
    }

    /// Mark `field` as set by a command-line `flag`.
    pub fn record_cli(&mut self, field: &'static str, flag: &str) {
        self.sources.insert(field, ConfigValueSource::cli(flag));
    }

    /// Directory for persisted preferences.
    pub fn data_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.config.general.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_data_dir().ok_or(ConfigError::NoDataDir),
        }
    }

    /// Apply `SUNBOARD_*` overrides on top of the current values.
    pub fn apply_env(&mut self) {
        let mut parser = EnvParser::new();
        let general = &mut self.config.general;
        let tw = &mut self.config.typewriter;
        let sources = &mut self.sources;

        take_env(
            parser.get_log_level("LOG_LEVEL", &general.log_level),
            "general.log_level",
            &mut general.log_level,
            sources,
        );
        take_env(
            parser.get_optional_path("DATA_DIR"),
            "general.data_dir",
            &mut general.data_dir,
            sources,
        );
        take_env(
            parser.get_parsed("ROLE", general.role, "customer, consultant, or admin"),
            "general.role",
            &mut general.role,
            sources,
        );
        take_env(
            parser.get_delimited_list("TYPEWRITER_MESSAGES", '|', tw.messages.clone()),
            "typewriter.messages",
            &mut tw.messages,
            sources,
        );
        take_env(
            parser.get_u64_range("TYPING_SPEED_MS", tw.typing_speed_ms, 1, MAX_DELAY_MS),
            "typewriter.typing_speed_ms",
            &mut tw.typing_speed_ms,
            sources,
        );
        take_env(
            parser.get_u64_range("DELETING_SPEED_MS", tw.deleting_speed_ms, 1, MAX_DELAY_MS),
            "typewriter.deleting_speed_ms",
            &mut tw.deleting_speed_ms,
            sources,
        );
        take_env(
            parser.get_u64_range("PAUSE_AFTER_TYPE_MS", tw.pause_after_type_ms, 0, MAX_DELAY_MS),
            "typewriter.pause_after_type_ms",
            &mut tw.pause_after_type_ms,
            sources,
        );
        take_env(
            parser.get_u64_range(
                "PAUSE_AFTER_DELETE_MS",
                tw.pause_after_delete_ms,
                0,
                MAX_DELAY_MS,
            ),
            "typewriter.pause_after_delete_ms",
            &mut tw.pause_after_delete_ms,
            sources,
        );

        for error in parser.errors() {
            warn!(%error, "ignoring environment override");
        }
        self.env_errors.extend(parser.take_errors());
    }
}

fn take_env<T>(
    sourced: Sourced<T>,
    field: &'static str,
    slot: &mut T,
    sources: &mut BTreeMap<&'static str, ConfigValueSource>,
) {
    if sourced.is_from_env() {
        *slot = sourced.value;
        sources.insert(field, sourced.source);
    }
}

/// Parse TOML `content`; `name` identifies it in errors.
///
/// Fields present in the document are recorded as coming from `origin`.
pub fn load_from_str(
    content: &str,
    name: &str,
    origin: Option<&Path>,
) -> Result<LoadedConfig, ConfigError> {
    let parse_err = |source| ConfigError::Parse {
        name: name.to_string(),
        source,
    };
    let table: toml::Table = toml::from_str(content).map_err(parse_err)?;
    let config: SunboardConfig = toml::from_str(content).map_err(parse_err)?;

    let mut loaded = LoadedConfig {
        config,
        path: origin.map(Path::to_path_buf),
        ..LoadedConfig::defaults()
    };
    let file_source = match origin {
        Some(path) => ConfigValueSource::file(path),
        None => ConfigValueSource {
            source: ConfigSource::File,
            detail: Some(name.to_string()),
        },
    };
    for field in TRACKED_FIELDS {
        if table_has(&table, field) {
            loaded.sources.insert(field, file_source.clone());
        }
    }
    Ok(loaded)
}

fn table_has(table: &toml::Table, dotted: &str) -> bool {
    let Some((section, key)) = dotted.split_once('.') else {
        return table.contains_key(dotted);
    };
    table
        .get(section)
        .and_then(|value| value.as_table())
        .is_some_and(|section| section.contains_key(key))
}

fn load_from_file(path: &Path) -> Result<LoadedConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    debug!(path = %path.display(), "loading config file");
    load_from_str(&content, &path.display().to_string(), Some(path))
}

/// Resolve the configuration from file and environment.
///
/// An explicit `path` must exist. Without one, a missing default file just
/// means defaults.
pub fn load_config(path: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
    let mut loaded = match path {
        Some(path) => load_from_file(path)?,
        None => match default_config_path() {
            Some(default) if default.exists() => load_from_file(&default)?,
            _ => {
                debug!("no config file, using defaults");
                LoadedConfig::defaults()
            }
        },
    };
    loaded.apply_env();
    Ok(loaded)
}
