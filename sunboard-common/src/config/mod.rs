//! Configuration system for Sunboard.
//!
//! Values resolve in layers: built-in defaults, the TOML config file,
//! `SUNBOARD_*` environment variables, then command-line flags. Every
//! resolved field remembers which layer set it.

pub mod env;
pub mod loader;
pub mod source;
pub mod validate;

pub use env::{EnvError, EnvParser};
pub use loader::{
    ConfigError, LoadedConfig, default_config_path, default_data_dir, load_config, load_from_str,
};
pub use source::{ConfigSource, ConfigValueSource, Sourced};
pub use validate::{ConfigWarning, Severity, validate_config};

#[cfg(test)]
pub(crate) fn env_test_lock() -> std::sync::MutexGuard<'static, ()> {
    use std::sync::{Mutex, OnceLock};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|e| e.into_inner())
}
