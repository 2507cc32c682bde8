use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

const SUNBOARD_VARS: [&str; 8] = [
    "SUNBOARD_LOG_LEVEL",
    "SUNBOARD_DATA_DIR",
    "SUNBOARD_ROLE",
    "SUNBOARD_TYPEWRITER_MESSAGES",
    "SUNBOARD_TYPING_SPEED_MS",
    "SUNBOARD_DELETING_SPEED_MS",
    "SUNBOARD_PAUSE_AFTER_TYPE_MS",
    "SUNBOARD_PAUSE_AFTER_DELETE_MS",
];

/// Isolated config file and data directory for one binary invocation series.
pub struct TestEnv {
    pub dir: TempDir,
    pub config_path: PathBuf,
    pub data_dir: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        Self::with_config("")
    }

    pub fn with_config(contents: &str) -> Self {
        crate::test_log!("FIXTURE: Creating isolated sunboard environment");

        let dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = dir.path().join("config.toml");
        let data_dir = dir.path().join("data");
        fs::write(&config_path, contents).expect("Failed to write config.toml");

        Self {
            dir,
            config_path,
            data_dir,
        }
    }

    /// Command with `--config` and `--data-dir` pointing into the temp dir.
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_sunboard"));
        for var in SUNBOARD_VARS {
            cmd.env_remove(var);
        }
        cmd.env_remove("RUST_LOG")
            .arg("--config")
            .arg(&self.config_path)
            .arg("--data-dir")
            .arg(&self.data_dir);
        cmd
    }

    pub fn run(&self, args: &[&str]) -> Output {
        crate::test_log!("RUN: sunboard {}", args.join(" "));
        self.command()
            .args(args)
            .output()
            .expect("Failed to run sunboard binary")
    }

    pub fn preferences(&self) -> PathBuf {
        self.data_dir.join("preferences.json")
    }
}
