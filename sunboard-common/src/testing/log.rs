//! Structured test logging.
//!
//! Two entry points:
//!
//! - [`init_test_logging`]: human-readable tracing output routed through the
//!   libtest writer. Used by unit tests.
//! - [`TestLogger`]: per-test JSONL trail in `target/test-logs/` that records
//!   the phases of a scenario together with the observed state, so a failed
//!   typewriter or footer scenario can be replayed by reading the file.
//!
//! ```ignore
//! use sunboard_common::testing::{TestLogger, TestPhase};
//!
//! let logger = TestLogger::for_test("footer_assign_round_trip");
//! logger.log_with_data(TestPhase::Execute, "assign", serde_json::json!({"index": 0}));
//! logger.pass();
//! ```

use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Mutex, Once};
use std::time::Instant;

/// Test execution phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestPhase {
    Setup,
    Execute,
    Verify,
    Teardown,
}

impl std::fmt::Display for TestPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Setup => write!(f, "setup"),
            Self::Execute => write!(f, "execute"),
            Self::Verify => write!(f, "verify"),
            Self::Teardown => write!(f, "teardown"),
        }
    }
}

static TEST_LOGGING_INIT: Once = Once::new();

/// Install a debug-level subscriber writing through the test harness.
///
/// Safe to call from every test; only the first call installs anything.
/// `SUNBOARD_TEST_LOG_LEVEL` overrides the level (default: `debug`).
pub fn init_test_logging() {
    TEST_LOGGING_INIT.call_once(|| {
        let level =
            std::env::var("SUNBOARD_TEST_LOG_LEVEL").unwrap_or_else(|_| "debug".to_string());
        let filter = tracing_subscriber::EnvFilter::try_new(format!(
            "sunboard={level},sunboard_common={level},test={level}"
        ))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));

        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init();
    });
}

/// A structured log entry for test execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestLogEntry {
    /// RFC 3339 timestamp.
    pub timestamp: String,
    pub test_name: String,
    pub phase: TestPhase,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    /// Milliseconds since the logger was created.
    pub elapsed_ms: u64,
}

/// Per-test JSONL logger.
pub struct TestLogger {
    test_name: String,
    start_time: Instant,
    entries: Mutex<Vec<TestLogEntry>>,
    log_file: Option<Mutex<std::fs::File>>,
}

impl TestLogger {
    /// Create a logger and record the `TEST START` entry.
    pub fn for_test(test_name: &str) -> Self {
        init_test_logging();
        let logger = Self {
            test_name: test_name.to_string(),
            start_time: Instant::now(),
            entries: Mutex::new(Vec::new()),
            log_file: create_log_file(test_name).ok().map(Mutex::new),
        };
        logger.log(TestPhase::Setup, "TEST START");
        logger
    }

    pub fn log(&self, phase: TestPhase, message: impl Into<String>) {
        self.write_entry(phase, message.into(), None);
    }

    pub fn log_with_data(
        &self,
        phase: TestPhase,
        message: impl Into<String>,
        data: serde_json::Value,
    ) {
        self.write_entry(phase, message.into(), Some(data));
    }

    fn write_entry(&self, phase: TestPhase, message: String, data: Option<serde_json::Value>) {
        let entry = TestLogEntry {
            timestamp: chrono::Utc::now().to_rfc3339(),
            test_name: self.test_name.clone(),
            phase,
            message,
            data,
            elapsed_ms: self.start_time.elapsed().as_millis() as u64,
        };

        if let Some(file) = &self.log_file
            && let Ok(mut f) = file.lock()
            && let Ok(json) = serde_json::to_string(&entry)
        {
            let _ = writeln!(f, "{json}");
        }

        tracing::info!(
            target: "test",
            test = %self.test_name,
            phase = %entry.phase,
            "{}",
            entry.message
        );

        if let Ok(mut entries) = self.entries.lock() {
            entries.push(entry);
        }
    }

    /// Entries recorded so far.
    pub fn entries(&self) -> Vec<TestLogEntry> {
        self.entries.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn pass(self) {
        self.log(TestPhase::Verify, "TEST PASS");
    }

    pub fn fail(self, reason: impl Into<String>) {
        self.log_with_data(
            TestPhase::Verify,
            "TEST FAIL",
            serde_json::json!({ "reason": reason.into() }),
        );
    }
}

/// Open `<target>/test-logs/<test>.jsonl`, creating the directory.
fn create_log_file(test_name: &str) -> std::io::Result<std::fs::File> {
    let log_dir = find_target_dir().join("test-logs");
    std::fs::create_dir_all(&log_dir)?;
    let safe_name = test_name.replace("::", "_").replace(['/', '\\'], "_");
    std::fs::File::create(log_dir.join(format!("{safe_name}.jsonl")))
}

/// Find the target directory by searching up from the current dir.
fn find_target_dir() -> PathBuf {
    if let Ok(target_dir) = std::env::var("CARGO_TARGET_DIR") {
        return PathBuf::from(target_dir);
    }

    let mut cwd = std::env::current_dir().unwrap_or_default();
    loop {
        let target = cwd.join("target");
        if target.is_dir() {
            return target;
        }
        if !cwd.pop() {
            return PathBuf::from("target");
        }
    }
}
