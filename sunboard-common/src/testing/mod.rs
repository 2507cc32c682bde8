//! Test support shared by unit and integration tests.

mod log;

pub use log::{TestLogEntry, TestLogger, TestPhase, init_test_logging};
