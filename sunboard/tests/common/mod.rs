pub mod assertions;
pub mod fixtures;
pub mod logging;

pub use assertions::{assert_contains, assert_exit_code, stdout_json};
pub use fixtures::TestEnv;
pub use logging::init_test_logging;
