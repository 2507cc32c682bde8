//! Sunboard common library
//!
//! Dashboard state shared by the `sunboard` binary: the typewriter
//! animation engine, role-aware footer tabs, the dashboard session, key-value
//! persistence, timer scheduling and layered configuration.

pub mod config;
pub mod errors;
pub mod scheduler;
pub mod session;
pub mod storage;
pub mod tabs;
pub mod testing;
pub mod types;
pub mod typewriter;

pub use config::{ConfigError, LoadedConfig, load_config};
pub use errors::{ErrorCategory, ErrorCode, ErrorEntry, HasErrorCode};
pub use scheduler::{ManualScheduler, Scheduler, TimerHandle, TokioScheduler};
pub use session::DashboardSession;
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore, StorageError};
pub use tabs::{AssignError, FooterTabs, TabCatalog};
pub use types::{
    GeneralConfig, Role, SunboardConfig, TabDescriptor, TabId, TypewriterSettings, UnknownTab,
};
pub use typewriter::{
    Phase, Typewriter, TypewriterConfig, TypewriterEngine, TypewriterError, TypewriterSnapshot,
};
