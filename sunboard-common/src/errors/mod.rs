//! Error catalog and code mapping for Sunboard.
//!
//! Each domain error type maps onto a catalog [`ErrorCode`] so the CLI can
//! print a stable code and remediation steps next to the underlying cause.

pub mod catalog;

pub use catalog::{ErrorCategory, ErrorCode, ErrorEntry};

use crate::config::{ConfigError, EnvError};
use crate::storage::StorageError;
use crate::tabs::AssignError;
use crate::typewriter::TypewriterError;

/// Errors that belong to a catalog entry.
pub trait HasErrorCode {
    fn error_code(&self) -> ErrorCode;
}

impl HasErrorCode for ConfigError {
    fn error_code(&self) -> ErrorCode {
        match self {
            ConfigError::NotFound { .. } => ErrorCode::ConfigNotFound,
            ConfigError::Read { .. } => ErrorCode::ConfigReadError,
            ConfigError::Parse { .. } => ErrorCode::ConfigParseError,
            ConfigError::NoDataDir => ErrorCode::ConfigNoDataDir,
        }
    }
}

impl HasErrorCode for EnvError {
    fn error_code(&self) -> ErrorCode {
        ErrorCode::ConfigEnvError
    }
}

impl HasErrorCode for StorageError {
    fn error_code(&self) -> ErrorCode {
        match self {
            StorageError::Io { .. } => ErrorCode::StorageIoError,
            StorageError::Corrupted { .. } => ErrorCode::StorageCorrupted,
            StorageError::Encode(_) => ErrorCode::StorageEncodeError,
            StorageError::Unavailable(_) => ErrorCode::StorageUnavailable,
        }
    }
}

impl HasErrorCode for TypewriterError {
    fn error_code(&self) -> ErrorCode {
        match self {
            TypewriterError::NoMessages => ErrorCode::TypewriterNoMessages,
            TypewriterError::ZeroDelay { .. } => ErrorCode::TypewriterZeroDelay,
            TypewriterError::NeverWaits => ErrorCode::TypewriterNeverWaits,
        }
    }
}

impl HasErrorCode for AssignError {
    fn error_code(&self) -> ErrorCode {
        match self {
            AssignError::UnknownTab(_) => ErrorCode::TabUnknown,
            AssignError::NotInCatalog { .. } => ErrorCode::TabNotOffered,
            AssignError::IndexOutOfRange { .. } => ErrorCode::TabIndexOutOfRange,
            AssignError::TooFew { .. } => ErrorCode::TabListTooShort,
        }
    }
}
