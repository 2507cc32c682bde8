//! Error Catalog for Sunboard
//!
//! Every user-facing failure maps to a stable code (SB-E001 through SB-E599)
//! with a message and remediation steps.
//!
//! # Error Code Ranges
//!
//! | Range      | Category    | Description                          |
//! |------------|-------------|--------------------------------------|
//! | E001-E099  | Config      | Configuration and setup errors       |
//! | E100-E199  | Storage     | Preference persistence errors        |
//! | E200-E299  | Typewriter  | Typewriter configuration errors      |
//! | E300-E399  | Tabs        | Footer tab and navigation errors     |
//! | E500-E599  | Internal    | Internal/unexpected errors           |

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error code enumeration covering all Sunboard error scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorCode {
    // =========================================================================
    // Config Errors (E001-E099)
    // =========================================================================
    ConfigNotFound,
    ConfigReadError,
    ConfigParseError,
    ConfigValidationError,
    ConfigEnvError,
    ConfigNoDataDir,

    // =========================================================================
    // Storage Errors (E100-E199)
    // =========================================================================
    StorageIoError,
    StorageCorrupted,
    StorageEncodeError,
    StorageUnavailable,

    // =========================================================================
    // Typewriter Errors (E200-E299)
    // =========================================================================
    TypewriterNoMessages,
    TypewriterZeroDelay,
    TypewriterNeverWaits,

    // =========================================================================
    // Tab Errors (E300-E399)
    // =========================================================================
    TabUnknown,
    TabNotOffered,
    TabIndexOutOfRange,
    TabListTooShort,

    // =========================================================================
    // Internal Errors (E500-E599)
    // =========================================================================
    InternalRuntimeError,
}

impl ErrorCode {
    /// Returns the numeric error code (without prefix).
    #[must_use]
    pub const fn code_number(&self) -> u16 {
        match self {
            Self::ConfigNotFound => 1,
            Self::ConfigReadError => 2,
            Self::ConfigParseError => 3,
            Self::ConfigValidationError => 4,
            Self::ConfigEnvError => 5,
            Self::ConfigNoDataDir => 6,

            Self::StorageIoError => 100,
            Self::StorageCorrupted => 101,
            Self::StorageEncodeError => 102,
            Self::StorageUnavailable => 103,

            Self::TypewriterNoMessages => 200,
            Self::TypewriterZeroDelay => 201,
            Self::TypewriterNeverWaits => 202,

            Self::TabUnknown => 300,
            Self::TabNotOffered => 301,
            Self::TabIndexOutOfRange => 302,
            Self::TabListTooShort => 303,

            Self::InternalRuntimeError => 500,
        }
    }

    /// Returns the formatted error code string (e.g., "SB-E001").
    #[must_use]
    pub fn code_string(&self) -> String {
        format!("SB-E{:03}", self.code_number())
    }

    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self.code_number() {
            1..=99 => ErrorCategory::Config,
            100..=199 => ErrorCategory::Storage,
            200..=299 => ErrorCategory::Typewriter,
            300..=399 => ErrorCategory::Tabs,
            _ => ErrorCategory::Internal,
        }
    }

    /// Returns the full error entry with all metadata.
    #[must_use]
    pub fn entry(&self) -> ErrorEntry {
        ErrorEntry {
            code: self.code_string(),
            category: self.category(),
            message: self.message().to_string(),
            remediation: self
                .remediation()
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }

    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::ConfigNotFound => "Configuration file not found",
            Self::ConfigReadError => "Configuration file could not be read",
            Self::ConfigParseError => "Configuration file is not valid TOML",
            Self::ConfigValidationError => "Configuration contains invalid values",
            Self::ConfigEnvError => "Environment variable override was rejected",
            Self::ConfigNoDataDir => "No data directory available for preferences",

            Self::StorageIoError => "Preferences file could not be accessed",
            Self::StorageCorrupted => "Preferences file is corrupted",
            Self::StorageEncodeError => "Preferences could not be encoded",
            Self::StorageUnavailable => "Preference storage is unavailable",

            Self::TypewriterNoMessages => "Typewriter has no messages to show",
            Self::TypewriterZeroDelay => "Typewriter speed must be greater than zero",
            Self::TypewriterNeverWaits => "Typewriter would spin without ever waiting",

            Self::TabUnknown => "Unknown tab identifier",
            Self::TabNotOffered => "Tab is not available to this role",
            Self::TabIndexOutOfRange => "Footer slot index is out of range",
            Self::TabListTooShort => "Footer needs at least two tabs",

            Self::InternalRuntimeError => "Async runtime failed",
        }
    }

    #[must_use]
    pub const fn remediation(&self) -> &'static [&'static str] {
        match self {
            Self::ConfigNotFound => &[
                "Check the path passed to --config",
                "Omit --config to use the default location",
            ],
            Self::ConfigReadError => &["Check file permissions on the config file"],
            Self::ConfigParseError => &[
                "Fix the TOML syntax at the reported line",
                "Run `sunboard config show` after editing to confirm",
            ],
            Self::ConfigValidationError => &[
                "Run `sunboard config show` to see each value and its source",
                "Typing and deleting speeds must be at least 1 ms",
            ],
            Self::ConfigEnvError => &[
                "Unset or correct the SUNBOARD_* variable named in the warning",
            ],
            Self::ConfigNoDataDir => &[
                "Pass --data-dir or set SUNBOARD_DATA_DIR",
                "Set general.data_dir in config.toml",
            ],

            Self::StorageIoError => &[
                "Check that the data directory exists and is writable",
                "Check available disk space",
            ],
            Self::StorageCorrupted => &[
                "The next saved change rewrites the file",
                "Delete preferences.json to start over",
            ],
            Self::StorageEncodeError => &["Report this as a bug"],
            Self::StorageUnavailable => &["Retry; defaults are used until storage returns"],

            Self::TypewriterNoMessages => &[
                "Add at least one entry to typewriter.messages",
                "Or pass --message on the command line",
            ],
            Self::TypewriterZeroDelay => &[
                "Set typewriter.typing_speed_ms and deleting_speed_ms to 1 or more",
            ],
            Self::TypewriterNeverWaits => &[
                "Add a message with at least one character",
                "Or give pause_after_type_ms or pause_after_delete_ms a non-zero value",
            ],

            Self::TabUnknown => &["Run `sunboard tabs show` to list valid tab ids"],
            Self::TabNotOffered => &[
                "Run `sunboard tabs show` to list tabs for the current role",
                "Switch roles with --role",
            ],
            Self::TabIndexOutOfRange => &["Use an index shown by `sunboard tabs show`"],
            Self::TabListTooShort => &["Pass at least two tab ids"],

            Self::InternalRuntimeError => &["Re-run with -v and report the output"],
        }
    }

    /// All error codes, for listing and tests.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::ConfigNotFound,
            Self::ConfigReadError,
            Self::ConfigParseError,
            Self::ConfigValidationError,
            Self::ConfigEnvError,
            Self::ConfigNoDataDir,
            Self::StorageIoError,
            Self::StorageCorrupted,
            Self::StorageEncodeError,
            Self::StorageUnavailable,
            Self::TypewriterNoMessages,
            Self::TypewriterZeroDelay,
            Self::TypewriterNeverWaits,
            Self::TabUnknown,
            Self::TabNotOffered,
            Self::TabIndexOutOfRange,
            Self::TabListTooShort,
            Self::InternalRuntimeError,
        ]
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code_string(), self.message())
    }
}

/// Error category for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    /// Configuration and setup errors (E001-E099)
    Config,
    /// Preference persistence errors (E100-E199)
    Storage,
    /// Typewriter errors (E200-E299)
    Typewriter,
    /// Footer tab and navigation errors (E300-E399)
    Tabs,
    /// Internal/unexpected errors (E500-E599)
    Internal,
}

impl ErrorCategory {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Config => "Configuration",
            Self::Storage => "Storage",
            Self::Typewriter => "Typewriter",
            Self::Tabs => "Tabs",
            Self::Internal => "Internal",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Complete error entry with all metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEntry {
    /// Error code string (e.g., "SB-E001")
    pub code: String,
    pub category: ErrorCategory,
    pub message: String,
    /// Steps to remediate the error
    pub remediation: Vec<String>,
}

impl ErrorEntry {
    /// Formats the error for display with full remediation steps.
    #[must_use]
    pub fn format_full(&self) -> String {
        let mut output = format!("[{}] {}\n", self.code, self.message);

        if !self.remediation.is_empty() {
            output.push_str("\nRemediation steps:\n");
            for (i, step) in self.remediation.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, step));
            }
        }

        output
    }

    /// Formats the error as a single line.
    #[must_use]
    pub fn format_brief(&self) -> String {
        format!("[{}] {}", self.code, self.message)
    }
}

impl fmt::Display for ErrorEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_brief())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_numbers_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for code in ErrorCode::all() {
            let num = code.code_number();
            assert!(
                seen.insert(num),
                "Duplicate error code number: {} for {:?}",
                num,
                code
            );
        }
    }

    #[test]
    fn test_code_string_format() {
        assert_eq!(ErrorCode::ConfigNotFound.code_string(), "SB-E001");
        assert_eq!(ErrorCode::StorageIoError.code_string(), "SB-E100");
        assert_eq!(ErrorCode::TypewriterNoMessages.code_string(), "SB-E200");
        assert_eq!(ErrorCode::TabNotOffered.code_string(), "SB-E301");
        assert_eq!(ErrorCode::InternalRuntimeError.code_string(), "SB-E500");
    }

    #[test]
    fn test_category_follows_range() {
        for code in ErrorCode::all() {
            let expected = match code.code_number() {
                1..=99 => ErrorCategory::Config,
                100..=199 => ErrorCategory::Storage,
                200..=299 => ErrorCategory::Typewriter,
                300..=399 => ErrorCategory::Tabs,
                _ => ErrorCategory::Internal,
            };
            assert_eq!(code.category(), expected, "{code:?}");
        }
    }

    #[test]
    fn test_every_code_has_message_and_remediation() {
        for code in ErrorCode::all() {
            assert!(!code.message().is_empty(), "{code:?}");
            assert!(!code.remediation().is_empty(), "{code:?}");
        }
    }

    #[test]
    fn test_entry_serializes_with_code_string() {
        let entry = ErrorCode::ConfigNotFound.entry();
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("SB-E001"));
        assert!(json.contains("\"category\":\"config\""));
        let parsed: ErrorEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, entry);
    }

    #[test]
    fn test_format_full_lists_numbered_steps() {
        let formatted = ErrorCode::TabNotOffered.entry().format_full();
        assert!(formatted.starts_with("[SB-E301] Tab is not available to this role\n"));
        assert!(formatted.contains("  1. Run `sunboard tabs show`"));
        assert!(formatted.contains("  2. Switch roles with --role"));
    }

    #[test]
    fn test_format_brief() {
        assert_eq!(
            ErrorCode::TabListTooShort.entry().format_brief(),
            "[SB-E303] Footer needs at least two tabs"
        );
    }
}
