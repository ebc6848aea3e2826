//! Error types for the HRIS admin console
//!
//! Provides structured error handling with:
//! - Numeric error codes for machine parsing
//! - User-friendly messages with suggestions
//! - Exit codes for CLI

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for admin console operations
pub type Result<T> = std::result::Result<T, Error>;

/// Numeric error codes for machine parsing and documentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum ErrorCode {
    // Configuration errors (1xx)
    ConfigNotFound = 100,
    ConfigParseError = 101,
    ConfigCorrupt = 102,
    ConfigValidation = 103,
    SettingUnknown = 110,
    SettingInvalid = 111,

    // Storage errors (2xx)
    StorageRead = 200,
    StorageWrite = 201,
    StorageSerialize = 202,
    StorageCorrupt = 203,

    // Role / permission errors (3xx)
    RoleUnknown = 300,
    PermissionDenied = 301,

    // Layout / catalog errors (4xx)
    WidgetUnknown = 400,
    TabUnknown = 401,
    LayoutIndex = 402,
    LayoutCorrupt = 403,
}

impl ErrorCode {
    /// Get the error code as a string (e.g., "E102")
    pub fn as_str(&self) -> String {
        format!("E{:03}", *self as u16)
    }

    /// Get the exit code for CLI (1-125 range)
    pub fn exit_code(&self) -> i32 {
        match *self as u16 {
            100..=199 => 10,
            200..=299 => 20,
            300..=399 => 30,
            400..=499 => 40,
            _ => 1,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type
#[derive(Error, Debug)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────

    /// Explicitly requested app config file does not exist
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// App config file could not be parsed
    #[error("Failed to parse configuration: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<toml::de::Error>,
    },

    /// Generic app configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Persisted system configuration blob is not valid JSON for its schema
    #[error("Stored system configuration under '{key}' is corrupt: {message}")]
    CorruptConfig { key: String, message: String },

    /// Unknown general settings key
    #[error("Unknown setting '{key}'")]
    UnknownSetting { key: String },

    /// Value cannot be applied to a settings key
    #[error("Invalid value '{value}' for setting '{key}': {reason}")]
    InvalidSetting {
        key: String,
        value: String,
        reason: String,
    },

    // ─────────────────────────────────────────────────────────────
    // Storage Errors
    // ─────────────────────────────────────────────────────────────

    /// Failed reading the persistence medium
    #[error("Failed to read store: {path}")]
    StorageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed writing the persistence medium
    #[error("Failed to write store: {path}")]
    StorageWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The store file exists but is not a JSON object of strings
    #[error("Store file {path} is unreadable: {message}")]
    CorruptStore { path: PathBuf, message: String },

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Role / Permission Errors
    // ─────────────────────────────────────────────────────────────

    /// Role name is not part of the closed role set
    #[error("Unknown role '{name}'")]
    UnknownRole { name: String },

    /// Widget requires a permission the role does not hold
    #[error("Role {role} may not use widget '{widget}' (requires '{permission}')")]
    PermissionDenied {
        role: String,
        widget: String,
        permission: String,
    },

    // ─────────────────────────────────────────────────────────────
    // Layout / Catalog Errors
    // ─────────────────────────────────────────────────────────────

    /// Widget id is not in the catalog
    #[error("Unknown widget '{id}'")]
    UnknownWidget { id: String },

    /// Tab id is not in the catalog
    #[error("Unknown tab '{id}'")]
    UnknownTab { id: String },

    /// Move target outside the layout
    #[error("Position {index} is out of range for a layout of {len} widgets")]
    LayoutIndex { index: usize, len: usize },

    /// Saved widget order for a role is not a JSON list of ids
    #[error("Saved dashboard layout for {role} is corrupt: {message}")]
    CorruptLayout { role: String, message: String },
}

impl Error {
    /// Get the numeric error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::ConfigNotFound { .. } => ErrorCode::ConfigNotFound,
            Error::ConfigParse { .. } => ErrorCode::ConfigParseError,
            Error::Config(_) => ErrorCode::ConfigValidation,
            Error::CorruptConfig { .. } => ErrorCode::ConfigCorrupt,
            Error::UnknownSetting { .. } => ErrorCode::SettingUnknown,
            Error::InvalidSetting { .. } => ErrorCode::SettingInvalid,

            Error::StorageRead { .. } => ErrorCode::StorageRead,
            Error::StorageWrite { .. } => ErrorCode::StorageWrite,
            Error::CorruptStore { .. } => ErrorCode::StorageCorrupt,
            Error::Json(_) => ErrorCode::StorageSerialize,

            Error::UnknownRole { .. } => ErrorCode::RoleUnknown,
            Error::PermissionDenied { .. } => ErrorCode::PermissionDenied,

            Error::UnknownWidget { .. } => ErrorCode::WidgetUnknown,
            Error::UnknownTab { .. } => ErrorCode::TabUnknown,
            Error::LayoutIndex { .. } => ErrorCode::LayoutIndex,
            Error::CorruptLayout { .. } => ErrorCode::LayoutCorrupt,
        }
    }

    /// Get the exit code for CLI
    pub fn exit_code(&self) -> i32 {
        self.code().exit_code()
    }

    /// Get a user-friendly suggestion for fixing the error
    pub fn suggestion(&self) -> Option<String> {
        let hint = match self {
            Error::ConfigNotFound { .. } => {
                "Create a configuration file with: hris-admin config init".to_string()
            }
            Error::ConfigParse { .. } => "Check the TOML syntax of your configuration file".to_string(),
            Error::CorruptConfig { .. } | Error::CorruptStore { .. } => {
                "Discard the stored configuration with: hris-admin config reset".to_string()
            }
            Error::CorruptLayout { role, .. } => {
                format!("Discard the saved order with: hris-admin layout reset --role {}", role)
            }
            Error::UnknownSetting { .. } => {
                "Run 'hris-admin config show' to list the available settings".to_string()
            }
            Error::UnknownRole { .. } => "Run 'hris-admin role list' to see valid roles".to_string(),
            Error::PermissionDenied { .. } => {
                "Grant the permission with: hris-admin config grant <role> <permission>".to_string()
            }
            Error::UnknownWidget { .. } => "Run 'hris-admin widgets' to see the catalog".to_string(),
            Error::StorageWrite { .. } => "Check that the data directory is writable".to_string(),
            _ => return None,
        };
        Some(hint)
    }

    /// Format the error for terminal display (with colors and suggestions)
    pub fn format_for_terminal(&self) -> String {
        let mut output = format!("\x1b[31mError\x1b[0m [{}]: {}\n", self.code(), self);
        if let Some(hint) = self.suggestion() {
            output.push_str(&format!("\n\x1b[33mHint\x1b[0m: {}\n", hint));
        }
        output
    }

    /// Format the error for logging (no colors)
    pub fn format_for_log(&self) -> String {
        format!("[{}] {}", self.code(), self)
    }

    pub fn unknown_role(name: impl Into<String>) -> Self {
        Error::UnknownRole { name: name.into() }
    }

    pub fn corrupt_config(key: impl Into<String>, message: impl Into<String>) -> Self {
        Error::CorruptConfig {
            key: key.into(),
            message: message.into(),
        }
    }

    pub fn corrupt_layout(role: impl Into<String>, message: impl Into<String>) -> Self {
        Error::CorruptLayout {
            role: role.into(),
            message: message.into(),
        }
    }

    pub fn invalid_setting(
        key: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Error::InvalidSetting {
            key: key.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_format() {
        assert_eq!(ErrorCode::ConfigNotFound.as_str(), "E100");
        assert_eq!(ErrorCode::ConfigCorrupt.as_str(), "E102");
        assert_eq!(ErrorCode::LayoutCorrupt.as_str(), "E403");
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(ErrorCode::ConfigCorrupt.exit_code(), 10);
        assert_eq!(ErrorCode::StorageWrite.exit_code(), 20);
        assert_eq!(ErrorCode::PermissionDenied.exit_code(), 30);
        assert_eq!(ErrorCode::LayoutIndex.exit_code(), 40);
        assert_eq!(ErrorCode::StorageCorrupt.exit_code(), 20);
    }

    #[test]
    fn test_corrupt_config_hint() {
        let err = Error::corrupt_config("hris_system_config_v3", "expected value");
        assert_eq!(err.code(), ErrorCode::ConfigCorrupt);
        assert!(err.suggestion().unwrap().contains("config reset"));
        assert!(err.format_for_log().starts_with("[E102]"));
    }

    #[test]
    fn test_corrupt_layout_hint_names_role() {
        let err = Error::corrupt_layout("HR_Admin", "expected value");
        assert_eq!(err.code(), ErrorCode::LayoutCorrupt);
        assert_eq!(
            err.suggestion().as_deref(),
            Some("Discard the saved order with: hris-admin layout reset --role HR_Admin")
        );
        assert!(!err.suggestion().unwrap().contains("config reset"));
    }

    #[test]
    fn test_permission_denied_display() {
        let err = Error::PermissionDenied {
            role: "Employee".into(),
            widget: "payroll-summary".into(),
            permission: "finance:view".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Employee"));
        assert!(msg.contains("finance:view"));
    }
}
