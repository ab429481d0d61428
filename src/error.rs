//! Error types for persona-builder
//!
//! Provides structured error handling with:
//! - Numeric error codes for machine parsing
//! - User-friendly messages with suggestions
//! - Exit codes for CLI

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for persona-builder operations
pub type Result<T> = std::result::Result<T, Error>;

/// Numeric error codes for machine parsing and documentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum ErrorCode {
    // Configuration errors (1xx)
    ConfigNotFound = 100,
    ConfigParseError = 101,
    ConfigValidation = 102,

    // IO errors (2xx)
    IoRead = 200,
    IoWrite = 201,
    IoPermission = 202,
    IoNotFound = 203,

    // Persona input errors (3xx)
    UnknownField = 300,
    InvalidChoice = 301,
    MalformedEdit = 302,
    SnapshotDecode = 303,
    SnapshotEncode = 304,

    // Sink errors (4xx)
    ClipboardUnavailable = 400,
    ClipboardFailed = 401,
    ExportExists = 402,

    // Internal errors (9xx)
    InternalError = 900,
}

impl ErrorCode {
    /// Get the string code (e.g., "E100")
    pub fn as_str(&self) -> String {
        format!("E{}", *self as u16)
    }

    /// Get the exit code for CLI (maps to 1-125 range)
    pub fn exit_code(&self) -> i32 {
        match *self as u16 {
            100..=199 => 10, // Config errors
            200..=299 => 20, // IO errors
            300..=399 => 30, // Persona input errors
            400..=499 => 40, // Sink errors
            900..=999 => 90, // Internal errors
            _ => 1,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type for persona-builder
#[derive(Error, Debug)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration parse error
    #[error("Failed to parse configuration {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    Config(String),

    // ─────────────────────────────────────────────────────────────
    // IO Errors
    // ─────────────────────────────────────────────────────────────

    /// File read error
    #[error("Failed to read file: {path}")]
    IoRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File write error
    #[error("Failed to write file: {path}")]
    IoWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    Toml(#[from] toml::ser::Error),

    // ─────────────────────────────────────────────────────────────
    // Persona Input Errors
    // ─────────────────────────────────────────────────────────────

    /// Field identifier does not name one of the ten persona fields
    #[error("Unknown persona field '{name}'")]
    UnknownField { name: String },

    /// Value outside a choice field's closed set
    #[error("Invalid value '{value}' for {field}. Valid: {allowed}")]
    InvalidChoice {
        field: &'static str,
        value: String,
        allowed: String,
    },

    /// Edit argument not in FIELD=VALUE form
    #[error("Malformed edit '{input}': expected FIELD=VALUE")]
    MalformedEdit { input: String },

    /// Snapshot could not be decoded into a persona record
    #[error("Failed to decode persona snapshot{}: {source}", origin_suffix(.origin))]
    SnapshotDecode {
        origin: Option<PathBuf>,
        #[source]
        source: serde_json::Error,
    },

    /// Snapshot could not be encoded
    #[error("Failed to encode persona snapshot: {0}")]
    SnapshotEncode(#[source] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Sink Errors
    // ─────────────────────────────────────────────────────────────

    /// No clipboard program could be started
    #[error("No clipboard program available (tried: {tried})")]
    ClipboardUnavailable { tried: String },

    /// Clipboard program ran but did not accept the text
    #[error("Clipboard program '{program}' failed: {message}")]
    ClipboardFailed { program: String, message: String },

    /// Export target already exists
    #[error("Export file already exists: {path}")]
    ExportExists { path: PathBuf },

    // ─────────────────────────────────────────────────────────────
    // Internal Errors
    // ─────────────────────────────────────────────────────────────

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

fn origin_suffix(origin: &Option<PathBuf>) -> String {
    origin
        .as_ref()
        .map(|p| format!(" {}", p.display()))
        .unwrap_or_default()
}

impl Error {
    // ─────────────────────────────────────────────────────────────
    // Error Classification
    // ─────────────────────────────────────────────────────────────

    /// Get the numeric error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::ConfigNotFound { .. } => ErrorCode::ConfigNotFound,
            Error::ConfigParse { .. } => ErrorCode::ConfigParseError,
            Error::Config(_) => ErrorCode::ConfigValidation,

            Error::IoRead { source, .. } => match source.kind() {
                std::io::ErrorKind::NotFound => ErrorCode::IoNotFound,
                std::io::ErrorKind::PermissionDenied => ErrorCode::IoPermission,
                _ => ErrorCode::IoRead,
            },
            Error::IoWrite { source, .. } => match source.kind() {
                std::io::ErrorKind::PermissionDenied => ErrorCode::IoPermission,
                _ => ErrorCode::IoWrite,
            },
            Error::Io(e) => match e.kind() {
                std::io::ErrorKind::NotFound => ErrorCode::IoNotFound,
                std::io::ErrorKind::PermissionDenied => ErrorCode::IoPermission,
                _ => ErrorCode::IoRead,
            },
            Error::Toml(_) => ErrorCode::ConfigParseError,

            Error::UnknownField { .. } => ErrorCode::UnknownField,
            Error::InvalidChoice { .. } => ErrorCode::InvalidChoice,
            Error::MalformedEdit { .. } => ErrorCode::MalformedEdit,
            Error::SnapshotDecode { .. } => ErrorCode::SnapshotDecode,
            Error::SnapshotEncode(_) => ErrorCode::SnapshotEncode,

            Error::ClipboardUnavailable { .. } => ErrorCode::ClipboardUnavailable,
            Error::ClipboardFailed { .. } => ErrorCode::ClipboardFailed,
            Error::ExportExists { .. } => ErrorCode::ExportExists,

            Error::Internal(_) => ErrorCode::InternalError,
        }
    }

    /// Get the exit code for CLI
    pub fn exit_code(&self) -> i32 {
        self.code().exit_code()
    }

    // ─────────────────────────────────────────────────────────────
    // User-Friendly Messages
    // ─────────────────────────────────────────────────────────────

    /// Get a user-friendly suggestion for how to fix this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Error::ConfigNotFound { .. } => Some(
                "Run 'persona-builder config init' to create a default configuration file."
            ),
            Error::ConfigParse { .. } => Some(
                "Check your configuration file syntax. Run 'persona-builder config validate' to see details."
            ),
            Error::Config(_) => Some(
                "Review the configuration file and fix the invalid values."
            ),

            Error::UnknownField { .. } => Some(
                "Run 'persona-builder fields' to list the available field names."
            ),
            Error::InvalidChoice { .. } => Some(
                "Choice fields accept one of the listed values, or an empty value to leave them unset."
            ),
            Error::MalformedEdit { .. } => Some(
                "Pass edits as --set role=\"You are a support agent.\""
            ),
            Error::SnapshotDecode { .. } => Some(
                "The snapshot must be a JSON object with exactly the ten persona fields, as written by 'persona-builder export'."
            ),

            Error::ClipboardUnavailable { .. } => Some(
                "Install wl-copy, xclip or xsel, or set clipboard.command in the configuration file."
            ),
            Error::ExportExists { .. } => Some(
                "Choose a different export directory or remove the existing file."
            ),

            _ => None,
        }
    }

    /// Format the error for terminal display with colors
    pub fn format_for_terminal(&self) -> String {
        let code = self.code();
        let suggestion = self.suggestion();

        let mut output = format!(
            "\x1b[31mError [{}]\x1b[0m: {}\n",
            code.as_str(),
            self
        );

        if let Some(hint) = suggestion {
            output.push_str(&format!("\n\x1b[33mHint\x1b[0m: {}\n", hint));
        }

        output
    }

    /// Format the error for logging (no colors)
    pub fn format_for_log(&self) -> String {
        let code = self.code();
        format!("[{}] {}", code.as_str(), self)
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Constructors (for ergonomic error creation)
// ─────────────────────────────────────────────────────────────────

impl Error {
    /// Create a config not found error
    pub fn config_not_found(path: impl Into<PathBuf>) -> Self {
        Error::ConfigNotFound { path: path.into() }
    }

    /// Create an unknown field error
    pub fn unknown_field(name: impl Into<String>) -> Self {
        Error::UnknownField { name: name.into() }
    }

    /// Create a malformed edit error
    pub fn malformed_edit(input: impl Into<String>) -> Self {
        Error::MalformedEdit {
            input: input.into(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
