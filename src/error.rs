//! Error types for workdone
//!
//! Exit codes:
//! - 2: User error (unknown command, missing detail, bad task number)
//! - 4: Operation failed (storage, config, serialization)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the workdone CLI
pub mod exit_codes {
    pub const USER_ERROR: i32 = 2;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for workdone operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("☹ OOPS!!! I'm sorry, but I don't know what that means :-(")]
    InvalidCommand,

    #[error("☹ OOPS!!! The {field} of a {command} cannot be empty.\nPlease follow the format:\n{usage}")]
    MissingDetail {
        field: &'static str,
        command: &'static str,
        usage: String,
    },

    #[error("☹ OOPS!!! A {command} can only have one time slot.")]
    MultipleTimeSlots { command: &'static str },

    #[error("☹ OOPS!!! The time should follow the format: {expected}")]
    InvalidTimeFormat { expected: &'static str },

    #[error("☹ OOPS!!! The task number is invalid.")]
    InvalidTaskNumber,

    #[error("☹ OOPS!!! '{0}' is not a task kind (expected T, D or E).")]
    InvalidTaskKind(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Operation failures (exit code 4)
    #[error("☹ OOPS!!! The file cannot be found. A new file has been created, please try again!")]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt task record '{line}': {reason}")]
    CorruptRecord { line: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl Error {
    /// Build a `StorageUnavailable` for the given store path.
    pub fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::StorageUnavailable {
            path: path.into(),
            source,
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            // User errors
            Error::InvalidCommand
            | Error::MissingDetail { .. }
            | Error::MultipleTimeSlots { .. }
            | Error::InvalidTimeFormat { .. }
            | Error::InvalidTaskNumber
            | Error::InvalidTaskKind(_)
            | Error::InvalidConfig(_) => exit_codes::USER_ERROR,

            // Operation failures
            Error::StorageUnavailable { .. }
            | Error::CorruptRecord { .. }
            | Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::TomlSerialize(_) => exit_codes::OPERATION_FAILED,
        }
    }

    /// Coarse class of the error for JSON output
    pub fn kind(&self) -> &'static str {
        match self.exit_code() {
            exit_codes::USER_ERROR => "user_error",
            _ => "operation_failed",
        }
    }

    /// Structured details for JSON output
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::MissingDetail {
                field,
                command,
                usage,
            } => Some(serde_json::json!({
                "field": field,
                "command": command,
                "usage": usage,
            })),
            Error::MultipleTimeSlots { command } => {
                Some(serde_json::json!({ "command": command }))
            }
            Error::InvalidTimeFormat { expected } => {
                Some(serde_json::json!({ "expected": expected }))
            }
            Error::InvalidTaskKind(kind) => Some(serde_json::json!({ "kind": kind })),
            Error::InvalidConfig(message) => Some(serde_json::json!({ "message": message })),
            Error::StorageUnavailable { path, source } => Some(serde_json::json!({
                "path": path.to_string_lossy(),
                "cause": source.to_string(),
            })),
            Error::CorruptRecord { line, reason } => Some(serde_json::json!({
                "line": line,
                "reason": reason,
            })),
            _ => None,
        }
    }
}

/// Result type alias for workdone operations
pub type Result<T> = std::result::Result<T, Error>;

/// Wrapper for displaying errors in JSON format
#[derive(serde::Serialize)]
pub struct JsonError {
    pub message: String,
    pub code: i32,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&Error> for JsonError {
    fn from(err: &Error) -> Self {
        JsonError {
            message: err.to_string(),
            code: err.exit_code(),
            kind: err.kind(),
            details: err.details(),
        }
    }
}
