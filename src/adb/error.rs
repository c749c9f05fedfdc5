use std::path::PathBuf;
use thiserror::Error;

/// A specialized `Result` type for adb operations.
pub type AdbResult<T> = Result<T, AdbError>;

/// The error type for all adb-related operations.
#[derive(Debug, Error)]
pub enum AdbError {
    #[error(
        "adb executable '{path}' not found. Install Android Platform Tools (https://developer.android.com/tools/adb) or add 'adb' to PATH."
    )]
    ExecutableNotFound { path: String },

    #[error("adb is not configured and the platform-tools download was declined")]
    ExecutableNotConfigured,

    #[error("Failed to spawn '{program}': {source}")]
    CommandSpawnFailed {
        program: String,
        source: std::io::Error,
    },

    #[error("Command {argv:?} exited with {exit_code:?}: {output}")]
    CommandFailed {
        exit_code: Option<i32>,
        argv: Vec<String>,
        output: String,
    },

    #[error("Invalid command input: {reason}")]
    InvalidArgument { reason: String },

    #[error("Directory {path:?} does not exist")]
    DirectoryNotFound { path: PathBuf },

    #[error("{path:?} must have a '{expected}' extension")]
    InvalidExtension { path: PathBuf, expected: String },

    #[error("Failed to read package list {path:?}: {reason}")]
    FileFormat { path: PathBuf, reason: String },

    #[error("Platform-tools download failed: {reason}")]
    DownloadFailed { reason: String },
}

impl AdbError {
    /// The captured process output, for errors that carry one.
    ///
    /// `CommandFailed` always retains the text the process printed before
    /// exiting, so callers can inspect the diagnostic even on failure.
    pub fn output(&self) -> Option<&str> {
        match self {
            AdbError::CommandFailed { output, .. } => Some(output),
            _ => None,
        }
    }

    /// Exit code of a failed command, if the process exited normally.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            AdbError::CommandFailed { exit_code, .. } => *exit_code,
            _ => None,
        }
    }
}
