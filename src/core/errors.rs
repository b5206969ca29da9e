/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use super::types::{Pid, SignalNumber};
use miette::Diagnostic;
use nix::errno::Errno;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Wait operation result
pub type WaitResult<T> = Result<T, WaitError>;

/// Process operation result
pub type ProcessResult<T> = Result<T, ProcessError>;

/// Signal operation result
pub type SignalResult<T> = Result<T, SignalError>;

/// Errors raised while waiting on child processes
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum WaitError {
    #[error("No child processes to wait for")]
    #[diagnostic(
        code(wait::no_children),
        help("The target selects no live or unreaped children of this process.")
    )]
    NoChildren,

    #[error("Wait interrupted by a signal")]
    #[diagnostic(code(wait::interrupted))]
    Interrupted,

    #[error("Timed out after {waited_ms}ms waiting for child state change")]
    #[diagnostic(
        code(wait::timeout),
        help("Raise the timeout or drop it to wait without a deadline.")
    )]
    Timeout { waited_ms: u64 },

    #[error("Invalid wait target: {0}")]
    #[diagnostic(
        code(wait::invalid_target),
        help("Use 'any', 'group', a positive PID, or 'pgid:<n>'.")
    )]
    InvalidTarget(String),

    #[error("Invalid configuration: {0}")]
    #[diagnostic(code(wait::invalid_config))]
    InvalidConfig(String),

    #[error("Wait failed: {message} (errno {errno})")]
    #[diagnostic(code(wait::os_error))]
    Os { errno: i32, message: String },

    #[error("Observer failed: {0}")]
    #[diagnostic(code(wait::observer_failed))]
    Observer(String),

    #[error("Wait task failed: {0}")]
    #[diagnostic(code(wait::task_failed))]
    TaskFailed(String),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Process(#[from] ProcessError),
}

impl From<Errno> for WaitError {
    fn from(errno: Errno) -> Self {
        match errno {
            Errno::ECHILD => WaitError::NoChildren,
            Errno::EINTR => WaitError::Interrupted,
            other => WaitError::Os {
                errno: other as i32,
                message: other.desc().to_string(),
            },
        }
    }
}

/// Errors raised while spawning child processes
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ProcessError {
    #[error("Invalid command: {0}")]
    #[diagnostic(
        code(process::invalid_command),
        help("Pass the program and its arguments after '--'.")
    )]
    InvalidCommand(String),

    #[error("Permission denied: {0}")]
    #[diagnostic(
        code(process::permission_denied),
        help("Commands are executed directly, never through a shell.")
    )]
    PermissionDenied(String),

    #[error("Spawn failed: {0}")]
    #[diagnostic(
        code(process::spawn_failed),
        help("Check that the program exists and is executable.")
    )]
    SpawnFailed(String),
}

/// Errors raised while naming or delivering signals
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum SignalError {
    #[error("Invalid signal: {0}")]
    #[diagnostic(code(signal::invalid), help("Use a name like TERM or a number 1-31."))]
    InvalidSignal(String),

    #[error("Failed to deliver signal {signal} to pid {pid}: {message}")]
    #[diagnostic(code(signal::delivery_failed))]
    DeliveryFailed {
        pid: Pid,
        signal: SignalNumber,
        message: String,
    },
}
