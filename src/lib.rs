/*!
 * procwait Library
 * Wait on child processes, decode their status words, and report state changes
 */

#[cfg(not(unix))]
compile_error!("procwait requires a Unix wait primitive");

pub mod cli;
pub mod config;
pub mod core;
pub mod monitoring;
pub mod process;
pub mod report;
pub mod signals;
pub mod wait;

// Re-exports
pub use crate::core::errors::*;
pub use config::WaitConfig;
pub use monitoring::init_tracing;
pub use process::{ExecutionConfig, ProcessExecutor, Supervisor};
pub use report::{JsonReporter, RecordingObserver, StatusObserver, TextReporter};
pub use signals::Signal;
pub use wait::{ChildStatus, UntilPolicy, WaitEvent, WaitOptions, WaitOutcome, WaitTarget, Waiter};
