/*!
 * Core Types
 * Common types used across the crate
 */

/// OS process ID, as the wait primitive sees it (negative values select groups)
pub type Pid = i32;

/// Status word written by the wait primitive
pub type RawStatus = i32;

/// Signal number
pub type SignalNumber = i32;

/// Shell exit code offset for signal-terminated children
pub const SIGNAL_EXIT_BASE: i32 = 128;
