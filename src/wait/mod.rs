/*!
 * Wait Module
 * Waiting on child processes and decoding their status words
 */

pub mod flags;
pub mod status;
pub mod target;
pub mod types;
pub mod waiter;

// Re-export for convenience
pub use flags::{flag_constants, render_flag_constants, FlagConstant, WaitOptions};
pub use status::ChildStatus;
pub use target::WaitTarget;
pub use types::{UntilPolicy, WaitEvent, WaitOutcome};
pub use waiter::{Waiter, DEFAULT_POLL_INTERVAL};
