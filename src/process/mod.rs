/*!
 * Process Module
 * Child process spawning and supervision
 */

pub mod executor;
pub mod supervisor;
pub mod types;

// Re-export for convenience
pub use executor::ProcessExecutor;
pub use supervisor::{Supervisor, FORWARDED_SIGNALS};
pub use types::ExecutionConfig;
