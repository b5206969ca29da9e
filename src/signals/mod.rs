/*!
 * Signals Module
 * UNIX signal naming and delivery to child processes
 */

mod delivery;
pub mod traits;
pub mod types;

// Re-export public API
pub use delivery::{send_signal, KillDelivery};
pub use traits::SignalDelivery;
pub use types::Signal;
