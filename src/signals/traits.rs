/*!
 * Signal Traits
 * Signal delivery abstraction
 */

use super::types::Signal;
use crate::core::errors::SignalResult;
use crate::core::types::Pid;

/// Signal delivery interface
pub trait SignalDelivery: Send + Sync {
    /// Send a signal to a process (or a process group when `pid` is negative)
    fn send(&self, pid: Pid, signal: Signal) -> SignalResult<()>;
}
