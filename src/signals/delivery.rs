/*!
 * Signal Delivery
 * Sends signals to OS processes with kill(2)
 */

use super::traits::SignalDelivery;
use super::types::Signal;
use crate::core::errors::{SignalError, SignalResult};
use crate::core::types::Pid;
use nix::sys::signal::kill;
use nix::unistd::Pid as NixPid;
use tracing::{debug, warn};

/// Deliver `signal` to `pid`
pub fn send_signal(pid: Pid, signal: Signal) -> SignalResult<()> {
    let nix_signal: nix::sys::signal::Signal = signal.try_into()?;

    match kill(NixPid::from_raw(pid), nix_signal) {
        Ok(()) => {
            debug!(pid, signal = %signal, "Signal delivered");
            Ok(())
        }
        Err(e) => {
            warn!(pid, signal = %signal, error = %e, "Failed to deliver signal");
            Err(SignalError::DeliveryFailed {
                pid,
                signal: signal.number(),
                message: e.desc().to_string(),
            })
        }
    }
}

/// Delivery through the kernel's kill(2)
#[derive(Debug, Clone, Copy, Default)]
pub struct KillDelivery;

impl SignalDelivery for KillDelivery {
    fn send(&self, pid: Pid, signal: Signal) -> SignalResult<()> {
        send_signal(pid, signal)
    }
}
