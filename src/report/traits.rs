/*!
 * Observer Traits
 * Receivers of wait-loop events
 */

use crate::core::errors::WaitResult;
use crate::wait::{WaitEvent, WaitOutcome};

/// Receives every state change seen by the wait loop
pub trait StatusObserver {
    /// Called once per observed state change, in order
    fn on_event(&mut self, event: &WaitEvent) -> WaitResult<()>;

    /// Called once when the loop completes successfully
    fn on_outcome(&mut self, _outcome: &WaitOutcome) -> WaitResult<()> {
        Ok(())
    }
}

impl<T: StatusObserver + ?Sized> StatusObserver for &mut T {
    fn on_event(&mut self, event: &WaitEvent) -> WaitResult<()> {
        (**self).on_event(event)
    }

    fn on_outcome(&mut self, outcome: &WaitOutcome) -> WaitResult<()> {
        (**self).on_outcome(outcome)
    }
}

impl<T: StatusObserver + ?Sized> StatusObserver for Box<T> {
    fn on_event(&mut self, event: &WaitEvent) -> WaitResult<()> {
        (**self).on_event(event)
    }

    fn on_outcome(&mut self, outcome: &WaitOutcome) -> WaitResult<()> {
        (**self).on_outcome(outcome)
    }
}
