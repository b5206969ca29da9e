/*!
 * Recording Observer
 * Keeps events in memory for library callers and tests
 */

use super::traits::StatusObserver;
use crate::core::errors::WaitResult;
use crate::wait::{WaitEvent, WaitOutcome};
use parking_lot::Mutex;
use std::sync::Arc;

/// Clones share the same event log
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    events: Arc<Mutex<Vec<WaitEvent>>>,
    outcome: Arc<Mutex<Option<WaitOutcome>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<WaitEvent> {
        self.events.lock().clone()
    }

    pub fn outcome(&self) -> Option<WaitOutcome> {
        self.outcome.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl StatusObserver for RecordingObserver {
    fn on_event(&mut self, event: &WaitEvent) -> WaitResult<()> {
        self.events.lock().push(*event);
        Ok(())
    }

    fn on_outcome(&mut self, outcome: &WaitOutcome) -> WaitResult<()> {
        *self.outcome.lock() = Some(outcome.clone());
        Ok(())
    }
}
