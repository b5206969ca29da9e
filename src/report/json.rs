/*!
 * JSON Reporter
 * One JSON object per line
 */

use super::traits::StatusObserver;
use crate::core::errors::{WaitError, WaitResult};
use crate::wait::{WaitEvent, WaitOutcome};
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum Record<'a> {
    Event(&'a WaitEvent),
    Outcome(&'a WaitOutcome),
}

/// Writes `{"event": ...}` lines and a final `{"outcome": ...}` line
pub struct JsonReporter<W: Write> {
    out: W,
}

impl<W: Write> JsonReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_record(&mut self, record: &Record<'_>) -> WaitResult<()> {
        serde_json::to_writer(&mut self.out, record)
            .map_err(|e| WaitError::Observer(e.to_string()))?;
        writeln!(self.out).map_err(|e| WaitError::Observer(e.to_string()))?;
        self.out
            .flush()
            .map_err(|e| WaitError::Observer(e.to_string()))
    }
}

impl JsonReporter<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> StatusObserver for JsonReporter<W> {
    fn on_event(&mut self, event: &WaitEvent) -> WaitResult<()> {
        self.write_record(&Record::Event(event))
    }

    fn on_outcome(&mut self, outcome: &WaitOutcome) -> WaitResult<()> {
        self.write_record(&Record::Outcome(outcome))
    }
}
