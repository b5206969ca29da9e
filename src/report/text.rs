/*!
 * Text Reporter
 * Human-readable status lines
 */

use super::traits::StatusObserver;
use crate::core::errors::{WaitError, WaitResult};
use crate::wait::{WaitEvent, WaitOutcome};
use std::io::Write;

/// Writes one line per event, then a summary line
pub struct TextReporter<W: Write> {
    out: W,
}

impl<W: Write> TextReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl TextReporter<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

fn io_error(e: std::io::Error) -> WaitError {
    WaitError::Observer(e.to_string())
}

impl<W: Write> StatusObserver for TextReporter<W> {
    fn on_event(&mut self, event: &WaitEvent) -> WaitResult<()> {
        writeln!(self.out, "[{}] {}", event.seq, event.status).map_err(io_error)?;
        self.out.flush().map_err(io_error)
    }

    fn on_outcome(&mut self, outcome: &WaitOutcome) -> WaitResult<()> {
        writeln!(
            self.out,
            "done: {} after {}ms (exit code {})",
            outcome.status.label(),
            outcome.elapsed.as_millis(),
            outcome.exit_code()
        )
        .map_err(io_error)?;
        self.out.flush().map_err(io_error)
    }
}
