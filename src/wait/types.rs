/*!
 * Wait Types
 * Events and outcomes produced by the wait loop
 */

use super::status::ChildStatus;
use crate::core::serde::duration_micros;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// When the wait loop stops
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UntilPolicy {
    /// Stop at the first child that exits or is killed
    #[default]
    FirstTerminal,
    /// Keep reaping until no selected children remain
    AllChildren,
}

/// One observed state change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitEvent {
    /// 1-based position in the run
    pub seq: u64,
    pub status: ChildStatus,
    /// Time since the wait loop started
    #[serde(rename = "elapsed_us", with = "duration_micros")]
    pub elapsed: Duration,
}

/// Result of a completed wait loop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitOutcome {
    /// Last terminal status seen
    pub status: ChildStatus,
    pub events: Vec<WaitEvent>,
    #[serde(rename = "elapsed_us", with = "duration_micros")]
    pub elapsed: Duration,
}

impl WaitOutcome {
    /// Shell-style exit code of the terminal status
    pub fn exit_code(&self) -> i32 {
        self.status.exit_code().unwrap_or(1)
    }

    /// Number of children that exited or were killed
    pub fn terminal_count(&self) -> usize {
        self.events.iter().filter(|e| e.status.is_terminal()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(seq: u64, status: ChildStatus) -> WaitEvent {
        WaitEvent {
            seq,
            status,
            elapsed: Duration::from_millis(seq),
        }
    }

    #[test]
    fn test_outcome_counts() {
        let outcome = WaitOutcome {
            status: ChildStatus::Exited { pid: 2, code: 5 },
            events: vec![
                event(1, ChildStatus::Stopped { pid: 2, signal: 19 }),
                event(2, ChildStatus::Exited { pid: 3, code: 0 }),
                event(3, ChildStatus::Exited { pid: 2, code: 5 }),
            ],
            elapsed: Duration::from_millis(3),
        };
        assert_eq!(outcome.terminal_count(), 2);
        assert_eq!(outcome.exit_code(), 5);
    }

    #[test]
    fn test_event_json_shape() {
        let json = serde_json::to_value(event(1, ChildStatus::Continued { pid: 4 })).unwrap();
        assert_eq!(json["seq"], 1);
        assert_eq!(json["status"]["state"], "continued");
        assert_eq!(json["elapsed_us"], 1000);
    }
}
