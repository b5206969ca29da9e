/*!
 * Waiter Tests
 * The wait loop against real child processes
 */

use pretty_assertions::assert_eq;
use procwait::core::types::Pid;
use procwait::report::{RecordingObserver, StatusObserver};
use procwait::signals::{send_signal, Signal};
use procwait::wait::{ChildStatus, WaitEvent, WaitOptions, WaitTarget, Waiter};
use procwait::{WaitError, WaitResult};
use std::process::{Command, Stdio};
use std::time::Duration;

fn spawn(program: &str, args: &[&str]) -> Pid {
    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();
    child.id() as Pid
}

/// Drives the child through stop -> continue -> kill, one step per observed event
struct JobControl {
    pid: Pid,
    seen: Vec<ChildStatus>,
}

impl StatusObserver for JobControl {
    fn on_event(&mut self, event: &WaitEvent) -> WaitResult<()> {
        self.seen.push(event.status);
        let next = match event.status {
            ChildStatus::Stopped { .. } => Some(Signal::SIGCONT),
            ChildStatus::Continued { .. } => Some(Signal::SIGKILL),
            _ => None,
        };
        if let Some(signal) = next {
            send_signal(self.pid, signal).map_err(|e| WaitError::Observer(e.to_string()))?;
        }
        Ok(())
    }
}

#[test]
fn test_stop_continue_kill_sequence() {
    let pid = spawn("sleep", &["5"]);
    send_signal(pid, Signal::SIGSTOP).unwrap();

    let waiter = Waiter::new(
        WaitTarget::Child(pid),
        WaitOptions::new().with_continued(true),
    );
    let mut control = JobControl { pid, seen: vec![] };

    let outcome = waiter.wait_until_terminal(&mut control).unwrap();

    assert_eq!(
        control.seen,
        vec![
            ChildStatus::Stopped {
                pid,
                signal: Signal::SIGSTOP.number()
            },
            ChildStatus::Continued { pid },
            ChildStatus::Signaled {
                pid,
                signal: Signal::SIGKILL.number(),
                core_dumped: false
            },
        ]
    );
    assert_eq!(outcome.events.len(), 3);
    assert_eq!(
        outcome.events.iter().map(|e| e.seq).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    assert_eq!(outcome.exit_code(), 128 + Signal::SIGKILL.number());
}

#[test]
fn test_stops_not_reported_without_wuntraced() {
    let pid = spawn("sleep", &["5"]);
    send_signal(pid, Signal::SIGSTOP).unwrap();

    let waiter = Waiter::new(WaitTarget::Child(pid), WaitOptions::terminal_only())
        .with_poll_interval(Duration::from_millis(10))
        .with_timeout(Duration::from_millis(100));

    // The stop is invisible, so the loop only sees a live child
    let result = waiter.wait_until_terminal(&mut RecordingObserver::new());
    assert!(matches!(result, Err(WaitError::Timeout { .. })));

    send_signal(pid, Signal::SIGKILL).unwrap();
    let status = Waiter::new(WaitTarget::Child(pid), WaitOptions::terminal_only())
        .wait_once()
        .unwrap();
    assert!(matches!(status, ChildStatus::Signaled { .. }));
}

#[test]
fn test_polling_mode_collects_exit() {
    let pid = spawn("sh", &["-c", "sleep 0.1; exit 9"]);
    let recorder = RecordingObserver::new();

    let outcome = Waiter::new(
        WaitTarget::Child(pid),
        WaitOptions::default().with_nohang(true),
    )
    .with_poll_interval(Duration::from_millis(5))
    .wait_until_terminal(&mut recorder.clone())
    .unwrap();

    assert_eq!(outcome.status, ChildStatus::Exited { pid, code: 9 });
    assert_eq!(recorder.len(), 1);
    assert_eq!(recorder.outcome(), Some(outcome));
}

#[test]
fn test_terminating_signal_ends_loop() {
    let pid = spawn("sleep", &["5"]);
    send_signal(pid, Signal::SIGTERM).unwrap();

    let outcome = Waiter::new(WaitTarget::Child(pid), WaitOptions::default())
        .wait_until_terminal(&mut RecordingObserver::new())
        .unwrap();

    assert_eq!(outcome.status.signal(), Some(Signal::SIGTERM));
    assert!(outcome.status.is_terminal());
}
