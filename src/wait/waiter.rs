/*!
 * Waiter
 * The wait loop: call the wait primitive until a child exits or is killed
 */

use super::flags::WaitOptions;
use super::status::ChildStatus;
use super::target::WaitTarget;
use super::types::{UntilPolicy, WaitEvent, WaitOutcome};
use crate::config::WaitConfig;
use crate::core::errors::{WaitError, WaitResult};
use crate::core::types::{Pid, RawStatus};
use crate::monitoring::span_wait;
use crate::report::StatusObserver;
use nix::errno::Errno;
use nix::libc;
use std::time::{Duration, Instant};
use tracing::{debug, info, trace};

/// Default sleep between polls in non-blocking mode
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Single raw call of waitpid(2)
fn raw_waitpid(pid: Pid, options: i32) -> nix::Result<(Pid, RawStatus)> {
    let mut status: libc::c_int = 0;
    // SAFETY: `status` is a live, writable c_int for the whole call
    let res = unsafe { libc::waitpid(pid, &mut status, options) };
    Errno::result(res).map(|pid| (pid, status))
}

/// Waits on child processes and reports their state changes
#[derive(Debug, Clone)]
pub struct Waiter {
    target: WaitTarget,
    options: WaitOptions,
    poll_interval: Duration,
    timeout: Option<Duration>,
    until: UntilPolicy,
}

impl Waiter {
    pub fn new(target: WaitTarget, options: WaitOptions) -> Self {
        Self {
            target,
            options,
            poll_interval: DEFAULT_POLL_INTERVAL,
            timeout: None,
            until: UntilPolicy::default(),
        }
    }

    pub fn from_config(config: &WaitConfig) -> Self {
        Self {
            target: config.target,
            options: config.options,
            poll_interval: config.poll_interval,
            timeout: config.timeout,
            until: config.until,
        }
    }

    pub fn with_target(mut self, target: WaitTarget) -> Self {
        self.target = target;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Setting a timeout switches the loop to polling
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_until(mut self, until: UntilPolicy) -> Self {
        self.until = until;
        self
    }

    pub fn target(&self) -> WaitTarget {
        self.target
    }

    pub fn options(&self) -> WaitOptions {
        self.options
    }

    /// Blocking waits cannot honor a deadline, so a timeout implies polling
    pub fn is_polling(&self) -> bool {
        self.options.nohang || self.timeout.is_some()
    }

    /// One call of the wait primitive with the configured options
    ///
    /// EINTR is retried. Under WNOHANG, `StillAlive` means nothing changed.
    pub fn wait_once(&self) -> WaitResult<ChildStatus> {
        self.wait_with(self.options)
    }

    fn wait_with(&self, options: WaitOptions) -> WaitResult<ChildStatus> {
        let span = span_wait(self.target, options);
        let _entered = span.enter();

        loop {
            match raw_waitpid(self.target.as_raw(), options.bits()) {
                Ok((0, _)) => {
                    span.record_status(&ChildStatus::StillAlive);
                    return Ok(ChildStatus::StillAlive);
                }
                Ok((pid, raw)) => {
                    let status = ChildStatus::from_raw(pid, raw);
                    span.record_status(&status);
                    return Ok(status);
                }
                Err(Errno::EINTR) => {
                    trace!(wait_target = %self.target, "wait interrupted, retrying");
                }
                Err(errno) => {
                    let err = WaitError::from(errno);
                    span.record_error(&err);
                    return Err(err);
                }
            }
        }
    }

    /// Loop until the configured stop condition
    ///
    /// Stop and continue events are reported and the loop keeps going.
    pub fn wait_until_terminal<O>(&self, observer: &mut O) -> WaitResult<WaitOutcome>
    where
        O: StatusObserver + ?Sized,
    {
        let started = Instant::now();
        let deadline = self.timeout.map(|timeout| started + timeout);
        let polling = self.is_polling();
        let options = self.options.with_nohang(polling);

        info!(
            wait_target = %self.target,
            options = options.bits(),
            polling,
            until = ?self.until,
            "Waiting for child state changes"
        );

        let mut events: Vec<WaitEvent> = Vec::new();
        let mut last_terminal: Option<ChildStatus> = None;

        loop {
            let status = match self.wait_with(options) {
                Ok(status) => status,
                Err(WaitError::NoChildren) => match last_terminal {
                    Some(status) if self.until == UntilPolicy::AllChildren => {
                        debug!("No children left");
                        return self.finish(observer, status, events, started);
                    }
                    _ => return Err(WaitError::NoChildren),
                },
                Err(e) => return Err(e),
            };

            if status == ChildStatus::StillAlive {
                let pause = match deadline {
                    Some(deadline) => {
                        let now = Instant::now();
                        if now >= deadline {
                            return Err(WaitError::Timeout {
                                waited_ms: started.elapsed().as_millis() as u64,
                            });
                        }
                        self.poll_interval.min(deadline - now)
                    }
                    None => self.poll_interval,
                };
                std::thread::sleep(pause);
                continue;
            }

            let event = WaitEvent {
                seq: events.len() as u64 + 1,
                status,
                elapsed: started.elapsed(),
            };
            debug!(seq = event.seq, status = %status, "Child state changed");
            observer.on_event(&event)?;
            events.push(event);

            if status.is_terminal() {
                match self.until {
                    UntilPolicy::FirstTerminal => {
                        return self.finish(observer, status, events, started);
                    }
                    UntilPolicy::AllChildren => last_terminal = Some(status),
                }
            }
        }
    }

    fn finish<O>(
        &self,
        observer: &mut O,
        status: ChildStatus,
        events: Vec<WaitEvent>,
        started: Instant,
    ) -> WaitResult<WaitOutcome>
    where
        O: StatusObserver + ?Sized,
    {
        let outcome = WaitOutcome {
            status,
            events,
            elapsed: started.elapsed(),
        };
        info!(
            status = %outcome.status,
            events = outcome.events.len(),
            elapsed_ms = outcome.elapsed.as_millis() as u64,
            "Wait complete"
        );
        observer.on_outcome(&outcome)?;
        Ok(outcome)
    }
}
