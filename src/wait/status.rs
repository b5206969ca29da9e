/*!
 * Child Status
 * Decoding of the status word reported by the wait primitive
 */

use crate::core::types::{Pid, RawStatus, SignalNumber, SIGNAL_EXIT_BASE};
use crate::signals::Signal;
use nix::libc;
use nix::sys::wait::WaitStatus;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A child's state change, decoded from a status word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ChildStatus {
    /// Child called exit() or returned from main
    Exited { pid: Pid, code: i32 },
    /// Child was terminated by a signal
    Signaled {
        pid: Pid,
        signal: SignalNumber,
        core_dumped: bool,
    },
    /// Child was stopped by a signal (needs WUNTRACED)
    Stopped { pid: Pid, signal: SignalNumber },
    /// Stopped child resumed by SIGCONT (needs WCONTINUED)
    Continued { pid: Pid },
    /// No child changed state (WNOHANG only)
    StillAlive,
}

impl ChildStatus {
    /// Decode a raw status word for `pid`
    pub fn from_raw(pid: Pid, raw: RawStatus) -> Self {
        if libc::WIFEXITED(raw) {
            ChildStatus::Exited {
                pid,
                code: libc::WEXITSTATUS(raw),
            }
        } else if libc::WIFSIGNALED(raw) {
            ChildStatus::Signaled {
                pid,
                signal: libc::WTERMSIG(raw),
                core_dumped: libc::WCOREDUMP(raw),
            }
        } else if libc::WIFSTOPPED(raw) {
            ChildStatus::Stopped {
                pid,
                signal: libc::WSTOPSIG(raw),
            }
        } else if libc::WIFCONTINUED(raw) {
            ChildStatus::Continued { pid }
        } else {
            ChildStatus::StillAlive
        }
    }

    /// Exited or killed; the child is gone and has been reaped
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ChildStatus::Exited { .. } | ChildStatus::Signaled { .. }
        )
    }

    pub fn pid(&self) -> Option<Pid> {
        match *self {
            ChildStatus::Exited { pid, .. }
            | ChildStatus::Signaled { pid, .. }
            | ChildStatus::Stopped { pid, .. }
            | ChildStatus::Continued { pid } => Some(pid),
            ChildStatus::StillAlive => None,
        }
    }

    /// Signal that killed or stopped the child, if it has a name
    pub fn signal(&self) -> Option<Signal> {
        match *self {
            ChildStatus::Signaled { signal, .. } | ChildStatus::Stopped { signal, .. } => {
                Signal::from_number(signal)
            }
            _ => None,
        }
    }

    /// Shell-style exit code: the exit code, or 128 + signal number
    pub fn exit_code(&self) -> Option<i32> {
        match *self {
            ChildStatus::Exited { code, .. } => Some(code),
            ChildStatus::Signaled { signal, .. } => Some(SIGNAL_EXIT_BASE + signal),
            _ => None,
        }
    }

    /// Short state label used in logs and reports
    pub fn label(&self) -> &'static str {
        match self {
            ChildStatus::Exited { .. } => "exited",
            ChildStatus::Signaled { .. } => "signaled",
            ChildStatus::Stopped { .. } => "stopped",
            ChildStatus::Continued { .. } => "continued",
            ChildStatus::StillAlive => "still_alive",
        }
    }
}

fn fmt_signal(f: &mut fmt::Formatter<'_>, signal: SignalNumber) -> fmt::Result {
    match Signal::from_number(signal) {
        Some(sig) => write!(f, "{} ({})", sig.name(), sig.description()),
        None => write!(f, "signal {}", signal),
    }
}

impl fmt::Display for ChildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ChildStatus::Exited { pid, code } => write!(f, "pid {} exited with code {}", pid, code),
            ChildStatus::Signaled {
                pid,
                signal,
                core_dumped,
            } => {
                write!(f, "pid {} killed by ", pid)?;
                fmt_signal(f, signal)?;
                if core_dumped {
                    write!(f, ", core dumped")?;
                }
                Ok(())
            }
            ChildStatus::Stopped { pid, signal } => {
                write!(f, "pid {} stopped by ", pid)?;
                fmt_signal(f, signal)
            }
            ChildStatus::Continued { pid } => write!(f, "pid {} continued", pid),
            ChildStatus::StillAlive => write!(f, "no state change"),
        }
    }
}

impl From<WaitStatus> for ChildStatus {
    fn from(status: WaitStatus) -> Self {
        match status {
            WaitStatus::Exited(pid, code) => ChildStatus::Exited {
                pid: pid.as_raw(),
                code,
            },
            WaitStatus::Signaled(pid, signal, core_dumped) => ChildStatus::Signaled {
                pid: pid.as_raw(),
                signal: signal as SignalNumber,
                core_dumped,
            },
            WaitStatus::Stopped(pid, signal) => ChildStatus::Stopped {
                pid: pid.as_raw(),
                signal: signal as SignalNumber,
            },
            WaitStatus::Continued(pid) => ChildStatus::Continued { pid: pid.as_raw() },
            #[cfg(any(target_os = "linux", target_os = "android"))]
            WaitStatus::PtraceEvent(pid, signal, _) => ChildStatus::Stopped {
                pid: pid.as_raw(),
                signal: signal as SignalNumber,
            },
            #[cfg(any(target_os = "linux", target_os = "android"))]
            WaitStatus::PtraceSyscall(pid) => ChildStatus::Stopped {
                pid: pid.as_raw(),
                signal: libc::SIGTRAP,
            },
            WaitStatus::StillAlive => ChildStatus::StillAlive,
        }
    }
}
