/*!
 * Signal Types
 * UNIX signal definitions backed by the platform's signal numbers
 */

use crate::core::errors::{SignalError, SignalResult};
use crate::core::types::SignalNumber;
use nix::libc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// UNIX signals that can end, stop, or continue a child
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum Signal {
    /// Hangup detected on controlling terminal or death of controlling process
    SIGHUP = libc::SIGHUP,
    /// Interrupt from keyboard (Ctrl+C)
    SIGINT = libc::SIGINT,
    /// Quit from keyboard (Ctrl+\)
    SIGQUIT = libc::SIGQUIT,
    /// Illegal instruction
    SIGILL = libc::SIGILL,
    /// Trace/breakpoint trap
    SIGTRAP = libc::SIGTRAP,
    /// Abort signal
    SIGABRT = libc::SIGABRT,
    /// Bus error (bad memory access)
    SIGBUS = libc::SIGBUS,
    /// Floating-point exception
    SIGFPE = libc::SIGFPE,
    /// Kill signal (cannot be caught or ignored)
    SIGKILL = libc::SIGKILL,
    /// User-defined signal 1
    SIGUSR1 = libc::SIGUSR1,
    /// Invalid memory reference
    SIGSEGV = libc::SIGSEGV,
    /// User-defined signal 2
    SIGUSR2 = libc::SIGUSR2,
    /// Broken pipe
    SIGPIPE = libc::SIGPIPE,
    /// Timer signal
    SIGALRM = libc::SIGALRM,
    /// Termination signal
    SIGTERM = libc::SIGTERM,
    /// Child process stopped or terminated
    SIGCHLD = libc::SIGCHLD,
    /// Continue if stopped
    SIGCONT = libc::SIGCONT,
    /// Stop process (cannot be caught or ignored)
    SIGSTOP = libc::SIGSTOP,
    /// Stop typed at terminal (Ctrl+Z)
    SIGTSTP = libc::SIGTSTP,
    /// Terminal input for background process
    SIGTTIN = libc::SIGTTIN,
    /// Terminal output for background process
    SIGTTOU = libc::SIGTTOU,
    /// Urgent condition on socket
    SIGURG = libc::SIGURG,
    /// CPU time limit exceeded
    SIGXCPU = libc::SIGXCPU,
    /// File size limit exceeded
    SIGXFSZ = libc::SIGXFSZ,
    /// Virtual alarm clock
    SIGVTALRM = libc::SIGVTALRM,
    /// Profiling timer expired
    SIGPROF = libc::SIGPROF,
    /// Window resize signal
    SIGWINCH = libc::SIGWINCH,
    /// I/O now possible
    SIGIO = libc::SIGIO,
    /// Bad system call
    SIGSYS = libc::SIGSYS,
}

impl Signal {
    /// Every named signal
    pub const ALL: [Signal; 29] = [
        Signal::SIGHUP,
        Signal::SIGINT,
        Signal::SIGQUIT,
        Signal::SIGILL,
        Signal::SIGTRAP,
        Signal::SIGABRT,
        Signal::SIGBUS,
        Signal::SIGFPE,
        Signal::SIGKILL,
        Signal::SIGUSR1,
        Signal::SIGSEGV,
        Signal::SIGUSR2,
        Signal::SIGPIPE,
        Signal::SIGALRM,
        Signal::SIGTERM,
        Signal::SIGCHLD,
        Signal::SIGCONT,
        Signal::SIGSTOP,
        Signal::SIGTSTP,
        Signal::SIGTTIN,
        Signal::SIGTTOU,
        Signal::SIGURG,
        Signal::SIGXCPU,
        Signal::SIGXFSZ,
        Signal::SIGVTALRM,
        Signal::SIGPROF,
        Signal::SIGWINCH,
        Signal::SIGIO,
        Signal::SIGSYS,
    ];

    /// Convert from signal number
    pub fn from_number(n: SignalNumber) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.number() == n)
    }

    /// Get signal number
    pub fn number(&self) -> SignalNumber {
        *self as SignalNumber
    }

    /// Name without the SIG prefix
    pub fn short_name(&self) -> &'static str {
        let name = self.name();
        &name[3..]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Signal::SIGHUP => "SIGHUP",
            Signal::SIGINT => "SIGINT",
            Signal::SIGQUIT => "SIGQUIT",
            Signal::SIGILL => "SIGILL",
            Signal::SIGTRAP => "SIGTRAP",
            Signal::SIGABRT => "SIGABRT",
            Signal::SIGBUS => "SIGBUS",
            Signal::SIGFPE => "SIGFPE",
            Signal::SIGKILL => "SIGKILL",
            Signal::SIGUSR1 => "SIGUSR1",
            Signal::SIGSEGV => "SIGSEGV",
            Signal::SIGUSR2 => "SIGUSR2",
            Signal::SIGPIPE => "SIGPIPE",
            Signal::SIGALRM => "SIGALRM",
            Signal::SIGTERM => "SIGTERM",
            Signal::SIGCHLD => "SIGCHLD",
            Signal::SIGCONT => "SIGCONT",
            Signal::SIGSTOP => "SIGSTOP",
            Signal::SIGTSTP => "SIGTSTP",
            Signal::SIGTTIN => "SIGTTIN",
            Signal::SIGTTOU => "SIGTTOU",
            Signal::SIGURG => "SIGURG",
            Signal::SIGXCPU => "SIGXCPU",
            Signal::SIGXFSZ => "SIGXFSZ",
            Signal::SIGVTALRM => "SIGVTALRM",
            Signal::SIGPROF => "SIGPROF",
            Signal::SIGWINCH => "SIGWINCH",
            Signal::SIGIO => "SIGIO",
            Signal::SIGSYS => "SIGSYS",
        }
    }

    /// Check if signal can be caught/blocked
    pub fn can_catch(&self) -> bool {
        !matches!(self, Signal::SIGKILL | Signal::SIGSTOP)
    }

    /// Check if signal is fatal by default
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Signal::SIGKILL
                | Signal::SIGTERM
                | Signal::SIGQUIT
                | Signal::SIGABRT
                | Signal::SIGSEGV
                | Signal::SIGILL
                | Signal::SIGBUS
                | Signal::SIGFPE
                | Signal::SIGSYS
        )
    }

    /// Check if signal stops the process by default
    pub fn is_stop(&self) -> bool {
        matches!(
            self,
            Signal::SIGSTOP | Signal::SIGTSTP | Signal::SIGTTIN | Signal::SIGTTOU
        )
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Signal::SIGHUP => "Hangup",
            Signal::SIGINT => "Interrupt",
            Signal::SIGQUIT => "Quit",
            Signal::SIGILL => "Illegal instruction",
            Signal::SIGTRAP => "Trace/breakpoint trap",
            Signal::SIGABRT => "Aborted",
            Signal::SIGBUS => "Bus error",
            Signal::SIGFPE => "Floating point exception",
            Signal::SIGKILL => "Killed",
            Signal::SIGUSR1 => "User defined signal 1",
            Signal::SIGSEGV => "Segmentation fault",
            Signal::SIGUSR2 => "User defined signal 2",
            Signal::SIGPIPE => "Broken pipe",
            Signal::SIGALRM => "Alarm clock",
            Signal::SIGTERM => "Terminated",
            Signal::SIGCHLD => "Child status changed",
            Signal::SIGCONT => "Continued",
            Signal::SIGSTOP => "Stopped (signal)",
            Signal::SIGTSTP => "Stopped",
            Signal::SIGTTIN => "Stopped (tty input)",
            Signal::SIGTTOU => "Stopped (tty output)",
            Signal::SIGURG => "Urgent I/O condition",
            Signal::SIGXCPU => "CPU time limit exceeded",
            Signal::SIGXFSZ => "File size limit exceeded",
            Signal::SIGVTALRM => "Virtual timer expired",
            Signal::SIGPROF => "Profiling timer expired",
            Signal::SIGWINCH => "Window size changed",
            Signal::SIGIO => "I/O possible",
            Signal::SIGSYS => "Bad system call",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name(), self.number())
    }
}

impl FromStr for Signal {
    type Err = SignalError;

    /// Accepts `TERM`, `SIGTERM`, `sigterm` or `15`
    fn from_str(s: &str) -> SignalResult<Self> {
        let trimmed = s.trim();
        if let Ok(n) = trimmed.parse::<SignalNumber>() {
            return Signal::from_number(n).ok_or_else(|| SignalError::InvalidSignal(s.to_string()));
        }

        let upper = trimmed.to_ascii_uppercase();
        let short = upper.strip_prefix("SIG").unwrap_or(&upper);
        Signal::ALL
            .iter()
            .copied()
            .find(|sig| sig.short_name() == short)
            .ok_or_else(|| SignalError::InvalidSignal(s.to_string()))
    }
}

impl TryFrom<Signal> for nix::sys::signal::Signal {
    type Error = SignalError;

    fn try_from(signal: Signal) -> SignalResult<Self> {
        nix::sys::signal::Signal::try_from(signal.number())
            .map_err(|e| SignalError::InvalidSignal(format!("{}: {}", signal.name(), e)))
    }
}
