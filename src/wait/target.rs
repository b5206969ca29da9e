/*!
 * Wait Target
 * Selects which children the wait primitive reports on
 */

use crate::core::errors::{WaitError, WaitResult};
use crate::core::types::Pid;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum WaitTarget {
    /// Any child process (-1)
    AnyChild,
    /// Any child in the caller's process group (0)
    #[default]
    SameGroup,
    /// The child whose process ID is equal to the value
    Child(Pid),
    /// Any child whose process group ID is equal to the value
    Group(Pid),
}

impl WaitTarget {
    /// The pid argument for the wait primitive
    pub fn as_raw(&self) -> Pid {
        match *self {
            WaitTarget::AnyChild => -1,
            WaitTarget::SameGroup => 0,
            WaitTarget::Child(pid) => pid,
            WaitTarget::Group(pgid) => pgid.saturating_neg(),
        }
    }

    pub fn from_raw(raw: Pid) -> Self {
        match raw {
            -1 => WaitTarget::AnyChild,
            0 => WaitTarget::SameGroup,
            pid if pid > 0 => WaitTarget::Child(pid),
            pgid => WaitTarget::Group(pgid.saturating_neg()),
        }
    }

    /// A single child target, validated to be a real pid
    pub fn child(pid: Pid) -> WaitResult<Self> {
        if pid <= 0 {
            return Err(WaitError::InvalidTarget(format!(
                "child pid must be positive, got {}",
                pid
            )));
        }
        Ok(WaitTarget::Child(pid))
    }

    /// A process-group target; group 1 would read back as AnyChild and is refused
    pub fn group(pgid: Pid) -> WaitResult<Self> {
        if pgid <= 1 {
            return Err(WaitError::InvalidTarget(format!(
                "process group must be greater than 1, got {}",
                pgid
            )));
        }
        Ok(WaitTarget::Group(pgid))
    }

    /// Check a target built directly or deserialized
    ///
    /// `Child` and `Group` carry unchecked ids; values that would alias
    /// another target at the wait primitive are refused.
    pub fn validate(&self) -> WaitResult<()> {
        match *self {
            WaitTarget::AnyChild | WaitTarget::SameGroup => Ok(()),
            WaitTarget::Child(pid) => WaitTarget::child(pid).map(|_| ()),
            WaitTarget::Group(pgid) => WaitTarget::group(pgid).map(|_| ()),
        }
    }
}

impl fmt::Display for WaitTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaitTarget::AnyChild => write!(f, "any"),
            WaitTarget::SameGroup => write!(f, "group"),
            WaitTarget::Child(pid) => write!(f, "{}", pid),
            WaitTarget::Group(pgid) => write!(f, "pgid:{}", pgid),
        }
    }
}

impl FromStr for WaitTarget {
    type Err = WaitError;

    fn from_str(s: &str) -> WaitResult<Self> {
        let s = s.trim();
        match s {
            "any" | "-1" => return Ok(WaitTarget::AnyChild),
            "group" | "0" => return Ok(WaitTarget::SameGroup),
            _ => {}
        }

        if let Some(pgid) = s.strip_prefix("pgid:") {
            let pgid = pgid
                .parse::<Pid>()
                .map_err(|e| WaitError::InvalidTarget(format!("{}: {}", s, e)))?;
            return WaitTarget::group(pgid);
        }

        let pid = s
            .parse::<Pid>()
            .map_err(|e| WaitError::InvalidTarget(format!("{}: {}", s, e)))?;
        WaitTarget::child(pid)
    }
}
