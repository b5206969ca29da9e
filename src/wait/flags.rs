/*!
 * Wait Flags
 * Option bits passed to the wait primitive
 */

use nix::libc;
use nix::sys::wait::WaitPidFlag;
use serde::{Deserialize, Serialize};

/// Which state changes the wait primitive should report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct WaitOptions {
    /// Report children stopped by a signal (WUNTRACED)
    pub report_stopped: bool,
    /// Report stopped children resumed by SIGCONT (WCONTINUED)
    pub report_continued: bool,
    /// Return immediately when no child has changed state (WNOHANG)
    pub nohang: bool,
}

impl WaitOptions {
    pub fn new() -> Self {
        Self {
            report_stopped: true,
            report_continued: false,
            nohang: false,
        }
    }

    /// Only terminal states (exit or signal death) are reported
    pub fn terminal_only() -> Self {
        Self {
            report_stopped: false,
            report_continued: false,
            nohang: false,
        }
    }

    pub fn with_stopped(mut self, enabled: bool) -> Self {
        self.report_stopped = enabled;
        self
    }

    pub fn with_continued(mut self, enabled: bool) -> Self {
        self.report_continued = enabled;
        self
    }

    pub fn with_nohang(mut self, enabled: bool) -> Self {
        self.nohang = enabled;
        self
    }

    /// Raw OS flag word
    pub fn bits(&self) -> i32 {
        let mut bits = 0;
        if self.nohang {
            bits |= libc::WNOHANG;
        }
        if self.report_stopped {
            bits |= libc::WUNTRACED;
        }
        if self.report_continued {
            bits |= libc::WCONTINUED;
        }
        bits
    }

    pub fn to_flags(&self) -> WaitPidFlag {
        WaitPidFlag::from_bits_truncate(self.bits())
    }
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// A named wait flag and its platform value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FlagConstant {
    pub name: &'static str,
    pub value: i32,
}

/// WNOHANG, WUNTRACED and WCONTINUED, in that order
pub fn flag_constants() -> [FlagConstant; 3] {
    [
        FlagConstant {
            name: "WNOHANG",
            value: libc::WNOHANG,
        },
        FlagConstant {
            name: "WUNTRACED",
            value: libc::WUNTRACED,
        },
        FlagConstant {
            name: "WCONTINUED",
            value: libc::WCONTINUED,
        },
    ]
}

/// One decimal value per line
pub fn render_flag_constants() -> String {
    flag_constants()
        .iter()
        .map(|flag| format!("{}\n", flag.value))
        .collect()
}
