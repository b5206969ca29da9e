/*!
 * Status Word Decoding Tests
 * Property tests over the platform's status-word encoding
 */

use nix::libc;
use pretty_assertions::assert_eq;
use procwait::signals::Signal;
use procwait::wait::ChildStatus;
use proptest::prelude::*;

proptest! {
    #[test]
    fn exit_codes_decode(code in 0i32..=255, pid in 1i32..100_000) {
        let status = ChildStatus::from_raw(pid, code << 8);
        prop_assert_eq!(status, ChildStatus::Exited { pid, code });
        prop_assert!(status.is_terminal());
        prop_assert_eq!(status.exit_code(), Some(code));
    }

    #[test]
    fn termination_signals_decode(signo in 1i32..=31, core in any::<bool>()) {
        let raw = signo | if core { 0x80 } else { 0 };
        let status = ChildStatus::from_raw(1, raw);
        prop_assert_eq!(
            status,
            ChildStatus::Signaled { pid: 1, signal: signo, core_dumped: core }
        );
        prop_assert_eq!(status.exit_code(), Some(128 + signo));
    }

    #[test]
    fn stop_signals_decode(signo in 1i32..=31) {
        let status = ChildStatus::from_raw(1, (signo << 8) | 0x7f);
        prop_assert_eq!(status, ChildStatus::Stopped { pid: 1, signal: signo });
        prop_assert!(!status.is_terminal());
    }
}

#[test]
fn test_continued_word() {
    assert_eq!(
        ChildStatus::from_raw(3, 0xffff),
        ChildStatus::Continued { pid: 3 }
    );
}

#[test]
fn test_named_signal_lookup() {
    let status = ChildStatus::from_raw(3, libc::SIGTERM);
    assert_eq!(status.signal(), Some(Signal::SIGTERM));
    assert_eq!(status.label(), "signaled");

    // Real-time signals have no name but still decode
    let rt = ChildStatus::from_raw(3, 34);
    assert_eq!(rt.signal(), None);
    assert!(rt.is_terminal());
}
