/*!
 * Process Executor Tests
 * Spawning children that the wait loop reaps
 */

use pretty_assertions::assert_eq;
use procwait::process::{ExecutionConfig, ProcessExecutor};
use procwait::wait::{ChildStatus, WaitOptions, WaitTarget, Waiter};
use procwait::ProcessError;

#[test]
fn test_working_dir_applies() {
    let executor = ProcessExecutor::new();
    let config = ExecutionConfig::new("sh".to_string())
        .with_args(vec!["-c".into(), "test \"$(pwd)\" = /".into()])
        .with_working_dir("/".to_string())
        .with_detached_io(true);

    let pid = executor.spawn(&config).unwrap();
    let status = Waiter::new(WaitTarget::Child(pid), WaitOptions::default())
        .wait_once()
        .unwrap();

    assert_eq!(status, ChildStatus::Exited { pid, code: 0 });
}

#[test]
fn test_clear_env() {
    let executor = ProcessExecutor::new();
    // With a cleared environment HOME is unset, so `test -z` succeeds
    let config = ExecutionConfig::new("/bin/sh".to_string())
        .with_args(vec!["-c".into(), "test -z \"$HOME\"".into()])
        .with_clear_env(true)
        .with_detached_io(true);

    let pid = executor.spawn(&config).unwrap();
    let status = Waiter::new(WaitTarget::Child(pid), WaitOptions::default())
        .wait_once()
        .unwrap();

    assert_eq!(status.exit_code(), Some(0));
}

#[test]
fn test_shell_metacharacters_rejected() {
    let executor = ProcessExecutor::new();
    let result = executor.spawn(&ExecutionConfig::new("sh -c `id`".to_string()));

    assert!(matches!(result, Err(ProcessError::PermissionDenied(_))));
}

#[test]
fn test_clones_share_bookkeeping() {
    let executor = ProcessExecutor::new();
    let clone = executor.clone();

    let pid = executor
        .spawn(&ExecutionConfig::new("true".to_string()).with_detached_io(true))
        .unwrap();
    assert_eq!(clone.command_of(pid).as_deref(), Some("true"));

    Waiter::new(WaitTarget::Child(pid), WaitOptions::default())
        .wait_once()
        .unwrap();
    assert!(clone.forget(pid));
    assert_eq!(executor.count(), 0);
}
