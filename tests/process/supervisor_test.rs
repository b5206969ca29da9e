/*!
 * Supervisor Tests
 * Spawn + wait through the async supervisor
 */

use pretty_assertions::assert_eq;
use procwait::process::{ExecutionConfig, ProcessExecutor, Supervisor};
use procwait::report::{JsonReporter, RecordingObserver};
use procwait::signals::{send_signal, Signal};
use procwait::wait::{ChildStatus, WaitOptions, WaitTarget, Waiter};
use procwait::{WaitConfig, WaitError};
use std::time::Duration;

fn sh(script: &str) -> ExecutionConfig {
    ExecutionConfig::new("sh".to_string())
        .with_args(vec!["-c".into(), script.into()])
        .with_detached_io(true)
}

/// Kill and collect whatever the executor still tracks
fn reap_all(executor: &ProcessExecutor) {
    for pid in executor.pids() {
        let _ = send_signal(pid, Signal::SIGKILL);
        let _ = Waiter::new(WaitTarget::Child(pid), WaitOptions::terminal_only()).wait_once();
        executor.forget(pid);
    }
}

fn supervisor(config: WaitConfig) -> Supervisor {
    Supervisor::new(ProcessExecutor::new(), config).with_forwarding(false)
}

#[tokio::test]
async fn test_child_exit_code() {
    let recorder = RecordingObserver::new();
    let outcome = supervisor(WaitConfig::new())
        .run(&sh("exit 3"), recorder.clone())
        .await
        .unwrap();

    assert!(matches!(outcome.status, ChildStatus::Exited { code: 3, .. }));
    assert_eq!(recorder.len(), 1);
    assert_eq!(recorder.outcome().map(|o| o.exit_code()), Some(3));
}

#[tokio::test]
async fn test_child_killing_itself() {
    let outcome = supervisor(WaitConfig::new())
        .run(&sh("kill -KILL $$"), RecordingObserver::new())
        .await
        .unwrap();

    assert_eq!(outcome.status.signal(), Some(Signal::SIGKILL));
    assert_eq!(outcome.exit_code(), 128 + Signal::SIGKILL.number());
}

#[tokio::test]
async fn test_child_stopping_itself_is_reported() {
    // The child stops itself; a helper resumes it and the child exits
    let executor = ProcessExecutor::new();
    let config = WaitConfig::new().with_options(WaitOptions::new().with_continued(true));
    let recorder = RecordingObserver::new();

    let script = "(sleep 0.2; kill -CONT $$) & kill -STOP $$; exit 5";
    let outcome = Supervisor::new(executor, config)
        .with_forwarding(false)
        .run(&sh(script), recorder.clone())
        .await
        .unwrap();

    let labels: Vec<_> = recorder.events().iter().map(|e| e.status.label()).collect();
    assert_eq!(labels, vec!["stopped", "continued", "exited"]);
    assert_eq!(outcome.exit_code(), 5);
}

#[tokio::test]
async fn test_timeout_surfaces() {
    let config = WaitConfig::new()
        .with_poll_interval(Duration::from_millis(10))
        .with_timeout(Duration::from_millis(50));

    let executor = ProcessExecutor::new();
    let result = Supervisor::new(executor.clone(), config)
        .with_forwarding(false)
        .run(&sh("sleep 1"), RecordingObserver::new())
        .await;

    assert!(matches!(result, Err(WaitError::Timeout { .. })));
    // The child is still tracked since nothing reaped it
    assert_eq!(executor.count(), 1);
    reap_all(&executor);
}

#[tokio::test]
async fn test_explicit_target_kept() {
    // A pid that is not our child: the wait fails instead of silently retargeting
    let executor = ProcessExecutor::new();
    let config = WaitConfig::new().with_target(WaitTarget::Child(i32::MAX));
    let result = Supervisor::new(executor.clone(), config)
        .with_forwarding(false)
        .run(&sh("exit 0"), RecordingObserver::new())
        .await;

    assert_eq!(result, Err(WaitError::NoChildren));
    reap_all(&executor);
}

#[tokio::test]
async fn test_json_reporter_output() {
    let outcome = supervisor(WaitConfig::new())
        .run(&sh("exit 1"), JsonReporter::new(Vec::new()))
        .await
        .unwrap();

    assert_eq!(outcome.events.len(), 1);
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["status"]["state"], "exited");
    assert_eq!(json["status"]["code"], 1);
}
