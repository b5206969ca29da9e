/*!
 * Supervisor
 * Spawns a child, runs the wait loop on the blocking pool, and forwards
 * termination signals received by this process to the child
 */

use super::executor::ProcessExecutor;
use super::types::ExecutionConfig;
use crate::config::WaitConfig;
use crate::core::errors::{WaitError, WaitResult};
use crate::core::types::Pid;
use crate::monitoring::span_operation;
use crate::report::StatusObserver;
use crate::signals::{KillDelivery, Signal, SignalDelivery};
use crate::wait::{WaitOutcome, WaitTarget, Waiter};
use std::future::poll_fn;
use std::sync::Arc;
use std::task::Poll;
use tokio::signal::unix::{signal, SignalKind};
use tracing::{info, warn, Instrument};

/// Signals forwarded to the supervised child
pub const FORWARDED_SIGNALS: [Signal; 3] = [Signal::SIGINT, Signal::SIGTERM, Signal::SIGHUP];

pub struct Supervisor {
    executor: ProcessExecutor,
    config: WaitConfig,
    delivery: Arc<dyn SignalDelivery>,
    forward_signals: bool,
}

impl Supervisor {
    pub fn new(executor: ProcessExecutor, config: WaitConfig) -> Self {
        Self {
            executor,
            config,
            delivery: Arc::new(KillDelivery),
            forward_signals: true,
        }
    }

    pub fn with_forwarding(mut self, enabled: bool) -> Self {
        self.forward_signals = enabled;
        self
    }

    pub fn with_delivery(mut self, delivery: Arc<dyn SignalDelivery>) -> Self {
        self.delivery = delivery;
        self
    }

    /// Spawn `command` and wait on it
    ///
    /// `WaitTarget::SameGroup` in the config means "this child"; any other
    /// target is kept as given. Signal listeners are installed before the
    /// child exists.
    pub async fn run<O>(&self, command: &ExecutionConfig, observer: O) -> WaitResult<WaitOutcome>
    where
        O: StatusObserver + Send + 'static,
    {
        self.config.validate()?;
        let op = span_operation("supervise");

        let listeners = if self.forward_signals {
            listen_all()?
        } else {
            Vec::new()
        };

        let pid = self.executor.spawn(command)?;
        op.record_pid(pid);

        let target = match self.config.target {
            WaitTarget::SameGroup => WaitTarget::Child(pid),
            other => other,
        };
        let waiter = Waiter::from_config(&self.config).with_target(target);

        let result = self
            .supervise(pid, waiter, observer, listeners)
            .instrument(op.span().clone())
            .await;

        match &result {
            Ok(outcome) => {
                if let Some(reaped) = outcome.status.pid() {
                    self.executor.forget(reaped);
                }
                op.record_result(outcome.status.label());
            }
            Err(e) => op.record_error(&e.to_string()),
        }
        result
    }

    async fn supervise<O>(
        &self,
        pid: Pid,
        waiter: Waiter,
        mut observer: O,
        mut listeners: Vec<Listener>,
    ) -> WaitResult<WaitOutcome>
    where
        O: StatusObserver + Send + 'static,
    {
        let mut handle =
            tokio::task::spawn_blocking(move || waiter.wait_until_terminal(&mut observer));

        if listeners.is_empty() {
            return join(handle.await);
        }

        loop {
            tokio::select! {
                joined = &mut handle => return join(joined),
                sig = next_signal(&mut listeners) => self.forward(pid, sig),
            }
        }
    }

    fn forward(&self, pid: Pid, signal: Signal) {
        info!(pid, signal = %signal, "Forwarding signal to child");
        // A child that already exited is reported by the wait loop
        if let Err(e) = self.delivery.send(pid, signal) {
            warn!(pid, error = %e, "Signal forwarding failed");
        }
    }
}

type Listener = (Signal, tokio::signal::unix::Signal);

fn listen_all() -> WaitResult<Vec<Listener>> {
    FORWARDED_SIGNALS
        .iter()
        .map(|&sig| {
            signal(SignalKind::from_raw(sig.number()))
                .map(|listener| (sig, listener))
                .map_err(|e| WaitError::TaskFailed(format!("signal handler for {}: {}", sig, e)))
        })
        .collect()
}

/// Resolves with the first forwarded signal received
async fn next_signal(listeners: &mut [Listener]) -> Signal {
    poll_fn(|cx| {
        for (sig, listener) in listeners.iter_mut() {
            if let Poll::Ready(Some(())) = listener.poll_recv(cx) {
                return Poll::Ready(*sig);
            }
        }
        Poll::Pending
    })
    .await
}

fn join(
    joined: Result<WaitResult<WaitOutcome>, tokio::task::JoinError>,
) -> WaitResult<WaitOutcome> {
    joined.map_err(|e| WaitError::TaskFailed(e.to_string()))?
}
