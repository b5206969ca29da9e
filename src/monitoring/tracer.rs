/*!
 * Tracing
 * Structured tracing for wait calls and supervised runs using the tracing crate
 *
 * Features:
 * - Trace ID per wait call for log correlation
 * - JSON-formatted logs for structured parsing
 * - Span fields for target, options, outcome and duration
 */

use crate::core::errors::WaitError;
use crate::wait::{ChildStatus, WaitOptions, WaitTarget};
use std::time::Instant;
use tracing::{debug, info, span, Level};
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};
use uuid::Uuid;

/// Environment variable switching log output to JSON
pub const TRACE_JSON_ENV: &str = "PROCWAIT_TRACE_JSON";

/// Initialize structured tracing
///
/// Logs go to stderr so reports on stdout stay machine-readable.
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - PROCWAIT_TRACE_JSON: Enable JSON output (default: false)
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = std::env::var(TRACE_JSON_ENV)
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    // try_init: a second call (tests, embedding) keeps the first subscriber
    let installed = if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init()
            .is_ok()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .try_init()
            .is_ok()
    };

    if installed {
        debug!(json = use_json, "Structured tracing initialized");
    }
}

/// Generate a unique trace ID for log correlation
pub fn generate_trace_id() -> String {
    Uuid::new_v4().to_string()
}

/// Span around one call of the wait primitive
pub struct WaitSpan {
    span: tracing::Span,
    start: Instant,
    trace_id: String,
}

impl WaitSpan {
    pub fn new(target: WaitTarget, options: WaitOptions) -> Self {
        let trace_id = generate_trace_id();

        let span = span!(
            Level::DEBUG,
            "wait",
            trace_id = %trace_id,
            wait_target = %target,
            options = options.bits(),
            duration_us = tracing::field::Empty,
            result = tracing::field::Empty,
            pid = tracing::field::Empty,
            error = tracing::field::Empty,
        );

        Self {
            span,
            start: Instant::now(),
            trace_id,
        }
    }

    /// Get the trace ID for this wait call
    pub fn trace_id(&self) -> &str {
        &self.trace_id
    }

    /// Record the decoded status
    pub fn record_status(&self, status: &ChildStatus) {
        self.span.record("result", status.label());
        if let Some(pid) = status.pid() {
            self.span.record("pid", pid);
        }
    }

    /// Record a failed wait
    pub fn record_error(&self, error: &WaitError) {
        self.span.record("error", tracing::field::display(error));
        self.span.record("result", "error");
    }

    /// Enter the span context
    pub fn enter(&self) -> tracing::span::Entered<'_> {
        self.span.enter()
    }
}

impl Drop for WaitSpan {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        let _entered = self.span.enter();
        self.span.record("duration_us", duration.as_micros() as u64);
        debug!(
            trace_id = %self.trace_id,
            duration_us = duration.as_micros() as u64,
            "wait returned"
        );
    }
}

/// Span for a supervised child run
pub struct OperationSpan {
    span: tracing::Span,
    start: Instant,
    trace_id: String,
}

impl OperationSpan {
    pub fn new(operation: &str) -> Self {
        let trace_id = generate_trace_id();

        let span = span!(
            Level::INFO,
            "operation",
            trace_id = %trace_id,
            operation = operation,
            pid = tracing::field::Empty,
            duration_ms = tracing::field::Empty,
            result = tracing::field::Empty,
            error = tracing::field::Empty,
        );

        Self {
            span,
            start: Instant::now(),
            trace_id,
        }
    }

    pub fn trace_id(&self) -> &str {
        &self.trace_id
    }

    pub fn span(&self) -> &tracing::Span {
        &self.span
    }

    pub fn record_pid(&self, pid: i32) {
        self.span.record("pid", pid);
    }

    /// Record the operation result
    pub fn record_result(&self, result: &str) {
        self.span.record("result", result);
    }

    /// Record an error
    pub fn record_error(&self, error: &str) {
        self.span.record("error", error);
        self.span.record("result", "error");
    }
}

impl Drop for OperationSpan {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        let _entered = self.span.enter();
        self.span.record("duration_ms", duration.as_millis() as u64);
        info!(
            trace_id = %self.trace_id,
            duration_ms = duration.as_millis() as u64,
            "operation finished"
        );
    }
}

/// Create a span for a wait call
pub fn span_wait(target: WaitTarget, options: WaitOptions) -> WaitSpan {
    WaitSpan::new(target, options)
}

/// Create a span for a named operation
pub fn span_operation(operation: &str) -> OperationSpan {
    OperationSpan::new(operation)
}
