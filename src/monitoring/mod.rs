/*!
 * Monitoring
 * Structured logging and tracing spans
 */

mod tracer;

pub use tracer::{
    generate_trace_id, init_tracing, span_operation, span_wait, OperationSpan, WaitSpan,
    TRACE_JSON_ENV,
};
