//! Per-command tracing decorator.

use std::sync::Arc;
use std::time::Instant;

use redis::{Cmd, RedisResult, Value};
use tracing::{field, Span};

use crate::command::ParsedCommand;
use crate::config::TracingConfig;

/// The "process one command" hook: takes a command, sends it to the server,
/// and returns the reply or the error.
///
/// This is the seam the decorator instruments. [`TracedConnection`] installs
/// the wrapped form on a real connection; the type is public so the decorator
/// can also be applied to any custom processing function.
///
/// [`TracedConnection`]: crate::TracedConnection
pub type CommandProcessor = Box<dyn FnMut(&Cmd) -> RedisResult<Value> + Send>;

/// Build a decorator that wraps a [`CommandProcessor`] with per-command spans.
///
/// Every invocation of the wrapped processor opens exactly one span named
/// `"<namespace>/<COMMAND>"` (carried in the `otel.name` field), runs the
/// inner processor inside it, records the outcome, and closes the span —
/// on every exit path. The inner result is returned unchanged; errors are
/// annotated on the span, never swallowed or rewritten.
///
/// Spans become children of whatever span is current at call time, so
/// commands issued while handling an HTTP request nest under the request
/// span automatically.
///
/// The decorator holds no state between calls; it may be applied to any
/// number of processors, and the wrapped processors may run concurrently.
///
/// # Example
///
/// ```rust
/// use redis_tracing::{per_command_tracer, CommandProcessor, TracingConfig};
///
/// let tracer = per_command_tracer(TracingConfig::default());
/// let process: CommandProcessor = Box::new(|_cmd| Ok(redis::Value::Okay));
/// let mut traced = tracer(process);
///
/// let reply = traced(&redis::cmd("PING"));
/// assert!(reply.is_ok());
/// ```
pub fn per_command_tracer(
    config: TracingConfig,
) -> impl Fn(CommandProcessor) -> CommandProcessor {
    let config = Arc::new(config);
    move |mut process| {
        let config = Arc::clone(&config);
        Box::new(move |cmd| {
            let parsed = ParsedCommand::from_cmd(cmd);
            let span = command_span(&config, &parsed);
            let start = Instant::now();

            let result = span.in_scope(|| process(cmd));

            record_outcome(&span, &result, start);
            result
        })
    }
}

/// Create a span for one command execution.
pub(crate) fn command_span(config: &TracingConfig, parsed: &ParsedCommand) -> Span {
    let span_name = parsed.span_name(&config.namespace);

    let span = tracing::info_span!(
        "redis.command",
        otel.name = %span_name,
        db.system = "redis",
        db.operation = %parsed.name,
        db.statement = field::Empty,
        db.redis.database_index = field::Empty,
        db.duration_ms = field::Empty,
        server.address = field::Empty,
        server.port = field::Empty,
        otel.status_code = field::Empty,
        error.message = field::Empty,
    );

    if let Some(addr) = &config.server_address {
        span.record("server.address", addr.as_str());
    }
    if let Some(port) = config.server_port {
        span.record("server.port", port as i64);
    }

    if config.log_commands {
        span.record("db.statement", parsed.statement().as_str());
    }

    span
}

/// Record the result of one command execution in its span.
pub(crate) fn record_outcome<T>(span: &Span, result: &RedisResult<T>, start: Instant) {
    span.record("db.duration_ms", start.elapsed().as_millis() as i64);

    match result {
        Ok(_) => {
            span.record("otel.status_code", "OK");
        }
        Err(e) => {
            span.record("otel.status_code", "ERROR");
            span.record("error.message", e.to_string().as_str());
            tracing::error!(
                parent: span,
                error = %e,
                "Redis command failed"
            );
        }
    }
}
