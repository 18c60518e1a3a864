//! # redis-tracing
//!
//! OpenTelemetry-compatible tracing instrumentation for redis commands.
//!
//! This crate wraps the `redis` crate's command-execution seam so that every
//! command sent through an instrumented connection produces a tracing span,
//! with proper parent-child relationships that integrate with your existing
//! tracing infrastructure (like HTTP request spans from axum or actix-web).
//!
//! ## Features
//!
//! - **Automatic Instrumentation**: All commands sent through [`TracedConnection`] are traced
//! - **OpenTelemetry Compatible**: Spans include semantic conventions for database operations
//! - **Proper Span Nesting**: Command spans appear as children of HTTP request spans
//! - **Error Transparency**: Errors annotate the span status and pass through unchanged
//! - **Zero Config**: Works out of the box with sensible defaults
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use redis_tracing::TracedClient;
//!
//! // Open a client whose connections come pre-instrumented
//! let client = TracedClient::open("redis://127.0.0.1:6379")?;
//! let mut con = client.get_connection()?;
//!
//! // Use it exactly like a normal redis connection
//! let () = redis::cmd("HSET").arg("programs").arg("space").arg(1961).query(&mut con)?;
//! ```
//!
//! Or wrap an existing connection:
//!
//! ```rust,ignore
//! use redis_tracing::TracingExt;
//!
//! let mut con = redis::Client::open("redis://127.0.0.1:6379")?
//!     .get_connection()?
//!     .with_tracing();
//! ```
//!
//! ## Span Attributes
//!
//! The following OpenTelemetry semantic convention attributes are recorded:
//!
//! | Attribute | Description |
//! |-----------|-------------|
//! | `otel.name` | Derived span name, `"<namespace>/<COMMAND>"` (e.g. `"redis-go/HSET"`) |
//! | `db.system` | Always "redis" |
//! | `db.operation` | Command name (HSET, HGET, ...) |
//! | `db.statement` | Full command text (when enabled) |
//! | `db.redis.database_index` | Logical database index |
//! | `db.duration_ms` | Command duration |
//! | `server.address` / `server.port` | Server endpoint (when configured) |
//! | `otel.status_code` | "OK" or "ERROR" |
//! | `error.message` | Error details (on failure) |
//!
//! The wrapper is stateless: each command execution touches only its own span,
//! so instrumented connections may be used from as many threads as the
//! underlying client allows, with no extra locking.

mod command;
mod config;
mod connection;
mod tracer;

pub use command::ParsedCommand;
pub use config::{TracingConfig, DEFAULT_NAMESPACE};
pub use connection::{TracedClient, TracedConnection, TracingExt};
pub use tracer::{per_command_tracer, CommandProcessor};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{TracedClient, TracedConnection, TracingConfig, TracingExt};
}
