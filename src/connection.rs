//! Traced redis client and connection wrappers.

use std::sync::Arc;
use std::time::Instant;

use redis::{Client, Connection, ConnectionLike, IntoConnectionInfo, RedisResult, Value};

use crate::command::ParsedCommand;
use crate::config::TracingConfig;
use crate::tracer::{command_span, record_outcome};

/// A traced wrapper around any redis connection.
///
/// This wrapper implements [`ConnectionLike`], making it a drop-in replacement
/// for [`redis::Connection`]. Every command sent through it is bracketed by a
/// tracing span carrying the derived `"<namespace>/<COMMAND>"` name and the
/// command outcome.
///
/// # Span Nesting
///
/// Spans created by `TracedConnection` become children of the current tracing
/// span. If you're using tracing middleware in your web framework (e.g.
/// `tower-http`'s `TraceLayer`), redis spans will appear nested under HTTP
/// request spans in your traces.
///
/// # Example
///
/// ```rust,ignore
/// use redis_tracing::TracingExt;
///
/// let client = redis::Client::open("redis://127.0.0.1:6379")?;
/// let mut con = client.get_connection()?.with_tracing();
///
/// // All commands are now traced
/// let () = redis::cmd("SET").arg("space").arg(1961).query(&mut con)?;
/// ```
pub struct TracedConnection<C> {
    inner: C,
    config: Arc<TracingConfig>,
}

impl<C: ConnectionLike> TracedConnection<C> {
    /// Create a new traced connection with the given configuration.
    pub fn new(connection: C, config: TracingConfig) -> Self {
        Self {
            inner: connection,
            config: Arc::new(config),
        }
    }

    /// Create a new traced connection with default configuration.
    pub fn wrap(connection: C) -> Self {
        Self::new(connection, TracingConfig::default())
    }

    /// Get a reference to the underlying connection.
    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// Get the tracing configuration.
    pub fn config(&self) -> &TracingConfig {
        &self.config
    }

    /// Consume the wrapper and return the inner connection.
    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C: ConnectionLike> From<C> for TracedConnection<C> {
    fn from(connection: C) -> Self {
        Self::wrap(connection)
    }
}

impl<C: ConnectionLike> AsRef<C> for TracedConnection<C> {
    fn as_ref(&self) -> &C {
        &self.inner
    }
}

impl<C: ConnectionLike> ConnectionLike for TracedConnection<C> {
    fn req_packed_command(&mut self, cmd: &[u8]) -> RedisResult<Value> {
        let parsed = ParsedCommand::from_packed(cmd);
        let span = command_span(&self.config, &parsed);
        if self.config.record_database_index {
            span.record("db.redis.database_index", self.inner.get_db());
        }
        let start = Instant::now();

        let result = span.in_scope(|| self.inner.req_packed_command(cmd));

        record_outcome(&span, &result, start);
        result
    }

    fn req_packed_commands(
        &mut self,
        cmd: &[u8],
        offset: usize,
        count: usize,
    ) -> RedisResult<Vec<Value>> {
        // A packed pipeline carries several commands; trace the batch as one.
        let parsed = ParsedCommand {
            name: "pipeline".to_string(),
            args: Vec::new(),
        };
        let span = command_span(&self.config, &parsed);
        if self.config.record_database_index {
            span.record("db.redis.database_index", self.inner.get_db());
        }
        let start = Instant::now();

        let result = span.in_scope(|| self.inner.req_packed_commands(cmd, offset, count));

        record_outcome(&span, &result, start);
        result
    }

    fn get_db(&self) -> i64 {
        self.inner.get_db()
    }

    fn check_connection(&mut self) -> bool {
        self.inner.check_connection()
    }

    fn is_open(&self) -> bool {
        self.inner.is_open()
    }
}

/// Extension trait for easy wrapping of redis connections.
pub trait TracingExt: Sized {
    /// Wrap this connection with tracing instrumentation.
    fn with_tracing(self) -> TracedConnection<Self>;

    /// Wrap this connection with custom tracing configuration.
    fn with_tracing_config(self, config: TracingConfig) -> TracedConnection<Self>;
}

impl<C: ConnectionLike> TracingExt for C {
    fn with_tracing(self) -> TracedConnection<C> {
        TracedConnection::wrap(self)
    }

    fn with_tracing_config(self, config: TracingConfig) -> TracedConnection<C> {
        TracedConnection::new(self, config)
    }
}

/// A redis client whose connections come pre-instrumented.
///
/// Opening the client only parses the address; no handshake is performed.
/// Connectivity problems surface when a connection is requested or a command
/// runs, through the normal error channel, and failed commands are reported
/// as span error status.
///
/// # Example
///
/// ```rust,ignore
/// use redis_tracing::TracedClient;
///
/// let client = TracedClient::open("redis://127.0.0.1:6379")?;
/// let mut con = client.get_connection()?;
/// let () = redis::cmd("HSET").arg("programs").arg("space").arg(1961).query(&mut con)?;
/// ```
#[derive(Clone)]
pub struct TracedClient {
    inner: Client,
    config: Arc<TracingConfig>,
}

impl TracedClient {
    /// Open a traced client for the given address with default configuration.
    pub fn open<T: IntoConnectionInfo>(params: T) -> RedisResult<Self> {
        Self::open_with_config(params, TracingConfig::default())
    }

    /// Open a traced client with custom tracing configuration.
    pub fn open_with_config<T: IntoConnectionInfo>(
        params: T,
        config: TracingConfig,
    ) -> RedisResult<Self> {
        Ok(Self {
            inner: Client::open(params)?,
            config: Arc::new(config),
        })
    }

    /// Obtain a new instrumented connection to the server.
    pub fn get_connection(&self) -> RedisResult<TracedConnection<Connection>> {
        Ok(TracedConnection {
            inner: self.inner.get_connection()?,
            config: Arc::clone(&self.config),
        })
    }

    /// Get a reference to the underlying [`Client`].
    pub fn inner(&self) -> &Client {
        &self.inner
    }

    /// Get the tracing configuration.
    pub fn config(&self) -> &TracingConfig {
        &self.config
    }
}
