//! Configuration for tracing behavior.

/// Default span-name namespace, kept compatible with the widely deployed
/// `redis-go` instrumentation so dashboards keyed on `redis-go/<COMMAND>`
/// span names keep working.
pub const DEFAULT_NAMESPACE: &str = "redis-go";

/// Configuration options for redis command tracing.
///
/// # Example
///
/// ```rust
/// use redis_tracing::TracingConfig;
///
/// let config = TracingConfig::default()
///     .with_command_logging(true)
///     .with_server_address("cache.internal", 6379);
/// ```
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Namespace prefix for span names, producing `"<namespace>/<COMMAND>"`.
    /// Default: `"redis-go"`
    pub namespace: String,

    /// Whether to include the full command text (name plus arguments) in spans.
    /// Default: `false` (arguments may contain sensitive data)
    pub log_commands: bool,

    /// Whether to record the logical database index on connection spans.
    /// Default: `true`
    pub record_database_index: bool,

    /// Server address to include in spans (useful for service maps).
    /// Default: `None`
    pub server_address: Option<String>,

    /// Server port to include in spans.
    /// Default: `None`
    pub server_port: Option<u16>,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            log_commands: false,
            record_database_index: true,
            server_address: None,
            server_port: None,
        }
    }
}

impl TracingConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the namespace prefix used when deriving span names.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Enable or disable full command logging in spans.
    ///
    /// **Security Warning**: Command arguments often contain user input and
    /// potentially sensitive data. Only enable in development or controlled
    /// environments.
    pub fn with_command_logging(mut self, enabled: bool) -> Self {
        self.log_commands = enabled;
        self
    }

    /// Enable or disable recording of the logical database index.
    pub fn with_database_index_recording(mut self, enabled: bool) -> Self {
        self.record_database_index = enabled;
        self
    }

    /// Set the server address and port to include in spans.
    pub fn with_server_address(mut self, address: impl Into<String>, port: u16) -> Self {
        self.server_address = Some(address.into());
        self.server_port = Some(port);
        self
    }

    /// Create a development-friendly configuration with full logging enabled.
    ///
    /// **Warning**: Do not use in production as it logs every command argument.
    pub fn development() -> Self {
        Self {
            log_commands: true,
            ..Self::default()
        }
    }

    /// Create a production-safe configuration with minimal overhead.
    ///
    /// Skips the per-command database-index lookup on top of keeping
    /// command logging off.
    pub fn production() -> Self {
        Self {
            log_commands: false,
            record_database_index: false,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = TracingConfig::default()
            .with_namespace("redis-rs")
            .with_command_logging(true)
            .with_server_address("cache.internal", 6380);

        assert_eq!(config.namespace, "redis-rs");
        assert!(config.log_commands);
        assert_eq!(config.server_address, Some("cache.internal".to_string()));
        assert_eq!(config.server_port, Some(6380));
    }

    #[test]
    fn test_default_namespace() {
        assert_eq!(TracingConfig::default().namespace, "redis-go");
    }

    #[test]
    fn test_development_config() {
        let config = TracingConfig::development();
        assert!(config.log_commands);
    }

    #[test]
    fn test_production_config() {
        let config = TracingConfig::production();
        assert!(!config.log_commands);
        assert!(!config.record_database_index);
    }

    #[test]
    fn test_development_config_records_database_index() {
        assert!(TracingConfig::development().record_database_index);
    }
}
