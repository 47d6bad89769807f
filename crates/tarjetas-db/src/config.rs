//! # Database Configuration
//!
//! Pool settings, schema bootstrap flag and password hashing cost.
//!
//! Configuration is built in code (builder setters) or loaded from
//! environment variables with fallback to defaults.
//!
//! | Variable                            | Default         |
//! |-------------------------------------|-----------------|
//! | `TARJETAS_DB_PATH`                  | `./tarjetas.db` |
//! | `TARJETAS_DB_MAX_CONNECTIONS`       | `5`             |
//! | `TARJETAS_DB_CONNECT_TIMEOUT_SECS`  | `30`            |
//! | `TARJETAS_DB_CREATE_SCHEMA`         | `true`          |

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::password::PasswordConfig;

/// Path that selects a private in-memory database.
pub const IN_MEMORY_PATH: &str = ":memory:";

/// Database configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("/path/to/tarjetas.db")
///     .max_connections(5)
///     .min_connections(1);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file, or [`IN_MEMORY_PATH`].
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 5
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// Connection acquire timeout.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection. `None` keeps idle
    /// connections open, which an in-memory database requires.
    /// Default: 10 minutes
    pub idle_timeout: Option<Duration>,

    /// Whether to apply the schema on connect.
    /// Default: true
    pub create_schema: bool,

    /// Argon2 cost for password hashing.
    pub password: PasswordConfig,
}

impl DbConfig {
    /// Creates a new database configuration with the given path.
    ///
    /// ## Arguments
    /// * `path` - Path to the SQLite database file. Will be created if it doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Some(Duration::from_secs(600)),
            create_schema: true,
            password: PasswordConfig::default(),
        }
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the idle timeout. `None` keeps idle connections open.
    pub fn idle_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.idle_timeout = timeout;
        self
    }

    /// Sets whether to apply the schema on connect.
    pub fn create_schema(mut self, create: bool) -> Self {
        self.create_schema = create;
        self
    }

    /// Sets the password hashing cost.
    pub fn password(mut self, password: PasswordConfig) -> Self {
        self.password = password;
        self
    }

    /// Creates an in-memory database configuration (for testing).
    ///
    /// Every pool built from this config gets its own private database.
    /// Hashing uses the minimum Argon2 cost so tests stay fast.
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(IN_MEMORY_PATH),
            max_connections: 1, // In-memory requires single connection
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: None,
            create_schema: true,
            password: PasswordConfig::low_cost(),
        }
    }

    /// Whether this config points at an in-memory database.
    pub fn is_in_memory(&self) -> bool {
        self.database_path == Path::new(IN_MEMORY_PATH)
    }

    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let path = env::var("TARJETAS_DB_PATH").unwrap_or_else(|_| "./tarjetas.db".to_string());
        let mut config = DbConfig::new(path);

        if let Some(max) = parse_var::<u32>("TARJETAS_DB_MAX_CONNECTIONS")? {
            config.max_connections = max;
        }
        if let Some(secs) = parse_var::<u64>("TARJETAS_DB_CONNECT_TIMEOUT_SECS")? {
            config.connect_timeout = Duration::from_secs(secs);
        }
        if let Some(create) = parse_var::<bool>("TARJETAS_DB_CREATE_SCHEMA")? {
            config.create_schema = create;
        }

        config.validate()?;
        Ok(config)
    }

    /// Rejects pool sizes sqlx would refuse or misbehave with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_connections == 0 || self.min_connections > self.max_connections {
            return Err(ConfigError::InvalidPool {
                min: self.min_connections,
                max: self.max_connections,
            });
        }
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue(name.to_string())),
        Err(_) => Ok(None),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Invalid pool size: min {min}, max {max}")]
    InvalidPool { min: u32, max: u32 },
}

// =============================================================================
// Unit Tests
// =============================================================================
