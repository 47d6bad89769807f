//! # Database Pool Management
//!
//! Connection pool creation for SQLite and repository construction.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Database Connection Pool                           │
//! │                                                                         │
//! │  Process startup                                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbConfig::from_env() / DbConfig::new(path)                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(config).await ← Create pool + apply schema              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │            SqlitePool                    │                           │
//! │  │  ┌─────┐ ┌─────┐ ┌─────┐ ┌─────┐       │                           │
//! │  │  │Conn1│ │Conn2│ │Conn3│ │Conn4│ ...   │  (max_connections)        │
//! │  │  └─────┘ └─────┘ └─────┘ └─────┘       │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │       │                                                                 │
//! │       ▼  pool handle cloned into each repository                       │
//! │  usuarios()   temas()   tarjetas()                                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no global handle. Whoever owns the `Database` decides its
//! lifetime; repositories only borrow a clone of the pool.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::{debug, info};

use crate::config::DbConfig;
use crate::error::{DbError, DbResult};
use crate::password::PasswordHasher;
use crate::repository::{TarjetaRepository, TemaRepository, UsuarioRepository};
use crate::schema;

/// Main database handle providing repository access.
///
/// ## Usage
/// ```rust,ignore
/// let db = Database::new(DbConfig::from_env()?).await?;
///
/// let tema = db.temas().create(&NewTema::new("Geografía")).await?;
/// let tarjetas = db.tarjetas().list_by_tema(tema.id_tema).await?;
/// ```
#[derive(Debug, Clone)]
pub struct Database {
    /// The SQLite connection pool.
    pool: SqlitePool,

    /// Shared by every UsuarioRepository handed out.
    hasher: PasswordHasher,
}

impl Database {
    /// Creates a new database connection pool.
    ///
    /// ## What This Does
    /// 1. Validates the pool sizes
    /// 2. Creates the database file if it doesn't exist
    /// 3. Configures SQLite:
    ///    - WAL mode for concurrent reads (file databases only)
    ///    - NORMAL synchronous
    ///    - Foreign keys enabled
    /// 4. Creates the connection pool
    /// 5. Applies the schema (if enabled)
    ///
    /// ## Returns
    /// * `Ok(Database)` - Ready-to-use database handle
    /// * `Err(DbError::ConnectionFailed)` - Bad config or unreachable file
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Initializing database connection"
        );

        config
            .validate()
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        let hasher = PasswordHasher::new(config.password)?;

        let connect_options = if config.is_in_memory() {
            SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
        } else {
            SqliteConnectOptions::new()
                .filename(&config.database_path)
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .create_if_missing(true)
        };

        // SQLite has them disabled by default for backwards compatibility
        let connect_options = connect_options.foreign_keys(true);

        debug!("Connection options configured");

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(config.idle_timeout);

        // An in-memory database lives exactly as long as its one connection
        if config.is_in_memory() {
            pool_options = pool_options.max_lifetime(None);
        }

        let pool = pool_options
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "Database pool created"
        );

        let db = Database { pool, hasher };

        if config.create_schema {
            db.ensure_schema().await?;
        }

        Ok(db)
    }

    /// Wraps an existing pool.
    ///
    /// The caller is responsible for foreign keys being enabled on the
    /// pool's connections and for the schema being present.
    pub fn from_pool(pool: SqlitePool, hasher: PasswordHasher) -> Self {
        Database { pool, hasher }
    }

    /// Applies the table definitions. Idempotent.
    pub async fn ensure_schema(&self) -> DbResult<()> {
        schema::apply(&self.pool).await?;
        info!("Schema ready");
        Ok(())
    }

    /// Returns a reference to the connection pool.
    ///
    /// For queries not covered by repositories.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the user repository.
    pub fn usuarios(&self) -> UsuarioRepository {
        UsuarioRepository::new(self.pool.clone(), self.hasher.clone())
    }

    /// Returns the topic repository.
    pub fn temas(&self) -> TemaRepository {
        TemaRepository::new(self.pool.clone())
    }

    /// Returns the card repository.
    pub fn tarjetas(&self) -> TarjetaRepository {
        TarjetaRepository::new(self.pool.clone())
    }

    /// Closes the database connection pool.
    ///
    /// After calling close, all repository operations fail with
    /// `DbError::ConnectionFailed`.
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }

    /// Checks if the database is healthy (can execute queries).
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::repository::Repository;
    use tarjetas_core::NewTema;

    #[tokio::test]
    async fn test_in_memory_database() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        assert!(db.health_check().await);
        assert_eq!(
            schema::table_names(db.pool()).await.unwrap(),
            vec!["Tarjeta", "Tema", "Usuario"]
        );
    }

    #[tokio::test]
    async fn test_ensure_schema_is_idempotent() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.temas().create(&NewTema::new("Persistente")).await.unwrap();

        db.ensure_schema().await.unwrap();

        assert_eq!(db.temas().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_without_schema_queries_fail() {
        let db = Database::new(DbConfig::in_memory().create_schema(false))
            .await
            .unwrap();

        let err = db.temas().list().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Query);
    }

    #[tokio::test]
    async fn test_in_memory_databases_are_isolated() {
        let first = Database::new(DbConfig::in_memory()).await.unwrap();
        let second = Database::new(DbConfig::in_memory()).await.unwrap();

        first.temas().create(&NewTema::new("Solo aquí")).await.unwrap();

        assert_eq!(second.temas().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_closed_pool_reports_connection_error() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.close().await;

        assert!(!db.health_check().await);
        let err = db.temas().list().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Connection);
    }

    #[tokio::test]
    async fn test_invalid_config_rejected() {
        let err = Database::new(DbConfig::in_memory().max_connections(0))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Connection);
    }

    #[tokio::test]
    async fn test_in_memory_connection_is_never_recycled() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let options = db.pool().options();
        assert_eq!(options.get_max_lifetime(), None);
        assert_eq!(options.get_idle_timeout(), None);
    }
}
