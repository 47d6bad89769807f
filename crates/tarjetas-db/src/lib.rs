//! # tarjetas-db: Repository Layer for the Flashcard Store
//!
//! Typed CRUD for users, topics and cards over SQLite, using sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tarjetas Data Flow                               │
//! │                                                                         │
//! │  Caller (seed binary, tests, embedding application)                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   tarjetas-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories  │    │   Schema     │  │   │
//! │  │   │   (pool.rs)   │    │                │    │  (bootstrap) │  │   │
//! │  │   │               │    │ UsuarioRepo    │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ TemaRepo       │    │ Usuario      │  │   │
//! │  │   │ PasswordHasher│    │ TarjetaRepo    │    │ Tema         │  │   │
//! │  │   │               │    │                │    │ Tarjeta      │  │   │
//! │  │   └───────────────┘    └────────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   ./tarjetas.db  (or :memory: in tests)                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - Pool settings and environment loading
//! - [`pool`] - Connection pool creation, repository construction
//! - [`schema`] - Table definitions applied at startup
//! - [`password`] - Argon2id hashing for user passwords
//! - [`error`] - Database error types and their semantic kinds
//! - [`repository`] - The generic `Repository` trait and its three impls
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tarjetas_db::{Database, DbConfig, Repository};
//! use tarjetas_core::{NewTarjeta, NewTema};
//!
//! let db = Database::new(DbConfig::new("./tarjetas.db")).await?;
//!
//! let tema = db.temas().create(&NewTema::new("Geografía")).await?;
//! let tarjeta = db.tarjetas().create(&NewTarjeta { id_tema: tema.id_tema, .. }).await?;
//! let same = db.tarjetas().get_by_id(tarjeta.id_tarjeta).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod password;
pub mod pool;
pub mod repository;
pub mod schema;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{ConfigError, DbConfig};
pub use error::{Constraint, DbError, DbResult, ErrorKind};
pub use password::{PasswordConfig, PasswordHasher};
pub use pool::Database;

// Repository re-exports for convenience
pub use repository::{Repository, TarjetaRepository, TemaRepository, UsuarioRepository};
