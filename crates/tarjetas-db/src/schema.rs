//! # Schema Bootstrap
//!
//! The three tables the repositories read and write.
//!
//! ```text
//! ┌──────────────────┐     ┌──────────────┐      ┌──────────────────────┐
//! │ Usuario          │     │ Tema         │      │ Tarjeta              │
//! │ id_usuario  PK   │     │ id_tema  PK  │◄─────│ id_tema  FK RESTRICT │
//! │ nombre_usuario   │     │ nombre_tema  │      │ id_tarjeta  PK       │
//! │ email   UNIQUE   │     └──────────────┘      │ pregunta, respuesta  │
//! │ contrasena (hash)│                           │ opcion_a/b/c         │
//! └──────────────────┘                           └──────────────────────┘
//! ```
//!
//! Every statement is `IF NOT EXISTS`, so applying the schema to an existing
//! database is a no-op. There is no version table: changing a table means
//! changing it here and recreating the database.
//!
//! `AUTOINCREMENT` keeps SQLite from reusing the key of a deleted row, so a
//! deleted id stays NotFound forever. `ON DELETE RESTRICT` stops a Tema from
//! being removed while Tarjetas still point at it.

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

/// DDL statements, in dependency order.
pub const STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS Usuario (
        id_usuario     INTEGER PRIMARY KEY AUTOINCREMENT,
        nombre_usuario TEXT NOT NULL,
        email          TEXT NOT NULL UNIQUE,
        contrasena     TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS Tema (
        id_tema     INTEGER PRIMARY KEY AUTOINCREMENT,
        nombre_tema TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS Tarjeta (
        id_tarjeta INTEGER PRIMARY KEY AUTOINCREMENT,
        pregunta   TEXT NOT NULL,
        respuesta  TEXT NOT NULL,
        opcion_a   TEXT NOT NULL,
        opcion_b   TEXT NOT NULL,
        opcion_c   TEXT NOT NULL,
        id_tema    INTEGER NOT NULL REFERENCES Tema(id_tema) ON DELETE RESTRICT
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_tarjeta_tema ON Tarjeta(id_tema)",
];

/// Applies every statement in [`STATEMENTS`].
///
/// Idempotent: safe to run on every startup.
pub async fn apply(pool: &SqlitePool) -> DbResult<()> {
    info!(statements = STATEMENTS.len(), "Applying schema");

    for statement in STATEMENTS {
        sqlx::query(*statement).execute(pool).await?;
    }

    Ok(())
}

/// Names of the user tables currently present, sorted.
pub async fn table_names(pool: &SqlitePool) -> DbResult<Vec<String>> {
    let names: Vec<String> = sqlx::query_scalar(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
    )
    .fetch_all(pool)
    .await?;

    Ok(names)
}
