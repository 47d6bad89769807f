//! # Usuario Repository
//!
//! Database operations for users.
//!
//! ## Password Storage
//! ```text
//! create(NewUsuario { contrasena: "securepassword", .. })
//!      │
//!      ├── validate payload
//!      ├── PasswordHasher::hash  → "$argon2id$..."
//!      ▼
//! INSERT INTO Usuario (..., contrasena) VALUES (..., "$argon2id$...")
//! ```
//!
//! The plain text never reaches the database or the logs. `update` only
//! touches the name and email; the stored hash is left as is.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::password::PasswordHasher;
use crate::repository::Repository;
use tarjetas_core::{NewUsuario, Usuario, UsuarioId, UsuarioUpdate};

/// Repository for user database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.usuarios();
///
/// let usuario = repo
///     .create(&NewUsuario::new("John Doe", "john.doe@example.com", "securepassword"))
///     .await?;
/// assert!(repo.verify_password(usuario.id_usuario, "securepassword").await?);
/// ```
#[derive(Debug, Clone)]
pub struct UsuarioRepository {
    pool: SqlitePool,
    hasher: PasswordHasher,
}

impl UsuarioRepository {
    /// Creates a new UsuarioRepository.
    pub fn new(pool: SqlitePool, hasher: PasswordHasher) -> Self {
        UsuarioRepository { pool, hasher }
    }

    /// Gets a user by email address.
    /// The match is exact; emails are stored as given.
    pub async fn get_by_email(&self, email: &str) -> DbResult<Usuario> {
        sqlx::query_as::<_, Usuario>(
            r#"
            SELECT id_usuario, nombre_usuario, email, contrasena
            FROM Usuario
            WHERE email = ?1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found(Self::ENTITY, email))
    }

    /// Checks a candidate password against the stored hash.
    ///
    /// ## Returns
    /// * `Ok(true)` - Password matches
    /// * `Ok(false)` - Password does not match
    /// * `Err(DbError::NotFound)` - No such user
    pub async fn verify_password(&self, id: UsuarioId, candidate: &str) -> DbResult<bool> {
        let stored: String =
            sqlx::query_scalar("SELECT contrasena FROM Usuario WHERE id_usuario = ?1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or_else(|| DbError::not_found(Self::ENTITY, id))?;

        let matches = self.hasher.verify(candidate, &stored).await?;
        debug!(id_usuario = %id, matches, "Verified password");
        Ok(matches)
    }

    /// Counts stored users.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM Usuario")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

impl Repository for UsuarioRepository {
    type Entity = Usuario;
    type Id = UsuarioId;
    type New = NewUsuario;
    type Changes = UsuarioUpdate;

    const ENTITY: &'static str = "Usuario";

    /// Inserts a user, storing an Argon2id hash of the password.
    ///
    /// ## Returns
    /// * `Ok(Usuario)` - Stored user with its generated id
    /// * `Err(DbError::ConstraintViolation)` - Email already registered
    async fn create(&self, input: &NewUsuario) -> DbResult<Usuario> {
        input.validate()?;
        debug!(email = %input.email, "Creating usuario");

        let hash = self.hasher.hash(&input.contrasena).await?;

        let usuario = sqlx::query_as::<_, Usuario>(
            r#"
            INSERT INTO Usuario (nombre_usuario, email, contrasena)
            VALUES (?1, ?2, ?3)
            RETURNING id_usuario, nombre_usuario, email, contrasena
            "#,
        )
        .bind(&input.nombre_usuario)
        .bind(&input.email)
        .bind(&hash)
        .fetch_one(&self.pool)
        .await?;

        debug!(id_usuario = %usuario.id_usuario, "Usuario created");
        Ok(usuario)
    }

    async fn get_by_id(&self, id: UsuarioId) -> DbResult<Usuario> {
        sqlx::query_as::<_, Usuario>(
            r#"
            SELECT id_usuario, nombre_usuario, email, contrasena
            FROM Usuario
            WHERE id_usuario = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found(Self::ENTITY, id))
    }

    /// Updates name and email. The password hash is not touched.
    async fn update(&self, changes: &UsuarioUpdate) -> DbResult<()> {
        changes.validate()?;
        debug!(id_usuario = %changes.id_usuario, "Updating usuario");

        let result = sqlx::query(
            r#"
            UPDATE Usuario SET
                nombre_usuario = ?2,
                email = ?3
            WHERE id_usuario = ?1
            "#,
        )
        .bind(changes.id_usuario)
        .bind(&changes.nombre_usuario)
        .bind(&changes.email)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(Self::ENTITY, changes.id_usuario));
        }

        Ok(())
    }

    async fn delete(&self, id: UsuarioId) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM Usuario WHERE id_usuario = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        debug!(id_usuario = %id, removed = result.rows_affected(), "Deleted usuario");
        Ok(())
    }

    async fn list(&self) -> DbResult<Vec<Usuario>> {
        let usuarios = sqlx::query_as::<_, Usuario>(
            r#"
            SELECT id_usuario, nombre_usuario, email, contrasena
            FROM Usuario
            ORDER BY id_usuario
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(usuarios)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
