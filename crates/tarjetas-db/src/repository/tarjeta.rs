//! # Tarjeta Repository
//!
//! Database operations for cards.
//!
//! `id_tema` must reference an existing Tema. The foreign key enforces it,
//! and a dangling reference surfaces as
//! `DbError::ConstraintViolation { constraint: Constraint::ForeignKey, .. }`.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::Repository;
use tarjetas_core::{NewTarjeta, Tarjeta, TarjetaId, TarjetaUpdate, TemaId};

/// Repository for card database operations.
#[derive(Debug, Clone)]
pub struct TarjetaRepository {
    pool: SqlitePool,
}

impl TarjetaRepository {
    /// Creates a new TarjetaRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TarjetaRepository { pool }
    }

    /// Lists the cards of one topic, ordered by id.
    ///
    /// An unknown topic yields an empty list, not an error.
    pub async fn list_by_tema(&self, id_tema: TemaId) -> DbResult<Vec<Tarjeta>> {
        debug!(id_tema = %id_tema, "Listing tarjetas by tema");

        let tarjetas = sqlx::query_as::<_, Tarjeta>(
            r#"
            SELECT id_tarjeta, pregunta, respuesta, opcion_a, opcion_b, opcion_c, id_tema
            FROM Tarjeta
            WHERE id_tema = ?1
            ORDER BY id_tarjeta
            "#,
        )
        .bind(id_tema)
        .fetch_all(&self.pool)
        .await?;

        Ok(tarjetas)
    }

    /// Counts stored cards.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM Tarjeta")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

impl Repository for TarjetaRepository {
    type Entity = Tarjeta;
    type Id = TarjetaId;
    type New = NewTarjeta;
    type Changes = TarjetaUpdate;

    const ENTITY: &'static str = "Tarjeta";

    /// Inserts a card.
    ///
    /// ## Returns
    /// * `Ok(Tarjeta)` - Stored card with its generated id
    /// * `Err(DbError::ConstraintViolation)` - `id_tema` does not exist
    async fn create(&self, input: &NewTarjeta) -> DbResult<Tarjeta> {
        input.validate()?;
        debug!(id_tema = %input.id_tema, "Creating tarjeta");

        let tarjeta = sqlx::query_as::<_, Tarjeta>(
            r#"
            INSERT INTO Tarjeta (pregunta, respuesta, opcion_a, opcion_b, opcion_c, id_tema)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            RETURNING id_tarjeta, pregunta, respuesta, opcion_a, opcion_b, opcion_c, id_tema
            "#,
        )
        .bind(&input.pregunta)
        .bind(&input.respuesta)
        .bind(&input.opcion_a)
        .bind(&input.opcion_b)
        .bind(&input.opcion_c)
        .bind(input.id_tema)
        .fetch_one(&self.pool)
        .await?;

        debug!(id_tarjeta = %tarjeta.id_tarjeta, "Tarjeta created");
        Ok(tarjeta)
    }

    async fn get_by_id(&self, id: TarjetaId) -> DbResult<Tarjeta> {
        sqlx::query_as::<_, Tarjeta>(
            r#"
            SELECT id_tarjeta, pregunta, respuesta, opcion_a, opcion_b, opcion_c, id_tema
            FROM Tarjeta
            WHERE id_tarjeta = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DbError::not_found(Self::ENTITY, id))
    }

    /// Overwrites every mutable column, including the topic.
    async fn update(&self, changes: &TarjetaUpdate) -> DbResult<()> {
        changes.validate()?;
        debug!(id_tarjeta = %changes.id_tarjeta, "Updating tarjeta");

        let result = sqlx::query(
            r#"
            UPDATE Tarjeta SET
                pregunta = ?2,
                respuesta = ?3,
                opcion_a = ?4,
                opcion_b = ?5,
                opcion_c = ?6,
                id_tema = ?7
            WHERE id_tarjeta = ?1
            "#,
        )
        .bind(changes.id_tarjeta)
        .bind(&changes.pregunta)
        .bind(&changes.respuesta)
        .bind(&changes.opcion_a)
        .bind(&changes.opcion_b)
        .bind(&changes.opcion_c)
        .bind(changes.id_tema)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(Self::ENTITY, changes.id_tarjeta));
        }

        Ok(())
    }

    async fn delete(&self, id: TarjetaId) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM Tarjeta WHERE id_tarjeta = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        debug!(id_tarjeta = %id, removed = result.rows_affected(), "Deleted tarjeta");
        Ok(())
    }

    async fn list(&self) -> DbResult<Vec<Tarjeta>> {
        let tarjetas = sqlx::query_as::<_, Tarjeta>(
            r#"
            SELECT id_tarjeta, pregunta, respuesta, opcion_a, opcion_b, opcion_c, id_tema
            FROM Tarjeta
            ORDER BY id_tarjeta
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(tarjetas)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
