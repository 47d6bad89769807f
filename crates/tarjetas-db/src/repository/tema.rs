//! # Tema Repository
//!
//! Database operations for topics.
//!
//! Deleting a topic that still has cards is refused by the foreign key
//! (`ON DELETE RESTRICT`) and surfaces as a `ConstraintViolation`; remove or
//! move the cards first.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::repository::Repository;
use tarjetas_core::{NewTema, Tema, TemaId, TemaUpdate};

/// Repository for topic database operations.
#[derive(Debug, Clone)]
pub struct TemaRepository {
    pool: SqlitePool,
}

impl TemaRepository {
    /// Creates a new TemaRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TemaRepository { pool }
    }

    /// Counts stored topics.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM Tema")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

impl Repository for TemaRepository {
    type Entity = Tema;
    type Id = TemaId;
    type New = NewTema;
    type Changes = TemaUpdate;

    const ENTITY: &'static str = "Tema";

    async fn create(&self, input: &NewTema) -> DbResult<Tema> {
        input.validate()?;
        debug!(nombre_tema = %input.nombre_tema, "Creating tema");

        let tema = sqlx::query_as::<_, Tema>(
            r#"
            INSERT INTO Tema (nombre_tema)
            VALUES (?1)
            RETURNING id_tema, nombre_tema
            "#,
        )
        .bind(&input.nombre_tema)
        .fetch_one(&self.pool)
        .await?;

        debug!(id_tema = %tema.id_tema, "Tema created");
        Ok(tema)
    }

    async fn get_by_id(&self, id: TemaId) -> DbResult<Tema> {
        sqlx::query_as::<_, Tema>("SELECT id_tema, nombre_tema FROM Tema WHERE id_tema = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::not_found(Self::ENTITY, id))
    }

    async fn update(&self, changes: &TemaUpdate) -> DbResult<()> {
        changes.validate()?;
        debug!(id_tema = %changes.id_tema, "Updating tema");

        let result = sqlx::query("UPDATE Tema SET nombre_tema = ?2 WHERE id_tema = ?1")
            .bind(changes.id_tema)
            .bind(&changes.nombre_tema)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(Self::ENTITY, changes.id_tema));
        }

        Ok(())
    }

    async fn delete(&self, id: TemaId) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM Tema WHERE id_tema = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        debug!(id_tema = %id, removed = result.rows_affected(), "Deleted tema");
        Ok(())
    }

    async fn list(&self) -> DbResult<Vec<Tema>> {
        let temas =
            sqlx::query_as::<_, Tema>("SELECT id_tema, nombre_tema FROM Tema ORDER BY id_tema")
                .fetch_all(&self.pool)
                .await?;

        Ok(temas)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::{Database, DbConfig};

    async fn repo() -> TemaRepository {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.temas()
    }

    #[tokio::test]
    async fn test_create_tema() {
        let repo = repo().await;

        let tema = repo.create(&NewTema::new("PRUEBA 1")).await.unwrap();

        assert_ne!(tema.id_tema.get(), 0);
        assert_eq!(tema.nombre_tema, "PRUEBA 1");
    }

    #[tokio::test]
    async fn test_get_tema_by_id() {
        let repo = repo().await;
        let created = repo.create(&NewTema::new("PRUEBA 2")).await.unwrap();

        let fetched = repo.get_by_id(created.id_tema).await.unwrap();

        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_update_tema() {
        let repo = repo().await;
        let created = repo.create(&NewTema::new("PRUEBA 3")).await.unwrap();

        repo.update(&TemaUpdate {
            id_tema: created.id_tema,
            nombre_tema: "PRUEBA 3 ACTUALIZADO".to_string(),
        })
        .await
        .unwrap();

        let updated = repo.get_by_id(created.id_tema).await.unwrap();
        assert_eq!(updated.nombre_tema, "PRUEBA 3 ACTUALIZADO");
    }

    #[tokio::test]
    async fn test_update_missing_tema_is_not_found() {
        let repo = repo().await;

        let err = repo
            .update(&TemaUpdate {
                id_tema: TemaId(999),
                nombre_tema: "Nadie".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_delete_tema() {
        let repo = repo().await;
        let created = repo.create(&NewTema::new("PRUEBA 4")).await.unwrap();

        repo.delete(created.id_tema).await.unwrap();

        let err = repo.get_by_id(created.id_tema).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), format!("Tema not found: {}", created.id_tema));
    }

    #[tokio::test]
    async fn test_delete_missing_tema_is_ok() {
        let repo = repo().await;
        repo.delete(TemaId(12345)).await.unwrap();
    }

    #[tokio::test]
    async fn test_list_temas_in_insertion_order() {
        let repo = repo().await;
        let nombres = ["Tema A", "Tema B", "Tema C"];
        for nombre in nombres {
            repo.create(&NewTema::new(nombre)).await.unwrap();
        }

        let temas = repo.list().await.unwrap();

        assert_eq!(temas.len(), nombres.len());
        for (tema, nombre) in temas.iter().zip(nombres) {
            assert_eq!(tema.nombre_tema, nombre);
        }
        assert!(temas.windows(2).all(|w| w[0].id_tema < w[1].id_tema));
        assert_eq!(repo.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_empty_name_is_stored() {
        let repo = repo().await;

        let tema = repo.create(&NewTema::new("")).await.unwrap();

        assert_eq!(repo.get_by_id(tema.id_tema).await.unwrap().nombre_tema, "");
    }

    #[tokio::test]
    async fn test_overlong_name_rejected_before_insert() {
        let repo = repo().await;

        let err = repo.create(&NewTema::new("t".repeat(101))).await.unwrap_err();

        assert!(matches!(err, DbError::Validation(_)));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_with_non_positive_id_is_not_found() {
        let repo = repo().await;

        let err = repo
            .update(&TemaUpdate {
                id_tema: TemaId(0),
                nombre_tema: "Cero".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
