//! # Repository Module
//!
//! Typed CRUD over the `Usuario`, `Tema` and `Tarjeta` tables.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One shape, three tables                              │
//! │                                                                         │
//! │  Caller                                                                │
//! │       │  db.tarjetas().get_by_id(TarjetaId(4))                         │
//! │       ▼                                                                 │
//! │  Repository (trait)                                                    │
//! │  ├── create(&New)        INSERT ... RETURNING   → Entity               │
//! │  ├── get_by_id(Id)       SELECT ... WHERE id    → Entity | NotFound    │
//! │  ├── update(&Changes)    UPDATE ... WHERE id    → () | NotFound        │
//! │  ├── delete(Id)          DELETE ... WHERE id    → () (even if absent)  │
//! │  └── list()              SELECT ... ORDER BY id → Vec<Entity>          │
//! │       │                                                                 │
//! │       ▼  exactly one round trip per call                               │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Repositories hold a pool handle and nothing else; no state survives
//! between calls. Each implementation keeps its SQL spelled out in full.
//!
//! ## Available Repositories
//!
//! - [`UsuarioRepository`] - Users, with Argon2id password storage
//! - [`TemaRepository`] - Topics
//! - [`TarjetaRepository`] - Cards, plus listing by topic

use std::fmt;

use crate::error::DbResult;

pub mod tarjeta;
pub mod tema;
pub mod usuario;

pub use tarjeta::TarjetaRepository;
pub use tema::TemaRepository;
pub use usuario::UsuarioRepository;

/// The five operations every entity supports.
///
/// ## Semantics
/// - `create` validates, inserts and returns the stored row with its
///   generated id.
/// - `get_by_id` fails with `DbError::NotFound` when no row matches.
/// - `update` returns nothing; re-fetch to observe the new state. Zero
///   matched rows is reported as `DbError::NotFound`.
/// - `delete` succeeds whether or not a row was removed.
/// - `list` returns every row ordered by primary key ascending.
#[allow(async_fn_in_trait)]
pub trait Repository {
    /// Stored record type.
    type Entity;
    /// Primary key type.
    type Id: Copy + fmt::Display;
    /// Insert payload.
    type New;
    /// Update payload (carries the id).
    type Changes;

    /// Entity name used in errors and logs.
    const ENTITY: &'static str;

    async fn create(&self, input: &Self::New) -> DbResult<Self::Entity>;

    async fn get_by_id(&self, id: Self::Id) -> DbResult<Self::Entity>;

    async fn update(&self, changes: &Self::Changes) -> DbResult<()>;

    async fn delete(&self, id: Self::Id) -> DbResult<()>;

    async fn list(&self) -> DbResult<Vec<Self::Entity>>;
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Constraint, DbError, ErrorKind};
    use crate::{Database, DbConfig};
    use std::sync::Mutex;
    use tarjetas_core::{
        NewTarjeta, NewTema, NewUsuario, Tarjeta, Tema, TemaId, TemaUpdate, Usuario,
    };

    /// Creates, re-fetches and lists through nothing but the trait.
    async fn create_and_fetch<R>(
        repo: &R,
        input: &R::New,
        id_of: impl Fn(&R::Entity) -> R::Id,
    ) -> DbResult<R::Entity>
    where
        R: Repository,
        R::Entity: PartialEq + fmt::Debug,
    {
        let created = repo.create(input).await?;
        let fetched = repo.get_by_id(id_of(&created)).await?;
        assert_eq!(fetched, created);
        assert!(repo.list().await?.contains(&created));
        Ok(fetched)
    }

    /// Vec-backed topic store with the same contract as the SQL one.
    #[derive(Default)]
    struct MemoryTemas {
        rows: Mutex<Vec<Tema>>,
    }

    impl Repository for MemoryTemas {
        type Entity = Tema;
        type Id = TemaId;
        type New = NewTema;
        type Changes = TemaUpdate;

        const ENTITY: &'static str = "Tema";

        async fn create(&self, input: &NewTema) -> DbResult<Tema> {
            input.validate()?;
            let mut rows = self.rows.lock().unwrap();
            let next = rows.last().map_or(1, |t| t.id_tema.get() + 1);
            let tema = Tema {
                id_tema: TemaId(next),
                nombre_tema: input.nombre_tema.clone(),
            };
            rows.push(tema.clone());
            Ok(tema)
        }

        async fn get_by_id(&self, id: TemaId) -> DbResult<Tema> {
            self.rows
                .lock()
                .unwrap()
                .iter()
                .find(|t| t.id_tema == id)
                .cloned()
                .ok_or_else(|| DbError::not_found(Self::ENTITY, id))
        }

        async fn update(&self, changes: &TemaUpdate) -> DbResult<()> {
            let mut rows = self.rows.lock().unwrap();
            let tema = rows
                .iter_mut()
                .find(|t| t.id_tema == changes.id_tema)
                .ok_or_else(|| DbError::not_found(Self::ENTITY, changes.id_tema))?;
            tema.nombre_tema = changes.nombre_tema.clone();
            Ok(())
        }

        async fn delete(&self, id: TemaId) -> DbResult<()> {
            self.rows.lock().unwrap().retain(|t| t.id_tema != id);
            Ok(())
        }

        async fn list(&self) -> DbResult<Vec<Tema>> {
            Ok(self.rows.lock().unwrap().clone())
        }
    }

    fn card(id_tema: TemaId, pregunta: &str) -> NewTarjeta {
        NewTarjeta {
            pregunta: pregunta.to_string(),
            respuesta: "París".to_string(),
            opcion_a: "Berlín".to_string(),
            opcion_b: "Madrid".to_string(),
            opcion_c: "París".to_string(),
            id_tema,
        }
    }

    #[tokio::test]
    async fn test_generic_helper_over_every_repository() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let usuario = create_and_fetch(
            &db.usuarios(),
            &NewUsuario::new("John Doe", "john.doe@example.com", "securepassword"),
            |u: &Usuario| u.id_usuario,
        )
        .await
        .unwrap();
        assert_eq!(usuario.email, "john.doe@example.com");

        let tema = create_and_fetch(&db.temas(), &NewTema::new("Tema A"), |t: &Tema| t.id_tema)
            .await
            .unwrap();

        let tarjeta: Tarjeta = create_and_fetch(
            &db.tarjetas(),
            &card(tema.id_tema, "¿Cuál es la capital de Francia?"),
            |t: &Tarjeta| t.id_tarjeta,
        )
        .await
        .unwrap();
        assert_eq!(tarjeta.id_tema, tema.id_tema);
    }

    #[tokio::test]
    async fn test_generic_helper_over_test_double() {
        let repo = MemoryTemas::default();

        let first = create_and_fetch(&repo, &NewTema::new("Uno"), |t: &Tema| t.id_tema)
            .await
            .unwrap();
        let second = create_and_fetch(&repo, &NewTema::new("Dos"), |t: &Tema| t.id_tema)
            .await
            .unwrap();
        assert!(second.id_tema > first.id_tema);

        repo.delete(first.id_tema).await.unwrap();
        repo.delete(first.id_tema).await.unwrap();
        assert!(repo.get_by_id(first.id_tema).await.unwrap_err().is_not_found());

        let err = repo
            .update(&TemaUpdate {
                id_tema: first.id_tema,
                nombre_tema: "Otra vez".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_card_lifecycle_under_topic() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let tema = db.temas().create(&NewTema::new("Tema A")).await.unwrap();
        let tarjeta = db
            .tarjetas()
            .create(&card(tema.id_tema, "¿Cuál es la capital de Francia?"))
            .await
            .unwrap();

        let fetched = db.tarjetas().get_by_id(tarjeta.id_tarjeta).await.unwrap();
        assert_eq!(fetched.pregunta, "¿Cuál es la capital de Francia?");
        assert!(fetched.is_correct("París"));

        db.tarjetas().delete(tarjeta.id_tarjeta).await.unwrap();
        let err = db.tarjetas().get_by_id(tarjeta.id_tarjeta).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_topic_with_cards_cannot_be_deleted() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let tema = db.temas().create(&NewTema::new("Capitales")).await.unwrap();
        let first = db
            .tarjetas()
            .create(&card(tema.id_tema, "Pregunta 1"))
            .await
            .unwrap();
        let second = db
            .tarjetas()
            .create(&card(tema.id_tema, "Pregunta 2"))
            .await
            .unwrap();

        let err = db.temas().delete(tema.id_tema).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConstraintViolation);
        assert_eq!(err.constraint(), Some(Constraint::ForeignKey));
        assert!(db.temas().get_by_id(tema.id_tema).await.is_ok());

        db.tarjetas().delete(first.id_tarjeta).await.unwrap();
        db.tarjetas().delete(second.id_tarjeta).await.unwrap();
        db.temas().delete(tema.id_tema).await.unwrap();

        assert!(db
            .temas()
            .get_by_id(tema.id_tema)
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn test_concurrent_creates_get_distinct_ids() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let handles: Vec<_> = (0..8)
            .map(|n| {
                let repo = db.temas();
                tokio::spawn(async move { repo.create(&NewTema::new(format!("Tema {n}"))).await })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().unwrap().id_tema);
        }
        ids.sort();
        ids.dedup();

        assert_eq!(ids.len(), 8);
        assert_eq!(db.temas().count().await.unwrap(), 8);
    }
}
