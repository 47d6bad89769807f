//! # Domain Types
//!
//! Records and input payloads for the three stored entities.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Usuario      │   │      Tema       │   │    Tarjeta      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id_usuario     │   │  id_tema    ◄───┼───┤  id_tema (FK)   │       │
//! │  │  nombre_usuario │   │  nombre_tema    │   │  pregunta       │       │
//! │  │  email          │   └─────────────────┘   │  respuesta      │       │
//! │  │  contrasena_hash│                         │  opcion_a/b/c   │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Record vs. Input
//! Each entity has a record type (what a row looks like, id included), a
//! `New*` payload for inserts (no id, the database generates it) and a
//! `*Update` payload carrying the id plus the mutable fields.

use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// Identifiers
// =============================================================================

macro_rules! id_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        #[cfg_attr(feature = "sqlx", derive(sqlx::Type), sqlx(transparent))]
        pub struct $name(pub i64);

        impl $name {
            /// Returns the raw integer key.
            #[inline]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                $name(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(
    /// Primary key of a [`Usuario`] row.
    UsuarioId
);
id_newtype!(
    /// Primary key of a [`Tema`] row.
    TemaId
);
id_newtype!(
    /// Primary key of a [`Tarjeta`] row.
    TarjetaId
);

// =============================================================================
// Usuario
// =============================================================================

/// A registered user.
///
/// The password column holds an Argon2id PHC string, never the plain text.
/// It is skipped when serializing and redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Usuario {
    pub id_usuario: UsuarioId,
    pub nombre_usuario: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "contrasena"))]
    pub contrasena_hash: String,
}

impl fmt::Debug for Usuario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Usuario")
            .field("id_usuario", &self.id_usuario)
            .field("nombre_usuario", &self.nombre_usuario)
            .field("email", &self.email)
            .field("contrasena_hash", &"<redacted>")
            .finish()
    }
}

/// Payload for creating a user. `contrasena` is plain text here and is
/// hashed by the repository before it is stored.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct NewUsuario {
    pub nombre_usuario: String,
    pub email: String,
    pub contrasena: String,
}

impl NewUsuario {
    pub fn new(
        nombre_usuario: impl Into<String>,
        email: impl Into<String>,
        contrasena: impl Into<String>,
    ) -> Self {
        NewUsuario {
            nombre_usuario: nombre_usuario.into(),
            email: email.into(),
            contrasena: contrasena.into(),
        }
    }
}

impl fmt::Debug for NewUsuario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUsuario")
            .field("nombre_usuario", &self.nombre_usuario)
            .field("email", &self.email)
            .field("contrasena", &"<redacted>")
            .finish()
    }
}

/// Mutable user fields. The password is not part of an update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsuarioUpdate {
    pub id_usuario: UsuarioId,
    pub nombre_usuario: String,
    pub email: String,
}

// =============================================================================
// Tema
// =============================================================================

/// A topic that groups cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Tema {
    pub id_tema: TemaId,
    pub nombre_tema: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTema {
    pub nombre_tema: String,
}

impl NewTema {
    pub fn new(nombre_tema: impl Into<String>) -> Self {
        NewTema {
            nombre_tema: nombre_tema.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemaUpdate {
    pub id_tema: TemaId,
    pub nombre_tema: String,
}

// =============================================================================
// Tarjeta
// =============================================================================

/// A multiple-choice card belonging to a [`Tema`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Tarjeta {
    pub id_tarjeta: TarjetaId,
    pub pregunta: String,
    pub respuesta: String,
    pub opcion_a: String,
    pub opcion_b: String,
    pub opcion_c: String,
    pub id_tema: TemaId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTarjeta {
    pub pregunta: String,
    pub respuesta: String,
    pub opcion_a: String,
    pub opcion_b: String,
    pub opcion_c: String,
    pub id_tema: TemaId,
}

/// Replacement values for every mutable card column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TarjetaUpdate {
    pub id_tarjeta: TarjetaId,
    pub pregunta: String,
    pub respuesta: String,
    pub opcion_a: String,
    pub opcion_b: String,
    pub opcion_c: String,
    pub id_tema: TemaId,
}

impl TarjetaUpdate {
    /// Starts an update from the current state of a card, so callers only
    /// overwrite the fields they mean to change.
    pub fn from_existing(tarjeta: &Tarjeta) -> Self {
        TarjetaUpdate {
            id_tarjeta: tarjeta.id_tarjeta,
            pregunta: tarjeta.pregunta.clone(),
            respuesta: tarjeta.respuesta.clone(),
            opcion_a: tarjeta.opcion_a.clone(),
            opcion_b: tarjeta.opcion_b.clone(),
            opcion_c: tarjeta.opcion_c.clone(),
            id_tema: tarjeta.id_tema,
        }
    }
}

impl Tarjeta {
    /// Whether `candidate` is the stored answer (exact match).
    pub fn is_correct(&self, candidate: &str) -> bool {
        self.respuesta == candidate
    }

    /// The three answer choices in display order.
    pub fn opciones(&self) -> [&str; 3] {
        [self.opcion_a.as_str(), self.opcion_b.as_str(), self.opcion_c.as_str()]
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
