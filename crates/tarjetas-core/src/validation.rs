//! # Validation Module
//!
//! Input validation for the three entities.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Repository call (Rust)                                       │
//! │  └── THIS MODULE: length caps only                                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  ├── UNIQUE (Usuario.email)                                            │
//! │  └── Foreign key (Tarjeta.id_tema → Tema)                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Empty strings are legitimate values: a card may be stored with only a
//! question and an answer, and a user with no password. Anything the
//! schema accepts and that fits the caps is accepted here.
//!
//! Lengths are counted in characters, not bytes, so accented Spanish text
//! gets the same budget as ASCII.
//!
//! ## Usage
//! ```rust
//! use tarjetas_core::validation::{validate_email, validate_nombre_tema};
//!
//! assert!(validate_nombre_tema("Geografía").is_ok());
//! assert!(validate_email("a").is_ok());
//! assert!(validate_email(&"x".repeat(300)).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::{NewTarjeta, NewTema, NewUsuario, TarjetaUpdate, TemaUpdate, UsuarioUpdate};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Maximum length of user and topic names.
pub const MAX_NOMBRE_LEN: usize = 100;

/// Maximum length of an email address (RFC 5321 path limit).
pub const MAX_EMAIL_LEN: usize = 254;

/// Maximum length of a plain-text password before hashing.
pub const MAX_CONTRASENA_LEN: usize = 128;

/// Maximum length of card question, answer and option texts.
pub const MAX_TARJETA_TEXT_LEN: usize = 500;

// =============================================================================
// String Validators
// =============================================================================

fn max_chars(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates a user display name: at most [`MAX_NOMBRE_LEN`] characters.
pub fn validate_nombre_usuario(nombre: &str) -> ValidationResult<()> {
    max_chars("nombre_usuario", nombre, MAX_NOMBRE_LEN)
}

/// Validates an email address.
///
/// The value is stored as given; only its length is capped. Uniqueness is
/// enforced by the `Usuario.email` index.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    max_chars("email", email, MAX_EMAIL_LEN)
}

/// Validates a plain-text password before it is hashed.
///
/// An empty password is allowed and hashed like any other.
pub fn validate_contrasena(contrasena: &str) -> ValidationResult<()> {
    max_chars("contrasena", contrasena, MAX_CONTRASENA_LEN)
}

/// Validates a topic label.
pub fn validate_nombre_tema(nombre: &str) -> ValidationResult<()> {
    max_chars("nombre_tema", nombre, MAX_NOMBRE_LEN)
}

/// Validates one of the card texts (question, answer or option).
///
/// ## Example
/// ```rust
/// use tarjetas_core::validation::validate_tarjeta_text;
///
/// assert!(validate_tarjeta_text("pregunta", "¿Cuál es la capital de Francia?").is_ok());
/// assert!(validate_tarjeta_text("opcion_a", "").is_ok());
/// assert!(validate_tarjeta_text("opcion_a", &"x".repeat(501)).is_err());
/// ```
pub fn validate_tarjeta_text(field: &str, value: &str) -> ValidationResult<()> {
    max_chars(field, value, MAX_TARJETA_TEXT_LEN)
}

// =============================================================================
// Payload Validation
// =============================================================================
//
// Keys are not checked here: an unknown primary key surfaces as NotFound
// and an unknown id_tema as a foreign key violation.

impl NewUsuario {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_nombre_usuario(&self.nombre_usuario)?;
        validate_email(&self.email)?;
        validate_contrasena(&self.contrasena)
    }
}

impl UsuarioUpdate {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_nombre_usuario(&self.nombre_usuario)?;
        validate_email(&self.email)
    }
}

impl NewTema {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_nombre_tema(&self.nombre_tema)
    }
}

impl TemaUpdate {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_nombre_tema(&self.nombre_tema)
    }
}

fn validate_card_fields(
    pregunta: &str,
    respuesta: &str,
    opciones: [&str; 3],
) -> ValidationResult<()> {
    validate_tarjeta_text("pregunta", pregunta)?;
    validate_tarjeta_text("respuesta", respuesta)?;
    for (field, value) in ["opcion_a", "opcion_b", "opcion_c"].into_iter().zip(opciones) {
        validate_tarjeta_text(field, value)?;
    }
    Ok(())
}

impl NewTarjeta {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_card_fields(
            &self.pregunta,
            &self.respuesta,
            [self.opcion_a.as_str(), self.opcion_b.as_str(), self.opcion_c.as_str()],
        )
    }
}

impl TarjetaUpdate {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_card_fields(
            &self.pregunta,
            &self.respuesta,
            [self.opcion_a.as_str(), self.opcion_b.as_str(), self.opcion_c.as_str()],
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
