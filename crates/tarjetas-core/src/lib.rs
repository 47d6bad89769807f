//! # tarjetas-core: Domain Types for the Flashcard Store
//!
//! Records, input payloads and validation rules for users, topics and
//! multiple-choice cards. No I/O lives here.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tarjetas Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               ★ tarjetas-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────────┐  ┌───────────────┐  ┌──────────────┐   │   │
//! │  │   │      types        │  │  validation   │  │    error     │   │   │
//! │  │   │ Usuario Tema      │  │  field rules  │  │ Validation-  │   │   │
//! │  │   │ Tarjeta + ids     │  │  per payload  │  │ Error        │   │   │
//! │  │   └───────────────────┘  └───────────────┘  └──────────────┘   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 tarjetas-db (Repository Layer)                  │   │
//! │  │         SQLite queries, schema bootstrap, password hashing      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Usuario, Tema, Tarjeta and their id newtypes
//! - [`validation`] - Field rules applied before every write
//! - [`error`] - Validation error type
//!
//! ## Example Usage
//!
//! ```rust
//! use tarjetas_core::{NewTarjeta, TemaId};
//!
//! let tarjeta = NewTarjeta {
//!     pregunta: "¿Cuál es la capital de Francia?".to_string(),
//!     respuesta: "París".to_string(),
//!     opcion_a: "Berlín".to_string(),
//!     opcion_b: "Madrid".to_string(),
//!     opcion_c: "París".to_string(),
//!     id_tema: TemaId(1),
//! };
//!
//! assert!(tarjeta.validate().is_ok());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::ValidationError;
pub use types::*;
