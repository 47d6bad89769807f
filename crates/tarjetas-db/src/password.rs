//! # Password Hashing
//!
//! Argon2id hashing for `Usuario.contrasena`.
//!
//! ```text
//! NewUsuario.contrasena ("securepassword")
//!      │
//!      ▼  PasswordHasher::hash (spawn_blocking, random salt)
//! "$argon2id$v=19$m=19456,t=2,p=1$<salt>$<hash>"  ← stored in the row
//!      │
//!      ▼  PasswordHasher::verify(candidate, stored)
//! true / false
//! ```
//!
//! Hashing is CPU-bound, so it runs on tokio's blocking pool instead of the
//! async worker threads.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, SaltString};
use argon2::{Algorithm, Argon2, Params, PasswordHasher as _, PasswordVerifier, Version};

use crate::error::{DbError, DbResult};

/// Argon2 cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordConfig {
    /// Memory cost in KiB.
    pub memory_kib: u32,
    /// Number of passes.
    pub iterations: u32,
    /// Degree of parallelism.
    pub parallelism: u32,
}

impl Default for PasswordConfig {
    /// The argon2 crate's recommended defaults (19 MiB, 2 passes, 1 lane).
    fn default() -> Self {
        PasswordConfig {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

impl PasswordConfig {
    /// Minimal cost, for in-memory test databases only.
    pub fn low_cost() -> Self {
        PasswordConfig {
            memory_kib: Params::MIN_M_COST,
            iterations: Params::MIN_T_COST,
            parallelism: Params::MIN_P_COST,
        }
    }
}

/// Hashes and verifies passwords with a fixed set of Argon2id parameters.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    /// Builds a hasher, rejecting parameter combinations Argon2 refuses.
    pub fn new(config: PasswordConfig) -> DbResult<Self> {
        let params = Params::new(config.memory_kib, config.iterations, config.parallelism, None)
            .map_err(|e| DbError::Internal(format!("Invalid Argon2 parameters: {}", e)))?;
        Ok(PasswordHasher { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hashes `password` with a fresh random salt, returning a PHC string.
    pub async fn hash(&self, password: &str) -> DbResult<String> {
        let argon2 = self.argon2();
        let password = password.to_owned();

        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            argon2
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|e| DbError::Internal(format!("Failed to hash password: {}", e)))
        })
        .await
        .map_err(|e| DbError::Internal(format!("Hashing task failed: {}", e)))?
    }

    /// Checks `candidate` against a stored PHC string.
    ///
    /// Returns `false` for malformed hashes instead of erroring: a row that
    /// cannot be parsed cannot authenticate anyone.
    pub async fn verify(&self, candidate: &str, stored: &str) -> DbResult<bool> {
        let argon2 = self.argon2();
        let candidate = candidate.to_owned();
        let stored = stored.to_owned();

        tokio::task::spawn_blocking(move || {
            let parsed = match PasswordHash::new(&stored) {
                Ok(h) => h,
                Err(_) => return false,
            };
            argon2
                .verify_password(candidate.as_bytes(), &parsed)
                .is_ok()
        })
        .await
        .map_err(|e| DbError::Internal(format!("Verification task failed: {}", e)))
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        PasswordHasher {
            params: Params::default(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> PasswordHasher {
        PasswordHasher::new(PasswordConfig::low_cost()).unwrap()
    }

    #[tokio::test]
    async fn test_hash_then_verify() {
        let hasher = hasher();
        let hash = hasher.hash("securepassword").await.unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains("securepassword"));
        assert!(hasher.verify("securepassword", &hash).await.unwrap());
        assert!(!hasher.verify("wrongpassword", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_hashes_are_salted() {
        let hasher = hasher();
        let first = hasher.hash("same").await.unwrap();
        let second = hasher.hash("same").await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_malformed_hash_never_verifies() {
        // Plain-text rows from before hashing must not authenticate
        assert!(!hasher().verify("securepassword", "securepassword").await.unwrap());
    }

    #[test]
    fn test_invalid_params_rejected() {
        let config = PasswordConfig {
            memory_kib: 1,
            iterations: 1,
            parallelism: 1,
        };
        assert!(PasswordHasher::new(config).is_err());
    }
}
