//! Password credential value object.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::{DomainError, DomainResult};

/// Password value object that guarantees hashing.
///
/// A plaintext credential only exists transiently inside [`Password::new`];
/// everything stored or passed around afterwards is the opaque hash.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

impl Password {
    /// Create from plaintext by hashing it. Field-level rules (length,
    /// character classes) belong to the inbound boundary, not here.
    pub fn new(plain: &str) -> DomainResult<Self> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(plain.as_bytes(), &salt)
            .map_err(|e| DomainError::password(format!("Failed to hash password: {}", e)))?
            .to_string();

        Ok(Self { hash })
    }

    /// Create from an existing hash (e.g., loaded from the database).
    pub fn from_hash(hash: String) -> Self {
        Self { hash }
    }

    /// Get the hash string.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Consume and return the hash.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plaintext password against this hash.
    pub fn verify(&self, plain: &str) -> bool {
        PasswordHash::new(&self.hash)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(plain.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Password(***)")
    }
}
