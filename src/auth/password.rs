// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Salted one-way password hashing (Argon2id, PHC string format).

use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use ring::rand::{SecureRandom, SystemRandom};
use thiserror::Error;

/// Salt length in bytes.
pub const SALT_LEN: usize = 16;

/// Well-formed hash with default Argon2id parameters that matches no password.
/// Verified against when the account does not exist.
const DUMMY_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("random salt generation failed")]
    Rng,
    #[error("password hashing failed: {0}")]
    Hash(String),
}

/// Hashes and verifies passwords.
#[derive(Clone)]
pub struct PasswordService {
    argon2: Argon2<'static>,
    rng: SystemRandom,
}

impl Default for PasswordService {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordService {
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
            rng: SystemRandom::new(),
        }
    }

    /// Hash `password` with a fresh random salt.
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let mut salt = [0u8; SALT_LEN];
        self.rng.fill(&mut salt).map_err(|_| PasswordError::Rng)?;
        let salt = SaltString::encode_b64(&salt).map_err(|e| PasswordError::Hash(e.to_string()))?;

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::Hash(e.to_string()))
    }

    /// Check `password` against a stored PHC hash.
    ///
    /// Returns `Ok(false)` on mismatch; errors only on an unparseable hash.
    pub fn verify(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        let parsed = PasswordHash::new(stored_hash).map_err(|e| PasswordError::Hash(e.to_string()))?;

        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(PasswordError::Hash(e.to_string())),
        }
    }

    /// Run a full verification against a hash no password matches, discarding the result.
    pub fn verify_dummy(&self, password: &str) {
        if let Err(e) = self.verify(password, DUMMY_HASH) {
            tracing::warn!(error = %e, "dummy password verification failed");
        }
    }
}
