// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bearer token issuance and verification.
//!
//! ## Security
//!
//! - Tokens are HS256 JWTs signed with the configured `JWT_SECRET`
//! - Tokens are stateless; validity is signature plus expiry only
//! - No clock skew leeway: a token is rejected as soon as `exp` passes
//! - There is no revocation list

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::claims::{AuthenticatedUser, TokenClaims};
use super::error::AuthError;
use crate::models::User;

/// Signing and verification keys plus the token lifetime.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl std::fmt::Debug for TokenKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenKeys")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenKeys {
    /// Create keys from a shared HMAC secret.
    pub fn from_secret(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    /// Token lifetime.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `user` that expires one TTL from now.
    pub fn issue(&self, user: &User) -> Result<String, AuthError> {
        self.issue_at(user, Utc::now().timestamp())
    }

    /// Issue a token as if it had been created at `issued_at` (Unix seconds).
    pub fn issue_at(&self, user: &User, issued_at: i64) -> Result<String, AuthError> {
        let ttl_secs = i64::try_from(self.ttl.as_secs())
            .map_err(|_| AuthError::InternalError("token ttl out of range".into()))?;
        let claims = TokenClaims::for_user(user, issued_at, ttl_secs)?;

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::InternalError(e.to_string()))
    }

    /// Verify signature and expiry, returning the encoded identity.
    pub fn verify(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let token_data =
            decode::<TokenClaims>(token, &self.decoding, &validation).map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                _ => AuthError::MalformedToken,
            })?;

        AuthenticatedUser::from_claims(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

    const DAY: Duration = Duration::from_secs(24 * 3600);

    fn keys() -> TokenKeys {
        TokenKeys::from_secret(b"test-secret", DAY)
    }

    fn alice() -> User {
        User {
            id: 1,
            name: "Alice".into(),
            email: "a@x.com".into(),
            password_hash: String::new(),
        }
    }

    #[test]
    fn issued_token_verifies() {
        let keys = keys();
        let token = keys.issue(&alice()).unwrap();
        let user = keys.verify(&token).unwrap();
        assert_eq!(user.user_id, 1);
        assert_eq!(user.email, "a@x.com");
    }

    #[test]
    fn token_within_window_verifies() {
        let keys = keys();
        let issued_at = Utc::now().timestamp() - 23 * 3600;
        let token = keys.issue_at(&alice(), issued_at).unwrap();
        assert!(keys.verify(&token).is_ok());
    }

    #[test]
    fn token_older_than_a_day_is_expired() {
        let keys = keys();
        let issued_at = Utc::now().timestamp() - 25 * 3600;
        let token = keys.issue_at(&alice(), issued_at).unwrap();
        assert_eq!(keys.verify(&token), Err(AuthError::TokenExpired));
    }

    #[test]
    fn token_from_another_secret_is_rejected() {
        let other = TokenKeys::from_secret(b"other-secret", DAY);
        let token = other.issue(&alice()).unwrap();
        assert_eq!(keys().verify(&token), Err(AuthError::InvalidSignature));
    }

    #[test]
    fn garbage_is_malformed() {
        assert_eq!(keys().verify("not-a-token"), Err(AuthError::MalformedToken));
        assert_eq!(keys().verify(""), Err(AuthError::MalformedToken));
    }

    #[test]
    fn oversized_ttl_fails_to_issue() {
        let keys = TokenKeys::from_secret(b"test-secret", Duration::from_secs(2_562_047_788_015_215 * 3600));
        assert!(matches!(keys.issue(&alice()), Err(AuthError::InternalError(_))));
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let keys = keys();
        let token = keys.issue(&alice()).unwrap();
        let parts: Vec<&str> = token.split('.').collect();

        let forged_claims = format!(
            r#"{{"sub":"2","email":"b@x.com","iat":{},"exp":9999999999}}"#,
            Utc::now().timestamp()
        );
        let forged = format!(
            "{}.{}.{}",
            parts[0],
            URL_SAFE_NO_PAD.encode(forged_claims.as_bytes()),
            parts[2]
        );

        assert_eq!(keys.verify(&forged), Err(AuthError::InvalidSignature));
    }
}
