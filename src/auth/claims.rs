// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token claims and authenticated user representation.

use serde::{Deserialize, Serialize};

use super::AuthError;
use crate::models::{User, UserId};

/// Claims carried by a bearer token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    /// Subject: the user id as a decimal string
    pub sub: String,

    /// Email at issuance time
    pub email: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,
}

impl TokenClaims {
    /// Build claims for `user`, issued at `issued_at` and expiring `ttl_secs` later.
    pub fn for_user(user: &User, issued_at: i64, ttl_secs: i64) -> Result<Self, AuthError> {
        let exp = issued_at
            .checked_add(ttl_secs)
            .ok_or_else(|| AuthError::InternalError("token expiry out of range".into()))?;

        Ok(Self {
            sub: user.id.to_string(),
            email: user.email.clone(),
            iat: issued_at,
            exp,
        })
    }
}

/// Authenticated identity decoded from a verified token.
///
/// Inserted into request extensions by the auth middleware and read by
/// handlers through the `Auth` extractor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,

    pub email: String,

    /// Token expiration (Unix timestamp)
    #[serde(skip)]
    pub expires_at: i64,
}

impl AuthenticatedUser {
    /// Create from verified claims.
    pub fn from_claims(claims: TokenClaims) -> Result<Self, AuthError> {
        let user_id = claims
            .sub
            .parse::<UserId>()
            .map_err(|_| AuthError::MalformedToken)?;

        Ok(Self {
            user_id,
            email: claims.email,
            expires_at: claims.exp,
        })
    }
}
