// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractor for authenticated users.
//!
//! Use the `Auth` extractor in handlers to require authentication:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(user): Auth) -> impl IntoResponse {
//!     // user is AuthenticatedUser
//! }
//! ```

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

use super::{AuthError, AuthenticatedUser};
use crate::state::AppState;

const BEARER_SCHEME: &str = "Bearer";

/// Extract the bearer token from an `Authorization` header.
///
/// The scheme is matched case-insensitively. A missing header or an empty
/// `Bearer` value counts as no token at all.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::InvalidAuthHeader)?
        .trim();

    let (scheme, token) = value.split_once(' ').unwrap_or((value, ""));

    if !scheme.is_empty() && !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return Err(AuthError::InvalidAuthHeader);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }

    Ok(token)
}

/// Extractor for authenticated users.
///
/// Reads the identity the auth middleware attached to the request. Routes
/// mounted without the middleware fall back to verifying the header here.
///
/// # Example
///
/// ```rust,ignore
/// async fn list_courses(
///     Auth(user): Auth,
///     State(state): State<AppState>,
/// ) -> Json<Vec<Course>> {
///     // user.user_id is the caller
/// }
/// ```
pub struct Auth(pub AuthenticatedUser);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        // First check if middleware already set the user
        if let Some(user) = parts.extensions.get::<AuthenticatedUser>().cloned() {
            return Ok(Auth(user));
        }

        let token = bearer_token(&parts.headers)?;
        let user = state.accounts.authenticate(token)?;

        Ok(Auth(user))
    }
}
