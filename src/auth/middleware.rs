// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication middleware for Axum.
//!
//! Applied to every protected router subtree:
//!
//! ```rust,ignore
//! let protected = Router::new()
//!     .route("/courses", get(list_courses))
//!     .route_layer(axum::middleware::from_fn_with_state(state.clone(), require_auth));
//! ```
//!
//! - no bearer token → 401
//! - token present but invalid or expired → 403
//! - otherwise the decoded [`AuthenticatedUser`] is inserted into the
//!   request extensions for downstream handlers

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::extractor::bearer_token;
use super::AuthenticatedUser;
use crate::state::AppState;

/// Authentication middleware function.
pub async fn require_auth(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let identity: Result<AuthenticatedUser, _> =
        bearer_token(request.headers()).and_then(|token| state.accounts.authenticate(token));

    match identity {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => {
            tracing::debug!(
                path = %request.uri().path(),
                error_code = e.error_code(),
                "request rejected by auth middleware"
            );
            e.into_response()
        }
    }
}
