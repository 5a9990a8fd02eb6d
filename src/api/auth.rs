// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Signup, login and token verification endpoints.

use axum::{extract::State, http::StatusCode, Json};

use super::ApiJson;
use crate::{
    auth::{AccountError, Auth},
    models::{AuthResponse, ErrorResponse, LoginRequest, SignupRequest, VerifyResponse},
    state::AppState,
};

/// Register a new user and return a bearer token.
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignupRequest,
    tag = "Auth",
    responses(
        (status = 201, description = "User created", body = AuthResponse),
        (status = 400, description = "Missing fields or email already registered", body = ErrorResponse),
        (status = 500, description = "Server error", body = ErrorResponse)
    )
)]
pub async fn signup(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AccountError> {
    let response = state.accounts.signup(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Exchange email and password for a fresh bearer token.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    tag = "Auth",
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Missing fields", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Server error", body = ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<AuthResponse>, AccountError> {
    let response = state.accounts.login(request).await?;
    Ok(Json(response))
}

/// Confirm the caller's token and return their profile.
#[utoipa::path(
    get,
    path = "/api/auth/verify",
    tag = "Auth",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Token is valid", body = VerifyResponse),
        (status = 401, description = "Access token required", body = ErrorResponse),
        (status = 403, description = "Invalid or expired token", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn verify(
    Auth(identity): Auth,
    State(state): State<AppState>,
) -> Result<Json<VerifyResponse>, AccountError> {
    let user = state.accounts.resolve(&identity)?;
    Ok(Json(VerifyResponse { valid: true, user }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthError;
    use crate::config::AppConfig;
    use crate::models::PublicUser;

    fn state() -> AppState {
        AppState::in_memory(AppConfig::with_secret("handler-test-secret"))
    }

    fn alice() -> SignupRequest {
        SignupRequest {
            name: "Alice".into(),
            email: "a@x.com".into(),
            password: "pw123".into(),
        }
    }

    #[tokio::test]
    async fn signup_returns_created() {
        let state = state();
        let (status, Json(response)) = signup(State(state.clone()), ApiJson(alice()))
            .await
            .expect("signup succeeds");

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(
            response.user,
            PublicUser {
                id: 1,
                name: "Alice".into(),
                email: "a@x.com".into()
            }
        );
        assert!(!response.token.is_empty());
    }

    #[tokio::test]
    async fn login_rejects_wrong_password() {
        let state = state();
        let (status, _) = signup(State(state.clone()), ApiJson(alice())).await.unwrap();
        assert_eq!(status, StatusCode::CREATED);

        let err = login(
            State(state),
            ApiJson(LoginRequest {
                email: "a@x.com".into(),
                password: "wrong".into(),
            }),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AccountError::Auth(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn verify_resolves_identity() {
        let state = state();
        let (_, Json(created)) = signup(State(state.clone()), ApiJson(alice())).await.unwrap();
        let identity = state.accounts.authenticate(&created.token).unwrap();

        let Json(response) = verify(Auth(identity), State(state)).await.unwrap();
        assert!(response.valid);
        assert_eq!(response.user, created.user);
    }
}
