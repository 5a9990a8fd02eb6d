// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::SERVER_ERROR_MESSAGE;
use crate::models::ErrorResponse;

/// Authentication error type.
///
/// Covers both bearer-token failures (middleware and verify endpoint) and
/// credential failures at login. A missing token maps to 401, a token that
/// is present but unusable maps to 403.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No bearer token in the request
    MissingToken,
    /// Authorization header is not `Bearer <token>`
    InvalidAuthHeader,
    /// Token cannot be decoded
    MalformedToken,
    /// Token signature does not match this service's key
    InvalidSignature,
    /// Token has expired
    TokenExpired,
    /// Unknown email or wrong password
    InvalidCredentials,
    /// Token could not be produced or checked
    InternalError(String),
}

impl AuthError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "missing_token",
            AuthError::InvalidAuthHeader => "invalid_auth_header",
            AuthError::MalformedToken => "malformed_token",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::TokenExpired => "token_expired",
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::InternalError(_) => "internal_error",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingToken
            | AuthError::InvalidAuthHeader
            | AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::MalformedToken | AuthError::InvalidSignature | AuthError::TokenExpired => {
                StatusCode::FORBIDDEN
            }
            AuthError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// True for failures of a token that was actually presented.
    pub fn is_token_rejection(&self) -> bool {
        self.status_code() == StatusCode::FORBIDDEN
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingToken => write!(f, "Access token required"),
            AuthError::InvalidAuthHeader => {
                write!(f, "Invalid authorization header format (expected 'Bearer <token>')")
            }
            AuthError::MalformedToken | AuthError::InvalidSignature | AuthError::TokenExpired => {
                write!(f, "Invalid or expired token")
            }
            AuthError::InvalidCredentials => write!(f, "Invalid credentials"),
            AuthError::InternalError(_) => write!(f, "{SERVER_ERROR_MESSAGE}"),
        }
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        if let AuthError::InternalError(detail) = &self {
            tracing::error!(error = %detail, "authentication internal error");
        }

        let status = self.status_code();
        let body = Json(ErrorResponse {
            error: self.to_string(),
            error_code: Some(self.error_code().to_string()),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn missing_token_returns_401() {
        let response = AuthError::MissingToken.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(body["error"], "Access token required");
        assert_eq!(body["error_code"], "missing_token");
    }

    #[tokio::test]
    async fn expired_token_returns_403() {
        let response = AuthError::TokenExpired.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(body["error"], "Invalid or expired token");
    }

    #[test]
    fn internal_error_hides_detail() {
        let err = AuthError::InternalError("signing key rejected".into());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), SERVER_ERROR_MESSAGE);
    }

    #[test]
    fn token_rejections_are_forbidden() {
        assert!(AuthError::MalformedToken.is_token_rejection());
        assert!(AuthError::InvalidSignature.is_token_rejection());
        assert!(!AuthError::MissingToken.is_token_rejection());
        assert!(!AuthError::InvalidCredentials.is_token_rejection());
    }
}
