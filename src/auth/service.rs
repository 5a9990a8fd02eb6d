// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Account operations: signup, login and token verification.
//!
//! The service owns the user repository handle, the token keys and the
//! password hasher. Handlers call it; it never touches HTTP types except
//! for mapping its error into a response.

use std::sync::Arc;

use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{info, warn};

use super::claims::AuthenticatedUser;
use super::error::AuthError;
use super::password::{PasswordError, PasswordService};
use super::tokens::TokenKeys;
use crate::error::ApiError;
use crate::models::{AuthResponse, LoginRequest, NewUser, PublicUser, SignupRequest};
use crate::store::{StoreError, UserRepository};

pub const SIGNUP_FIELDS_REQUIRED: &str = "All fields are required";
pub const LOGIN_FIELDS_REQUIRED: &str = "Email and password are required";
pub const USER_EXISTS: &str = "User already exists";
pub const USER_NOT_FOUND: &str = "User not found";

/// Failures of account operations.
#[derive(Debug, Error)]
pub enum AccountError {
    /// A required field is missing or empty
    #[error("{0}")]
    Validation(&'static str),
    /// The email is already registered
    #[error("User already exists")]
    Conflict,
    /// Bad credentials or an unusable token
    #[error(transparent)]
    Auth(#[from] AuthError),
    /// The token's user is no longer in the store
    #[error("User not found")]
    NotFound,
    /// Unexpected failure
    #[error("server error: {0}")]
    Server(String),
}

impl From<StoreError> for AccountError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail(_) => AccountError::Conflict,
            StoreError::Unavailable => AccountError::Server(err.to_string()),
        }
    }
}

impl From<PasswordError> for AccountError {
    fn from(err: PasswordError) -> Self {
        AccountError::Server(err.to_string())
    }
}

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        match self {
            AccountError::Validation(message) => ApiError::bad_request(message).into_response(),
            // Duplicates surface as a plain 400, not 409.
            AccountError::Conflict => ApiError::bad_request(USER_EXISTS).into_response(),
            AccountError::Auth(err) => err.into_response(),
            AccountError::NotFound => ApiError::not_found(USER_NOT_FOUND).into_response(),
            AccountError::Server(detail) => {
                tracing::error!(error = %detail, "account operation failed");
                ApiError::internal().into_response()
            }
        }
    }
}

/// Signup, login and verification against an injected user repository.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    tokens: TokenKeys,
    passwords: PasswordService,
}

impl AccountService {
    pub fn new(users: Arc<dyn UserRepository>, tokens: TokenKeys) -> Self {
        Self {
            users,
            tokens,
            passwords: PasswordService::new(),
        }
    }

    pub fn tokens(&self) -> &TokenKeys {
        &self.tokens
    }

    /// Register a user and issue their first token.
    pub async fn signup(&self, request: SignupRequest) -> Result<AuthResponse, AccountError> {
        let SignupRequest {
            name,
            email,
            password,
        } = request;

        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(AccountError::Validation(SIGNUP_FIELDS_REQUIRED));
        }

        // Cheap pre-check; the repository enforces uniqueness on insert.
        if self.users.find_by_email(&email)?.is_some() {
            warn!("signup rejected: email already registered");
            return Err(AccountError::Conflict);
        }

        let passwords = self.passwords.clone();
        let password_hash = tokio::task::spawn_blocking(move || passwords.hash(&password))
            .await
            .map_err(|e| AccountError::Server(e.to_string()))??;

        let user = self.users.insert(NewUser {
            name,
            email,
            password_hash,
        })?;
        let token = self.tokens.issue(&user)?;

        info!(user_id = user.id, "user signed up");

        Ok(AuthResponse {
            message: "User created successfully".to_string(),
            token,
            user: PublicUser::from(&user),
        })
    }

    /// Check credentials and issue a fresh token.
    ///
    /// Unknown email and wrong password produce the same error.
    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse, AccountError> {
        let LoginRequest { email, password } = request;

        if email.is_empty() || password.is_empty() {
            return Err(AccountError::Validation(LOGIN_FIELDS_REQUIRED));
        }

        let Some(user) = self.users.find_by_email(&email)? else {
            // Burn the same Argon2 work as a real check.
            let passwords = self.passwords.clone();
            tokio::task::spawn_blocking(move || passwords.verify_dummy(&password))
                .await
                .map_err(|e| AccountError::Server(e.to_string()))?;
            warn!("login rejected: unknown email");
            return Err(AuthError::InvalidCredentials.into());
        };

        let passwords = self.passwords.clone();
        let stored_hash = user.password_hash.clone();
        let matches = tokio::task::spawn_blocking(move || passwords.verify(&password, &stored_hash))
            .await
            .map_err(|e| AccountError::Server(e.to_string()))??;

        if !matches {
            warn!(user_id = user.id, "login rejected: wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = self.tokens.issue(&user)?;
        info!(user_id = user.id, "user logged in");

        Ok(AuthResponse {
            message: "Login successful".to_string(),
            token,
            user: PublicUser::from(&user),
        })
    }

    /// Verify a bearer token's signature and expiry.
    pub fn authenticate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        if token.is_empty() {
            return Err(AuthError::MissingToken);
        }
        self.tokens.verify(token)
    }

    /// Resolve an authenticated identity against the user store.
    pub fn resolve(&self, identity: &AuthenticatedUser) -> Result<PublicUser, AccountError> {
        self.users
            .find_by_id(identity.user_id)?
            .map(|user| PublicUser::from(&user))
            .ok_or(AccountError::NotFound)
    }

    /// Verify a token and return the public view of its user.
    pub fn verify_token(&self, token: &str) -> Result<PublicUser, AccountError> {
        let identity = self.authenticate(token)?;
        self.resolve(&identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryUserStore;
    use chrono::Utc;
    use std::time::Duration;

    const DAY: Duration = Duration::from_secs(24 * 3600);

    fn service() -> AccountService {
        AccountService::new(
            Arc::new(InMemoryUserStore::new()),
            TokenKeys::from_secret(b"service-test-secret", DAY),
        )
    }

    fn signup_request(name: &str, email: &str, password: &str) -> SignupRequest {
        SignupRequest {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    fn login_request(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn signup_token_verifies_immediately() {
        let service = service();
        let response = service
            .signup(signup_request("Alice", "a@x.com", "pw123"))
            .await
            .unwrap();

        assert_eq!(response.message, "User created successfully");
        assert_eq!(response.user.name, "Alice");

        let user = service.verify_token(&response.token).unwrap();
        assert_eq!(user, response.user);
    }

    #[tokio::test]
    async fn signup_requires_every_field() {
        let service = service();
        for request in [
            signup_request("", "a@x.com", "pw"),
            signup_request("Alice", "", "pw"),
            signup_request("Alice", "a@x.com", ""),
        ] {
            let err = service.signup(request).await.unwrap_err();
            assert!(matches!(err, AccountError::Validation(SIGNUP_FIELDS_REQUIRED)));
        }
    }

    #[tokio::test]
    async fn whitespace_fields_are_stored_as_given() {
        let service = service();
        let response = service
            .signup(signup_request("   ", "a@x.com", "pw123"))
            .await
            .unwrap();
        assert_eq!(response.user.name, "   ");

        let err = service.login(login_request(" ", "pw123")).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[tokio::test]
    async fn duplicate_email_conflicts_regardless_of_password() {
        let service = service();
        service
            .signup(signup_request("Alice", "a@x.com", "pw123"))
            .await
            .unwrap();

        let err = service
            .signup(signup_request("Other", "a@x.com", "different"))
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::Conflict));
    }

    #[tokio::test]
    async fn login_token_resolves_to_signup_user() {
        let service = service();
        let signed_up = service
            .signup(signup_request("Alice", "a@x.com", "pw123"))
            .await
            .unwrap();

        let logged_in = service.login(login_request("a@x.com", "pw123")).await.unwrap();
        assert_eq!(logged_in.message, "Login successful");

        let identity = service.authenticate(&logged_in.token).unwrap();
        assert_eq!(identity.user_id, signed_up.user.id);
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_look_identical() {
        let service = service();
        service
            .signup(signup_request("Alice", "a@x.com", "pw123"))
            .await
            .unwrap();

        let wrong_password = service
            .login(login_request("a@x.com", "wrong"))
            .await
            .unwrap_err();
        let unknown_email = service
            .login(login_request("nobody@x.com", "pw123"))
            .await
            .unwrap_err();

        assert_eq!(wrong_password.to_string(), "Invalid credentials");
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn login_requires_both_fields() {
        let err = service().login(login_request("", "pw")).await.unwrap_err();
        assert!(matches!(err, AccountError::Validation(LOGIN_FIELDS_REQUIRED)));
    }

    #[test]
    fn token_for_missing_user_is_not_found() {
        let service = service();
        let ghost = crate::models::User {
            id: 99,
            name: "Ghost".into(),
            email: "ghost@x.com".into(),
            password_hash: String::new(),
        };
        let token = service.tokens().issue(&ghost).unwrap();

        assert!(matches!(service.verify_token(&token), Err(AccountError::NotFound)));
    }

    #[test]
    fn expired_token_fails_verification() {
        let service = service();
        let user = crate::models::User {
            id: 1,
            name: "Alice".into(),
            email: "a@x.com".into(),
            password_hash: String::new(),
        };
        let token = service
            .tokens()
            .issue_at(&user, Utc::now().timestamp() - 25 * 3600)
            .unwrap();

        assert!(matches!(
            service.verify_token(&token),
            Err(AccountError::Auth(AuthError::TokenExpired))
        ));
    }

    #[test]
    fn empty_token_is_missing() {
        assert_eq!(service().authenticate(""), Err(AuthError::MissingToken));
    }
}
