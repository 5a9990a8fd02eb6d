// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session client for the course catalog API.
//!
//! Persists the bearer token and user profile in an injected
//! [`SessionStorage`] and attaches the token to protected requests. A stored
//! token is only a local claim: [`SessionClient::verify`] reconciles it with
//! the server and clears the session on any doubt.

use std::time::Duration;

use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use super::progress::CourseProgress;
use super::storage::{Navigator, SessionStorage};
use crate::models::{AuthResponse, Course, ErrorResponse, LoginRequest, PublicUser, SignupRequest};

/// Default API root used by the bundled browser client.
pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

pub const LOGIN_PAGE: &str = "/login.html";
pub const HOME_PAGE: &str = "/index.html";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with an error; holds its message
    #[error("{0}")]
    Rejected(String),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid API url: {0}")]
    Url(#[from] url::ParseError),
}

pub struct SessionClient<S: SessionStorage, N: Navigator> {
    http: reqwest::Client,
    api_url: Url,
    storage: S,
    navigator: N,
}

impl<S: SessionStorage, N: Navigator> SessionClient<S, N> {
    /// Create a client rooted at `api_url` (e.g. `http://localhost:3000/api`).
    pub fn new(api_url: &str, storage: S, navigator: N) -> Result<Self, ClientError> {
        let mut api_url = Url::parse(api_url)?;
        if !api_url.path().ends_with('/') {
            let path = format!("{}/", api_url.path());
            api_url.set_path(&path);
        }

        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            http,
            api_url,
            storage,
            navigator,
        })
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    // -------------------------------------------------------------------------
    // Local session
    // -------------------------------------------------------------------------

    pub fn token(&self) -> Option<String> {
        self.storage.get_item(TOKEN_KEY)
    }

    pub fn user(&self) -> Option<PublicUser> {
        self.storage
            .get_item(USER_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
    }

    /// Whether a token is stored. Not proof of a valid session.
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    fn save_session(&self, auth: &AuthResponse) {
        self.storage.set_item(TOKEN_KEY, &auth.token);
        match serde_json::to_string(&auth.user) {
            Ok(json) => self.storage.set_item(USER_KEY, &json),
            Err(e) => tracing::warn!(error = %e, "failed to encode user profile"),
        }
    }

    fn clear_session(&self) {
        self.storage.remove_item(TOKEN_KEY);
        self.storage.remove_item(USER_KEY);
    }

    // -------------------------------------------------------------------------
    // Auth operations
    // -------------------------------------------------------------------------

    pub async fn signup(&self, name: &str, email: &str, password: &str) -> Result<AuthResponse, ClientError> {
        let body = SignupRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self.http.post(self.endpoint("auth/signup")?).json(&body).send().await?;
        let auth: AuthResponse = read_json(response, "Signup failed").await?;

        self.save_session(&auth);
        Ok(auth)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ClientError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self.http.post(self.endpoint("auth/login")?).json(&body).send().await?;
        let auth: AuthResponse = read_json(response, "Login failed").await?;

        self.save_session(&auth);
        Ok(auth)
    }

    /// Drop the local session and go to the login page.
    pub fn logout(&self) {
        self.clear_session();
        self.navigator.redirect(LOGIN_PAGE);
    }

    /// Check the stored token with the server.
    ///
    /// Any failure, including an unreachable server, clears the session.
    pub async fn verify(&self) -> bool {
        let Some(token) = self.token() else {
            return false;
        };

        let outcome = match self.endpoint("auth/verify") {
            Ok(url) => self.http.get(url).bearer_auth(&token).send().await,
            Err(e) => {
                tracing::warn!(error = %e, "cannot build verify url");
                self.clear_session();
                return false;
            }
        };

        match outcome {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                tracing::debug!(status = %response.status(), "stored token rejected");
                self.clear_session();
                false
            }
            Err(e) => {
                tracing::debug!(error = %e, "verify request failed");
                self.clear_session();
                false
            }
        }
    }

    /// Verify the session, sending the user to the login page if it fails.
    pub async fn protect_page(&self) -> bool {
        if self.verify().await {
            return true;
        }
        self.navigator.redirect(LOGIN_PAGE);
        false
    }

    /// Send a user who already holds a token to the home page.
    pub fn redirect_if_authenticated(&self) -> bool {
        if self.is_authenticated() {
            self.navigator.redirect(HOME_PAGE);
            return true;
        }
        false
    }

    // -------------------------------------------------------------------------
    // Courses
    // -------------------------------------------------------------------------

    pub async fn fetch_courses(&self) -> Result<Vec<Course>, ClientError> {
        let request = self.authorized(self.http.get(self.endpoint("courses")?));
        read_json(request.send().await?, "Failed to fetch courses").await
    }

    pub async fn fetch_course(&self, course_id: u32) -> Result<Course, ClientError> {
        let url = self.endpoint(&format!("courses/{course_id}"))?;
        let request = self.authorized(self.http.get(url));
        read_json(request.send().await?, "Failed to fetch course").await
    }

    /// Completion tracking for the stored user.
    pub fn progress(&self) -> CourseProgress<'_, S> {
        CourseProgress::new(&self.storage, self.user().map(|user| user.id))
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.api_url.join(path)?)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match self.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

/// Decode a success body, or turn an error body into [`ClientError::Rejected`].
async fn read_json<T: DeserializeOwned>(response: Response, fallback: &str) -> Result<T, ClientError> {
    if !response.status().is_success() {
        let message = response
            .json::<ErrorResponse>()
            .await
            .ok()
            .map(|body| body.error)
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| fallback.to_string());
        return Err(ClientError::Rejected(message));
    }

    Ok(response.json().await?)
}
