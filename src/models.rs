// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response structures used by the REST API and the session
//! client. All wire types derive `Serialize`/`Deserialize` and `ToSchema`
//! for JSON handling and OpenAPI documentation.
//!
//! ## Model Categories
//!
//! - **Users**: stored user records and their public view
//! - **Auth**: signup/login payloads and token responses
//! - **Courses**: catalog entries and their lessons

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// =============================================================================
// User Models
// =============================================================================

/// Numeric user identifier, assigned monotonically starting at 1.
pub type UserId = u64;

/// A stored user record.
///
/// Owned by the user repository. The password hash never leaves the server;
/// use [`PublicUser`] for anything sent over the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    /// Argon2 PHC string.
    pub password_hash: String,
}

/// Fields needed to create a user; the repository assigns the id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// User fields safe to expose externally.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct PublicUser {
    #[schema(value_type = u64)]
    pub id: UserId,
    pub name: String,
    pub email: String,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

// =============================================================================
// Auth Models
// =============================================================================

/// Request body for `POST /api/auth/signup`.
///
/// Missing fields deserialize as empty strings so they surface as a
/// validation error rather than a JSON rejection.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct SignupRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Request body for `POST /api/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Response for a successful signup or login.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct AuthResponse {
    pub message: String,
    /// Signed bearer token.
    pub token: String,
    pub user: PublicUser,
}

/// Response for `GET /api/auth/verify`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct VerifyResponse {
    pub valid: bool,
    pub user: PublicUser,
}

/// JSON error body shared by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

// =============================================================================
// Course Models
// =============================================================================

/// A single lesson inside a course.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Lesson {
    pub id: u32,
    pub title: String,
    /// Human-readable duration, e.g. `"30 min"`.
    pub duration: String,
}

/// A course in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Course {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub instructor: String,
    /// Human-readable duration, e.g. `"4 weeks"`.
    pub duration: String,
    pub level: String,
    /// Thumbnail image URL.
    pub thumbnail: String,
    pub lessons: Vec<Lesson>,
}
