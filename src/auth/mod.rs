// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Self-issued bearer token authentication for the course catalog API.
//!
//! ## Auth Flow
//!
//! 1. Client signs up or logs in with email and password
//! 2. Server hashes (signup) or checks (login) the password with Argon2id
//! 3. Server returns an HS256 JWT carrying the user id and email, valid 24h
//! 4. Client sends `Authorization: Bearer <token>` on protected requests
//! 5. `require_auth` verifies signature and expiry and attaches the identity
//!
//! ## Security
//!
//! - Tokens are stateless; there is no revocation before expiry
//! - Login failures use one message for unknown email and wrong password
//! - Password hashes never leave the server

pub mod claims;
pub mod error;
pub mod extractor;
pub mod middleware;
pub mod password;
pub mod service;
pub mod tokens;

pub use claims::{AuthenticatedUser, TokenClaims};
pub use error::AuthError;
pub use extractor::Auth;
pub use middleware::require_auth;
pub use password::PasswordService;
pub use service::{AccountError, AccountService};
pub use tokens::TokenKeys;
