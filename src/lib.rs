// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Course Catalog - Authenticated Course Catalog Service
//!
//! An HTTP service that signs users up, logs them in with self-issued bearer
//! tokens and serves a static course catalog to authenticated callers, plus
//! the session client front-ends use to talk to it.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Password hashing, token issuance and verification
//! - `catalog` - Static course list
//! - `client` - Session client with injected storage
//! - `store` - User repository

pub mod api;
pub mod auth;
pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod store;
pub mod telemetry;
