// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::auth::{AccountService, TokenKeys};
use crate::catalog::CourseCatalog;
use crate::config::AppConfig;
use crate::store::{InMemoryUserStore, UserRepository};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub accounts: AccountService,
    pub catalog: Arc<CourseCatalog>,
}

impl AppState {
    /// Build state around an injected user repository.
    pub fn new(config: AppConfig, users: Arc<dyn UserRepository>) -> Self {
        let tokens = TokenKeys::from_secret(config.jwt_secret.as_bytes(), config.token_ttl);
        Self {
            config: Arc::new(config),
            accounts: AccountService::new(users, tokens),
            catalog: Arc::new(CourseCatalog::builtin()),
        }
    }

    /// Build state backed by the in-memory user store.
    pub fn in_memory(config: AppConfig) -> Self {
        Self::new(config, Arc::new(InMemoryUserStore::new()))
    }
}
