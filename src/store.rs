// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User record storage.
//!
//! The account service only talks to [`UserRepository`]; the in-memory
//! backend below is the default and lives for the process lifetime.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use thiserror::Error;

use crate::models::{NewUser, User, UserId};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("user with email {0} already exists")]
    DuplicateEmail(String),
    #[error("user store unavailable")]
    Unavailable,
}

/// Storage backend for user records.
///
/// Records are created once and never updated or deleted. `insert` must
/// reject a duplicate email atomically with respect to other inserts.
pub trait UserRepository: Send + Sync {
    fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError>;

    /// Store a new user, assigning the next identifier.
    fn insert(&self, new_user: NewUser) -> Result<User, StoreError>;
}

#[derive(Default)]
struct Users {
    by_id: BTreeMap<UserId, User>,
    id_by_email: HashMap<String, UserId>,
    last_id: UserId,
}

/// Process-lifetime user store.
#[derive(Default)]
pub struct InMemoryUserStore {
    users: RwLock<Users>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.read().map(|u| u.by_id.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl UserRepository for InMemoryUserStore {
    fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().map_err(|_| StoreError::Unavailable)?;
        Ok(users
            .id_by_email
            .get(email)
            .and_then(|id| users.by_id.get(id))
            .cloned())
    }

    fn find_by_id(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let users = self.users.read().map_err(|_| StoreError::Unavailable)?;
        Ok(users.by_id.get(&id).cloned())
    }

    fn insert(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.write().map_err(|_| StoreError::Unavailable)?;

        if users.id_by_email.contains_key(&new_user.email) {
            return Err(StoreError::DuplicateEmail(new_user.email));
        }

        let id = users.last_id + 1;
        let user = User {
            id,
            name: new_user.name,
            email: new_user.email,
            password_hash: new_user.password_hash,
        };

        users.last_id = id;
        users.id_by_email.insert(user.email.clone(), id);
        users.by_id.insert(id, user.clone());
        Ok(user)
    }
}
