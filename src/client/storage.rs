// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Capabilities the session client is given instead of reaching for
//! globals: a string key-value store and a navigation hook.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// String key-value store with browser local-storage semantics.
pub trait SessionStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;

    fn set_item(&self, key: &str, value: &str);

    fn remove_item(&self, key: &str);
}

/// Page navigation performed on logout and failed page protection.
pub trait Navigator: Send + Sync {
    fn redirect(&self, path: &str);
}

/// In-process storage; contents vanish with the value.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lock the map, recovering the contents if a writer panicked.
    fn items(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.items.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("session storage lock poisoned; recovering");
            PoisonError::into_inner(poisoned)
        })
    }
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.items().insert(key.to_string(), value.to_string());
    }

    fn remove_item(&self, key: &str) {
        self.items().remove(key);
    }
}

/// Navigator that records every redirect instead of performing it.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visits: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visits(&self) -> Vec<String> {
        self.visits_guard().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.visits_guard().last().cloned()
    }

    fn visits_guard(&self) -> MutexGuard<'_, Vec<String>> {
        self.visits.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("navigator lock poisoned; recovering");
            PoisonError::into_inner(poisoned)
        })
    }
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, path: &str) {
        tracing::debug!(path, "redirect");
        self.visits_guard().push(path.to_string());
    }
}
