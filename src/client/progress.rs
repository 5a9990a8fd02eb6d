// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Per-user course completion tracking kept in client storage.
//!
//! Completed course ids live under `completed_courses_{user_id}` as a JSON
//! array. Without a signed-in user every read is empty and every write is
//! a no-op.

use super::storage::SessionStorage;
use crate::models::UserId;

pub fn progress_key(user_id: UserId) -> String {
    format!("completed_courses_{user_id}")
}

/// Completion view over a storage for one (optional) user.
pub struct CourseProgress<'a, S: SessionStorage> {
    storage: &'a S,
    user_id: Option<UserId>,
}

impl<'a, S: SessionStorage> CourseProgress<'a, S> {
    pub fn new(storage: &'a S, user_id: Option<UserId>) -> Self {
        Self { storage, user_id }
    }

    /// Completed course ids in the order they were marked.
    pub fn completed(&self) -> Vec<u32> {
        let Some(user_id) = self.user_id else {
            return Vec::new();
        };
        self.storage
            .get_item(&progress_key(user_id))
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    pub fn is_completed(&self, course_id: u32) -> bool {
        self.completed().contains(&course_id)
    }

    pub fn mark_completed(&self, course_id: u32) {
        let mut completed = self.completed();
        if !completed.contains(&course_id) {
            completed.push(course_id);
            self.store(&completed);
        }
    }

    pub fn unmark_completed(&self, course_id: u32) {
        let mut completed = self.completed();
        if let Some(index) = completed.iter().position(|id| *id == course_id) {
            completed.remove(index);
            self.store(&completed);
        }
    }

    /// Share of `total_courses` completed, as a rounded percentage.
    pub fn percentage(&self, total_courses: usize) -> u32 {
        if total_courses == 0 {
            return 0;
        }
        let ratio = self.completed().len() as f64 / total_courses as f64;
        (ratio * 100.0).round() as u32
    }

    fn store(&self, completed: &[u32]) {
        let Some(user_id) = self.user_id else {
            return;
        };
        match serde_json::to_string(completed) {
            Ok(json) => self.storage.set_item(&progress_key(user_id), &json),
            Err(e) => tracing::warn!(error = %e, "failed to encode course progress"),
        }
    }
}
