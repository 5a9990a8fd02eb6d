// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session client used by front-ends of the course catalog.

pub mod progress;
pub mod session;
pub mod storage;

pub use progress::CourseProgress;
pub use session::{ClientError, SessionClient};
pub use storage::{MemoryStorage, Navigator, RecordingNavigator, SessionStorage};
