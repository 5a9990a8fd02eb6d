// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    auth::Auth,
    error::ApiError,
    models::{Course, ErrorResponse},
    state::AppState,
};

pub const COURSE_NOT_FOUND: &str = "Course not found";

#[utoipa::path(
    get,
    path = "/api/courses",
    tag = "Courses",
    security(("bearer" = [])),
    responses(
        (status = 200, body = [Course]),
        (status = 401, body = ErrorResponse),
        (status = 403, body = ErrorResponse)
    )
)]
pub async fn list_courses(Auth(user): Auth, State(state): State<AppState>) -> Json<Vec<Course>> {
    tracing::debug!(user_id = user.user_id, "listing courses");
    Json(state.catalog.all().to_vec())
}

#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    params(
        ("id" = u32, Path, description = "Course identifier")
    ),
    tag = "Courses",
    security(("bearer" = [])),
    responses(
        (status = 200, body = Course),
        (status = 401, body = ErrorResponse),
        (status = 403, body = ErrorResponse),
        (status = 404, body = ErrorResponse)
    )
)]
pub async fn get_course(
    Auth(_user): Auth,
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Course>, ApiError> {
    // Non-numeric ids are simply unknown courses.
    id.trim()
        .parse::<u32>()
        .ok()
        .and_then(|id| state.catalog.find(id))
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::not_found(COURSE_NOT_FOUND))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthenticatedUser;
    use crate::config::AppConfig;
    use axum::http::StatusCode;

    fn caller() -> Auth {
        Auth(AuthenticatedUser {
            user_id: 1,
            email: "a@x.com".into(),
            expires_at: 0,
        })
    }

    fn state() -> AppState {
        AppState::in_memory(AppConfig::with_secret("courses-test-secret"))
    }

    #[tokio::test]
    async fn list_returns_whole_catalog() {
        let Json(courses) = list_courses(caller(), State(state())).await;
        assert_eq!(courses.len(), 4);
        assert_eq!(courses[1].title, "Python for Data Science");
    }

    #[tokio::test]
    async fn get_course_by_id() {
        let Json(course) = get_course(caller(), Path("3".to_string()), State(state()))
            .await
            .expect("course exists");
        assert_eq!(course.title, "UI/UX Design Fundamentals");
        assert_eq!(course.lessons.len(), 5);
    }

    #[tokio::test]
    async fn unknown_or_non_numeric_id_is_not_found() {
        for id in ["42", "abc", "-1"] {
            let err = get_course(caller(), Path(id.to_string()), State(state()))
                .await
                .unwrap_err();
            assert_eq!(err.status, StatusCode::NOT_FOUND);
            assert_eq!(err.message, COURSE_NOT_FOUND);
        }
    }
}
