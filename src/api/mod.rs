// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::FromRequest,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::require_auth,
    error::ApiError,
    models::{
        AuthResponse, Course, ErrorResponse, Lesson, LoginRequest, PublicUser, SignupRequest,
        VerifyResponse,
    },
    state::AppState,
};

pub mod auth;
pub mod courses;
pub mod health;

/// JSON body extractor whose rejections use the API error shape.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/auth/verify", get(auth::verify))
        .route("/courses", get(courses::list_courses))
        .route("/courses/{id}", get(courses::get_course))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let api_routes = Router::new()
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        .merge(protected)
        .with_state(state.clone());

    let mut app = Router::new()
        .nest("/api", api_routes)
        .route("/health/live", get(health::liveness))
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()));

    if let Some(dir) = &state.config.static_dir {
        app = app
            .route_service("/", ServeFile::new(dir.join("login.html")))
            .fallback_service(ServeDir::new(dir));
    }

    app.layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
}

struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::signup,
        auth::login,
        auth::verify,
        courses::list_courses,
        courses::get_course,
        health::liveness
    ),
    components(
        schemas(
            SignupRequest,
            LoginRequest,
            AuthResponse,
            VerifyResponse,
            PublicUser,
            Course,
            Lesson,
            ErrorResponse,
            health::HealthResponse
        )
    ),
    modifiers(&BearerSecurity),
    tags(
        (name = "Auth", description = "Signup, login and token verification"),
        (name = "Courses", description = "Course catalog"),
        (name = "Health", description = "Liveness probe")
    )
)]
struct ApiDoc;
