use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::auth::google::google_login;
use super::handlers::auth::login::login;
use super::handlers::auth::profile::profile;
use super::handlers::auth::signup::signup;
use super::handlers::health::health;
use super::handlers::notes::create_note::create_note;
use super::handlers::notes::delete_note::delete_note;
use super::handlers::notes::list_notes::list_notes;
use super::handlers::notes::update_note::update_note;
use crate::domain::note::ports::NoteServicePort;
use crate::domain::user::ports::AuthServicePort;

/// Which repositories back the running service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StorageMode {
    Postgres,
    InMemory,
}

impl fmt::Display for StorageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageMode::Postgres => f.write_str("postgres"),
            StorageMode::InMemory => f.write_str("in-memory"),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServicePort>,
    pub note_service: Arc<dyn NoteServicePort>,
    pub storage_mode: StorageMode,
}

impl AppState {
    pub fn new(
        auth_service: Arc<dyn AuthServicePort>,
        note_service: Arc<dyn NoteServicePort>,
        storage_mode: StorageMode,
    ) -> Self {
        Self {
            auth_service,
            note_service,
            storage_mode,
        }
    }
}

/// Build the HTTP API.
///
/// Note routes and the profile route authenticate through the
/// `AuthenticatedUser` extractor in their handlers.
pub fn create_router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/login", post(login))
        .route("/api/auth/google", post(google_login))
        .route("/api/auth/profile", get(profile));

    let note_routes = Router::new()
        .route("/api/notes", get(list_notes).post(create_note))
        .route("/api/notes/:id", put(update_note).delete(delete_note));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .route("/api/health", get(health))
        .merge(auth_routes)
        .merge(note_routes)
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
