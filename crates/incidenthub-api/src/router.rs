//! Route definitions for the IncidentHub HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`. Protected
//! routes pass through the access-control middleware; the `/api/admin`
//! subtree additionally passes the system-admin role gate. The gate always
//! composes after authentication, never before.

use axum::{
    Router,
    extract::{DefaultBodyLimit, Request},
    middleware as axum_middleware,
    middleware::Next,
    response::Response,
    routing::{delete, get, patch, post, put},
};
use tower_http::trace::TraceLayer;

use incidenthub_entity::user::UserRole;

use crate::handlers;
use crate::middleware;
use crate::middleware::role_gate::require_any_role;
use crate::state::{AppState, AuthState};

/// Roles allowed into the `/api/admin` subtree.
const ADMIN_ROLES: &[UserRole] = &[UserRole::SystemAdmin];

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.server.max_body_size_bytes as usize;
    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);
    let auth_state = state.auth.clone();

    let api_routes = Router::new()
        .merge(public_routes())
        .merge(protected_routes(auth_state.clone()))
        .nest("/admin", admin_routes(auth_state));

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_body))
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(
            middleware::security_headers::security_headers,
        ))
        .layer(cors)
        .with_state(state)
}

/// Routes reachable without a token.
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/health", get(handlers::health::health_check))
}

/// Routes requiring an authenticated identity.
fn protected_routes(auth_state: AuthState) -> Router<AppState> {
    Router::new()
        .route("/auth/me", get(handlers::auth::me))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/password", patch(handlers::auth::change_password))
        .merge(incident_routes())
        .merge(resource_routes())
        .merge(settings_routes())
        .layer(axum_middleware::from_fn_with_state(
            auth_state,
            middleware::auth::authenticate,
        ))
}

/// Incident CRUD plus nested actions and attachments.
fn incident_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/incidents",
            get(handlers::incident::list_incidents).post(handlers::incident::report_incident),
        )
        .route(
            "/incidents/{id}",
            get(handlers::incident::get_incident)
                .put(handlers::incident::update_incident)
                .delete(handlers::incident::delete_incident),
        )
        .route(
            "/incidents/{id}/actions",
            get(handlers::action::list_actions).post(handlers::action::record_action),
        )
        .route(
            "/actions/{id}",
            put(handlers::action::update_action).delete(handlers::action::delete_action),
        )
        .route(
            "/incidents/{id}/attachments",
            get(handlers::attachment::list_attachments)
                .post(handlers::attachment::upload_attachment),
        )
        .route(
            "/attachments/{id}/download",
            get(handlers::attachment::download_attachment),
        )
        .route(
            "/attachments/{id}",
            delete(handlers::attachment::delete_attachment),
        )
}

/// Resource read and predicate-guarded mutation.
fn resource_routes() -> Router<AppState> {
    Router::new()
        .route("/resources", get(handlers::resource::list_resources))
        .route(
            "/resources/{id}",
            get(handlers::resource::get_resource)
                .put(handlers::resource::update_resource)
                .delete(handlers::resource::delete_resource),
        )
}

/// Settings reads (writes live in the admin subtree).
fn settings_routes() -> Router<AppState> {
    Router::new()
        .route("/settings", get(handlers::settings::list_settings))
        .route("/settings/{key}", get(handlers::settings::get_setting))
}

/// System-admin-only management routes.
fn admin_routes(auth_state: AuthState) -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            get(handlers::user::list_users).post(handlers::user::create_user),
        )
        .route(
            "/users/{id}",
            get(handlers::user::get_user)
                .put(handlers::user::update_user)
                .delete(handlers::user::delete_user),
        )
        .route("/users/{id}/role", put(handlers::user::change_role))
        .route("/users/{id}/status", put(handlers::user::change_status))
        .route("/users/{id}/password", put(handlers::user::reset_password))
        .route("/resources", post(handlers::resource::create_resource))
        .route(
            "/settings/{key}",
            put(handlers::settings::upsert_setting).delete(handlers::settings::delete_setting),
        )
        .layer(axum_middleware::from_fn(admin_gate))
        .layer(axum_middleware::from_fn_with_state(
            auth_state,
            middleware::auth::authenticate,
        ))
}

/// The system-admin gate for the admin subtree.
async fn admin_gate(request: Request, next: Next) -> Response {
    require_any_role(ADMIN_ROLES, request, next).await
}
