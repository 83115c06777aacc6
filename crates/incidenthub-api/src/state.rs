//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::PgPool;

use incidenthub_auth::password::{PasswordHasher, PasswordPolicy};
use incidenthub_auth::store::IdentityStore;
use incidenthub_auth::token::{TokenDecoder, TokenEncoder};
use incidenthub_core::config::AppConfig;
use incidenthub_database::repositories::user::UserRepository;
use incidenthub_service::incident::IncidentService;
use incidenthub_service::resource::ResourceService;
use incidenthub_service::settings::SettingsService;
use incidenthub_service::user::UserService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool.
    pub db_pool: PgPool,

    /// Access-control dependencies (also exposed as a substate).
    pub auth: AuthState,
    /// Token encoder (login/refresh issuance).
    pub token_encoder: Arc<TokenEncoder>,
    /// Password hasher.
    pub password_hasher: Arc<PasswordHasher>,

    /// User repository.
    pub user_repo: Arc<UserRepository>,

    /// User and authentication service.
    pub user_service: Arc<UserService>,
    /// Incident service.
    pub incident_service: Arc<IncidentService>,
    /// Resource service.
    pub resource_service: Arc<ResourceService>,
    /// Settings service.
    pub settings_service: Arc<SettingsService>,
}

/// The slice of state the access-control middleware needs.
///
/// Split out so the middleware can be exercised in tests with an in-memory
/// identity store and no database pool behind it.
#[derive(Clone)]
pub struct AuthState {
    /// Token decoder with the full candidate secret lists.
    pub token_decoder: Arc<TokenDecoder>,
    /// Password expiry policy.
    pub password_policy: Arc<PasswordPolicy>,
    /// Identity store used for per-request hydration.
    pub identity_store: Arc<dyn IdentityStore>,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}
