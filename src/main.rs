//! IncidentHub Server — incident reporting and tracking backend.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use incidenthub_auth::password::{PasswordHasher, PasswordPolicy};
use incidenthub_auth::token::{TokenDecoder, TokenEncoder, TokenKeys};
use incidenthub_core::config::AppConfig;
use incidenthub_core::error::AppError;
use incidenthub_database::connection::DatabasePool;
use incidenthub_database::repositories::action::ActionRepository;
use incidenthub_database::repositories::attachment::AttachmentRepository;
use incidenthub_database::repositories::incident::IncidentRepository;
use incidenthub_database::repositories::resource::ResourceRepository;
use incidenthub_database::repositories::settings::SettingsRepository;
use incidenthub_database::repositories::user::UserRepository;
use incidenthub_service::incident::{AttachmentStore, IncidentService};
use incidenthub_service::resource::ResourceService;
use incidenthub_service::settings::SettingsService;
use incidenthub_service::user::UserService;

#[tokio::main]
async fn main() {
    let env = std::env::var("INCIDENTHUB_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting IncidentHub v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Token keys + production guard ────────────────────
    // Secrets are validated before anything binds; a development
    // placeholder in production aborts startup.
    let keys = TokenKeys::from_config(&config.auth);
    keys.ensure_production_safe(config.server.is_production())?;

    let token_encoder = Arc::new(TokenEncoder::new(&keys, &config.auth)?);
    let token_decoder = Arc::new(TokenDecoder::new(&keys));
    let password_hasher = Arc::new(PasswordHasher::new(&config.auth));
    let password_policy = Arc::new(PasswordPolicy::new(&config.auth));

    // ── Step 2: Database connection + migrations ─────────────────
    let db = DatabasePool::connect(&config.database).await?;
    incidenthub_database::migration::run_migrations(db.pool()).await?;
    let db_pool = db.into_pool();

    // ── Step 3: Attachment storage ───────────────────────────────
    let attachment_store = Arc::new(AttachmentStore::new(&config.storage.upload_dir).await?);

    // ── Step 4: Repositories ─────────────────────────────────────
    let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
    let incident_repo = Arc::new(IncidentRepository::new(db_pool.clone()));
    let action_repo = Arc::new(ActionRepository::new(db_pool.clone()));
    let attachment_repo = Arc::new(AttachmentRepository::new(db_pool.clone()));
    let resource_repo = Arc::new(ResourceRepository::new(db_pool.clone()));
    let settings_repo = Arc::new(SettingsRepository::new(db_pool.clone()));

    // ── Step 5: Services ─────────────────────────────────────────
    let user_service = Arc::new(UserService::new(
        Arc::clone(&user_repo),
        Arc::clone(&token_encoder),
        Arc::clone(&token_decoder),
        Arc::clone(&password_hasher),
        Arc::clone(&password_policy),
    ));
    let incident_service = Arc::new(IncidentService::new(
        Arc::clone(&incident_repo),
        Arc::clone(&action_repo),
        Arc::clone(&attachment_repo),
        Arc::clone(&attachment_store),
    ));
    let resource_service = Arc::new(ResourceService::new(Arc::clone(&resource_repo)));
    let settings_service = Arc::new(SettingsService::new(Arc::clone(&settings_repo)));

    // ── Step 6: HTTP server ──────────────────────────────────────
    let app_state = incidenthub_api::state::AppState {
        config: Arc::new(config.clone()),
        db_pool: db_pool.clone(),
        auth: incidenthub_api::state::AuthState {
            token_decoder: Arc::clone(&token_decoder),
            password_policy: Arc::clone(&password_policy),
            identity_store: user_repo.clone(),
        },
        token_encoder,
        password_hasher,
        user_repo,
        user_service,
        incident_service,
        resource_service,
        settings_service,
    };

    let app = incidenthub_api::router::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("IncidentHub server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    db_pool.close().await;
    tracing::info!("IncidentHub server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
