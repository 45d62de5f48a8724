use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use auth::PasswordHasher;
use notes_service::config::Config;
use notes_service::domain::note::ports::NoteRepository;
use notes_service::domain::note::service::NoteService;
use notes_service::domain::user::ports::IdentityVerifier;
use notes_service::domain::user::ports::UserRepository;
use notes_service::domain::user::service::AuthService;
use notes_service::inbound::http::router::create_router;
use notes_service::inbound::http::router::AppState;
use notes_service::inbound::http::router::StorageMode;
use notes_service::outbound::identity::DisabledIdentityVerifier;
use notes_service::outbound::identity::GoogleIdentityVerifier;
use notes_service::outbound::repositories::InMemoryNoteRepository;
use notes_service::outbound::repositories::InMemoryUserRepository;
use notes_service::outbound::repositories::PostgresNoteRepository;
use notes_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "notes_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "notes-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        database_configured = config.database_url().is_some(),
        google_login = config.google_client_id().is_some(),
        token_lifetime_hours = config.jwt.expiration_hours,
        "Configuration loaded"
    );

    let password_hasher = PasswordHasher::with_params((&config.password).into())?;
    let authenticator = Authenticator::new(config.jwt.secret.as_bytes())
        .with_password_hasher(password_hasher)
        .with_token_lifetime(chrono::Duration::hours(config.jwt.expiration_hours));

    let (user_repository, note_repository, storage_mode): (
        Arc<dyn UserRepository>,
        Arc<dyn NoteRepository>,
        StorageMode,
    ) = match connect_database(&config).await {
        Some(pool) => (
            Arc::new(PostgresUserRepository::new(pool.clone())),
            Arc::new(PostgresNoteRepository::new(pool)),
            StorageMode::Postgres,
        ),
        None => (
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryNoteRepository::new()),
            StorageMode::InMemory,
        ),
    };

    let identity_verifier: Arc<dyn IdentityVerifier> = match config.google_client_id() {
        Some(client_id) => Arc::new(
            GoogleIdentityVerifier::new(
                client_id,
                config.google.jwks_url.clone(),
                Duration::from_secs(config.google.jwks_cache_seconds),
                Duration::from_secs(config.google.http_timeout_seconds),
            )?
            .with_min_refresh_interval(Duration::from_secs(
                config.google.jwks_min_refresh_seconds,
            )),
        ),
        None => {
            tracing::info!("Google login disabled: google.client_id is not set");
            Arc::new(DisabledIdentityVerifier)
        }
    };

    let auth_service = Arc::new(AuthService::new(
        user_repository,
        identity_verifier,
        authenticator,
    ));
    let note_service = Arc::new(NoteService::new(note_repository));

    let http_address = format!("{}:{}", config.server.host, config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        storage = %storage_mode,
        "Http server listening"
    );

    let http_application = create_router(AppState::new(auth_service, note_service, storage_mode));
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited successfully");
    Ok(())
}

/// Connect to PostgreSQL and run migrations.
///
/// Returns `None` when no database is configured or it cannot be used, in
/// which case the service runs on in-memory storage.
async fn connect_database(config: &Config) -> Option<PgPool> {
    let Some(url) = config.database_url() else {
        tracing::warn!("No database configured, using in-memory storage (data is not durable)");
        return None;
    };

    let pool = match PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_seconds))
        .connect(url)
        .await
    {
        Ok(pool) => pool,
        Err(e) => {
            tracing::warn!(error = %e, "Database unreachable, using in-memory storage (data is not durable)");
            return None;
        }
    };
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    if let Err(e) = sqlx::migrate!("./migrations").run(&pool).await {
        tracing::warn!(error = %e, "Database migrations failed, using in-memory storage (data is not durable)");
        return None;
    }
    tracing::info!(database = "postgresql", "Database migrations completed");

    Some(pool)
}
