use std::sync::Arc;

use auth::AccessPolicy;
use auth::TokenIssuer;
use auth::TokenVerifier;
use catalog_service::access::service::AccessService;
use catalog_service::book::service::BookService;
use catalog_service::bootstrap::ensure_admin_identity;
use catalog_service::config::Config;
use catalog_service::identity::service::IdentityService;
use catalog_service::inbound::http::router::create_router;
use catalog_service::repositories::SqliteBookRepository;
use catalog_service::repositories::SqliteIdentityRepository;
use sqlx::sqlite::SqlitePoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "catalog-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        database_url = %config.database.url,
        http_port = config.server.http_port,
        token_ttl_hours = config.jwt.expiration_hours,
        "Configuration loaded"
    );

    if config.jwt.is_secret_weak() {
        tracing::warn!(
            secret_bytes = config.jwt.secret.len(),
            recommended_bytes = catalog_service::config::JwtConfig::RECOMMENDED_SECRET_BYTES,
            "JWT secret is shorter than recommended"
        );
    }

    let sqlite_pool = SqlitePoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "sqlite",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&sqlite_pool).await?;
    tracing::info!(database = "sqlite", "Database migrations completed");

    let identity_repository = Arc::new(SqliteIdentityRepository::new(sqlite_pool.clone()));
    let book_repository = Arc::new(SqliteBookRepository::new(sqlite_pool));

    let token_issuer = Arc::new(TokenIssuer::new(
        config.jwt.secret.as_bytes(),
        config.jwt.ttl(),
    ));
    let access_policy = Arc::new(AccessPolicy::new(TokenVerifier::new(
        config.jwt.secret.as_bytes(),
    )));

    let identity_service = Arc::new(IdentityService::new(Arc::clone(&identity_repository)));
    let book_service = Arc::new(BookService::new(book_repository));
    let access_service = Arc::new(AccessService::new(identity_repository, token_issuer));

    if let Some(admin) = &config.admin {
        ensure_admin_identity(&*identity_service, admin).await?;
    }

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        identity_service,
        book_service,
        access_service,
        access_policy,
    );

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");

    Ok(())
}
