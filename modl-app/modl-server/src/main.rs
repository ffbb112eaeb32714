use axum::http::{header, HeaderValue, Method};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use modl_api::{build_router, AppState};
use modl_core::notifications::EmailSender;
use modl_core::repositories::TenantRepository;
use modl_core::services::RegistrationService;
use modl_infrastructure::{create_pool, run_migrations, PgTenantRepository, SmtpEmailSender};
use modl_shared::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Initialize telemetry
    modl_shared::telemetry::init_telemetry();

    info!("modl registration server starting...");

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Connect to Database
    info!("Connecting to database...");
    let pool = create_pool(&config.database).await?;
    if config.database.run_migrations {
        run_migrations(&pool).await?;
    }
    info!("Database connection established.");

    // Adapters
    let tenant_repo: Arc<dyn TenantRepository> = Arc::new(PgTenantRepository::new(pool));
    let mailer: Arc<dyn EmailSender> = Arc::new(SmtpEmailSender::new(
        &config.mail,
        config.registration.email_timeout(),
    )?);
    info!(
        "SMTP relay configured at {}:{}",
        config.mail.smtp_host, config.mail.smtp_port
    );

    // Create App State
    let service = RegistrationService::new(tenant_repo, mailer, config.registration.clone());
    let state = AppState::new(service);

    // Build router
    let mut app = build_router(state);
    if let Some(origin) = &config.app.cors_origin {
        app = app.layer(
            CorsLayer::new()
                .allow_origin(origin.parse::<HeaderValue>()?)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE]),
        );
    }

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
