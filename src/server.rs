//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, migrations, admin seeding, worker spawning,
//! and the Axum server lifecycle.

use crate::application::services::{AboutService, AuthService, ShorteningService};
use crate::config::Config;
use crate::domain::click_worker::run_click_worker;
use crate::infrastructure::auth::JwtAuthenticator;
use crate::infrastructure::persistence::{
    PgAboutRepository, PgMappingRepository, PgUserRepository,
};
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::code_generator::RandomCodeGenerator;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Opens the connection pool using the pool settings from `config`.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    Ok(pool)
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Admin account (if configured)
/// - Background click worker
/// - Axum HTTP server, stopped by Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Admin seeding fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_pool(&config).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations applied");

    let pool = Arc::new(pool);
    let mapping_repository = Arc::new(PgMappingRepository::new(pool.clone()));
    let user_repository = Arc::new(PgUserRepository::new(pool.clone()));
    let about_repository = Arc::new(PgAboutRepository::new(pool.clone()));

    let shortening_service = Arc::new(ShorteningService::new(
        mapping_repository,
        Arc::new(RandomCodeGenerator::new()),
        config.base_url.clone(),
    ));
    let auth_service = Arc::new(AuthService::new(
        user_repository,
        Arc::new(JwtAuthenticator::new(
            &config.jwt_secret,
            config.token_ttl_hours,
        )),
    ));
    let about_service = Arc::new(AboutService::new(about_repository));

    if let Some(admin) = &config.admin {
        auth_service
            .ensure_admin(&admin.username, &admin.password)
            .await
            .context("Failed to seed admin account")?;
    }

    let (click_sender, click_rx) = mpsc::channel(config.click_queue_capacity);
    let worker = tokio::spawn(run_click_worker(
        click_rx,
        shortening_service.clone(),
        config.click_worker_concurrency,
    ));
    tracing::info!(
        concurrency = config.click_worker_concurrency,
        "Click worker started"
    );

    let state = AppState {
        shortening_service,
        auth_service,
        about_service,
        click_sender,
        conflate_delete_denial: config.conflate_delete_denial,
    };

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router held the last sender; the worker drains what is queued and exits.
    if let Err(e) = worker.await {
        tracing::warn!(error = %e, "Click worker ended abnormally");
    }

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => tracing::error!(error = %e, "Failed to listen for shutdown signal"),
    }
}
