//! HTTP server initialization and runtime setup.
//!
//! Handles database connection, migrations, provider gateway construction and
//! the Axum server lifecycle.

use crate::config::Config;
use crate::infrastructure::persistence::PgUserRepository;
use crate::infrastructure::provider::HttpShortenerGateway;
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::Blacklist;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool (with configured limits)
/// - migrations
/// - the provider HTTP gateway
/// - the Axum HTTP server
///
/// # Errors
///
/// Returns an error if the database connection, bind, or server runtime fails.
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;

    let users = Arc::new(PgUserRepository::new(Arc::new(pool)));
    let gateway = Arc::new(HttpShortenerGateway::new(
        config.provider_base_url.clone(),
        config.provider_timeout_secs,
    )?);

    let state = AppState::new(
        users,
        gateway,
        Blacklist::new(config.blacklist.clone()),
        config.bot_token.clone(),
    );

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;

    Ok(())
}
