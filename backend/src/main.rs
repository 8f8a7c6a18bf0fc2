//! Server entry-point: loads settings, migrates the database and serves the
//! REST API.

mod server;

use std::io;

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use ludivault::inbound::http::health::HealthState;
use ludivault::outbound::identity::build_login_providers;
use ludivault::outbound::persistence::{DbPool, run_migrations};
use ludivault::settings::{AppSettings, BuildMode};

use server::{ServerConfig, create_server};

fn default_filter() -> EnvFilter {
    let level = if cfg!(debug_assertions) { "debug" } else { "info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

fn startup_error(err: impl std::fmt::Display) -> io::Error {
    io::Error::other(err.to_string())
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt().with_env_filter(default_filter()).json().try_init() {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::from_process().map_err(startup_error)?;
    let mode = BuildMode::from_debug_assertions();
    let key = settings.session_key(mode).map_err(startup_error)?;
    let base_address = settings.base_address().map_err(startup_error)?;

    let database_url = settings.database_url().map_err(startup_error)?;
    run_migrations(database_url).await.map_err(startup_error)?;

    let pool_config = settings.pool_config().map_err(startup_error)?;
    let pool = DbPool::new(pool_config).await.map_err(startup_error)?;

    let providers = settings.login_providers().map_err(startup_error)?;
    let login = build_login_providers(providers, &base_address)
        .await
        .map_err(startup_error)?;
    let names: Vec<&str> = login.names().collect();
    info!(providers = ?names, "login providers ready");

    let config = ServerConfig::new(
        key,
        settings.session_cookie_secure(),
        settings.listen(),
        pool,
        login,
    )
    .with_cookie_domain(settings.cookie_domain().map_err(startup_error)?);

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(listen = settings.listen(), "server started");
    server.await
}
