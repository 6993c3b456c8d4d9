//! Vidensbank entry-point: reads configuration, prepares persistence and
//! serves the site.

use actix_web::web;
use mockable::DefaultEnv;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use vidensbank::domain::verify_factor_table;
use vidensbank::inbound::http::health::HealthState;
use vidensbank::inbound::http::session_config::BuildMode;
use vidensbank::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use vidensbank::server::{AppConfig, ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    verify_factor_table().map_err(std::io::Error::other)?;

    let app = AppConfig::from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;

    let mut config = ServerConfig::new(app.clone());
    if let Some(url) = app.database_url.as_deref() {
        run_pending_migrations(url)
            .await
            .map_err(std::io::Error::other)?;
        let pool = DbPool::new(PoolConfig::new(url))
            .await
            .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(addr = %app.bind_addr, app_name = %app.app_name, "listening");
    server.await
}
