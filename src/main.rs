//! Volunteer attendance service.
//!
//! Loads the attendance configuration and serves the HTTP API.

use anyhow::Result;
use tracing::info;
use volunteer_attendance::api::{AppState, create_router};
use volunteer_attendance::config::ConfigLoader;

/// Environment variable naming the configuration directory.
const CONFIG_DIR_ENV: &str = "VOLUNTEER_CONFIG_DIR";

const DEFAULT_CONFIG_DIR: &str = "./config/attendance";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!(
        "Starting volunteer attendance service v{}",
        env!("CARGO_PKG_VERSION")
    );

    let config_dir =
        std::env::var(CONFIG_DIR_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let config = ConfigLoader::load(&config_dir)?;
    let addr = config.server().socket_addr();

    let app = create_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
