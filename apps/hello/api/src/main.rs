use axum_helpers::server::{create_app, create_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use eyre::WrapErr;
use tracing::info;

mod api;
mod config;
mod openapi;

use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(config.environment, config.app);

    let router = create_router::<openapi::ApiDoc>(api::routes());

    info!(
        address = %config.server.address(),
        "Starting {} v{}",
        config.app.name,
        config.app.version
    );

    create_app(router, &config.server)
        .await
        .wrap_err_with(|| format!("server failed on {}", config.server.address()))?;

    info!("Hello API shutdown complete");
    Ok(())
}
