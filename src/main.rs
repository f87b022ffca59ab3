use std::net::SocketAddr;

use quiz_forge::{
    build_router,
    config::Config,
    database::{pool::create_pool, run_migrations},
    telemetry::init_tracing,
    AppState,
};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing(config.log_format);

    let pool = create_pool(&config).await?;
    info!("Running database migrations");
    run_migrations(&pool).await?;

    let addr: SocketAddr = config.server_address.parse()?;
    let app = build_router(AppState::new(pool, config));

    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
