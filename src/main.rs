use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{error, info};
use usuarios::config::Config;
use usuarios::shutdown::shutdown_signal;
use usuarios::{PgStorage, UsuariosService, api, logger};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env();
    logger::init(&config.log_level);

    let storage = PgStorage::connect_lazy(&config.database)?;
    // An unreachable database is not fatal; /api/health reports it.
    if let Err(e) = storage.init_schema().await {
        error!(error = %e, "failed to initialise usuarios table");
    }

    let service = Arc::new(UsuariosService::new(Arc::new(storage)));
    let app = api::router(service, config.request_timeout);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(database = %config.database.name, "Server running at http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
