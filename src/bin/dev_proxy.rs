use std::net::SocketAddr;

use tracing::info;
use usuarios::config::Config;
use usuarios::logger;
use usuarios::proxy::proxy_router;
use usuarios::shutdown::shutdown_signal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env();
    logger::init(&config.log_level);

    let app = proxy_router(config.api_url.clone());
    let addr = SocketAddr::from(([0, 0, 0, 0], config.proxy_port));
    info!(target = %config.api_url, "Proxying /api from http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
