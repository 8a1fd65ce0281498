use dohgate_api::{create_routes, AppState};
use std::net::SocketAddr;
use tracing::info;

pub async fn start_web_server(bind_addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    info!(
        bind_address = %bind_addr,
        endpoint_url = format!("http://{}/dns-query", bind_addr),
        "Starting DoH gateway"
    );

    let app = create_routes(state);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    info!("DoH gateway started successfully");

    axum::serve(listener, app).await?;

    Ok(())
}
