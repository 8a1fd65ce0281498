use clap::Parser;
use dohgate_api::AppState;
use dohgate_domain::CliOverrides;
use std::net::SocketAddr;
use tracing::info;

mod bootstrap;
mod server;

#[derive(Parser)]
#[command(name = "dohgate")]
#[command(version)]
#[command(about = "DNS-over-HTTPS gateway in front of a conventional TCP resolver")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// HTTP listen port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Default upstream resolver host
    #[arg(long)]
    upstream_host: Option<String>,

    /// Default upstream resolver port
    #[arg(long)]
    upstream_port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        http_port: cli.port,
        bind_address: cli.bind,
        upstream_host: cli.upstream_host,
        upstream_port: cli.upstream_port,
        log_level: cli.log_level,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting dohgate v{}", env!("CARGO_PKG_VERSION"));
    info!(upstream = %config.upstream.endpoint(), "Default upstream resolver");

    let state = AppState::new(&config);

    let bind_addr: SocketAddr =
        format!("{}:{}", config.server.bind_address, config.server.http_port).parse()?;

    server::start_web_server(bind_addr, state).await?;

    info!("Server shutdown complete");
    Ok(())
}
