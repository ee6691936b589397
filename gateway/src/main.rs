use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use todo_gateway::{ApiVariant, GatewayConfig, GatewayServer};

#[derive(Parser)]
#[command(name = "todo-gateway")]
#[command(about = "HTTP gateway in front of the upstream todo service", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on, e.g. 127.0.0.1:8080
    #[arg(short, long)]
    bind: Option<String>,

    /// Base URL of the upstream todo service
    #[arg(long)]
    external_api_url: Option<String>,

    /// Shape of the public API
    #[arg(long, value_enum)]
    variant: Option<ApiVariant>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_gateway=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = GatewayConfig::load(cli.config.as_deref())?;
    config.apply_env(|key: &str| std::env::var(key))?;
    if let Some(bind) = cli.bind {
        config.bind_address = bind;
    }
    if let Some(url) = cli.external_api_url {
        config.external_api_url = url;
    }
    if let Some(variant) = cli.variant {
        config.api_variant = variant;
    }
    config.validate()?;

    tracing::info!(
        bind_address = %config.bind_address,
        external_api_url = %config.external_api_url,
        connect_timeout_ms = ?config.connect_timeout_ms,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.bind_address).await?;
    let server = GatewayServer::new(config)?;
    server.run(listener).await?;

    Ok(())
}
