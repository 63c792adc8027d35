use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use adboard_server::config::{self, ServerConfig};
use adboard_server::rest::{self, AppState};
use adboard_server::store::InMemoryAdvertisementStore;
use adboard_server::{logging, shutdown};

#[derive(Parser)]
#[command(name = "adboard-server", version, about = "Advertisement board REST server")]
struct Opts {
    #[arg(short, long, help = "Path to YAML config file")]
    config: Option<PathBuf>,

    #[arg(long, help = "REST listen address (overrides config and env)")]
    bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let opts = Opts::parse();

    let mut config = match &opts.config {
        Some(path) => config::load_from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ServerConfig::default(),
    };
    config.apply_env(|key| std::env::var(key).ok())?;
    if let Some(bind) = opts.bind {
        config.rest_addr = bind;
    }
    config.validate()?;

    logging::init(&config.log);

    let store = Arc::new(InMemoryAdvertisementStore::new());
    let state = AppState::new(store, &config.rate_limit);
    let app = rest::router(state);

    let rest_addr = config.rest_addr;
    let listener = tokio::net::TcpListener::bind(rest_addr)
        .await
        .with_context(|| format!("binding {rest_addr}"))?;
    tracing::info!(
        %rest_addr,
        capacity = config.rate_limit.capacity,
        refill_per_second = config.rate_limit.refill_per_second,
        "REST server starting"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown::wait_for_shutdown())
        .await?;

    tracing::info!("REST server stopped");
    Ok(())
}
