use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::io::AsyncReadExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use service_catalog::api::{self, envelope::InvocationRequest, handler::ServiceCatalogHandler};
use service_catalog::store::{memory::MemoryStore, postgres::PgConnector};
use service_catalog::{cli, config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout is reserved for `invoke` output
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "service_catalog=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = cli::Cli::parse();
    let cfg = config::load()?;

    let result = match args.command {
        Some(cli::Commands::Serve { port, in_memory }) => {
            run_server(cfg.clone(), port.unwrap_or(cfg.port), in_memory).await
        }
        Some(cli::Commands::Invoke { event }) => invoke_once(&cfg, event).await,
        None => run_server(cfg.clone(), cfg.port, false).await,
    };

    if let Err(ref e) = result {
        eprintln!("Error: {:?}", e);
    }
    result
}

async fn run_server(cfg: config::Config, port: u16, in_memory: bool) -> anyhow::Result<()> {
    let app = if in_memory {
        tracing::warn!("Using in-memory store; services are lost on exit");
        api::router(
            Arc::new(ServiceCatalogHandler::new(MemoryStore::new())),
            cfg.body_limit,
        )
    } else {
        tracing::info!("Using PostgreSQL store (one connection per request)");
        api::router(
            Arc::new(ServiceCatalogHandler::new(PgConnector::new(cfg.database_url))),
            cfg.body_limit,
        )
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("service catalog listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn invoke_once(cfg: &config::Config, event: Option<PathBuf>) -> anyhow::Result<()> {
    let raw = match event {
        Some(path) => tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("failed to read event file {}", path.display()))?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("failed to read event from stdin")?;
            buf
        }
    };

    let request: InvocationRequest =
        serde_json::from_str(&raw).context("event is not a valid invocation request")?;

    let handler = ServiceCatalogHandler::new(PgConnector::new(cfg.database_url.clone()));
    let response = handler.handle(request).await;
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
