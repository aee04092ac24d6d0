use anyhow::{Context, Result};
use axum::Router;
use clap::Parser;
use guide_search_core::persist::{load_documents, load_snapshot, IndexPaths};
use guide_search_core::{EngineConfig, MatchMode, SearchEngine};
use guide_search_server::build_app;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// JSON/JSONL corpus file or directory, indexed at startup
    #[arg(long, conflicts_with = "index", required_unless_present = "index")]
    corpus: Option<String>,
    /// Snapshot directory written by `indexer build`
    #[arg(long)]
    index: Option<String>,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
    /// Default matching mode: exact or substring
    #[arg(long, default_value = "exact")]
    mode: MatchMode,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let config = EngineConfig { mode: args.mode, ..EngineConfig::default() };
    let engine = match (&args.corpus, &args.index) {
        (Some(corpus), _) => SearchEngine::new(load_documents(corpus)?, config),
        (None, Some(dir)) => SearchEngine::from_index(load_snapshot(&IndexPaths::new(dir))?, config),
        (None, None) => anyhow::bail!("either --corpus or --index is required"),
    };
    let app: Router = build_app(engine)?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse().context("parsing bind address")?;
    let listener = TcpListener::bind(addr).await.with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
