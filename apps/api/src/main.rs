use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use jobgenie::cli::{self, Cli, Command};
use jobgenie::config::Config;
use jobgenie::fetcher::bulk::PageFetcher;
use jobgenie::pdf_client::HttpPdfRenderer;
use jobgenie::routes::build_router;
use jobgenie::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Scrape {
            url_file,
            output_dir,
        } => cli::run_scrape(&config, &url_file, output_dir).await,
        Command::Tailor {
            resume,
            job,
            format,
        } => cli::run_tailor(&resume, &job, format).await,
        Command::Skills { resume, job } => cli::run_skills(&resume, &job).await,
    }
}

async fn serve(config: Config) -> Result<()> {
    info!("Starting JobGenie API v{}", env!("CARGO_PKG_VERSION"));

    let fetcher = PageFetcher::new(&config.fetch)?;
    info!(
        "Page fetcher initialized (timeout {}s, delay {}ms)",
        config.fetch.timeout_secs, config.fetch.delay_ms
    );

    let pdf = Arc::new(HttpPdfRenderer::new(&config.pdf_service_url)?);
    info!("PDF service client initialized ({})", config.pdf_service_url);

    let state = AppState {
        config: config.clone(),
        fetcher,
        pdf,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");
    info!("Scraped pages are written to {}", config.scrape_output_dir.display());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
