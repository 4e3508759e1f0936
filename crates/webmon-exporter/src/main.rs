use anyhow::{Context, Result};
use chrono::Utc;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing_subscriber::EnvFilter;
use webmon_collector::access_log::AccessLogSource;
use webmon_collector::http_status::HttpStatusSource;
use webmon_collector::StatusSource;
use webmon_exporter::app;
use webmon_exporter::config::{ExporterConfig, SourceConfig};
use webmon_exporter::metrics::ExporterMetrics;
use webmon_exporter::poller::Poller;
use webmon_exporter::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("webmon_exporter=info".parse()?)
                .add_directive("webmon_collector=info".parse()?),
        )
        .init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config/exporter.toml".to_string());
    let config = ExporterConfig::load(&config_path)
        .with_context(|| format!("Failed to load config '{config_path}'"))?;

    let registry = prometheus::Registry::new();
    let metrics = Arc::new(ExporterMetrics::new(&registry)?);

    let source: Box<dyn StatusSource> = match &config.source {
        SourceConfig::HttpStatus { url, timeout_secs } => Box::new(HttpStatusSource::new(
            url.clone(),
            Duration::from_secs(*timeout_secs),
        )?),
        SourceConfig::AccessLog { path } => Box::new(AccessLogSource::new(path.clone())),
    };

    tracing::info!(
        source = source.name(),
        listen_port = config.listen_port,
        interval_secs = config.poll_interval_secs,
        "webmon-exporter starting"
    );

    let poller = Poller::new(source, metrics, config.poll_interval_secs);
    let poll_handle = tokio::spawn(poller.run());

    let state = AppState {
        registry,
        config: Arc::new(config.clone()),
        start_time: Utc::now(),
    };

    // Failure to bind the exposition listener is the only fatal error.
    let addr: SocketAddr = format!("0.0.0.0:{}", config.listen_port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind metrics listener on {addr}"))?;
    let server = axum::serve(listener, app::build_router(state));

    tracing::info!(listen = %addr, "Exposition endpoint started");

    tokio::select! {
        result = server.with_graceful_shutdown(async { signal::ctrl_c().await.ok(); }) => {
            if let Err(e) = result {
                tracing::error!(error = %e, "HTTP server error");
            }
        }
        _ = signal::ctrl_c() => {
            tracing::info!("Shutting down gracefully");
        }
    }

    poll_handle.abort();
    tracing::info!("Exporter stopped");

    Ok(())
}
