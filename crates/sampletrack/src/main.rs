mod app;
mod config;
mod events;
mod handlers;
mod service;
mod state;
mod storage;

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use listenfd::ListenFd;
use sampletrack_core::events::EventSubscriber;
use tokio::{net::TcpListener, signal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    app::create_app,
    config::Config,
    events::{run_relay, RelaySettings},
    state::AppState,
};

/// Log output format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    #[default]
    Text,
    Json,
}

/// SampleTrack - Track test samples and notify downstream services of results
#[derive(Parser, Debug)]
#[command(name = "sampletrack")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Host address to bind the server to
    #[arg(long, short = 'H', default_value = "0.0.0.0", env = "HOST")]
    host: String,

    /// Port to listen on
    #[arg(long, short, default_value = "3000", env = "PORT")]
    port: u16,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text, env = "LOG_FORMAT", ignore_case = true)]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.log_format);

    let config = Config::from_env();
    let state = AppState::new(&config).await?;

    // Trusted updates from other services
    let relay_settings = RelaySettings::from_config(&config);
    let subscriber: Arc<dyn EventSubscriber> = state.events.clone();
    let inbound = subscriber.subscribe(&relay_settings.topic).await?;
    let relay = tokio::spawn(run_relay(
        state.service.clone(),
        subscriber,
        inbound,
        relay_settings,
        state.subscribe_shutdown(),
    ));

    let app = create_app(state.clone());

    // Auto-reload support via listenfd
    let mut listenfd = ListenFd::from_env();
    let listener = match listenfd.take_tcp_listener(0)? {
        Some(listener) => {
            listener.set_nonblocking(true)?;
            TcpListener::from_std(listener)?
        }
        None => {
            let addr = format!("{}:{}", cli.host, cli.port);
            TcpListener::bind(&addr).await?
        }
    };

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state))
        .await?;

    if let Err(e) = relay.await {
        tracing::warn!(error = %e, "Relay task ended abnormally");
    }

    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "sampletrack=debug,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

/// Wait for shutdown signals (Ctrl+C or SIGTERM) and stop background tasks.
async fn shutdown_signal(state: AppState) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }

    state.signal_shutdown();
}
