mod app;
mod config;
mod error;
mod handlers;
mod housekeeper;
mod profile;
mod responses;
mod state;
mod store;

use anyhow::Result;
use clap::Parser;
use listenfd::ListenFd;
use tokio::{net::TcpListener, signal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    app::create_app,
    config::Config,
    housekeeper::{Housekeeper, SWEEP_INTERVAL},
    state::AppState,
    store::CredentialStore,
};

/// Mock OAuth2/OIDC identity provider for exercising client integrations
#[derive(Parser, Debug)]
#[command(name = "oidc-mock")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Address to bind the server to
    #[arg(long, short = 'b', default_value = "0.0.0.0", env = "BIND_ADDRESS")]
    bind_address: String,

    /// Port to listen on
    #[arg(long, short, default_value = "8080", env = "PORT")]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "oidc_mock=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    // One store instance shared by the request handlers and the sweeper,
    // alive for the process lifetime.
    let store = CredentialStore::new();
    let housekeeper = Housekeeper::spawn(store.clone(), SWEEP_INTERVAL);

    let app = create_app(AppState::new(config.clone(), store));

    // Auto-reload support via listenfd
    let mut listenfd = ListenFd::from_env();
    let listener = match listenfd.take_tcp_listener(0)? {
        // If we are given a tcp listener on listen fd 0, use that one
        Some(listener) => {
            listener.set_nonblocking(true)?;
            TcpListener::from_std(listener)?
        }
        // Otherwise fall back to CLI-specified address:port
        None => {
            let addr = format!("{}:{}", cli.bind_address, cli.port);
            TcpListener::bind(&addr).await?
        }
    };

    tracing::info!("listening on {}", listener.local_addr()?);
    tracing::info!(
        "authorization endpoint: {}",
        config.endpoint_url(&config.authorization_endpoint)
    );
    tracing::info!("token endpoint: {}", config.endpoint_url(&config.token_endpoint));
    tracing::info!(
        "userinfo endpoint: {}",
        config.endpoint_url(&config.userinfo_endpoint)
    );
    tracing::info!("discovery: {}", config.endpoint_url("/.well-known/openid_configuration"));

    // Run the server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    housekeeper.shutdown().await;
    tracing::info!("Server stopped");
    Ok(())
}

/// Wait for shutdown signals (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
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
}
