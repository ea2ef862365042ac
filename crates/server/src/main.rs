use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use draftroom_core::{
    load_config, validate_config, BuiltinCatalog, JsonFileCatalog, PlayerCatalog, StatLineScorer,
};
use draftroom_server::{api::create_router, state::AppState};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("DRAFTROOM_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!(
        "League: {} teams, roster capacity {}, designated team {}",
        config.league.teams.len(),
        config.draft.roster_capacity,
        config.draft.designated_team_id
    );

    // Load the player pool
    let catalog: Box<dyn PlayerCatalog> = match &config.catalog.path {
        Some(path) => {
            info!("Loading players from {:?}", path);
            Box::new(JsonFileCatalog::new(path, Box::new(StatLineScorer)))
        }
        None => {
            info!("No catalog path configured, using built-in players");
            Box::new(BuiltinCatalog::new(Box::new(StatLineScorer)))
        }
    };
    let players = catalog.load().context("Failed to load player catalog")?;
    info!("Loaded {} players", players.len());

    // Create app state (ledger, orchestrator, WebSocket sink)
    let state = Arc::new(AppState::build(config.clone(), players));
    let orchestrator = state.orchestrator().clone();

    // Create router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    // Stop the pick timer
    info!("Server shutting down...");
    orchestrator.shutdown().await;
    info!("Draft timer stopped");

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
