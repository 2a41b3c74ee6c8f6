// Main entry point for the portal API server

use anyhow::{Context, Result};
use portal_core::{kernel::ServerDeps, server::build_app, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "debug,portal_core=debug,hyper=info"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Configuration failures are fatal and happen before anything else starts
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(false);
            tracing::error!(error = %e, "Failed to create environment");
            eprintln!("Failed to create environment: {e}");
            std::process::exit(1);
        }
    };

    init_tracing(config.env.verbose_log);
    tracing::info!("Starting portal API");
    tracing::debug!(env = ?config.env, "Configuration loaded");

    let deps = ServerDeps::from_config(&config).context("Failed to wire data source")?;
    let app = build_app(deps);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
