use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use streambox::{
    api::{create_router, AppState},
    config::Config,
    db::FileStore,
    services::providers::{CatalogApi, OmdbProvider},
};

const DEFAULT_LOG_FILTER: &str = "streambox=info,tower_http=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = Config::from_env()?;

    let store = FileStore::open(&config.data_dir).await?;
    let provider: Arc<dyn CatalogApi> = Arc::new(OmdbProvider::new(
        config.omdb_api_key.clone(),
        config.omdb_api_url.clone(),
    ));
    tracing::info!(provider = provider.name(), url = %config.omdb_api_url, "Catalog provider configured");

    // Initialize application state
    let state = AppState::new(provider, Arc::new(store)).await;
    let search_view = state.search_view.clone();

    // Create the router with all routes
    let app = create_router(state);

    // Start the server
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Server running");
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            search_view.unmount();
            tracing::info!("Shutting down, discarding in-flight searches");
        })
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
