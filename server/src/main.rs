mod api;
mod config;
mod db;
mod models;
mod repository;
mod store;
mod telemetry;
mod types;

use anyhow::Context;
use config::{Config, StoreBackend};
use repository::RecipeRepository;
use std::env;
use std::sync::Arc;
use store::{MemoryStore, MongoStore, RecipeStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Check for --openapi flag to dump spec and exit
    if env::args().any(|arg| arg == "--openapi") {
        let spec = api::openapi()
            .to_pretty_json()
            .context("failed to render OpenAPI document")?;
        println!("{}", spec);
        return Ok(());
    }

    let config = Config::from_env()?;
    let telemetry = telemetry::init();

    let result = run(config).await;
    if let Err(e) = &result {
        tracing::error!("Server exited with error: {:#}", e);
    }

    telemetry.shutdown();
    result
}

async fn run(config: Config) -> anyhow::Result<()> {
    // The Mongo client lives for the whole process and is shut down explicitly
    // after the server stops.
    let (store, client): (Arc<dyn RecipeStore>, Option<mongodb::Client>) = match &config.backend
    {
        StoreBackend::Mongo {
            uri,
            database,
            collection,
        } => {
            let client = db::connect(uri, database, config.connect_timeout)
                .await
                .context("failed to connect to MongoDB")?;
            tracing::info!("Connected to MongoDB database {}", database);

            let store: Arc<dyn RecipeStore> =
                Arc::new(MongoStore::new(&client.database(database), collection));
            (store, Some(client))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store, recipes will not survive a restart");
            let store: Arc<dyn RecipeStore> = Arc::new(MemoryStore::new());
            (store, None)
        }
    };

    let recipes = RecipeRepository::new(store);
    tracing::info!(
        backend = recipes.backend_name(),
        timeout_secs = config.store_timeout.as_secs(),
        "Recipe store ready"
    );

    let state = Arc::new(api::ApiContext {
        recipes,
        store_timeout: config.store_timeout,
    });
    let app = telemetry::with_http_tracing(api::router(state));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    let local_addr = listener.local_addr()?;

    tracing::info!("Server listening on {}", local_addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", local_addr);
    tracing::info!(
        "OpenAPI spec available at http://{}/api-docs/openapi.json",
        local_addr
    );

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    if let Some(client) = client {
        client.shutdown().await;
        tracing::info!("MongoDB client closed");
    }

    served.context("server error")
}

/// Resolves on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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

    tracing::info!("Shutdown signal received, draining connections");
}
