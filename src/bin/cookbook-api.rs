// Copyright (c) 2025 - Cowboy AI, Inc.
//! Cookbook API server
//!
//! Serves the recipe API over HTTP. Domain events always feed the in-process
//! read models. When `NATS_URL` is set, recipes are stored as event histories
//! in JetStream and events are also published to NATS; otherwise everything
//! lives in memory.
//!
//! # Environment Variables
//!
//! - `COOKBOOK_HOST`, `COOKBOOK_PORT`: bind address (default `0.0.0.0:8080`)
//! - `NATS_URL`: NATS server(s), comma-separated (optional; enables the
//!   JetStream store and event publication)
//! - `NATS_SUBJECT_PREFIX`: subject prefix (default `cookbook.recipes`)
//! - `COOKBOOK_SEED`: seed a sample recipe on startup (default `false`)
//! - `RUST_LOG`: log filter (default `info`)

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

use cookbook::aggregate::DefaultRecipeFactory;
use cookbook::nats::{NatsClient, NatsConfig, NatsEventPublisher};
use cookbook::publisher::{EventPublisher, FanoutPublisher, ProjectionPublisher};
use cookbook::repository::jetstream::{DEFAULT_STORE_PREFIX, DEFAULT_STREAM_NAME};
use cookbook::{
    router, seed, AppConfig, AppState, InMemoryRecipeProjection, InMemoryRecipeRepository,
    JetStreamRecipeRepository, OwnerOrAdminEvaluator, RecipeCommandService, RecipeQueryService,
    RecipeReadStore, RecipeRepository,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting cookbook API");

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    info!("Configuration loaded:");
    info!("  - Bind: {}:{}", config.host, config.port);
    info!("  - NATS: {}", config.nats_url.as_deref().unwrap_or("disabled"));
    info!("  - Seed: {}", config.seed);

    let read_store = Arc::new(InMemoryRecipeProjection::new());

    let mut publisher =
        FanoutPublisher::default().with(Arc::new(ProjectionPublisher::new(read_store.clone())));

    let repository: Arc<dyn RecipeRepository> = match &config.nats_url {
        Some(url) => {
            let client = NatsClient::new(NatsConfig::for_servers(url))
                .await
                .context("Failed to connect to NATS")?;
            let store = JetStreamRecipeRepository::new(
                client.jetstream(),
                DEFAULT_STREAM_NAME,
                DEFAULT_STORE_PREFIX,
            )
            .await
            .context("Failed to open recipe event store")?;

            publisher = publisher.with(Arc::new(NatsEventPublisher::new(
                client,
                config.nats_subject_prefix.clone(),
            )));
            Arc::new(store)
        }
        None => {
            info!("NATS_URL not set, recipes are kept in memory");
            Arc::new(InMemoryRecipeRepository::new())
        }
    };
    let publisher: Arc<dyn EventPublisher> = Arc::new(publisher);

    let stored = repository
        .list()
        .await
        .context("Failed to load stored recipes")?;
    let restored = read_store
        .rebuild(&stored)
        .await
        .context("Failed to restore read models")?;
    info!(restored, "Read models restored from write store");

    let commands = Arc::new(RecipeCommandService::new(
        repository.clone(),
        Arc::new(OwnerOrAdminEvaluator),
        publisher,
        Arc::new(DefaultRecipeFactory),
        read_store.clone(),
    ));
    let queries = RecipeQueryService::new(read_store);

    if config.seed {
        match seed::seed(&commands, repository.as_ref()).await {
            Ok(Some(recipe_id)) => info!(%recipe_id, "Sample data seeded"),
            Ok(None) => info!("Sample data already present"),
            Err(e) => warn!(error = %e, "Seeding failed"),
        }
    }

    let app = router(AppState::new(commands, queries));

    let address = config.bind_address()?;
    let listener = TcpListener::bind(address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!(error = %e, "Failed to install terminate handler");
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
