use actix_web::{middleware::Logger, web, App, HttpServer};
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod api;
mod config;
mod domain;
mod metrics;
mod store;

use config::{Config, StoreBackend};
use store::{CustomerStore, InMemoryCustomerStore, ScyllaCustomerStore};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Default to INFO level, can be overridden with RUST_LOG env var
    // Example: RUST_LOG=debug cargo run
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,customer_service=debug")),
        )
        .init();

    tracing::info!("🚀 Starting customer service");

    let config = Config::from_env()?;
    tracing::debug!(?config, "Loaded configuration");

    // === 1. Customer store ===
    let store: Arc<dyn CustomerStore> = match config.store_backend {
        StoreBackend::Scylla => Arc::new(
            ScyllaCustomerStore::connect(&config.scylla_nodes, &config.scylla_keyspace).await?,
        ),
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory customer store; records are lost on restart");
            Arc::new(InMemoryCustomerStore::new())
        }
    };

    // === 2. Prometheus metrics ===
    let metrics = Arc::new(metrics::Metrics::new()?);
    let metrics_registry = Arc::new(metrics.registry().clone());

    // === 3. HTTP servers ===
    let store = web::Data::from(store);
    let metrics_data = web::Data::from(metrics);
    let json_limit = config.json_limit;

    tracing::info!("🌐 Serving customer API on http://{}", config.server_address());

    let api_server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(store.clone())
            .app_data(metrics_data.clone())
            .app_data(api::json_config(json_limit))
            .configure(api::routes)
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run();

    let metrics_server = metrics::start_metrics_server(
        metrics_registry,
        config.server_host.clone(),
        config.metrics_port,
    );

    tokio::try_join!(api_server, metrics_server)?;

    tracing::info!("👋 Customer service stopped");
    Ok(())
}
