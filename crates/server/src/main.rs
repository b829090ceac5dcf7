//! cloudinfo server entry point.
//!
//! Loads configuration, starts the scraping driver and serves the cached
//! product information as MCP tools on stdio transport.
//! Logging goes to stderr to avoid interfering with the JSON-RPC protocol on stdout.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use cloudinfo_client::{CatalogProvider, CloudInfoer, ScrapingDriver};
use cloudinfo_core::{AppConfig, CloudInfo, CloudInfoStore, MetricsReporter, PrometheusReporter};
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

mod handler;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;
    tracing::info!(providers = ?config.providers, "starting cloudinfo server on stdio transport");

    let mut infoers: HashMap<String, Arc<dyn CloudInfoer>> = HashMap::new();
    for provider in &config.providers {
        let path = config.catalog_path(provider);
        let catalog = CatalogProvider::open(&path)
            .await
            .with_context(|| format!("failed to open catalog for {provider} at {}", path.display()))?;
        infoers.insert(provider.clone(), Arc::new(catalog));
    }

    let store = Arc::new(CloudInfoStore::new(config.cache_long_ttl(), config.cache_short_ttl()));
    let metrics = PrometheusReporter::new()?;
    let reporter: Arc<dyn MetricsReporter> = Arc::new(metrics.clone());

    let driver = ScrapingDriver::new(config.renewal_interval(), infoers, Arc::clone(&store), reporter)?;
    let cancellation_token = CancellationToken::new();
    let scraping = driver.start(&cancellation_token)?;

    let info = CloudInfo::new(store, config.providers.iter().cloned())?;
    let server = serve_server(handler::CloudInfoServer::new(info, metrics), stdio()).await?;

    tokio::select! {
        result = server.waiting() => {
            result?;
            tracing::info!("client disconnected");
        }
        _ = tokio::signal::ctrl_c() => tracing::info!("interrupted"),
    }

    if !scraping.shutdown(config.shutdown_timeout()).await {
        tracing::warn!("exiting with refresh cycles still running");
    }

    Ok(())
}
