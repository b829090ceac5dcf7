//! Scraping error types.

use std::fmt;
use std::time::Duration;

use crate::provider::ProviderError;

/// Step of the per-region chain in a full refresh cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionStage {
    Products,
    Images,
    Versions,
}

impl fmt::Display for RegionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RegionStage::Products => "products",
            RegionStage::Images => "images",
            RegionStage::Versions => "versions",
        })
    }
}

/// Errors from constructing or running the scraping pipeline.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    /// The driver was constructed without any provider.
    #[error("no providers configured")]
    NoProviders,

    /// A periodic interval must be non-zero.
    #[error("invalid interval: {0:?}")]
    InvalidInterval(Duration),

    #[error("failed to retrieve attribute values (provider: {provider}, service: {service}, attribute: {attribute}): {source}")]
    Attributes {
        provider: String,
        service: String,
        attribute: String,
        #[source]
        source: ProviderError,
    },

    #[error("failed to retrieve regions (provider: {provider}, service: {service}): {source}")]
    Regions {
        provider: String,
        service: String,
        #[source]
        source: ProviderError,
    },

    #[error("failed to retrieve {stage} (provider: {provider}, service: {service}, region: {region}): {source}")]
    Region {
        provider: String,
        service: String,
        region: String,
        stage: RegionStage,
        #[source]
        source: ProviderError,
    },
}
