//! Provider capability.
//!
//! Every cloud provider plugs into the scraping pipeline by implementing
//! [`CloudInfoer`]. It is the only extension point for adding a provider.
//!
//! ### Contract
//! - `initialize` returns the bulk price snapshot and is called once per full
//!   refresh cycle, before any per-service work.
//! - `get_service_images` is only called when `has_images` is true.
//! - `get_current_prices` is only called on the short-lived schedule, and only
//!   when `has_short_lived_price_info` is true.
//! - Any operation may fail on its own; a failure is never "no data".

pub mod catalog;
pub mod error;

use std::collections::HashMap;

use async_trait::async_trait;
use cloudinfo_core::model::{AttrValues, Image, Price, Service, VmInfo};

pub use catalog::{Catalog, CatalogProvider};
pub use error::ProviderError;

/// Bulk price snapshot: region id -> instance type -> price.
pub type PriceSnapshot = HashMap<String, HashMap<String, Price>>;

/// Operations a provider must supply to be scraped.
#[async_trait]
pub trait CloudInfoer: Send + Sync {
    /// Fetch the bulk price snapshot of all instance types in all regions.
    async fn initialize(&self) -> Result<PriceSnapshot, ProviderError>;

    async fn get_services(&self) -> Result<Vec<Service>, ProviderError>;

    /// Distinct values of `attribute` (see `cloudinfo_core::model::ATTRIBUTES`) offered by a service.
    async fn get_attribute_values(&self, service: &str, attribute: &str) -> Result<AttrValues, ProviderError>;

    /// Regions of a service, keyed by display name with the region id as value.
    async fn get_regions(&self, service: &str) -> Result<HashMap<String, String>, ProviderError>;

    async fn get_products(&self, service: &str, region_id: &str) -> Result<Vec<VmInfo>, ProviderError>;

    fn has_images(&self) -> bool;

    async fn get_service_images(&self, service: &str, region_id: &str) -> Result<Vec<Image>, ProviderError>;

    async fn get_versions(&self, service: &str, region_id: &str) -> Result<Vec<String>, ProviderError>;

    fn has_short_lived_price_info(&self) -> bool;

    /// Current prices of every instance type in a region.
    async fn get_current_prices(&self, region_id: &str) -> Result<HashMap<String, Price>, ProviderError>;
}
