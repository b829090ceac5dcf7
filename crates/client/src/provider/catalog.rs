//! File-backed provider.
//!
//! Serves a provider's product information from a JSON catalog file:
//!
//! ```json
//! {
//!   "services": ["compute"],
//!   "regions": { "EU (Frankfurt)": "eu-central-1" },
//!   "products": { "eu-central-1": [{ "type": "c1.xlarge", "cpusPerVm": 2, "memPerVm": 32, "onDemandPrice": 0.32 }] },
//!   "images": {},
//!   "versions": {},
//!   "shortLivedPrices": true
//! }
//! ```
//!
//! `initialize` reloads the file, so every full refresh picks up edits.
//! `get_current_prices` reads the file again on each call.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use cloudinfo_core::model::{AttrValues, CPU, Image, MEMORY, Price, Service, VmInfo};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use super::{CloudInfoer, PriceSnapshot, ProviderError};

/// Product information of one provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub services: Vec<String>,
    /// Display name -> region id, shared by all services.
    pub regions: HashMap<String, String>,
    /// Region id -> products.
    #[serde(default)]
    pub products: HashMap<String, Vec<VmInfo>>,
    /// Region id -> images.
    #[serde(default)]
    pub images: HashMap<String, Vec<Image>>,
    /// Region id -> versions.
    #[serde(default)]
    pub versions: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub short_lived_prices: bool,
}

impl Catalog {
    fn check_service(&self, service: &str) -> Result<(), ProviderError> {
        if self.services.iter().any(|s| s == service) {
            Ok(())
        } else {
            Err(ProviderError::UnknownService(service.to_string()))
        }
    }

    fn check_region(&self, region_id: &str) -> Result<(), ProviderError> {
        if self.regions.values().any(|id| id == region_id) {
            Ok(())
        } else {
            Err(ProviderError::UnknownRegion(region_id.to_string()))
        }
    }

    fn prices(&self, region_id: &str) -> HashMap<String, Price> {
        self.products
            .get(region_id)
            .into_iter()
            .flatten()
            .map(|vm| (vm.instance_type.clone(), Price::new(vm.on_demand_price, vm.spot_price.clone())))
            .collect()
    }

    fn price_snapshot(&self) -> PriceSnapshot {
        self.regions
            .values()
            .map(|region_id| (region_id.clone(), self.prices(region_id)))
            .collect()
    }

    fn attribute_values(&self, attribute: &str) -> Result<AttrValues, ProviderError> {
        let select: fn(&VmInfo) -> f64 = match attribute {
            CPU => |vm: &VmInfo| vm.cpus,
            MEMORY => |vm: &VmInfo| vm.mem,
            other => return Err(ProviderError::Catalog(format!("unsupported attribute: {other}"))),
        };
        Ok(AttrValues::from_floats(self.products.values().flatten().map(select)))
    }
}

/// Provider backed by a catalog file.
pub struct CatalogProvider {
    path: PathBuf,
    catalog: RwLock<Arc<Catalog>>,
}

impl CatalogProvider {
    /// Open a catalog file, failing if it cannot be read or parsed.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, ProviderError> {
        let path = path.as_ref().to_path_buf();
        let catalog = read_catalog(&path).await?;
        Ok(Self { path, catalog: RwLock::new(Arc::new(catalog)) })
    }

    fn current(&self) -> Arc<Catalog> {
        self.catalog.read().clone()
    }
}

async fn read_catalog(path: &Path) -> Result<Catalog, ProviderError> {
    let bytes = tokio::fs::read(path).await?;
    let catalog: Catalog = serde_json::from_slice(&bytes)?;
    tracing::debug!(path = %path.display(), services = catalog.services.len(), "loaded catalog");
    Ok(catalog)
}

#[async_trait]
impl CloudInfoer for CatalogProvider {
    async fn initialize(&self) -> Result<PriceSnapshot, ProviderError> {
        let catalog = Arc::new(read_catalog(&self.path).await?);
        *self.catalog.write() = Arc::clone(&catalog);
        Ok(catalog.price_snapshot())
    }

    async fn get_services(&self) -> Result<Vec<Service>, ProviderError> {
        Ok(self.current().services.iter().map(Service::new).collect())
    }

    async fn get_attribute_values(&self, service: &str, attribute: &str) -> Result<AttrValues, ProviderError> {
        let catalog = self.current();
        catalog.check_service(service)?;
        catalog.attribute_values(attribute)
    }

    async fn get_regions(&self, service: &str) -> Result<HashMap<String, String>, ProviderError> {
        let catalog = self.current();
        catalog.check_service(service)?;
        Ok(catalog.regions.clone())
    }

    async fn get_products(&self, service: &str, region_id: &str) -> Result<Vec<VmInfo>, ProviderError> {
        let catalog = self.current();
        catalog.check_service(service)?;
        catalog.check_region(region_id)?;
        Ok(catalog.products.get(region_id).cloned().unwrap_or_default())
    }

    fn has_images(&self) -> bool {
        !self.current().images.is_empty()
    }

    async fn get_service_images(&self, service: &str, region_id: &str) -> Result<Vec<Image>, ProviderError> {
        let catalog = self.current();
        catalog.check_service(service)?;
        catalog.check_region(region_id)?;
        Ok(catalog.images.get(region_id).cloned().unwrap_or_default())
    }

    async fn get_versions(&self, service: &str, region_id: &str) -> Result<Vec<String>, ProviderError> {
        let catalog = self.current();
        catalog.check_service(service)?;
        catalog.check_region(region_id)?;
        Ok(catalog.versions.get(region_id).cloned().unwrap_or_default())
    }

    fn has_short_lived_price_info(&self) -> bool {
        self.current().short_lived_prices
    }

    async fn get_current_prices(&self, region_id: &str) -> Result<HashMap<String, Price>, ProviderError> {
        let catalog = read_catalog(&self.path).await?;
        catalog.check_region(region_id)?;
        Ok(catalog.prices(region_id))
    }
}
