//! Read façade over the cloud info store.
//!
//! Serves cached data only; it never calls a provider. A missing entry is
//! reported as [`Error::NotCached`] carrying the key that has not landed yet.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use crate::Error;
use crate::model::{ATTRIBUTES, Image, ProductDetails, Provider, Service};
use crate::store::{CacheKey, CloudInfoStore};

/// Entry point for cached cloud product information.
#[derive(Clone)]
pub struct CloudInfo {
    providers: BTreeSet<String>,
    store: Arc<CloudInfoStore>,
}

impl CloudInfo {
    /// Create a façade serving the given providers from the store.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if no provider is given.
    pub fn new(store: Arc<CloudInfoStore>, providers: impl IntoIterator<Item = String>) -> Result<Self, Error> {
        let providers: BTreeSet<String> = providers.into_iter().collect();
        if providers.is_empty() {
            return Err(Error::InvalidInput("no providers configured".into()));
        }
        Ok(Self { providers, store })
    }

    fn ensure_supported(&self, provider: &str) -> Result<(), Error> {
        if self.providers.contains(provider) {
            Ok(())
        } else {
            Err(Error::UnsupportedProvider(provider.to_string()))
        }
    }

    /// All configured providers with their services.
    ///
    /// Providers whose services are not cached yet are listed without services.
    pub fn get_providers(&self) -> Vec<Provider> {
        self.providers
            .iter()
            .map(|name| match self.get_provider(name) {
                Ok(provider) => provider,
                Err(e) => {
                    tracing::warn!(provider = %name, error = %e, "could not retrieve provider");
                    Provider::new(name.as_str())
                }
            })
            .collect()
    }

    pub fn get_provider(&self, provider: &str) -> Result<Provider, Error> {
        let services = self.get_services(provider)?;
        Ok(Provider { services, ..Provider::new(provider) })
    }

    pub fn get_services(&self, provider: &str) -> Result<Vec<Service>, Error> {
        self.ensure_supported(provider)?;
        self.store
            .get_services(provider)
            .ok_or_else(|| Error::NotCached(CacheKey::services(provider)))
    }

    /// Names of the attributes that can be queried with [`CloudInfo::get_attr_values`].
    pub fn get_attributes(&self) -> Vec<&'static str> {
        ATTRIBUTES.to_vec()
    }

    pub fn get_attr_values(&self, provider: &str, service: &str, attribute: &str) -> Result<Vec<f64>, Error> {
        self.ensure_supported(provider)?;
        if !ATTRIBUTES.contains(&attribute) {
            return Err(Error::InvalidInput(format!("unsupported attribute: {attribute}")));
        }
        self.store
            .get_attribute(provider, service, attribute)
            .map(|values| values.float_values())
            .ok_or_else(|| Error::NotCached(CacheKey::attribute(provider, service, attribute)))
    }

    pub fn get_zones(&self, provider: &str, region: &str) -> Result<Vec<String>, Error> {
        self.ensure_supported(provider)?;
        self.store
            .get_zones(provider, region)
            .ok_or_else(|| Error::NotCached(CacheKey::zones(provider, region)))
    }

    /// Regions of a service, keyed by display name with the region id as value.
    pub fn get_regions(&self, provider: &str, service: &str) -> Result<HashMap<String, String>, Error> {
        self.ensure_supported(provider)?;
        self.store
            .get_regions(provider, service)
            .ok_or_else(|| Error::NotCached(CacheKey::regions(provider, service)))
    }

    /// Products of a region merged with their latest cached prices.
    pub fn get_product_details(&self, provider: &str, service: &str, region: &str) -> Result<Vec<ProductDetails>, Error> {
        self.ensure_supported(provider)?;
        let vms = self
            .store
            .get_vms(provider, service, region)
            .ok_or_else(|| Error::NotCached(CacheKey::vms(provider, service, region)))?;

        let details = vms
            .into_iter()
            .map(|vm| match self.store.get_price(provider, region, &vm.instance_type) {
                Some(price) => ProductDetails::new(vm).with_price(&price),
                None => {
                    tracing::debug!(instance_type = %vm.instance_type, "price info not yet cached");
                    ProductDetails::new(vm)
                }
            })
            .collect();

        Ok(details)
    }

    /// Completion timestamp (unix millis) of the provider's last refresh cycle.
    pub fn get_status(&self, provider: &str) -> Result<String, Error> {
        self.ensure_supported(provider)?;
        self.store
            .get_status(provider)
            .ok_or_else(|| Error::NotCached(CacheKey::status(provider)))
    }

    pub fn get_service_images(&self, provider: &str, service: &str, region: &str) -> Result<Vec<Image>, Error> {
        self.ensure_supported(provider)?;
        self.store
            .get_images(provider, service, region)
            .ok_or_else(|| Error::NotCached(CacheKey::images(provider, service, region)))
    }

    pub fn get_versions(&self, provider: &str, service: &str, region: &str) -> Result<Vec<String>, Error> {
        self.ensure_supported(provider)?;
        self.store
            .get_versions(provider, service, region)
            .ok_or_else(|| Error::NotCached(CacheKey::versions(provider, service, region)))
    }
}
