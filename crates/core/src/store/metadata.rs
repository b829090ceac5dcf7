//! Provider metadata: services, regions, zones, attribute values and status.

use std::collections::HashMap;

use super::CloudInfoStore;
use super::key::CacheKey;
use crate::model::{AttrValues, Service};

impl CloudInfoStore {
    pub fn store_services(&self, provider: &str, services: Vec<Service>) {
        self.services.insert(CacheKey::services(provider), services);
    }

    pub fn get_services(&self, provider: &str) -> Option<Vec<Service>> {
        self.services.get(&CacheKey::services(provider))
    }

    /// Store the regions of a service, keyed by display name with the region id as value.
    pub fn store_regions(&self, provider: &str, service: &str, regions: HashMap<String, String>) {
        self.regions.insert(CacheKey::regions(provider, service), regions);
    }

    pub fn get_regions(&self, provider: &str, service: &str) -> Option<HashMap<String, String>> {
        self.regions.get(&CacheKey::regions(provider, service))
    }

    pub fn store_zones(&self, provider: &str, region: &str, zones: Vec<String>) {
        self.zones.insert(CacheKey::zones(provider, region), zones);
    }

    pub fn get_zones(&self, provider: &str, region: &str) -> Option<Vec<String>> {
        self.zones.get(&CacheKey::zones(provider, region))
    }

    pub fn store_attribute(&self, provider: &str, service: &str, attribute: &str, values: AttrValues) {
        self.attributes
            .insert(CacheKey::attribute(provider, service, attribute), values);
    }

    pub fn get_attribute(&self, provider: &str, service: &str, attribute: &str) -> Option<AttrValues> {
        self.attributes
            .get(&CacheKey::attribute(provider, service, attribute))
    }

    /// Store the completion marker of the provider's last refresh cycle.
    pub fn store_status(&self, provider: &str, status: String) {
        self.status.insert(CacheKey::status(provider), status);
    }

    pub fn get_status(&self, provider: &str) -> Option<String> {
        self.status.get(&CacheKey::status(provider))
    }
}
