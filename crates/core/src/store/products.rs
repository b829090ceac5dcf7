//! Region-scoped product listings, images and versions.

use super::CloudInfoStore;
use super::key::CacheKey;
use crate::model::{Image, VmInfo};

impl CloudInfoStore {
    pub fn store_vms(&self, provider: &str, service: &str, region: &str, vms: Vec<VmInfo>) {
        self.vms.insert(CacheKey::vms(provider, service, region), vms);
    }

    pub fn get_vms(&self, provider: &str, service: &str, region: &str) -> Option<Vec<VmInfo>> {
        self.vms.get(&CacheKey::vms(provider, service, region))
    }

    pub fn store_images(&self, provider: &str, service: &str, region: &str, images: Vec<Image>) {
        self.images
            .insert(CacheKey::images(provider, service, region), images);
    }

    pub fn get_images(&self, provider: &str, service: &str, region: &str) -> Option<Vec<Image>> {
        self.images.get(&CacheKey::images(provider, service, region))
    }

    pub fn store_versions(&self, provider: &str, service: &str, region: &str, versions: Vec<String>) {
        self.versions
            .insert(CacheKey::versions(provider, service, region), versions);
    }

    pub fn get_versions(&self, provider: &str, service: &str, region: &str) -> Option<Vec<String>> {
        self.versions
            .get(&CacheKey::versions(provider, service, region))
    }
}
