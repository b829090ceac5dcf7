//! Short-lived price entries, keyed by (provider, region, instance type).

use super::CloudInfoStore;
use super::key::CacheKey;
use crate::model::Price;

impl CloudInfoStore {
    pub fn store_price(&self, provider: &str, region: &str, instance_type: &str, price: Price) {
        self.prices
            .insert(CacheKey::price(provider, region, instance_type), price);
    }

    pub fn get_price(&self, provider: &str, region: &str, instance_type: &str) -> Option<Price> {
        self.prices
            .get(&CacheKey::price(provider, region, instance_type))
    }
}
