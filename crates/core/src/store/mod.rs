//! Tiered in-memory cache for cloud product information.
//!
//! The store is purely passive: the scraping pipeline writes into it and the
//! read façade reads from it. It supports:
//!
//! - One typed table per category, so a category/type mismatch cannot compile
//! - Two TTL tiers: long-lived metadata and short-lived prices
//! - Last-write-wins overwrites; no history is kept
//! - Concurrent writers and readers without external locking

pub mod key;
mod metadata;
mod prices;
mod products;
mod table;

use std::collections::HashMap;
use std::time::Duration;

use crate::model::{AttrValues, Image, Price, Service, VmInfo};

pub use key::{CacheKey, Category, Tier};
use table::Table;

/// Cache of scraped provider data.
///
/// Every read returns `None` until the first write of that key, and again
/// once the entry outlives the TTL of its tier.
pub struct CloudInfoStore {
    long_ttl: Duration,
    short_ttl: Duration,
    services: Table<Vec<Service>>,
    regions: Table<HashMap<String, String>>,
    zones: Table<Vec<String>>,
    attributes: Table<AttrValues>,
    vms: Table<Vec<VmInfo>>,
    prices: Table<Price>,
    images: Table<Vec<Image>>,
    versions: Table<Vec<String>>,
    status: Table<String>,
}

impl CloudInfoStore {
    /// Create a store with the given long-lived and short-lived TTLs.
    pub fn new(long_ttl: Duration, short_ttl: Duration) -> Self {
        Self {
            long_ttl,
            short_ttl,
            services: Table::new(long_ttl),
            regions: Table::new(long_ttl),
            zones: Table::new(long_ttl),
            attributes: Table::new(long_ttl),
            vms: Table::new(long_ttl),
            prices: Table::new(short_ttl),
            images: Table::new(long_ttl),
            versions: Table::new(long_ttl),
            status: Table::new(long_ttl),
        }
    }

    /// TTL applied to entries of the given tier.
    pub fn ttl(&self, tier: Tier) -> Duration {
        match tier {
            Tier::LongLived => self.long_ttl,
            Tier::ShortLived => self.short_ttl,
        }
    }

    /// Delete expired entries in every category.
    ///
    /// Returns the number of deleted entries.
    pub fn purge_expired(&self) -> usize {
        self.services.purge_expired()
            + self.regions.purge_expired()
            + self.zones.purge_expired()
            + self.attributes.purge_expired()
            + self.vms.purge_expired()
            + self.prices.purge_expired()
            + self.images.purge_expired()
            + self.versions.purge_expired()
            + self.status.purge_expired()
    }

    /// Number of entries held for a category, expired ones included.
    pub fn len(&self, category: Category) -> usize {
        match category {
            Category::Services => self.services.len(),
            Category::Regions => self.regions.len(),
            Category::Zones => self.zones.len(),
            Category::Attributes => self.attributes.len(),
            Category::Vms => self.vms.len(),
            Category::Prices => self.prices.len(),
            Category::Images => self.images.len(),
            Category::Versions => self.versions.len(),
            Category::Status => self.status.len(),
        }
    }
}
