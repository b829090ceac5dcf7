//! Composite cache keys.
//!
//! Every entry is addressed by its category plus the provider and whichever
//! of service, region, attribute and instance type the category is scoped by.
//! Keys of different providers never collide.

use std::fmt;

/// TTL class of a cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Structural metadata: services, regions, zones, attributes, VMs, images, versions, status.
    LongLived,
    /// Prices.
    ShortLived,
}

/// The kind of data held under a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Services,
    Regions,
    Zones,
    Attributes,
    Vms,
    Prices,
    Images,
    Versions,
    Status,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Services => "services",
            Category::Regions => "regions",
            Category::Zones => "zones",
            Category::Attributes => "attributes",
            Category::Vms => "vms",
            Category::Prices => "prices",
            Category::Images => "images",
            Category::Versions => "versions",
            Category::Status => "status",
        }
    }

    pub fn tier(&self) -> Tier {
        match self {
            Category::Prices => Tier::ShortLived,
            _ => Tier::LongLived,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub category: Category,
    pub provider: String,
    pub service: Option<String>,
    pub region: Option<String>,
    pub attribute: Option<String>,
    pub instance_type: Option<String>,
}

impl CacheKey {
    fn new(category: Category, provider: &str) -> Self {
        Self {
            category,
            provider: provider.to_string(),
            service: None,
            region: None,
            attribute: None,
            instance_type: None,
        }
    }

    fn service(mut self, service: &str) -> Self {
        self.service = Some(service.to_string());
        self
    }

    fn region(mut self, region: &str) -> Self {
        self.region = Some(region.to_string());
        self
    }

    pub fn services(provider: &str) -> Self {
        Self::new(Category::Services, provider)
    }

    pub fn regions(provider: &str, service: &str) -> Self {
        Self::new(Category::Regions, provider).service(service)
    }

    pub fn zones(provider: &str, region: &str) -> Self {
        Self::new(Category::Zones, provider).region(region)
    }

    pub fn attribute(provider: &str, service: &str, attribute: &str) -> Self {
        let mut key = Self::new(Category::Attributes, provider).service(service);
        key.attribute = Some(attribute.to_string());
        key
    }

    pub fn vms(provider: &str, service: &str, region: &str) -> Self {
        Self::new(Category::Vms, provider).service(service).region(region)
    }

    pub fn price(provider: &str, region: &str, instance_type: &str) -> Self {
        let mut key = Self::new(Category::Prices, provider).region(region);
        key.instance_type = Some(instance_type.to_string());
        key
    }

    pub fn images(provider: &str, service: &str, region: &str) -> Self {
        Self::new(Category::Images, provider).service(service).region(region)
    }

    pub fn versions(provider: &str, service: &str, region: &str) -> Self {
        Self::new(Category::Versions, provider).service(service).region(region)
    }

    pub fn status(provider: &str) -> Self {
        Self::new(Category::Status, provider)
    }

    pub fn tier(&self) -> Tier {
        self.category.tier()
    }
}

impl fmt::Display for CacheKey {
    /// Renders the identifying parts, e.g. `provider=amazon, service=compute, region=eu-west-1`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "provider={}", self.provider)?;
        let parts = [
            ("service", &self.service),
            ("region", &self.region),
            ("attribute", &self.attribute),
            ("instanceType", &self.instance_type),
        ];
        for (name, value) in parts {
            if let Some(value) = value {
                write!(f, ", {name}={value}")?;
            }
        }
        Ok(())
    }
}
