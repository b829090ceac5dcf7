//! Cloud product information types.
//!
//! These are the values written into the tiered store by the scraping
//! pipeline and served back by the read façade.

use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Attribute name for the number of virtual CPUs of an instance type.
pub const CPU: &str = "cpu";

/// Attribute name for the memory size (GiB) of an instance type.
pub const MEMORY: &str = "memory";

/// The attributes scraped for every service, in scrape order.
pub const ATTRIBUTES: [&str; 2] = [CPU, MEMORY];

/// Spot prices per availability zone.
pub type SpotPriceInfo = HashMap<String, f64>;

/// On-demand price and spot prices per availability zone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    pub on_demand_price: f64,
    #[serde(default)]
    pub spot_price: SpotPriceInfo,
}

impl Price {
    pub fn new(on_demand_price: f64, spot_price: SpotPriceInfo) -> Self {
        Self { on_demand_price, spot_price }
    }
}

/// A purchasable compute shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VmInfo {
    #[serde(rename = "type")]
    pub instance_type: String,
    #[serde(rename = "onDemandPrice", default)]
    pub on_demand_price: f64,
    #[serde(rename = "spotPrice", default, skip_serializing_if = "HashMap::is_empty")]
    pub spot_price: SpotPriceInfo,
    #[serde(rename = "cpusPerVm")]
    pub cpus: f64,
    #[serde(rename = "memPerVm")]
    pub mem: f64,
    #[serde(rename = "gpusPerVm", default)]
    pub gpus: f64,
    #[serde(rename = "ntwPerf", default)]
    pub ntw_perf: String,
    #[serde(rename = "ntwPerfCategory", default)]
    pub ntw_perf_category: String,
    #[serde(default)]
    pub zones: Vec<String>,
    #[serde(default)]
    pub attributes: HashMap<String, String>,
    /// Whether the instance type belongs to the current generation.
    #[serde(rename = "currentGen", default)]
    pub current_gen: bool,
}

impl VmInfo {
    /// Burstable instance types are recognised by their `t` family prefix.
    pub fn is_burst(&self) -> bool {
        self.instance_type.starts_with(['t', 'T'])
    }
}

/// A named offering of a provider, e.g. `compute`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Service {
    pub service: String,
}

impl Service {
    pub fn new(name: impl Into<String>) -> Self {
        Self { service: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.service
    }
}

/// A provider together with the services it offers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Provider {
    pub provider: String,
    pub services: Vec<Service>,
}

impl Provider {
    pub fn new(name: impl Into<String>) -> Self {
        Self { provider: name.into(), services: Vec::new() }
    }
}

/// A single attribute value, with its display form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttrValue {
    pub value: f64,
    pub str_value: String,
}

impl AttrValue {
    pub fn new(value: f64) -> Self {
        Self { value, str_value: value.to_string() }
    }
}

/// The distinct values offered for an attribute, ascending.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct AttrValues(Vec<AttrValue>);

impl AttrValues {
    /// Builds the ordered set: sorted by value, duplicates dropped.
    pub fn new(mut values: Vec<AttrValue>) -> Self {
        values.sort_by(|a, b| a.value.total_cmp(&b.value));
        values.dedup_by(|a, b| a.value == b.value);
        Self(values)
    }

    pub fn from_floats(values: impl IntoIterator<Item = f64>) -> Self {
        Self::new(values.into_iter().map(AttrValue::new).collect())
    }

    pub fn float_values(&self) -> Vec<f64> {
        self.0.iter().map(|v| v.value).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttrValue> {
        self.0.iter()
    }
}

/// A machine image available in a region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub gpu_available: bool,
}

/// Spot price in one availability zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ZonePrice {
    pub zone: String,
    pub price: f64,
}

/// A VM enriched with its latest cached prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetails {
    #[serde(flatten)]
    pub vm: VmInfo,
    pub burst: bool,
    pub spot_price: Vec<ZonePrice>,
}

impl ProductDetails {
    /// Details of a VM with the spot prices it was listed with.
    pub fn new(mut vm: VmInfo) -> Self {
        let burst = vm.is_burst();
        let spot_price = zone_prices(&std::mem::take(&mut vm.spot_price));
        Self { vm, burst, spot_price }
    }

    /// Applies a cached price: spot prices per zone, and the on-demand price
    /// when the cached one is known.
    pub fn with_price(mut self, price: &Price) -> Self {
        if price.on_demand_price > 0.0 {
            self.vm.on_demand_price = price.on_demand_price;
        }
        self.spot_price = zone_prices(&price.spot_price);
        self
    }
}

/// Spot prices sorted by zone.
fn zone_prices(spot: &SpotPriceInfo) -> Vec<ZonePrice> {
    let mut prices: Vec<ZonePrice> = spot
        .iter()
        .map(|(zone, price)| ZonePrice { zone: zone.clone(), price: *price })
        .collect();
    prices.sort_by(|a, b| a.zone.cmp(&b.zone));
    prices
}
