//! Scripted provider and metrics recorder for scraping tests.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use cloudinfo_core::MetricsReporter;
use cloudinfo_core::model::{AttrValues, CPU, Image, Price, Service, SpotPriceInfo, VmInfo};
use parking_lot::Mutex;
use tokio::sync::Notify;

use crate::provider::{CloudInfoer, PriceSnapshot, ProviderError};

pub(crate) const INITIALIZE_ERROR: &str = "initialization failed";
pub(crate) const GET_SERVICES_ERROR: &str = "could not get services";
pub(crate) const GET_ATTRIBUTES_ERROR: &str = "could not get attribute values";
pub(crate) const GET_REGIONS_ERROR: &str = "could not get regions";
pub(crate) const GET_PRODUCTS_ERROR: &str = "could not get products";
pub(crate) const GET_IMAGES_ERROR: &str = "could not get images";
pub(crate) const GET_VERSIONS_ERROR: &str = "could not get versions";
pub(crate) const GET_CURRENT_PRICES_ERROR: &str = "could not get current prices";

/// Provider answering from fixed data.
///
/// `tc_id` selects the operation that fails; `fail_on` narrows the failure to
/// one service or region (all of them when unset).
pub(crate) struct DummyCloudInfoer {
    pub tc_id: &'static str,
    pub fail_on: Option<&'static str>,
    pub services: Vec<&'static str>,
    pub regions: HashMap<String, String>,
    pub snapshot: PriceSnapshot,
    pub images: bool,
    pub short_lived: bool,
    /// When set, `initialize` waits for a notification.
    pub gate: Option<Arc<Notify>>,
    pub calls: Mutex<Vec<String>>,
}

impl Default for DummyCloudInfoer {
    fn default() -> Self {
        Self {
            tc_id: "",
            fail_on: None,
            services: vec!["compute"],
            regions: HashMap::from([
                ("EU (Frankfurt)".to_string(), "eu-central-1".to_string()),
                ("EU (Ireland)".to_string(), "eu-west-1".to_string()),
                ("US West (Oregon)".to_string(), "us-west-2".to_string()),
            ]),
            snapshot: HashMap::from([(
                "dummy".to_string(),
                HashMap::from([
                    ("c1.xlarge".to_string(), price(0.52, "zone1", 0.164)),
                    ("c4.2xlarge".to_string(), price(0.4, "zone2", 0.12)),
                    ("c3.large".to_string(), price(0.11, "zone1", 0.053)),
                ]),
            )]),
            images: true,
            short_lived: true,
            gate: None,
            calls: Mutex::new(Vec::new()),
        }
    }
}

pub(crate) fn price(on_demand: f64, zone: &str, spot: f64) -> Price {
    Price::new(on_demand, SpotPriceInfo::from([(zone.to_string(), spot)]))
}

pub(crate) fn vm(instance_type: &str, cpus: f64, mem: f64, on_demand: f64) -> VmInfo {
    VmInfo { instance_type: instance_type.into(), cpus, mem, on_demand_price: on_demand, ..Default::default() }
}

impl DummyCloudInfoer {
    fn fails(&self, tc_id: &str, scope: &str) -> Result<(), ProviderError> {
        if self.tc_id == tc_id && self.fail_on.is_none_or(|s| s == scope) {
            Err(ProviderError::Unavailable(tc_id.to_string()))
        } else {
            Ok(())
        }
    }

    fn record(&self, call: String) {
        self.calls.lock().push(call);
    }

    /// Number of recorded calls starting with `prefix`, e.g. `get_products:compute`.
    pub fn count_calls(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }
}

#[async_trait]
impl CloudInfoer for DummyCloudInfoer {
    async fn initialize(&self) -> Result<PriceSnapshot, ProviderError> {
        self.record("initialize".into());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.fails(INITIALIZE_ERROR, "")?;
        Ok(self.snapshot.clone())
    }

    async fn get_services(&self) -> Result<Vec<Service>, ProviderError> {
        self.record("get_services".into());
        self.fails(GET_SERVICES_ERROR, "")?;
        Ok(self.services.iter().map(|s| Service::new(*s)).collect())
    }

    async fn get_attribute_values(&self, service: &str, attribute: &str) -> Result<AttrValues, ProviderError> {
        self.record(format!("get_attribute_values:{service}:{attribute}"));
        self.fails(GET_ATTRIBUTES_ERROR, service)?;
        Ok(if attribute == CPU { AttrValues::from_floats([2.0, 4.0]) } else { AttrValues::from_floats([32.0]) })
    }

    async fn get_regions(&self, service: &str) -> Result<HashMap<String, String>, ProviderError> {
        self.record(format!("get_regions:{service}"));
        self.fails(GET_REGIONS_ERROR, service)?;
        Ok(self.regions.clone())
    }

    async fn get_products(&self, service: &str, region_id: &str) -> Result<Vec<VmInfo>, ProviderError> {
        self.record(format!("get_products:{service}:{region_id}"));
        self.fails(GET_PRODUCTS_ERROR, region_id)?;
        let mut product = vm("c1.xlarge", 2.0, 32.0, 0.32);
        product.zones = vec![format!("{region_id}b"), format!("{region_id}a")];
        Ok(vec![product])
    }

    fn has_images(&self) -> bool {
        self.images
    }

    async fn get_service_images(&self, service: &str, region_id: &str) -> Result<Vec<Image>, ProviderError> {
        self.record(format!("get_service_images:{service}:{region_id}"));
        self.fails(GET_IMAGES_ERROR, region_id)?;
        Ok(vec![Image { name: format!("image-{region_id}"), version: "1".into(), gpu_available: false }])
    }

    async fn get_versions(&self, service: &str, region_id: &str) -> Result<Vec<String>, ProviderError> {
        self.record(format!("get_versions:{service}:{region_id}"));
        self.fails(GET_VERSIONS_ERROR, region_id)?;
        Ok(vec!["1.0".into(), "1.1".into()])
    }

    fn has_short_lived_price_info(&self) -> bool {
        self.short_lived
    }

    async fn get_current_prices(&self, region_id: &str) -> Result<HashMap<String, Price>, ProviderError> {
        self.record(format!("get_current_prices:{region_id}"));
        self.fails(GET_CURRENT_PRICES_ERROR, region_id)?;
        Ok(HashMap::from([("c1.xlarge".to_string(), price(0.60, &format!("{region_id}a"), 0.2))]))
    }
}

/// Reporter keeping every event as a `kind:label:label...` string.
#[derive(Default)]
pub(crate) struct RecordingReporter {
    events: Mutex<Vec<String>>,
}

impl RecordingReporter {
    fn push(&self, kind: &str, labels: &[&str]) {
        self.events.lock().push(format!("{kind}:{}", labels.join(":")));
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.events
            .lock()
            .iter()
            .filter(|e| e.starts_with(prefix))
            .count()
    }
}

impl MetricsReporter for RecordingReporter {
    fn report_on_demand_price(&self, provider: &str, region: &str, instance_type: &str, price: f64) {
        self.push("price", &[provider, region, instance_type, &price.to_string()]);
    }

    fn report_scrape_failure(&self, provider: &str, service: &str, region: &str) {
        self.push("failure", &[provider, service, region]);
    }

    fn report_scrape_region_completed(&self, provider: &str, service: &str, region: &str, _: Instant) {
        self.push("region_completed", &[provider, service, region]);
    }

    fn report_scrape_provider_completed(&self, provider: &str, _: Instant) {
        self.push("provider_completed", &[provider]);
    }

    fn report_scrape_short_lived_failure(&self, provider: &str, region: &str) {
        self.push("short_lived_failure", &[provider, region]);
    }

    fn report_scrape_region_short_lived_completed(&self, provider: &str, region: &str, _: Instant) {
        self.push("region_short_lived_completed", &[provider, region]);
    }

    fn report_scrape_provider_short_lived_completed(&self, provider: &str, _: Instant) {
        self.push("provider_short_lived_completed", &[provider]);
    }
}
