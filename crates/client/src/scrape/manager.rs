//! Per-provider refresh cycles.
//!
//! A [`ScrapingManager`] owns one provider and writes everything it learns
//! into the shared store. It runs two kinds of cycle:
//!
//! - the full cycle ([`ScrapingManager::scrape`]): bulk prices, services,
//!   attributes, regions and per-region products/images/versions, then the
//!   status timestamp;
//! - the short-lived cycle ([`ScrapingManager::scrape_prices_in_all_regions`]):
//!   current prices of every compute region, scraped concurrently.
//!
//! Failures are logged and reported as metrics; they never escape a cycle.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use cloudinfo_core::metrics::NOT_APPLICABLE;
use cloudinfo_core::model::{ATTRIBUTES, Price, Service, VmInfo};
use cloudinfo_core::{CloudInfoStore, MetricsReporter};
use tokio::sync::{Mutex, OwnedMutexGuard};
use tokio::task::JoinSet;
use tracing::Instrument;

use super::{RegionStage, ScrapeError};
use crate::provider::CloudInfoer;

/// Service whose regions are scraped for short-lived prices.
pub const COMPUTE_SERVICE: &str = "compute";

/// Held for the duration of a cycle; see [`ScrapingManager::try_begin_full_cycle`].
pub type CycleGuard = OwnedMutexGuard<()>;

/// Scrapes one provider into the store.
#[derive(Clone)]
pub struct ScrapingManager {
    provider: String,
    infoer: Arc<dyn CloudInfoer>,
    store: Arc<CloudInfoStore>,
    metrics: Arc<dyn MetricsReporter>,
    full_cycle: Arc<Mutex<()>>,
    short_lived_cycle: Arc<Mutex<()>>,
}

impl ScrapingManager {
    pub fn new(
        provider: impl Into<String>, infoer: Arc<dyn CloudInfoer>, store: Arc<CloudInfoStore>,
        metrics: Arc<dyn MetricsReporter>,
    ) -> Self {
        Self {
            provider: provider.into(),
            infoer,
            store,
            metrics,
            full_cycle: Arc::new(Mutex::new(())),
            short_lived_cycle: Arc::new(Mutex::new(())),
        }
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn has_short_lived_price_info(&self) -> bool {
        self.infoer.has_short_lived_price_info()
    }

    /// Claim the full cycle of this provider.
    ///
    /// Returns `None` while another full cycle holds the guard.
    pub fn try_begin_full_cycle(&self) -> Option<CycleGuard> {
        Arc::clone(&self.full_cycle).try_lock_owned().ok()
    }

    /// Claim the short-lived cycle of this provider.
    ///
    /// Returns `None` while another short-lived cycle holds the guard.
    pub fn try_begin_short_lived_cycle(&self) -> Option<CycleGuard> {
        Arc::clone(&self.short_lived_cycle).try_lock_owned().ok()
    }

    /// Run one full refresh cycle.
    ///
    /// The status timestamp is written even when parts of the cycle failed.
    pub async fn scrape(&self) {
        let span = tracing::info_span!("scrape", provider = %self.provider);
        async {
            tracing::info!("start scraping provider information");
            let started = Instant::now();

            self.initialize().await;
            self.scrape_service_information().await;
            self.update_status();

            self.metrics.report_scrape_provider_completed(&self.provider, started);
            tracing::info!(elapsed_ms = started.elapsed().as_millis() as u64, "finished scraping provider information");
        }
        .instrument(span)
        .await
    }

    /// Store the bulk price snapshot. A failure leaves earlier prices in place.
    async fn initialize(&self) {
        let snapshot = match self.infoer.initialize().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::error!(error = %e, "failed to initialize provider");
                return;
            }
        };

        for (region, prices) in snapshot {
            for (instance_type, price) in prices {
                self.metrics
                    .report_on_demand_price(&self.provider, &region, &instance_type, price.on_demand_price);
                self.store.store_price(&self.provider, &region, &instance_type, price);
            }
        }
    }

    async fn scrape_service_information(&self) {
        let services = match self.infoer.get_services().await {
            Ok(services) => {
                self.store.store_services(&self.provider, services.clone());
                services
            }
            Err(e) => {
                self.metrics.report_scrape_failure(&self.provider, NOT_APPLICABLE, NOT_APPLICABLE);
                tracing::error!(error = %e, "failed to retrieve services");
                Vec::new()
            }
        };

        if let Err(e) = self.scrape_service_attributes(&services).await {
            tracing::error!(error = %e, "failed to scrape service attributes");
        }

        if let Err(e) = self.scrape_service_region_info(&services).await {
            tracing::error!(error = %e, "failed to scrape service region information");
        }
    }

    /// Stops at the first failing attribute; values stored before it stay.
    async fn scrape_service_attributes(&self, services: &[Service]) -> Result<(), ScrapeError> {
        for service in services {
            for attribute in ATTRIBUTES {
                let values = match self.infoer.get_attribute_values(service.name(), attribute).await {
                    Ok(values) => values,
                    Err(source) => {
                        self.metrics.report_scrape_failure(&self.provider, NOT_APPLICABLE, NOT_APPLICABLE);
                        return Err(ScrapeError::Attributes {
                            provider: self.provider.clone(),
                            service: service.name().to_string(),
                            attribute: attribute.to_string(),
                            source,
                        });
                    }
                };
                self.store.store_attribute(&self.provider, service.name(), attribute, values);
            }
        }
        Ok(())
    }

    /// Stops at the first failing service or region.
    async fn scrape_service_region_info(&self, services: &[Service]) -> Result<(), ScrapeError> {
        for service in services {
            let service = service.name();
            let regions = match self.infoer.get_regions(service).await {
                Ok(regions) => regions,
                Err(source) => {
                    self.metrics.report_scrape_failure(&self.provider, service, NOT_APPLICABLE);
                    return Err(ScrapeError::Regions {
                        provider: self.provider.clone(),
                        service: service.to_string(),
                        source,
                    });
                }
            };
            self.store.store_regions(&self.provider, service, regions.clone());

            for region_id in region_ids(regions) {
                let started = Instant::now();
                if let Err(e) = self.scrape_region(service, &region_id).await {
                    self.metrics.report_scrape_failure(&self.provider, service, &region_id);
                    return Err(e);
                }
                self.metrics
                    .report_scrape_region_completed(&self.provider, service, &region_id, started);
            }
        }
        Ok(())
    }

    async fn scrape_region(&self, service: &str, region_id: &str) -> Result<(), ScrapeError> {
        tracing::debug!(service, region = region_id, "scraping region");
        let failed = |stage, source| ScrapeError::Region {
            provider: self.provider.clone(),
            service: service.to_string(),
            region: region_id.to_string(),
            stage,
            source,
        };

        let vms = self
            .infoer
            .get_products(service, region_id)
            .await
            .map_err(|e| failed(RegionStage::Products, e))?;
        self.store_products(service, region_id, vms);

        if self.infoer.has_images() {
            let images = self
                .infoer
                .get_service_images(service, region_id)
                .await
                .map_err(|e| failed(RegionStage::Images, e))?;
            self.store.store_images(&self.provider, service, region_id, images);
        }

        let versions = self
            .infoer
            .get_versions(service, region_id)
            .await
            .map_err(|e| failed(RegionStage::Versions, e))?;
        self.store.store_versions(&self.provider, service, region_id, versions);

        Ok(())
    }

    fn store_products(&self, service: &str, region_id: &str, vms: Vec<VmInfo>) {
        for vm in vms.iter().filter(|vm| vm.on_demand_price > 0.0) {
            self.metrics
                .report_on_demand_price(&self.provider, region_id, &vm.instance_type, vm.on_demand_price);
        }

        let mut zones: Vec<String> = vms.iter().flat_map(|vm| vm.zones.iter().cloned()).collect();
        zones.sort();
        zones.dedup();
        // Another service may already have listed zones for this region.
        if !zones.is_empty() {
            self.store.store_zones(&self.provider, region_id, zones);
        }

        self.store.store_vms(&self.provider, service, region_id, vms);
    }

    fn update_status(&self) {
        let status = chrono::Utc::now().timestamp_millis().to_string();
        self.store.store_status(&self.provider, status);
        tracing::debug!("status updated");
    }

    /// Run one short-lived cycle: refresh current prices of every compute region.
    ///
    /// Regions are scraped concurrently; a failing region does not affect the
    /// others. Returns once every region has finished.
    pub async fn scrape_prices_in_all_regions(&self) {
        let span = tracing::info_span!("scrape_prices", provider = %self.provider);
        async {
            tracing::info!("start scraping prices");
            let started = Instant::now();

            let regions = match self.infoer.get_regions(COMPUTE_SERVICE).await {
                Ok(regions) => regions,
                Err(e) => {
                    self.metrics
                        .report_scrape_short_lived_failure(&self.provider, NOT_APPLICABLE);
                    tracing::error!(error = %e, "failed to retrieve regions");
                    HashMap::new()
                }
            };

            let mut tasks = JoinSet::new();
            for region_id in region_ids(regions) {
                let manager = self.clone();
                tasks.spawn(async move { manager.scrape_prices_in_region(&region_id).await }.in_current_span());
            }
            while let Some(result) = tasks.join_next().await {
                if let Err(e) = result {
                    tracing::error!(error = %e, "price scraping task failed");
                }
            }

            self.metrics
                .report_scrape_provider_short_lived_completed(&self.provider, started);
            tracing::info!(elapsed_ms = started.elapsed().as_millis() as u64, "finished scraping prices");
        }
        .instrument(span)
        .await
    }

    async fn scrape_prices_in_region(&self, region_id: &str) {
        let started = Instant::now();
        let prices: HashMap<String, Price> = match self.infoer.get_current_prices(region_id).await {
            Ok(prices) => prices,
            Err(e) => {
                self.metrics
                    .report_scrape_short_lived_failure(&self.provider, region_id);
                tracing::error!(region = region_id, error = %e, "failed to scrape spot prices in region");
                return;
            }
        };

        for (instance_type, price) in prices {
            self.store.store_price(&self.provider, region_id, &instance_type, price);
        }
        self.metrics
            .report_scrape_region_short_lived_completed(&self.provider, region_id, started);
    }
}

/// Region ids of a display name -> id map, sorted and without duplicates.
fn region_ids(regions: HashMap<String, String>) -> Vec<String> {
    let mut ids: Vec<String> = regions.into_values().collect();
    ids.sort();
    ids.dedup();
    ids
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use cloudinfo_core::model::{CPU, MEMORY};
    use cloudinfo_core::store::Category;

    use super::*;
    use crate::scrape::testing::*;

    const PROVIDER: &str = "dummy";

    struct Fixture {
        infoer: Arc<DummyCloudInfoer>,
        store: Arc<CloudInfoStore>,
        metrics: Arc<RecordingReporter>,
        manager: ScrapingManager,
    }

    fn fixture(infoer: DummyCloudInfoer) -> Fixture {
        let infoer = Arc::new(infoer);
        let store = Arc::new(CloudInfoStore::new(Duration::from_secs(3600), Duration::from_secs(600)));
        let metrics = Arc::new(RecordingReporter::default());
        let manager = ScrapingManager::new(
            PROVIDER,
            Arc::clone(&infoer) as Arc<dyn CloudInfoer>,
            Arc::clone(&store),
            Arc::clone(&metrics) as Arc<dyn MetricsReporter>,
        );
        Fixture { infoer, store, metrics, manager }
    }

    fn all_regions() -> [&'static str; 3] {
        ["eu-central-1", "eu-west-1", "us-west-2"]
    }

    #[tokio::test]
    async fn test_scrape_full_cycle() {
        let f = fixture(DummyCloudInfoer::default());
        f.manager.scrape().await;

        let services = f.store.get_services(PROVIDER).unwrap();
        assert_eq!(services, vec![Service::new("compute")]);
        assert_eq!(f.store.get_attribute(PROVIDER, "compute", CPU).unwrap().float_values(), vec![2.0, 4.0]);
        assert_eq!(f.store.get_attribute(PROVIDER, "compute", MEMORY).unwrap().float_values(), vec![32.0]);
        assert_eq!(f.store.get_regions(PROVIDER, "compute").unwrap().len(), 3);

        for region in all_regions() {
            assert_eq!(f.store.get_vms(PROVIDER, "compute", region).unwrap().len(), 1);
            assert_eq!(f.store.get_images(PROVIDER, "compute", region).unwrap().len(), 1);
            assert_eq!(f.store.get_versions(PROVIDER, "compute", region).unwrap(), vec!["1.0", "1.1"]);
            assert_eq!(
                f.store.get_zones(PROVIDER, region).unwrap(),
                vec![format!("{region}a"), format!("{region}b")]
            );
        }

        let status: i64 = f.store.get_status(PROVIDER).unwrap().parse().unwrap();
        assert!(status > 0);

        assert_eq!(f.metrics.count("region_completed:dummy:compute:"), 3);
        assert_eq!(f.metrics.count("provider_completed:dummy"), 1);
        assert_eq!(f.metrics.count("failure:"), 0);
        // three from the snapshot, one per region for products
        assert_eq!(f.metrics.count("price:dummy:"), 6);
    }

    #[tokio::test]
    async fn test_scrape_stores_bulk_prices() {
        let f = fixture(DummyCloudInfoer::default());
        f.manager.scrape().await;

        let price = f.store.get_price(PROVIDER, "dummy", "c1.xlarge").unwrap();
        assert_eq!(price.on_demand_price, 0.52);
        assert_eq!(price.spot_price["zone1"], 0.164);
        assert!(f.store.get_price(PROVIDER, "dummy", "c4.2xlarge").is_some());
        assert!(f.store.get_price(PROVIDER, "dummy", "c3.large").is_some());
    }

    #[tokio::test]
    async fn test_scrape_single_region() {
        let infoer = DummyCloudInfoer {
            regions: HashMap::from([("EU (Frankfurt)".to_string(), "eu-central-1".to_string())]),
            ..Default::default()
        };
        let f = fixture(infoer);
        f.manager.scrape().await;

        assert_eq!(
            f.store.get_regions(PROVIDER, "compute").unwrap(),
            HashMap::from([("EU (Frankfurt)".to_string(), "eu-central-1".to_string())])
        );
        let vms = f.store.get_vms(PROVIDER, "compute", "eu-central-1").unwrap();
        assert_eq!(vms.len(), 1);
        assert_eq!(vms[0].instance_type, "c1.xlarge");
        assert_eq!(vms[0].cpus, 2.0);
        assert_eq!(vms[0].mem, 32.0);
        assert_eq!(vms[0].on_demand_price, 0.32);
    }

    #[tokio::test]
    async fn test_initialize_failure_is_not_fatal() {
        let f = fixture(DummyCloudInfoer { tc_id: INITIALIZE_ERROR, ..Default::default() });
        f.manager.scrape().await;

        assert!(f.store.get_price(PROVIDER, "dummy", "c1.xlarge").is_none());
        assert!(f.store.get_vms(PROVIDER, "compute", "eu-west-1").is_some());
        assert!(f.store.get_status(PROVIDER).is_some());
        assert_eq!(f.metrics.count("failure:"), 0);
    }

    #[tokio::test]
    async fn test_services_failure() {
        let f = fixture(DummyCloudInfoer { tc_id: GET_SERVICES_ERROR, ..Default::default() });
        f.manager.scrape().await;

        assert!(f.store.get_services(PROVIDER).is_none());
        assert_eq!(f.store.len(Category::Attributes), 0);
        assert_eq!(f.infoer.count_calls("get_regions"), 0);
        assert!(f.store.get_status(PROVIDER).is_some());
        // the bulk snapshot is still stored before services are listed
        assert_eq!(f.metrics.count("price:dummy:dummy:"), 3);
        let events: Vec<String> = f
            .metrics
            .events()
            .into_iter()
            .filter(|e| !e.starts_with("price:"))
            .collect();
        assert_eq!(events, vec!["failure:dummy:N/A:N/A", "provider_completed:dummy"]);
    }

    #[tokio::test]
    async fn test_attribute_failure_aborts_remaining_attributes() {
        let f = fixture(DummyCloudInfoer {
            tc_id: GET_ATTRIBUTES_ERROR,
            fail_on: Some("b"),
            services: vec!["a", "b", "c"],
            ..Default::default()
        });
        f.manager.scrape().await;

        assert!(f.store.get_attribute(PROVIDER, "a", CPU).is_some());
        assert!(f.store.get_attribute(PROVIDER, "a", MEMORY).is_some());
        assert!(f.store.get_attribute(PROVIDER, "b", CPU).is_none());
        assert!(f.store.get_attribute(PROVIDER, "c", CPU).is_none());
        assert_eq!(f.infoer.count_calls("get_attribute_values:c"), 0);

        // region information is still scraped for every service
        for service in ["a", "b", "c"] {
            assert!(f.store.get_regions(PROVIDER, service).is_some());
        }
        assert!(f.store.get_status(PROVIDER).is_some());
        assert_eq!(f.metrics.count("failure:dummy:N/A:N/A"), 1);
    }

    #[tokio::test]
    async fn test_regions_failure() {
        let f = fixture(DummyCloudInfoer { tc_id: GET_REGIONS_ERROR, ..Default::default() });
        f.manager.scrape().await;

        assert!(f.store.get_regions(PROVIDER, "compute").is_none());
        assert_eq!(f.infoer.count_calls("get_products"), 0);
        assert!(f.store.get_attribute(PROVIDER, "compute", CPU).is_some());
        assert!(f.store.get_status(PROVIDER).is_some());
        assert_eq!(f.metrics.count("failure:dummy:compute:N/A"), 1);
        assert_eq!(f.metrics.count("provider_completed:dummy"), 1);
    }

    #[tokio::test]
    async fn test_products_failure_aborts_remaining_regions() {
        let f = fixture(DummyCloudInfoer { tc_id: GET_PRODUCTS_ERROR, fail_on: Some("eu-west-1"), ..Default::default() });
        f.manager.scrape().await;

        assert!(f.store.get_vms(PROVIDER, "compute", "eu-central-1").is_some());
        assert!(f.store.get_vms(PROVIDER, "compute", "eu-west-1").is_none());
        assert!(f.store.get_vms(PROVIDER, "compute", "us-west-2").is_none());
        assert!(f.store.get_images(PROVIDER, "compute", "eu-west-1").is_none());
        assert!(f.store.get_status(PROVIDER).is_some());

        assert_eq!(f.metrics.count("failure:dummy:compute:eu-west-1"), 1);
        assert_eq!(f.metrics.count("region_completed:"), 1);
    }

    #[tokio::test]
    async fn test_images_failure_aborts_remaining_regions() {
        let f = fixture(DummyCloudInfoer { tc_id: GET_IMAGES_ERROR, fail_on: Some("eu-west-1"), ..Default::default() });
        f.manager.scrape().await;

        assert!(f.store.get_vms(PROVIDER, "compute", "eu-central-1").is_some());
        assert!(f.store.get_images(PROVIDER, "compute", "eu-central-1").is_some());
        assert!(f.store.get_versions(PROVIDER, "compute", "eu-central-1").is_some());

        assert!(f.store.get_vms(PROVIDER, "compute", "eu-west-1").is_some());
        assert!(f.store.get_images(PROVIDER, "compute", "eu-west-1").is_none());
        assert!(f.store.get_versions(PROVIDER, "compute", "eu-west-1").is_none());
        assert_eq!(f.infoer.count_calls("get_versions:compute:eu-west-1"), 0);

        assert_eq!(f.infoer.count_calls("get_products:compute:us-west-2"), 0);
        assert!(f.store.get_vms(PROVIDER, "compute", "us-west-2").is_none());
        assert!(f.store.get_status(PROVIDER).is_some());

        assert_eq!(f.metrics.count("failure:dummy:compute:eu-west-1"), 1);
        assert_eq!(f.metrics.count("region_completed:"), 1);
    }

    #[tokio::test]
    async fn test_versions_failure_keeps_products() {
        let f = fixture(DummyCloudInfoer { tc_id: GET_VERSIONS_ERROR, fail_on: Some("eu-central-1"), ..Default::default() });
        f.manager.scrape().await;

        assert!(f.store.get_vms(PROVIDER, "compute", "eu-central-1").is_some());
        assert!(f.store.get_versions(PROVIDER, "compute", "eu-central-1").is_none());
        assert_eq!(f.metrics.count("failure:dummy:compute:eu-central-1"), 1);
    }

    #[tokio::test]
    async fn test_images_skipped_without_support() {
        let f = fixture(DummyCloudInfoer { images: false, ..Default::default() });
        f.manager.scrape().await;

        assert_eq!(f.infoer.count_calls("get_service_images"), 0);
        assert!(f.store.get_images(PROVIDER, "compute", "eu-west-1").is_none());
        assert!(f.store.get_versions(PROVIDER, "compute", "eu-west-1").is_some());
    }

    #[tokio::test]
    async fn test_scrape_is_idempotent() {
        let f = fixture(DummyCloudInfoer::default());
        f.manager.scrape().await;
        let first: Vec<_> = all_regions()
            .iter()
            .map(|r| f.store.get_vms(PROVIDER, "compute", r))
            .collect();
        let prices = f.store.len(Category::Prices);

        f.manager.scrape().await;
        let second: Vec<_> = all_regions()
            .iter()
            .map(|r| f.store.get_vms(PROVIDER, "compute", r))
            .collect();

        assert_eq!(first, second);
        assert_eq!(f.store.len(Category::Prices), prices);
        assert_eq!(f.store.len(Category::Vms), 3);
        assert_eq!(f.store.len(Category::Zones), 3);
    }

    #[tokio::test]
    async fn test_scrape_prices_in_all_regions() {
        let f = fixture(DummyCloudInfoer::default());
        f.store.store_price("other", "eu-west-1", "c1.xlarge", price(1.0, "x", 0.5));

        f.manager.scrape_prices_in_all_regions().await;

        for region in all_regions() {
            let p = f.store.get_price(PROVIDER, region, "c1.xlarge").unwrap();
            assert_eq!(p.on_demand_price, 0.60);
            assert_eq!(p.spot_price[&format!("{region}a")], 0.2);
        }
        assert_eq!(f.store.get_price("other", "eu-west-1", "c1.xlarge").unwrap().on_demand_price, 1.0);
        assert_eq!(f.metrics.count("region_short_lived_completed:dummy:"), 3);
        assert_eq!(f.metrics.count("provider_short_lived_completed:dummy"), 1);
    }

    #[tokio::test]
    async fn test_short_lived_region_failure_is_isolated() {
        let f = fixture(DummyCloudInfoer {
            tc_id: GET_CURRENT_PRICES_ERROR,
            fail_on: Some("eu-west-1"),
            ..Default::default()
        });
        f.store.store_price(PROVIDER, "eu-west-1", "c1.xlarge", price(0.5, "eu-west-1a", 0.1));

        f.manager.scrape_prices_in_all_regions().await;

        assert_eq!(f.store.get_price(PROVIDER, "eu-central-1", "c1.xlarge").unwrap().on_demand_price, 0.60);
        assert_eq!(f.store.get_price(PROVIDER, "us-west-2", "c1.xlarge").unwrap().on_demand_price, 0.60);
        assert_eq!(f.store.get_price(PROVIDER, "eu-west-1", "c1.xlarge").unwrap().on_demand_price, 0.5);

        assert_eq!(f.metrics.count("short_lived_failure:dummy:eu-west-1"), 1);
        assert_eq!(f.metrics.count("region_short_lived_completed:"), 2);
        assert_eq!(f.metrics.count("provider_short_lived_completed:dummy"), 1);
    }

    #[tokio::test]
    async fn test_short_lived_regions_failure() {
        let f = fixture(DummyCloudInfoer { tc_id: GET_REGIONS_ERROR, ..Default::default() });
        f.manager.scrape_prices_in_all_regions().await;

        assert_eq!(f.infoer.count_calls("get_current_prices"), 0);
        assert_eq!(f.store.len(Category::Prices), 0);
        assert_eq!(f.metrics.count("short_lived_failure:dummy:N/A"), 1);
        assert_eq!(f.metrics.count("provider_short_lived_completed:dummy"), 1);
    }

    #[tokio::test]
    async fn test_cycle_guards() {
        let f = fixture(DummyCloudInfoer::default());

        let guard = f.manager.try_begin_full_cycle().unwrap();
        assert!(f.manager.clone().try_begin_full_cycle().is_none());
        assert!(f.manager.try_begin_short_lived_cycle().is_some());
        drop(guard);
        assert!(f.manager.try_begin_full_cycle().is_some());
    }

    #[tokio::test]
    async fn test_scrape_with_no_op_reporter() {
        let store = Arc::new(CloudInfoStore::new(Duration::from_secs(3600), Duration::from_secs(600)));
        let manager = ScrapingManager::new(
            PROVIDER,
            Arc::new(DummyCloudInfoer::default()),
            Arc::clone(&store),
            Arc::new(cloudinfo_core::NoOpReporter),
        );
        manager.scrape().await;
        assert!(store.get_status(PROVIDER).is_some());
    }

    #[test]
    fn test_region_ids_sorted_and_deduplicated() {
        let regions = HashMap::from([
            ("b".to_string(), "us-west-2".to_string()),
            ("a".to_string(), "eu-west-1".to_string()),
            ("c".to_string(), "eu-west-1".to_string()),
        ]);
        assert_eq!(region_ids(regions), vec!["eu-west-1", "us-west-2"]);
    }
}
