//! Scrape metrics.
//!
//! The scraping pipeline reports through the [`MetricsReporter`] capability it
//! is constructed with. [`PrometheusReporter`] registers its collectors in its
//! own registry, so several instances can coexist (e.g. in tests).

use std::time::Instant;

use prometheus::{CounterVec, Encoder, GaugeVec, HistogramVec, Opts, Registry, TextEncoder, histogram_opts};

use crate::Error;

/// Label value used where a scope (service, region) is unknown.
pub const NOT_APPLICABLE: &str = "N/A";

/// Scrape duration buckets (seconds): 100ms up to 30 minutes.
const SCRAPE_DURATION_BUCKETS: &[f64] = &[0.1, 0.5, 1.0, 5.0, 15.0, 30.0, 60.0, 120.0, 300.0, 600.0, 1800.0];

/// Sink for scrape metrics.
pub trait MetricsReporter: Send + Sync {
    /// Latest on-demand price of an instance type in a region.
    fn report_on_demand_price(&self, provider: &str, region: &str, instance_type: &str, price: f64);

    /// A full refresh step failed.
    fn report_scrape_failure(&self, provider: &str, service: &str, region: &str);

    /// Products, images and versions of a region were refreshed.
    fn report_scrape_region_completed(&self, provider: &str, service: &str, region: &str, started: Instant);

    /// A provider's full refresh cycle finished.
    fn report_scrape_provider_completed(&self, provider: &str, started: Instant);

    /// A short-lived price refresh failed for a region.
    fn report_scrape_short_lived_failure(&self, provider: &str, region: &str);

    fn report_scrape_region_short_lived_completed(&self, provider: &str, region: &str, started: Instant);

    fn report_scrape_provider_short_lived_completed(&self, provider: &str, started: Instant);
}

/// Reporter that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpReporter;

impl MetricsReporter for NoOpReporter {
    fn report_on_demand_price(&self, _: &str, _: &str, _: &str, _: f64) {}
    fn report_scrape_failure(&self, _: &str, _: &str, _: &str) {}
    fn report_scrape_region_completed(&self, _: &str, _: &str, _: &str, _: Instant) {}
    fn report_scrape_provider_completed(&self, _: &str, _: Instant) {}
    fn report_scrape_short_lived_failure(&self, _: &str, _: &str) {}
    fn report_scrape_region_short_lived_completed(&self, _: &str, _: &str, _: Instant) {}
    fn report_scrape_provider_short_lived_completed(&self, _: &str, _: Instant) {}
}

/// Prometheus-backed reporter.
#[derive(Clone)]
pub struct PrometheusReporter {
    registry: Registry,

    /// On-demand price gauge - labels: provider, region, instance_type
    on_demand_price: GaugeVec,

    /// Full refresh failures - labels: provider, service, region
    scrape_failures_total: CounterVec,

    /// Full refresh region duration - labels: provider, service, region
    scrape_region_duration_seconds: HistogramVec,

    /// Full refresh cycle duration - labels: provider
    scrape_provider_duration_seconds: HistogramVec,

    /// Short-lived refresh failures - labels: provider, region
    scrape_short_lived_failures_total: CounterVec,

    /// Short-lived refresh region duration - labels: provider, region
    scrape_region_short_lived_duration_seconds: HistogramVec,

    /// Short-lived refresh cycle duration - labels: provider
    scrape_provider_short_lived_duration_seconds: HistogramVec,
}

impl PrometheusReporter {
    /// Create the collectors and register them in a fresh registry.
    pub fn new() -> Result<Self, Error> {
        let registry = Registry::new();

        let on_demand_price = GaugeVec::new(
            Opts::new("cloudinfo_on_demand_price", "On-demand price of an instance type"),
            &["provider", "region", "instance_type"],
        )?;
        let scrape_failures_total = CounterVec::new(
            Opts::new("cloudinfo_scrape_failures_total", "Total number of failed full refresh steps"),
            &["provider", "service", "region"],
        )?;
        let scrape_region_duration_seconds = HistogramVec::new(
            histogram_opts!(
                "cloudinfo_scrape_region_duration_seconds",
                "Full refresh duration of a region in seconds",
                SCRAPE_DURATION_BUCKETS.to_vec()
            ),
            &["provider", "service", "region"],
        )?;
        let scrape_provider_duration_seconds = HistogramVec::new(
            histogram_opts!(
                "cloudinfo_scrape_provider_duration_seconds",
                "Full refresh cycle duration of a provider in seconds",
                SCRAPE_DURATION_BUCKETS.to_vec()
            ),
            &["provider"],
        )?;
        let scrape_short_lived_failures_total = CounterVec::new(
            Opts::new(
                "cloudinfo_scrape_short_lived_failures_total",
                "Total number of failed short-lived price refreshes",
            ),
            &["provider", "region"],
        )?;
        let scrape_region_short_lived_duration_seconds = HistogramVec::new(
            histogram_opts!(
                "cloudinfo_scrape_region_short_lived_duration_seconds",
                "Short-lived price refresh duration of a region in seconds",
                SCRAPE_DURATION_BUCKETS.to_vec()
            ),
            &["provider", "region"],
        )?;
        let scrape_provider_short_lived_duration_seconds = HistogramVec::new(
            histogram_opts!(
                "cloudinfo_scrape_provider_short_lived_duration_seconds",
                "Short-lived price refresh cycle duration of a provider in seconds",
                SCRAPE_DURATION_BUCKETS.to_vec()
            ),
            &["provider"],
        )?;

        registry.register(Box::new(on_demand_price.clone()))?;
        registry.register(Box::new(scrape_failures_total.clone()))?;
        registry.register(Box::new(scrape_region_duration_seconds.clone()))?;
        registry.register(Box::new(scrape_provider_duration_seconds.clone()))?;
        registry.register(Box::new(scrape_short_lived_failures_total.clone()))?;
        registry.register(Box::new(scrape_region_short_lived_duration_seconds.clone()))?;
        registry.register(Box::new(scrape_provider_short_lived_duration_seconds.clone()))?;

        Ok(Self {
            registry,
            on_demand_price,
            scrape_failures_total,
            scrape_region_duration_seconds,
            scrape_provider_duration_seconds,
            scrape_short_lived_failures_total,
            scrape_region_short_lived_duration_seconds,
            scrape_provider_short_lived_duration_seconds,
        })
    }

    /// Render all collected metrics in the Prometheus text format.
    pub fn encode_text(&self) -> Result<String, Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| Error::Metrics(e.to_string()))
    }
}

impl MetricsReporter for PrometheusReporter {
    fn report_on_demand_price(&self, provider: &str, region: &str, instance_type: &str, price: f64) {
        self.on_demand_price
            .with_label_values(&[provider, region, instance_type])
            .set(price);
    }

    fn report_scrape_failure(&self, provider: &str, service: &str, region: &str) {
        self.scrape_failures_total
            .with_label_values(&[provider, service, region])
            .inc();
    }

    fn report_scrape_region_completed(&self, provider: &str, service: &str, region: &str, started: Instant) {
        self.scrape_region_duration_seconds
            .with_label_values(&[provider, service, region])
            .observe(started.elapsed().as_secs_f64());
    }

    fn report_scrape_provider_completed(&self, provider: &str, started: Instant) {
        self.scrape_provider_duration_seconds
            .with_label_values(&[provider])
            .observe(started.elapsed().as_secs_f64());
    }

    fn report_scrape_short_lived_failure(&self, provider: &str, region: &str) {
        self.scrape_short_lived_failures_total
            .with_label_values(&[provider, region])
            .inc();
    }

    fn report_scrape_region_short_lived_completed(&self, provider: &str, region: &str, started: Instant) {
        self.scrape_region_short_lived_duration_seconds
            .with_label_values(&[provider, region])
            .observe(started.elapsed().as_secs_f64());
    }

    fn report_scrape_provider_short_lived_completed(&self, provider: &str, started: Instant) {
        self.scrape_provider_short_lived_duration_seconds
            .with_label_values(&[provider])
            .observe(started.elapsed().as_secs_f64());
    }
}
