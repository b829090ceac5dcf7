//! Scheduling of refresh cycles for all providers.
//!
//! The driver runs two periodic loops:
//! - full refresh every `renewal_interval`, one task per provider;
//! - short-lived price refresh every [`SHORT_LIVED_RENEWAL_INTERVAL`], one task
//!   per provider that supports it. Each tick also purges expired store entries.
//!
//! Both loops fire once immediately. A provider whose previous cycle of the
//! same kind is still running is skipped for that tick.

use std::sync::Arc;
use std::time::Duration;

use cloudinfo_core::config::SHORT_LIVED_RENEWAL_INTERVAL;
use cloudinfo_core::{CloudInfoStore, MetricsReporter};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use super::{PeriodicExecutor, ScrapeError, ScrapingManager};
use crate::provider::CloudInfoer;

/// Owns one [`ScrapingManager`] per provider.
pub struct ScrapingDriver {
    managers: Arc<[ScrapingManager]>,
    store: Arc<CloudInfoStore>,
    renewal_interval: Duration,
}

impl ScrapingDriver {
    /// Create a driver for the given providers.
    ///
    /// # Errors
    ///
    /// Returns `ScrapeError::NoProviders` if `infoers` is empty and
    /// `ScrapeError::InvalidInterval` for a zero renewal interval.
    pub fn new(
        renewal_interval: Duration, infoers: impl IntoIterator<Item = (String, Arc<dyn CloudInfoer>)>,
        store: Arc<CloudInfoStore>, metrics: Arc<dyn MetricsReporter>,
    ) -> Result<Self, ScrapeError> {
        if renewal_interval.is_zero() {
            return Err(ScrapeError::InvalidInterval(renewal_interval));
        }

        let mut managers: Vec<ScrapingManager> = infoers
            .into_iter()
            .map(|(provider, infoer)| ScrapingManager::new(provider, infoer, Arc::clone(&store), Arc::clone(&metrics)))
            .collect();
        if managers.is_empty() {
            return Err(ScrapeError::NoProviders);
        }
        managers.sort_by(|a, b| a.provider().cmp(b.provider()));

        Ok(Self { managers: managers.into(), store, renewal_interval })
    }

    pub fn providers(&self) -> impl Iterator<Item = &str> {
        self.managers.iter().map(ScrapingManager::provider)
    }

    /// Start both refresh loops.
    ///
    /// The loops stop when `cancellation_token` is cancelled or when the
    /// returned handle is shut down.
    pub fn start(&self, cancellation_token: &CancellationToken) -> Result<ScrapingHandle, ScrapeError> {
        let token = cancellation_token.child_token();
        let tasks = TaskTracker::new();

        let full = PeriodicExecutor::new(self.renewal_interval).execute(token.clone(), {
            let managers = Arc::clone(&self.managers);
            let tasks = tasks.clone();
            move || renew_all(Arc::clone(&managers), tasks.clone())
        })?;

        let short_lived = PeriodicExecutor::new(SHORT_LIVED_RENEWAL_INTERVAL).execute(token.clone(), {
            let managers = Arc::clone(&self.managers);
            let store = Arc::clone(&self.store);
            let tasks = tasks.clone();
            move || renew_short_lived(Arc::clone(&managers), Arc::clone(&store), tasks.clone())
        })?;

        tracing::info!(
            providers = self.managers.len(),
            renewal_interval_secs = self.renewal_interval.as_secs(),
            "started scraping"
        );

        Ok(ScrapingHandle { token, loops: vec![full, short_lived], tasks })
    }
}

async fn renew_all(managers: Arc<[ScrapingManager]>, tasks: TaskTracker) {
    for manager in managers.iter() {
        let Some(guard) = manager.try_begin_full_cycle() else {
            tracing::debug!(provider = manager.provider(), "previous refresh cycle still running, skipping");
            continue;
        };
        let manager = manager.clone();
        tasks.spawn(async move {
            manager.scrape().await;
            drop(guard);
        });
    }
}

async fn renew_short_lived(managers: Arc<[ScrapingManager]>, store: Arc<CloudInfoStore>, tasks: TaskTracker) {
    let purged = store.purge_expired();
    if purged > 0 {
        tracing::debug!(purged, "purged expired cache entries");
    }

    for manager in managers.iter() {
        if !manager.has_short_lived_price_info() {
            tracing::debug!(provider = manager.provider(), "no short-lived prices, skipping price refresh");
            continue;
        }
        let Some(guard) = manager.try_begin_short_lived_cycle() else {
            tracing::debug!(provider = manager.provider(), "previous price refresh still running, skipping");
            continue;
        };
        let manager = manager.clone();
        tasks.spawn(async move {
            manager.scrape_prices_in_all_regions().await;
            drop(guard);
        });
    }
}

/// Running refresh loops and their in-flight cycles.
pub struct ScrapingHandle {
    token: CancellationToken,
    loops: Vec<JoinHandle<()>>,
    tasks: TaskTracker,
}

impl ScrapingHandle {
    /// Number of cycles currently running.
    pub fn in_flight(&self) -> usize {
        self.tasks.len()
    }

    /// Stop both loops and wait up to `timeout` for in-flight cycles.
    ///
    /// Returns `false` if cycles were still running when the timeout elapsed;
    /// those are left to finish on their own.
    pub async fn shutdown(self, timeout: Duration) -> bool {
        self.token.cancel();
        for handle in self.loops {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "refresh loop ended abnormally");
            }
        }

        self.tasks.close();
        if tokio::time::timeout(timeout, self.tasks.wait()).await.is_ok() {
            tracing::info!("scraping stopped");
            true
        } else {
            tracing::warn!(in_flight = self.tasks.len(), "shutdown timed out with refresh cycles in flight");
            false
        }
    }
}
