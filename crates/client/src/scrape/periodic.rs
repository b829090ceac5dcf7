//! Run a unit of work forever on an interval, until cancelled.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use super::ScrapeError;

/// Invokes work once immediately, then every interval until cancellation.
///
/// Invocations never overlap: the next tick waits for the previous work to
/// finish, and ticks missed meanwhile are delayed rather than bunched up.
/// Failures are the work's own business; nothing is retried here.
#[derive(Debug, Clone, Copy)]
pub struct PeriodicExecutor {
    interval: Duration,
}

impl PeriodicExecutor {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Spawn the loop on the current runtime.
    ///
    /// # Errors
    ///
    /// Returns `ScrapeError::InvalidInterval` for a zero interval.
    pub fn execute<F, Fut>(&self, cancellation_token: CancellationToken, mut work: F) -> Result<JoinHandle<()>, ScrapeError>
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        if self.interval.is_zero() {
            return Err(ScrapeError::InvalidInterval(self.interval));
        }

        let interval = self.interval;
        Ok(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    _ = cancellation_token.cancelled() => break,
                    _ = ticker.tick() => work().await,
                }
            }
        }))
    }
}
