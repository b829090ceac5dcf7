//! Scraping pipeline.
//!
//! [`ScrapingDriver`] schedules refresh cycles, [`ScrapingManager`] runs them
//! for one provider and [`PeriodicExecutor`] provides the tick loop.

pub mod driver;
pub mod error;
pub mod manager;
pub mod periodic;

#[cfg(test)]
mod testing;

pub use driver::{ScrapingDriver, ScrapingHandle};
pub use error::{RegionStage, ScrapeError};
pub use manager::{COMPUTE_SERVICE, CycleGuard, ScrapingManager};
pub use periodic::PeriodicExecutor;
