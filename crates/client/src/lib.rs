//! Provider capability and scraping pipeline for cloudinfo.
//!
//! Providers implement [`CloudInfoer`]; the [`ScrapingDriver`] refreshes their
//! data into a [`cloudinfo_core::CloudInfoStore`] on two schedules.

pub mod provider;
pub mod scrape;

pub use provider::{CatalogProvider, CloudInfoer, PriceSnapshot, ProviderError};
pub use scrape::{PeriodicExecutor, ScrapeError, ScrapingDriver, ScrapingHandle, ScrapingManager};
