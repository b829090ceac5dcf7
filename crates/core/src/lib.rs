//! Core types and shared functionality for cloudinfo.
//!
//! This crate provides:
//! - Cloud product information model
//! - Tiered in-memory cache store
//! - Read façade over the store
//! - Scrape metrics capability
//! - Unified error types
//! - Configuration structures

pub mod config;
pub mod error;
pub mod info;
pub mod metrics;
pub mod model;
pub mod store;

pub use config::AppConfig;
pub use error::Error;
pub use info::CloudInfo;
pub use metrics::{MetricsReporter, NoOpReporter, PrometheusReporter};
pub use store::CloudInfoStore;
