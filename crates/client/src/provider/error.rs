//! Provider capability error types.

use std::sync::Arc;

/// Errors returned by a [`CloudInfoer`](super::CloudInfoer) operation.
///
/// A failure is always distinct from "no data": an operation that succeeds
/// with an empty result returns `Ok` with an empty collection.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    /// The provider's backend could not be reached or answered with an error.
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    /// The service is not offered by the provider.
    #[error("unknown service: {0}")]
    UnknownService(String),

    /// The region is not known to the provider.
    #[error("unknown region: {0}")]
    UnknownRegion(String),

    /// Catalog data could not be parsed.
    #[error("invalid catalog: {0}")]
    Catalog(String),

    /// Reading catalog data failed.
    #[error("io error: {0}")]
    Io(Arc<std::io::Error>),
}

impl From<std::io::Error> for ProviderError {
    fn from(err: std::io::Error) -> Self {
        ProviderError::Io(Arc::new(err))
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::Catalog(err.to_string())
    }
}
