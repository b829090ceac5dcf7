//! Unified error types for cloudinfo.
//!
//! Each variant maps to a stable JSON-RPC error code when surfaced through MCP.

use rmcp::model::{ErrorCode, ErrorData as McpError};

use crate::store::CacheKey;

/// Unified error types for the cloudinfo read side.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters or construction arguments.
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// The provider is not part of the configured provider set.
    #[error("UNSUPPORTED_PROVIDER: {0}")]
    UnsupportedProvider(String),

    /// No refresh has landed for the key yet, or its entry expired.
    #[error("NOT_CACHED: {} not yet cached ({})", .0.category, .0)]
    NotCached(CacheKey),

    /// Metric registration or encoding failed.
    #[error("METRICS_ERROR: {0}")]
    Metrics(String),
}

impl Error {
    /// The key of a `NotCached` error.
    pub fn cache_key(&self) -> Option<&CacheKey> {
        match self {
            Error::NotCached(key) => Some(key),
            _ => None,
        }
    }
}

impl From<prometheus::Error> for Error {
    fn from(err: prometheus::Error) -> Self {
        Error::Metrics(err.to_string())
    }
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::InvalidInput(_) => -32602,
            Error::UnsupportedProvider(_) => -32003,
            Error::NotCached(_) => -32001,
            Error::Metrics(_) => -32002,
        };

        McpError { code: ErrorCode(code), message: err.to_string().into(), data: None }
    }
}
