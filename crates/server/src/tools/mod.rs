//! MCP tool implementations.
//!
//! Every tool reads from the [`CloudInfo`](cloudinfo_core::CloudInfo) façade
//! and returns pretty-printed JSON.

pub mod products;
pub mod providers;
pub mod regions;
pub mod status;

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use serde::Serialize;

pub use products::{ProductsParams, images_impl, products_impl, versions_impl};
pub use providers::{
    AttributeValuesParams, ProviderParams, attribute_values_impl, list_attributes_impl, list_providers_impl,
    provider_impl,
};
pub use regions::{RegionsParams, ZonesParams, regions_impl, zones_impl};
pub use status::{metrics_impl, status_impl};

/// Serialize a tool output as a successful JSON result.
pub(crate) fn json_result<T: Serialize>(output: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(output)
        .map_err(|e| McpError::internal_error(format!("failed to serialize output: {e}"), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}
