//! get_status and get_metrics tools.

use cloudinfo_core::{CloudInfo, PrometheusReporter};
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{ProviderParams, json_result};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StatusOutput {
    /// Completion time (unix millis) of the provider's last full refresh.
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MetricsOutput {
    /// Scrape metrics in the Prometheus text exposition format.
    pub metrics: String,
}

pub fn status_impl(info: &CloudInfo, params: ProviderParams) -> Result<CallToolResult, McpError> {
    let status = info.get_status(&params.provider)?;
    json_result(&StatusOutput { status })
}

pub fn metrics_impl(metrics: &PrometheusReporter) -> Result<CallToolResult, McpError> {
    let metrics = metrics.encode_text()?;
    json_result(&MetricsOutput { metrics })
}
