//! get_regions and get_zones tools.

use cloudinfo_core::CloudInfo;
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::json_result;

/// Parameters for the get_regions tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RegionsParams {
    pub provider: String,
    pub service: String,
}

/// Parameters for the get_zones tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ZonesParams {
    pub provider: String,
    /// Region id, e.g. "eu-west-1".
    pub region: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Region {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RegionsOutput {
    pub regions: Vec<Region>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ZonesOutput {
    pub zones: Vec<String>,
}

/// Regions sorted by display name.
pub fn regions_impl(info: &CloudInfo, params: RegionsParams) -> Result<CallToolResult, McpError> {
    let mut regions: Vec<Region> = info
        .get_regions(&params.provider, &params.service)?
        .into_iter()
        .map(|(name, id)| Region { id, name })
        .collect();
    regions.sort_by(|a, b| a.name.cmp(&b.name));
    json_result(&RegionsOutput { regions })
}

pub fn zones_impl(info: &CloudInfo, params: ZonesParams) -> Result<CallToolResult, McpError> {
    let zones = info.get_zones(&params.provider, &params.region)?;
    json_result(&ZonesOutput { zones })
}
