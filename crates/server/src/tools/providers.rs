//! list_providers, get_provider, list_attributes and get_attribute_values tools.

use cloudinfo_core::CloudInfo;
use cloudinfo_core::model::Provider;
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::json_result;

/// Parameters for the get_provider tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ProviderParams {
    /// Provider identifier, e.g. "amazon".
    pub provider: String,
}

/// Parameters for the get_attribute_values tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AttributeValuesParams {
    pub provider: String,
    pub service: String,
    /// One of "cpu" or "memory".
    pub attribute: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ProvidersOutput {
    pub providers: Vec<Provider>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ProviderOutput {
    pub provider: Provider,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AttributesOutput {
    pub attributes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttributeValuesOutput {
    pub attribute_values: Vec<f64>,
}

pub fn list_providers_impl(info: &CloudInfo) -> Result<CallToolResult, McpError> {
    json_result(&ProvidersOutput { providers: info.get_providers() })
}

pub fn provider_impl(info: &CloudInfo, params: ProviderParams) -> Result<CallToolResult, McpError> {
    let provider = info.get_provider(&params.provider)?;
    json_result(&ProviderOutput { provider })
}

pub fn list_attributes_impl(info: &CloudInfo) -> Result<CallToolResult, McpError> {
    let attributes = info.get_attributes().into_iter().map(String::from).collect();
    json_result(&AttributesOutput { attributes })
}

pub fn attribute_values_impl(info: &CloudInfo, params: AttributeValuesParams) -> Result<CallToolResult, McpError> {
    let attribute_values = info.get_attr_values(&params.provider, &params.service, &params.attribute)?;
    json_result(&AttributeValuesOutput { attribute_values })
}
