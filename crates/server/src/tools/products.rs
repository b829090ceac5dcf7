//! get_products, get_images and get_versions tools.

use cloudinfo_core::CloudInfo;
use cloudinfo_core::model::{Image, ProductDetails};
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::json_result;

/// Parameters shared by the per-region product tools.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ProductsParams {
    pub provider: String,
    pub service: String,
    /// Region id, e.g. "eu-west-1".
    pub region: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductsOutput {
    pub products: Vec<ProductDetails>,
    /// Completion time (unix millis) of the provider's last refresh, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scraping_time: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ImagesOutput {
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct VersionsOutput {
    pub versions: Vec<String>,
}

pub fn products_impl(info: &CloudInfo, params: ProductsParams) -> Result<CallToolResult, McpError> {
    let products = info.get_product_details(&params.provider, &params.service, &params.region)?;
    let scraping_time = info.get_status(&params.provider).ok();
    json_result(&ProductsOutput { products, scraping_time })
}

pub fn images_impl(info: &CloudInfo, params: ProductsParams) -> Result<CallToolResult, McpError> {
    let images = info.get_service_images(&params.provider, &params.service, &params.region)?;
    json_result(&ImagesOutput { images })
}

pub fn versions_impl(info: &CloudInfo, params: ProductsParams) -> Result<CallToolResult, McpError> {
    let versions = info.get_versions(&params.provider, &params.service, &params.region)?;
    json_result(&VersionsOutput { versions })
}
