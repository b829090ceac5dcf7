//! MCP server handler implementation.
//!
//! Routes tool calls to the read façade; nothing here talks to a provider.
use crate::tools::{
    AttributeValuesParams, ProductsParams, ProviderParams, RegionsParams, ZonesParams, attribute_values_impl,
    images_impl, list_attributes_impl, list_providers_impl, metrics_impl, products_impl, provider_impl, regions_impl,
    status_impl, versions_impl, zones_impl,
};

use cloudinfo_core::{CloudInfo, PrometheusReporter};
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};

/// The MCP server handler for cloudinfo.
#[derive(Clone)]
pub struct CloudInfoServer {
    info: CloudInfo,
    metrics: PrometheusReporter,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl CloudInfoServer {
    pub fn new(info: CloudInfo, metrics: PrometheusReporter) -> Self {
        Self { info, metrics, tool_router: Self::tool_router() }
    }

    #[tool(description = "List the configured cloud providers with their services.")]
    async fn list_providers(&self) -> Result<CallToolResult, McpError> {
        list_providers_impl(&self.info)
    }

    #[tool(description = "Get one cloud provider with its services.")]
    async fn get_provider(&self, params: Parameters<ProviderParams>) -> Result<CallToolResult, McpError> {
        provider_impl(&self.info, params.0)
    }

    #[tool(description = "List the attribute names accepted by get_attribute_values.")]
    async fn list_attributes(&self) -> Result<CallToolResult, McpError> {
        list_attributes_impl(&self.info)
    }

    #[tool(description = "Get the distinct values of an attribute (cpu or memory) offered by a provider's service.")]
    async fn get_attribute_values(&self, params: Parameters<AttributeValuesParams>) -> Result<CallToolResult, McpError> {
        attribute_values_impl(&self.info, params.0)
    }

    #[tool(description = "List the regions of a provider's service as id and display name.")]
    async fn get_regions(&self, params: Parameters<RegionsParams>) -> Result<CallToolResult, McpError> {
        regions_impl(&self.info, params.0)
    }

    #[tool(description = "List the availability zones of a region.")]
    async fn get_zones(&self, params: Parameters<ZonesParams>) -> Result<CallToolResult, McpError> {
        zones_impl(&self.info, params.0)
    }

    /// Products are merged with the latest cached on-demand and spot prices.
    #[tool(description = "List the products of a region with their latest on-demand and spot prices.")]
    async fn get_products(&self, params: Parameters<ProductsParams>) -> Result<CallToolResult, McpError> {
        products_impl(&self.info, params.0)
    }

    #[tool(description = "List the machine images of a provider's service in a region.")]
    async fn get_images(&self, params: Parameters<ProductsParams>) -> Result<CallToolResult, McpError> {
        images_impl(&self.info, params.0)
    }

    #[tool(description = "List the versions of a provider's service in a region.")]
    async fn get_versions(&self, params: Parameters<ProductsParams>) -> Result<CallToolResult, McpError> {
        versions_impl(&self.info, params.0)
    }

    #[tool(description = "Get the completion time (unix millis) of a provider's last full refresh.")]
    async fn get_status(&self, params: Parameters<ProviderParams>) -> Result<CallToolResult, McpError> {
        status_impl(&self.info, params.0)
    }

    #[tool(description = "Get scrape metrics in the Prometheus text format.")]
    async fn get_metrics(&self) -> Result<CallToolResult, McpError> {
        metrics_impl(&self.metrics)
    }
}

impl ServerHandler for CloudInfoServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "cloudinfo".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(
                "Cached cloud product and price information. Data appears after the first refresh of each provider; \
                 until then queries fail with NOT_CACHED."
                    .into(),
            ),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}
