use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::get};
use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, ServiceExt,
    handler::server::{router::tool::ToolRouter, tool::ToolCallContext, wrapper::Parameters},
    model::*,
    serde_json::{self, Value, json},
    service::RequestContext,
    tool, tool_router,
    transport::{
        stdio,
        streamable_http_server::{StreamableHttpService, session::local::LocalSessionManager},
    },
};
use serde::Serialize;

use crate::config::{Config, Transport};
use crate::core::{
    error::{McpResult, TimeServerError},
    models::{ConvertTimeRequest, GetCurrentTimeRequest},
    provider::TimeServer,
};

/// Available resource URIs for the Time MCP Server
pub const AVAILABLE_RESOURCES: &[&str] = &["time://status", "time://help"];

/// Input properties that name a timezone, with their base descriptions.
const ZONE_PROPERTIES: &[(&str, &str)] = &[
    (
        "timezone",
        "IANA timezone name (e.g., 'America/New_York', 'Europe/London').",
    ),
    (
        "source_timezone",
        "Source IANA timezone name (e.g., 'America/New_York', 'Europe/London').",
    ),
    (
        "target_timezone",
        "Target IANA timezone name (e.g., 'Asia/Tokyo', 'America/Los_Angeles').",
    ),
];

/// Required input fields per tool, as advertised to clients.
const REQUIRED_FIELDS: &[(&str, &[&str])] = &[
    ("get_current_time", &[]),
    ("convert_time", &["source_timezone", "time", "target_timezone"]),
];

/// Time MCP Server with timezone operations
#[derive(Clone)]
pub struct TimeService {
    time_server: TimeServer,
    tool_router: ToolRouter<TimeService>,
}

impl TimeService {
    pub fn new(time_server: TimeServer) -> Self {
        Self {
            time_server,
            tool_router: Self::tool_router(),
        }
    }

    fn create_resource_text(&self, uri: &str, name: &str) -> Resource {
        RawResource::new(uri, name.to_string()).no_annotation()
    }

    pub(crate) fn local_timezone(&self) -> &str {
        self.time_server.local_timezone()
    }

    /// Registered tools, with zone descriptions pointing at the local timezone.
    pub(crate) fn tools(&self) -> Vec<Tool> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|tool| self.describe_tool(tool))
            .collect()
    }

    fn describe_tool(&self, mut tool: Tool) -> Tool {
        let mut schema = (*tool.input_schema).clone();

        if let Some(Value::Object(properties)) = schema.get_mut("properties") {
            for (name, description) in ZONE_PROPERTIES {
                if let Some(Value::Object(property)) = properties.get_mut(*name) {
                    property.insert(
                        "description".to_string(),
                        json!(format!(
                            "{} Use '{}' as local timezone if no timezone provided by the user.",
                            description,
                            self.local_timezone()
                        )),
                    );
                }
            }
        }

        if let Some((_, required)) = REQUIRED_FIELDS
            .iter()
            .find(|(name, _)| tool.name == *name)
        {
            schema.insert("required".to_string(), json!(required));
        }

        tool.input_schema = Arc::new(schema);
        tool
    }

    fn generate_status_content(&self) -> McpResult<String> {
        let current_time = self.time_server.get_current_time(self.local_timezone())?;

        Ok(format!(
            r#"Time MCP Server Status

Local Timezone: {}
Current Local Time: {}
Day of Week: {}
DST Active: {}
Tools Available: get_current_time, convert_time"#,
            current_time.timezone,
            current_time.datetime,
            current_time.day_of_week,
            current_time.is_dst
        ))
    }

    fn generate_help_content(&self) -> String {
        format!(
            r#"Time MCP Server Help

TOOLS:
- get_current_time: Current time in an IANA timezone
  - timezone: IANA timezone name (optional, defaults to UTC)
  - Example: {{"timezone": "Asia/Kathmandu"}}

- convert_time: Convert a time of day between timezones, using today's date
  - source_timezone: Source IANA timezone name (required)
  - time: Time in 24-hour format HH:MM (required)
  - target_timezone: Target IANA timezone name (required)
  - Example: {{"source_timezone": "Europe/Paris", "time": "09:30", "target_timezone": "America/Chicago"}}

OUTPUT:
- datetime: YYYY-MM-DDTHH:MM:SS+HH:MM, always with a numeric offset
- is_dst: true when the zone is off its standard offset
- time_difference: target offset minus source offset, e.g. "+1.0h", "-5.75h"

LOCAL TIMEZONE: {}"#,
            self.local_timezone()
        )
    }
}

fn structured<T: Serialize>(value: &T) -> McpResult<CallToolResult> {
    let value = serde_json::to_value(value)
        .map_err(|e| McpError::internal_error(format!("failed to encode result: {}", e), None))?;
    Ok(CallToolResult::structured(value))
}

fn reject(tool: &str, err: TimeServerError) -> McpError {
    tracing::debug!("{} failed: {}", tool, err);
    err.into()
}

#[tool_router]
impl TimeService {
    #[tool(description = "Get current time in a specific timezone")]
    pub(crate) async fn get_current_time(
        &self,
        Parameters(req): Parameters<GetCurrentTimeRequest>,
    ) -> McpResult<CallToolResult> {
        let result = self
            .time_server
            .get_current_time(&req.timezone)
            .map_err(|e| reject("get_current_time", e))?;
        structured(&result)
    }

    #[tool(description = "Convert time between timezones")]
    pub(crate) async fn convert_time(
        &self,
        Parameters(req): Parameters<ConvertTimeRequest>,
    ) -> McpResult<CallToolResult> {
        let result = self
            .time_server
            .convert_time(&req.source_timezone, &req.time, &req.target_timezone)
            .map_err(|e| reject("convert_time", e))?;
        structured(&result)
    }
}

impl ServerHandler for TimeService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_resources()
                .enable_tools()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(format!(
                "Time MCP Server for timezone operations. Tools: get_current_time, convert_time. Local timezone: {}. Use IANA timezone names.",
                self.local_timezone()
            )),
        }
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: RequestContext<RoleServer>,
    ) -> McpResult<CallToolResult> {
        let tcc = ToolCallContext::new(self, request, context);
        self.tool_router.call(tcc).await
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _: RequestContext<RoleServer>,
    ) -> McpResult<ListToolsResult> {
        Ok(ListToolsResult {
            tools: self.tools(),
            next_cursor: None,
        })
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _: RequestContext<RoleServer>,
    ) -> McpResult<ListResourcesResult> {
        Ok(ListResourcesResult {
            resources: vec![
                self.create_resource_text("time://status", "server-status"),
                self.create_resource_text("time://help", "help-documentation"),
            ],
            next_cursor: None,
        })
    }

    async fn read_resource(
        &self,
        ReadResourceRequestParam { uri }: ReadResourceRequestParam,
        _: RequestContext<RoleServer>,
    ) -> McpResult<ReadResourceResult> {
        match uri.as_str() {
            "time://status" => {
                let status = self.generate_status_content()?;
                Ok(ReadResourceResult {
                    contents: vec![ResourceContents::text(status, uri)],
                })
            }
            "time://help" => {
                let help = self.generate_help_content();
                Ok(ReadResourceResult {
                    contents: vec![ResourceContents::text(help, uri)],
                })
            }
            _ => Err(TimeServerError::ResourceNotFound {
                uri: uri.to_string(),
            }
            .into()),
        }
    }

    async fn initialize(
        &self,
        _request: InitializeRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> McpResult<InitializeResult> {
        tracing::info!("Time MCP Server initialized successfully");
        Ok(self.get_info())
    }
}

async fn health(State(time_server): State<Arc<TimeServer>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "local_timezone": time_server.local_timezone(),
    }))
}

/// HTTP routes: `GET /health`, everything else goes to the MCP endpoint.
pub fn router(time_server: TimeServer) -> Router {
    let session_server = time_server.clone();
    let mcp_service = StreamableHttpService::new(
        move || Ok(TimeService::new(session_server.clone())),
        LocalSessionManager::default().into(),
        Default::default(),
    );

    Router::new()
        .route("/health", get(health))
        .with_state(Arc::new(time_server))
        .fallback_service(mcp_service)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

async fn serve_http(
    time_server: TimeServer,
    bind_address: SocketAddr,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener = tokio::net::TcpListener::bind(bind_address).await?;
    tracing::info!("MCP Time Server - listening on {}", listener.local_addr()?);

    axum::serve(listener, router(time_server))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn serve_stdio(time_server: TimeServer) -> Result<(), Box<dyn std::error::Error>> {
    let service = TimeService::new(time_server)
        .serve(stdio())
        .await
        .inspect_err(|e| {
            tracing::error!("serving error: {:?}", e);
        })?;

    service.waiting().await?;
    Ok(())
}

pub async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let time_server = TimeServer::new(&config.local_timezone);
    tracing::info!("Using local timezone: {}", time_server.local_timezone());

    match config.transport {
        Transport::Http => serve_http(time_server, config.bind_address).await,
        Transport::Stdio => serve_stdio(time_server).await,
    }
}
