//! Request dispatcher: the single entry point for the five protocol
//! operations.
//!
//! The dispatcher owns the tool registry and resource router, both immutable
//! after construction; it holds no other state, so every exchange is
//! independent and exchanges may be processed concurrently.
//!
//! Error discipline, per the protocol contract:
//!
//! - unknown tool → [`ErrorKind::MethodNotFound`]
//! - arguments failing schema validation → [`ErrorKind::InvalidParams`],
//!   naming the offending field
//! - URI matching no resource or template → [`ErrorKind::InvalidRequest`]
//! - a tool handler failure → a *successful* response with `isError = true`
//!   ("the protocol worked, the operation failed")
//! - a resource handler failure → [`ErrorKind::InternalError`]

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

use crate::mcp::handler::Arguments;
use crate::mcp::registry::ToolRegistry;
use crate::mcp::router::ResourceRouter;

/// Protocol error taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    /// Requested tool name or method is not registered.
    MethodNotFound,
    /// Arguments failed schema validation.
    InvalidParams,
    /// A resource URI matched no static resource or template.
    InvalidRequest,
    /// Unexpected failure inside a matched handler.
    InternalError,
}

/// A protocol-level failure, reported to the client instead of a result.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct DispatchError {
    /// Which class of failure this is.
    pub kind: ErrorKind,
    /// Human-readable explanation.
    pub message: String,
}

impl DispatchError {
    fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Unknown method or tool.
    #[must_use]
    pub fn method_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MethodNotFound, message)
    }

    /// Invalid method parameters.
    #[must_use]
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidParams, message)
    }

    /// Malformed or unroutable request.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidRequest, message)
    }

    /// Unexpected internal failure.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InternalError, message)
    }
}

/// A decoded protocol request, one of the five supported operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Return the tool catalogue.
    ListTools,
    /// Invoke a named tool.
    CallTool {
        /// Tool name.
        name: String,
        /// Arguments object.
        arguments: Arguments,
    },
    /// Return the static resource catalogue.
    ListResources,
    /// Return the resource template catalogue.
    ListResourceTemplates,
    /// Read a resource by URI.
    ReadResource {
        /// The URI to resolve.
        uri: String,
    },
}

#[derive(Deserialize)]
struct ToolCallParams {
    name: String,
    #[serde(default)]
    arguments: Arguments,
}

#[derive(Deserialize)]
struct ReadResourceParams {
    uri: String,
}

impl Request {
    /// Decodes a method name and parameters into a request.
    ///
    /// Both the MCP wire spellings (`tools/call`, ...) and the canonical
    /// operation names (`call_tool`, ...) are accepted; the request/response
    /// shape, not the method spelling, is the compatibility surface.
    ///
    /// # Errors
    ///
    /// `MethodNotFound` for an unknown method, `InvalidParams` when required
    /// parameters are missing or of the wrong shape.
    pub fn from_parts(method: &str, params: Option<&Value>) -> Result<Self, DispatchError> {
        match method {
            "tools/list" | "list_tools" => Ok(Self::ListTools),
            "resources/list" | "list_resources" => Ok(Self::ListResources),
            "resources/templates/list" | "list_resource_templates" => {
                Ok(Self::ListResourceTemplates)
            }
            "tools/call" | "call_tool" => {
                let params: ToolCallParams = decode_params(method, params)?;
                Ok(Self::CallTool {
                    name: params.name,
                    arguments: params.arguments,
                })
            }
            "resources/read" | "read_resource" => {
                let params: ReadResourceParams = decode_params(method, params)?;
                Ok(Self::ReadResource { uri: params.uri })
            }
            other => Err(DispatchError::method_not_found(format!(
                "Method not found: {other}"
            ))),
        }
    }
}

fn decode_params<T: for<'de> Deserialize<'de>>(
    method: &str,
    params: Option<&Value>,
) -> Result<T, DispatchError> {
    let value = params
        .ok_or_else(|| DispatchError::invalid_params(format!("Missing params for {method}")))?;
    serde_json::from_value(value.clone())
        .map_err(|e| DispatchError::invalid_params(format!("Invalid params for {method}: {e}")))
}

/// Content block in a tool call result.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolContent {
    /// Text content.
    Text {
        /// The text content.
        text: String,
    },
}

#[allow(clippy::trivially_copy_pass_by_ref)] // serde's skip_serializing_if requires a predicate fn(&T) -> bool
const fn is_false(b: &bool) -> bool {
    !*b
}

/// Result of a tool call.
///
/// `is_error = true` means the tool executed but reported a failure; the
/// protocol exchange itself succeeded.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallResult {
    /// Ordered content blocks returned by the tool.
    pub content: Vec<ToolContent>,
    /// Whether the tool reported a failure.
    #[serde(skip_serializing_if = "is_false")]
    pub is_error: bool,
}

impl ToolCallResult {
    /// Creates a successful text result.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text { text: text.into() }],
            is_error: false,
        }
    }

    /// Creates an error text result.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: message.into(),
            }],
            is_error: true,
        }
    }
}

/// One block of resource content.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceBlock {
    /// The URI that was read.
    pub uri: String,
    /// MIME type of this block.
    pub mime_type: String,
    /// The payload, serialised to text.
    pub text: String,
}

/// Result of a resource read.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceContent {
    /// The content blocks.
    pub contents: Vec<ResourceBlock>,
}

/// The request dispatcher.
///
/// Also the seam for in-process consumers: agent-framework adapters hold
/// [`Dispatcher::call_tool`] and [`Dispatcher::read_resource`] plus the
/// catalogue listings, nothing more.
pub struct Dispatcher {
    registry: ToolRegistry,
    router: ResourceRouter,
}

impl Dispatcher {
    /// Creates a dispatcher over a populated registry and router.
    #[must_use]
    pub const fn new(registry: ToolRegistry, router: ResourceRouter) -> Self {
        Self { registry, router }
    }

    /// Returns the tool registry (read-only).
    #[must_use]
    pub const fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Dispatches a decoded request and encodes the result per the wire
    /// contract.
    ///
    /// # Errors
    ///
    /// Returns a [`DispatchError`] for protocol-level failures; tool-domain
    /// failures are encoded into the result instead.
    pub fn dispatch(&self, request: &Request) -> Result<Value, DispatchError> {
        match request {
            Request::ListTools => Ok(json!({ "tools": self.list_tools() })),
            Request::ListResources => Ok(json!({ "resources": self.list_resources() })),
            Request::ListResourceTemplates => {
                Ok(json!({ "resourceTemplates": self.list_resource_templates() }))
            }
            Request::CallTool { name, arguments } => {
                let result = self.call_tool(name, arguments)?;
                serde_json::to_value(result)
                    .map_err(|e| DispatchError::internal(format!("failed to encode result: {e}")))
            }
            Request::ReadResource { uri } => {
                let content = self.read_resource(uri)?;
                serde_json::to_value(content)
                    .map_err(|e| DispatchError::internal(format!("failed to encode result: {e}")))
            }
        }
    }

    /// Returns the full tool catalogue, in registration order.
    #[must_use]
    pub fn list_tools(&self) -> Vec<Value> {
        self.registry
            .descriptors()
            .map(|d| serde_json::to_value(d).unwrap_or(Value::Null))
            .collect()
    }

    /// Returns all static resource descriptors, in registration order.
    #[must_use]
    pub fn list_resources(&self) -> Vec<Value> {
        self.router
            .resources()
            .map(|d| serde_json::to_value(d).unwrap_or(Value::Null))
            .collect()
    }

    /// Returns all resource templates, in registration order.
    #[must_use]
    pub fn list_resource_templates(&self) -> Vec<Value> {
        self.router
            .templates()
            .map(|d| serde_json::to_value(d).unwrap_or(Value::Null))
            .collect()
    }

    /// Invokes a tool: registry lookup, schema validation, handler call.
    ///
    /// Validation happens before the handler runs, so a rejected call has no
    /// side effects. A handler failure is folded into the returned
    /// [`ToolCallResult`] with `is_error = true`.
    ///
    /// # Errors
    ///
    /// `MethodNotFound` for an unknown tool, `InvalidParams` when arguments
    /// fail the tool's schema.
    pub fn call_tool(
        &self,
        name: &str,
        arguments: &Arguments,
    ) -> Result<ToolCallResult, DispatchError> {
        let tool = self
            .registry
            .get(name)
            .ok_or_else(|| DispatchError::method_not_found(format!("Unknown tool: {name}")))?;

        tool.descriptor
            .input_schema
            .validate(arguments)
            .map_err(|e| DispatchError::invalid_params(e.to_string()))?;

        match tool.handler().call(arguments) {
            Ok(payload) => {
                let text = serde_json::to_string_pretty(&payload)
                    .map_err(|e| DispatchError::internal(format!("failed to encode result: {e}")))?;
                Ok(ToolCallResult::text(text))
            }
            Err(e) => {
                tracing::debug!(tool = name, error = %e, "tool handler reported failure");
                Ok(ToolCallResult::error(format!("Error: {e}")))
            }
        }
    }

    /// Reads a resource by URI via the router.
    ///
    /// # Errors
    ///
    /// `InvalidRequest` if no static resource or template matches;
    /// `InternalError` if the matched handler fails.
    pub fn read_resource(&self, uri: &str) -> Result<ResourceContent, DispatchError> {
        let matched = self.router.resolve(uri).ok_or_else(|| {
            DispatchError::invalid_request(format!("No resource matches URI: {uri}"))
        })?;

        let payload = matched.handler.read(&matched.params).map_err(|e| {
            tracing::error!(uri, error = %e, "resource handler failed");
            DispatchError::internal(format!("Error reading resource {uri}: {e}"))
        })?;

        let text = serde_json::to_string_pretty(&payload)
            .map_err(|e| DispatchError::internal(format!("failed to encode result: {e}")))?;

        Ok(ResourceContent {
            contents: vec![ResourceBlock {
                uri: uri.to_string(),
                mime_type: matched.mime_type.to_string(),
                text,
            }],
        })
    }
}
