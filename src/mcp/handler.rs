//! Capability handler interface.
//!
//! A handler is the concrete function behind a tool or resource. The
//! dispatcher performs all protocol work (lookup, schema validation, result
//! framing); a handler only turns validated arguments into a payload or a
//! domain error.
//!
//! Handlers must be pure readers of shared state: the catalogue and its
//! backing data are built once at startup and never mutated, so handlers may
//! run concurrently without coordination.

use serde_json::{Map, Value};
use thiserror::Error;

/// JSON object type used for tool arguments.
pub type Arguments = Map<String, Value>;

/// Outcome of a capability handler invocation.
pub type HandlerResult = Result<Value, HandlerError>;

/// A failure reported by a capability handler.
///
/// The dispatcher maps these onto the protocol: for `call_tool`, any handler
/// failure becomes a successful response with `isError = true`; for
/// `read_resource`, it becomes an `InternalError`, since resource reads have
/// no in-band error channel.
#[derive(Error, Debug)]
pub enum HandlerError {
    /// An anticipated domain failure (unknown topic, bad column name, ...).
    #[error("{0}")]
    Domain(String),

    /// An unexpected failure inside the handler.
    #[error("internal handler error: {0}")]
    Internal(String),
}

impl HandlerError {
    /// Convenience constructor for a domain failure.
    #[must_use]
    pub fn domain(message: impl Into<String>) -> Self {
        Self::Domain(message.into())
    }

    /// Convenience constructor for an unexpected failure.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

/// The function behind a tool.
///
/// Receives the full arguments object after schema validation, including any
/// undeclared extension fields (open schema). Handlers apply their own
/// defaults for optional fields they recognise.
pub trait ToolHandler: Send + Sync {
    /// Executes the tool with validated arguments.
    ///
    /// # Errors
    ///
    /// Returns a [`HandlerError`] on domain or internal failure.
    fn call(&self, arguments: &Arguments) -> HandlerResult;
}

impl<F> ToolHandler for F
where
    F: Fn(&Arguments) -> HandlerResult + Send + Sync,
{
    fn call(&self, arguments: &Arguments) -> HandlerResult {
        self(arguments)
    }
}

/// Parameters extracted from a resource URI by template matching.
///
/// Empty for static resources. Preserves placeholder order, so the common
/// single-placeholder case can use [`ResourceParams::first`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceParams {
    values: Vec<(String, String)>,
}

impl ResourceParams {
    /// Creates an empty parameter set (static resources).
    #[must_use]
    pub const fn empty() -> Self {
        Self { values: Vec::new() }
    }

    /// Binds a placeholder value. Used by the router during matching.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.push((name.into(), value.into()));
    }

    /// Looks up a placeholder by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the first bound value, if any.
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        self.values.first().map(|(_, v)| v.as_str())
    }

    /// Returns the number of bound placeholders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no placeholders are bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// The function behind a resource or resource template.
pub trait ResourceHandler: Send + Sync {
    /// Produces the resource payload for the extracted parameters.
    ///
    /// # Errors
    ///
    /// Returns a [`HandlerError`] on failure.
    fn read(&self, params: &ResourceParams) -> HandlerResult;
}

impl<F> ResourceHandler for F
where
    F: Fn(&ResourceParams) -> HandlerResult + Send + Sync,
{
    fn read(&self, params: &ResourceParams) -> HandlerResult {
        self(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn closure_as_tool_handler() {
        let handler = |args: &Arguments| -> HandlerResult {
            let text = args.get("text").and_then(Value::as_str).unwrap_or("");
            Ok(json!({ "echo": text }))
        };

        let mut args = Arguments::new();
        args.insert("text".to_string(), json!("hi"));

        let result = ToolHandler::call(&handler, &args).unwrap();
        assert_eq!(result["echo"], "hi");
    }

    #[test]
    fn resource_params_lookup() {
        let mut params = ResourceParams::empty();
        params.push("document_id", "mcp_overview");

        assert_eq!(params.get("document_id"), Some("mcp_overview"));
        assert_eq!(params.first(), Some("mcp_overview"));
        assert_eq!(params.get("missing"), None);
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn handler_error_display() {
        let err = HandlerError::domain("topic 'x' not found");
        assert_eq!(err.to_string(), "topic 'x' not found");

        let err = HandlerError::internal("poisoned state");
        assert!(err.to_string().contains("internal handler error"));
    }
}
