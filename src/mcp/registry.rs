//! Tool registry.
//!
//! An append-only, insertion-ordered table mapping tool name to descriptor
//! and handler. Registration happens once at startup; after that the registry
//! is read-only, which is what makes unsynchronised concurrent dispatch safe.

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::CatalogueError;
use crate::mcp::handler::ToolHandler;
use crate::mcp::schema::InputSchema;

/// Catalogue entry for one tool, as returned by `list_tools`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    /// Unique, case-sensitive tool name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Declared argument schema, serialised as a JSON Schema object.
    pub input_schema: InputSchema,
}

impl ToolDescriptor {
    /// Creates a descriptor.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>, schema: InputSchema) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema: schema,
        }
    }
}

/// A registered tool: its descriptor plus the bound handler.
pub struct RegisteredTool {
    /// The advertised descriptor.
    pub descriptor: ToolDescriptor,
    handler: Box<dyn ToolHandler>,
}

impl RegisteredTool {
    /// Returns the bound capability handler.
    #[must_use]
    pub fn handler(&self) -> &dyn ToolHandler {
        self.handler.as_ref()
    }
}

/// The process-wide tool table.
///
/// Iteration order is registration order, so `list_tools` is deterministic
/// and stable across repeated calls.
#[derive(Default)]
pub struct ToolRegistry {
    tools: IndexMap<String, RegisteredTool>,
}

impl ToolRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tool.
    ///
    /// The descriptor's schema is checked for well-formedness here, once,
    /// rather than on every call.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError::DuplicateTool`] if the name is already taken
    /// and [`CatalogueError::MalformedSchema`] if the schema is inconsistent.
    pub fn register(
        &mut self,
        descriptor: ToolDescriptor,
        handler: impl ToolHandler + 'static,
    ) -> Result<(), CatalogueError> {
        if self.tools.contains_key(&descriptor.name) {
            return Err(CatalogueError::DuplicateTool {
                name: descriptor.name,
            });
        }

        if let Err(message) = descriptor.input_schema.check_well_formed() {
            return Err(CatalogueError::MalformedSchema {
                tool: descriptor.name,
                message,
            });
        }

        let name = descriptor.name.clone();
        self.tools.insert(
            name,
            RegisteredTool {
                descriptor,
                handler: Box::new(handler),
            },
        );
        Ok(())
    }

    /// Looks up a tool by name (case-sensitive).
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RegisteredTool> {
        self.tools.get(name)
    }

    /// Returns all descriptors in registration order.
    pub fn descriptors(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.tools.values().map(|t| &t.descriptor)
    }

    /// Returns the number of registered tools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Returns `true` if no tools are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::handler::{Arguments, HandlerResult};
    use crate::mcp::schema::SchemaType;
    use serde_json::json;

    fn noop(_: &Arguments) -> HandlerResult {
        Ok(json!(null))
    }

    #[test]
    fn registration_order_is_preserved() {
        let mut registry = ToolRegistry::new();
        for name in ["zeta", "alpha", "mid"] {
            registry
                .register(ToolDescriptor::new(name, "", InputSchema::new()), noop)
                .unwrap();
        }

        let names: Vec<_> = registry.descriptors().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let mut registry = ToolRegistry::new();
        registry
            .register(ToolDescriptor::new("echo", "", InputSchema::new()), noop)
            .unwrap();

        let err = registry
            .register(ToolDescriptor::new("echo", "", InputSchema::new()), noop)
            .unwrap_err();
        assert!(matches!(err, CatalogueError::DuplicateTool { name } if name == "echo"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let mut registry = ToolRegistry::new();
        registry
            .register(ToolDescriptor::new("echo", "", InputSchema::new()), noop)
            .unwrap();

        assert!(registry.get("echo").is_some());
        assert!(registry.get("Echo").is_none());
    }

    #[test]
    fn malformed_schema_is_rejected_at_registration() {
        let schema = InputSchema::new()
            .required("operator", SchemaType::String, "op")
            .values(&[]);

        let mut registry = ToolRegistry::new();
        let err = registry
            .register(ToolDescriptor::new("filter", "", schema), noop)
            .unwrap_err();
        assert!(matches!(err, CatalogueError::MalformedSchema { .. }));
        assert!(registry.is_empty());
    }
}
