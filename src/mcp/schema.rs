//! Declarative input schemas and argument validation.
//!
//! Each tool declares the shape of its arguments once, at registration time:
//! named properties with a primitive type (or a `oneOf` union of types), an
//! optional enumeration of allowed values, and a required list. The
//! dispatcher validates incoming arguments against the declaration *before*
//! the handler runs, so handlers only ever see type-correct input.
//!
//! The schema is open: fields not declared here pass through to the handler
//! unvalidated. This keeps undeclared extension parameters working.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use serde_json::{json, Value};

use crate::mcp::handler::Arguments;

/// Primitive JSON types a property can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaType {
    /// UTF-8 string.
    String,
    /// Any JSON number.
    Number,
    /// Whole-valued number. A float is accepted only if its fraction is zero.
    Integer,
    /// true / false.
    Boolean,
    /// Nested JSON object.
    Object,
    /// JSON array.
    Array,
}

impl SchemaType {
    /// The JSON Schema name of this type.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
        }
    }

    /// Checks a runtime value against this type.
    #[must_use]
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Number => value.is_number(),
            Self::Integer => match value {
                Value::Number(n) => {
                    n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.fract() == 0.0)
                }
                _ => false,
            },
            Self::Boolean => value.is_boolean(),
            Self::Object => value.is_object(),
            Self::Array => value.is_array(),
        }
    }
}

/// The type constraint of a single property.
#[derive(Debug, Clone)]
pub enum PropertyKind {
    /// Exactly one primitive type.
    Single(SchemaType),
    /// A `oneOf` union; the value must match at least one alternative.
    OneOf(Vec<SchemaType>),
}

impl PropertyKind {
    fn matches(&self, value: &Value) -> bool {
        match self {
            Self::Single(ty) => ty.matches(value),
            Self::OneOf(types) => types.iter().any(|ty| ty.matches(value)),
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Single(ty) => ty.name().to_string(),
            Self::OneOf(types) => types
                .iter()
                .map(|ty| ty.name())
                .collect::<Vec<_>>()
                .join(" | "),
        }
    }
}

/// Declaration of one named property.
#[derive(Debug, Clone)]
pub struct PropertySchema {
    /// Type constraint.
    pub kind: PropertyKind,
    /// Human-readable description, surfaced in `list_tools`.
    pub description: String,
    /// Optional closed set of allowed values.
    pub allowed: Option<Vec<Value>>,
}

/// A declarative object schema for tool arguments.
///
/// Built with the fluent methods below, checked for internal consistency at
/// registration via [`InputSchema::check_well_formed`], and serialised into
/// the `inputSchema` field of the tool catalogue.
#[derive(Debug, Clone, Default)]
pub struct InputSchema {
    properties: IndexMap<String, PropertySchema>,
    required: Vec<String>,
}

/// A single validation failure, naming the offending field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The argument field that failed.
    pub field: String,
    /// Why it failed.
    pub reason: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "argument '{}': {}", self.field, self.reason)
    }
}

impl InputSchema {
    /// Creates an empty schema (all arguments optional and unvalidated).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn property(mut self, name: &str, kind: PropertyKind, description: &str) -> Self {
        self.properties.insert(
            name.to_string(),
            PropertySchema {
                kind,
                description: description.to_string(),
                allowed: None,
            },
        );
        self
    }

    /// Declares an optional property.
    #[must_use]
    pub fn optional(self, name: &str, ty: SchemaType, description: &str) -> Self {
        self.property(name, PropertyKind::Single(ty), description)
    }

    /// Declares a required property.
    #[must_use]
    pub fn required(mut self, name: &str, ty: SchemaType, description: &str) -> Self {
        self.required.push(name.to_string());
        self.property(name, PropertyKind::Single(ty), description)
    }

    /// Declares a required property accepting any of several types.
    #[must_use]
    pub fn required_one_of(mut self, name: &str, types: &[SchemaType], description: &str) -> Self {
        self.required.push(name.to_string());
        self.property(name, PropertyKind::OneOf(types.to_vec()), description)
    }

    /// Restricts the most recently declared property to a closed value set.
    ///
    /// # Panics
    ///
    /// Panics if no property has been declared yet. Schemas are built from
    /// static catalogue code, so this is a programming error, caught by the
    /// catalogue tests.
    #[must_use]
    pub fn values(mut self, allowed: &[&str]) -> Self {
        let (_, last) = self
            .properties
            .last_mut()
            .expect("values() requires a preceding property declaration");
        last.allowed = Some(allowed.iter().map(|v| json!(v)).collect());
        self
    }

    /// Checks the schema for internal consistency.
    ///
    /// Run once at registration time; a failure is a startup-time catalogue
    /// defect, never a runtime path.
    ///
    /// # Errors
    ///
    /// Returns a description of the first inconsistency found.
    pub fn check_well_formed(&self) -> Result<(), String> {
        for name in &self.required {
            if !self.properties.contains_key(name) {
                return Err(format!("required field '{name}' is not declared"));
            }
        }
        for (name, prop) in &self.properties {
            if let PropertyKind::OneOf(types) = &prop.kind {
                if types.is_empty() {
                    return Err(format!("property '{name}' has an empty oneOf union"));
                }
            }
            if let Some(allowed) = &prop.allowed {
                if allowed.is_empty() {
                    return Err(format!("property '{name}' has an empty enum"));
                }
            }
        }
        Ok(())
    }

    /// Validates an arguments object against this schema.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the first offending field: a
    /// missing required field, a type mismatch, or a value outside a declared
    /// enumeration.
    pub fn validate(&self, arguments: &Arguments) -> Result<(), ValidationError> {
        for name in &self.required {
            if !arguments.contains_key(name) {
                return Err(ValidationError {
                    field: name.clone(),
                    reason: "missing required field".to_string(),
                });
            }
        }

        for (name, value) in arguments {
            let Some(prop) = self.properties.get(name) else {
                // Open schema: undeclared fields pass through.
                continue;
            };

            if !prop.kind.matches(value) {
                return Err(ValidationError {
                    field: name.clone(),
                    reason: format!("expected {}", prop.kind.describe()),
                });
            }

            if let Some(allowed) = &prop.allowed {
                if !allowed.contains(value) {
                    let listed = allowed
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(", ");
                    return Err(ValidationError {
                        field: name.clone(),
                        reason: format!("must be one of: {listed}"),
                    });
                }
            }
        }

        Ok(())
    }

    /// Serialises the schema into JSON Schema object form.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut properties = serde_json::Map::new();
        for (name, prop) in &self.properties {
            let mut entry = serde_json::Map::new();
            match &prop.kind {
                PropertyKind::Single(ty) => {
                    entry.insert("type".to_string(), json!(ty.name()));
                }
                PropertyKind::OneOf(types) => {
                    let alternatives: Vec<Value> =
                        types.iter().map(|ty| json!({ "type": ty.name() })).collect();
                    entry.insert("oneOf".to_string(), Value::Array(alternatives));
                }
            }
            if let Some(allowed) = &prop.allowed {
                entry.insert("enum".to_string(), Value::Array(allowed.clone()));
            }
            entry.insert("description".to_string(), json!(prop.description));
            properties.insert(name.clone(), Value::Object(entry));
        }

        let mut schema = serde_json::Map::new();
        schema.insert("type".to_string(), json!("object"));
        schema.insert("properties".to_string(), Value::Object(properties));
        if !self.required.is_empty() {
            schema.insert("required".to_string(), json!(self.required));
        }
        Value::Object(schema)
    }
}

impl Serialize for InputSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}
