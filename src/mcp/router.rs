//! Resource router: static URIs and parametric URI templates.
//!
//! Matching precedence is the crux here, because templates can overlap:
//!
//! 1. An exact match against a static resource URI always wins.
//! 2. Templates are tried from the longest literal prefix to the shortest,
//!    so `mcp://documents/search/{query}` is attempted before
//!    `mcp://documents/{document_id}` no matter which was registered first.
//!    Without that rule the generic template would greedily capture
//!    `search/...` as a document id.
//! 3. A single trailing placeholder binds the whole remainder of the URI
//!    verbatim, slashes included. Multiple placeholders are `/`-delimited
//!    and bound left-to-right.
//!
//! Like the tool registry, the router is populated once at startup and
//! read-only afterwards.

use serde::Serialize;

use crate::error::CatalogueError;
use crate::mcp::handler::{ResourceHandler, ResourceParams};

/// Catalogue entry for a single, non-parametric resource.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDescriptor {
    /// Fully qualified URI, no placeholders.
    pub uri: String,
    /// Display name.
    pub name: String,
    /// MIME type of the payload.
    pub mime_type: String,
    /// Human-readable description.
    pub description: String,
}

/// Catalogue entry for a family of resources addressed by placeholder
/// substitution.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceTemplate {
    /// URI containing one or more `{param}` placeholders.
    pub uri_template: String,
    /// Display name.
    pub name: String,
    /// MIME type of generated payloads.
    pub mime_type: String,
    /// Human-readable description.
    pub description: String,
}

/// A template compiled into its literal prefix and placeholder names.
///
/// Supported shape: a literal prefix followed by placeholders separated by
/// `/` (`prefix{a}`, `prefix{a}/{b}`, ...). Literal text after the last
/// placeholder is not supported and is rejected at registration.
#[derive(Debug, Clone)]
struct CompiledTemplate {
    prefix: String,
    params: Vec<String>,
}

impl CompiledTemplate {
    fn compile(template: &str) -> Result<Self, String> {
        let Some(brace) = template.find('{') else {
            return Err("template contains no placeholder".to_string());
        };

        let prefix = template[..brace].to_string();
        if prefix.is_empty() {
            return Err("template must start with a literal prefix".to_string());
        }

        let mut params = Vec::new();
        let mut rest = &template[brace..];
        loop {
            let Some(stripped) = rest.strip_prefix('{') else {
                return Err(format!("unexpected literal text at '{rest}'"));
            };
            let Some(close) = stripped.find('}') else {
                return Err("unclosed placeholder".to_string());
            };
            let name = &stripped[..close];
            if name.is_empty() {
                return Err("empty placeholder name".to_string());
            }
            if params.iter().any(|p| p == name) {
                return Err(format!("duplicate placeholder '{name}'"));
            }
            params.push(name.to_string());

            rest = &stripped[close + 1..];
            if rest.is_empty() {
                break;
            }
            rest = rest
                .strip_prefix('/')
                .ok_or_else(|| "placeholders must be separated by '/'".to_string())?;
        }

        Ok(Self { prefix, params })
    }

    /// Attempts to match a URI, binding placeholders on success.
    fn matches(&self, uri: &str) -> Option<ResourceParams> {
        let rest = uri.strip_prefix(&self.prefix)?;
        if rest.is_empty() {
            return None;
        }

        let mut params = ResourceParams::empty();
        if self.params.len() == 1 {
            // Single placeholder takes the remainder verbatim.
            params.push(self.params[0].clone(), rest);
            return Some(params);
        }

        let segments: Vec<&str> = rest.splitn(self.params.len(), '/').collect();
        if segments.len() != self.params.len() || segments.iter().any(|s| s.is_empty()) {
            return None;
        }
        for (name, segment) in self.params.iter().zip(&segments) {
            params.push(name.clone(), *segment);
        }
        Some(params)
    }
}

struct StaticEntry {
    descriptor: ResourceDescriptor,
    handler: Box<dyn ResourceHandler>,
}

struct TemplateEntry {
    descriptor: ResourceTemplate,
    compiled: CompiledTemplate,
    handler: Box<dyn ResourceHandler>,
}

/// A successful route: the matched entry's metadata, the extracted
/// parameters, and the handler to invoke.
pub struct RouteMatch<'a> {
    /// MIME type advertised by the matched entry.
    pub mime_type: &'a str,
    /// Placeholder bindings (empty for static resources).
    pub params: ResourceParams,
    /// The bound capability handler.
    pub handler: &'a dyn ResourceHandler,
}

/// Routes resource URIs to handlers.
#[derive(Default)]
pub struct ResourceRouter {
    statics: Vec<StaticEntry>,
    templates: Vec<TemplateEntry>,
    /// Indices into `templates`, sorted by descending literal prefix length.
    /// Kept separate so listing preserves registration order.
    match_order: Vec<usize>,
}

impl ResourceRouter {
    /// Creates an empty router.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a static resource.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError::DuplicateResource`] if the URI is taken.
    pub fn register_static(
        &mut self,
        descriptor: ResourceDescriptor,
        handler: impl ResourceHandler + 'static,
    ) -> Result<(), CatalogueError> {
        if self.statics.iter().any(|e| e.descriptor.uri == descriptor.uri) {
            return Err(CatalogueError::DuplicateResource {
                uri: descriptor.uri,
            });
        }
        self.statics.push(StaticEntry {
            descriptor,
            handler: Box::new(handler),
        });
        Ok(())
    }

    /// Registers a resource template.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError::MalformedTemplate`] if the template cannot
    /// be compiled and [`CatalogueError::DuplicateResource`] if an identical
    /// template is already registered.
    pub fn register_template(
        &mut self,
        descriptor: ResourceTemplate,
        handler: impl ResourceHandler + 'static,
    ) -> Result<(), CatalogueError> {
        if self
            .templates
            .iter()
            .any(|e| e.descriptor.uri_template == descriptor.uri_template)
        {
            return Err(CatalogueError::DuplicateResource {
                uri: descriptor.uri_template,
            });
        }

        let compiled = CompiledTemplate::compile(&descriptor.uri_template).map_err(|message| {
            CatalogueError::MalformedTemplate {
                template: descriptor.uri_template.clone(),
                message,
            }
        })?;

        self.templates.push(TemplateEntry {
            descriptor,
            compiled,
            handler: Box::new(handler),
        });

        // Longest literal prefix first; stable sort keeps registration order
        // among templates of equal specificity.
        self.match_order = (0..self.templates.len()).collect();
        self.match_order
            .sort_by_key(|&i| std::cmp::Reverse(self.templates[i].compiled.prefix.len()));

        Ok(())
    }

    /// Resolves a URI to a handler, or `None` if nothing matches.
    #[must_use]
    pub fn resolve(&self, uri: &str) -> Option<RouteMatch<'_>> {
        if let Some(entry) = self.statics.iter().find(|e| e.descriptor.uri == uri) {
            return Some(RouteMatch {
                mime_type: &entry.descriptor.mime_type,
                params: ResourceParams::empty(),
                handler: entry.handler.as_ref(),
            });
        }

        for &i in &self.match_order {
            let entry = &self.templates[i];
            if let Some(params) = entry.compiled.matches(uri) {
                return Some(RouteMatch {
                    mime_type: &entry.descriptor.mime_type,
                    params,
                    handler: entry.handler.as_ref(),
                });
            }
        }

        None
    }

    /// Returns static resource descriptors in registration order.
    pub fn resources(&self) -> impl Iterator<Item = &ResourceDescriptor> {
        self.statics.iter().map(|e| &e.descriptor)
    }

    /// Returns template descriptors in registration order.
    pub fn templates(&self) -> impl Iterator<Item = &ResourceTemplate> {
        self.templates.iter().map(|e| &e.descriptor)
    }
}
