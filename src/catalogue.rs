//! The server catalogue: every tool and resource this server advertises,
//! wired to the corpus and analysis layers.
//!
//! Built once at startup from the loaded configuration. Handlers are
//! closures over a shared [`ServerContext`]; the context is immutable after
//! construction, so the closures are pure readers.

use std::sync::Arc;

use serde_json::{json, Value};

use crate::analysis::{stats, SampleDataset, TextAnalyzer};
use crate::config::Config;
use crate::corpus::{DocumentStore, KnowledgeBase, SearchIndex};
use crate::error::CatalogueError;
use crate::mcp::dispatch::Dispatcher;
use crate::mcp::handler::{Arguments, HandlerError, HandlerResult, ResourceParams};
use crate::mcp::registry::{ToolDescriptor, ToolRegistry};
use crate::mcp::router::{ResourceDescriptor, ResourceRouter, ResourceTemplate};
use crate::mcp::schema::{InputSchema, SchemaType};

const JSON_MIME: &str = "application/json";

/// Immutable backing state shared by all handlers.
pub struct ServerContext {
    /// Curated topic knowledge base.
    pub knowledge: KnowledgeBase,
    /// Markdown document store.
    pub documents: DocumentStore,
    /// Generated analytics dataset.
    pub dataset: SampleDataset,
    /// Simulated web search index.
    pub web: SearchIndex,
    /// Rule-based text analysis.
    pub analyzer: TextAnalyzer,
}

impl ServerContext {
    /// Builds the context from configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            knowledge: KnowledgeBase::demo(),
            documents: DocumentStore::demo(),
            dataset: SampleDataset::generate(&config.dataset),
            web: SearchIndex::demo(),
            analyzer: TextAnalyzer::new(),
        }
    }
}

/// Reads a string argument the schema has already validated.
fn str_arg<'a>(arguments: &'a Arguments, name: &str) -> &'a str {
    arguments.get(name).and_then(Value::as_str).unwrap_or("")
}

/// Reads an optional whole-number argument, applying the handler's default.
/// Whole-valued floats are accepted, matching the schema's integer rule.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn int_arg(arguments: &Arguments, name: &str, default: usize) -> usize {
    let Some(value) = arguments.get(name) else {
        return default;
    };
    if let Some(n) = value.as_u64() {
        return usize::try_from(n).unwrap_or(default);
    }
    value
        .as_f64()
        .filter(|f| *f >= 0.0 && f.fract() == 0.0)
        .map_or(default, |f| f as usize)
}

/// Builds the dispatcher with the full tool and resource catalogue.
///
/// # Errors
///
/// Returns a [`CatalogueError`] if a registration is inconsistent. The
/// catalogue is static, so a failure here is a startup defect, never a
/// runtime condition.
#[allow(clippy::too_many_lines)]
pub fn build_dispatcher(context: Arc<ServerContext>) -> Result<Dispatcher, CatalogueError> {
    let mut registry = ToolRegistry::new();

    let ctx = Arc::clone(&context);
    registry.register(
        ToolDescriptor::new(
            "knowledge_base_get_info",
            "Get information about a topic from the knowledge base",
            InputSchema::new()
                .required("topic", SchemaType::String, "The topic to look up")
                .optional("subtopic", SchemaType::String, "Optional subtopic within the topic"),
        ),
        move |arguments: &Arguments| -> HandlerResult {
            let topic = str_arg(arguments, "topic");
            let subtopic = arguments.get("subtopic").and_then(Value::as_str);
            ctx.knowledge.get_info(topic, subtopic).ok_or_else(|| {
                HandlerError::domain(format!(
                    "Topic '{topic}' not found. Available topics: {}",
                    ctx.knowledge.list_topics().join(", ")
                ))
            })
        },
    )?;

    let ctx = Arc::clone(&context);
    registry.register(
        ToolDescriptor::new(
            "knowledge_base_list_topics",
            "List all topics available in the knowledge base",
            InputSchema::new(),
        ),
        move |_: &Arguments| -> HandlerResult {
            Ok(json!({ "topics": ctx.knowledge.list_topics() }))
        },
    )?;

    let ctx = Arc::clone(&context);
    registry.register(
        ToolDescriptor::new(
            "knowledge_base_search",
            "Search the knowledge base for a term",
            InputSchema::new().required("query", SchemaType::String, "The term to search for"),
        ),
        move |arguments: &Arguments| -> HandlerResult {
            Ok(ctx.knowledge.search(str_arg(arguments, "query")))
        },
    )?;

    let ctx = Arc::clone(&context);
    registry.register(
        ToolDescriptor::new(
            "data_analysis_get_summary_statistics",
            "Summary statistics for the sample dataset, for one column or all numeric columns",
            InputSchema::new().optional(
                "column",
                SchemaType::String,
                "Column to summarise; omit for all numeric columns",
            ),
        ),
        move |arguments: &Arguments| -> HandlerResult {
            let column = arguments.get("column").and_then(Value::as_str);
            stats::summary_statistics(&ctx.dataset, column).map_err(HandlerError::Domain)
        },
    )?;

    let ctx = Arc::clone(&context);
    registry.register(
        ToolDescriptor::new(
            "data_analysis_filter_data",
            "Filter the sample dataset on one column and summarise the matching rows",
            InputSchema::new()
                .required("column", SchemaType::String, "Column to filter on")
                .required("operator", SchemaType::String, "Comparison operator")
                .values(&["eq", "gt", "lt", "gte", "lte", "contains"])
                .required_one_of(
                    "value",
                    &[SchemaType::String, SchemaType::Number],
                    "Value to compare against",
                ),
        ),
        move |arguments: &Arguments| -> HandlerResult {
            let value = arguments.get("value").cloned().unwrap_or(Value::Null);
            stats::filter_data(
                &ctx.dataset,
                str_arg(arguments, "column"),
                str_arg(arguments, "operator"),
                &value,
            )
            .map_err(HandlerError::Domain)
        },
    )?;

    let ctx = Arc::clone(&context);
    registry.register(
        ToolDescriptor::new(
            "data_analysis_get_correlation",
            "Pearson correlation between two numeric columns of the sample dataset",
            InputSchema::new()
                .required("column1", SchemaType::String, "First column")
                .required("column2", SchemaType::String, "Second column"),
        ),
        move |arguments: &Arguments| -> HandlerResult {
            stats::correlation(
                &ctx.dataset,
                str_arg(arguments, "column1"),
                str_arg(arguments, "column2"),
            )
            .map_err(HandlerError::Domain)
        },
    )?;

    let ctx = Arc::clone(&context);
    registry.register(
        ToolDescriptor::new(
            "document_processing_extract_entities",
            "Extract named entities from text, grouped by category",
            InputSchema::new().required("text", SchemaType::String, "The text to analyse"),
        ),
        move |arguments: &Arguments| -> HandlerResult {
            Ok(ctx.analyzer.extract_entities(str_arg(arguments, "text")))
        },
    )?;

    let ctx = Arc::clone(&context);
    registry.register(
        ToolDescriptor::new(
            "document_processing_summarize",
            "Produce a short summary of the given text",
            InputSchema::new()
                .required("text", SchemaType::String, "The text to summarise")
                .optional(
                    "max_length",
                    SchemaType::Integer,
                    "Maximum summary length in characters (default 100)",
                ),
        ),
        move |arguments: &Arguments| -> HandlerResult {
            let text = str_arg(arguments, "text");
            let max_length = int_arg(arguments, "max_length", 100);
            let summary = TextAnalyzer::summarize(text, max_length);
            Ok(json!({
                "summary": summary,
                "original_length": text.chars().count(),
                "summary_length": summary.chars().count(),
            }))
        },
    )?;

    let ctx = Arc::clone(&context);
    registry.register(
        ToolDescriptor::new(
            "document_processing_extract_keywords",
            "Extract the most frequent keywords from text",
            InputSchema::new()
                .required("text", SchemaType::String, "The text to analyse")
                .optional(
                    "max_keywords",
                    SchemaType::Integer,
                    "Maximum number of keywords (default 5)",
                ),
        ),
        move |arguments: &Arguments| -> HandlerResult {
            let keywords = ctx.analyzer.extract_keywords(
                str_arg(arguments, "text"),
                int_arg(arguments, "max_keywords", 5),
            );
            let listed: Vec<Value> = keywords
                .into_iter()
                .map(|(word, count)| json!({ "word": word, "count": count }))
                .collect();
            Ok(json!({ "keywords": listed }))
        },
    )?;

    let mut router = ResourceRouter::new();

    let ctx = Arc::clone(&context);
    router.register_static(
        ResourceDescriptor {
            uri: "mcp://documents/list".to_string(),
            name: "Document list".to_string(),
            mime_type: JSON_MIME.to_string(),
            description: "Catalogue of all available documents".to_string(),
        },
        move |_: &ResourceParams| -> HandlerResult { Ok(ctx.documents.list_documents()) },
    )?;

    let ctx = Arc::clone(&context);
    router.register_template(
        ResourceTemplate {
            uri_template: "mcp://web-search/{query}".to_string(),
            name: "Web search".to_string(),
            mime_type: JSON_MIME.to_string(),
            description: "Simulated web search results for a query".to_string(),
        },
        move |params: &ResourceParams| -> HandlerResult {
            Ok(ctx.web.search(params.first().unwrap_or("")))
        },
    )?;

    let ctx = Arc::clone(&context);
    router.register_template(
        ResourceTemplate {
            uri_template: "mcp://documents/{document_id}".to_string(),
            name: "Document content".to_string(),
            mime_type: JSON_MIME.to_string(),
            description: "A single document with its content and metadata".to_string(),
        },
        move |params: &ResourceParams| -> HandlerResult {
            let id = params.first().unwrap_or("");
            // Unknown ids are reported in-band so clients see which id failed.
            Ok(ctx.documents.get_document(id).unwrap_or_else(|| {
                json!({ "error": format!("Document '{id}' not found") })
            }))
        },
    )?;

    let ctx = Arc::clone(&context);
    router.register_template(
        ResourceTemplate {
            uri_template: "mcp://documents/search/{query}".to_string(),
            name: "Document search".to_string(),
            mime_type: JSON_MIME.to_string(),
            description: "Documents matching a search term".to_string(),
        },
        move |params: &ResourceParams| -> HandlerResult {
            Ok(ctx.documents.search_documents(params.first().unwrap_or("")))
        },
    )?;

    Ok(Dispatcher::new(registry, router))
}
