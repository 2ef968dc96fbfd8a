//! End-to-end tests over the full capability catalogue.
//!
//! These exercise the same dispatcher the server loop uses, driving it with
//! decoded requests: catalogue listings, tool calls (success, domain error,
//! validation failure), and resource reads including template precedence.

use std::sync::Arc;

use serde_json::{json, Value};

use knowledge_mcp::catalogue::{build_dispatcher, ServerContext};
use knowledge_mcp::config::Config;
use knowledge_mcp::mcp::dispatch::{Dispatcher, ErrorKind, Request};

fn dispatcher() -> Dispatcher {
    let context = Arc::new(ServerContext::from_config(&Config::default()));
    build_dispatcher(context).expect("catalogue must register cleanly")
}

fn call(dispatcher: &Dispatcher, method: &str, params: Value) -> Result<Value, ErrorKind> {
    let request = Request::from_parts(method, Some(&params)).map_err(|e| e.kind)?;
    dispatcher.dispatch(&request).map_err(|e| e.kind)
}

/// Extracts the text payload of a tool call result, asserting its error flag.
fn tool_text(result: &Value, expect_error: bool) -> String {
    assert_eq!(
        result["isError"].as_bool().unwrap_or(false),
        expect_error,
        "unexpected isError in {result}"
    );
    result["content"][0]["text"].as_str().unwrap().to_string()
}

// =============================================================================
// Catalogue listings
// =============================================================================

#[test]
fn tools_list_advertises_nine_tools() {
    let dispatcher = dispatcher();
    let result = call(&dispatcher, "tools/list", json!({})).unwrap();

    let tools = result["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 9);
    assert_eq!(tools[0]["name"], "knowledge_base_get_info");
    assert_eq!(tools[0]["inputSchema"]["type"], "object");
    assert_eq!(tools[0]["inputSchema"]["required"], json!(["topic"]));
}

#[test]
fn listings_are_idempotent() {
    let dispatcher = dispatcher();
    let first = call(&dispatcher, "tools/list", json!({})).unwrap();
    let second = call(&dispatcher, "tools/list", json!({})).unwrap();
    assert_eq!(first, second);

    let first = call(&dispatcher, "resources/templates/list", json!({})).unwrap();
    let second = call(&dispatcher, "resources/templates/list", json!({})).unwrap();
    assert_eq!(first, second);
}

#[test]
fn resources_list_and_templates_list_are_disjoint() {
    let dispatcher = dispatcher();

    let statics = call(&dispatcher, "resources/list", json!({})).unwrap();
    assert_eq!(statics["resources"][0]["uri"], "mcp://documents/list");

    let templates = call(&dispatcher, "resources/templates/list", json!({})).unwrap();
    let listed = templates["resourceTemplates"].as_array().unwrap();
    assert_eq!(listed.len(), 3);
    assert!(listed
        .iter()
        .all(|t| t["uriTemplate"].as_str().unwrap().contains('{')));
}

#[test]
fn both_method_spellings_are_accepted() {
    let dispatcher = dispatcher();

    let wire = call(&dispatcher, "tools/list", json!({})).unwrap();
    let canonical = call(&dispatcher, "list_tools", json!({})).unwrap();
    assert_eq!(wire, canonical);

    let wire = call(
        &dispatcher,
        "tools/call",
        json!({"name": "knowledge_base_list_topics", "arguments": {}}),
    )
    .unwrap();
    let canonical = call(
        &dispatcher,
        "call_tool",
        json!({"name": "knowledge_base_list_topics", "arguments": {}}),
    )
    .unwrap();
    assert_eq!(wire, canonical);
}

#[test]
fn unknown_method_is_method_not_found() {
    let dispatcher = dispatcher();
    let err = call(&dispatcher, "tools/destroy", json!({})).unwrap_err();
    assert_eq!(err, ErrorKind::MethodNotFound);
}

// =============================================================================
// Tool calls
// =============================================================================

#[test]
fn knowledge_base_get_info_returns_topic_payload() {
    let dispatcher = dispatcher();
    let result = call(
        &dispatcher,
        "tools/call",
        json!({"name": "knowledge_base_get_info", "arguments": {"topic": "mcp"}}),
    )
    .unwrap();

    let text = tool_text(&result, false);
    assert!(text.contains("Model Context Protocol"));
}

#[test]
fn knowledge_base_get_info_with_subtopic() {
    let dispatcher = dispatcher();
    let result = call(
        &dispatcher,
        "tools/call",
        json!({"name": "knowledge_base_get_info", "arguments": {
            "topic": "ai_frameworks",
            "subtopic": "langchain"
        }}),
    )
    .unwrap();

    let text = tool_text(&result, false);
    assert!(text.contains("langchain") || text.contains("LangChain"));
    assert!(!text.contains("smolagents"));
}

#[test]
fn unknown_topic_is_tool_error_not_protocol_error() {
    let dispatcher = dispatcher();
    let result = call(
        &dispatcher,
        "tools/call",
        json!({"name": "knowledge_base_get_info", "arguments": {"topic": "alchemy"}}),
    )
    .unwrap();

    let text = tool_text(&result, true);
    assert!(text.starts_with("Error:"));
    assert!(text.contains("alchemy"));
}

#[test]
fn unknown_tool_is_method_not_found() {
    let dispatcher = dispatcher();
    let err = call(
        &dispatcher,
        "tools/call",
        json!({"name": "no_such_tool", "arguments": {}}),
    )
    .unwrap_err();
    assert_eq!(err, ErrorKind::MethodNotFound);
}

#[test]
fn missing_required_argument_is_invalid_params() {
    let dispatcher = dispatcher();
    let request = Request::from_parts(
        "tools/call",
        Some(&json!({"name": "knowledge_base_get_info", "arguments": {}})),
    )
    .unwrap();

    let err = dispatcher.dispatch(&request).unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidParams);
    // The offending field is named.
    assert!(err.message.contains("topic"), "message was: {}", err.message);
}

#[test]
fn wrong_argument_type_is_invalid_params() {
    let dispatcher = dispatcher();
    let err = call(
        &dispatcher,
        "tools/call",
        json!({"name": "document_processing_summarize", "arguments": {
            "text": "hello", "max_length": "short"
        }}),
    )
    .unwrap_err();
    assert_eq!(err, ErrorKind::InvalidParams);
}

#[test]
fn filter_data_accepts_string_or_number_value() {
    let dispatcher = dispatcher();

    let numeric = call(
        &dispatcher,
        "tools/call",
        json!({"name": "data_analysis_filter_data", "arguments": {
            "column": "temperature", "operator": "gt", "value": 30
        }}),
    )
    .unwrap();
    tool_text(&numeric, false);

    let string = call(
        &dispatcher,
        "tools/call",
        json!({"name": "data_analysis_filter_data", "arguments": {
            "column": "date", "operator": "contains", "value": "2023-02"
        }}),
    )
    .unwrap();
    tool_text(&string, false);

    let boolean = call(
        &dispatcher,
        "tools/call",
        json!({"name": "data_analysis_filter_data", "arguments": {
            "column": "temperature", "operator": "gt", "value": true
        }}),
    )
    .unwrap_err();
    assert_eq!(boolean, ErrorKind::InvalidParams);
}

#[test]
fn filter_data_rejects_unlisted_operator() {
    let dispatcher = dispatcher();
    let err = call(
        &dispatcher,
        "tools/call",
        json!({"name": "data_analysis_filter_data", "arguments": {
            "column": "temperature", "operator": "between", "value": 5
        }}),
    )
    .unwrap_err();
    assert_eq!(err, ErrorKind::InvalidParams);
}

#[test]
fn summary_statistics_defaults_to_all_columns() {
    let dispatcher = dispatcher();
    let result = call(
        &dispatcher,
        "tools/call",
        json!({"name": "data_analysis_get_summary_statistics", "arguments": {}}),
    )
    .unwrap();

    let text = tool_text(&result, false);
    let payload: Value = serde_json::from_str(&text).unwrap();
    assert!(payload.get("temperature").is_some());
    assert!(payload.get("air_quality_index").is_some());
}

#[test]
fn correlation_reports_interpretation() {
    let dispatcher = dispatcher();
    let result = call(
        &dispatcher,
        "tools/call",
        json!({"name": "data_analysis_get_correlation", "arguments": {
            "column1": "temperature", "column2": "temperature"
        }}),
    )
    .unwrap();

    let text = tool_text(&result, false);
    let payload: Value = serde_json::from_str(&text).unwrap();
    assert!((payload["correlation"].as_f64().unwrap() - 1.0).abs() < 1e-9);
    assert!(payload["interpretation"]
        .as_str()
        .unwrap()
        .contains("very strong positive"));
}

#[test]
fn extract_entities_groups_by_category() {
    let dispatcher = dispatcher();
    let result = call(
        &dispatcher,
        "tools/call",
        json!({"name": "document_processing_extract_entities", "arguments": {
            "text": "Anthropic announced a partnership in Japan in March."
        }}),
    )
    .unwrap();

    let text = tool_text(&result, false);
    let payload: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(payload["organizations"], json!(["Anthropic"]));
    assert_eq!(payload["locations"], json!(["Japan"]));
    assert_eq!(payload["dates"], json!(["March"]));
}

#[test]
fn extract_keywords_honours_max_keywords() {
    let dispatcher = dispatcher();
    let result = call(
        &dispatcher,
        "tools/call",
        json!({"name": "document_processing_extract_keywords", "arguments": {
            "text": "protocol registry dispatcher transport router schema handler",
            "max_keywords": 2
        }}),
    )
    .unwrap();

    let text = tool_text(&result, false);
    let payload: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(payload["keywords"].as_array().unwrap().len(), 2);
}

#[test]
fn undeclared_extension_arguments_pass_through() {
    let dispatcher = dispatcher();
    let result = call(
        &dispatcher,
        "tools/call",
        json!({"name": "knowledge_base_search", "arguments": {
            "query": "agents", "trace_id": "abc-123"
        }}),
    )
    .unwrap();
    tool_text(&result, false);
}

// =============================================================================
// Resource reads
// =============================================================================

fn read_text(dispatcher: &Dispatcher, uri: &str) -> Result<Value, ErrorKind> {
    let result = call(dispatcher, "resources/read", json!({ "uri": uri }))?;
    assert_eq!(result["contents"][0]["uri"], uri);
    assert_eq!(result["contents"][0]["mimeType"], "application/json");
    let text = result["contents"][0]["text"].as_str().unwrap();
    Ok(serde_json::from_str(text).unwrap())
}

#[test]
fn static_document_list_resolves() {
    let dispatcher = dispatcher();
    let payload = read_text(&dispatcher, "mcp://documents/list").unwrap();
    assert_eq!(payload["documents"].as_array().unwrap().len(), 5);
}

#[test]
fn document_read_by_id() {
    let dispatcher = dispatcher();
    let payload = read_text(&dispatcher, "mcp://documents/mcp_overview").unwrap();
    assert!(payload["content"].as_str().unwrap().contains("Model Context Protocol"));
}

#[test]
fn document_search_beats_generic_document_template() {
    let dispatcher = dispatcher();
    // "search/langchain" must route to the search template, not be treated
    // as a document id.
    let payload = read_text(&dispatcher, "mcp://documents/search/langchain").unwrap();
    assert_eq!(payload["query"], "langchain");
    assert!(payload.get("results").is_some());
}

#[test]
fn web_search_query_binds_remainder_verbatim() {
    let dispatcher = dispatcher();
    let payload = read_text(&dispatcher, "mcp://web-search/langchain agents/memory").unwrap();
    assert_eq!(payload["query"], "langchain agents/memory");
    assert!(!payload["results"].as_array().unwrap().is_empty());
}

#[test]
fn unknown_document_id_reports_error_in_band() {
    let dispatcher = dispatcher();
    let payload = read_text(&dispatcher, "mcp://documents/phantom").unwrap();
    assert!(payload["error"].as_str().unwrap().contains("phantom"));
}

#[test]
fn unroutable_uri_is_invalid_request() {
    let dispatcher = dispatcher();
    let err = read_text(&dispatcher, "mcp://nowhere/at/all").unwrap_err();
    assert_eq!(err, ErrorKind::InvalidRequest);

    // Bare template prefix with nothing to bind.
    let err = read_text(&dispatcher, "mcp://documents/").unwrap_err();
    assert_eq!(err, ErrorKind::InvalidRequest);
}

#[test]
fn read_resource_requires_uri_param() {
    let err = Request::from_parts("resources/read", Some(&json!({})))
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidParams);

    let err = Request::from_parts("resources/read", None).unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidParams);
}
