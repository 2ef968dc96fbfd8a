//! The demonstration document corpus.
//!
//! Five fixed documents addressed by ID, backing the `mcp://documents/*`
//! resources. Built once at startup and read-only thereafter.

use indexmap::IndexMap;
use serde_json::{json, Value};

/// One document: title, markdown content, and descriptive metadata.
#[derive(Debug, Clone)]
pub struct Document {
    /// Display title.
    pub title: String,
    /// Markdown body.
    pub content: String,
    /// Author, date, and tags.
    pub metadata: Value,
}

impl Document {
    fn new(title: &str, content: &str, author: &str, date: &str, tags: &[&str]) -> Self {
        Self {
            title: title.to_string(),
            content: content.to_string(),
            metadata: json!({
                "author": author,
                "date": date,
                "tags": tags,
            }),
        }
    }

    fn to_value(&self) -> Value {
        json!({
            "title": self.title,
            "content": self.content,
            "metadata": self.metadata,
        })
    }
}

/// Read-only document collection.
pub struct DocumentStore {
    documents: IndexMap<String, Document>,
}

impl DocumentStore {
    /// Builds the demo corpus: an MCP overview plus one integration guide per
    /// supported agent framework.
    #[must_use]
    pub fn demo() -> Self {
        let mut documents = IndexMap::new();

        documents.insert(
            "mcp_overview".to_string(),
            Document::new(
                "Model Context Protocol Overview",
                "# Model Context Protocol (MCP)\n\n\
                 The Model Context Protocol (MCP) is a protocol for LLMs to access external \
                 tools and resources.\n\n\
                 ## Key Components\n\n\
                 1. **Server**: Implements the protocol and provides tools and resources\n\
                 2. **Client**: Connects to the server and uses the tools and resources\n\
                 3. **Transport**: Handles communication between the client and server\n\
                 4. **Tools**: Executable functions that can be invoked by clients\n\
                 5. **Resources**: Data sources that can be accessed by clients\n\n\
                 ## Benefits\n\n\
                 - Standardized interface for LLMs to access external capabilities\n\
                 - Extensible architecture for adding new tools and resources\n\
                 - Language-agnostic protocol that can be implemented in any language\n\
                 - Secure access to external systems through controlled interfaces\n",
                "MCP Team",
                "2023-01-15",
                &["mcp", "protocol", "llm", "tools", "resources"],
            ),
        );

        documents.insert(
            "llama_index_guide".to_string(),
            Document::new(
                "LlamaIndex Integration Guide",
                "# LlamaIndex Integration Guide\n\n\
                 This guide explains how to integrate LlamaIndex with the Model Context \
                 Protocol (MCP).\n\n\
                 Create a custom retriever that forwards queries to an MCP tool, convert \
                 the results into LlamaIndex nodes, and plug the retriever into a \
                 RetrieverQueryEngine. The MCP server remains the single source of truth \
                 for the underlying knowledge base.\n",
                "LlamaIndex Team",
                "2023-03-20",
                &["llama_index", "integration", "mcp", "retriever"],
            ),
        );

        documents.insert(
            "langchain_guide".to_string(),
            Document::new(
                "LangChain Integration Guide",
                "# LangChain Integration Guide\n\n\
                 This guide explains how to integrate LangChain with the Model Context \
                 Protocol (MCP).\n\n\
                 Wrap each MCP tool in a LangChain BaseTool whose `_run` forwards the \
                 query to `call_tool`, then hand the tools to an agent initialised with \
                 AgentType.ZERO_SHOT_REACT_DESCRIPTION. The agent plans; the MCP server \
                 executes.\n",
                "LangChain Team",
                "2023-04-10",
                &["langchain", "integration", "mcp", "tool"],
            ),
        );

        documents.insert(
            "smolagents_guide".to_string(),
            Document::new(
                "SmolaGents Integration Guide",
                "# SmolaGents Integration Guide\n\n\
                 This guide explains how to integrate SmolaGents with the Model Context \
                 Protocol (MCP).\n\n\
                 Declare a SmolaGents Tool whose function forwards the query to \
                 `call_tool` on the MCP client, then pass it to the agent alongside the \
                 model. SmolaGents handles planning and tool selection.\n",
                "Hugging Face Team",
                "2023-05-15",
                &["smolagents", "integration", "mcp", "tool"],
            ),
        );

        documents.insert(
            "autogen_guide".to_string(),
            Document::new(
                "AutoGen Integration Guide",
                "# AutoGen Integration Guide\n\n\
                 This guide explains how to integrate AutoGen with the Model Context \
                 Protocol (MCP).\n\n\
                 Register a plain function that forwards queries to `call_tool`, add it \
                 to the UserProxyAgent's function map, and let the AssistantAgent invoke \
                 it during the conversation. AutoGen's multi-agent loop drives the MCP \
                 calls.\n",
                "Microsoft Research",
                "2023-06-20",
                &["autogen", "integration", "mcp", "function"],
            ),
        );

        Self { documents }
    }

    /// Fetches a document by ID.
    #[must_use]
    pub fn get_document(&self, document_id: &str) -> Option<Value> {
        self.documents.get(document_id).map(Document::to_value)
    }

    /// Lists every document with its metadata.
    #[must_use]
    pub fn list_documents(&self) -> Value {
        let documents: Vec<Value> = self
            .documents
            .iter()
            .map(|(id, doc)| {
                json!({
                    "id": id,
                    "title": doc.title,
                    "content": doc.content,
                    "metadata": doc.metadata,
                })
            })
            .collect();

        json!({ "documents": documents })
    }

    /// Searches titles, content, and metadata for a case-insensitive
    /// substring, reporting which part matched.
    #[must_use]
    pub fn search_documents(&self, query: &str) -> Value {
        let query = query.to_lowercase();
        let mut results = Vec::new();

        for (id, doc) in &self.documents {
            let matched = if doc.title.to_lowercase().contains(&query) {
                Some("title")
            } else if doc.content.to_lowercase().contains(&query) {
                Some("content")
            } else if metadata_contains(&doc.metadata, &query) {
                Some("metadata")
            } else {
                None
            };

            if let Some(field) = matched {
                results.push(json!({
                    "id": id,
                    "title": doc.title,
                    "metadata": doc.metadata,
                    "match": field,
                }));
            }
        }

        json!({ "query": query, "results": results })
    }
}

fn metadata_contains(metadata: &Value, query: &str) -> bool {
    match metadata {
        Value::String(s) => s.to_lowercase().contains(query),
        Value::Array(items) => items.iter().any(|v| metadata_contains(v, query)),
        Value::Object(map) => map.values().any(|v| metadata_contains(v, query)),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_known_document() {
        let store = DocumentStore::demo();
        let doc = store.get_document("mcp_overview").unwrap();
        assert_eq!(doc["title"], "Model Context Protocol Overview");
        assert!(doc["content"].as_str().unwrap().contains("Transport"));
    }

    #[test]
    fn get_unknown_document_is_none() {
        let store = DocumentStore::demo();
        assert!(store.get_document("nonexistent").is_none());
    }

    #[test]
    fn list_contains_all_documents() {
        let store = DocumentStore::demo();
        let listing = store.list_documents();
        let documents = listing["documents"].as_array().unwrap();

        assert_eq!(documents.len(), 5);
        assert_eq!(documents[0]["id"], "mcp_overview");
    }

    #[test]
    fn search_matches_title() {
        let store = DocumentStore::demo();
        let results = store.search_documents("langchain");
        let hits = results["results"].as_array().unwrap();

        assert!(hits.iter().any(|h| h["id"] == "langchain_guide"));
    }

    #[test]
    fn search_reports_metadata_match() {
        let store = DocumentStore::demo();
        let results = store.search_documents("2023-03-20");
        let hits = results["results"].as_array().unwrap();

        let hit = hits.iter().find(|h| h["id"] == "llama_index_guide").unwrap();
        assert_eq!(hit["match"], "metadata");
    }

    #[test]
    fn search_without_match_is_empty() {
        let store = DocumentStore::demo();
        let results = store.search_documents("zzzz");
        assert!(results["results"].as_array().unwrap().is_empty());
    }
}
