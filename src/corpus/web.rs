//! Canned web search results.
//!
//! A small keyword-indexed result set backing the `mcp://web-search/{query}`
//! resource template, with a generic fallback for unknown queries. No real
//! network access happens here; responses only carry a timestamp to mimic a
//! live search API.

use serde::Serialize;
use serde_json::{json, Value};

/// A single search hit.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    /// Page title.
    pub title: String,
    /// Page URL.
    pub url: String,
    /// Snippet shown with the hit.
    pub snippet: String,
}

impl SearchHit {
    fn new(title: &str, url: &str, snippet: &str) -> Self {
        Self {
            title: title.to_string(),
            url: url.to_string(),
            snippet: snippet.to_string(),
        }
    }
}

/// Keyword index of canned results.
pub struct SearchIndex {
    entries: Vec<(String, Vec<SearchHit>)>,
    fallback: Vec<SearchHit>,
    max_results: usize,
}

impl SearchIndex {
    /// Builds the demo index.
    #[must_use]
    pub fn demo() -> Self {
        let entries = vec![
            (
                "llama index".to_string(),
                vec![
                    SearchHit::new(
                        "LlamaIndex",
                        "https://www.llamaindex.ai/",
                        "LlamaIndex is a data framework for LLM applications to ingest, structure, and access private or domain-specific data.",
                    ),
                    SearchHit::new(
                        "GitHub - jerryjliu/llama_index",
                        "https://github.com/jerryjliu/llama_index",
                        "LlamaIndex (GPT Index) is a data framework for your LLM applications.",
                    ),
                    SearchHit::new(
                        "LlamaIndex Documentation",
                        "https://docs.llamaindex.ai/",
                        "LlamaIndex is a simple, flexible data framework for connecting custom data sources to large language models.",
                    ),
                ],
            ),
            (
                "langchain".to_string(),
                vec![
                    SearchHit::new(
                        "LangChain",
                        "https://www.langchain.com/",
                        "LangChain is a framework for developing applications powered by language models.",
                    ),
                    SearchHit::new(
                        "GitHub - langchain-ai/langchain",
                        "https://github.com/langchain-ai/langchain",
                        "Building applications with LLMs through composability.",
                    ),
                    SearchHit::new(
                        "LangChain Documentation",
                        "https://python.langchain.com/docs/get_started/introduction",
                        "LangChain enables applications that are context-aware and reasoning-based.",
                    ),
                ],
            ),
            (
                "smolagents".to_string(),
                vec![
                    SearchHit::new(
                        "GitHub - huggingface/smolagents",
                        "https://github.com/huggingface/smolagents",
                        "SmolaGents is a lightweight agent framework for building AI agents from Hugging Face.",
                    ),
                    SearchHit::new(
                        "Introducing SmolaGents",
                        "https://huggingface.co/blog/smolagents",
                        "SmolaGents is a lightweight agent framework that enables LLMs to use tools effectively.",
                    ),
                ],
            ),
            (
                "autogen".to_string(),
                vec![
                    SearchHit::new(
                        "GitHub - microsoft/autogen",
                        "https://github.com/microsoft/autogen",
                        "AutoGen enables the development of LLM applications using multiple conversing agents.",
                    ),
                    SearchHit::new(
                        "AutoGen Documentation",
                        "https://microsoft.github.io/autogen/",
                        "AutoGen offers conversable agents powered by LLMs, tools, human inputs, and other agents.",
                    ),
                ],
            ),
            (
                "mcp".to_string(),
                vec![
                    SearchHit::new(
                        "GitHub - model-context-protocol",
                        "https://github.com/model-context-protocol/model-context-protocol",
                        "Model Context Protocol (MCP) is a protocol for LLMs to access external tools and resources.",
                    ),
                    SearchHit::new(
                        "MCP Specification",
                        "https://model-context-protocol.github.io/model-context-protocol/",
                        "The Model Context Protocol (MCP) is a protocol for LLMs to access external tools and resources.",
                    ),
                ],
            ),
        ];

        let fallback = vec![
            SearchHit::new(
                "Model Context Protocol (MCP)",
                "https://github.com/model-context-protocol/model-context-protocol",
                "MCP is a protocol for LLMs to access external tools and resources.",
            ),
            SearchHit::new(
                "AI Framework Comparison",
                "https://example.com/ai-framework-comparison",
                "A comparison of popular AI frameworks including LlamaIndex, LangChain, SmolaGents, and AutoGen.",
            ),
        ];

        Self {
            entries,
            fallback,
            max_results: 3,
        }
    }

    /// Answers a query: the first indexed keyword contained in the query
    /// wins, otherwise the generic fallback is returned.
    #[must_use]
    pub fn search(&self, query: &str) -> Value {
        let query_lower = query.to_lowercase();

        let hits = self
            .entries
            .iter()
            .find(|(key, _)| query_lower.contains(key.as_str()))
            .map_or(&self.fallback, |(_, hits)| hits);

        let results: Vec<&SearchHit> = hits.iter().take(self.max_results).collect();

        json!({
            "query": query,
            "results": results,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })
    }
}
