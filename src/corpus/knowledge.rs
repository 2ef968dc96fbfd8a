//! The demonstration knowledge base.
//!
//! A small, fixed tree of topics about AI agent frameworks and the MCP
//! protocol itself. Built once at startup and read-only thereafter.

use indexmap::IndexMap;
use serde_json::{json, Map, Value};

/// Read-only topic tree backing the `knowledge_base_*` tools.
pub struct KnowledgeBase {
    topics: IndexMap<String, Value>,
}

impl KnowledgeBase {
    /// Builds the demo knowledge base.
    #[must_use]
    pub fn demo() -> Self {
        let mut topics = IndexMap::new();

        topics.insert(
            "ai_frameworks".to_string(),
            json!({
                "llama_index": {
                    "description": "A data framework for LLM applications to ingest, structure, and access private or domain-specific data",
                    "github": "https://github.com/jerryjliu/llama_index",
                    "key_features": ["Data connectors", "Data indexing", "Query engine", "Vector stores"],
                    "use_cases": ["RAG applications", "Knowledge bases", "Chatbots", "Document Q&A"]
                },
                "langchain": {
                    "description": "A framework for developing applications powered by language models",
                    "github": "https://github.com/langchain-ai/langchain",
                    "key_features": ["Chains", "Agents", "Memory", "Callbacks"],
                    "use_cases": ["Document analysis", "Chatbots", "Data extraction", "Code generation"]
                },
                "smolagents": {
                    "description": "A lightweight agent framework for building AI agents from Hugging Face",
                    "github": "https://github.com/huggingface/smolagents",
                    "key_features": ["Lightweight design", "Tool use", "Planning", "HF integration"],
                    "use_cases": ["Simple agents", "Tool orchestration", "Task automation"]
                },
                "autogen": {
                    "description": "A framework for building LLM applications with multiple agents from Microsoft",
                    "github": "https://github.com/microsoft/autogen",
                    "key_features": ["Multi-agent conversations", "Customisable agents", "Code execution", "Human feedback"],
                    "use_cases": ["Complex workflows", "Multi-agent systems", "Code generation", "Research"]
                }
            }),
        );

        topics.insert(
            "mcp".to_string(),
            json!({
                "description": "Model Context Protocol - a protocol for LLMs to access external tools and resources",
                "components": ["Server", "Client", "Transport", "Tools", "Resources"],
                "benefits": ["Standardized interface", "Tool access", "Resource access", "Extensibility"]
            }),
        );

        Self { topics }
    }

    /// Retrieves a topic, optionally narrowed to a subtopic.
    ///
    /// Returns `None` if the topic does not exist. An unknown subtopic falls
    /// back to the full topic.
    #[must_use]
    pub fn get_info(&self, topic: &str, subtopic: Option<&str>) -> Option<Value> {
        let data = self.topics.get(topic)?;

        if let Some(sub) = subtopic {
            if let Some(entry) = data.get(sub) {
                let mut narrowed = Map::new();
                narrowed.insert(sub.to_string(), entry.clone());
                return Some(Value::Object(narrowed));
            }
        }

        Some(data.clone())
    }

    /// Lists all topic names, in catalogue order.
    #[must_use]
    pub fn list_topics(&self) -> Vec<String> {
        self.topics.keys().cloned().collect()
    }

    /// Searches every topic for a case-insensitive substring match.
    ///
    /// For the `ai_frameworks` topic the match is per framework, so a query
    /// like "langchain" returns only the matching frameworks rather than the
    /// whole tree.
    #[must_use]
    pub fn search(&self, query: &str) -> Value {
        let query = query.to_lowercase();
        let mut results = Map::new();

        for (topic, data) in &self.topics {
            if topic == "ai_frameworks" {
                let Some(frameworks) = data.as_object() else {
                    continue;
                };
                let mut matching = Map::new();
                for (framework, framework_data) in frameworks {
                    if framework.to_lowercase().contains(&query)
                        || value_contains(framework_data, &query)
                    {
                        matching.insert(framework.clone(), framework_data.clone());
                    }
                }
                if !matching.is_empty() {
                    results.insert(topic.clone(), Value::Object(matching));
                }
            } else if value_contains(data, &query) {
                results.insert(topic.clone(), data.clone());
            }
        }

        Value::Object(results)
    }
}

/// Recursively checks whether any string inside `value` contains `query`
/// (which must already be lowercased).
fn value_contains(value: &Value, query: &str) -> bool {
    match value {
        Value::String(s) => s.to_lowercase().contains(query),
        Value::Array(items) => items.iter().any(|item| value_contains(item, query)),
        Value::Object(map) => map.values().any(|v| value_contains(v, query)),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_topics_in_order() {
        let kb = KnowledgeBase::demo();
        assert_eq!(kb.list_topics(), ["ai_frameworks", "mcp"]);
    }

    #[test]
    fn get_info_returns_topic() {
        let kb = KnowledgeBase::demo();
        let info = kb.get_info("mcp", None).unwrap();
        assert!(info["description"].as_str().unwrap().contains("protocol"));
    }

    #[test]
    fn get_info_narrows_to_subtopic() {
        let kb = KnowledgeBase::demo();
        let info = kb.get_info("ai_frameworks", Some("langchain")).unwrap();
        assert!(info.get("langchain").is_some());
        assert!(info.get("autogen").is_none());
    }

    #[test]
    fn get_info_unknown_subtopic_falls_back_to_topic() {
        let kb = KnowledgeBase::demo();
        let info = kb.get_info("ai_frameworks", Some("nonexistent")).unwrap();
        assert!(info.get("langchain").is_some());
    }

    #[test]
    fn get_info_unknown_topic_is_none() {
        let kb = KnowledgeBase::demo();
        assert!(kb.get_info("astrology", None).is_none());
    }

    #[test]
    fn search_matches_framework_by_name() {
        let kb = KnowledgeBase::demo();
        let results = kb.search("LangChain");

        let frameworks = results["ai_frameworks"].as_object().unwrap();
        assert!(frameworks.contains_key("langchain"));
        assert!(!frameworks.contains_key("smolagents"));
    }

    #[test]
    fn search_matches_nested_values() {
        let kb = KnowledgeBase::demo();
        let results = kb.search("Hugging Face");
        assert!(results["ai_frameworks"]
            .as_object()
            .unwrap()
            .contains_key("smolagents"));
    }

    #[test]
    fn search_without_match_is_empty() {
        let kb = KnowledgeBase::demo();
        let results = kb.search("quantum chromodynamics");
        assert!(results.as_object().unwrap().is_empty());
    }
}
