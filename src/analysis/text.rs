//! Lightweight text analysis: entity extraction, summarisation, keywords.

use std::collections::BTreeSet;

use regex::Regex;
use serde_json::{json, Value};

const MONTHS: &[&str] = &[
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const ORGANISATIONS: &[&str] = &[
    "Microsoft",
    "Google",
    "Apple",
    "Amazon",
    "Facebook",
    "OpenAI",
    "Anthropic",
];

const LOCATIONS: &[&str] = &["USA", "UK", "China", "India", "Russia", "Germany", "France", "Japan"];

const STOPWORDS: &[&str] = &[
    "the", "and", "is", "in", "it", "to", "of", "for", "with", "on", "at", "from", "by", "about",
    "as", "into", "like", "through", "after", "over", "between", "out", "this", "that", "these",
    "those", "are", "was", "were", "been", "being", "have", "has", "had", "does", "did", "will",
    "would", "should", "could", "can", "may", "might", "must", "shall",
];

/// Rule-based text analysis with pre-compiled patterns.
pub struct TextAnalyzer {
    capitalised: Regex,
    word: Regex,
}

impl Default for TextAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextAnalyzer {
    /// Compiles the analysis patterns.
    ///
    /// # Panics
    ///
    /// Never panics in practice: both patterns are fixed literals validated
    /// by the unit tests.
    #[must_use]
    pub fn new() -> Self {
        Self {
            capitalised: Regex::new(r"\b[A-Z][a-zA-Z]+\b").unwrap(),
            word: Regex::new(r"[a-zA-Z]+").unwrap(),
        }
    }

    /// Extracts named entities, grouped into dates, organisations, locations,
    /// people, and miscellaneous.
    #[must_use]
    pub fn extract_entities(&self, text: &str) -> Value {
        let mut dates = BTreeSet::new();
        let mut organisations = BTreeSet::new();
        let mut locations = BTreeSet::new();
        let mut people = BTreeSet::new();
        let mut misc = BTreeSet::new();

        for m in self.capitalised.find_iter(text) {
            let word = m.as_str();
            if MONTHS.contains(&word) {
                dates.insert(word);
            } else if ORGANISATIONS.contains(&word) {
                organisations.insert(word);
            } else if LOCATIONS.contains(&word) {
                locations.insert(word);
            } else if ["son", "man", "berg", "ton"].iter().any(|s| word.ends_with(s)) {
                people.insert(word);
            } else {
                misc.insert(word);
            }
        }

        json!({
            "dates": dates.into_iter().collect::<Vec<_>>(),
            "organizations": organisations.into_iter().collect::<Vec<_>>(),
            "locations": locations.into_iter().collect::<Vec<_>>(),
            "people": people.into_iter().collect::<Vec<_>>(),
            "misc": misc.into_iter().collect::<Vec<_>>(),
        })
    }

    /// Truncates the text to roughly `max_length` characters at a word
    /// boundary, appending an ellipsis when content is cut.
    #[must_use]
    pub fn summarize(text: &str, max_length: usize) -> String {
        let trimmed = text.trim();
        if trimmed.chars().count() <= max_length {
            return trimmed.to_string();
        }

        let mut summary = String::new();
        for word in trimmed.split_whitespace() {
            if !summary.is_empty() && summary.chars().count() + word.chars().count() + 1 > max_length
            {
                break;
            }
            if !summary.is_empty() {
                summary.push(' ');
            }
            summary.push_str(word);
        }
        summary.push_str("...");
        summary
    }

    /// Picks the most frequent non-stopword terms longer than three letters.
    ///
    /// Ties break alphabetically so the output is deterministic.
    #[must_use]
    pub fn extract_keywords(&self, text: &str, max_keywords: usize) -> Vec<(String, usize)> {
        let mut counts: indexmap::IndexMap<String, usize> = indexmap::IndexMap::new();
        for m in self.word.find_iter(text) {
            let word = m.as_str().to_lowercase();
            if word.len() > 3 && !STOPWORDS.contains(&word.as_str()) {
                *counts.entry(word).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(max_keywords);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entities_are_categorised() {
        let analyzer = TextAnalyzer::new();
        let entities = analyzer.extract_entities(
            "In January, Anthropic and Google opened offices in Germany. Anderson approved.",
        );

        assert_eq!(entities["dates"], json!(["January"]));
        assert_eq!(entities["organizations"], json!(["Anthropic", "Google"]));
        assert_eq!(entities["locations"], json!(["Germany"]));
        assert_eq!(entities["people"], json!(["Anderson"]));
    }

    #[test]
    fn entities_deduplicate() {
        let analyzer = TextAnalyzer::new();
        let entities = analyzer.extract_entities("Google met Google and Google");
        assert_eq!(entities["organizations"], json!(["Google"]));
    }

    #[test]
    fn unmatched_capitalised_words_land_in_misc() {
        let analyzer = TextAnalyzer::new();
        let entities = analyzer.extract_entities("The Protocol uses Dispatch");
        assert_eq!(entities["misc"], json!(["Dispatch", "Protocol", "The"]));
    }

    #[test]
    fn short_text_is_returned_whole() {
        assert_eq!(TextAnalyzer::summarize("A short note.", 100), "A short note.");
    }

    #[test]
    fn long_text_is_truncated_at_word_boundary() {
        let text = "word ".repeat(50);
        let summary = TextAnalyzer::summarize(&text, 20);
        assert!(summary.ends_with("..."));
        assert!(summary.chars().count() <= 23);
        assert!(!summary.contains("wor "));
    }

    #[test]
    fn keywords_rank_by_frequency_then_alphabet() {
        let analyzer = TextAnalyzer::new();
        let keywords = analyzer
            .extract_keywords("protocol protocol dispatch registry registry dispatch alpha", 3);

        assert_eq!(keywords.len(), 3);
        // dispatch/protocol/registry all appear twice; alphabetical order wins.
        assert_eq!(keywords[0].0, "dispatch");
        assert_eq!(keywords[1].0, "protocol");
        assert_eq!(keywords[2].0, "registry");
    }

    #[test]
    fn keywords_skip_stopwords_and_short_words() {
        let analyzer = TextAnalyzer::new();
        let keywords = analyzer.extract_keywords("the cat is in the catalogue with the cat", 5);
        assert_eq!(keywords, vec![("catalogue".to_string(), 1)]);
    }
}
