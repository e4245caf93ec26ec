//! Keyword synonym table.
//!
//! Maps every spelling a page title may use (brand names, generics, common
//! misspellings) to one canonical topic. Entries keep their file order, and
//! the first synonym found in a title decides the topic.

use std::path::Path;

use regex::Regex;

use crate::error::{Error, Result};

/// One synonym with its compiled whole-word matcher.
#[derive(Debug, Clone)]
struct Entry {
    synonym: String,
    topic: String,
    matcher: Option<Regex>,
}

impl Entry {
    fn new(synonym: &str, topic: &str) -> Self {
        let pattern = format!(r"\b{}\b", regex::escape(&synonym.to_lowercase()));
        let matcher = match Regex::new(&pattern) {
            Ok(re) => Some(re),
            Err(e) => {
                log::warn!("Keyword {synonym:?} cannot be matched: {e}");
                None
            }
        };
        Self {
            synonym: synonym.to_string(),
            topic: topic.to_string(),
            matcher,
        }
    }
}

/// Ordered `synonym -> topic` table.
///
/// # Example
///
/// ```rust
/// use rs_pbnkit::KeywordMap;
///
/// let map = KeywordMap::from_json(r#"{"sildenafil": "viagra", "viagra": "viagra"}"#)?;
///
/// assert_eq!(map.topic_for_title("Generic Sildenafil 100mg"), Some("viagra"));
/// assert_eq!(map.topic_for_title("Sildenafilx"), None);
/// assert_eq!(map.synonyms_for("viagra"), vec!["sildenafil".to_string()]);
/// # Ok::<(), rs_pbnkit::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct KeywordMap {
    entries: Vec<Entry>,
}

impl KeywordMap {
    /// Empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one entry. Later entries lose to earlier ones on a title.
    pub fn insert(&mut self, synonym: &str, topic: &str) {
        self.entries.push(Entry::new(synonym, topic));
    }

    /// Parse a JSON object `{ "synonym": "topic", ... }`.
    ///
    /// Entries with non-string values are skipped with a warning.
    pub fn from_json(json: &str) -> Result<Self> {
        let object: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
        let mut map = Self::new();
        for (synonym, topic) in &object {
            match topic.as_str() {
                Some(topic) => map.insert(synonym, topic),
                None => log::warn!("Keyword {synonym:?} has a non-string topic, skipped"),
            }
        }
        Ok(map)
    }

    /// Load a JSON keyword file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_json(&json)
    }

    /// Number of synonyms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Topic of the first synonym occurring as a whole word in `title`.
    ///
    /// Matching is case-insensitive.
    #[must_use]
    pub fn topic_for_title(&self, title: &str) -> Option<&str> {
        let title = title.to_lowercase();
        self.entries
            .iter()
            .find(|entry| entry.matcher.as_ref().is_some_and(|re| re.is_match(&title)))
            .map(|entry| entry.topic.as_str())
    }

    /// Synonyms mapping to `topic`, excluding the topic spelled as itself.
    #[must_use]
    pub fn synonyms_for(&self, topic: &str) -> Vec<String> {
        self.entries
            .iter()
            .filter(|entry| entry.topic == topic && entry.synonym != topic)
            .map(|entry| entry.synonym.clone())
            .collect()
    }

    /// Distinct topics in first-seen order.
    #[must_use]
    pub fn topics(&self) -> Vec<&str> {
        let mut topics: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !topics.contains(&entry.topic.as_str()) {
                topics.push(&entry.topic);
            }
        }
        topics
    }
}

impl<S: AsRef<str>, T: AsRef<str>> FromIterator<(S, T)> for KeywordMap {
    fn from_iter<I: IntoIterator<Item = (S, T)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (synonym, topic) in iter {
            map.insert(synonym.as_ref(), topic.as_ref());
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_entry_in_file_order_wins() {
        let map = KeywordMap::from_json(r#"{"tadalafil": "cialis", "viagra": "viagra"}"#)
            .expect("valid json");

        assert_eq!(map.topic_for_title("Viagra vs Tadalafil"), Some("cialis"));
    }

    #[test]
    fn whole_word_only() {
        let map: KeywordMap = [("cialis", "cialis")].into_iter().collect();

        assert_eq!(map.topic_for_title("Buy CIALIS online"), Some("cialis"));
        assert_eq!(map.topic_for_title("cialisonline store"), None);
    }

    #[test]
    fn special_characters_are_literal() {
        let map: KeywordMap = [("k+ pills", "potassium")].into_iter().collect();

        assert_eq!(map.topic_for_title("Cheap k+ pills here"), Some("potassium"));
        assert_eq!(map.topic_for_title("Cheap kk pills here"), None);
    }

    #[test]
    fn non_string_topics_are_skipped() {
        let map = KeywordMap::from_json(r#"{"a": 1, "b": "bee"}"#).expect("valid json");
        assert_eq!(map.len(), 1);
        assert_eq!(map.topics(), vec!["bee"]);
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(matches!(KeywordMap::from_json("[1, 2]"), Err(Error::Json(_))));
    }
}
