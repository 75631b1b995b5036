//! Typed topic configuration: required terms, context patterns, and relevance
//! themes, validated once when the catalog is loaded.

mod definition;
mod profile;

pub use definition::{
    TermDefinition, ThemeDefinition, TopicConfigError, TopicDefinition, TopicFile,
};
pub use profile::{RelevanceTheme, RequiredTerm, TopicProfile, TopicSummary};

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use tracing::debug;

const BUILTIN_TOPICS: &str = include_str!("../../topics/builtin.toml");

/// Slug-indexed set of compiled topics.
#[derive(Debug, Clone)]
pub struct TopicCatalog {
    topics: BTreeMap<String, Arc<TopicProfile>>,
}

impl TopicCatalog {
    /// Topics bundled with the crate.
    pub fn builtin() -> Result<Self, TopicConfigError> {
        Self::from_toml_str(BUILTIN_TOPICS)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TopicConfigError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, TopicConfigError> {
        let file: TopicFile = toml::from_str(raw)?;
        Self::from_definitions(file.topics)
    }

    pub fn from_definitions(
        definitions: impl IntoIterator<Item = TopicDefinition>,
    ) -> Result<Self, TopicConfigError> {
        let mut topics = BTreeMap::new();
        for definition in definitions {
            let profile = definition.compile()?;
            debug!(
                topic = %profile.slug,
                terms = profile.required_terms.len(),
                themes = profile.relevance_themes.len(),
                "compiled topic"
            );
            if topics.contains_key(&profile.slug) {
                return Err(TopicConfigError::DuplicateTopic(profile.slug));
            }
            topics.insert(profile.slug.clone(), Arc::new(profile));
        }

        if topics.is_empty() {
            return Err(TopicConfigError::EmptyCatalog);
        }

        Ok(Self { topics })
    }

    pub fn get(&self, slug: &str) -> Option<Arc<TopicProfile>> {
        self.topics.get(slug.trim()).cloned()
    }

    pub fn topics(&self) -> impl Iterator<Item = &Arc<TopicProfile>> {
        self.topics.values()
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SINGLE_TOPIC: &str = r#"
[[topics]]
slug = "weather"
title = "Weather"
subject = "the weather"

[[topics.required_terms]]
term = "Rain"
context_patterns = ['rain.*(?:falls|heavy)']

[[topics.relevance_themes]]
name = "sky"
keywords = ["cloud", "sun"]
"#;

    #[test]
    fn builtin_catalog_compiles() {
        let catalog = TopicCatalog::builtin().expect("bundled topics are valid");

        assert_eq!(catalog.len(), 3);
        let heritage = catalog.get("history-and-heritage").expect("heritage topic");
        assert_eq!(heritage.required_terms.len(), 5);
        assert_eq!(heritage.relevance_themes.len(), 1);
        let security = catalog.get("security").expect("security topic");
        assert_eq!(security.relevance_themes.len(), 3);
    }

    #[test]
    fn lookup_trims_slug() {
        let catalog = TopicCatalog::from_toml_str(SINGLE_TOPIC).expect("valid");
        assert!(catalog.get(" weather ").is_some());
        assert!(catalog.get("sports").is_none());
    }

    #[test]
    fn rejects_duplicate_slugs() {
        let doubled = format!("{SINGLE_TOPIC}\n{SINGLE_TOPIC}");
        match TopicCatalog::from_toml_str(&doubled) {
            Err(TopicConfigError::DuplicateTopic(slug)) => assert_eq!(slug, "weather"),
            other => panic!("expected duplicate topic error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_empty_file() {
        assert!(matches!(
            TopicCatalog::from_toml_str(""),
            Err(TopicConfigError::EmptyCatalog)
        ));
    }

    #[test]
    fn surfaces_toml_errors() {
        assert!(matches!(
            TopicCatalog::from_toml_str("[[topics]]\nslug = 3"),
            Err(TopicConfigError::Parse(_))
        ));
    }

    #[test]
    fn loads_catalog_from_disk() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(SINGLE_TOPIC.as_bytes()).expect("write topics");

        let catalog = TopicCatalog::from_path(file.path()).expect("catalog loads");

        let summary = catalog.get("weather").expect("weather topic").summary();
        assert_eq!(summary.required_terms, vec!["Rain"]);
        assert_eq!(summary.themes, vec!["sky"]);
    }
}
