use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use super::profile::{RelevanceTheme, RequiredTerm, TopicProfile};

/// File layout accepted by [`super::TopicCatalog::from_toml_str`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicFile {
    #[serde(default)]
    pub topics: Vec<TopicDefinition>,
}

/// Uncompiled topic as written by content authors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicDefinition {
    pub slug: String,
    pub title: String,
    /// Phrase substituted into encouragement messages, e.g. "Jewish history and heritage".
    pub subject: String,
    #[serde(default)]
    pub required_terms: Vec<TermDefinition>,
    #[serde(default)]
    pub relevance_themes: Vec<ThemeDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermDefinition {
    pub term: String,
    #[serde(default)]
    pub context_patterns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeDefinition {
    pub name: String,
    pub keywords: Vec<String>,
}

/// Problems detected while validating topic definitions.
#[derive(Debug, thiserror::Error)]
pub enum TopicConfigError {
    #[error("topic slug must not be blank")]
    BlankSlug,
    #[error("topic '{topic}' declares a blank required term")]
    BlankTerm { topic: String },
    #[error("topic '{topic}' term '{term}' has invalid context pattern '{pattern}': {source}")]
    InvalidPattern {
        topic: String,
        term: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("topic '{topic}' must declare at least one relevance theme")]
    NoThemes { topic: String },
    #[error("topic '{topic}' theme '{theme}' has no keywords")]
    EmptyTheme { topic: String, theme: String },
    #[error("topic '{0}' is defined more than once")]
    DuplicateTopic(String),
    #[error("topic file declares no topics")]
    EmptyCatalog,
    #[error("failed to read topic file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid topic file: {0}")]
    Parse(#[from] toml::de::Error),
}

impl TopicDefinition {
    /// Validate the definition and compile its patterns into a [`TopicProfile`].
    pub fn compile(&self) -> Result<TopicProfile, TopicConfigError> {
        let slug = self.slug.trim();
        if slug.is_empty() {
            return Err(TopicConfigError::BlankSlug);
        }

        let required_terms = self
            .required_terms
            .iter()
            .map(|definition| compile_term(slug, definition))
            .collect::<Result<Vec<_>, _>>()?;

        if self.relevance_themes.is_empty() {
            return Err(TopicConfigError::NoThemes {
                topic: slug.to_string(),
            });
        }

        let mut relevance_themes = Vec::with_capacity(self.relevance_themes.len());
        for theme in &self.relevance_themes {
            let keywords: Vec<String> = theme
                .keywords
                .iter()
                .map(|keyword| keyword.trim().to_lowercase())
                .filter(|keyword| !keyword.is_empty())
                .collect();
            if keywords.is_empty() {
                return Err(TopicConfigError::EmptyTheme {
                    topic: slug.to_string(),
                    theme: theme.name.clone(),
                });
            }
            relevance_themes.push(RelevanceTheme {
                name: theme.name.clone(),
                keywords,
            });
        }

        Ok(TopicProfile {
            slug: slug.to_string(),
            title: self.title.clone(),
            subject: self.subject.clone(),
            required_terms,
            relevance_themes,
        })
    }
}

fn compile_term(topic: &str, definition: &TermDefinition) -> Result<RequiredTerm, TopicConfigError> {
    let term = definition.term.trim();
    if term.is_empty() {
        return Err(TopicConfigError::BlankTerm {
            topic: topic.to_string(),
        });
    }

    let presence = case_insensitive(&regex::escape(term)).map_err(|source| {
        TopicConfigError::InvalidPattern {
            topic: topic.to_string(),
            term: term.to_string(),
            pattern: term.to_string(),
            source,
        }
    })?;

    let context_patterns = definition
        .context_patterns
        .iter()
        .map(|pattern| {
            case_insensitive(pattern).map_err(|source| TopicConfigError::InvalidPattern {
                topic: topic.to_string(),
                term: term.to_string(),
                pattern: pattern.clone(),
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RequiredTerm {
        term: term.to_string(),
        presence,
        context_patterns,
    })
}

fn case_insensitive(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition() -> TopicDefinition {
        TopicDefinition {
            slug: "security".to_string(),
            title: "Security".to_string(),
            subject: "military topics".to_string(),
            required_terms: vec![TermDefinition {
                term: "Commander".to_string(),
                context_patterns: vec!["commander.*(?:leads|army)".to_string()],
            }],
            relevance_themes: vec![ThemeDefinition {
                name: "conflict".to_string(),
                keywords: vec!["War".to_string(), " battle ".to_string()],
            }],
        }
    }

    #[test]
    fn compiles_patterns_case_insensitively() {
        let profile = definition().compile().expect("valid definition");

        let term = &profile.required_terms[0];
        assert!(term.presence.is_match("the COMMANDER spoke"));
        assert!(term.context_patterns[0].is_match("The Commander LEADS the unit"));
        assert_eq!(profile.relevance_themes[0].keywords, vec!["war", "battle"]);
    }

    #[test]
    fn escapes_term_metacharacters() {
        let mut definition = definition();
        definition.required_terms[0].term = "C++".to_string();

        let profile = definition.compile().expect("escaped term compiles");

        assert!(profile.required_terms[0].presence.is_match("I write c++ daily"));
        assert!(!profile.required_terms[0].presence.is_match("I write c daily"));
    }

    #[test]
    fn rejects_malformed_context_pattern() {
        let mut definition = definition();
        definition.required_terms[0].context_patterns = vec!["commander.*(leads".to_string()];

        match definition.compile() {
            Err(TopicConfigError::InvalidPattern { term, pattern, .. }) => {
                assert_eq!(term, "Commander");
                assert_eq!(pattern, "commander.*(leads");
            }
            other => panic!("expected invalid pattern, got {other:?}"),
        }
    }

    #[test]
    fn rejects_missing_themes() {
        let mut definition = definition();
        definition.relevance_themes.clear();

        assert!(matches!(
            definition.compile(),
            Err(TopicConfigError::NoThemes { .. })
        ));
    }

    #[test]
    fn rejects_theme_with_only_blank_keywords() {
        let mut definition = definition();
        definition.relevance_themes[0].keywords = vec!["  ".to_string()];

        assert!(matches!(
            definition.compile(),
            Err(TopicConfigError::EmptyTheme { .. })
        ));
    }

    #[test]
    fn allows_topics_without_required_terms() {
        let mut definition = definition();
        definition.required_terms.clear();

        let profile = definition.compile().expect("terms are optional");
        assert!(profile.required_terms.is_empty());
    }
}
