use regex::Regex;
use serde::Serialize;

/// Compiled, validated topic ready for scoring.
#[derive(Debug, Clone)]
pub struct TopicProfile {
    pub slug: String,
    pub title: String,
    pub subject: String,
    pub required_terms: Vec<RequiredTerm>,
    pub relevance_themes: Vec<RelevanceTheme>,
}

/// Vocabulary word the learner is expected to use, with the patterns that
/// recognise a topically appropriate phrase around it.
#[derive(Debug, Clone)]
pub struct RequiredTerm {
    pub term: String,
    pub(crate) presence: Regex,
    pub(crate) context_patterns: Vec<Regex>,
}

impl RequiredTerm {
    pub fn appears_in(&self, text: &str) -> bool {
        self.presence.is_match(text)
    }

    pub fn has_context_in(&self, text: &str) -> bool {
        self.context_patterns
            .iter()
            .any(|pattern| pattern.is_match(text))
    }
}

/// Named keyword cluster contributing an equal share of the relevance score.
/// Keywords are stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelevanceTheme {
    pub name: String,
    pub keywords: Vec<String>,
}

/// Public listing of a topic for API consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicSummary {
    pub slug: String,
    pub title: String,
    pub required_terms: Vec<String>,
    pub themes: Vec<String>,
}

impl TopicProfile {
    pub fn summary(&self) -> TopicSummary {
        TopicSummary {
            slug: self.slug.clone(),
            title: self.title.clone(),
            required_terms: self
                .required_terms
                .iter()
                .map(|term| term.term.clone())
                .collect(),
            themes: self
                .relevance_themes
                .iter()
                .map(|theme| theme.name.clone())
                .collect(),
        }
    }
}
