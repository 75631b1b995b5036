use std::sync::Arc;

use crate::scoring::ResponseScorer;
use crate::topics::{TermDefinition, ThemeDefinition, TopicDefinition, TopicProfile};

pub(super) fn term(term: &str, patterns: &[&str]) -> TermDefinition {
    TermDefinition {
        term: term.to_string(),
        context_patterns: patterns.iter().map(|pattern| pattern.to_string()).collect(),
    }
}

pub(super) fn theme(name: &str, keywords: &[&str]) -> ThemeDefinition {
    ThemeDefinition {
        name: name.to_string(),
        keywords: keywords.iter().map(|keyword| keyword.to_string()).collect(),
    }
}

pub(super) fn security_definition() -> TopicDefinition {
    TopicDefinition {
        slug: "security".to_string(),
        title: "Security".to_string(),
        subject: "military topics".to_string(),
        required_terms: vec![
            term("Commander", &["commander.*(?:leads|directs|army)"]),
            term("Shield", &["shield.*protects"]),
            term("Enemy", &["enemy.*attack"]),
            term("Tactics", &["clever.*tactics"]),
            term("Battlefield", &["battlefield.*smoke"]),
        ],
        relevance_themes: vec![theme("conflict", &["war", "battle", "soldier"])],
    }
}

pub(super) fn security_profile() -> Arc<TopicProfile> {
    Arc::new(security_definition().compile().expect("security topic compiles"))
}

pub(super) fn scorer() -> ResponseScorer {
    ResponseScorer::new(security_profile())
}

/// 55 words in four sentences; three terms with context, two absent, every keyword present.
pub(super) const STRONG_ANSWER: &str = "The commander leads the army across the northern border during the long war. \
A strong shield protects every soldier from danger in the battle. \
The enemy planned a surprise attack before dawn, but the brave troops held their ground. \
Everyone remembered that day as a turning point for the whole young nation and its people.";

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
