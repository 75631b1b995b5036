use crate::topics::{RelevanceTheme, RequiredTerm};

use super::{SubScore, SubScoreCategory, TermUsage};

pub const SCALE_MAX: f64 = 100.0;
pub const LENGTH_WEIGHT: f64 = 20.0;
pub const STRUCTURE_WEIGHT: f64 = 20.0;
pub const TERMINOLOGY_WEIGHT: f64 = 30.0;
pub const RELEVANCE_WEIGHT: f64 = 30.0;

const SENTENCE_TERMINATORS: [char; 3] = ['.', '!', '?'];

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Step function over the word count; boundaries belong to the higher tier.
pub fn length_tier(word_count: usize) -> f64 {
    match word_count {
        50.. => 1.0,
        30.. => 0.8,
        20.. => 0.6,
        10.. => 0.4,
        _ => 0.2,
    }
}

/// Mean words per sentence, or `None` when no non-empty sentence remains.
pub fn average_sentence_length(text: &str) -> Option<f64> {
    let lengths: Vec<usize> = text
        .split(SENTENCE_TERMINATORS)
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty())
        .map(word_count)
        .collect();

    if lengths.is_empty() {
        return None;
    }

    let total: usize = lengths.iter().sum();
    Some(total as f64 / lengths.len() as f64)
}

pub fn structure_tier(average: Option<f64>) -> f64 {
    match average {
        Some(avg) if avg >= 8.0 => 1.0,
        Some(avg) if avg >= 6.0 => 0.8,
        Some(avg) if avg >= 4.0 => 0.6,
        _ => 0.4,
    }
}

pub fn length_score(text: &str) -> SubScore {
    let words = word_count(text);
    let raw = length_tier(words);
    let advice = if words < 20 {
        "Consider writing a bit more to express your thoughts fully."
    } else if words >= 50 {
        "Excellent length! Your response is well-developed."
    } else {
        "Good length. You're expressing your thoughts clearly."
    };

    SubScore::weighted(
        SubScoreCategory::Length,
        raw,
        LENGTH_WEIGHT,
        |points| format!("Length: {words} words ({points:.1}/20). {advice}"),
        Vec::new(),
    )
}

pub fn structure_score(text: &str) -> SubScore {
    let average = average_sentence_length(text);
    let raw = structure_tier(average);
    let advice = match average {
        Some(avg) if avg >= 8.0 => "Excellent sentence structure with complex thoughts!",
        Some(avg) if avg >= 6.0 => "Good sentence structure. You're expressing ideas clearly.",
        Some(_) => "Try building slightly longer sentences to develop your ideas more fully.",
        None => "No complete sentences detected. Try writing full sentences.",
    };

    SubScore::weighted(
        SubScoreCategory::Structure,
        raw,
        STRUCTURE_WEIGHT,
        |points| format!("Sentence structure ({points:.1}/20). {advice}"),
        Vec::new(),
    )
}

/// Outcome for a single required term.
#[derive(Debug, Clone, PartialEq)]
pub struct TermAssessment {
    pub term: String,
    pub usage: TermUsage,
    pub points: f64,
}

pub fn assess_terms(text: &str, terms: &[RequiredTerm]) -> Vec<TermAssessment> {
    if terms.is_empty() {
        return Vec::new();
    }

    let per_term = TERMINOLOGY_WEIGHT / terms.len() as f64;
    terms
        .iter()
        .map(|term| {
            let usage = if !term.appears_in(text) {
                TermUsage::NotUsed
            } else if term.has_context_in(text) {
                TermUsage::InContext
            } else {
                TermUsage::Generic
            };
            TermAssessment {
                term: term.term.clone(),
                usage,
                points: usage.points(per_term),
            }
        })
        .collect()
}

pub fn terminology_score(text: &str, terms: &[RequiredTerm]) -> SubScore {
    let assessments = assess_terms(text, terms);
    let earned: f64 = assessments.iter().map(|assessment| assessment.points).sum();
    let details: Vec<String> = assessments
        .iter()
        .map(|assessment| format!("\"{}\": {}", assessment.term, assessment.usage.label()))
        .collect();

    let in_context = assessments
        .iter()
        .filter(|assessment| assessment.usage == TermUsage::InContext)
        .count();
    let total_terms = assessments.len();

    SubScore::weighted(
        SubScoreCategory::Terminology,
        earned / TERMINOLOGY_WEIGHT,
        TERMINOLOGY_WEIGHT,
        |points| {
            if total_terms == 0 {
                format!("Required terms ({points:.1}/30). This topic has no required terms.")
            } else {
                format!(
                    "Required terms ({points:.1}/30). {in_context} of {total_terms} used with context."
                )
            }
        },
        details,
    )
}

/// Keyword hits for one relevance theme.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeCoverage {
    pub theme: String,
    pub found: Vec<String>,
    pub keyword_count: usize,
    pub points: f64,
}

pub fn theme_coverage(text: &str, themes: &[RelevanceTheme]) -> Vec<ThemeCoverage> {
    if themes.is_empty() {
        return Vec::new();
    }

    let lowered = text.to_lowercase();
    let share = RELEVANCE_WEIGHT / themes.len() as f64;
    themes
        .iter()
        .map(|theme| {
            let found: Vec<String> = theme
                .keywords
                .iter()
                .filter(|keyword| lowered.contains(keyword.as_str()))
                .cloned()
                .collect();
            let fraction = if theme.keywords.is_empty() {
                0.0
            } else {
                found.len() as f64 / theme.keywords.len() as f64
            };
            ThemeCoverage {
                theme: theme.name.clone(),
                keyword_count: theme.keywords.len(),
                points: share * fraction,
                found,
            }
        })
        .collect()
}

pub fn relevance_score(text: &str, themes: &[RelevanceTheme]) -> SubScore {
    let coverage = theme_coverage(text, themes);
    let earned: f64 = coverage.iter().map(|theme| theme.points).sum();
    let any_found = coverage.iter().any(|theme| !theme.found.is_empty());
    let details = coverage
        .iter()
        .map(|theme| {
            if theme.found.is_empty() {
                format!("{}: 0/{} keywords", theme.theme, theme.keyword_count)
            } else {
                format!(
                    "{}: {}/{} keywords ({})",
                    theme.theme,
                    theme.found.len(),
                    theme.keyword_count,
                    theme.found.join(", ")
                )
            }
        })
        .collect();

    SubScore::weighted(
        SubScoreCategory::Relevance,
        earned / RELEVANCE_WEIGHT,
        RELEVANCE_WEIGHT,
        |points| {
            if any_found {
                format!("Content relevance ({points:.1}/30).")
            } else {
                format!("Content relevance ({points:.1}/30). Try incorporating more topic-related terms.")
            }
        },
        details,
    )
}
