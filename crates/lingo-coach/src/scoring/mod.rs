//! Heuristic scorer for free-text answers.
//!
//! A response earns up to 100 points from four independent sub-scores:
//! length (20), sentence structure (20), required-term usage (30), and topical
//! relevance (30). All matching is case-insensitive. The scorer holds no state
//! between calls, so one instance can be shared across requests.

mod rating;
pub mod rules;

#[cfg(test)]
mod tests;

pub use rating::{RatingTier, StarRating};
pub use rules::{TermAssessment, ThemeCoverage, SCALE_MAX};

use std::fmt::Write as _;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::topics::TopicProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubScoreCategory {
    Length,
    Structure,
    Terminology,
    Relevance,
}

impl SubScoreCategory {
    pub fn label(&self) -> &'static str {
        match self {
            SubScoreCategory::Length => "Length",
            SubScoreCategory::Structure => "Sentence structure",
            SubScoreCategory::Terminology => "Required terms",
            SubScoreCategory::Relevance => "Content relevance",
        }
    }
}

/// How a required term showed up in the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermUsage {
    NotUsed,
    Generic,
    InContext,
}

impl TermUsage {
    pub fn label(&self) -> &'static str {
        match self {
            TermUsage::NotUsed => "not used",
            TermUsage::Generic => "used generically",
            TermUsage::InContext => "used with context",
        }
    }

    /// Generic use earns two thirds of the term's share.
    pub fn points(&self, per_term: f64) -> f64 {
        match self {
            TermUsage::NotUsed => 0.0,
            TermUsage::Generic => per_term * 2.0 / 3.0,
            TermUsage::InContext => per_term,
        }
    }
}

/// One weighted component of the composite score.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubScore {
    pub category: SubScoreCategory,
    pub raw_value: f64,
    pub weighted_points: f64,
    pub max_points: f64,
    pub feedback: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

impl SubScore {
    pub(crate) fn weighted(
        category: SubScoreCategory,
        raw_value: f64,
        max_points: f64,
        feedback: impl FnOnce(f64) -> String,
        details: Vec<String>,
    ) -> Self {
        let raw_value = raw_value.clamp(0.0, 1.0);
        let weighted_points = (raw_value * max_points).clamp(0.0, max_points);
        Self {
            category,
            raw_value,
            weighted_points,
            max_points,
            feedback: feedback(weighted_points),
            details,
        }
    }
}

/// Composite outcome handed back to the caller for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub topic: String,
    pub total: f64,
    pub sub_scores: Vec<SubScore>,
    pub stars: f64,
    pub rating: String,
    pub tier: RatingTier,
    pub message: String,
}

impl ScoreResult {
    pub fn sub_score(&self, category: SubScoreCategory) -> Option<&SubScore> {
        self.sub_scores
            .iter()
            .find(|sub_score| sub_score.category == category)
    }

    /// Plain-text rendering used by the CLI.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Score: {} ({:.1}/5, {:.1}/100)",
            self.rating, self.stars, self.total
        );
        for sub_score in &self.sub_scores {
            let _ = writeln!(out, "\n{}", sub_score.feedback);
            for detail in &sub_score.details {
                let _ = writeln!(out, "  - {detail}");
            }
        }
        let _ = write!(out, "\n{}", self.message);
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoringError {
    #[error("response text must not be empty")]
    EmptyResponse,
}

/// Score `text` against a topic profile. The text is assumed non-empty.
pub fn score_response(text: &str, profile: &TopicProfile) -> ScoreResult {
    let sub_scores = vec![
        rules::length_score(text),
        rules::structure_score(text),
        rules::terminology_score(text, &profile.required_terms),
        rules::relevance_score(text, &profile.relevance_themes),
    ];

    let total = sub_scores
        .iter()
        .map(|sub_score| sub_score.weighted_points)
        .sum::<f64>()
        .clamp(0.0, SCALE_MAX);

    let tier = RatingTier::from_total(total);
    let stars = StarRating::from_total(total);

    ScoreResult {
        topic: profile.slug.clone(),
        total,
        sub_scores,
        stars: stars.value,
        rating: stars.glyphs,
        tier,
        message: tier.message(&profile.subject),
    }
}

/// Stateless scorer bound to one topic.
#[derive(Debug, Clone)]
pub struct ResponseScorer {
    profile: Arc<TopicProfile>,
}

impl ResponseScorer {
    pub fn new(profile: Arc<TopicProfile>) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &TopicProfile {
        &self.profile
    }

    pub fn score(&self, text: &str) -> ScoreResult {
        score_response(text, &self.profile)
    }

    /// Rejects empty or whitespace-only input before scoring the trimmed text.
    pub fn score_checked(&self, text: &str) -> Result<ScoreResult, ScoringError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ScoringError::EmptyResponse);
        }
        Ok(self.score(trimmed))
    }
}
