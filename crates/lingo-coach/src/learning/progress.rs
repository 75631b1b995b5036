use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::scoring::{RatingTier, ScoreResult};

/// Identifier wrapper for a learner.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LearnerId(pub String);

/// One scored submission, kept for the learner dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreAttempt {
    pub learner_id: LearnerId,
    pub topic: String,
    pub total: f64,
    pub tier: RatingTier,
    pub recorded_at: DateTime<Utc>,
}

impl ScoreAttempt {
    pub fn from_result(
        learner_id: LearnerId,
        result: &ScoreResult,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            learner_id,
            topic: result.topic.clone(),
            total: result.total,
            tier: result.tier,
            recorded_at,
        }
    }
}

/// Storage abstraction for score history.
pub trait ProgressStore: Send + Sync {
    fn record(&self, attempt: ScoreAttempt) -> Result<(), ProgressError>;
    fn attempts(&self, learner_id: &LearnerId) -> Result<Vec<ScoreAttempt>, ProgressError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ProgressError {
    #[error("progress store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicAverage {
    pub topic: String,
    pub attempts: usize,
    pub average_total: f64,
}

/// Attempts grouped by the day of the week they were recorded on.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekdayActivity {
    pub weekday: Weekday,
    pub attempts: usize,
    pub average_total: f64,
}

/// Dashboard figures derived from a learner's attempts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    pub attempts: usize,
    pub average_total: f64,
    pub best_total: f64,
    /// Latest total minus the one before it; absent with fewer than two attempts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score_change: Option<f64>,
    pub topics: Vec<TopicAverage>,
    /// Monday first; days without attempts are omitted.
    pub weekly_activity: Vec<WeekdayActivity>,
}

impl ProgressSummary {
    pub fn from_attempts(attempts: &[ScoreAttempt]) -> Self {
        if attempts.is_empty() {
            return Self {
                attempts: 0,
                average_total: 0.0,
                best_total: 0.0,
                score_change: None,
                topics: Vec::new(),
                weekly_activity: Vec::new(),
            };
        }

        let mut ordered: Vec<&ScoreAttempt> = attempts.iter().collect();
        ordered.sort_by_key(|attempt| attempt.recorded_at);

        let sum: f64 = ordered.iter().map(|attempt| attempt.total).sum();
        let best_total = ordered
            .iter()
            .map(|attempt| attempt.total)
            .fold(0.0_f64, f64::max);
        let score_change = match ordered.as_slice() {
            [.., previous, latest] => Some(latest.total - previous.total),
            _ => None,
        };

        let mut per_topic: BTreeMap<&str, (usize, f64)> = BTreeMap::new();
        for attempt in &ordered {
            let entry = per_topic.entry(attempt.topic.as_str()).or_insert((0, 0.0));
            entry.0 += 1;
            entry.1 += attempt.total;
        }

        let topics = per_topic
            .into_iter()
            .map(|(topic, (count, total))| TopicAverage {
                topic: topic.to_string(),
                attempts: count,
                average_total: total / count as f64,
            })
            .collect();

        let mut per_day: BTreeMap<u32, (Weekday, usize, f64)> = BTreeMap::new();
        for attempt in &ordered {
            let weekday = attempt.recorded_at.weekday();
            let entry = per_day
                .entry(weekday.num_days_from_monday())
                .or_insert((weekday, 0, 0.0));
            entry.1 += 1;
            entry.2 += attempt.total;
        }

        let weekly_activity = per_day
            .into_values()
            .map(|(weekday, count, total)| WeekdayActivity {
                weekday,
                attempts: count,
                average_total: total / count as f64,
            })
            .collect();

        Self {
            attempts: ordered.len(),
            average_total: sum / ordered.len() as f64,
            best_total,
            score_change,
            topics,
            weekly_activity,
        }
    }
}
