use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::learning::{
    KnownWords, KnownWordsStore, LearnerId, ProgressError, ProgressStore, ProgressSummary,
    ScoreAttempt,
};
use crate::scoring::{ResponseScorer, ScoreResult, ScoringError};
use crate::topics::{TopicCatalog, TopicSummary};

/// Free-text answer submitted for a topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSubmission {
    pub text: String,
    pub topic: String,
    /// When present the attempt is added to the learner's history.
    #[serde(default)]
    pub learner_id: Option<LearnerId>,
}

/// Service composing the topic catalog, per-topic scorers, and learner stores.
pub struct CoachService<P, K> {
    scorers: BTreeMap<String, ResponseScorer>,
    progress: Arc<P>,
    known_words: Arc<K>,
}

impl<P, K> CoachService<P, K>
where
    P: ProgressStore + 'static,
    K: KnownWordsStore + 'static,
{
    pub fn new(catalog: &TopicCatalog, progress: Arc<P>, known_words: Arc<K>) -> Self {
        let scorers = catalog
            .topics()
            .map(|profile| (profile.slug.clone(), ResponseScorer::new(Arc::clone(profile))))
            .collect();

        Self {
            scorers,
            progress,
            known_words,
        }
    }

    /// Score a submission and, for identified learners, persist the attempt.
    pub fn score(&self, submission: ScoreSubmission) -> Result<ScoreResult, CoachServiceError> {
        let ScoreSubmission {
            text,
            topic,
            learner_id,
        } = submission;

        let scorer = self
            .scorers
            .get(topic.trim())
            .ok_or_else(|| CoachServiceError::UnknownTopic(topic.clone()))?;

        let result = scorer.score_checked(&text)?;
        info!(
            topic = %result.topic,
            total = result.total,
            tier = result.tier.label(),
            "scored response"
        );

        if let Some(learner_id) = learner_id {
            let attempt = ScoreAttempt::from_result(learner_id, &result, Utc::now());
            debug!(learner = %attempt.learner_id.0, "recording attempt");
            self.progress.record(attempt)?;
        }

        Ok(result)
    }

    pub fn topics(&self) -> Vec<TopicSummary> {
        self.scorers
            .values()
            .map(|scorer| scorer.profile().summary())
            .collect()
    }

    pub fn progress(&self, learner_id: &LearnerId) -> Result<ProgressSummary, CoachServiceError> {
        let attempts = self.progress.attempts(learner_id)?;
        Ok(ProgressSummary::from_attempts(&attempts))
    }

    pub fn known_words(
        &self,
        learner_id: &LearnerId,
        topic: &str,
    ) -> Result<KnownWords, CoachServiceError> {
        let slug = self.topic_slug(topic)?;
        Ok(self.known_words.load(learner_id, slug)?)
    }

    pub fn mark_known(
        &self,
        learner_id: &LearnerId,
        topic: &str,
        card_id: u32,
    ) -> Result<KnownWords, CoachServiceError> {
        self.update_known(learner_id, topic, |known| known.mark(card_id))
    }

    pub fn unmark_known(
        &self,
        learner_id: &LearnerId,
        topic: &str,
        card_id: u32,
    ) -> Result<KnownWords, CoachServiceError> {
        self.update_known(learner_id, topic, |known| known.unmark(card_id))
    }

    fn update_known<F>(
        &self,
        learner_id: &LearnerId,
        topic: &str,
        change: F,
    ) -> Result<KnownWords, CoachServiceError>
    where
        F: FnOnce(&mut KnownWords) -> bool,
    {
        let slug = self.topic_slug(topic)?;
        let mut known = self.known_words.load(learner_id, slug)?;

        if change(&mut known) {
            debug!(
                learner = %learner_id.0,
                topic = slug,
                known = known.len(),
                "known words changed"
            );
            self.known_words.save(known.clone())?;
        }

        Ok(known)
    }

    fn topic_slug<'a>(&'a self, topic: &str) -> Result<&'a str, CoachServiceError> {
        self.scorers
            .get_key_value(topic.trim())
            .map(|(slug, _)| slug.as_str())
            .ok_or_else(|| CoachServiceError::UnknownTopic(topic.to_string()))
    }
}

/// Error raised by the coach service.
#[derive(Debug, thiserror::Error)]
pub enum CoachServiceError {
    #[error(transparent)]
    InvalidInput(#[from] ScoringError),
    #[error("unknown topic '{0}'")]
    UnknownTopic(String),
    #[error(transparent)]
    Progress(#[from] ProgressError),
}
