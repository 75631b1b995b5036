use lingo_coach::config::CatalogConfig;
use lingo_coach::learning::{
    KnownWords, KnownWordsStore, LearnerId, ProgressError, ProgressStore, ScoreAttempt,
};
use lingo_coach::topics::{TopicCatalog, TopicConfigError};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local score history keyed by learner.
#[derive(Default, Clone)]
pub(crate) struct InMemoryProgressStore {
    attempts: Arc<Mutex<HashMap<LearnerId, Vec<ScoreAttempt>>>>,
}

impl ProgressStore for InMemoryProgressStore {
    fn record(&self, attempt: ScoreAttempt) -> Result<(), ProgressError> {
        let mut guard = self
            .attempts
            .lock()
            .map_err(|_| ProgressError::Unavailable("progress mutex poisoned".to_string()))?;
        guard
            .entry(attempt.learner_id.clone())
            .or_default()
            .push(attempt);
        Ok(())
    }

    fn attempts(&self, learner_id: &LearnerId) -> Result<Vec<ScoreAttempt>, ProgressError> {
        let guard = self
            .attempts
            .lock()
            .map_err(|_| ProgressError::Unavailable("progress mutex poisoned".to_string()))?;
        Ok(guard.get(learner_id).cloned().unwrap_or_default())
    }
}

/// Process-local known words keyed by learner and topic slug.
#[derive(Default, Clone)]
pub(crate) struct InMemoryKnownWordsStore {
    sets: Arc<Mutex<HashMap<(LearnerId, String), KnownWords>>>,
}

impl KnownWordsStore for InMemoryKnownWordsStore {
    fn load(&self, learner_id: &LearnerId, topic: &str) -> Result<KnownWords, ProgressError> {
        let guard = self
            .sets
            .lock()
            .map_err(|_| ProgressError::Unavailable("known words mutex poisoned".to_string()))?;
        Ok(guard
            .get(&(learner_id.clone(), topic.to_string()))
            .cloned()
            .unwrap_or_else(|| KnownWords::new(learner_id.clone(), topic)))
    }

    fn save(&self, known: KnownWords) -> Result<(), ProgressError> {
        let mut guard = self
            .sets
            .lock()
            .map_err(|_| ProgressError::Unavailable("known words mutex poisoned".to_string()))?;
        guard.insert((known.learner_id.clone(), known.topic.clone()), known);
        Ok(())
    }
}

/// Loads the configured topic file, falling back to the bundled topics.
pub(crate) fn load_catalog(config: &CatalogConfig) -> Result<TopicCatalog, TopicConfigError> {
    let catalog = match &config.topics_path {
        Some(path) => {
            info!(path = %path.display(), "loading topic catalog");
            TopicCatalog::from_path(path)?
        }
        None => TopicCatalog::builtin()?,
    };
    info!(topics = catalog.len(), "topic catalog ready");
    Ok(catalog)
}
