use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::flashcards::Flashcard;
use super::progress::{LearnerId, ProgressError};

/// Flashcards a learner has marked as known within one topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnownWords {
    pub learner_id: LearnerId,
    pub topic: String,
    pub card_ids: BTreeSet<u32>,
}

impl KnownWords {
    pub fn new(learner_id: LearnerId, topic: impl Into<String>) -> Self {
        Self {
            learner_id,
            topic: topic.into(),
            card_ids: BTreeSet::new(),
        }
    }

    /// Returns `false` when the card was already known.
    pub fn mark(&mut self, card_id: u32) -> bool {
        self.card_ids.insert(card_id)
    }

    /// Returns `false` when the card was not known.
    pub fn unmark(&mut self, card_id: u32) -> bool {
        self.card_ids.remove(&card_id)
    }

    pub fn contains(&self, card_id: u32) -> bool {
        self.card_ids.contains(&card_id)
    }

    pub fn len(&self) -> usize {
        self.card_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.card_ids.is_empty()
    }

    /// Known cards from `cards`, in deck order. Ids missing from the deck are skipped.
    pub fn known_cards<'a>(&self, cards: &'a [Flashcard]) -> Vec<&'a Flashcard> {
        cards
            .iter()
            .filter(|card| self.contains(card.id))
            .collect()
    }
}

/// Storage abstraction for per-topic known words.
pub trait KnownWordsStore: Send + Sync {
    /// Yields an empty set when nothing was marked for the learner and topic.
    fn load(&self, learner_id: &LearnerId, topic: &str) -> Result<KnownWords, ProgressError>;
    fn save(&self, known: KnownWords) -> Result<(), ProgressError>;
}
