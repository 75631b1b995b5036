use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Word/translation/example triple used for vocabulary drilling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub id: u32,
    pub word: String,
    pub translation: String,
    pub example: String,
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    #[serde(alias = "easy")]
    Beginner,
    #[serde(alias = "medium")]
    Intermediate,
    #[serde(alias = "hard")]
    Advanced,
}

#[derive(Debug, thiserror::Error)]
pub enum DeckError {
    #[error("failed to read deck: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid deck row: {0}")]
    Csv(#[from] csv::Error),
    #[error("deck contains no cards")]
    Empty,
    #[error("card id {0} appears more than once")]
    DuplicateId(u32),
}

/// Ordered collection of flashcards with unique ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlashcardDeck {
    cards: Vec<Flashcard>,
}

impl FlashcardDeck {
    pub fn new(cards: Vec<Flashcard>) -> Result<Self, DeckError> {
        if cards.is_empty() {
            return Err(DeckError::Empty);
        }

        let mut seen = HashSet::with_capacity(cards.len());
        for card in &cards {
            if !seen.insert(card.id) {
                return Err(DeckError::DuplicateId(card.id));
            }
        }

        Ok(Self { cards })
    }

    /// Reads CSV with the header `id,word,translation,example,difficulty`.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DeckError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let cards = csv_reader
            .deserialize::<Flashcard>()
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(cards)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DeckError> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::from_reader(file)
    }

    pub fn cards(&self) -> &[Flashcard] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn by_difficulty(&self, difficulty: Difficulty) -> Vec<&Flashcard> {
        self.cards
            .iter()
            .filter(|card| card.difficulty == difficulty)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const DECK: &str = "id,word,translation,example,difficulty\n\
0,Tank,טַנְק,The tank rolled across the battlefield.,easy\n\
1,Commander,מְפַקֵּד,The commander gave clear instructions to the soldiers.,beginner\n\
2,Tactics,טַקְטִיקָה,\"The commander used clever tactics, again.\",advanced\n";

    #[test]
    fn parses_cards_and_difficulty_aliases() {
        let deck = FlashcardDeck::from_reader(Cursor::new(DECK)).expect("deck parses");

        assert_eq!(deck.len(), 3);
        assert_eq!(deck.cards()[0].difficulty, Difficulty::Beginner);
        assert_eq!(deck.cards()[2].example, "The commander used clever tactics, again.");
        assert_eq!(deck.by_difficulty(Difficulty::Beginner).len(), 2);
        assert_eq!(deck.by_difficulty(Difficulty::Intermediate).len(), 0);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let doubled = format!("{DECK}1,Enemy,אוֹיֵב,The enemy attacked.,easy\n");
        assert!(matches!(
            FlashcardDeck::from_reader(Cursor::new(doubled)),
            Err(DeckError::DuplicateId(1))
        ));
    }

    #[test]
    fn rejects_header_only_deck() {
        let header = "id,word,translation,example,difficulty\n";
        assert!(matches!(
            FlashcardDeck::from_reader(Cursor::new(header)),
            Err(DeckError::Empty)
        ));
    }

    #[test]
    fn rejects_unknown_difficulty() {
        let bad = "id,word,translation,example,difficulty\n0,Tank,t,e,legendary\n";
        assert!(matches!(
            FlashcardDeck::from_reader(Cursor::new(bad)),
            Err(DeckError::Csv(_))
        ));
    }
}
