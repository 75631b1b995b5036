//! Vocabulary drilling and learner progress.

pub mod flashcards;
pub mod known_words;
pub mod progress;
pub mod quiz;

pub use flashcards::{DeckError, Difficulty, Flashcard, FlashcardDeck};
pub use known_words::{KnownWords, KnownWordsStore};
pub use progress::{
    LearnerId, ProgressError, ProgressStore, ProgressSummary, ScoreAttempt, TopicAverage,
    WeekdayActivity,
};
pub use quiz::{build_quiz, build_seeded_quiz, grade_quiz, QuizError, QuizGrade, QuizQuestion};
