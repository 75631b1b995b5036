use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::flashcards::Flashcard;

/// Fewest distinct translations that can supply one answer plus three distractors.
pub const MIN_QUIZ_CARDS: usize = 4;
const DISTRACTORS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub word: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizGrade {
    pub correct: usize,
    pub total: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuizError {
    #[error(
        "not enough flashcards to create a quiz: need at least 4 distinct translations, have {available}"
    )]
    NotEnoughCards { available: usize },
    #[error("a quiz needs at least one question")]
    NoQuestionsRequested,
}

/// Draw up to `count` multiple-choice questions from `cards`.
///
/// Each question offers the card's translation plus three distinct
/// translations taken from other cards, in random order.
pub fn build_quiz<R: Rng + ?Sized>(
    cards: &[Flashcard],
    count: usize,
    rng: &mut R,
) -> Result<Vec<QuizQuestion>, QuizError> {
    let translations: HashSet<&str> = cards
        .iter()
        .map(|card| card.translation.as_str())
        .collect();
    if translations.len() < MIN_QUIZ_CARDS {
        return Err(QuizError::NotEnoughCards {
            available: translations.len(),
        });
    }
    if count == 0 {
        return Err(QuizError::NoQuestionsRequested);
    }

    let mut selected: Vec<&Flashcard> = cards.iter().collect();
    selected.shuffle(rng);
    selected.truncate(count.min(cards.len()));

    let questions = selected
        .into_iter()
        .map(|card| {
            let mut distractors: Vec<&str> = Vec::new();
            for other in cards.iter().filter(|other| other.id != card.id) {
                let translation = other.translation.as_str();
                if translation != card.translation && !distractors.contains(&translation) {
                    distractors.push(translation);
                }
            }
            distractors.shuffle(rng);
            distractors.truncate(DISTRACTORS);

            let mut options: Vec<String> = distractors.into_iter().map(str::to_string).collect();
            options.push(card.translation.clone());
            options.shuffle(rng);

            QuizQuestion {
                word: card.word.clone(),
                options,
                correct_answer: card.translation.clone(),
            }
        })
        .collect();

    Ok(questions)
}

/// Reproducible when `seed` is set; otherwise draws from the thread RNG.
pub fn build_seeded_quiz(
    cards: &[Flashcard],
    count: usize,
    seed: Option<u64>,
) -> Result<Vec<QuizQuestion>, QuizError> {
    match seed {
        Some(seed) => build_quiz(cards, count, &mut StdRng::seed_from_u64(seed)),
        None => build_quiz(cards, count, &mut rand::rng()),
    }
}

/// Unanswered questions count as wrong; surplus answers are ignored.
pub fn grade_quiz(questions: &[QuizQuestion], answers: &[String]) -> QuizGrade {
    let correct = questions
        .iter()
        .zip(answers)
        .filter(|(question, answer)| answer.trim() == question.correct_answer)
        .count();
    let total = questions.len();
    let percentage = if total == 0 {
        0.0
    } else {
        correct as f64 * 100.0 / total as f64
    };

    QuizGrade {
        correct,
        total,
        percentage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::learning::flashcards::Difficulty;

    fn card(id: u32, word: &str, translation: &str) -> Flashcard {
        Flashcard {
            id,
            word: word.to_string(),
            translation: translation.to_string(),
            example: format!("An example with {word}."),
            difficulty: Difficulty::Beginner,
        }
    }

    fn cards() -> Vec<Flashcard> {
        vec![
            card(0, "Tank", "tank-he"),
            card(1, "Battlefield", "battlefield-he"),
            card(2, "Commander", "commander-he"),
            card(3, "Enemy", "enemy-he"),
            card(4, "Victory", "victory-he"),
            card(5, "Shield", "shield-he"),
        ]
    }

    #[test]
    fn requires_four_cards() {
        let short = &cards()[..3];
        assert_eq!(
            build_seeded_quiz(short, 5, Some(1)),
            Err(QuizError::NotEnoughCards { available: 3 })
        );
    }

    #[test]
    fn repeated_translations_do_not_count_towards_minimum() {
        let deck = vec![
            card(0, "Tank", "tank-he"),
            card(1, "Armour", "tank-he"),
            card(2, "Commander", "commander-he"),
            card(3, "Officer", "commander-he"),
            card(4, "Enemy", "enemy-he"),
        ];

        assert_eq!(
            build_seeded_quiz(&deck, 5, Some(1)),
            Err(QuizError::NotEnoughCards { available: 3 })
        );
    }

    #[test]
    fn repeated_translations_still_yield_four_options() {
        let mut deck = cards()[..4].to_vec();
        deck.push(card(10, "Armour", "tank-he"));
        deck.push(card(11, "Officer", "commander-he"));

        let questions = build_seeded_quiz(&deck, 6, Some(5)).expect("quiz builds");

        for question in &questions {
            let mut unique = question.options.clone();
            unique.sort();
            unique.dedup();
            assert_eq!(unique.len(), 4, "options for {}", question.word);
        }
    }

    #[test]
    fn rejects_zero_questions() {
        assert_eq!(
            build_seeded_quiz(&cards(), 0, Some(1)),
            Err(QuizError::NoQuestionsRequested)
        );
    }

    #[test]
    fn questions_contain_answer_and_three_distinct_distractors() {
        let questions = build_seeded_quiz(&cards(), 4, Some(7)).expect("quiz builds");

        assert_eq!(questions.len(), 4);
        for question in &questions {
            assert_eq!(question.options.len(), 4);
            assert!(question.options.contains(&question.correct_answer));
            let mut unique = question.options.clone();
            unique.sort();
            unique.dedup();
            assert_eq!(unique.len(), 4);
        }
    }

    #[test]
    fn question_count_caps_at_deck_size() {
        let questions = build_seeded_quiz(&cards(), 50, Some(3)).expect("quiz builds");
        assert_eq!(questions.len(), 6);
    }

    #[test]
    fn same_seed_builds_same_quiz() {
        let first = build_seeded_quiz(&cards(), 5, Some(42)).expect("quiz builds");
        let second = build_seeded_quiz(&cards(), 5, Some(42)).expect("quiz builds");
        assert_eq!(first, second);
    }

    #[test]
    fn grading_counts_missing_answers_as_wrong() {
        let questions = build_seeded_quiz(&cards(), 4, Some(9)).expect("quiz builds");
        let answers = vec![
            questions[0].correct_answer.clone(),
            format!("  {}  ", questions[1].correct_answer),
            "wrong".to_string(),
        ];

        let grade = grade_quiz(&questions, &answers);

        assert_eq!(grade.correct, 2);
        assert_eq!(grade.total, 4);
        assert_eq!(grade.percentage, 50.0);
    }

    #[test]
    fn grading_empty_quiz_is_zero_percent() {
        let grade = grade_quiz(&[], &["anything".to_string()]);
        assert_eq!(grade.total, 0);
        assert_eq!(grade.percentage, 0.0);
    }
}
