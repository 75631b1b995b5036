use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::learning::{
    build_seeded_quiz, grade_quiz, Flashcard, FlashcardDeck, KnownWords, KnownWordsStore,
    LearnerId, ProgressStore, ProgressSummary, QuizGrade, QuizQuestion,
};
use crate::scoring::ScoreResult;
use crate::service::{CoachService, ScoreSubmission};
use crate::topics::TopicSummary;

const DEFAULT_QUIZ_QUESTIONS: usize = 7;

type SharedService<P, K> = State<Arc<CoachService<P, K>>>;

/// Router builder exposing scoring, topic, progress, known-word, and quiz endpoints.
pub fn coach_router<P, K>(service: Arc<CoachService<P, K>>) -> Router
where
    P: ProgressStore + 'static,
    K: KnownWordsStore + 'static,
{
    Router::new()
        .route("/score", post(score_handler::<P, K>))
        .route("/api/v1/topics", get(topics_handler::<P, K>))
        .route(
            "/api/v1/progress/:learner_id",
            get(progress_handler::<P, K>),
        )
        .route(
            "/api/v1/known-words/:learner_id/:topic",
            get(known_words_handler::<P, K>).post(mark_known_handler::<P, K>),
        )
        .route(
            "/api/v1/known-words/:learner_id/:topic/:card_id",
            delete(unmark_known_handler::<P, K>),
        )
        .route("/api/v1/quiz", post(quiz_handler))
        .route("/api/v1/quiz/grade", post(grade_handler))
        .with_state(service)
}

pub(crate) async fn score_handler<P, K>(
    State(service): SharedService<P, K>,
    Json(submission): Json<ScoreSubmission>,
) -> Result<Json<ScoreResult>, AppError>
where
    P: ProgressStore + 'static,
    K: KnownWordsStore + 'static,
{
    Ok(Json(service.score(submission)?))
}

pub(crate) async fn topics_handler<P, K>(
    State(service): SharedService<P, K>,
) -> Json<Vec<TopicSummary>>
where
    P: ProgressStore + 'static,
    K: KnownWordsStore + 'static,
{
    Json(service.topics())
}

pub(crate) async fn progress_handler<P, K>(
    State(service): SharedService<P, K>,
    Path(learner_id): Path<String>,
) -> Result<Json<ProgressSummary>, AppError>
where
    P: ProgressStore + 'static,
    K: KnownWordsStore + 'static,
{
    Ok(Json(service.progress(&LearnerId(learner_id))?))
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkKnownRequest {
    pub card_id: u32,
}

pub(crate) async fn known_words_handler<P, K>(
    State(service): SharedService<P, K>,
    Path((learner_id, topic)): Path<(String, String)>,
) -> Result<Json<KnownWords>, AppError>
where
    P: ProgressStore + 'static,
    K: KnownWordsStore + 'static,
{
    Ok(Json(service.known_words(&LearnerId(learner_id), &topic)?))
}

pub(crate) async fn mark_known_handler<P, K>(
    State(service): SharedService<P, K>,
    Path((learner_id, topic)): Path<(String, String)>,
    Json(request): Json<MarkKnownRequest>,
) -> Result<Json<KnownWords>, AppError>
where
    P: ProgressStore + 'static,
    K: KnownWordsStore + 'static,
{
    let known = service.mark_known(&LearnerId(learner_id), &topic, request.card_id)?;
    Ok(Json(known))
}

pub(crate) async fn unmark_known_handler<P, K>(
    State(service): SharedService<P, K>,
    Path((learner_id, topic, card_id)): Path<(String, String, u32)>,
) -> Result<Json<KnownWords>, AppError>
where
    P: ProgressStore + 'static,
    K: KnownWordsStore + 'static,
{
    let known = service.unmark_known(&LearnerId(learner_id), &topic, card_id)?;
    Ok(Json(known))
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuizRequest {
    pub cards: Vec<Flashcard>,
    #[serde(default)]
    pub count: Option<usize>,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizResponse {
    pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GradeRequest {
    pub questions: Vec<QuizQuestion>,
    pub answers: Vec<String>,
}

pub(crate) async fn quiz_handler(
    Json(request): Json<QuizRequest>,
) -> Result<Json<QuizResponse>, AppError> {
    let deck = FlashcardDeck::new(request.cards)?;
    let count = request.count.unwrap_or(DEFAULT_QUIZ_QUESTIONS);
    let questions = build_seeded_quiz(deck.cards(), count, request.seed)?;
    Ok(Json(QuizResponse { questions }))
}

pub(crate) async fn grade_handler(Json(request): Json<GradeRequest>) -> Json<QuizGrade> {
    Json(grade_quiz(&request.questions, &request.answers))
}
