use crate::config::ConfigError;
use crate::learning::{DeckError, QuizError};
use crate::service::CoachServiceError;
use crate::telemetry::TelemetryError;
use crate::topics::TopicConfigError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;
use tracing::warn;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Topics(TopicConfigError),
    Deck(DeckError),
    Quiz(QuizError),
    Coach(CoachServiceError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Topics(err) => write!(f, "topic catalog error: {}", err),
            AppError::Deck(err) => write!(f, "flashcard deck error: {}", err),
            AppError::Quiz(err) => write!(f, "quiz error: {}", err),
            AppError::Coach(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Topics(err) => Some(err),
            AppError::Deck(err) => Some(err),
            AppError::Quiz(err) => Some(err),
            AppError::Coach(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Deck(_)
            | AppError::Quiz(_)
            | AppError::Coach(CoachServiceError::InvalidInput(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Coach(CoachServiceError::UnknownTopic(_)) => StatusCode::NOT_FOUND,
            AppError::Coach(CoachServiceError::Progress(error)) => {
                warn!(%error, "progress store failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Config(_) | AppError::Telemetry(_) | AppError::Io(_) | AppError::Topics(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<TopicConfigError> for AppError {
    fn from(value: TopicConfigError) -> Self {
        Self::Topics(value)
    }
}

impl From<DeckError> for AppError {
    fn from(value: DeckError) -> Self {
        Self::Deck(value)
    }
}

impl From<QuizError> for AppError {
    fn from(value: QuizError) -> Self {
        Self::Quiz(value)
    }
}

impl From<CoachServiceError> for AppError {
    fn from(value: CoachServiceError) -> Self {
        Self::Coach(value)
    }
}
