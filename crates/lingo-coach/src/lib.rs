//! Language-learning coach: free-text response scoring, topic catalogs, and
//! flashcard study tooling.

pub mod config;
pub mod error;
pub mod learning;
pub mod router;
pub mod scoring;
pub mod service;
pub mod telemetry;
pub mod topics;

pub use router::coach_router;
pub use service::{CoachService, CoachServiceError, ScoreSubmission};
