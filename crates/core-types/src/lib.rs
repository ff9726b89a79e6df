pub mod entities;
pub mod error;
pub mod read_models;
pub mod scoring;

// Re-export the core types to provide a clean public API.
pub use entities::{
    Attribute, TreatmentDetail, TreatmentOption, UnderstandingChoice, UnderstandingQuestion,
};
pub use error::CoreError;
pub use read_models::{DetailMatrix, QuestionWithChoices};
pub use scoring::{ScoreSheet, SkippedAnswer, average_score, parse_score};
