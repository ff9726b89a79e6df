//! Row-level entities of the treatment comparison store.
//!
//! Relationships are plain foreign-key fields. Navigating from a treatment to
//! its details or questions goes through the repository, never through
//! back-references held on the structs themselves.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One of the compared asthma therapies.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct TreatmentOption {
    pub id: i64,
    pub name: String,
    pub brief_description: String,
}

/// A fixed comparison dimension (efficacy, side effects, cost, ...).
/// `order_index` defines the display order shared by every treatment.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Attribute {
    pub id: i64,
    pub name: String,
    pub order_index: i64,
}

/// Pros/cons text for one treatment under one attribute.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct TreatmentDetail {
    pub id: i64,
    pub treatment_id: i64,
    pub attribute_id: i64,
    pub pros_text: Option<String>,
    pub cons_text: Option<String>,
}

/// A comprehension self-check item owned by a treatment.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct UnderstandingQuestion {
    pub id: i64,
    pub treatment_id: i64,
    pub text: String,
    pub order_index: i64,
}

/// A Likert-style answer option for a question.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct UnderstandingChoice {
    pub id: i64,
    pub question_id: i64,
    pub label: String,
    pub score: i64,
}
