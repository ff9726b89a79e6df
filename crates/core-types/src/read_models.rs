use crate::entities::{TreatmentDetail, UnderstandingChoice, UnderstandingQuestion};
use serde::Serialize;
use std::collections::BTreeMap;

/// A question together with its answer options, as presented on the quiz form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionWithChoices {
    #[serde(flatten)]
    pub question: UnderstandingQuestion,
    pub choices: Vec<UnderstandingChoice>,
}

impl QuestionWithChoices {
    /// The name of the form field carrying the answer to this question.
    pub fn field_name(&self) -> String {
        format!("question_{}", self.question.id)
    }

    /// Whether `score` is one of the scores this question offers.
    pub fn offers_score(&self, score: i64) -> bool {
        self.choices.iter().any(|c| c.score == score)
    }
}

/// Pros/cons rows keyed by `(treatment id, attribute id)`.
///
/// Only pairs that exist in storage have an entry; a missing pair is a blank
/// cell in the comparison matrix, not an error. Serializes as
/// `{ treatment_id: { attribute_id: detail } }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DetailMatrix {
    cells: BTreeMap<i64, BTreeMap<i64, TreatmentDetail>>,
}

impl DetailMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a detail under its own `(treatment_id, attribute_id)` pair.
    /// A later row for the same pair replaces the earlier one.
    pub fn insert(&mut self, detail: TreatmentDetail) {
        self.cells
            .entry(detail.treatment_id)
            .or_default()
            .insert(detail.attribute_id, detail);
    }

    pub fn get(&self, treatment_id: i64, attribute_id: i64) -> Option<&TreatmentDetail> {
        self.cells.get(&treatment_id)?.get(&attribute_id)
    }

    pub fn contains(&self, treatment_id: i64, attribute_id: i64) -> bool {
        self.get(treatment_id, attribute_id).is_some()
    }

    /// Number of populated cells.
    pub fn len(&self) -> usize {
        self.cells.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<TreatmentDetail> for DetailMatrix {
    fn from_iter<I: IntoIterator<Item = TreatmentDetail>>(iter: I) -> Self {
        let mut matrix = DetailMatrix::new();
        for detail in iter {
            matrix.insert(detail);
        }
        matrix
    }
}
