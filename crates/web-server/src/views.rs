//! View models handed to the presentation layer.
//!
//! Each page controller returns one of these as JSON. Rendering them into
//! pages is the consumer's job.

use core_types::{
    Attribute, DetailMatrix, QuestionWithChoices, TreatmentDetail, TreatmentOption,
};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize)]
pub struct NavLink {
    pub label: &'static str,
    pub href: &'static str,
}

/// The static landing page.
#[derive(Debug, Clone, Serialize)]
pub struct HomeView {
    pub title: &'static str,
    pub introduction: &'static str,
    pub links: Vec<NavLink>,
}

impl Default for HomeView {
    fn default() -> Self {
        Self {
            title: "Asthma treatment options",
            introduction: "Compare the available asthma treatments side by side, then check \
                           how well you understood each one before talking with your doctor.",
            links: vec![
                NavLink {
                    label: "Treatment options",
                    href: "/treatments",
                },
                NavLink {
                    label: "Compare treatments",
                    href: "/compare",
                },
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TreatmentListView {
    pub treatments: Vec<TreatmentOption>,
}

/// One treatment with its pros/cons per attribute and its quiz form.
#[derive(Debug, Clone, Serialize)]
pub struct TreatmentDetailView {
    pub treatment: TreatmentOption,
    pub attributes: Vec<Attribute>,
    /// Every attribute id appears; `None` when the treatment has no row for it.
    pub details_by_attr: BTreeMap<i64, Option<TreatmentDetail>>,
    pub questions: Vec<QuestionWithChoices>,
}

impl TreatmentDetailView {
    pub fn new(
        treatment: TreatmentOption,
        attributes: Vec<Attribute>,
        details: Vec<TreatmentDetail>,
        questions: Vec<QuestionWithChoices>,
    ) -> Self {
        let details_by_attr = attributes
            .iter()
            .map(|attribute| {
                let detail = details
                    .iter()
                    .find(|d| d.attribute_id == attribute.id)
                    .cloned();
                (attribute.id, detail)
            })
            .collect();

        Self {
            treatment,
            attributes,
            details_by_attr,
            questions,
        }
    }
}

/// The outcome of a quiz submission. Nothing here is persisted.
#[derive(Debug, Clone, Serialize)]
pub struct QuizResultView {
    pub treatment: TreatmentOption,
    /// `None` when no question received a usable answer.
    pub avg_score: Option<f64>,
    pub answered: usize,
    pub ask_list: Option<String>,
}

/// The full treatment × attribute matrix.
#[derive(Debug, Clone, Serialize)]
pub struct CompareView {
    pub treatments: Vec<TreatmentOption>,
    pub attributes: Vec<Attribute>,
    pub detail_map: DetailMatrix,
}
