use crate::views::{
    CompareView, HomeView, QuizResultView, TreatmentDetailView, TreatmentListView,
};
use crate::{AppState, error::AppError};
use axum::{
    Form, Json,
    extract::{Path, State},
};
use core_types::{ScoreSheet, TreatmentOption};
use database::DbError;
use std::collections::HashMap;
use std::sync::Arc;

/// Free-text list of questions the patient wants to ask their doctor.
const ASK_LIST_FIELD: &str = "ask_list";

/// Parses the `:treatment_id` path segment. A segment that is not an `i64`
/// cannot name a stored treatment, so it is reported as not found.
fn parse_treatment_id(raw: &str) -> Result<i64, AppError> {
    raw.parse()
        .map_err(|_| AppError::NotFound(format!("No treatment with id {raw}")))
}

async fn load_treatment(state: &AppState, treatment_id: i64) -> Result<TreatmentOption, AppError> {
    state
        .db_repo
        .get_treatment(treatment_id)
        .await
        .map_err(|e| match e {
            DbError::NotFound => AppError::NotFound(format!("No treatment with id {treatment_id}")),
            other => AppError::Database(other),
        })
}

/// # GET /
pub async fn home() -> Json<HomeView> {
    Json(HomeView::default())
}

/// # GET /treatments
pub async fn list_treatments(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TreatmentListView>, AppError> {
    let treatments = state.db_repo.get_all_treatments().await?;
    Ok(Json(TreatmentListView { treatments }))
}

/// # GET /treatments/:treatment_id
/// The treatment's pros/cons per attribute, plus the comprehension quiz.
pub async fn treatment_detail(
    Path(treatment_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<TreatmentDetailView>, AppError> {
    let treatment_id = parse_treatment_id(&treatment_id)?;
    let treatment = load_treatment(&state, treatment_id).await?;
    let attributes = state.db_repo.get_attributes().await?;
    let details = state.db_repo.get_details_for_treatment(treatment.id).await?;
    let questions = state.db_repo.get_questions_with_choices(treatment.id).await?;

    Ok(Json(TreatmentDetailView::new(
        treatment, attributes, details, questions,
    )))
}

/// # POST /treatments/:treatment_id
/// Scores a quiz submission. Fields are `question_<id>` plus an optional `ask_list`.
pub async fn submit_quiz(
    Path(treatment_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Form(form): Form<HashMap<String, String>>,
) -> Result<Json<QuizResultView>, AppError> {
    let treatment_id = parse_treatment_id(&treatment_id)?;
    let treatment = load_treatment(&state, treatment_id).await?;
    let questions = state.db_repo.get_questions_with_choices(treatment.id).await?;

    let sheet = ScoreSheet::grade(&questions, |field| form.get(field).map(String::as_str));
    for skipped in sheet.skipped() {
        tracing::warn!(
            treatment_id,
            question_id = skipped.question_id,
            value = %skipped.value,
            reason = %skipped.reason,
            "Ignoring unscorable quiz answer."
        );
    }

    let avg_score = sheet.average();
    tracing::debug!(treatment_id, answered = sheet.answered(), ?avg_score, "Scored quiz submission.");

    Ok(Json(QuizResultView {
        treatment,
        avg_score,
        answered: sheet.answered(),
        ask_list: form.get(ASK_LIST_FIELD).cloned(),
    }))
}

/// # GET /compare
/// Every treatment against every attribute; absent pairs are left out of the map.
pub async fn compare(State(state): State<Arc<AppState>>) -> Result<Json<CompareView>, AppError> {
    let treatments = state.db_repo.get_all_treatments().await?;
    let attributes = state.db_repo.get_attributes().await?;
    let detail_map = state.db_repo.get_detail_matrix().await?;
    if detail_map.is_empty() {
        tracing::warn!("Comparison requested but no treatment details are stored.");
    }

    Ok(Json(CompareView {
        treatments,
        attributes,
        detail_map,
    }))
}
