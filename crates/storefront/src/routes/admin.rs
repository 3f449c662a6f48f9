//! Admin route handlers for product submissions.

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use tracing::instrument;

use crate::error::Result;
use crate::services::{ProductSubmissionForm, STANDARD_CATEGORIES, StoredSubmission};
use crate::state::AppState;

/// Response to a recorded submission.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub message: &'static str,
    pub is_new_category: bool,
    pub data: StoredSubmission,
}

/// Categories offered by the form.
#[instrument]
pub async fn categories() -> Json<[&'static str; 5]> {
    Json(STANDARD_CATEGORIES)
}

/// List recorded submissions.
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<StoredSubmission>>> {
    let store = state.submissions()?;
    Ok(Json(store.list()))
}

/// Validate and record a submission.
#[instrument(skip(state, form))]
pub async fn create(
    State(state): State<AppState>,
    Json(form): Json<ProductSubmissionForm>,
) -> Result<(StatusCode, Json<SubmissionResponse>)> {
    let submission = form.validate()?;
    let is_new_category = submission.is_new_category();
    let stored = state.submissions()?.save(submission)?;

    Ok((
        StatusCode::CREATED,
        Json(SubmissionResponse {
            message: "Product saved",
            is_new_category,
            data: stored,
        }),
    ))
}

/// Delete every recorded submission.
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Result<StatusCode> {
    state.submissions()?.clear()?;
    Ok(StatusCode::NO_CONTENT)
}
